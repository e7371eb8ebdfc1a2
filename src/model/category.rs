//! Incident categories and the section-header vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of incident categories.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Category {
    /// Sale or advertisement of unauthorised access
    #[serde(rename = "Access Broker")]
    AccessBroker,
    /// Unauthorised disclosure or sale of data
    #[serde(rename = "Data Breaches")]
    DataBreaches,
    /// Malicious software enabling intrusion or persistence
    #[serde(rename = "Malware")]
    Malware,
    /// Everything else, including vulnerability items
    #[default]
    #[serde(rename = "Other Threats")]
    Other,
}

impl Category {
    /// All categories in table order.
    pub const ALL: [Category; 4] = [
        Category::AccessBroker,
        Category::DataBreaches,
        Category::Malware,
        Category::Other,
    ];

    /// Map a bold header word to its category.
    ///
    /// Returns `None` for words outside the header vocabulary.
    pub fn from_header(word: &str) -> Option<Self> {
        match word.to_uppercase().as_str() {
            "ACCESS" => Some(Category::AccessBroker),
            "DATA" => Some(Category::DataBreaches),
            "MALWARE" => Some(Category::Malware),
            "OTHER" | "VULNERABILITY" => Some(Category::Other),
            _ => None,
        }
    }

    /// Display name, also used as table and sheet name.
    pub fn name(self) -> &'static str {
        match self {
            Category::AccessBroker => "Access Broker",
            Category::DataBreaches => "Data Breaches",
            Category::Malware => "Malware",
            Category::Other => "Other Threats",
        }
    }

    /// Whether tables of this category carry a `Country` column.
    pub fn has_country_column(self) -> bool {
        matches!(self, Category::AccessBroker | Category::DataBreaches)
    }

    /// Position in [`Category::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_mapping() {
        assert_eq!(Category::from_header("ACCESS"), Some(Category::AccessBroker));
        assert_eq!(Category::from_header("Data"), Some(Category::DataBreaches));
        assert_eq!(Category::from_header("malware"), Some(Category::Malware));
        assert_eq!(Category::from_header("OTHER"), Some(Category::Other));
        assert_eq!(Category::from_header("VULNERABILITY"), Some(Category::Other));
        assert_eq!(Category::from_header("BROKER"), None);
    }

    #[test]
    fn test_country_column() {
        assert!(Category::AccessBroker.has_country_column());
        assert!(Category::DataBreaches.has_country_column());
        assert!(!Category::Malware.has_country_column());
        assert!(!Category::Other.has_country_column());
    }

    #[test]
    fn test_index_matches_order() {
        for (i, cat) in Category::ALL.iter().enumerate() {
            assert_eq!(cat.index(), i);
        }
        assert_eq!(Category::default(), Category::Other);
    }
}
