//! Incidents and per-document parse results.

use super::Category;
use serde::{Deserialize, Serialize};

/// One attributed unit of threat activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    /// Threat actor, forum handle or malware family
    pub actor: String,
    /// Cleaned, sentence-terminated description
    pub description: String,
}

impl Incident {
    /// Create a new incident.
    pub fn new(actor: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            description: description.into(),
        }
    }
}

/// Incidents found in one document, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    access_broker: Vec<Incident>,
    data_breaches: Vec<Incident>,
    malware: Vec<Incident>,
    other: Vec<Incident>,

    /// Whether the "THREAT DETAIL" start marker was found
    pub start_marker_found: bool,

    /// Whether the "THREAT ACTIVITY" end marker was found
    pub end_marker_found: bool,
}

impl ParseResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an incident to a category, preserving document order.
    pub fn push(&mut self, category: Category, incident: Incident) {
        self.list_mut(category).push(incident);
    }

    /// Incidents of one category in document order.
    pub fn incidents(&self, category: Category) -> &[Incident] {
        match category {
            Category::AccessBroker => &self.access_broker,
            Category::DataBreaches => &self.data_breaches,
            Category::Malware => &self.malware,
            Category::Other => &self.other,
        }
    }

    /// Iterate categories in table order with their incidents.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Incident])> {
        Category::ALL.into_iter().map(|c| (c, self.incidents(c)))
    }

    /// Total number of incidents across categories.
    pub fn len(&self) -> usize {
        self.iter().map(|(_, items)| items.len()).sum()
    }

    /// Check if no incidents were found.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn list_mut(&mut self, category: Category) -> &mut Vec<Incident> {
        match category {
            Category::AccessBroker => &mut self.access_broker,
            Category::DataBreaches => &mut self.data_breaches,
            Category::Malware => &mut self.malware,
            Category::Other => &mut self.other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut result = ParseResult::new();
        result.push(Category::Malware, Incident::new("A", "first."));
        result.push(Category::Malware, Incident::new("B", "second."));
        result.push(Category::AccessBroker, Incident::new("C", "third."));

        let malware = result.incidents(Category::Malware);
        assert_eq!(malware[0].actor, "A");
        assert_eq!(malware[1].actor, "B");
        assert_eq!(result.len(), 3);
        assert!(result.incidents(Category::Other).is_empty());
    }

    #[test]
    fn test_iter_visits_all_categories() {
        let result = ParseResult::new();
        let cats: Vec<_> = result.iter().map(|(c, _)| c).collect();
        assert_eq!(cats, Category::ALL.to_vec());
        assert!(result.is_empty());
    }
}
