//! Narrative summary of a run.
//!
//! Everything here is derived from the finished tables: the per-category
//! incident counts and the `Other Threats` incident text.

use serde::Serialize;

use crate::model::{Category, CategoryTable, CountryRow, CountryTable, ReportTables};

/// Number of countries shown in the summary.
pub const TOP_COUNTRIES: usize = 10;

/// Keyword groups scanned in `Other Threats` incidents.
const THEMES: &[(&str, &[&str])] = &[
    ("phishing operations", &["phish", "phishing", "phishlet"]),
    (
        "credential harvesting",
        &["credential", "cookie", "session", "account"],
    ),
    (
        "vulnerability exploitation",
        &["exploit", "zero-day", "cve", "rce", "lfi", "sqli"],
    ),
    (
        "post compromise access",
        &["post compromise", "persistence", "lateral", "beacon", "c2"],
    ),
];

/// Incident counts per category, in table order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts([usize; 4]);

impl CategoryCounts {
    /// Count incidents in each category table.
    pub fn from_tables(tables: &ReportTables) -> Self {
        Self(Category::ALL.map(|c| tables.category(c).incident_count()))
    }

    /// Create from counts in [`Category::ALL`] order.
    pub fn from_array(counts: [usize; 4]) -> Self {
        Self(counts)
    }

    /// Count of one category.
    pub fn get(&self, category: Category) -> usize {
        self.0[category.index()]
    }

    /// Sum over all categories.
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// `(category, count)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(4))?;
        for (category, count) in self.iter() {
            map.serialize_entry(category.name(), &count)?;
        }
        map.end()
    }
}

/// Sentence ranking categories by incident count.
pub fn executive_summary(counts: &CategoryCounts) -> String {
    let total = counts.total();
    if total == 0 {
        return "No cyber security incidents were recorded during this reporting period."
            .to_string();
    }

    let mut ranked: Vec<(Category, usize)> = counts.iter().filter(|(_, n)| *n > 0).collect();
    // stable: ties keep table order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let parts: Vec<String> = ranked
        .iter()
        .map(|(c, n)| format!("{} at {} cases", c.name(), n))
        .collect();

    let lead = format!("A total of {} cyber security incidents were recorded", total);
    match parts.as_slice() {
        [only] => format!("{}, consisting solely of {}.", lead, only),
        [first, second] => format!("{}, with {} leading, followed by {}.", lead, first, second),
        [first, middle @ .., last] => format!(
            "{}, with {} leading, followed by {}, while {}.",
            lead,
            first,
            middle.join(", "),
            last
        ),
        [] => unreachable!("total > 0 implies a non-zero category"),
    }
}

/// Themes present in `Other Threats` incidents, sorted.
pub fn detect_themes(table: &CategoryTable) -> Vec<&'static str> {
    let text = table
        .rows
        .iter()
        .map(|r| r.incident.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut themes: Vec<&'static str> = THEMES
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(theme, _)| *theme)
        .collect();
    themes.sort_unstable();
    themes
}

/// Theme sentence for the `Other Threats` table, `None` if the table is empty.
pub fn other_threats_themes(table: &CategoryTable) -> Option<String> {
    if table.rows.is_empty() {
        return None;
    }

    let themes = detect_themes(table);
    let sentence = match themes.as_slice() {
        [] => "Other Threats cases indicate the continued availability of varied offensive \
               cyber tools within underground ecosystems."
            .to_string(),
        [only] => format!("Other Threats cases indicate activity focused on {}.", only),
        [init @ .., last] => format!(
            "Other Threats cases indicate ongoing development and commercialisation of \
             offensive cyber tools that support {}, and {}. The observed activity reflects \
             an organised underground market that prioritises scalability, operational \
             efficiency, and rapid adoption of newly disclosed vulnerabilities.",
            init.join(", "),
            last
        ),
    };
    Some(sentence)
}

/// The most frequent countries.
pub fn top_countries(table: &CountryTable, n: usize) -> &[CountryRow] {
    table.top(n)
}

/// Summary block of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Incident counts per category
    pub counts: CategoryCounts,

    /// Total incident count
    pub total: usize,

    /// Category ranking sentence
    pub executive: String,

    /// Other Threats theme sentence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_threats: Option<String>,

    /// Most frequent countries
    pub top_countries: Vec<CountryRow>,
}

impl Summary {
    /// Summarize a set of tables.
    pub fn from_tables(tables: &ReportTables) -> Self {
        let counts = CategoryCounts::from_tables(tables);
        Self {
            counts,
            total: counts.total(),
            executive: executive_summary(&counts),
            other_threats: other_threats_themes(&tables.other_threats),
            top_countries: top_countries(&tables.countries, TOP_COUNTRIES).to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryRow;

    fn other(cells: &[&str]) -> CategoryTable {
        CategoryTable {
            category: Category::Other,
            rows: cells
                .iter()
                .enumerate()
                .map(|(i, c)| CategoryRow {
                    number: i + 1,
                    actor: format!("actor{}", i),
                    incident: c.to_string(),
                    country: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_summary_zero() {
        assert_eq!(
            executive_summary(&CategoryCounts::default()),
            "No cyber security incidents were recorded during this reporting period."
        );
    }

    #[test]
    fn test_summary_single_category() {
        let counts = CategoryCounts::from_array([0, 0, 4, 0]);
        assert_eq!(
            executive_summary(&counts),
            "A total of 4 cyber security incidents were recorded, consisting solely of Malware at 4 cases."
        );
    }

    #[test]
    fn test_summary_two_categories() {
        let counts = CategoryCounts::from_array([2, 0, 0, 5]);
        assert_eq!(
            executive_summary(&counts),
            "A total of 7 cyber security incidents were recorded, with Other Threats at 5 cases leading, followed by Access Broker at 2 cases."
        );
    }

    #[test]
    fn test_summary_ranking_and_ties() {
        let counts = CategoryCounts::from_array([3, 3, 1, 6]);
        assert_eq!(
            executive_summary(&counts),
            "A total of 13 cyber security incidents were recorded, with Other Threats at 6 cases leading, \
             followed by Access Broker at 3 cases, Data Breaches at 3 cases, while Malware at 1 cases."
        );
    }

    #[test]
    fn test_themes_none_for_empty_table() {
        assert_eq!(other_threats_themes(&other(&[])), None);
    }

    #[test]
    fn test_themes_generic() {
        let s = other_threats_themes(&other(&["sells a crypter."])).unwrap();
        assert!(s.contains("continued availability"));
    }

    #[test]
    fn test_themes_single() {
        let s = other_threats_themes(&other(&["Phishing kit with MFA bypass."])).unwrap();
        assert_eq!(s, "Other Threats cases indicate activity focused on phishing operations.");
    }

    #[test]
    fn test_themes_multiple() {
        let table = other(&["• New CVE exploit for VPN.\n• stolen cookie logs.", "C2 panel."]);
        assert_eq!(
            detect_themes(&table),
            vec![
                "credential harvesting",
                "post compromise access",
                "vulnerability exploitation"
            ]
        );
        let s = other_threats_themes(&table).unwrap();
        assert!(s.contains(
            "that support credential harvesting, post compromise access, and vulnerability exploitation."
        ));
        assert!(s.ends_with("newly disclosed vulnerabilities."));
    }

    #[test]
    fn test_counts_serialize_by_name() {
        let json = serde_json::to_value(CategoryCounts::from_array([1, 2, 3, 4])).unwrap();
        assert_eq!(json["Access Broker"], 1);
        assert_eq!(json["Other Threats"], 4);
    }
}
