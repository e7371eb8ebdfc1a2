//! Output table types.
//!
//! These are the six tables handed to downstream consumers. Column names
//! are fixed; the `•` marker inside an `Incident` cell separates the
//! individual descriptions of a multi-incident actor.

use super::Category;
use serde::Serialize;

/// Bullet marker that prefixes each description in a multi-incident cell.
pub const BULLET: char = '•';

/// Uniform view over a table for renderers.
pub trait Tabular {
    /// Table (sheet) name.
    fn title(&self) -> &str;

    /// Column headers in order.
    fn columns(&self) -> Vec<&'static str>;

    /// Row cells as display strings, one inner vector per row.
    fn cells(&self) -> Vec<Vec<String>>;

    /// Check if the table has no rows.
    fn is_empty(&self) -> bool {
        self.cells().is_empty()
    }
}

/// One row of a category table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRow {
    /// 1-based sequence number
    #[serde(rename = "No.")]
    pub number: usize,

    /// Actor name
    #[serde(rename = "Threat Actor")]
    pub actor: String,

    /// Single description, or bullet lines joined with newlines
    #[serde(rename = "Incident")]
    pub incident: String,

    /// Comma-joined countries, or "Unknown" (Access Broker and Data Breaches only)
    #[serde(rename = "Country", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl CategoryRow {
    /// Individual descriptions held in the `Incident` cell.
    pub fn incidents(&self) -> Vec<&str> {
        split_incident_cell(&self.incident)
    }

    /// Number of incidents this row counts for.
    pub fn incident_count(&self) -> usize {
        count_cell_incidents(&self.incident)
    }
}

/// Per-category incident table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryTable {
    #[serde(skip)]
    pub category: Category,

    pub rows: Vec<CategoryRow>,
}

impl CategoryTable {
    /// Create an empty table for a category.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            rows: Vec::new(),
        }
    }

    /// Number of actor rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of incidents, one per bullet line or one per plain row.
    pub fn incident_count(&self) -> usize {
        self.rows.iter().map(CategoryRow::incident_count).sum()
    }

    /// Find the row of an actor.
    pub fn row_for(&self, actor: &str) -> Option<&CategoryRow> {
        self.rows.iter().find(|r| r.actor == actor)
    }
}

impl Tabular for CategoryTable {
    fn title(&self) -> &str {
        self.category.name()
    }

    fn columns(&self) -> Vec<&'static str> {
        if self.category.has_country_column() {
            vec!["No.", "Threat Actor", "Incident", "Country"]
        } else {
            vec!["No.", "Threat Actor", "Incident"]
        }
    }

    fn cells(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| {
                let mut cells = vec![r.number.to_string(), r.actor.clone(), r.incident.clone()];
                if let Some(ref country) = r.country {
                    cells.push(country.clone());
                }
                cells
            })
            .collect()
    }
}

/// One row of the totals table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalsRow {
    #[serde(rename = "Category")]
    pub category: String,

    #[serde(rename = "Count")]
    pub count: usize,
}

/// Incident counts per category plus a grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TotalsTable {
    pub rows: Vec<TotalsRow>,
}

impl TotalsTable {
    /// Label of the grand-total row.
    pub const TOTAL_LABEL: &'static str = "Total";

    /// Build from per-category counts given in [`Category::ALL`] order.
    pub fn from_counts(counts: [usize; 4]) -> Self {
        let mut rows: Vec<TotalsRow> = Category::ALL
            .iter()
            .zip(counts)
            .map(|(cat, count)| TotalsRow {
                category: cat.name().to_string(),
                count,
            })
            .collect();
        rows.push(TotalsRow {
            category: Self::TOTAL_LABEL.to_string(),
            count: counts.iter().sum(),
        });
        Self { rows }
    }

    /// Count for a category.
    pub fn count(&self, category: Category) -> usize {
        self.rows
            .iter()
            .find(|r| r.category == category.name())
            .map(|r| r.count)
            .unwrap_or(0)
    }

    /// Grand total.
    pub fn total(&self) -> usize {
        self.rows
            .iter()
            .find(|r| r.category == Self::TOTAL_LABEL)
            .map(|r| r.count)
            .unwrap_or(0)
    }
}

impl Tabular for TotalsTable {
    fn title(&self) -> &str {
        "Totals"
    }

    fn columns(&self) -> Vec<&'static str> {
        vec!["Category", "Count"]
    }

    fn cells(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| vec![r.category.clone(), r.count.to_string()])
            .collect()
    }
}

/// One row of the country-occurrence table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryRow {
    #[serde(rename = "Country")]
    pub country: String,

    #[serde(rename = "Occurrences")]
    pub occurrences: usize,
}

/// Country mentions in Access Broker and Data Breaches descriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CountryTable {
    pub rows: Vec<CountryRow>,
}

impl CountryTable {
    /// The first `n` rows (most frequent countries).
    pub fn top(&self, n: usize) -> &[CountryRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Occurrences of a country, 0 if absent.
    pub fn occurrences(&self, country: &str) -> usize {
        self.rows
            .iter()
            .find(|r| r.country == country)
            .map(|r| r.occurrences)
            .unwrap_or(0)
    }
}

impl Tabular for CountryTable {
    fn title(&self) -> &str {
        "Country Occurrences"
    }

    fn columns(&self) -> Vec<&'static str> {
        vec!["Country", "Occurrences"]
    }

    fn cells(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| vec![r.country.clone(), r.occurrences.to_string()])
            .collect()
    }
}

/// The six output tables, in their fixed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTables {
    #[serde(rename = "Access Broker")]
    pub access_broker: CategoryTable,

    #[serde(rename = "Data Breaches")]
    pub data_breaches: CategoryTable,

    #[serde(rename = "Malware")]
    pub malware: CategoryTable,

    #[serde(rename = "Other Threats")]
    pub other_threats: CategoryTable,

    #[serde(rename = "Totals")]
    pub totals: TotalsTable,

    #[serde(rename = "Country Occurrences")]
    pub countries: CountryTable,
}

impl ReportTables {
    /// Table of one category.
    pub fn category(&self, category: Category) -> &CategoryTable {
        match category {
            Category::AccessBroker => &self.access_broker,
            Category::DataBreaches => &self.data_breaches,
            Category::Malware => &self.malware,
            Category::Other => &self.other_threats,
        }
    }

    /// The tables as a fixed-order tuple.
    pub fn as_tuple(
        &self,
    ) -> (
        &CategoryTable,
        &CategoryTable,
        &CategoryTable,
        &CategoryTable,
        &TotalsTable,
        &CountryTable,
    ) {
        (
            &self.access_broker,
            &self.data_breaches,
            &self.malware,
            &self.other_threats,
            &self.totals,
            &self.countries,
        )
    }

    /// All six tables in order, for renderers.
    pub fn tables(&self) -> [&dyn Tabular; 6] {
        [
            &self.access_broker,
            &self.data_breaches,
            &self.malware,
            &self.other_threats,
            &self.totals,
            &self.countries,
        ]
    }
}

/// Split an `Incident` cell into its descriptions.
///
/// Cells with bullet lines yield the text of each bullet line; other cells
/// yield the whole trimmed cell.
pub fn split_incident_cell(cell: &str) -> Vec<&str> {
    let lines: Vec<&str> = cell
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.iter().any(|l| l.starts_with(BULLET)) {
        lines
            .into_iter()
            .filter_map(|l| l.strip_prefix(BULLET))
            .map(str::trim)
            .collect()
    } else if cell.trim().is_empty() {
        Vec::new()
    } else {
        vec![cell.trim()]
    }
}

/// Incidents counted for one `Incident` cell.
pub fn count_cell_incidents(cell: &str) -> usize {
    let bullets = cell
        .lines()
        .filter(|l| l.trim_start().starts_with(BULLET))
        .count();
    if bullets > 0 {
        bullets
    } else {
        1
    }
}
