//! Output table construction.

use std::collections::{BTreeSet, HashMap};

use super::store::{ActorGroup, AggregateStore};
use crate::country::CountryAliases;
use crate::model::{
    Category, CategoryRow, CategoryTable, CountryRow, CountryTable, ReportTables, TotalsTable,
    BULLET,
};

/// Placeholder for rows without any recognised country.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Join an actor's descriptions into one `Incident` cell.
pub fn incident_cell(descriptions: &[String]) -> String {
    match descriptions {
        [single] => single.clone(),
        many => many
            .iter()
            .map(|d| format!("{} {}", BULLET, d))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn country_cell(group: &ActorGroup, aliases: &CountryAliases) -> String {
    let countries: BTreeSet<String> = group
        .descriptions
        .iter()
        .flat_map(|d| aliases.extract(d))
        .collect();
    if countries.is_empty() {
        UNKNOWN_COUNTRY.to_string()
    } else {
        countries.into_iter().collect::<Vec<_>>().join(", ")
    }
}

/// Build the table of one category.
pub fn category_table(
    store: &AggregateStore,
    category: Category,
    aliases: &CountryAliases,
) -> CategoryTable {
    let rows = store
        .groups(category)
        .iter()
        .enumerate()
        .map(|(i, group)| CategoryRow {
            number: i + 1,
            actor: group.actor.clone(),
            incident: incident_cell(&group.descriptions),
            country: category
                .has_country_column()
                .then(|| country_cell(group, aliases)),
        })
        .collect();
    CategoryTable { category, rows }
}

/// Tally countries over Access Broker and Data Breaches descriptions.
///
/// Each description adds one occurrence per distinct country it mentions.
pub fn country_table(store: &AggregateStore, aliases: &CountryAliases) -> CountryTable {
    let mut tally: HashMap<String, usize> = HashMap::new();
    for (category, description) in store.descriptions() {
        if !category.has_country_column() {
            continue;
        }
        for country in aliases.extract(description) {
            *tally.entry(country).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<CountryRow> = tally
        .into_iter()
        .map(|(country, occurrences)| CountryRow {
            country,
            occurrences,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.occurrences
            .cmp(&a.occurrences)
            .then_with(|| a.country.cmp(&b.country))
    });
    CountryTable { rows }
}

/// Build all six tables from a store.
pub fn build_report_tables(store: &AggregateStore, aliases: &CountryAliases) -> ReportTables {
    let [access_broker, data_breaches, malware, other_threats] =
        Category::ALL.map(|c| category_table(store, c, aliases));

    let totals = TotalsTable::from_counts([
        access_broker.incident_count(),
        data_breaches.incident_count(),
        malware.incident_count(),
        other_threats.incident_count(),
    ]);
    let countries = country_table(store, aliases);

    log::info!(
        "Built tables from {} documents: {} incidents, {} countries",
        store.document_count(),
        totals.total(),
        countries.rows.len()
    );

    ReportTables {
        access_broker,
        data_breaches,
        malware,
        other_threats,
        totals,
        countries,
    }
}
