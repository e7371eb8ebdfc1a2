//! Integration tests for the word-stream pipeline.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use threatsort::error::Result;
use threatsort::{
    build_tables, extract_countries, parse_words, Category, Error, ExtractedDocument, ParseResult,
    ThreatSort, WordSource, WordToken,
};

/// Canned token streams keyed by path; unknown paths fail.
struct MapSource(HashMap<PathBuf, Vec<WordToken>>);

impl MapSource {
    fn new(docs: &[(&str, Vec<WordToken>)]) -> Self {
        Self(
            docs.iter()
                .map(|(p, w)| (PathBuf::from(p), w.clone()))
                .collect(),
        )
    }
}

impl WordSource for MapSource {
    fn extract(&self, path: &Path) -> Result<ExtractedDocument> {
        match self.0.get(path) {
            Some(words) => Ok(ExtractedDocument::from_words(path, words.clone())),
            None => Err(Error::PdfParse("trailer not found".to_string())),
        }
    }
}

fn bold(words: &str) -> Vec<WordToken> {
    words.split(' ').map(WordToken::bold).collect()
}

fn regular(words: &str) -> Vec<WordToken> {
    words.split(' ').map(WordToken::regular).collect()
}

fn stream(parts: &[Vec<WordToken>]) -> Vec<WordToken> {
    parts.concat()
}

#[test]
fn test_single_actor_single_incident() {
    let words = stream(&[
        bold("ACCESS"),
        bold("ACME"),
        regular("sells access to a bank in Germany"),
    ]);
    let tables = build_tables(&[parse_words(&words)]);

    let rows = &tables.access_broker.rows;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].number, 1);
    assert_eq!(rows[0].actor, "ACME");
    assert_eq!(rows[0].incident, "sells access to a bank in Germany.");
    assert_eq!(rows[0].country.as_deref(), Some("Germany"));
    assert_eq!(tables.countries.occurrences("Germany"), 1);
}

#[test]
fn test_multi_incident_actor_across_documents() {
    let source = MapSource::new(&[
        (
            "week-02.pdf",
            stream(&[bold("ACCESS ACME"), regular("re-sold access")]),
        ),
        (
            "week-01.pdf",
            stream(&[bold("ACCESS ACME"), regular("leaked 500 records")]),
        ),
    ]);
    let report = ThreatSort::new()
        .run_with(&source, ["week-02.pdf", "week-01.pdf"])
        .unwrap();

    let rows = &report.tables.access_broker.rows;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].incident, "• leaked 500 records.\n• re-sold access.");
    assert_eq!(rows[0].incidents(), vec!["leaked 500 records.", "re-sold access."]);
    assert_eq!(report.tables.access_broker.incident_count(), 2);
    assert_eq!(report.tables.totals.count(Category::AccessBroker), 2);
    assert_eq!(report.documents.len(), 2);
}

#[test]
fn test_no_header_defaults_to_other() {
    let words = stream(&[
        bold("ACME"),
        regular("ran a phishing kit"),
        bold("Beta Group"),
        regular("posted a loader"),
    ]);
    let result = parse_words(&words);

    assert!(result.incidents(Category::AccessBroker).is_empty());
    let other = result.incidents(Category::Other);
    assert_eq!(other.len(), 2);
    assert_eq!(other[1].actor, "Beta Group");
    assert_eq!(other[1].description, "posted a loader.");
}

#[test]
fn test_zero_incidents() {
    let tables = build_tables(&[parse_words(&[])]);

    for category in Category::ALL {
        assert!(tables.category(category).rows.is_empty());
        assert_eq!(tables.totals.count(category), 0);
    }
    assert_eq!(tables.totals.total(), 0);
    assert!(tables.countries.rows.is_empty());
}

#[test]
fn test_section_markers_bound_the_scan() {
    let words = stream(&[
        bold("DATA COVER"),
        regular("weekly digest"),
        bold("THREAT DETAIL"),
        bold("DATA"),
        bold("LeakBase"),
        regular("published customer records of a French retailer"),
        bold("THREAT ACTIVITY"),
        bold("Trailer"),
        regular("not an incident"),
    ]);
    let result = parse_words(&words);

    assert!(result.start_marker_found);
    assert!(result.end_marker_found);
    assert_eq!(result.len(), 1);
    assert_eq!(result.incidents(Category::DataBreaches)[0].actor, "LeakBase");

    let tables = build_tables(&[result]);
    assert_eq!(
        tables.data_breaches.rows[0].country.as_deref(),
        Some("France")
    );
}

#[test]
fn test_parse_is_idempotent() {
    let words = stream(&[
        bold("MALWARE"),
        bold("Lumma"),
        regular("1. stealer sold via Telegram in bulk ."),
        bold("OTHER"),
        bold("x0r"),
        regular("shared a phishlet"),
    ]);
    let first = parse_words(&words);
    let second = parse_words(&words);
    assert_eq!(first, second);
    assert_eq!(first.incidents(Category::Malware)[0].description, "stealer sold via in bulk.");
}

#[test]
fn test_actor_order_follows_first_appearance() {
    let doc1 = parse_words(&stream(&[
        bold("ACCESS"),
        bold("Beta"),
        regular("VPN access"),
        bold("Alpha"),
        regular("RDP access"),
    ]));
    let doc2 = parse_words(&stream(&[
        bold("ACCESS"),
        bold("Gamma"),
        regular("shell access"),
        bold("Alpha"),
        regular("more RDP access"),
    ]));
    let tables = build_tables(&[doc1, doc2]);

    let actors: Vec<&str> = tables
        .access_broker
        .rows
        .iter()
        .map(|r| r.actor.as_str())
        .collect();
    assert_eq!(actors, vec!["Beta", "Alpha", "Gamma"]);
    let numbers: Vec<usize> = tables.access_broker.rows.iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn test_counting_consistency() {
    let results: Vec<ParseResult> = ["one", "two", "three"]
        .iter()
        .map(|d| parse_words(&stream(&[bold("MALWARE ACME"), regular(d)])))
        .collect();
    let tables = build_tables(&results);

    for category in Category::ALL {
        let table = tables.category(category);
        let by_rows: usize = table.rows.iter().map(|r| r.incident_count()).sum();
        assert_eq!(table.incident_count(), by_rows);
        assert_eq!(tables.totals.count(category), by_rows);
    }
    assert_eq!(tables.totals.total(), 3);
}

#[test]
fn test_country_round_trip() {
    let us: BTreeSet<String> = ["United States".to_string()].into_iter().collect();
    assert_eq!(extract_countries("a firm in the United States."), us);
    assert_eq!(extract_countries("a firm in the US."), us);
    assert!(extract_countries("USAGE statistics leaked.").is_empty());
}

#[test]
fn test_all_or_nothing_failure() {
    let source = MapSource::new(&[("a.pdf", stream(&[bold("ACME"), regular("x")]))]);
    let err = ThreatSort::new()
        .run_with(&source, ["a.pdf", "broken.pdf"])
        .unwrap_err();

    match err {
        Error::Document { path, .. } => assert_eq!(path, PathBuf::from("broken.pdf")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_skip_failed_continues() {
    let source = MapSource::new(&[("a.pdf", stream(&[bold("ACME"), regular("x")]))]);
    let report = ThreatSort::new()
        .skip_failed()
        .run_with(&source, ["broken.pdf", "a.pdf"])
        .unwrap();

    assert_eq!(report.documents.len(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, PathBuf::from("broken.pdf"));
    assert_eq!(report.total_incidents(), 1);
}

#[test]
fn test_empty_run_is_an_error() {
    let source = MapSource::new(&[]);
    let paths: [&str; 0] = [];
    assert!(matches!(
        ThreatSort::new().run_with(&source, paths),
        Err(Error::NoDocuments)
    ));
}
