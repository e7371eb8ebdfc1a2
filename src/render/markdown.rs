//! Markdown rendering of a report.

use super::RenderOptions;
use crate::error::Result;
use crate::model::Tabular;
use crate::Report;

/// Render a report as Markdown: one section and pipe table per table.
pub fn to_markdown(report: &Report, options: &RenderOptions) -> Result<String> {
    let mut output = String::new();

    if options.include_summary {
        let summary = report.summary();
        output.push_str("## Executive Summary\n\n");
        output.push_str(&summary.executive);
        output.push_str("\n\n");
        if let Some(ref other) = summary.other_threats {
            output.push_str(other);
            output.push_str("\n\n");
        }
    }

    for table in report.tables.tables() {
        render_table(&mut output, table);
    }

    if options.include_documents && !report.documents.is_empty() {
        output.push_str("## Documents\n\n");
        for doc in &report.documents {
            output.push_str(&format!(
                "- {} ({} pages, {} words)\n",
                escape_cell(&doc.display_name()),
                doc.page_count,
                doc.word_count
            ));
        }
        for skipped in &report.skipped {
            output.push_str(&format!(
                "- {} (skipped: {})\n",
                escape_cell(&skipped.path.display().to_string()),
                escape_cell(&skipped.reason)
            ));
        }
        output.push('\n');
    }

    Ok(output.trim_end().to_string() + "\n")
}

fn render_table(output: &mut String, table: &dyn Tabular) {
    output.push_str(&format!("## {}\n\n", table.title()));

    let columns = table.columns();
    let rows = table.cells();
    if rows.is_empty() {
        output.push_str("_No entries._\n\n");
        return;
    }

    output.push('|');
    for column in &columns {
        output.push_str(&format!(" {} |", column));
    }
    output.push_str("\n|");
    for _ in &columns {
        output.push_str(" --- |");
    }
    output.push('\n');

    for row in rows {
        output.push('|');
        for cell in row {
            output.push_str(&format!(" {} |", escape_cell(&cell)));
        }
        output.push('\n');
    }
    output.push('\n');
}

/// Escape a table cell: pipes are escaped, newlines become `<br>`.
fn escape_cell(text: &str) -> String {
    text.trim()
        .replace('|', "\\|")
        .replace("\r\n", "\n")
        .replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Incident, ParseResult};
    use crate::build_tables;

    fn report() -> Report {
        let mut doc1 = ParseResult::new();
        doc1.push(Category::DataBreaches, Incident::new("ACME", "leaked 500 records."));
        let mut doc2 = ParseResult::new();
        doc2.push(Category::DataBreaches, Incident::new("ACME", "re-sold access | twice."));
        Report::from_tables(build_tables(&[doc1, doc2]))
    }

    #[test]
    fn test_sections_in_order() {
        let md = to_markdown(&report(), &RenderOptions::default()).unwrap();
        let positions: Vec<usize> = [
            "## Access Broker",
            "## Data Breaches",
            "## Malware",
            "## Other Threats",
            "## Totals",
            "## Country Occurrences",
        ]
        .iter()
        .map(|h| md.find(h).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!md.contains("Executive Summary"));
    }

    #[test]
    fn test_multi_incident_cell() {
        let md = to_markdown(&report(), &RenderOptions::default()).unwrap();
        assert!(md.contains("| No. | Threat Actor | Incident | Country |"));
        assert!(md.contains("• leaked 500 records.<br>• re-sold access \\| twice."));
        assert!(md.contains("| Data Breaches | 2 |"));
    }

    #[test]
    fn test_summary_section() {
        let options = RenderOptions::new().with_summary(true);
        let md = to_markdown(&report(), &options).unwrap();
        assert!(md.starts_with("## Executive Summary"));
        assert!(md.contains("consisting solely of Data Breaches at 2 cases."));
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
        assert_eq!(escape_cell("x\ny"), "x<br>y");
    }
}
