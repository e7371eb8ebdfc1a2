//! JSON rendering of a report.

use serde::Serialize;

use super::RenderOptions;
use crate::error::{Error, Result};
use crate::model::{DocumentInfo, ReportTables, SkippedDocument};
use crate::summary::Summary;
use crate::Report;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialized shape: the six tables under their sheet names, then the
/// optional sections.
#[derive(Serialize)]
struct ReportView<'a> {
    #[serde(flatten)]
    tables: &'a ReportTables,

    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    documents: Option<&'a [DocumentInfo]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    skipped: Option<&'a [SkippedDocument]>,
}

/// Serialize any value.
pub fn to_json_value<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };
    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Render a report as JSON.
pub fn to_json(report: &Report, format: JsonFormat, options: &RenderOptions) -> Result<String> {
    let view = ReportView {
        tables: &report.tables,
        summary: options.include_summary.then(|| report.summary()),
        documents: options
            .include_documents
            .then_some(report.documents.as_slice()),
        skipped: (options.include_documents && !report.skipped.is_empty())
            .then_some(report.skipped.as_slice()),
    };
    to_json_value(&view, format)
}
