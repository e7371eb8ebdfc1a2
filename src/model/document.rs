//! Document-level types.

use super::WordToken;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata of one input report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Source path
    pub path: PathBuf,

    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Total number of pages
    pub page_count: u32,

    /// Document title from the Info dictionary
    pub title: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Number of extracted words
    pub word_count: usize,
}

impl DocumentInfo {
    /// Create metadata for a path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// File name for display, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Words extracted from one report, plus its metadata.
#[derive(Debug, Clone, Default)]
pub struct ExtractedDocument {
    /// Document metadata
    pub info: DocumentInfo,

    /// Word tokens in reading order
    pub words: Vec<WordToken>,
}

impl ExtractedDocument {
    /// Wrap an already extracted token stream.
    pub fn from_words(path: impl Into<PathBuf>, words: Vec<WordToken>) -> Self {
        let mut info = DocumentInfo::new(path);
        info.word_count = words.len();
        Self { info, words }
    }
}

/// A document that was left out of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDocument {
    /// Source path
    pub path: PathBuf,

    /// Why it failed
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let info = DocumentInfo::new("reports/2024-w03.pdf");
        assert_eq!(info.display_name(), "2024-w03.pdf");
    }

    #[test]
    fn test_from_words_counts() {
        let doc = ExtractedDocument::from_words(
            "a.pdf",
            vec![WordToken::bold("ACME"), WordToken::regular("sells")],
        );
        assert_eq!(doc.info.word_count, 2);
        assert_eq!(doc.words.len(), 2);
    }
}
