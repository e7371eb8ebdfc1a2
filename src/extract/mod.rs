//! Word extraction from PDF reports.
//!
//! The parser only needs an ordered stream of `(text, font)` words. This
//! module produces that stream from a PDF: the backend walks each page's
//! content stream into positioned spans, spans are put in reading order and
//! split into words.

mod backend;
mod options;
mod spans;
mod words;

pub use backend::{
    decode_text_simple, ContentOp, FontResource, LopdfBackend, PageId, PdfBackend, PdfValue,
    TextDecoder,
};
pub use options::{ErrorMode, ExtractOptions, PageSelection, ReadingOrder};
pub use spans::{extract_page_spans, group_into_lines, order_spans, TextSpan};
pub use words::{normalize_span_text, spans_to_words};

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};

use crate::detect::sniff_path;
use crate::error::{Error, Result};
use crate::model::{DocumentInfo, ExtractedDocument};

/// A source of word streams for documents.
///
/// Implementations must be shareable across threads so documents can be
/// extracted in parallel.
pub trait WordSource: Sync {
    /// Extract the ordered words of the document at `path`.
    fn extract(&self, path: &Path) -> Result<ExtractedDocument>;
}

/// [`WordSource`] reading PDF files through `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct PdfWordSource {
    options: ExtractOptions,
}

impl PdfWordSource {
    /// Create a source with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source with custom options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }
}

impl WordSource for PdfWordSource {
    fn extract(&self, path: &Path) -> Result<ExtractedDocument> {
        let header = sniff_path(path)?;
        let backend = LopdfBackend::load_file(path)?;
        let mut doc = extract_document(&backend, path, &self.options)?;
        if doc.info.pdf_version.is_empty() {
            doc.info.pdf_version = header.version;
        }
        Ok(doc)
    }
}

/// Extract words and metadata through any backend.
pub fn extract_document<B: PdfBackend + ?Sized>(
    backend: &B,
    path: &Path,
    options: &ExtractOptions,
) -> Result<ExtractedDocument> {
    let pages = backend.pages();
    let page_count = pages.len() as u32;

    if let PageSelection::Range(range) = &options.pages {
        if *range.start() > page_count {
            return Err(Error::PageOutOfRange(*range.start(), page_count));
        }
    }

    let mut words = Vec::new();
    for (&number, &page_id) in &pages {
        if !options.pages.includes(number) {
            continue;
        }
        match extract_page_spans(backend, page_id) {
            Ok(spans) => {
                log::debug!("Page {}: {} spans", number, spans.len());
                let spans = order_spans(spans, options.reading_order);
                words.extend(spans_to_words(&spans, number));
            }
            Err(e) => match options.error_mode {
                ErrorMode::Strict => {
                    return Err(Error::TextExtract(format!("page {}: {}", number, e)))
                }
                ErrorMode::Lenient => {
                    log::warn!("Skipping page {} of {}: {}", number, path.display(), e);
                }
            },
        }
    }

    let info = DocumentInfo {
        path: path.to_path_buf(),
        pdf_version: backend.version(),
        page_count,
        title: backend
            .info_string(b"Title")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()),
        created: backend
            .info_string(b"CreationDate")
            .and_then(|d| parse_pdf_date(&d)),
        word_count: words.len(),
    };
    Ok(ExtractedDocument { info, words })
}

/// Parse a PDF date (`D:YYYYMMDDHHmmSS...`) as UTC, ignoring the offset.
pub fn parse_pdf_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    let s = s.strip_prefix("D:").unwrap_or(s);
    let field = |range: std::ops::Range<usize>, default: u32| -> Option<u32> {
        match s.get(range) {
            Some(v) if v.chars().all(|c| c.is_ascii_digit()) => v.parse().ok(),
            Some(_) => None,
            None => Some(default),
        }
    };

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month = field(4..6, 1)?;
    let day = field(6..8, 1)?;
    let hour = field(8..10, 0)?;
    let minute = field(10..12, 0)?;
    let second = field(12..14, 0)?;

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
}
