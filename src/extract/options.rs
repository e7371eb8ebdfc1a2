//! Extraction options.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Options controlling how words are pulled out of a PDF.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Which pages to read
    pub pages: PageSelection,

    /// Order in which spans of a page are emitted
    pub reading_order: ReadingOrder,

    /// What to do with a page that cannot be decoded
    pub error_mode: ErrorMode,
}

impl ExtractOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set reading order.
    pub fn with_reading_order(mut self, order: ReadingOrder) -> Self {
        self.reading_order = order;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Skip undecodable pages instead of failing the document.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the document on the first bad page
    #[default]
    Strict,
    /// Log and skip bad pages
    Lenient,
}

/// Span ordering within a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadingOrder {
    /// Group into lines top to bottom, spans left to right
    #[default]
    Layout,
    /// Keep content-stream order
    Stream,
}

/// Page selection (1-indexed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Every page
    #[default]
    All,
    /// An inclusive range of pages
    Range(RangeInclusive<u32>),
    /// Specific pages
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number is selected.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a selection such as `"all"`, `"2-4"` or `"1,3,5-7"`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                let start = parse_page(start, s)?;
                let end = parse_page(end, s)?;
                if start > end {
                    return Err(Error::InvalidPageRange(s.to_string()));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            match part.split_once('-') {
                Some((start, end)) => {
                    let start = parse_page(start, s)?;
                    let end = parse_page(end, s)?;
                    if start > end {
                        return Err(Error::InvalidPageRange(s.to_string()));
                    }
                    pages.extend(start..=end);
                }
                None => pages.push(parse_page(part, s)?),
            }
        }
        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

impl std::str::FromStr for PageSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PageSelection::parse(s)
    }
}

fn parse_page(part: &str, whole: &str) -> Result<u32> {
    match part.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidPageRange(whole.to_string())),
        Ok(n) => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ExtractOptions::new()
            .lenient()
            .with_reading_order(ReadingOrder::Stream)
            .with_pages(PageSelection::Range(2..=3));

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.reading_order, ReadingOrder::Stream);
        assert!(options.pages.includes(2));
        assert!(!options.pages.includes(4));
    }

    #[test]
    fn test_defaults() {
        let options = ExtractOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.reading_order, ReadingOrder::Layout);
        assert_eq!(options.pages, PageSelection::All);
    }

    #[test]
    fn test_parse_page_selection() {
        assert_eq!(PageSelection::parse("all").unwrap(), PageSelection::All);
        assert_eq!(PageSelection::parse("").unwrap(), PageSelection::All);
        assert_eq!(PageSelection::parse("2-4").unwrap(), PageSelection::Range(2..=4));
        assert_eq!(
            PageSelection::parse("5,1,3-4,3").unwrap(),
            PageSelection::Pages(vec![1, 3, 4, 5])
        );
        assert_eq!(PageSelection::parse("7").unwrap(), PageSelection::Pages(vec![7]));
    }

    #[test]
    fn test_parse_page_selection_errors() {
        for bad in ["x", "4-2", "0", "1,,2", "1-"] {
            assert!(
                matches!(PageSelection::parse(bad), Err(Error::InvalidPageRange(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }
}
