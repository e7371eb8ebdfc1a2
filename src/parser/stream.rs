//! Section bounds and the per-document parse driver.

use super::machine::IncidentMachine;
use crate::model::{ParseResult, WordToken};

/// Marker pair opening the threat-detail section.
pub const START_MARKER: (&str, &str) = ("THREAT", "DETAIL");

/// Marker pair closing the threat-detail section.
pub const END_MARKER: (&str, &str) = ("THREAT", "ACTIVITY");

/// Token range of the threat-detail section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionBounds {
    /// First token to scan
    pub start: usize,
    /// One past the last token to scan
    pub end: usize,
    /// Whether the start marker was found
    pub start_found: bool,
    /// Whether the end marker was found
    pub end_found: bool,
}

impl SectionBounds {
    /// Locate the section in a token stream.
    ///
    /// Without a start marker the scan starts at 0; without an end marker
    /// it runs to the end of the stream.
    pub fn locate(words: &[WordToken]) -> Self {
        let start_at = find_pair(words, 0, START_MARKER);
        let start = start_at.map(|i| i + 2).unwrap_or(0);
        let end_at = find_pair(words, start, END_MARKER);
        let end = end_at.unwrap_or(words.len());

        Self {
            start,
            end,
            start_found: start_at.is_some(),
            end_found: end_at.is_some(),
        }
    }

    /// Number of tokens in range.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn find_pair(words: &[WordToken], from: usize, (first, second): (&str, &str)) -> Option<usize> {
    if from >= words.len() {
        return None;
    }
    words[from..]
        .windows(2)
        .position(|pair| pair[0].upper() == first && pair[1].upper() == second)
        .map(|i| from + i)
}

/// Parse one document's token stream into per-category incidents.
pub fn parse_words(words: &[WordToken]) -> ParseResult {
    let bounds = SectionBounds::locate(words);
    if !bounds.start_found {
        log::warn!("Start marker THREAT DETAIL not found; parsing from the first word");
    }
    if !bounds.end_found {
        log::warn!("End marker THREAT ACTIVITY not found; parsing to the last word");
    }
    log::debug!(
        "Section bounds: {}..{} of {} words",
        bounds.start,
        bounds.end,
        words.len()
    );

    let mut result = ParseResult::new();
    result.start_marker_found = bounds.start_found;
    result.end_marker_found = bounds.end_found;

    let mut machine = IncidentMachine::new();
    machine.enter();
    for token in &words[bounds.start..bounds.end] {
        if let Some((category, incident)) = machine.feed(token) {
            result.push(category, incident);
        }
    }
    if let Some((category, incident)) = machine.finish() {
        result.push(category, incident);
    }

    log::debug!("Parsed {} incidents", result.len());
    result
}
