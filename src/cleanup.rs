//! Description cleanup.
//!
//! Raw descriptions come straight out of the word stream and still carry
//! source-platform names, stray list numbering and irregular spacing.

use regex::Regex;
use std::sync::OnceLock;

/// Marketplace, forum and channel names stripped from descriptions.
pub const SOURCE_PLATFORMS: &[&str] = &[
    "DarkForums",
    "Exploit",
    "RAMP",
    "Leakbase",
    "Telegram",
    "Breachforums",
    "XSS",
    "Hackforums",
    "Deepwebchinese",
];

/// Cleanup pipeline for incident descriptions.
pub struct DescriptionCleaner {
    source_regex: Regex,
    whitespace_regex: Regex,
    numbering_regex: Regex,
}

impl DescriptionCleaner {
    /// Create a cleaner for the given platform names.
    pub fn new(sources: &[&str]) -> Self {
        let alternation = sources
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");
        // An empty alternation would match everywhere; use a never-matching pattern.
        let source_pattern = if alternation.is_empty() {
            r"[^\s\S]".to_string()
        } else {
            format!(r"(?i)\b(?:{})\b", alternation)
        };

        Self {
            source_regex: Regex::new(&source_pattern).expect("escaped alternation is valid"),
            whitespace_regex: Regex::new(r"\s+").expect("static regex"),
            numbering_regex: Regex::new(r"^[\d\s.•\-]+").expect("static regex"),
        }
    }

    /// Shared cleaner for [`SOURCE_PLATFORMS`].
    pub fn global() -> &'static DescriptionCleaner {
        static CLEANER: OnceLock<DescriptionCleaner> = OnceLock::new();
        CLEANER.get_or_init(|| DescriptionCleaner::new(SOURCE_PLATFORMS))
    }

    /// Remove platform names, collapse whitespace and terminate the sentence.
    pub fn clean(&self, text: &str) -> String {
        let stripped = self.source_regex.replace_all(text, "");
        let mut result = self
            .whitespace_regex
            .replace_all(&stripped, " ")
            .trim()
            .to_string();

        if !result.is_empty() && !result.ends_with(['.', '!', '?']) {
            result.push('.');
        }
        result
    }

    /// Strip a leading run of digits, whitespace, periods, bullets or dashes.
    pub fn strip_numbering<'a>(&self, text: &'a str) -> &'a str {
        match self.numbering_regex.find(text) {
            Some(m) => &text[m.end()..],
            None => text,
        }
    }
}

impl Default for DescriptionCleaner {
    fn default() -> Self {
        Self::new(SOURCE_PLATFORMS)
    }
}

/// Clean a description with the shared cleaner.
pub fn clean_description(text: &str) -> String {
    DescriptionCleaner::global().clean(text)
}

/// Build the final description from its raw words.
///
/// Words are joined with single spaces, `" ."` artifacts are closed up,
/// leading numbering is dropped and the result is cleaned.
pub fn normalize_description<S: AsRef<str>>(words: &[S]) -> String {
    let cleaner = DescriptionCleaner::global();
    let joined = words
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
        .replace(" .", ".");
    let body = cleaner.strip_numbering(joined.trim());
    cleaner.clean(body)
}
