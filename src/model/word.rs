//! Word tokens produced by text extraction.

use serde::{Deserialize, Serialize};

/// A single extracted word with the font it was rendered in.
///
/// Tokens are consumed in document order; the parser only looks at the
/// text and whether the font is a bold face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordToken {
    /// The word text (no interior whitespace)
    pub text: String,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Page the word was found on (1-indexed, 0 if unknown)
    #[serde(default)]
    pub page: u32,
}

impl WordToken {
    /// Create a new token.
    pub fn new(text: impl Into<String>, font_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_name: font_name.into(),
            page: 0,
        }
    }

    /// Create a token in a regular (non-bold) face.
    pub fn regular(text: impl Into<String>) -> Self {
        Self::new(text, "Helvetica")
    }

    /// Create a token in a bold face.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text, "Helvetica-Bold")
    }

    /// Set the page number.
    pub fn on_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Whether the token was rendered in a bold face.
    pub fn is_bold(&self) -> bool {
        is_bold_font(&self.font_name)
    }

    /// Upper-cased text, used for marker and header comparisons.
    pub fn upper(&self) -> String {
        self.text.to_uppercase()
    }
}

/// Check if a font name denotes a bold face.
pub fn is_bold_font(font_name: &str) -> bool {
    let lower = font_name.to_lowercase();
    lower.contains("bold") || lower.contains("black") || lower.contains("heavy")
}
