//! Word assembly from positioned spans.

use unicode_normalization::UnicodeNormalization;

use super::spans::TextSpan;
use crate::model::WordToken;

/// Typographic ligatures and their expansions.
const LIGATURES: &[(char, &str)] = &[
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"),
    ('\u{FB06}', "st"),
];

/// Gap (fraction of font size) under which adjacent spans join one word.
const GLUE_GAP: f32 = 0.3;

/// NFC-normalize and expand ligatures.
pub fn normalize_span_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfc() {
        match LIGATURES.iter().find(|(lig, _)| *lig == c) {
            Some((_, expansion)) => out.push_str(expansion),
            None => out.push(c),
        }
    }
    out
}

/// Whether `next` continues the word that `prev` ended.
fn continues(prev: &TextSpan, prev_text: &str, next: &TextSpan, next_text: &str) -> bool {
    if prev.font_name != next.font_name || !prev.same_baseline(next) {
        return false;
    }
    if prev_text.ends_with(char::is_whitespace) || next_text.starts_with(char::is_whitespace) {
        return false;
    }
    let gap = next.x - prev.estimated_end();
    gap < next.font_size * GLUE_GAP
}

/// Split a page's ordered spans into word tokens.
///
/// Every word inherits its span's font name. A span that continues the
/// previous one on the same baseline and font is glued onto the last word.
pub fn spans_to_words(spans: &[TextSpan], page: u32) -> Vec<WordToken> {
    let mut words: Vec<WordToken> = Vec::new();
    let mut prev: Option<(&TextSpan, String)> = None;

    for span in spans {
        let text = normalize_span_text(&span.text);
        let glue = prev
            .as_ref()
            .map(|(p, p_text)| continues(p, p_text, span, &text))
            .unwrap_or(false);

        let mut parts = text.split_whitespace();
        if glue {
            if let (Some(first), Some(last)) = (parts.next(), words.last_mut()) {
                last.text.push_str(first);
            }
        }
        words.extend(
            parts.map(|w| WordToken::new(w, span.font_name.clone()).on_page(page)),
        );

        prev = Some((span, text));
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_span_text() {
        assert_eq!(normalize_span_text("\u{FB01}nancial"), "financial");
        assert_eq!(normalize_span_text("cafe\u{301}"), "café");
    }

    #[test]
    fn test_split_and_font_inheritance() {
        let spans = vec![
            TextSpan::new("Dark Storm", 50.0, 700.0, 10.0, "Arial-BoldMT"),
            TextSpan::new("claimed a DDoS", 120.0, 700.0, 10.0, "ArialMT"),
        ];
        let words = spans_to_words(&spans, 2);
        let texts: Vec<_> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["Dark", "Storm", "claimed", "a", "DDoS"]);
        assert!(words[0].is_bold());
        assert!(!words[2].is_bold());
        assert!(words.iter().all(|w| w.page == 2));
    }

    #[test]
    fn test_adjacent_spans_glue() {
        // "Ger" ends at 50 + 3 * 5 = 65
        let spans = vec![
            TextSpan::new("Ger", 50.0, 700.0, 10.0, "ArialMT"),
            TextSpan::new("many.", 66.0, 700.0, 10.0, "ArialMT"),
        ];
        let words = spans_to_words(&spans, 1);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "Germany.");
    }

    #[test]
    fn test_font_change_splits() {
        let spans = vec![
            TextSpan::new("ACME", 50.0, 700.0, 10.0, "Arial-BoldMT"),
            TextSpan::new("sells", 70.0, 700.0, 10.0, "ArialMT"),
        ];
        assert_eq!(spans_to_words(&spans, 1).len(), 2);
    }

    #[test]
    fn test_wide_gap_splits() {
        let spans = vec![
            TextSpan::new("a", 50.0, 700.0, 10.0, "ArialMT"),
            TextSpan::new("b", 80.0, 700.0, 10.0, "ArialMT"),
        ];
        assert_eq!(spans_to_words(&spans, 1).len(), 2);
    }
}
