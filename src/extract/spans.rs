//! Content-stream walking.
//!
//! Each show-text operation becomes a [`TextSpan`] carrying its position,
//! font size and base font name.

use std::collections::HashMap;

use super::backend::{ContentOp, PageId, PdfBackend, PdfValue, TextDecoder};
use super::options::ReadingOrder;
use crate::error::Result;

/// `TJ` adjustment (thousandths of an em) above which a word space is inserted.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Baseline tolerance for line grouping, as a fraction of font size.
const LINE_TOLERANCE: f32 = 0.3;

/// Default leading used by `T*`, `'` and `"`.
const DEFAULT_LEADING: f32 = 12.0;

/// A run of text shown by one operator.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// Decoded text
    pub text: String,
    /// X position of the start
    pub x: f32,
    /// Baseline Y position
    pub y: f32,
    /// Effective font size in points
    pub font_size: f32,
    /// Base font name
    pub font_name: String,
}

impl TextSpan {
    /// Create a new span.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32, font_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
            font_name: font_name.into(),
        }
    }

    /// Estimated right edge, assuming half-em glyphs.
    pub fn estimated_end(&self) -> f32 {
        self.x + self.text.chars().count() as f32 * self.font_size * 0.5
    }

    /// Whether `other` sits on the same baseline.
    pub fn same_baseline(&self, other: &TextSpan) -> bool {
        let size = self.font_size.max(other.font_size);
        (self.y - other.y).abs() <= size * LINE_TOLERANCE
    }
}

/// Text matrix state within a `BT`/`ET` block.
#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn from_op(op: &ContentOp) -> Self {
        Self {
            a: op.number(0, 1.0),
            b: op.number(1, 0.0),
            c: op.number(2, 0.0),
            d: op.number(3, 1.0),
            e: op.number(4, 0.0),
            f: op.number(5, 0.0),
        }
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        self.f -= DEFAULT_LEADING * self.d;
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Walk one page's content stream and collect its spans in stream order.
pub fn extract_page_spans<B: PdfBackend + ?Sized>(backend: &B, page: PageId) -> Result<Vec<TextSpan>> {
    let fonts: HashMap<Vec<u8>, String> = backend
        .page_fonts(page)?
        .into_iter()
        .map(|f| (f.key, f.base_font))
        .collect();
    let content = backend.page_content(page)?;
    let ops = backend.decode_content(&content)?;

    let mut walker = SpanWalker {
        decoder: backend.text_decoder(page)?,
        fonts: &fonts,
        font_key: Vec::new(),
        font_name: String::new(),
        font_size: 12.0,
        matrix: TextMatrix::default(),
        in_text: false,
        spans: Vec::new(),
    };
    for op in &ops {
        walker.apply(op);
    }
    Ok(walker.spans)
}

struct SpanWalker<'a> {
    decoder: TextDecoder<'a>,
    fonts: &'a HashMap<Vec<u8>, String>,
    font_key: Vec<u8>,
    font_name: String,
    font_size: f32,
    matrix: TextMatrix,
    in_text: bool,
    spans: Vec<TextSpan>,
}

impl SpanWalker<'_> {
    fn apply(&mut self, op: &ContentOp) {
        match op.operator.as_str() {
            "BT" => {
                self.in_text = true;
                self.matrix = TextMatrix::default();
            }
            "ET" => self.in_text = false,
            "Tf" => {
                if let Some(PdfValue::Name(key)) = op.operands.first() {
                    self.font_name = self
                        .fonts
                        .get(key)
                        .cloned()
                        .unwrap_or_else(|| String::from_utf8_lossy(key).to_string());
                    self.font_key = key.clone();
                }
                self.font_size = op.number(1, 12.0);
            }
            "Td" | "TD" => self.matrix.translate(op.number(0, 0.0), op.number(1, 0.0)),
            "Tm" if op.operands.len() >= 6 => self.matrix = TextMatrix::from_op(op),
            "T*" => self.matrix.next_line(),
            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = self.decode(bytes);
                    self.push(text);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    let text = self.decode_array(items);
                    self.push(text);
                }
            }
            "'" | "\"" => {
                self.matrix.next_line();
                let idx = if op.operator == "\"" { 2 } else { 0 };
                if let Some(PdfValue::Str(bytes)) = op.operands.get(idx) {
                    let text = self.decode(bytes);
                    self.push(text);
                }
            }
            _ => {}
        }
    }

    fn decode(&self, bytes: &[u8]) -> String {
        (self.decoder)(&self.font_key, bytes)
    }

    fn decode_array(&self, items: &[PdfValue]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                PdfValue::Str(bytes) => combined.push_str(&self.decode(bytes)),
                other => {
                    let adjustment = -other.as_number().unwrap_or(0.0);
                    if adjustment > TJ_SPACE_THRESHOLD
                        && !combined.is_empty()
                        && !combined.ends_with(char::is_whitespace)
                    {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }

    fn push(&mut self, text: String) {
        if !self.in_text || text.trim().is_empty() {
            return;
        }
        self.spans.push(TextSpan::new(
            text,
            self.matrix.e,
            self.matrix.f,
            self.font_size * self.matrix.scale(),
            self.font_name.clone(),
        ));
    }
}

/// Put a page's spans in reading order.
pub fn order_spans(spans: Vec<TextSpan>, order: ReadingOrder) -> Vec<TextSpan> {
    match order {
        ReadingOrder::Stream => spans,
        ReadingOrder::Layout => group_into_lines(spans).into_iter().flatten().collect(),
    }
}

/// Group spans into lines, top to bottom, each sorted left to right.
pub fn group_into_lines(mut spans: Vec<TextSpan>) -> Vec<Vec<TextSpan>> {
    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines: Vec<Vec<TextSpan>> = Vec::new();
    let mut line_y: Option<f32> = None;
    for span in spans {
        let same_line = line_y
            .map(|y| (span.y - y).abs() <= span.font_size * LINE_TOLERANCE)
            .unwrap_or(false);
        match lines.last_mut() {
            Some(line) if same_line => line.push(span),
            _ => {
                line_y = Some(span.y);
                lines.push(vec![span]);
            }
        }
    }

    for line in &mut lines {
        line.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_grouping() {
        let spans = vec![
            TextSpan::new("sells", 80.0, 700.5, 10.0, "Helvetica"),
            TextSpan::new("second", 50.0, 680.0, 10.0, "Helvetica"),
            TextSpan::new("ACME", 50.0, 700.0, 10.0, "Helvetica-Bold"),
        ];
        let lines = group_into_lines(spans);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][0].text, "ACME");
        assert_eq!(lines[0][1].text, "sells");
        assert_eq!(lines[1][0].text, "second");
    }

    #[test]
    fn test_stream_order_is_untouched() {
        let spans = vec![
            TextSpan::new("b", 0.0, 100.0, 10.0, "F"),
            TextSpan::new("a", 0.0, 200.0, 10.0, "F"),
        ];
        let ordered = order_spans(spans.clone(), ReadingOrder::Stream);
        assert_eq!(ordered, spans);
        let ordered = order_spans(spans, ReadingOrder::Layout);
        assert_eq!(ordered[0].text, "a");
    }

    #[test]
    fn test_estimated_end() {
        let span = TextSpan::new("ABCD", 10.0, 0.0, 10.0, "F");
        assert_eq!(span.estimated_end(), 30.0);
        assert!(span.same_baseline(&TextSpan::new("x", 40.0, 2.0, 10.0, "F")));
        assert!(!span.same_baseline(&TextSpan::new("x", 40.0, 5.0, 10.0, "F")));
    }

    #[test]
    fn test_text_matrix() {
        let mut m = TextMatrix::default();
        m.translate(72.0, 720.0);
        assert_eq!((m.e, m.f), (72.0, 720.0));
        m.next_line();
        assert_eq!(m.f, 708.0);
        assert_eq!(m.scale(), 1.0);
    }
}
