//! PDF backend abstraction.
//!
//! Span extraction talks to this trait only; `lopdf` types stay behind
//! [`LopdfBackend`].

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object};

use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// A font resource of a page.
#[derive(Debug, Clone)]
pub struct FontResource {
    /// Resource key in the page's font dictionary (e.g., "F1")
    pub key: Vec<u8>,
    /// Base font name (e.g., "Helvetica-Bold")
    pub base_font: String,
}

/// An operand of a content-stream operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

impl PdfValue {
    /// Numeric value, if this operand is a number.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            PdfValue::Integer(i) => Some(*i as f32),
            PdfValue::Real(r) => Some(*r),
            _ => None,
        }
    }
}

/// One content-stream operation.
#[derive(Debug, Clone)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    /// Numeric operand at `idx`, or `default`.
    pub fn number(&self, idx: usize, default: f32) -> f32 {
        self.operands
            .get(idx)
            .and_then(PdfValue::as_number)
            .unwrap_or(default)
    }
}

/// Decodes show-text bytes given the font resource key in effect.
pub type TextDecoder<'a> = Box<dyn Fn(&[u8], &[u8]) -> String + 'a>;

/// Read access to a loaded PDF.
pub trait PdfBackend {
    /// Pages as page number (1-indexed) to id.
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Font resources of a page.
    fn page_fonts(&self, page: PageId) -> Result<Vec<FontResource>>;

    /// Decompressed content stream of a page.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// Split content bytes into operations.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>>;

    /// Text decoder for `page`, with every font encoding resolved up front.
    fn text_decoder(&self, page: PageId) -> Result<TextDecoder<'_>>;

    /// Declared PDF version.
    fn version(&self) -> String;

    /// A string entry of the document Info dictionary.
    fn info_string(&self, key: &[u8]) -> Option<String>;
}

/// Decode text bytes without a font encoding: UTF-16BE with BOM, then
/// UTF-8, then Latin-1.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// [`PdfBackend`] over `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path)?;
        Self::checked(doc)
    }

    /// Load from bytes.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Self::checked(doc)
    }

    fn checked(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    fn stream_bytes(&self, obj: &Object) -> Result<Vec<u8>> {
        let id = obj
            .as_reference()
            .map_err(|_| Error::PdfParse("content entry is not a reference".to_string()))?;
        match self.doc.get_object(id)? {
            Object::Stream(stream) => Ok(stream.get_plain_content()?),
            _ => Err(Error::PdfParse("content entry is not a stream".to_string())),
        }
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_fonts(&self, page: PageId) -> Result<Vec<FontResource>> {
        let fonts = self.doc.get_page_fonts(page)?;
        Ok(fonts
            .iter()
            .map(|(key, dict)| FontResource {
                key: key.clone(),
                base_font: dict
                    .get(b"BaseFont")
                    .ok()
                    .and_then(|o| o.as_name().ok())
                    .map(|n| String::from_utf8_lossy(n).to_string())
                    .unwrap_or_else(|| String::from_utf8_lossy(key).to_string()),
            })
            .collect())
    }

    fn page_content(&self, page: PageId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page)?;
        let contents = page_dict.get(b"Contents")?;

        match contents {
            Object::Reference(_) => self.stream_bytes(contents),
            Object::Array(parts) => {
                let mut content = Vec::new();
                for part in parts {
                    content.extend_from_slice(&self.stream_bytes(part)?);
                    content.push(b' ');
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("invalid page contents".to_string())),
        }
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content = lopdf::content::Content::decode(data)?;
        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operands: op.operands.iter().map(convert_object).collect(),
                operator: op.operator,
            })
            .collect())
    }

    fn text_decoder(&self, page: PageId) -> Result<TextDecoder<'_>> {
        let encodings: HashMap<Vec<u8>, _> = self
            .doc
            .get_page_fonts(page)?
            .into_iter()
            .filter_map(|(key, dict)| {
                dict.get_font_encoding(&self.doc)
                    .ok()
                    .map(|encoding| (key, encoding))
            })
            .collect();

        Ok(Box::new(move |font_key: &[u8], bytes: &[u8]| {
            match encodings.get(font_key) {
                Some(encoding) => LopdfDocument::decode_text(encoding, bytes)
                    .unwrap_or_else(|_| decode_text_simple(bytes)),
                None => decode_text_simple(bytes),
            }
        }))
    }

    fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn info_string(&self, key: &[u8]) -> Option<String> {
        let info_ref = self.doc.trailer.get(b"Info").ok()?.as_reference().ok()?;
        let info = self.doc.get_dictionary(info_ref).ok()?;
        match info.get(key).ok()? {
            Object::String(bytes, _) => Some(decode_text_simple(bytes)),
            Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).to_string()),
            _ => None,
        }
    }
}

fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}
