//! PDF header sniffing.
//!
//! Reports are checked for a `%PDF-x.y` header before the full document is
//! loaded, so that a stray non-PDF file fails fast with a clear error.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const MAGIC: &[u8] = b"%PDF-";

/// Bytes needed to read the magic plus a `x.y` version.
const HEADER_LEN: usize = MAGIC.len() + 3;

/// Header of a PDF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// Declared version (e.g., "1.7")
    pub version: String,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// Read and validate the header of a file.
pub fn sniff_path<P: AsRef<Path>>(path: P) -> Result<PdfHeader> {
    let mut file = File::open(path)?;
    let mut buf = [0u8; HEADER_LEN];
    let mut filled = 0;
    while filled < HEADER_LEN {
        let n = file.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    sniff_bytes(&buf[..filled])
}

/// Validate the header at the start of `data`.
pub fn sniff_bytes(data: &[u8]) -> Result<PdfHeader> {
    if data.len() < HEADER_LEN || !data.starts_with(MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version = String::from_utf8_lossy(&data[MAGIC.len()..HEADER_LEN]).to_string();
    let bytes = version.as_bytes();
    let well_formed = bytes.len() == 3
        && bytes[0].is_ascii_digit()
        && bytes[1] == b'.'
        && bytes[2].is_ascii_digit();
    if !well_formed {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(PdfHeader { version })
}

/// Check if a path has a `.pdf` extension (any case).
pub fn has_pdf_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
