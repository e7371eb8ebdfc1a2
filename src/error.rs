//! Error types for threatsort.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for threatsort operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting and tabulating reports.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting words from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Error while rendering the output tables.
    #[error("Rendering error: {0}")]
    Render(String),

    /// A run was started without any input documents.
    #[error("No input documents")]
    NoDocuments,

    /// A single document failed; the whole run is aborted.
    #[error("{}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the path of the document that produced this error.
    pub fn in_document(self, path: impl Into<PathBuf>) -> Self {
        Error::Document {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
