//! Error types for pdfprobe.

use std::io;
use thiserror::Error;

/// Result type alias for pdfprobe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while inspecting a PDF.
///
/// Only [`Error::InvalidFormat`] and [`Error::Open`] ever surface as
/// pipeline-level failures in a [`ParseReport`](crate::model::ParseReport);
/// everything else is absorbed into the report's own diagnostics.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The buffer does not carry the PDF signature.
    #[error("invalid format")]
    InvalidFormat,

    /// The document structure could not be opened.
    #[error("failed to open PDF: {0}")]
    Open(String),

    /// A single page could not be extracted.
    #[error("Page {page}: {reason}")]
    PageExtraction { page: u32, reason: String },

    /// Error parsing PDF objects or content streams.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// Error decoding text with a font encoding.
    #[error("Font decoding error: {0}")]
    FontDecode(String),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// The input exceeds the configured size cap.
    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => {
                Error::Open("document is encrypted and cannot be decrypted".to_string())
            }
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
