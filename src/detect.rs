//! PDF signature validation and header inspection.

use crate::error::{Error, Result};

/// PDF signature: the first four bytes of every PDF file.
pub const PDF_SIGNATURE: &[u8] = b"%PDF";

/// Full header prefix preceding the version number.
const PDF_HEADER: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Check that `data` starts with the PDF signature.
///
/// # Returns
/// * `Ok(())` if the buffer is at least four bytes long and begins with `%PDF`
/// * `Err(Error::InvalidFormat)` otherwise
///
/// # Example
/// ```
/// use pdfprobe::detect::validate_signature;
///
/// assert!(validate_signature(b"%PDF-1.7\n").is_ok());
/// assert!(validate_signature(b"PK\x03\x04").is_err());
/// ```
pub fn validate_signature(data: &[u8]) -> Result<()> {
    if data.len() < PDF_SIGNATURE.len() || !data.starts_with(PDF_SIGNATURE) {
        return Err(Error::InvalidFormat);
    }
    Ok(())
}

/// Check if bytes carry the PDF signature.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    validate_signature(data).is_ok()
}

/// Read the version declared in the header (e.g. `"1.7"` from `%PDF-1.7`).
///
/// Returns `None` when the header is truncated or the version is malformed;
/// a missing version never invalidates a document.
pub fn header_version(data: &[u8]) -> Option<String> {
    let version = data
        .strip_prefix(PDF_HEADER)?
        .get(..VERSION_LEN)
        .map(|v| String::from_utf8_lossy(v).to_string())?;

    is_valid_version(&version).then_some(version)
}

/// Check if a version string looks like `d.d`.
fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}
