//! Security inference from raw document bytes.

use regex::bytes::Regex;

use crate::model::SecurityInfo;

/// Encryption level reported when the security handler is not recognized.
pub const UNKNOWN_ENCRYPTION: &str = "Unknown";

/// Infers encryption settings by scanning for encryption dictionary markers.
///
/// Password flags are never set: by the time this runs the document has
/// already been opened without a password.
pub struct SecurityAnalyzer {
    encrypt: Regex,
    standard_filter: Regex,
}

impl SecurityAnalyzer {
    pub fn new() -> Self {
        Self {
            encrypt: Regex::new(r"/Encrypt").unwrap(),
            standard_filter: Regex::new(r"/Filter\s*/Standard").unwrap(),
        }
    }

    /// Analyze the raw bytes of a document.
    pub fn analyze(&self, data: &[u8]) -> SecurityInfo {
        if !self.encrypt.is_match(data) {
            return SecurityInfo::unencrypted();
        }

        let level = if self.standard_filter.is_match(data) {
            "Standard"
        } else {
            UNKNOWN_ENCRYPTION
        };
        log::debug!("Encryption dictionary found (handler: {})", level);

        SecurityInfo::encrypted(level)
    }
}

impl Default for SecurityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
