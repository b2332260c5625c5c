//! Document metadata.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Value used for any metadata field that could not be resolved.
pub const UNKNOWN: &str = "Unknown";

/// Custom key holding the "successful/total" page counter.
pub const PAGES_EXTRACTED_KEY: &str = "pagesExtracted";

/// Custom key holding the number of page-level extraction errors.
pub const EXTRACTION_ERRORS_KEY: &str = "extractionErrors";

/// Custom key holding the number of detected tables.
pub const TABLES_DETECTED_KEY: &str = "tablesDetected";

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub keywords: String,
    pub creator: String,
    pub producer: String,

    /// Creation date
    pub creation_date: Option<DateTime<Utc>>,

    /// Last modification date
    #[serde(rename = "modificationDate")]
    pub mod_date: Option<DateTime<Utc>>,

    /// PDF version from the header (e.g., "1.7")
    pub pdf_version: String,

    /// Total number of pages; always equal to `ParseReport::pages`
    pub page_count: u32,

    /// Input size in bytes
    pub file_size: u64,

    /// Extraction counters, per-error details and other diagnostics
    #[serde(rename = "customProperties")]
    pub custom: BTreeMap<String, String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: UNKNOWN.to_string(),
            author: UNKNOWN.to_string(),
            subject: UNKNOWN.to_string(),
            keywords: UNKNOWN.to_string(),
            creator: UNKNOWN.to_string(),
            producer: UNKNOWN.to_string(),
            creation_date: None,
            mod_date: None,
            pdf_version: String::new(),
            page_count: 0,
            file_size: 0,
            custom: BTreeMap::new(),
        }
    }
}

impl Metadata {
    /// Create metadata for an input of the given size.
    pub fn with_file_size(file_size: u64) -> Self {
        Self {
            file_size,
            ..Default::default()
        }
    }

    /// Set a custom diagnostic value.
    pub fn set_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.insert(key.into(), value.into());
    }

    /// Get a custom diagnostic value.
    pub fn custom(&self, key: &str) -> Option<&str> {
        self.custom.get(key).map(String::as_str)
    }

    /// The "successful/total" page counter, if extraction ran.
    pub fn pages_extracted(&self) -> Option<&str> {
        self.custom(PAGES_EXTRACTED_KEY)
    }

    /// Number of recorded page-level extraction errors.
    pub fn extraction_errors(&self) -> usize {
        self.custom(EXTRACTION_ERRORS_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// Iterate over the six text fields as (name, value) pairs.
    pub fn text_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("title", &self.title),
            ("author", &self.author),
            ("subject", &self.subject),
            ("creator", &self.creator),
            ("producer", &self.producer),
            ("keywords", &self.keywords),
        ]
    }
}
