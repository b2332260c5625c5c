//! The aggregate inspection result.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{
    Annotation, DocumentStructure, ExtractedImage, ExtractedTable, FormField, Metadata,
    QualityAnalysis, SecurityInfo,
};

/// Result of inspecting one document.
///
/// A report is always well-formed: callers never need a separate "no
/// result" path. Only `success` and the per-field diagnostics vary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseReport {
    /// Original filename as supplied by the caller
    pub filename: String,

    /// Declared file type (always "pdf")
    pub file_type: String,

    /// False only when validation or opening failed
    pub success: bool,

    /// Pipeline-level error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Human-readable processing time (e.g. "1.52ms")
    pub process_time: String,

    /// Processing time in milliseconds
    pub process_time_ms: f64,

    /// Wall-clock duration from pipeline entry to assembly
    #[serde(skip)]
    pub elapsed: Duration,

    /// Aggregate extracted text, or a diagnostic block when nothing was recovered
    pub text: String,

    /// Number of pages in the page tree
    pub pages: u32,

    /// Whitespace-separated words in the recovered page text
    pub word_count: usize,

    /// Document metadata and extraction diagnostics
    pub metadata: Metadata,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ExtractedImage>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forms: Vec<FormField>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<ExtractedTable>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,

    pub security: SecurityInfo,

    pub structure: DocumentStructure,

    pub quality: QualityAnalysis,
}

impl ParseReport {
    /// Create an empty report for the given file.
    pub fn new(filename: impl Into<String>, file_size: u64) -> Self {
        Self {
            filename: filename.into(),
            file_type: "pdf".to_string(),
            success: false,
            error: None,
            process_time: String::new(),
            process_time_ms: 0.0,
            elapsed: Duration::ZERO,
            text: String::new(),
            pages: 0,
            word_count: 0,
            metadata: Metadata::with_file_size(file_size),
            images: Vec::new(),
            forms: Vec::new(),
            tables: Vec::new(),
            annotations: Vec::new(),
            security: SecurityInfo::default(),
            structure: DocumentStructure::default(),
            quality: QualityAnalysis::default(),
        }
    }

    /// Record the elapsed time in both representations.
    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
        self.process_time = format!("{:?}", elapsed);
        self.process_time_ms = elapsed.as_nanos() as f64 / 1_000_000.0;
    }

    /// Check whether the report carries a pipeline-level error.
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}
