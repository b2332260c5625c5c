//! Report model types.
//!
//! Everything here is plain data owned by a single [`ParseReport`]; nothing
//! is shared between inspections. Field names serialize in camelCase so the
//! JSON matches the established transport shape.

mod content;
mod metadata;
mod quality;
mod report;
mod security;
mod structure;
mod table;

pub use content::{Annotation, ExtractedImage, FormField};
pub use metadata::{
    Metadata, EXTRACTION_ERRORS_KEY, PAGES_EXTRACTED_KEY, TABLES_DETECTED_KEY, UNKNOWN,
};
pub use quality::{QualityAnalysis, QualityIssue, Severity};
pub use report::ParseReport;
pub use security::{SecurityInfo, DEFAULT_PERMISSIONS, LIMITED_PERMISSIONS};
pub use structure::{
    AccessibilityInfo, Bookmark, DocumentStructure, FontInfo, PageSize, NOT_TAGGED_ISSUE,
};
pub use table::{ExtractedTable, Position};
