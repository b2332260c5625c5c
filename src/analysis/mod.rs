//! Post-extraction analysis stages.
//!
//! Each stage consumes what earlier stages produced and always yields a
//! value; none of them can fail the pipeline.

mod harvest;
mod quality;
mod security;
mod structure;
mod tables;

pub use harvest::{apply_limits, ContentHarvester, HarvestedContent, PlaceholderHarvester};
pub use quality::{
    FixedImageQuality, ImageAssessor, QualityInput, QualityScorer, RECOMMEND_BOOKMARKS,
    RECOMMEND_OCR, RECOMMEND_SPLITTING, RECOMMEND_TAGGING,
};
pub use security::{SecurityAnalyzer, UNKNOWN_ENCRYPTION};
pub use structure::{
    conservative_structure, is_subset_name, CatalogStructureProbe, ConservativeStructureProbe,
    StructureProbe,
};
pub use tables::{is_page_marker, TableDetector, TableDetectorConfig, PAGE_MARKER_PREFIX};
