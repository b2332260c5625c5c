//! # pdfprobe
//!
//! Fault-tolerant PDF inspection for document-ingestion pipelines.
//!
//! Given a byte buffer that claims to be a PDF, this library recovers text
//! and metadata even from partially damaged documents, infers security and
//! structural properties, detects tabular regions in the recovered text and
//! produces a scored quality report with actionable diagnostics.
//!
//! Inspection never returns "nothing": every call yields a [`ParseReport`],
//! with `success == false` only when the signature check or opening the
//! document failed.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfprobe::{inspect_file, render};
//!
//! fn main() -> pdfprobe::Result<()> {
//!     let report = inspect_file("document.pdf")?;
//!
//!     println!("{} pages, {} words", report.pages, report.word_count);
//!     println!("{}", render::to_json(&report, render::JsonFormat::Pretty)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Per-page fault isolation**: a broken page is recorded, not fatal
//! - **Raw metadata recovery**: Info fields are found even without a usable xref
//! - **Heuristic table detection** over the extracted text
//! - **Quality scoring** with issues and recommendations
//! - **Parallel batch inspection** using Rayon

pub mod analysis;
pub mod detect;
pub mod error;
pub mod model;
pub mod options;
pub mod parser;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use analysis::{
    CatalogStructureProbe, ConservativeStructureProbe, ContentHarvester, FixedImageQuality,
    ImageAssessor, PlaceholderHarvester, StructureProbe, TableDetectorConfig,
};
pub use detect::{is_pdf_bytes, validate_signature};
pub use error::{Error, Result};
pub use model::{
    DocumentStructure, ExtractedTable, Metadata, ParseReport, QualityAnalysis, QualityIssue,
    SecurityInfo, Severity,
};
pub use options::ProcessorConfig;
pub use pipeline::Processor;
pub use render::{FlatReport, JsonFormat};

use std::io::Read;
use std::path::Path;

/// Inspect an in-memory PDF with the default configuration.
///
/// # Example
///
/// ```no_run
/// use pdfprobe::inspect_bytes;
///
/// let data = std::fs::read("document.pdf").unwrap();
/// let report = inspect_bytes("document.pdf", &data);
/// assert_eq!(report.metadata.page_count, report.pages);
/// ```
pub fn inspect_bytes(filename: &str, data: &[u8]) -> ParseReport {
    Processor::new().inspect(filename, data)
}

/// Read and inspect a PDF file with the default configuration.
///
/// Only I/O failures are returned as errors; a malformed document still
/// yields a report.
pub fn inspect_file<P: AsRef<Path>>(path: P) -> Result<ParseReport> {
    Processor::new().inspect_file(path)
}

/// Inspect a PDF read from a reader.
///
/// # Example
///
/// ```no_run
/// use pdfprobe::inspect_reader;
/// use std::fs::File;
///
/// let file = File::open("document.pdf").unwrap();
/// let report = inspect_reader("document.pdf", file).unwrap();
/// ```
pub fn inspect_reader<R: Read>(filename: &str, mut reader: R) -> Result<ParseReport> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(inspect_bytes(filename, &data))
}

/// Inspect a PDF file and render the report as JSON.
///
/// # Example
///
/// ```no_run
/// use pdfprobe::{to_json, JsonFormat};
///
/// let json = to_json("document.pdf", JsonFormat::Pretty).unwrap();
/// std::fs::write("report.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let report = inspect_file(path)?;
    render::to_json(&report, format)
}
