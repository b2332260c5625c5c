//! PDF access and text recovery.

mod backend;
mod extractor;
mod raw_metadata;

pub use backend::{
    decode_text_simple, BackendFontInfo, CatalogFlags, ContentOp, LopdfBackend, PageId,
    PdfBackend, PdfValue,
};
pub use extractor::{
    count_body_words, empty_text_diagnostic, open_failure_text, DecodeMode, ExtractionOutcome,
    TextExtractor,
};
pub use raw_metadata::{parse_pdf_date, MetadataField, RawMetadataScanner};
