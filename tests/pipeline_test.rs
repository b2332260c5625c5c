//! End-to-end tests for the inspection pipeline.

mod common;

use common::{hello_lines, PageSpec, PdfBuilder};
use pdfprobe::analysis::{ConservativeStructureProbe, RECOMMEND_OCR, RECOMMEND_TAGGING};
use pdfprobe::model::{PageSize, Severity, NOT_TAGGED_ISSUE, TABLES_DETECTED_KEY};
use pdfprobe::render::{to_json, FlatReport};
use pdfprobe::{
    inspect_bytes, FixedImageQuality, JsonFormat, ParseReport, Processor, ProcessorConfig,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_invalid_signature_rejected() {
    let report = inspect_bytes("image.png", b"\x89PNG\r\n\x1a\n");

    assert!(!report.success);
    assert_eq!(report.error.as_deref(), Some("invalid format"));
    assert_eq!(report.file_type, "pdf");
    assert_eq!(report.metadata.file_size, 8);
    assert!(!report.process_time.is_empty());
    assert_eq!(report.pages, 0);
    assert!(report.tables.is_empty());
}

#[test]
fn test_single_page_word_count() {
    let data = PdfBuilder::new()
        .page(PageSpec::text(&["one two three four five", "six seven"]))
        .build();
    let report = inspect_bytes("words.pdf", &data);

    assert!(report.success, "{:?}", report.error);
    assert_eq!(report.pages, 1);
    assert_eq!(report.metadata.page_count, 1);
    assert_eq!(report.word_count, 7);
    assert!(report.text.starts_with("=== Page 1 ===\none two three four five\nsix seven"));
    assert_eq!(report.metadata.pages_extracted(), Some("1/1"));
    assert_eq!(report.metadata.extraction_errors(), 0);
}

#[test]
fn test_two_page_hello_world_and_graphics() {
    let data = PdfBuilder::new()
        .page(hello_lines(50))
        .page(PageSpec::Graphics)
        .build();
    let report = inspect_bytes("mixed.pdf", &data);

    assert!(report.success);
    assert_eq!(report.pages, 2);
    assert_eq!(report.word_count, 100);
    assert_eq!(report.metadata.pages_extracted(), Some("1/2"));
    assert_eq!(report.metadata.extraction_errors(), 1);
    assert_eq!(
        report.metadata.custom("error_1"),
        Some("Page 2: No extractable text (might contain images/graphics)")
    );
    assert!(!report.text.contains("=== Page 2 ==="));

    // 100 words is the top text tier; untagged costs 0.3 of structure.
    assert_close(report.quality.text_quality, 1.0);
    assert_close(report.quality.structure_quality, 0.7);
    assert_close(report.quality.image_quality, 0.8);
    assert_close(report.quality.overall_score, 0.5 + 0.21 + 0.16);
    assert!(report.tables.is_empty());
}

#[test]
fn test_unreadable_middle_page_is_skipped() {
    let data = PdfBuilder::new()
        .page(hello_lines(1))
        .page(PageSpec::BrokenContents)
        .page(hello_lines(1))
        .build();
    let report = inspect_bytes("broken-page.pdf", &data);

    assert!(report.success);
    assert_eq!(report.pages, 3);
    assert_eq!(report.word_count, 4);
    assert_eq!(report.metadata.pages_extracted(), Some("2/3"));
    assert_eq!(report.metadata.extraction_errors(), 1);
    assert_eq!(
        report.metadata.custom("error_1"),
        Some("Page 2: PDF parsing error: Invalid content stream")
    );
    assert!(report.text.contains("=== Page 1 ==="));
    assert!(report.text.contains("=== Page 3 ==="));
    assert!(!report.text.contains("=== Page 2 ==="));
}

#[test]
fn test_overall_score_weights() {
    let data = PdfBuilder::new().page(hello_lines(3)).build();
    let quality = inspect_bytes("short.pdf", &data).quality;

    assert_close(
        quality.overall_score,
        0.5 * quality.text_quality + 0.3 * quality.structure_quality + 0.2 * quality.image_quality,
    );
    assert!(quality.has_issue("minimal_text"));
}

#[test]
fn test_no_text_document() {
    let data = PdfBuilder::new()
        .page(PageSpec::Graphics)
        .page(PageSpec::Blank)
        .build();
    let report = inspect_bytes("scan.pdf", &data);

    assert!(report.success);
    assert_eq!(report.word_count, 0);
    assert!(report.text.starts_with("PDF File Analysis ("));
    assert!(report.text.contains(", 2 pages)"));
    assert!(report.text.contains("• Page 2: No extractable text"));

    let quality = &report.quality;
    assert_eq!(quality.text_quality, 0.0);
    let issue = quality.issue("no_text").expect("no_text issue");
    assert_eq!(issue.severity, Severity::High);
    assert_close(issue.impact, 0.8);
    assert_eq!(quality.recommendations[0], RECOMMEND_OCR);
    assert_eq!(report.metadata.pages_extracted(), Some("0/2"));
}

#[test]
fn test_table_block_detected() {
    let data = PdfBuilder::new()
        .page(PageSpec::text(&[
            "Name Qty Price",
            "Apple 3 1.20",
            "Pear 1 0.80",
            "Plum 7 0.35",
        ]))
        .build();
    let report = inspect_bytes("table.pdf", &data);

    assert_eq!(report.tables.len(), 1);
    let table = &report.tables[0];
    assert_eq!(table.rows, 3);
    assert_eq!(table.columns, 3);
    assert_eq!(table.page, 1);
    assert_close(table.confidence, 0.7);
    assert_eq!(report.metadata.custom(TABLES_DETECTED_KEY), Some("1"));
    // 0.7 for an untagged document, +0.1 for the table
    assert_close(report.quality.structure_quality, 0.8);
}

#[test]
fn test_tables_can_be_disabled() {
    let data = PdfBuilder::new()
        .page(PageSpec::text(&["a b c", "d e f", "g h i"]))
        .build();
    let report = Processor::with_config(ProcessorConfig::new().with_tables(false))
        .inspect("table.pdf", &data);

    assert!(report.tables.is_empty());
    assert_eq!(report.metadata.custom(TABLES_DETECTED_KEY), None);
}

#[test]
fn test_security_from_raw_bytes() {
    let plain = PdfBuilder::new().page(hello_lines(1)).build();
    let report = inspect_bytes("plain.pdf", &plain);
    assert!(!report.security.is_encrypted);
    assert_eq!(
        report.security.permissions,
        vec!["print", "modify", "copy", "annotate"]
    );
    assert_eq!(report.security.encryption_level, "None");

    // The marker only needs to occur somewhere in the raw bytes.
    let marked = PdfBuilder::new()
        .page(hello_lines(1))
        .info("Subject", "see /Encrypt /Filter/Standard")
        .build();
    let report = inspect_bytes("marked.pdf", &marked);
    assert!(report.success);
    assert!(report.security.is_encrypted);
    assert_eq!(report.security.permissions, vec!["limited"]);
    assert_eq!(report.security.encryption_level, "Standard");
    assert!(!report.security.is_password_needed);
    assert!(report.quality.has_issue("password_protected"));
}

#[test]
fn test_metadata_recovered() {
    let data = PdfBuilder::new()
        .page(hello_lines(1))
        .info("Title", "Quarterly Report")
        .info("Author", "Jane Doe")
        .info("CreationDate", "D:20240115103045")
        .build();
    let report = inspect_bytes("meta.pdf", &data);
    let metadata = &report.metadata;

    assert_eq!(metadata.title, "Quarterly Report");
    assert_eq!(metadata.author, "Jane Doe");
    assert_eq!(metadata.subject, "Unknown");
    assert_eq!(metadata.producer, "Unknown");
    assert_eq!(metadata.pdf_version, "1.5");
    assert_eq!(metadata.file_size, data.len() as u64);
    assert!(metadata.creation_date.is_some());
    assert_eq!(
        metadata.custom("creationDate"),
        Some("2024-01-15T10:30:45+00:00")
    );
}

#[test]
fn test_structure_from_catalog() {
    let data = PdfBuilder::new()
        .page(hello_lines(2))
        .page(hello_lines(2))
        .bookmark("Intro", 0)
        .bookmark("Details", 1)
        .tagged()
        .media_box(595, 842)
        .build();
    let report = inspect_bytes("structured.pdf", &data);
    let structure = &report.structure;

    assert!(structure.has_bookmarks);
    assert!(structure.has_outline);
    assert_eq!(structure.bookmark_count, 2);
    assert_eq!(structure.bookmarks[1].title, "Details");
    assert_eq!(structure.bookmarks[1].page, 2);
    assert!(structure.is_tagged_pdf);
    assert!(structure.accessibility_info.is_accessible);
    assert!(structure.accessibility_info.issues.is_empty());
    assert_eq!(
        structure.page_sizes,
        vec![
            PageSize::points(1, 595.0, 842.0),
            PageSize::points(2, 595.0, 842.0)
        ]
    );

    let font = &structure.fonts_used[0];
    assert_eq!(font.name, "Helvetica");
    assert_eq!(font.font_type, "Type1");
    assert!(!font.embedded);
    assert!(!font.subset);
    assert_eq!(font.pages, vec![1, 2]);

    assert!(!report.quality.has_issue("accessibility"));
    assert!(!report
        .quality
        .recommendations
        .iter()
        .any(|r| r == RECOMMEND_TAGGING));
}

#[test]
fn test_untagged_contract() {
    let data = PdfBuilder::new().page(hello_lines(1)).build();
    let report = inspect_bytes("untagged.pdf", &data);

    assert!(!report.structure.is_tagged_pdf);
    assert!(report
        .structure
        .accessibility_info
        .issues
        .iter()
        .any(|i| i == NOT_TAGGED_ISSUE));
    assert!(report.quality.has_issue("accessibility"));
}

#[test]
fn test_conservative_probe_replaces_catalog() {
    let data = PdfBuilder::new()
        .page(hello_lines(1))
        .bookmark("Intro", 0)
        .tagged()
        .build();
    let report = Processor::new()
        .with_structure_probe(ConservativeStructureProbe)
        .inspect("probe.pdf", &data);

    assert!(!report.structure.has_bookmarks);
    assert!(!report.structure.is_tagged_pdf);
    // Page sizes still come from extraction.
    assert_eq!(report.structure.page_sizes.len(), 1);
}

fn normalized(mut report: ParseReport) -> ParseReport {
    report.set_elapsed(std::time::Duration::ZERO);
    report
}

#[test]
fn test_inspection_is_idempotent() {
    let data = PdfBuilder::new()
        .page(hello_lines(20))
        .page(PageSpec::text(&["x y z", "1 2 3", "4 5 6"]))
        .info("Title", "Again")
        .build();
    let processor = Processor::new();

    let first = normalized(processor.inspect("same.pdf", &data));
    let second = normalized(processor.inspect("same.pdf", &data));
    assert_eq!(first, second);
}

#[test]
fn test_flat_report_shape() {
    let data = PdfBuilder::new()
        .page(hello_lines(50))
        .page(PageSpec::Graphics)
        .build();
    let report = inspect_bytes("flat.pdf", &data);
    let flat = FlatReport::from_report(&report);

    assert_eq!(flat.word_count, 100);
    assert_eq!(flat.metadata["pagesExtracted"], "1/2");
    assert_eq!(flat.metadata["custom_error_1"], report.metadata.custom("error_1").unwrap());
    assert_eq!(flat.metadata["overallQualityScore"], "0.87");
    assert_eq!(flat.metadata["isTaggedPDF"], "false");
    assert_eq!(
        flat.metadata["recommendations"],
        "Consider creating tagged PDF for accessibility"
    );

    let json = to_json(&flat, JsonFormat::Compact).unwrap();
    assert!(json.contains("\"wordCount\":100"));
}

#[test]
fn test_report_json_field_names() {
    let data = PdfBuilder::new().page(hello_lines(2)).build();
    let json = to_json(&inspect_bytes("names.pdf", &data), JsonFormat::Compact).unwrap();

    for key in [
        "\"fileType\"",
        "\"wordCount\"",
        "\"customProperties\"",
        "\"isTaggedPDF\"",
        "\"pageSizes\"",
        "\"overallScore\"",
        "\"encryptionLevel\"",
    ] {
        assert!(json.contains(key), "missing {}", key);
    }
    assert!(!json.contains("\"error\""));
}

#[test]
fn test_clamped_score_never_exceeds_one() {
    let many_words = vec!["alpha beta gamma delta epsilon"; 30];
    let data = PdfBuilder::new()
        .page(PageSpec::text(&many_words))
        .tagged()
        .build();

    // Every line is also a table row, which lifts structure above 1.0.
    let raw = Processor::new()
        .with_image_assessor(FixedImageQuality(1.0))
        .inspect("rich.pdf", &data);
    assert_eq!(raw.tables.len(), 1);
    assert_close(raw.quality.overall_score, 1.03);

    let clamped = Processor::with_config(ProcessorConfig::new().clamped())
        .with_image_assessor(FixedImageQuality(1.0))
        .inspect("rich.pdf", &data);
    assert_eq!(clamped.quality.overall_score, 1.0);
}
