//! File-based and parallel inspection tests.

mod common;

use std::fs;

use common::{hello_lines, PageSpec, PdfBuilder};
use pdfprobe::analysis::HarvestedContent;
use pdfprobe::model::{ExtractedImage, Position};
use pdfprobe::parser::PdfBackend;
use pdfprobe::{ContentHarvester, Error, Processor, ProcessorConfig};

#[test]
fn test_inspect_file_uses_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    fs::write(&path, PdfBuilder::new().page(hello_lines(4)).build()).unwrap();

    let report = pdfprobe::inspect_file(&path).unwrap();
    assert_eq!(report.filename, "report.pdf");
    assert!(report.success);
    assert_eq!(report.word_count, 8);
}

#[test]
fn test_inspect_batch_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.pdf");
    let bad = dir.path().join("bad.pdf");
    let missing = dir.path().join("missing.pdf");
    fs::write(&good, PdfBuilder::new().page(hello_lines(2)).build()).unwrap();
    fs::write(&bad, b"not a pdf").unwrap();

    let results = Processor::new().inspect_batch(&[good, bad, missing]);

    assert_eq!(results.len(), 3);
    let first = results[0].as_ref().unwrap();
    assert_eq!(first.filename, "good.pdf");
    assert!(first.success);

    let second = results[1].as_ref().unwrap();
    assert!(!second.success);
    assert_eq!(second.error.as_deref(), Some("invalid format"));

    assert!(matches!(results[2], Err(Error::Io(_))));
}

#[test]
fn test_batch_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<_> = (1..=4)
        .map(|n| {
            let path = dir.path().join(format!("doc{}.pdf", n));
            let mut builder = PdfBuilder::new();
            for _ in 0..n {
                builder = builder.page(hello_lines(n));
            }
            fs::write(&path, builder.build()).unwrap();
            path
        })
        .collect();

    let processor = Processor::new();
    let parallel = processor.inspect_batch(&paths);

    for (path, result) in paths.iter().zip(parallel) {
        let report = result.unwrap();
        let sequential = processor.inspect_file(path).unwrap();
        assert_eq!(report.pages, sequential.pages);
        assert_eq!(report.word_count, sequential.word_count);
        assert_eq!(report.text, sequential.text);
    }
}

/// Harvester returning a fixed set of images.
struct FixedImages;

impl ContentHarvester for FixedImages {
    fn harvest(&self, _backend: &dyn PdfBackend, _config: &ProcessorConfig) -> HarvestedContent {
        let image = |id: &str, format: &str, size: u64| ExtractedImage {
            id: id.to_string(),
            page: 1,
            width: 100,
            height: 100,
            format: format.to_string(),
            size,
            dpi: 150.0,
            color_space: "DeviceRGB".to_string(),
            base64_data: None,
            position: Position::default(),
            is_inline: false,
        };
        HarvestedContent {
            images: vec![
                image("small", "jpeg", 2_000),
                image("huge", "png", 50_000_000),
                image("vector", "svg", 10),
            ],
            ..Default::default()
        }
    }
}

#[test]
fn test_harvested_images_are_filtered() {
    let data = PdfBuilder::new().page(hello_lines(1)).build();

    let report = Processor::new()
        .with_harvester(FixedImages)
        .inspect("images.pdf", &data);
    let ids: Vec<_> = report.images.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["small"]);

    let report = Processor::with_config(ProcessorConfig::new().with_images(false))
        .with_harvester(FixedImages)
        .inspect("images.pdf", &data);
    assert!(report.images.is_empty());
}

#[test]
fn test_default_harvester_is_empty() {
    let data = PdfBuilder::new().page(PageSpec::Graphics).build();
    let report = Processor::new().inspect("plain.pdf", &data);

    assert!(report.images.is_empty());
    assert!(report.forms.is_empty());
    assert!(report.annotations.is_empty());
}
