//! The inspection pipeline: validate, extract, analyze, assemble.
//!
//! The raw metadata scan and the security analysis read only the input bytes,
//! so both run whether or not the document structure can be opened.

use std::path::Path;
use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::analysis::{
    apply_limits, conservative_structure, CatalogStructureProbe, ContentHarvester,
    FixedImageQuality, ImageAssessor, PlaceholderHarvester, QualityInput, QualityScorer,
    SecurityAnalyzer, StructureProbe, TableDetector,
};
use crate::detect;
use crate::error::{Error, Result};
use crate::model::{Metadata, ParseReport};
use crate::options::ProcessorConfig;
use crate::parser::{open_failure_text, LopdfBackend, PdfBackend, RawMetadataScanner, TextExtractor};

/// Custom key mirroring the creation date as RFC 3339.
pub const CREATION_DATE_KEY: &str = "creationDate";

/// Custom key mirroring the modification date as RFC 3339.
pub const MODIFICATION_DATE_KEY: &str = "modificationDate";

/// Runs every stage over one document and assembles a [`ParseReport`].
///
/// A processor holds only immutable configuration and stateless strategies,
/// so one instance can be shared across threads.
///
/// # Example
///
/// ```no_run
/// use pdfprobe::{Processor, ProcessorConfig};
///
/// let processor = Processor::with_config(ProcessorConfig::default().clamped());
/// let data = std::fs::read("document.pdf").unwrap();
/// let report = processor.inspect("document.pdf", &data);
/// println!("{} pages, score {:.2}", report.pages, report.quality.overall_score);
/// ```
pub struct Processor {
    config: ProcessorConfig,
    metadata_scanner: RawMetadataScanner,
    security: SecurityAnalyzer,
    extractor: TextExtractor,
    tables: TableDetector,
    scorer: QualityScorer,
    structure_probe: Box<dyn StructureProbe>,
    image_assessor: Box<dyn ImageAssessor>,
    harvester: Box<dyn ContentHarvester>,
}

impl Processor {
    /// Create a processor with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ProcessorConfig::default())
    }

    /// Create a processor with the given configuration.
    pub fn with_config(config: ProcessorConfig) -> Self {
        Self {
            tables: TableDetector::with_config(config.table_detector.clone()),
            scorer: QualityScorer::new().clamped(config.clamp_overall_score),
            config,
            metadata_scanner: RawMetadataScanner::new(),
            security: SecurityAnalyzer::new(),
            extractor: TextExtractor::new(),
            structure_probe: Box::new(CatalogStructureProbe),
            image_assessor: Box::new(FixedImageQuality::default()),
            harvester: Box::new(PlaceholderHarvester),
        }
    }

    /// Replace the structure probe.
    pub fn with_structure_probe(mut self, probe: impl StructureProbe + 'static) -> Self {
        self.structure_probe = Box::new(probe);
        self
    }

    /// Replace the image assessor.
    pub fn with_image_assessor(mut self, assessor: impl ImageAssessor + 'static) -> Self {
        self.image_assessor = Box::new(assessor);
        self
    }

    /// Replace the content harvester.
    pub fn with_harvester(mut self, harvester: impl ContentHarvester + 'static) -> Self {
        self.harvester = Box::new(harvester);
        self
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Inspect an in-memory document. Always returns a report.
    pub fn inspect(&self, filename: &str, data: &[u8]) -> ParseReport {
        let start = Instant::now();
        let file_size = data.len() as u64;
        let mut report = ParseReport::new(filename, file_size);

        if let Err(e) = detect::validate_signature(data) {
            warn!("{}: {}", filename, e);
            report.error = Some(e.to_string());
            report.set_elapsed(start.elapsed());
            return report;
        }

        report.metadata.pdf_version = detect::header_version(data).unwrap_or_default();
        self.metadata_scanner.apply(data, &mut report.metadata);
        debug!("{}: raw metadata scanned", filename);

        let body = match LopdfBackend::load_bytes(data) {
            Ok(backend) => {
                if report.metadata.pdf_version.is_empty() {
                    report.metadata.pdf_version = backend.version();
                }
                self.inspect_document(&backend, &mut report)
            }
            Err(e) => {
                warn!("{}: {}", filename, e);
                let reason = match &e {
                    Error::Open(reason) => reason.clone(),
                    other => other.to_string(),
                };
                report.text = open_failure_text(file_size, &reason);
                report.error = Some(Error::Open(reason).to_string());
                report.structure = conservative_structure();
                String::new()
            }
        };

        report.security = self.security.analyze(data);
        debug!(
            "{}: security analyzed (encrypted={})",
            filename, report.security.is_encrypted
        );

        if self.config.analyze_tables {
            report.tables = self.tables.detect(&body);
        }

        if self.config.analyze_quality {
            let input = QualityInput {
                body: &body,
                word_count: report.word_count,
                pages: report.pages,
                structure: &report.structure,
                security: &report.security,
                table_count: report.tables.len(),
                images: &report.images,
            };
            report.quality =
                self.scorer
                    .score(&input, self.image_assessor.as_ref(), &mut report.metadata);
            debug!(
                "{}: quality scored ({:.2})",
                filename, report.quality.overall_score
            );
        }

        mirror_dates(&mut report.metadata);
        report.success = report.error.is_none();
        report.set_elapsed(start.elapsed());

        info!(
            "{}: {} page(s), {} word(s), {} table(s) in {}",
            filename,
            report.pages,
            report.word_count,
            report.tables.len(),
            report.process_time
        );
        report
    }

    /// Run the stages that need an opened document. Returns the recovered body.
    fn inspect_document(&self, backend: &dyn PdfBackend, report: &mut ParseReport) -> String {
        let outcome = self.extractor.extract(backend);

        report.pages = outcome.pages;
        report.metadata.page_count = outcome.pages;
        outcome.record_diagnostics(&mut report.metadata);
        self.metadata_scanner.fill_missing(&mut report.metadata, |field| {
            backend.info_string(field.key().as_bytes())
        });

        report.structure = self.structure_probe.probe(backend);
        report.structure.page_sizes = outcome.page_sizes.clone();
        debug!(
            "{}: structure analyzed ({} bookmark(s))",
            report.filename, report.structure.bookmark_count
        );

        let content = apply_limits(self.harvester.harvest(backend, &self.config), &self.config);
        report.images = content.images;
        report.forms = content.forms;
        report.annotations = content.annotations;

        report.text = outcome.display_text(report.metadata.file_size);
        report.word_count = outcome.word_count();

        outcome.body
    }

    /// Read and inspect a file. Only I/O failures are returned as errors.
    pub fn inspect_file<P: AsRef<Path>>(&self, path: P) -> Result<ParseReport> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(self.inspect(&filename, &data))
    }

    /// Inspect several files in parallel, one document per task.
    ///
    /// Results are returned in input order.
    pub fn inspect_batch<P>(&self, paths: &[P]) -> Vec<Result<ParseReport>>
    where
        P: AsRef<Path> + Sync,
    {
        paths.par_iter().map(|p| self.inspect_file(p)).collect()
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy the parsed dates into the custom map as RFC 3339 strings.
fn mirror_dates(metadata: &mut Metadata) {
    if let Some(date) = metadata.creation_date {
        metadata.set_custom(CREATION_DATE_KEY, date.to_rfc3339());
    }
    if let Some(date) = metadata.mod_date {
        metadata.set_custom(MODIFICATION_DATE_KEY, date.to_rfc3339());
    }
}
