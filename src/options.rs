//! Processor configuration.

use crate::analysis::TableDetectorConfig;

/// Default cap on the encoded size of a reported image (5 MiB).
pub const DEFAULT_MAX_IMAGE_SIZE: u64 = 5 << 20;

/// Immutable configuration for a [`Processor`](crate::Processor).
///
/// Built once, injected at construction and never mutated while a
/// document is being inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorConfig {
    /// Ask the content harvester for images
    pub extract_images: bool,

    /// Ask the content harvester for form fields
    pub extract_forms: bool,

    /// Ask the content harvester for annotations
    pub extract_annotations: bool,

    /// Run the table detector over the recovered text
    pub analyze_tables: bool,

    /// Run the quality scorer
    pub analyze_quality: bool,

    /// Images larger than this many bytes are dropped from the report
    pub max_image_size: u64,

    /// Accepted image formats (lowercase)
    pub image_formats: Vec<String>,

    /// Table detector tuning
    pub table_detector: TableDetectorConfig,

    /// Clamp the overall quality score to [0, 1]
    pub clamp_overall_score: bool,
}

impl ProcessorConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable image harvesting.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.extract_images = extract;
        self
    }

    /// Enable or disable form harvesting.
    pub fn with_forms(mut self, extract: bool) -> Self {
        self.extract_forms = extract;
        self
    }

    /// Enable or disable annotation harvesting.
    pub fn with_annotations(mut self, extract: bool) -> Self {
        self.extract_annotations = extract;
        self
    }

    /// Enable or disable table detection.
    pub fn with_tables(mut self, analyze: bool) -> Self {
        self.analyze_tables = analyze;
        self
    }

    /// Enable or disable quality scoring.
    pub fn with_quality(mut self, analyze: bool) -> Self {
        self.analyze_quality = analyze;
        self
    }

    /// Set the maximum image size in bytes.
    pub fn with_max_image_size(mut self, bytes: u64) -> Self {
        self.max_image_size = bytes;
        self
    }

    /// Set the accepted image formats.
    pub fn with_image_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.image_formats = formats
            .into_iter()
            .map(|f| f.into().to_lowercase())
            .collect();
        self
    }

    /// Set the table detector configuration.
    pub fn with_table_detector(mut self, config: TableDetectorConfig) -> Self {
        self.table_detector = config;
        self
    }

    /// Clamp the overall quality score to [0, 1].
    pub fn clamped(mut self) -> Self {
        self.clamp_overall_score = true;
        self
    }

    /// Check whether an image format is accepted.
    pub fn accepts_image_format(&self, format: &str) -> bool {
        let format = format.to_lowercase();
        self.image_formats.iter().any(|f| *f == format)
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            extract_images: true,
            extract_forms: true,
            extract_annotations: true,
            analyze_tables: true,
            analyze_quality: true,
            max_image_size: DEFAULT_MAX_IMAGE_SIZE,
            image_formats: vec!["jpeg".to_string(), "png".to_string(), "tiff".to_string()],
            table_detector: TableDetectorConfig::default(),
            clamp_overall_score: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProcessorConfig::default();
        assert!(config.analyze_tables);
        assert!(config.analyze_quality);
        assert!(!config.clamp_overall_score);
        assert_eq!(config.max_image_size, 5 * 1024 * 1024);
        assert!(config.accepts_image_format("JPEG"));
        assert!(!config.accepts_image_format("gif"));
    }

    #[test]
    fn test_config_builder() {
        let config = ProcessorConfig::new()
            .with_tables(false)
            .with_quality(false)
            .with_image_formats(["PNG"])
            .with_max_image_size(1024)
            .clamped();

        assert!(!config.analyze_tables);
        assert!(!config.analyze_quality);
        assert_eq!(config.image_formats, vec!["png"]);
        assert_eq!(config.max_image_size, 1024);
        assert!(config.clamp_overall_score);
    }
}
