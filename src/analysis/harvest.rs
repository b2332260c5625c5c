//! Supplemental content: images, form fields and annotations.

use crate::model::{Annotation, ExtractedImage, FormField};
use crate::options::ProcessorConfig;
use crate::parser::PdfBackend;

/// Content returned by a [`ContentHarvester`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HarvestedContent {
    pub images: Vec<ExtractedImage>,
    pub forms: Vec<FormField>,
    pub annotations: Vec<Annotation>,
}

/// Strategy that collects images, forms and annotations from an opened document.
pub trait ContentHarvester: Send + Sync {
    fn harvest(&self, backend: &dyn PdfBackend, config: &ProcessorConfig) -> HarvestedContent;
}

/// Harvests nothing. Reports keep the fields but leave them empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderHarvester;

impl ContentHarvester for PlaceholderHarvester {
    fn harvest(&self, _backend: &dyn PdfBackend, _config: &ProcessorConfig) -> HarvestedContent {
        HarvestedContent::default()
    }
}

/// Apply the configured switches and image limits to harvested content.
pub fn apply_limits(mut content: HarvestedContent, config: &ProcessorConfig) -> HarvestedContent {
    if config.extract_images {
        let before = content.images.len();
        content.images.retain(|image| {
            image.size <= config.max_image_size && config.accepts_image_format(&image.format)
        });
        if content.images.len() < before {
            log::debug!(
                "Dropped {} image(s) over the size limit or in unsupported formats",
                before - content.images.len()
            );
        }
    } else {
        content.images.clear();
    }
    if !config.extract_forms {
        content.forms.clear();
    }
    if !config.extract_annotations {
        content.annotations.clear();
    }
    content
}
