//! Composite quality scoring.

use crate::model::{
    DocumentStructure, ExtractedImage, Metadata, QualityAnalysis, QualityIssue, SecurityInfo,
    Severity, TABLES_DETECTED_KEY,
};

const TEXT_WEIGHT: f64 = 0.5;
const STRUCTURE_WEIGHT: f64 = 0.3;
const IMAGE_WEIGHT: f64 = 0.2;

/// Page count above which missing bookmarks are penalized.
const BOOKMARK_PAGE_THRESHOLD: u32 = 10;

/// Page count above which splitting the document is recommended.
const LARGE_DOCUMENT_PAGES: u32 = 100;

pub const RECOMMEND_OCR: &str = "Consider using OCR for scanned documents";
pub const RECOMMEND_BOOKMARKS: &str = "Consider adding bookmarks for better navigation";
pub const RECOMMEND_TAGGING: &str = "Consider creating tagged PDF for accessibility";
pub const RECOMMEND_SPLITTING: &str = "Consider splitting large document for better performance";

/// Strategy that scores the images of a document in [0, 1].
pub trait ImageAssessor: Send + Sync {
    fn assess(&self, images: &[ExtractedImage]) -> f64;
}

/// Assumes good image quality (or no images) without looking.
#[derive(Debug, Clone, Copy)]
pub struct FixedImageQuality(pub f64);

impl Default for FixedImageQuality {
    fn default() -> Self {
        Self(0.8)
    }
}

impl ImageAssessor for FixedImageQuality {
    fn assess(&self, _images: &[ExtractedImage]) -> f64 {
        self.0
    }
}

/// Everything the scorer looks at.
#[derive(Debug, Clone, Copy)]
pub struct QualityInput<'a> {
    /// Recovered page text; empty when nothing was extracted
    pub body: &'a str,
    pub word_count: usize,
    pub pages: u32,
    pub structure: &'a DocumentStructure,
    pub security: &'a SecurityInfo,
    pub table_count: usize,
    pub images: &'a [ExtractedImage],
}

/// Combines text, structure and image sub-scores into one assessment.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityScorer {
    clamp_overall: bool,
}

impl QualityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp the overall score to [0, 1].
    pub fn clamped(mut self, clamp: bool) -> Self {
        self.clamp_overall = clamp;
        self
    }

    /// Score a document. Records `tablesDetected` in `metadata` when tables exist.
    pub fn score(
        &self,
        input: &QualityInput<'_>,
        images: &dyn ImageAssessor,
        metadata: &mut Metadata,
    ) -> QualityAnalysis {
        let mut issues = Vec::new();
        let mut recommendations = Vec::new();

        let text_quality = text_score(input, &mut issues, &mut recommendations);

        let mut structure_quality = 1.0;
        if !input.structure.has_bookmarks && input.pages > BOOKMARK_PAGE_THRESHOLD {
            structure_quality -= 0.2;
            recommendations.push(RECOMMEND_BOOKMARKS.to_string());
        }
        if !input.structure.is_tagged_pdf {
            structure_quality -= 0.3;
            issues.push(QualityIssue::new(
                "accessibility",
                Severity::Medium,
                "PDF is not tagged for accessibility",
                0.3,
            ));
            recommendations.push(RECOMMEND_TAGGING.to_string());
        }

        let image_quality = images.assess(input.images);

        if input.security.is_encrypted {
            issues.push(QualityIssue::new(
                "password_protected",
                Severity::Info,
                "PDF is password protected",
                0.0,
            ));
        }

        if input.pages > LARGE_DOCUMENT_PAGES {
            recommendations.push(RECOMMEND_SPLITTING.to_string());
        }

        if input.table_count > 0 {
            structure_quality += 0.1;
            metadata.set_custom(TABLES_DETECTED_KEY, input.table_count.to_string());
        }

        let mut overall_score = text_quality * TEXT_WEIGHT
            + structure_quality * STRUCTURE_WEIGHT
            + image_quality * IMAGE_WEIGHT;
        if self.clamp_overall {
            overall_score = overall_score.clamp(0.0, 1.0);
        }

        QualityAnalysis {
            overall_score,
            text_quality,
            image_quality,
            structure_quality,
            issues,
            recommendations,
        }
    }
}

fn text_score(
    input: &QualityInput<'_>,
    issues: &mut Vec<QualityIssue>,
    recommendations: &mut Vec<String>,
) -> f64 {
    if input.body.trim().is_empty() {
        issues.push(QualityIssue::new(
            "no_text",
            Severity::High,
            "No extractable text found in PDF",
            0.8,
        ));
        recommendations.push(RECOMMEND_OCR.to_string());
        return 0.0;
    }

    let words = input.word_count;
    let mut score = if words < 10 {
        issues.push(QualityIssue::new(
            "minimal_text",
            Severity::Medium,
            "Very little text content detected",
            0.4,
        ));
        0.3
    } else if words < 100 {
        0.7
    } else {
        1.0
    };

    // Replacement characters from failed glyph mapping.
    let question_marks = input.body.matches('?').count();
    if question_marks > 0 && question_marks > words / 10 {
        score *= 0.8;
        issues.push(QualityIssue::new(
            "encoding_issues",
            Severity::Medium,
            "Possible text encoding issues detected",
            0.2,
        ));
    }

    score
}
