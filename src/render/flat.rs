//! Flat transport shape: report headline fields plus a string-only metadata map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{ParseReport, EXTRACTION_ERRORS_KEY, PAGES_EXTRACTED_KEY};

/// Prefix applied to custom metadata keys in the flat map.
pub const CUSTOM_PREFIX: &str = "custom_";

/// Report flattened for consumers that only understand string metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatReport {
    pub filename: String,
    pub file_type: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub process_time: String,
    pub text: String,
    pub pages: u32,
    pub word_count: usize,
    pub metadata: BTreeMap<String, String>,
}

impl FlatReport {
    pub fn from_report(report: &ParseReport) -> Self {
        let mut map = BTreeMap::new();
        let metadata = &report.metadata;

        for (key, value) in metadata.text_fields() {
            map.insert(key.to_string(), value.to_string());
        }
        map.insert("pdfVersion".to_string(), metadata.pdf_version.clone());
        map.insert("fileSize".to_string(), metadata.file_size.to_string());

        map.insert(
            "overallQualityScore".to_string(),
            format!("{:.2}", report.quality.overall_score),
        );
        map.insert(
            "textQuality".to_string(),
            format!("{:.2}", report.quality.text_quality),
        );
        map.insert(
            "structureQuality".to_string(),
            format!("{:.2}", report.quality.structure_quality),
        );

        map.insert("tablesDetected".to_string(), report.tables.len().to_string());
        map.insert(
            "securityEncrypted".to_string(),
            report.security.is_encrypted.to_string(),
        );
        map.insert(
            "hasBookmarks".to_string(),
            report.structure.has_bookmarks.to_string(),
        );
        map.insert(
            "isTaggedPDF".to_string(),
            report.structure.is_tagged_pdf.to_string(),
        );

        if let Some(pages_extracted) = metadata.pages_extracted() {
            map.insert(PAGES_EXTRACTED_KEY.to_string(), pages_extracted.to_string());
        }
        if let Some(errors) = metadata.custom(EXTRACTION_ERRORS_KEY) {
            map.insert(EXTRACTION_ERRORS_KEY.to_string(), errors.to_string());
        }

        if !report.quality.recommendations.is_empty() {
            map.insert(
                "recommendations".to_string(),
                report.quality.recommendations.join("; "),
            );
        }

        for (key, value) in &metadata.custom {
            map.insert(format!("{}{}", CUSTOM_PREFIX, key), value.clone());
        }

        Self {
            filename: report.filename.clone(),
            file_type: report.file_type.clone(),
            success: report.success,
            error: report.error.clone(),
            process_time: report.process_time.clone(),
            text: report.text.clone(),
            pages: report.pages,
            word_count: report.word_count,
            metadata: map,
        }
    }
}

impl From<&ParseReport> for FlatReport {
    fn from(report: &ParseReport) -> Self {
        Self::from_report(report)
    }
}
