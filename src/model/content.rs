//! Placeholder content types filled by a [`ContentHarvester`](crate::analysis::ContentHarvester).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Position;

/// An image found in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedImage {
    pub id: String,
    pub page: u32,
    pub width: u32,
    pub height: u32,
    /// Lowercase format name (e.g., "jpeg")
    pub format: String,
    /// Encoded size in bytes
    pub size: u64,
    pub dpi: f64,
    pub color_space: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64_data: Option<String>,
    pub position: Position,
    pub is_inline: bool,
}

/// An interactive form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub value: serde_json::Value,
    pub page: u32,
    pub required: bool,
    pub read_only: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub position: Position,
}

/// A page annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    #[serde(rename = "type")]
    pub annotation_type: String,
    pub page: u32,
    pub content: String,
    pub author: String,
    pub creation_date: Option<DateTime<Utc>>,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}
