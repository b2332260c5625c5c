//! Quality analysis types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Composite quality assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAnalysis {
    /// Weighted combination of the three sub-scores; may exceed 1.0
    pub overall_score: f64,
    pub text_quality: f64,
    pub image_quality: f64,
    pub structure_quality: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<QualityIssue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

impl QualityAnalysis {
    /// Find the first issue of the given type.
    pub fn issue(&self, issue_type: &str) -> Option<&QualityIssue> {
        self.issues.iter().find(|i| i.issue_type == issue_type)
    }

    /// Check whether an issue of the given type was recorded.
    pub fn has_issue(&self, issue_type: &str) -> bool {
        self.issue(issue_type).is_some()
    }
}

/// One scored or informational finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    #[serde(rename = "type")]
    pub issue_type: String,
    pub severity: Severity,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Score impact in [0, 1]
    pub impact: f64,
}

impl QualityIssue {
    pub fn new(
        issue_type: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        impact: f64,
    ) -> Self {
        Self {
            issue_type: issue_type.into(),
            severity,
            description: description.into(),
            page: None,
            impact,
        }
    }

    /// Attach the page the issue refers to.
    pub fn on_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

/// Issue severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
