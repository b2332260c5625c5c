//! Logical structure of a document: bookmarks, page sizes, fonts, tagging.

use serde::{Deserialize, Serialize};

/// Issue recorded whenever a document carries no structure tags.
pub const NOT_TAGGED_ISSUE: &str = "Document is not tagged for accessibility";

/// Logical structure of the document.
///
/// The default value is untagged and already carries [`NOT_TAGGED_ISSUE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStructure {
    pub has_bookmarks: bool,
    pub bookmark_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bookmarks: Vec<Bookmark>,
    pub has_outline: bool,
    pub page_sizes: Vec<PageSize>,
    pub fonts_used: Vec<FontInfo>,
    #[serde(rename = "isTaggedPDF")]
    pub is_tagged_pdf: bool,
    #[serde(rename = "accessibility")]
    pub accessibility_info: AccessibilityInfo,
}

impl Default for DocumentStructure {
    fn default() -> Self {
        let mut structure = Self {
            has_bookmarks: false,
            bookmark_count: 0,
            bookmarks: Vec::new(),
            has_outline: false,
            page_sizes: Vec::new(),
            fonts_used: Vec::new(),
            is_tagged_pdf: false,
            accessibility_info: AccessibilityInfo::default(),
        };
        structure.set_tagged(false);
        structure
    }
}

impl DocumentStructure {
    /// Set the bookmark tree and derive the bookmark flags from it.
    pub fn set_bookmarks(&mut self, bookmarks: Vec<Bookmark>) {
        self.bookmark_count = Bookmark::count_all(&bookmarks);
        self.has_bookmarks = self.bookmark_count > 0;
        self.has_outline = self.has_bookmarks;
        self.bookmarks = bookmarks;
    }

    /// Set the tagging flag and keep the accessibility info consistent with it.
    pub fn set_tagged(&mut self, tagged: bool) {
        self.is_tagged_pdf = tagged;
        self.accessibility_info.has_structure_tags = tagged;
        self.accessibility_info.is_accessible = tagged;

        let issues = &mut self.accessibility_info.issues;
        issues.retain(|issue| issue != NOT_TAGGED_ISSUE);
        if !tagged {
            issues.push(NOT_TAGGED_ISSUE.to_string());
        }
    }
}

/// A single bookmark (outline item).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub title: String,
    /// Target page number (1-indexed), 0 when unresolved
    pub page: u32,
    /// Nesting level (0 = top level)
    pub level: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Bookmark>,
}

impl Bookmark {
    pub fn new(title: impl Into<String>, page: u32, level: u32) -> Self {
        Self {
            title: title.into(),
            page,
            level,
            children: Vec::new(),
        }
    }

    /// Count bookmarks including nested children.
    pub fn count_all(items: &[Bookmark]) -> usize {
        items
            .iter()
            .map(|item| 1 + Self::count_all(&item.children))
            .sum()
    }
}

/// Dimensions of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub page: u32,
    pub width: f64,
    pub height: f64,
    pub units: String,
}

impl PageSize {
    /// Page size in PDF points.
    pub fn points(page: u32, width: f64, height: f64) -> Self {
        Self {
            page,
            width,
            height,
            units: "points".to_string(),
        }
    }

    /// US Letter, used when a page declares no usable MediaBox.
    pub fn letter(page: u32) -> Self {
        Self::points(page, 612.0, 792.0)
    }
}

/// A font referenced by one or more pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub font_type: String,
    pub embedded: bool,
    pub subset: bool,
    pub pages: Vec<u32>,
}

/// Accessibility findings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityInfo {
    pub is_accessible: bool,
    pub has_structure_tags: bool,
    pub has_alt_text: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}
