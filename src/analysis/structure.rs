//! Structure analysis: bookmarks, tagging and fonts.

use std::collections::BTreeMap;

use crate::model::{DocumentStructure, FontInfo};
use crate::parser::PdfBackend;

/// Strategy that derives the logical structure of an opened document.
///
/// Page sizes are not the probe's concern; they are recorded during text
/// extraction and merged in by the pipeline.
pub trait StructureProbe: Send + Sync {
    fn probe(&self, backend: &dyn PdfBackend) -> DocumentStructure;
}

/// Structure with every flag false, used when nothing can be inspected.
pub fn conservative_structure() -> DocumentStructure {
    DocumentStructure::default()
}

/// Reports no bookmarks, no tags and no fonts regardless of the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConservativeStructureProbe;

impl StructureProbe for ConservativeStructureProbe {
    fn probe(&self, _backend: &dyn PdfBackend) -> DocumentStructure {
        conservative_structure()
    }
}

/// Reads the outline tree, tagging flags and page fonts from the catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogStructureProbe;

impl StructureProbe for CatalogStructureProbe {
    fn probe(&self, backend: &dyn PdfBackend) -> DocumentStructure {
        let mut structure = DocumentStructure::default();

        structure.set_bookmarks(backend.outline());

        let flags = backend.catalog_flags();
        structure.set_tagged(flags.marked || flags.struct_tree);

        structure.fonts_used = collect_fonts(backend);

        log::debug!(
            "Structure: {} bookmark(s), tagged={}, {} font(s)",
            structure.bookmark_count,
            structure.is_tagged_pdf,
            structure.fonts_used.len()
        );
        structure
    }
}

/// Fonts keyed by base font name, with the pages that reference them.
fn collect_fonts(backend: &dyn PdfBackend) -> Vec<FontInfo> {
    let mut fonts: BTreeMap<String, FontInfo> = BTreeMap::new();

    for (page_num, page_id) in backend.pages() {
        let Ok(page_fonts) = backend.page_fonts(page_id) else {
            continue;
        };
        for font in page_fonts {
            let entry = fonts
                .entry(font.base_font.clone())
                .or_insert_with(|| FontInfo {
                    subset: is_subset_name(&font.base_font),
                    name: font.base_font.clone(),
                    font_type: font.subtype.clone(),
                    embedded: font.embedded,
                    pages: Vec::new(),
                });
            entry.embedded |= font.embedded;
            if !entry.pages.contains(&page_num) {
                entry.pages.push(page_num);
            }
        }
    }

    fonts.into_values().collect()
}

/// Subset fonts carry a six uppercase letter tag, e.g. "ABCDEF+Helvetica".
pub fn is_subset_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() > 7 && bytes[6] == b'+' && bytes[..6].iter().all(u8::is_ascii_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NOT_TAGGED_ISSUE;

    #[test]
    fn test_subset_names() {
        assert!(is_subset_name("ABCDEF+Helvetica"));
        assert!(!is_subset_name("Helvetica"));
        assert!(!is_subset_name("AbCDEF+Helvetica"));
        assert!(!is_subset_name("ABCDEF+"));
    }

    #[test]
    fn test_conservative_structure() {
        let structure = conservative_structure();
        assert!(!structure.has_bookmarks);
        assert!(!structure.has_outline);
        assert!(!structure.is_tagged_pdf);
        assert!(structure
            .accessibility_info
            .issues
            .iter()
            .any(|issue| issue == NOT_TAGGED_ISSUE));
    }
}
