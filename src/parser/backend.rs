//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for PDF operations, isolating
//! the concrete PDF library (lopdf) from the extraction and analysis logic.

use std::collections::{BTreeMap, HashSet};

use crate::error::{Error, Result};
use crate::model::Bookmark;

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// Upper bound on `Parent` hops when resolving inherited page attributes.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Font information returned by the backend.
#[derive(Debug, Clone)]
pub struct BackendFontInfo {
    /// Font resource name (key in the page's font dictionary).
    pub name: Vec<u8>,
    /// Base font name (e.g., "Helvetica-Bold").
    pub base_font: String,
    /// Font subtype (e.g., "Type1", "TrueType", "Type0").
    pub subtype: String,
    /// Whether a font program is embedded.
    pub embedded: bool,
}

/// Document-level flags read from the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogFlags {
    /// `/MarkInfo << /Marked true >>`
    pub marked: bool,
    /// A `/StructTreeRoot` entry is present.
    pub struct_tree: bool,
}

/// A value from a PDF content stream operand.
#[derive(Debug, Clone)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

/// Abstract interface for PDF document access.
///
/// Implementations provide page enumeration, font info, content stream
/// decoding, text decoding and catalog inspection without exposing any
/// concrete PDF library types.
pub trait PdfBackend {
    /// Return all pages as (page_number → PageId).
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Whether the page object is missing or not a dictionary.
    fn is_null_page(&self, page: PageId) -> bool;

    /// Return font info for a given page.
    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>>;

    /// Return the raw (decompressed) content stream bytes for a page.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// Parse raw content stream bytes into a sequence of operations.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>>;

    /// Decode a text byte sequence using the font's encoding on the given page.
    ///
    /// Fails when the font or its encoding cannot be resolved; callers fall
    /// back to [`decode_text_simple`].
    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> Result<String>;

    /// Page width and height in points, following inherited `MediaBox` entries.
    fn media_box(&self, page: PageId) -> Option<(f64, f64)>;

    /// A string entry of the trailer `/Info` dictionary.
    fn info_string(&self, key: &[u8]) -> Option<String>;

    /// The bookmark tree rooted at the catalog's `/Outlines`.
    fn outline(&self) -> Vec<Bookmark>;

    /// Tagging-related catalog flags.
    fn catalog_flags(&self) -> CatalogFlags;
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // Try UTF-16BE first (BOM marker)
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    // Try UTF-8
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Fallback: Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

// ---------------------------------------------------------------------------
// LopdfBackend: concrete implementation backed by lopdf
// ---------------------------------------------------------------------------

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Open a document from an in-memory byte slice.
    ///
    /// Any failure (corrupt cross-reference table, unreadable encryption)
    /// is reported as [`Error::Open`] carrying the underlying reason.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match Error::from(e) {
            Error::PdfParse(reason) => Error::Open(reason),
            other => other,
        })?;
        Ok(Self { doc })
    }

    /// Direct access to the underlying `lopdf::Document`.
    pub fn raw_doc(&self) -> &LopdfDocument {
        &self.doc
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Resolve an object that may be a direct dictionary or a reference to one.
    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        match obj {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Look up a page attribute, walking up `Parent` links for inherited values.
    fn inherited<'a>(&'a self, page: PageId, key: &[u8]) -> Option<&'a Object> {
        let mut dict = self.doc.get_dictionary(page).ok()?;
        for _ in 0..MAX_INHERITANCE_DEPTH {
            if let Ok(value) = dict.get(key) {
                return Some(value);
            }
            let parent = dict.get(b"Parent").ok()?.as_reference().ok()?;
            dict = self.doc.get_dictionary(parent).ok()?;
        }
        None
    }

    fn font_is_embedded(&self, font_dict: &Dictionary) -> bool {
        let descriptor = font_dict
            .get(b"FontDescriptor")
            .ok()
            .and_then(|d| self.resolve_dict(d))
            .or_else(|| {
                // Composite fonts keep the descriptor on the descendant font.
                font_dict
                    .get(b"DescendantFonts")
                    .ok()
                    .and_then(|d| d.as_array().ok())
                    .and_then(|arr| arr.first())
                    .and_then(|d| self.resolve_dict(d))
                    .and_then(|d| d.get(b"FontDescriptor").ok())
                    .and_then(|d| self.resolve_dict(d))
            });

        descriptor.is_some_and(|d| {
            [&b"FontFile"[..], &b"FontFile2"[..], &b"FontFile3"[..]]
                .iter()
                .any(|key| d.has(key))
        })
    }

    /// Recursively collect outline items, guarding against cyclic links.
    fn collect_outline_items(
        &self,
        item_ref: ObjectId,
        level: u32,
        visited: &mut HashSet<ObjectId>,
        page_numbers: &BTreeMap<ObjectId, u32>,
        items: &mut Vec<Bookmark>,
    ) {
        let mut next = Some(item_ref);
        while let Some(current) = next.take() {
            if !visited.insert(current) {
                log::warn!("Outline item {:?} visited twice; stopping", current);
                return;
            }
            let Ok(item_dict) = self.doc.get_dictionary(current) else {
                return;
            };

            let title = get_string_from_dict(item_dict, b"Title").unwrap_or_default();
            let page = self
                .outline_destination(item_dict, page_numbers)
                .unwrap_or(0);
            let mut bookmark = Bookmark::new(title, page, level);

            if let Ok(first) = item_dict.get(b"First").and_then(Object::as_reference) {
                self.collect_outline_items(
                    first,
                    level + 1,
                    visited,
                    page_numbers,
                    &mut bookmark.children,
                );
            }

            items.push(bookmark);
            next = item_dict.get(b"Next").and_then(Object::as_reference).ok();
        }
    }

    /// Resolve the target page of an outline item (`/Dest` or `/A /D`).
    fn outline_destination(
        &self,
        item_dict: &Dictionary,
        page_numbers: &BTreeMap<ObjectId, u32>,
    ) -> Option<u32> {
        let dest = match item_dict.get(b"Dest") {
            Ok(dest) => dest,
            Err(_) => {
                let action = item_dict.get(b"A").ok().and_then(|a| self.resolve_dict(a))?;
                action.get(b"D").ok()?
            }
        };

        let first = dest.as_array().ok()?.first()?;
        let page_ref = first.as_reference().ok()?;
        page_numbers.get(&page_ref).copied()
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn is_null_page(&self, page: PageId) -> bool {
        self.doc.get_dictionary(page).is_err()
    }

    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>> {
        let lopdf_fonts = self
            .doc
            .get_page_fonts(page)?;

        let mut result = Vec::with_capacity(lopdf_fonts.len());
        for (name, font_dict) in &lopdf_fonts {
            let base_font = font_dict
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            let subtype = font_dict
                .get(b"Subtype")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            result.push(BackendFontInfo {
                name: name.clone(),
                base_font,
                subtype,
                embedded: self.font_is_embedded(font_dict),
            });
        }
        Ok(result)
    }

    fn page_content(&self, page_id: PageId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page_id)?;

        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            // A page without a content stream is blank, not broken.
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r) {
                Ok(Object::Stream(s)) => Ok(stream_bytes(s)),
                Ok(Object::Array(arr)) => Ok(self.concat_streams(arr)),
                _ => Err(Error::PdfParse("Invalid content stream".to_string())),
            },
            Object::Array(arr) => Ok(self.concat_streams(arr)),
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content = lopdf::content::Content::decode(data)?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operator: op.operator,
                operands: op.operands.iter().map(convert_object).collect(),
            })
            .collect())
    }

    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> Result<String> {
        let lopdf_fonts = self
            .doc
            .get_page_fonts(page)
            .map_err(|e| Error::FontDecode(e.to_string()))?;
        let font_dict = lopdf_fonts.get(font_name).ok_or_else(|| {
            Error::FontDecode(format!(
                "font /{} not found",
                String::from_utf8_lossy(font_name)
            ))
        })?;
        let encoding = font_dict
            .get_font_encoding(&self.doc)
            .map_err(|e| Error::FontDecode(e.to_string()))?;
        LopdfDocument::decode_text(&encoding, bytes).map_err(|e| Error::FontDecode(e.to_string()))
    }

    fn media_box(&self, page: PageId) -> Option<(f64, f64)> {
        let array = self.inherited(page, b"MediaBox")?.as_array().ok()?;
        if array.len() < 4 {
            return None;
        }
        let coord = |i: usize| array[i].as_float().ok().map(f64::from);
        let (x0, y0, x1, y1) = (coord(0)?, coord(1)?, coord(2)?, coord(3)?);
        Some(((x1 - x0).abs(), (y1 - y0).abs()))
    }

    fn info_string(&self, key: &[u8]) -> Option<String> {
        let info = self.doc.trailer.get(b"Info").ok()?;
        let info_dict = self.resolve_dict(info)?;
        get_string_from_dict(info_dict, key).filter(|s| !s.trim().is_empty())
    }

    fn outline(&self) -> Vec<Bookmark> {
        let mut items = Vec::new();

        let Ok(catalog) = self.doc.catalog() else {
            return items;
        };
        let Some(outlines) = catalog
            .get(b"Outlines")
            .ok()
            .and_then(|o| self.resolve_dict(o))
        else {
            return items;
        };

        if let Ok(first) = outlines.get(b"First").and_then(Object::as_reference) {
            let page_numbers: BTreeMap<ObjectId, u32> = self
                .doc
                .get_pages()
                .into_iter()
                .map(|(num, id)| (id, num))
                .collect();
            let mut visited = HashSet::new();
            self.collect_outline_items(first, 0, &mut visited, &page_numbers, &mut items);
        }

        items
    }

    fn catalog_flags(&self) -> CatalogFlags {
        let Ok(catalog) = self.doc.catalog() else {
            return CatalogFlags::default();
        };

        let marked = catalog
            .get(b"MarkInfo")
            .ok()
            .and_then(|m| self.resolve_dict(m))
            .and_then(|m| m.get(b"Marked").ok())
            .and_then(|m| m.as_bool().ok())
            .unwrap_or(false);

        CatalogFlags {
            marked,
            struct_tree: catalog.has(b"StructTreeRoot"),
        }
    }
}

impl LopdfBackend {
    fn concat_streams(&self, arr: &[Object]) -> Vec<u8> {
        let mut content = Vec::new();
        for obj in arr {
            if let Object::Reference(r) = obj {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    content.extend_from_slice(&stream_bytes(s));
                    content.push(b' ');
                }
            }
        }
        content
    }
}

/// Stream payload, decompressed when a filter is declared.
fn stream_bytes(stream: &lopdf::Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

/// Convert a `lopdf::Object` to [`PdfValue`].
fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}

/// Helper to get a string from a PDF dictionary.
fn get_string_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_text_simple(bytes)),
        Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).to_string()),
        _ => None,
    }
}

/// Helper: extract a number from a [`PdfValue`].
pub fn get_number_from_value(val: &PdfValue) -> Option<f32> {
    match val {
        PdfValue::Integer(i) => Some(*i as f32),
        PdfValue::Real(r) => Some(*r),
        _ => None,
    }
}
