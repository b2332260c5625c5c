//! Metadata recovery by pattern search over the raw file bytes.
//!
//! The scan does not depend on the object graph, so it still yields
//! values for documents whose cross-reference table is damaged.

use chrono::{DateTime, NaiveDate, Utc};
use regex::bytes::Regex;

use crate::model::{Metadata, UNKNOWN};

use super::backend::decode_text_simple;

/// Info dictionary fields recovered from raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetadataField {
    Title,
    Author,
    Subject,
    Creator,
    Producer,
    Keywords,
    CreationDate,
    ModDate,
}

impl MetadataField {
    /// All fields, in scan order.
    pub const ALL: [MetadataField; 8] = [
        MetadataField::Title,
        MetadataField::Author,
        MetadataField::Subject,
        MetadataField::Creator,
        MetadataField::Producer,
        MetadataField::Keywords,
        MetadataField::CreationDate,
        MetadataField::ModDate,
    ];

    /// The Info dictionary key, without the leading slash.
    pub fn key(&self) -> &'static str {
        match self {
            MetadataField::Title => "Title",
            MetadataField::Author => "Author",
            MetadataField::Subject => "Subject",
            MetadataField::Creator => "Creator",
            MetadataField::Producer => "Producer",
            MetadataField::Keywords => "Keywords",
            MetadataField::CreationDate => "CreationDate",
            MetadataField::ModDate => "ModDate",
        }
    }

    fn slot<'m>(&self, metadata: &'m mut Metadata) -> Option<&'m mut String> {
        match self {
            MetadataField::Title => Some(&mut metadata.title),
            MetadataField::Author => Some(&mut metadata.author),
            MetadataField::Subject => Some(&mut metadata.subject),
            MetadataField::Creator => Some(&mut metadata.creator),
            MetadataField::Producer => Some(&mut metadata.producer),
            MetadataField::Keywords => Some(&mut metadata.keywords),
            MetadataField::CreationDate | MetadataField::ModDate => None,
        }
    }
}

struct FieldPatterns {
    field: MetadataField,
    literal: Regex,
    hex: Regex,
}

/// Compiled literal-string and hex-string patterns for every Info field.
pub struct RawMetadataScanner {
    patterns: Vec<FieldPatterns>,
}

impl RawMetadataScanner {
    pub fn new() -> Self {
        let patterns = MetadataField::ALL
            .iter()
            .map(|&field| FieldPatterns {
                field,
                literal: Regex::new(&format!(r"(?-u)/{}\s*\(([^)]+)\)", field.key()))
                    .unwrap(),
                hex: Regex::new(&format!(r"(?-u)/{}\s*<([^>]+)>", field.key()))
                    .unwrap(),
            })
            .collect();

        Self { patterns }
    }

    /// Find the first value of `field`: literal strings win over hex strings.
    pub fn find(&self, data: &[u8], field: MetadataField) -> Option<String> {
        let patterns = self.patterns.iter().find(|p| p.field == field)?;

        if let Some(caps) = patterns.literal.captures(data) {
            let value = decode_text_simple(&caps[1]).trim().to_string();
            if !value.is_empty() {
                return Some(value);
            }
        }

        let caps = patterns.hex.captures(data)?;
        let raw = &caps[1];
        let value = match decode_hex(raw) {
            Some(bytes) => decode_text_simple(&bytes),
            None => String::from_utf8_lossy(raw).to_string(),
        };
        let value = value.trim().trim_matches('\0').to_string();
        (!value.is_empty()).then_some(value)
    }

    /// Fill the text fields and dates of `metadata`; unresolved fields stay "Unknown".
    pub fn apply(&self, data: &[u8], metadata: &mut Metadata) {
        for field in MetadataField::ALL {
            let value = self.find(data, field);
            match field {
                MetadataField::CreationDate => {
                    metadata.creation_date = value.as_deref().and_then(parse_pdf_date);
                }
                MetadataField::ModDate => {
                    metadata.mod_date = value.as_deref().and_then(parse_pdf_date);
                }
                _ => {
                    if let Some(slot) = field.slot(metadata) {
                        *slot = value.unwrap_or_else(|| UNKNOWN.to_string());
                    }
                }
            }
        }
    }

    /// Fill fields still "Unknown" (or dates still unset) using `lookup`.
    ///
    /// Used with the parsed `/Info` dictionary of an opened document, which
    /// also covers Info dictionaries stored inside compressed object streams.
    pub fn fill_missing<F>(&self, metadata: &mut Metadata, lookup: F)
    where
        F: Fn(MetadataField) -> Option<String>,
    {
        for field in MetadataField::ALL {
            match field {
                MetadataField::CreationDate if metadata.creation_date.is_none() => {
                    metadata.creation_date = lookup(field).as_deref().and_then(parse_pdf_date);
                }
                MetadataField::ModDate if metadata.mod_date.is_none() => {
                    metadata.mod_date = lookup(field).as_deref().and_then(parse_pdf_date);
                }
                _ => {
                    if let Some(slot) = field.slot(metadata) {
                        if slot == UNKNOWN {
                            if let Some(value) = lookup(field) {
                                *slot = value.trim().to_string();
                            }
                        }
                    }
                }
            }
        }
    }
}

impl Default for RawMetadataScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a PDF hex string body; whitespace is ignored and an odd final digit is padded with 0.
fn decode_hex(raw: &[u8]) -> Option<Vec<u8>> {
    let digits: Vec<u8> = raw
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .map(|b| (b as char).to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()?;

    Some(
        digits
            .chunks(2)
            .map(|pair| (pair[0] << 4) | pair.get(1).copied().unwrap_or(0))
            .collect(),
    )
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSSOHH'mm').
pub fn parse_pdf_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    let s = s.strip_prefix("D:").unwrap_or(s);

    // At minimum we need YYYY
    if s.len() < 4 {
        return None;
    }

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(4..6).and_then(|m| m.parse().ok()).unwrap_or(1);
    let day: u32 = s.get(6..8).and_then(|d| d.parse().ok()).unwrap_or(1);
    let hour: u32 = s.get(8..10).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minute: u32 = s.get(10..12).and_then(|m| m.parse().ok()).unwrap_or(0);
    let second: u32 = s.get(12..14).and_then(|s| s.parse().ok()).unwrap_or(0);

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
}
