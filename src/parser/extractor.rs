//! Page-by-page text extraction with per-page failure isolation.

use std::fmt::Write as _;

use log::{debug, warn};
use unicode_normalization::UnicodeNormalization;

use crate::analysis::is_page_marker;
use crate::error::{Error, Result};
use crate::model::{Metadata, PageSize, EXTRACTION_ERRORS_KEY, PAGES_EXTRACTED_KEY};

use super::backend::{decode_text_simple, get_number_from_value, PageId, PdfBackend, PdfValue};

/// Per-error custom keys are only written when fewer errors than this occurred.
const MAX_LISTED_ERRORS: usize = 5;

/// TJ adjustment (thousandths of text space) treated as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// How string operands are turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Use the encodings of the page's font table
    FontTable,
    /// UTF-16BE / UTF-8 / Latin-1 guessing without fonts
    Simple,
}

/// Result of walking every page of an opened document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionOutcome {
    /// Page text joined with `=== Page N ===` markers; empty when nothing was recovered
    pub body: String,
    /// Pages in the page tree
    pub pages: u32,
    /// Pages that yielded non-empty text
    pub successful_pages: u32,
    /// "Page N: reason" messages in page order
    pub errors: Vec<String>,
    pub page_sizes: Vec<PageSize>,
}

impl ExtractionOutcome {
    /// Whether at least one page produced text.
    pub fn has_text(&self) -> bool {
        !self.body.is_empty()
    }

    /// Whitespace-separated words of the body, page markers excluded.
    pub fn word_count(&self) -> usize {
        count_body_words(&self.body)
    }

    /// Write the extraction counters and per-error details into `metadata.custom`.
    pub fn record_diagnostics(&self, metadata: &mut Metadata) {
        metadata.set_custom(
            PAGES_EXTRACTED_KEY,
            format!("{}/{}", self.successful_pages, self.pages),
        );
        metadata.set_custom(EXTRACTION_ERRORS_KEY, self.errors.len().to_string());

        if !self.errors.is_empty() && self.errors.len() < MAX_LISTED_ERRORS {
            for (i, message) in self.errors.iter().enumerate() {
                metadata.set_custom(format!("error_{}", i + 1), message.clone());
            }
        }
    }

    /// The text shown to callers: the body, or a diagnostic block when it is empty.
    pub fn display_text(&self, file_size: u64) -> String {
        if self.has_text() {
            self.body.clone()
        } else {
            empty_text_diagnostic(file_size, self)
        }
    }
}

/// Count whitespace-separated words, skipping page marker lines.
pub fn count_body_words(body: &str) -> usize {
    body.lines()
        .filter(|line| !is_page_marker(line))
        .map(|line| line.split_whitespace().count())
        .sum()
}

/// Walks the page tree and recovers text from each page's content stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract every page. Failures are recorded per page and never abort the loop.
    pub fn extract(&self, backend: &dyn PdfBackend) -> ExtractionOutcome {
        let pages = backend.pages();
        let mut outcome = ExtractionOutcome {
            pages: pages.len() as u32,
            ..Default::default()
        };

        for (page_num, page_id) in pages {
            if backend.is_null_page(page_id) {
                warn!("Page {}: null page object", page_num);
                outcome
                    .errors
                    .push(format!("Page {}: Null page object", page_num));
                continue;
            }

            outcome.page_sizes.push(match backend.media_box(page_id) {
                Some((width, height)) if width > 0.0 && height > 0.0 => {
                    PageSize::points(page_num, width, height)
                }
                _ => PageSize::letter(page_num),
            });

            let text = match self.page_text_with_fallback(backend, page_num, page_id) {
                Ok(text) => text,
                Err(e) => {
                    warn!("{}", e);
                    outcome.errors.push(e.to_string());
                    continue;
                }
            };

            let clean: String = text.trim().nfc().collect();
            if clean.is_empty() {
                outcome.errors.push(format!(
                    "Page {}: No extractable text (might contain images/graphics)",
                    page_num
                ));
                continue;
            }

            let _ = write!(outcome.body, "=== Page {} ===\n{}\n\n", page_num, clean);
            outcome.successful_pages += 1;
        }

        debug!(
            "Extracted text from {}/{} page(s), {} error(s)",
            outcome.successful_pages,
            outcome.pages,
            outcome.errors.len()
        );
        outcome
    }

    /// Try the font table first, then retry once with simple decoding.
    fn page_text_with_fallback(
        &self,
        backend: &dyn PdfBackend,
        page_num: u32,
        page_id: PageId,
    ) -> Result<String> {
        self.page_text(backend, page_id, DecodeMode::FontTable)
            .or_else(|e| {
                debug!("Page {}: font table decoding failed ({}), retrying", page_num, e);
                self.page_text(backend, page_id, DecodeMode::Simple)
            })
            .map_err(|e| Error::PageExtraction {
                page: page_num,
                reason: e.to_string(),
            })
    }

    /// Extract plain text from one page's content stream.
    pub fn page_text(
        &self,
        backend: &dyn PdfBackend,
        page_id: PageId,
        mode: DecodeMode,
    ) -> Result<String> {
        let content = backend.page_content(page_id)?;
        if content.is_empty() {
            return Ok(String::new());
        }
        let operations = backend.decode_content(&content)?;

        let decode = |font: &[u8], bytes: &[u8]| -> Result<String> {
            match mode {
                DecodeMode::FontTable => backend.decode_text(page_id, font, bytes),
                DecodeMode::Simple => Ok(decode_text_simple(bytes)),
            }
        };

        let mut text = String::new();
        let mut font: Vec<u8> = Vec::new();

        for op in operations {
            match op.operator.as_str() {
                "Tf" => {
                    if let Some(PdfValue::Name(name)) = op.operands.first() {
                        font = name.clone();
                    }
                }
                "ET" | "T*" => push_line_break(&mut text),
                "Td" | "TD" => {
                    let tx = op.operands.first().and_then(get_number_from_value);
                    let ty = op.operands.get(1).and_then(get_number_from_value);
                    if ty.is_some_and(|ty| ty != 0.0) {
                        push_line_break(&mut text);
                    } else if tx.is_some_and(|tx| tx > 0.0) {
                        push_word_gap(&mut text);
                    }
                }
                "Tj" => {
                    if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                        text.push_str(&decode(&font, bytes)?);
                    }
                }
                "TJ" => {
                    if let Some(PdfValue::Array(items)) = op.operands.first() {
                        for item in items {
                            match item {
                                PdfValue::Str(bytes) => text.push_str(&decode(&font, bytes)?),
                                other => {
                                    // Large negative adjustments move right: a word gap.
                                    if let Some(n) = get_number_from_value(other) {
                                        if -n > TJ_SPACE_THRESHOLD {
                                            push_word_gap(&mut text);
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                "'" | "\"" => {
                    push_line_break(&mut text);
                    let index = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(PdfValue::Str(bytes)) = op.operands.get(index) {
                        text.push_str(&decode(&font, bytes)?);
                    }
                }
                _ => {}
            }
        }

        Ok(text)
    }
}

fn push_line_break(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

fn push_word_gap(text: &mut String) {
    match text.chars().last() {
        Some(c) if !c.is_whitespace() && c != '\u{00A0}' && !is_spaceless_script_char(c) => {
            text.push(' ')
        }
        _ => {}
    }
}

/// CJK scripts do not separate words with spaces.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}' // Hiragana
        | '\u{30A0}'..='\u{30FF}' // Katakana
        | '\u{4E00}'..='\u{9FFF}' // CJK Unified Ideographs
        | '\u{3400}'..='\u{4DBF}' // CJK Extension A
        | '\u{AC00}'..='\u{D7AF}' // Hangul Syllables
        | '\u{3000}'..='\u{303F}' // CJK Punctuation
        | '\u{FF00}'..='\u{FFEF}' // Fullwidth Forms
    )
}

/// Diagnostic text for a document that opened but yielded no text.
pub fn empty_text_diagnostic(file_size: u64, outcome: &ExtractionOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "PDF File Analysis ({} bytes, {} pages)\n",
        file_size, outcome.pages
    );
    out.push_str("✅ PDF file was successfully opened and parsed\n");
    out.push_str("❌ No extractable text content found\n\n");

    out.push_str("Possible reasons:\n");
    out.push_str("• PDF contains only scanned images (requires OCR)\n");
    out.push_str("• Text is embedded as graphics/vectors\n");
    out.push_str("• Complex formatting not supported by parser\n");
    out.push_str("• Text uses non-standard encoding\n\n");

    out.push_str("Extraction Details:\n");
    let _ = writeln!(
        out,
        "• Total pages processed: {}/{}",
        outcome.pages, outcome.pages
    );
    let _ = writeln!(
        out,
        "• Pages with extractable text: {}",
        outcome.successful_pages
    );

    if !outcome.errors.is_empty() {
        out.push_str("\nPage-by-page analysis:\n");
        for message in &outcome.errors {
            let _ = writeln!(out, "• {}", message);
        }
    }

    out.push_str("\n💡 Suggestions:\n");
    out.push_str("• Try copying text directly from PDF viewer\n");
    out.push_str("• Use OCR software for scanned documents\n");
    out.push_str("• Convert PDF to Word/text format first\n");
    out
}

/// Diagnostic text for a document whose structure could not be opened.
pub fn open_failure_text(file_size: u64, reason: &str) -> String {
    format!(
        "PDF File Detected ({} bytes) - Error Reading\n\n\
         This PDF file could not be parsed. Possible reasons:\n\
         - File is corrupted\n\
         - File is password protected/encrypted\n\
         - File uses unsupported PDF features\n\n\
         Error: {}\n\n\
         You can manually copy and paste the text content if needed.",
        file_size, reason
    )
}
