//! Table types.

use serde::{Deserialize, Serialize};

/// Approximate placement of an element on its page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A tabular region detected in the extracted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedTable {
    /// Approximate page number (1-indexed)
    pub page: u32,

    /// Number of data rows (the header row is not counted)
    pub rows: usize,

    /// Number of columns, taken from the header row
    pub columns: usize,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<String>,

    /// Row-major cell data
    pub data: Vec<Vec<String>>,

    /// Not computed from text; always zeroed
    pub position: Position,

    /// Fixed heuristic certainty
    pub confidence: f64,
}

impl ExtractedTable {
    /// Start a table from its header row.
    pub fn with_headers(page: u32, headers: Vec<String>) -> Self {
        Self {
            page,
            rows: 0,
            columns: headers.len(),
            headers,
            data: Vec::new(),
            position: Position::default(),
            confidence: 0.0,
        }
    }

    /// Append a data row.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.data.push(row);
        self.rows = self.data.len();
    }

    /// Get plain text representation of the table, header included.
    pub fn plain_text(&self) -> String {
        std::iter::once(&self.headers)
            .chain(self.data.iter())
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
