//! Table detection over recovered page text.
//!
//! A line-oriented heuristic: a run of lines that each split into enough
//! whitespace-separated tokens is treated as a table whose first line is
//! the header row. No column alignment is computed.

use crate::model::ExtractedTable;

/// Prefix of the synthetic page boundary lines in the extracted text.
pub const PAGE_MARKER_PREFIX: &str = "=== Page";

/// Table detector configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDetectorConfig {
    /// Minimum number of whitespace tokens for a line to count as a row
    pub min_tokens: usize,
    /// Minimum number of data rows (header excluded) to keep a table
    pub min_data_rows: usize,
    /// Confidence assigned to every detected table
    pub confidence: f64,
    /// Close the table when a row's token count differs from the header's
    pub consistent_columns: bool,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            min_tokens: 3,
            min_data_rows: 2,
            confidence: 0.7,
            consistent_columns: false,
        }
    }
}

/// Check whether a line is a synthetic page boundary marker.
pub fn is_page_marker(line: &str) -> bool {
    line.trim_start().starts_with(PAGE_MARKER_PREFIX)
}

enum ScanState {
    OutsideTable,
    InsideTable(ExtractedTable),
}

/// Detects tabular regions in plain text.
#[derive(Debug, Clone, Default)]
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    /// Create a new table detector with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table detector with custom configuration.
    pub fn with_config(config: TableDetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TableDetectorConfig {
        &self.config
    }

    /// Detect all tables in `text`, in order of appearance.
    pub fn detect(&self, text: &str) -> Vec<ExtractedTable> {
        let mut tables = Vec::new();
        let mut state = ScanState::OutsideTable;
        let mut page: u32 = 0;

        for line in text.lines() {
            let trimmed = line.trim();

            if is_page_marker(trimmed) {
                page += 1;
                self.close(&mut state, &mut tables);
                continue;
            }

            if trimmed.is_empty() {
                self.close(&mut state, &mut tables);
                continue;
            }

            let tokens: Vec<String> = trimmed.split_whitespace().map(str::to_string).collect();
            if tokens.len() < self.config.min_tokens {
                self.close(&mut state, &mut tables);
                continue;
            }

            match &mut state {
                ScanState::InsideTable(table)
                    if !self.config.consistent_columns || tokens.len() == table.columns =>
                {
                    table.add_row(tokens);
                }
                ScanState::InsideTable(_) => {
                    // Column count changed: the row starts a new candidate.
                    self.close(&mut state, &mut tables);
                    state = ScanState::InsideTable(ExtractedTable::with_headers(
                        page.max(1),
                        tokens,
                    ));
                }
                ScanState::OutsideTable => {
                    state = ScanState::InsideTable(ExtractedTable::with_headers(
                        page.max(1),
                        tokens,
                    ));
                }
            }
        }

        self.close(&mut state, &mut tables);

        log::debug!("Detected {} table(s)", tables.len());
        tables
    }

    /// Finalize the open candidate, if any, and return to the outside state.
    fn close(&self, state: &mut ScanState, tables: &mut Vec<ExtractedTable>) {
        if let ScanState::InsideTable(mut table) =
            std::mem::replace(state, ScanState::OutsideTable)
        {
            if table.rows >= self.config.min_data_rows {
                table.confidence = self.config.confidence;
                tables.push(table);
            }
        }
    }
}
