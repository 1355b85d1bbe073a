//! CSV catalog parsing.
//!
//! The catalog is line oriented:
//!
//! ```text
//! # comment lines start with '#' (after optional whitespace)
//! Brand,Type,Color,Hotend,Bed,BrandSize,TypeSize,ColorSize
//! Prusament,PLA,Galaxy Black,215,60
//! Generic,PETG,Blue,230-250,80,,8
//! ```
//!
//! Parsing is all-or-nothing: the first malformed line aborts with a
//! [`FormatError`] carrying its 1-based physical line number, and no records
//! are returned.

use crate::error::{Result, SamplesError};
use crate::record::{Record, RecordFields, ValidationError};
use std::path::Path;
use thiserror::Error;

mod cells;

use cells::split_cells;

/// Minimum number of cells in a data row.
pub const REQUIRED_COLUMNS: usize = 5;

/// First-cell values that mark a header row (compared case-insensitively).
const HEADER_MARKERS: [&str; 2] = ["brand", "manufacturer"];

/// A malformed catalog line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {cause}")]
pub struct FormatError {
    /// 1-based physical line number in the input.
    pub line: usize,
    pub cause: FormatErrorCause,
}

/// What was wrong with a malformed line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatErrorCause {
    #[error("insufficient columns, expected at least {expected}, got {found}")]
    InsufficientColumns { expected: usize, found: usize },

    #[error("unterminated quoted cell")]
    UnterminatedQuote,

    #[error("unexpected text after closing quote")]
    MalformedQuote,

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Turns catalog text into validated records.
pub trait RecordParser: Send + Sync {
    /// Parse catalog text into records, preserving input order.
    fn parse(&self, text: &str) -> std::result::Result<Vec<Record>, FormatError>;

    /// Read and parse a catalog file.
    fn parse_file(&self, path: &Path) -> Result<Vec<Record>> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            SamplesError::UserError(format!(
                "failed to read CSV file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(self.parse(&text)?)
    }
}

/// Comma-separated catalog parser.
#[derive(Debug, Clone)]
pub struct CsvRecordParser {
    /// Skip the first data-bearing line when its first cell is `brand` or
    /// `manufacturer`.
    pub detect_header: bool,
}

impl Default for CsvRecordParser {
    fn default() -> Self {
        Self {
            detect_header: true,
        }
    }
}

impl CsvRecordParser {
    pub fn new(detect_header: bool) -> Self {
        Self { detect_header }
    }
}

impl RecordParser for CsvRecordParser {
    fn parse(&self, text: &str) -> std::result::Result<Vec<Record>, FormatError> {
        let mut records = Vec::new();
        let mut seen_data_line = false;

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;

            if line.trim().is_empty() || is_comment(line) {
                continue;
            }

            let cells = split_cells(line).map_err(|cause| FormatError {
                line: line_number,
                cause,
            })?;

            // Only the first non-blank, non-comment line may be a header, even
            // when that line is then skipped for its blank first cell.
            let is_first_data_line = !seen_data_line;
            seen_data_line = true;

            let first = cells.first().map(|c| c.trim()).unwrap_or_default();
            if first.is_empty() {
                continue;
            }

            if self.detect_header && is_first_data_line && is_header(first) {
                continue;
            }

            let record = record_from_cells(&cells).map_err(|cause| FormatError {
                line: line_number,
                cause,
            })?;
            records.push(record);
        }

        Ok(records)
    }
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

fn is_header(first_cell: &str) -> bool {
    let cell = first_cell.trim().to_lowercase();
    HEADER_MARKERS.contains(&cell.as_str())
}

fn record_from_cells(cells: &[String]) -> std::result::Result<Record, FormatErrorCause> {
    if cells.len() < REQUIRED_COLUMNS {
        return Err(FormatErrorCause::InsufficientColumns {
            expected: REQUIRED_COLUMNS,
            found: cells.len(),
        });
    }

    let optional = |index: usize| cells.get(index).filter(|c| !c.trim().is_empty()).cloned();

    let record = Record::new(RecordFields {
        brand: cells[0].clone(),
        material_type: cells[1].clone(),
        color: cells[2].clone(),
        temp_hotend: cells[3].clone(),
        temp_bed: cells[4].clone(),
        brand_size: optional(5),
        type_size: optional(6),
        color_size: optional(7),
    })?;

    Ok(record)
}
