//! Tabular file ingestion.
//!
//! Reads `.csv` / `.xlsx` / `.xls` sheets into uniform string-typed tables.
//! Typing and normalization happen later, in the recon layer.

mod sheet;

pub use sheet::*;

use std::collections::HashMap;

use thiserror::Error;

/// Ingestion errors.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (expected .csv, .xlsx or .xls)")]
    UnsupportedFormat(String),

    #[error("sheet has no header row: {0}")]
    EmptySheet(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel parse error: {0}")]
    Excel(String),
}

pub type IngestResult<T> = Result<T, IngestError>;

/// A parsed sheet: trimmed headers plus string-typed rows.
///
/// Fully blank rows are skipped at parse time. Cells are kept as trimmed
/// strings regardless of the source cell type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Column headers, in sheet order
    pub headers: Vec<String>,
    /// Rows as column→value maps
    pub rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether a header with this exact name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|header| header == name)
    }
}
