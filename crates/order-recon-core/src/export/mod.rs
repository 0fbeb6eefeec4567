//! Report presentation: display column selection, table rendering, CSV/JSON.

mod report;

pub use report::*;

use thiserror::Error;

/// Export errors.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV writer error: {0}")]
    Write(String),
}

pub type ExportResult<T> = Result<T, ExportError>;
