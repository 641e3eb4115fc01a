//! Error types for the scatter plot pipeline.
//!
//! Pipeline stages that can fail return [`ScatterError`]. The binary and the
//! adapter wrap these with `anyhow` context.

use thiserror::Error;

/// Errors raised while loading tables, resolving columns or reading options.
#[derive(Debug, Error)]
pub enum ScatterError {
    /// A field selection names a column the table does not have.
    #[error("Column '{0}' not found in table")]
    UnknownColumn(String),

    /// A field selection points past the last column.
    #[error("Column index {index} out of range (table has {width} columns)")]
    ColumnOutOfRange { index: usize, width: usize },

    /// Table data is structurally invalid.
    #[error("Invalid table data: {0}")]
    InvalidTable(String),

    /// A color literal could not be parsed.
    #[error("Invalid color '{0}'")]
    InvalidColor(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Delimited text could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying IO failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScatterError>;
