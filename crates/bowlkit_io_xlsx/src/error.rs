//! Error type shared by every export stage.

use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Failure raised while building, encoding or delivering an export.
///
/// An empty record batch is not an error; it is a silent no-op.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The xlsx writer rejected a cell, the sheet setup or serialization.
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] XlsxError),

    /// Matrix does not fit a single worksheet.
    #[error("Excel limit exceeded: {rows} rows x {cols} columns does not fit one sheet")]
    SheetLimitExceeded {
        /// Total matrix rows.
        rows: usize,
        /// Widest row length.
        cols: usize,
    },

    /// Row or column index does not fit the writer's index type.
    #[error("{0}")]
    IndexOverflow(String),

    /// Delivery file name cannot be used by the target.
    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    /// The delivery target failed to persist the payload.
    #[error("Failed to deliver {}: {source}", .path.display())]
    Delivery {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The log file could not be opened.
    #[error("Failed to open log file {}: {source}", .path.display())]
    LogFile {
        /// Log file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Records could not be derived from a frame, IPC payload or JSON text.
    #[error("Record source error: {0}")]
    Source(String),

    /// Export options are out of range.
    #[error("Invalid export options: {0}")]
    InvalidOptions(String),
}

impl From<polars::prelude::PolarsError> for ExportError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        ExportError::Source(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Source(err.to_string())
    }
}
