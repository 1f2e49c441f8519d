//! Error types for workbook extraction

use std::path::PathBuf;
use thiserror::Error;

/// Convenience result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Error type returned by the loader, reader and output stages.
///
/// Opening the workbook and reading a sheet fail with distinct variants so a
/// caller can decide whether the remaining sheets are still worth processing.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The workbook could not be opened (missing file, unsupported or corrupted format).
    #[error("failed to open workbook '{}': {source}", path.display())]
    WorkbookOpen {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// A sheet listed by the workbook could not be read.
    #[error("failed to read sheet '{sheet}': {source}")]
    SheetRead {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    /// The aggregate could not be written to its output file.
    #[error("failed to write '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization of the aggregate failed.
    #[error("json error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing the report to the console failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is unreadable or malformed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ExtractError {
    /// Name of the sheet involved, if the error is tied to one.
    pub fn sheet(&self) -> Option<&str> {
        match self {
            ExtractError::SheetRead { sheet, .. } => Some(sheet),
            _ => None,
        }
    }

    /// Whether processing of further sheets is still possible after this error.
    pub fn is_sheet_local(&self) -> bool {
        matches!(self, ExtractError::SheetRead { .. })
    }
}
