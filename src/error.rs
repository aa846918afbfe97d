use std::path::PathBuf;

use thiserror::Error;

use crate::model::Role;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the failures that can occur while loading a workbook,
/// extracting a trial balance, or writing one back out.
///
/// Structural problems inside a sheet (no header row, missing columns, odd
/// cells) are not represented here: extraction always falls back to defaults.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the normalized document cannot be parsed or serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// The source bytes could not be loaded as a spreadsheet.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a workbook is readable but unusable as a whole.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when the requested worksheet does not exist.
    #[error("worksheet '{0}' not found in workbook")]
    MissingSheet(String),

    /// Raised when the caller's role may not run an extraction.
    #[error("role {0} is not permitted to extract trial balances")]
    PermissionDenied(Role),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
