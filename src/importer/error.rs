// ==========================================
// Quarry Ops Import - Parse Error Types
// ==========================================
// Errors raised while decoding an uploaded spreadsheet. A parse
// failure is always a single condition; no partial row sets escape.
// ==========================================

use thiserror::Error;

/// Spreadsheet decoding errors.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("workbook could not be read: {0}")]
    WorkbookRead(String),

    #[error("workbook has no sheet at index {index}")]
    MissingSheet { index: usize },

    #[error("sheet at index {index} has no occupied cells")]
    EmptySheet { index: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for the parse stage.
pub type ImportResult<T> = Result<T, ImportError>;
