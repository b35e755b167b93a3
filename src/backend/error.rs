// ==========================================
// Quarry Ops Import - Backend Error Types
// ==========================================
// Errors raised by the remote gateway. A Rejected error carries the
// backend's message verbatim so it can be surfaced to the user.
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Transport(String),

    #[error("backend rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("backend response could not be decoded: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

/// Result type alias for gateway calls.
pub type BackendResult<T> = Result<T, BackendError>;
