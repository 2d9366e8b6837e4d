//! Error types for the memo core
//!
//! Validation and not-found failures abort an operation before anything is
//! persisted. I/O and JSON failures wrap the underlying error.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MemoError>;

#[derive(Debug, Error)]
pub enum MemoError {
    /// Input rejected before touching storage (empty content, duplicate name, bad import)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced memo, project or config entry does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MemoError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
