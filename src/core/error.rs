//! Error types for the converter

use thiserror::Error;

/// Main error type for the converter
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid vox file: {0}")]
    Format(String),

    #[error("truncated vox file: {0}")]
    Truncated(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("structure document error: {0}")]
    Document(String),
}
