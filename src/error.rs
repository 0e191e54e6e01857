//! Error types for notebook loading.

use thiserror::Error;

/// Errors produced while loading a notebook document.
#[derive(Error, Debug)]
pub enum NotebookError {
    /// The notebook file could not be read.
    #[error("Failed to read notebook file: {0}")]
    Io(#[from] std::io::Error),

    /// The notebook is not valid JSON or lacks the expected shape.
    #[error("Failed to parse notebook JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for notebook loading.
pub type Result<T> = std::result::Result<T, NotebookError>;
