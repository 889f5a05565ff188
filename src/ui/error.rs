//! UI error types

use thiserror::Error;

/// Errors that can occur in UI operations
#[derive(Debug, Error)]
pub enum UiError {
    /// IO error while drawing or reading terminal events
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The background loader went away without reporting a result
    #[error("Taxonomy loader stopped unexpectedly")]
    LoaderDisconnected,
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
