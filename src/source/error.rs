//! Taxonomy loading errors
//!
//! Every way a load can fail collapses into [`LoadFailure`]. A failed load
//! never touches the store that was loaded before it. Reloading is always
//! offered, but only transport failures are likely to go away on their own;
//! a malformed payload stays malformed until the source is fixed.
//!
//! # Error Types
//!
//! - **`Http`**: transport-level failure (DNS, connection, timeout)
//! - **`Status`**: the server answered with a non-success status
//! - **`Io`**: the body or a local file could not be read
//! - **`Json`**: the payload is not valid JSON or has the wrong shape
//! - **`InvalidFormat`**: the payload is not an array after unwrapping `data`
//! - **`MissingId`**: a record carries neither `id` nor `_id`
//! - **`DuplicateId`**: two siblings share an id

use thiserror::Error;

/// Failure to load a taxonomy from any source
#[derive(Debug, Error)]
pub enum LoadFailure {
    /// Request could not be completed
    #[error("Failed to fetch taxonomy data: {0}")]
    Http(String),

    /// Server responded with a non-success status
    #[error("Failed to fetch taxonomy data: server responded with status {0}")]
    Status(u16),

    /// Body or file could not be read
    #[error("Failed to read taxonomy data: {0}")]
    Io(#[from] std::io::Error),

    /// Payload is not valid JSON for a taxonomy
    #[error("Malformed taxonomy data: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload is not an array of categories
    #[error("Invalid data format received: {0}")]
    InvalidFormat(String),

    /// A record has no usable identifier
    #[error("Invalid data format received: {kind} '{name}' has no id")]
    MissingId { kind: &'static str, name: String },

    /// Two siblings share an id
    #[error("Invalid data format received: duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },
}

impl LoadFailure {
    /// Whether asking the same source again may succeed
    ///
    /// Transport errors, server-side statuses and rate limiting are
    /// transient. A payload that parsed but was rejected is not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Io(_) => true,
            Self::Status(code) => *code >= 500 || *code == 408 || *code == 429,
            Self::Json(_) | Self::InvalidFormat(_) | Self::MissingId { .. } | Self::DuplicateId { .. } => {
                false
            }
        }
    }
}

impl From<ureq::Error> for LoadFailure {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => Self::Status(code),
            ureq::Error::Transport(transport) => Self::Http(transport.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
