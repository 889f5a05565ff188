//! Taxonav - A searchable, single-selection taxonomy tree browser
//!
//! This library models a three-level taxonomy (category, subcategory,
//! record type) together with the state machine that drives browsing it:
//! one globally exclusive selection, per-node expansion, and a debounced
//! case-insensitive search that filters the tree while keeping ancestors.

use thiserror::Error;

pub mod cli;
pub mod completions;
pub mod config;
pub mod output;
pub mod search;
pub mod session;
pub mod source;
pub mod state;
pub mod taxonomy;
pub mod ui;
pub mod view;

#[cfg(test)]
pub mod testing;

pub use session::{LoadState, Session};
pub use source::{LoadFailure, TaxonomySource};
pub use state::{SelectedItem, TreeState};
pub use taxonomy::{NodeKind, NodePath, Taxonomy, TaxonomyStore};

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum TaxonavError {
    /// The taxonomy could not be loaded
    #[error("Failed to load taxonomy: {0}")]
    LoadError(#[from] source::LoadFailure),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Terminal UI error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
