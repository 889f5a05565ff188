//! Free-text search over the taxonomy
//!
//! - [`debounce`]: keystroke debouncing as an explicit state machine
//! - [`filter`]: ancestor-preserving projection of the tree for a query
//! - [`highlight`]: case-insensitive match spans for display names
//!
//! Matching is a plain case-insensitive substring test. A query that is
//! empty or only whitespace counts as no query at all.

pub mod debounce;
pub mod filter;
pub mod highlight;

pub use debounce::{Debouncer, SearchEffect, SearchEvent, SearchPhase};
pub use filter::{CategoryMatch, SubcategoryMatch, filter_taxonomy};
pub use highlight::{Segment, contains_ignore_case, highlight};

/// Whether `query` should be treated as empty
///
/// # Examples
/// ```
/// # use taxonav::search::is_blank;
/// assert!(is_blank(""));
/// assert!(is_blank("  \t"));
/// assert!(!is_blank(" tax "));
/// ```
#[must_use]
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}
