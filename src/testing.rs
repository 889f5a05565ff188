//! Testing utilities for taxonav
//!
//! Shared fixtures for unit tests: the bundled taxonomy, a ready session and
//! a source that always fails.
//!
//! Only available when compiled with `cfg(test)`.

use crate::search::debounce::DEFAULT_WINDOW;
use crate::session::Session;
use crate::source::{LoadFailure, TaxonomySource};
use crate::taxonomy::{Taxonomy, fixture};
use ratatui::buffer::Buffer;

/// The bundled taxonomy
#[must_use]
pub fn sample_taxonomy() -> Taxonomy {
    fixture::taxonomy()
}

/// A session over the bundled taxonomy with the default debounce window
#[must_use]
pub fn sample_session() -> Session {
    Session::with_taxonomy(sample_taxonomy(), DEFAULT_WINDOW)
}

/// Rendered buffer as text, one line per row
#[must_use]
pub fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buf[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

/// A source whose server always answers 503
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingSource;

impl TaxonomySource for FailingSource {
    fn describe(&self) -> String {
        "failing test source".to_string()
    }

    fn load(&self) -> Result<Taxonomy, LoadFailure> {
        Err(LoadFailure::Status(503))
    }
}
