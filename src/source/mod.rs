//! Where a taxonomy comes from
//!
//! A [`TaxonomySource`] produces a fully normalized [`Taxonomy`] or a
//! [`LoadFailure`]. Sources never see the store; the caller decides what to
//! do with the result, so a failed load cannot disturb a tree that is
//! already on screen.
//!
//! - [`FixtureSource`]: the bundled taxonomy
//! - [`FileSource`]: a JSON file in the endpoint's format
//! - [`HttpSource`]: the remote taxonomy endpoint

pub mod error;
pub mod http;
pub mod ingest;

pub use error::LoadFailure;
pub use http::HttpSource;
pub use ingest::{ingest_value, parse_taxonomy};

use crate::taxonomy::{Taxonomy, fixture};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Anything that can produce a taxonomy
pub trait TaxonomySource: Send + Sync {
    /// Short description for status lines and logs
    fn describe(&self) -> String;

    /// Load and normalize the taxonomy
    ///
    /// # Errors
    ///
    /// Returns `LoadFailure` if the data cannot be fetched, read or parsed.
    fn load(&self) -> Result<Taxonomy, LoadFailure>;
}

/// The bundled taxonomy; never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSource;

impl TaxonomySource for FixtureSource {
    fn describe(&self) -> String {
        "built-in taxonomy".to_string()
    }

    fn load(&self) -> Result<Taxonomy, LoadFailure> {
        Ok(fixture::taxonomy())
    }
}

/// A local JSON file using the endpoint's payload format
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TaxonomySource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Taxonomy, LoadFailure> {
        let body = fs::read_to_string(&self.path)?;
        parse_taxonomy(&body)
    }
}

/// Which source to build, as chosen by config or command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Fixture,
    File(PathBuf),
    Remote(String),
}

impl SourceKind {
    /// Instantiate the source; `timeout` only applies to remote fetches
    #[must_use]
    pub fn build(self, timeout: Duration) -> Box<dyn TaxonomySource> {
        match self {
            Self::Fixture => Box::new(FixtureSource),
            Self::File(path) => Box::new(FileSource::new(path)),
            Self::Remote(endpoint) => Box::new(HttpSource::new(endpoint, timeout)),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixture => f.write_str("fixture"),
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Remote(endpoint) => write!(f, "remote {endpoint}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_fixture_source_loads() {
        let tax = FixtureSource.load().unwrap();
        assert_eq!(tax, fixture::taxonomy());
    }

    #[test]
    fn test_file_source_reads_wrapped_payload() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"data": [{{"_id": "x", "name": "X"}}]}}"#).unwrap();

        let tax = FileSource::new(file.path()).load().unwrap();
        assert_eq!(tax.categories()[0].id, "x");
    }

    #[test]
    fn test_missing_file_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path().join("missing.json"))
            .load()
            .unwrap_err();
        assert!(matches!(err, LoadFailure::Io(_)));
    }

    #[test]
    fn test_source_kind_builds_matching_source() {
        let source = SourceKind::Remote("http://localhost/t".to_string()).build(Duration::from_secs(1));
        assert_eq!(source.describe(), "http://localhost/t");
        assert_eq!(SourceKind::Fixture.build(Duration::ZERO).describe(), "built-in taxonomy");
    }
}
