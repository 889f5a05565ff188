//! Configuration module for taxonav
//!
//! Manages where the taxonomy comes from and how the browser behaves.
//! Configuration is stored in the user's config directory and can be
//! overridden per run with `TAXONAV_*` environment variables
//! (e.g. `TAXONAV_ENDPOINT`, `TAXONAV_DEBOUNCE_MS`).

use crate::source::SourceKind;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Keys accepted by `config get` / `config set`
pub const KEYS: &[&str] = &["source", "endpoint", "debounce_ms", "request_timeout_secs", "quiet"];

/// Where the taxonomy is loaded from by default
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// The bundled taxonomy
    #[default]
    Fixture,
    /// The configured remote endpoint
    Remote,
}

const fn default_debounce_ms() -> u64 {
    150
}

const fn default_request_timeout_secs() -> u64 {
    10
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TaxonavConfig {
    /// Default taxonomy source
    #[serde(default)]
    pub source: SourceMode,

    /// Taxonomy endpoint URL used when `source = "remote"`
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Search debounce window in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Timeout for remote taxonomy requests in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl Default for TaxonavConfig {
    fn default() -> Self {
        Self {
            source: SourceMode::default(),
            endpoint: None,
            debounce_ms: default_debounce_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            quiet: false,
        }
    }
}

impl TaxonavConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("taxonav").join("config.toml"))
    }

    /// Load configuration from the user's config file, creating a default
    /// one if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, creating a default file if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to(path)?;
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(Environment::with_prefix("TAXONAV").try_parsing(true))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the user's config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or
    /// the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Debounce window for search input
    #[must_use]
    pub const fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Timeout for remote requests
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolve the configured default source
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `source = "remote"` but no endpoint is set.
    pub fn source_kind(&self) -> Result<SourceKind, ConfigError> {
        match self.source {
            SourceMode::Fixture => Ok(SourceKind::Fixture),
            SourceMode::Remote => self
                .endpoint
                .clone()
                .map(SourceKind::Remote)
                .ok_or_else(|| {
                    ConfigError::Message(
                        "source is 'remote' but no endpoint is configured (taxonav config set endpoint=<url>)"
                            .to_string(),
                    )
                }),
        }
    }

    /// Read a single setting as text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for unknown keys.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "source" => Ok(match self.source {
                SourceMode::Fixture => "fixture".to_string(),
                SourceMode::Remote => "remote".to_string(),
            }),
            "endpoint" => Ok(self.endpoint.clone().unwrap_or_default()),
            "debounce_ms" => Ok(self.debounce_ms.to_string()),
            "request_timeout_secs" => Ok(self.request_timeout_secs.to_string()),
            "quiet" => Ok(self.quiet.to_string()),
            _ => Err(ConfigError::NotFound(key.to_string())),
        }
    }

    /// Change a single setting from its text form (does not save)
    ///
    /// An empty `endpoint` value unsets the endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys or values that don't parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |expected: &str| {
            ConfigError::Message(format!("Invalid value for {key}: '{value}'. Expected {expected}"))
        };

        match key {
            "source" => {
                self.source = match value {
                    "fixture" => SourceMode::Fixture,
                    "remote" => SourceMode::Remote,
                    _ => return Err(invalid("'fixture' or 'remote'")),
                };
            }
            "endpoint" => {
                self.endpoint = (!value.is_empty()).then(|| value.to_string());
            }
            "debounce_ms" => {
                self.debounce_ms = value.parse().map_err(|_| invalid("a number of milliseconds"))?;
            }
            "request_timeout_secs" => {
                self.request_timeout_secs = value.parse().map_err(|_| invalid("a number of seconds"))?;
            }
            "quiet" => {
                self.quiet = value.parse().map_err(|_| invalid("'true' or 'false'"))?;
            }
            _ => return Err(ConfigError::NotFound(key.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
    use tempfile::TempDir;

    /// Serializes tests that read `TAXONAV_*` through `load_from`
    fn env_lock() -> MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    struct EnvVarGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl EnvVarGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let previous = env::var(key).ok();
            // SAFETY: every test touching TAXONAV_* holds `env_lock`
            unsafe {
                env::set_var(key, value);
            }
            Self { key, previous }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            match &self.previous {
                // SAFETY: see `EnvVarGuard::set`
                Some(value) => unsafe {
                    env::set_var(self.key, value);
                },
                None => unsafe {
                    env::remove_var(self.key);
                },
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = TaxonavConfig::default();
        assert_eq!(config.source, SourceMode::Fixture);
        assert!(config.endpoint.is_none());
        assert_eq!(config.debounce_window(), Duration::from_millis(150));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_load_creates_default_file() {
        let _lock = env_lock();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = TaxonavConfig::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.debounce_ms, 150);
    }

    #[test]
    fn test_save_and_reload() {
        let _lock = env_lock();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = TaxonavConfig::default();
        config.set("source", "remote").unwrap();
        config.set("endpoint", "https://example.com/api/taxonomy").unwrap();
        config.set("debounce_ms", "200").unwrap();
        config.save_to(&path).unwrap();

        let loaded = TaxonavConfig::load_from(&path).unwrap();
        assert_eq!(loaded.source, SourceMode::Remote);
        assert_eq!(loaded.endpoint.as_deref(), Some("https://example.com/api/taxonomy"));
        assert_eq!(loaded.debounce_ms, 200);
    }

    #[test]
    fn test_environment_overrides_file() {
        let _lock = env_lock();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "debounce_ms = 200\n").unwrap();

        let _debounce = EnvVarGuard::set("TAXONAV_DEBOUNCE_MS", "40");
        let _source = EnvVarGuard::set("TAXONAV_SOURCE", "remote");
        let _endpoint = EnvVarGuard::set("TAXONAV_ENDPOINT", "https://example.com/api/taxonomy");

        let config = TaxonavConfig::load_from(&path).unwrap();
        assert_eq!(config.debounce_window(), Duration::from_millis(40));
        assert_eq!(
            config.source_kind().unwrap(),
            SourceKind::Remote("https://example.com/api/taxonomy".to_string())
        );
    }

    #[test]
    fn test_environment_override_ends_with_guard() {
        let _lock = env_lock();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        {
            let _debounce = EnvVarGuard::set("TAXONAV_DEBOUNCE_MS", "40");
            assert_eq!(TaxonavConfig::load_from(&path).unwrap().debounce_ms, 40);
        }
        assert_eq!(TaxonavConfig::load_from(&path).unwrap().debounce_ms, 150);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let _lock = env_lock();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "quiet = true\n").unwrap();

        let config = TaxonavConfig::load_from(&path).unwrap();
        assert!(config.quiet);
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_remote_without_endpoint_is_error() {
        let mut config = TaxonavConfig::default();
        config.source = SourceMode::Remote;
        assert!(config.source_kind().is_err());

        config.endpoint = Some("http://localhost/t".to_string());
        assert_eq!(
            config.source_kind().unwrap(),
            SourceKind::Remote("http://localhost/t".to_string())
        );
    }

    #[test]
    fn test_get_and_set_roundtrip_for_every_key() {
        let mut config = TaxonavConfig::default();
        for (key, value) in [
            ("source", "remote"),
            ("endpoint", "http://x"),
            ("debounce_ms", "75"),
            ("request_timeout_secs", "3"),
            ("quiet", "true"),
        ] {
            assert!(KEYS.contains(&key));
            config.set(key, value).unwrap();
            assert_eq!(config.get(key).unwrap(), value);
        }
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = TaxonavConfig::default();
        assert!(config.set("debounce_ms", "fast").is_err());
        assert!(config.set("source", "ftp").is_err());
        assert!(config.set("quiet", "maybe").is_err());
        assert!(matches!(config.set("colour", "red"), Err(ConfigError::NotFound(_))));
        assert_eq!(config, TaxonavConfig::default());
    }

    #[test]
    fn test_empty_endpoint_unsets() {
        let mut config = TaxonavConfig::default();
        config.set("endpoint", "http://x").unwrap();
        config.set("endpoint", "").unwrap();
        assert!(config.endpoint.is_none());
    }
}
