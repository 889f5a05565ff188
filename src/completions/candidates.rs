//! Static completion candidates
//!
//! These candidates are always available (no feature flag required) because
//! they don't need the network or the file system.

/// A completion suggestion returned to the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The value to insert
    pub value: String,
    /// Optional help text shown alongside
    pub help: Option<String>,
}

impl Candidate {
    /// Create a new candidate with just a value
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            help: None,
        }
    }

    /// Add help text to the candidate
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Known configuration keys for `config set/get`
#[must_use]
pub fn config_keys() -> Vec<Candidate> {
    vec![
        Candidate::new("source").with_help("Default taxonomy source: 'fixture' or 'remote'"),
        Candidate::new("endpoint").with_help("Taxonomy endpoint URL"),
        Candidate::new("debounce_ms").with_help("Search debounce window in milliseconds"),
        Candidate::new("request_timeout_secs").with_help("Remote request timeout in seconds"),
        Candidate::new("quiet").with_help("Suppress informational output"),
    ]
}

/// Suggested values for a configuration key
#[must_use]
pub fn config_values(key: &str) -> Vec<Candidate> {
    match key {
        "source" => vec![
            Candidate::new("fixture").with_help("Built-in taxonomy"),
            Candidate::new("remote").with_help("Configured endpoint"),
        ],
        "quiet" => vec![Candidate::new("true"), Candidate::new("false")],
        "debounce_ms" => vec![Candidate::new("150").with_help("default")],
        "request_timeout_secs" => vec![Candidate::new("10").with_help("default")],
        _ => Vec::new(),
    }
}

/// Candidates for a `KEY=VALUE` argument given what has been typed so far
#[must_use]
pub fn config_settings(current: &str) -> Vec<Candidate> {
    match current.split_once('=') {
        None => config_keys()
            .into_iter()
            .filter(|c| c.value.starts_with(current))
            .map(|c| Candidate {
                value: format!("{}=", c.value),
                help: c.help,
            })
            .collect(),
        Some((key, value)) => config_values(key)
            .into_iter()
            .filter(|c| c.value.starts_with(value))
            .map(|c| Candidate {
                value: format!("{key}={}", c.value),
                help: c.help,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KEYS;

    #[test]
    fn test_config_keys_match_known_keys() {
        let keys: Vec<String> = config_keys().into_iter().map(|c| c.value).collect();
        assert_eq!(keys, KEYS);
    }

    #[test]
    fn test_settings_complete_key_then_value() {
        let by_key = config_settings("deb");
        assert_eq!(by_key.len(), 1);
        assert_eq!(by_key[0].value, "debounce_ms=");

        let by_value: Vec<String> = config_settings("source=r")
            .into_iter()
            .map(|c| c.value)
            .collect();
        assert_eq!(by_value, vec!["source=remote"]);
    }

    #[test]
    fn test_unknown_key_has_no_values() {
        assert!(config_settings("colour=").is_empty());
    }
}
