//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for taxonav using the `clap` crate.
//!
//! # Commands
//!
//! - **browse**: Interactive tree browser (default)
//! - **search**: Print the tree filtered by a query
//! - **tree**: Print the whole tree with line ids
//! - **select**: Resolve a line id to the item it names
//! - **config**: Show or change configuration
//! - **completions**: Generate shell completion scripts
//!
//! Every command that reads a taxonomy accepts `--fixture`, `--file <PATH>`
//! or `--endpoint <URL>` to override the configured source.
//!
//! # Examples
//!
//! ```
//! use taxonav::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["taxonav", "search", "tax", "--fixture"]);
//! assert!(matches!(cli.get_command(), Commands::Search { .. }));
//! ```

use crate::source::SourceKind;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "taxonav")]
#[command(about = "Browse, search and select from a record taxonomy", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log debug output to stderr (repeat for trace)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Taxonomy source overrides shared by every reading command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceArgs {
    /// Use the built-in taxonomy
    #[arg(long, conflicts_with_all = ["file", "endpoint"])]
    pub fixture: bool,

    /// Load the taxonomy from a local JSON file
    #[arg(long, value_name = "PATH", conflicts_with = "endpoint")]
    pub file: Option<PathBuf>,

    /// Fetch the taxonomy from this URL
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,
}

impl SourceArgs {
    /// The source requested on the command line, if any
    #[must_use]
    pub fn source_kind(&self) -> Option<SourceKind> {
        if self.fixture {
            Some(SourceKind::Fixture)
        } else if let Some(path) = &self.file {
            Some(SourceKind::File(path.clone()))
        } else {
            self.endpoint.clone().map(SourceKind::Remote)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the interactive tree browser (default)
    #[command(visible_alias = "b")]
    Browse {
        /// Initial search query
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the tree filtered by a query, with matches highlighted
    #[command(visible_alias = "s")]
    Search {
        /// Case-insensitive substring to look for
        #[arg(value_name = "QUERY")]
        query: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the whole tree with line ids
    #[command(visible_alias = "t")]
    Tree {
        /// Show subcategories and record types too
        #[arg(short = 'e', long)]
        expanded: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Resolve a line id and print the item it names
    Select {
        /// Line id as shown by `taxonav tree`
        #[arg(value_name = "LINE_ID")]
        line_id: usize,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the path of the configuration file
    Path,

    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., endpoint=https://example.com/api/taxonomy)
        #[arg(value_name = "KEY=VALUE")]
        #[cfg_attr(
            feature = "dynamic-completions",
            arg(add = clap_complete::engine::ArgValueCompleter::new(crate::completions::complete_config_settings))
        )]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., debounce_ms)
        #[arg(value_name = "KEY")]
        #[arg(value_parser = clap::builder::PossibleValuesParser::new(crate::config::KEYS.iter().copied()))]
        key: String,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse {
            query: None,
            source: SourceArgs::default(),
        })
    }
}

impl Commands {
    /// Helper method to get the source override from commands that read a taxonomy
    #[must_use]
    pub fn get_source(&self) -> Option<SourceKind> {
        match self {
            Self::Browse { source, .. }
            | Self::Search { source, .. }
            | Self::Tree { source, .. }
            | Self::Select { source, .. } => source.source_kind(),
            _ => None,
        }
    }
}

/// Split a `KEY=VALUE` setting
///
/// Returns `None` when there is no `=` or the key is empty.
#[must_use]
pub fn parse_setting(setting: &str) -> Option<(&str, &str)> {
    let (key, value) = setting.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_browse() {
        let cli = Cli::parse_from(["taxonav"]);
        assert!(cli.command.is_none());
        assert!(matches!(
            cli.get_command(),
            Commands::Browse { query: None, .. }
        ));
    }

    #[test]
    fn test_parse_browse_alias_with_query() {
        let cli = Cli::parse_from(["taxonav", "b", "payroll"]);
        if let Some(Commands::Browse { query, .. }) = cli.command {
            assert_eq!(query.as_deref(), Some("payroll"));
        } else {
            panic!("Expected Browse command");
        }
    }

    #[test]
    fn test_parse_search_with_endpoint() {
        let cli = Cli::parse_from([
            "taxonav",
            "search",
            "tax",
            "--endpoint",
            "http://localhost:8080/api/taxonomy",
        ]);
        let command = cli.get_command();
        assert_eq!(
            command.get_source(),
            Some(SourceKind::Remote("http://localhost:8080/api/taxonomy".into()))
        );
    }

    #[test]
    fn test_parse_tree_with_file() {
        let cli = Cli::parse_from(["taxonav", "tree", "-e", "--file", "taxonomy.json"]);
        let command = cli.get_command();
        assert!(matches!(command, Commands::Tree { expanded: true, .. }));
        assert_eq!(
            command.get_source(),
            Some(SourceKind::File(PathBuf::from("taxonomy.json")))
        );
    }

    #[test]
    fn test_source_flags_conflict() {
        let result = Cli::try_parse_from(["taxonav", "tree", "--fixture", "--file", "x.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_source_flag_means_config() {
        let cli = Cli::parse_from(["taxonav", "select", "3"]);
        let command = cli.get_command();
        assert!(matches!(command, Commands::Select { line_id: 3, .. }));
        assert_eq!(command.get_source(), None);
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["taxonav", "tree", "-q", "-vv"]);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_config_get_rejects_unknown_key() {
        assert!(Cli::try_parse_from(["taxonav", "config", "get", "debounce_ms"]).is_ok());
        assert!(Cli::try_parse_from(["taxonav", "config", "get", "colour"]).is_err());
    }

    #[test]
    fn test_parse_setting() {
        assert_eq!(parse_setting("quiet=true"), Some(("quiet", "true")));
        assert_eq!(
            parse_setting("endpoint=http://h/x?a=b"),
            Some(("endpoint", "http://h/x?a=b"))
        );
        assert_eq!(parse_setting("endpoint="), Some(("endpoint", "")));
        assert_eq!(parse_setting("quiet"), None);
        assert_eq!(parse_setting("=true"), None);
    }
}
