//! Taxonav CLI application entry point
//!
//! Browse, search and select from a three-level record taxonomy.
//!
//! # Usage
//!
//! ```bash
//! # Browse interactively (default command)
//! taxonav
//! taxonav browse payroll
//!
//! # Print matches for a query
//! taxonav search "tax"
//!
//! # Print the whole tree with line ids, then resolve one
//! taxonav tree --expanded
//! taxonav select 12
//!
//! # Use a remote endpoint
//! taxonav config set source=remote
//! taxonav config set endpoint=https://example.com/api/taxonomy
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/taxonav/config.toml` on Linux) and created on first run.
//!
//! # Logging
//!
//! Set `RUST_LOG` or pass `-v` to log to stderr. The interactive browser owns
//! the terminal, so it only logs when `TAXONAV_LOG_FILE` names a file.

use clap::CommandFactory;
use std::fs::File;
use std::io;
use std::sync::{Arc, Mutex};
use taxonav::{
    TaxonavError,
    cli::{Cli, Commands, ConfigCommands, parse_setting},
    completions,
    config::TaxonavConfig,
    output,
    session::Session,
    source::{SourceKind, TaxonomySource},
    state::TreeState,
    taxonomy::{LineIds, Taxonomy, TaxonomyStore},
    ui::Browser,
    view::visible_rows,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, TaxonavError>;

/// Environment variable naming a log file for the interactive browser
const LOG_FILE_ENV: &str = "TAXONAV_LOG_FILE";

/// Install the tracing subscriber
///
/// `RUST_LOG` wins over `-v`. While the browser runs, logs go to
/// `TAXONAV_LOG_FILE` or nowhere.
fn init_logging(verbose: u8, interactive: bool) -> Result<()> {
    let default_directive = match verbose {
        0 => "warn",
        1 => "taxonav=debug",
        _ => "taxonav=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        return Ok(());
    }

    if let Some(path) = std::env::var_os(LOG_FILE_ENV) {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }
    Ok(())
}

/// Pick the source: command line first, then configuration
fn resolve_source(command: &Commands, config: &TaxonavConfig) -> Result<SourceKind> {
    match command.get_source() {
        Some(kind) => Ok(kind),
        None => Ok(config.source_kind()?),
    }
}

fn load_taxonomy(kind: SourceKind, config: &TaxonavConfig) -> Result<Taxonomy> {
    debug!(source = %kind, "loading taxonomy");
    let source = kind.build(config.request_timeout());
    Ok(source.load()?)
}

/// Run the interactive browser and print whatever was selected on exit
fn handle_browse_command(
    kind: SourceKind,
    query: Option<&str>,
    config: &TaxonavConfig,
    quiet: bool,
) -> Result<()> {
    let source: Arc<dyn TaxonomySource> = Arc::from(kind.build(config.request_timeout()));
    let mut session = Session::new(config.debounce_window());

    let selected = Browser::new().run(&mut session, source, query)?;

    if let Some(item) = selected {
        println!("{}", output::format_selected(&item, quiet));
    }
    Ok(())
}

/// Print the tree filtered by `query`
fn handle_search_command(taxonomy: &Taxonomy, query: &str, quiet: bool) -> Result<()> {
    let line_ids = LineIds::build(taxonomy);
    let rows = visible_rows(taxonomy, &TreeState::new(), &line_ids, Some(query));

    if rows.is_empty() {
        if !quiet {
            println!("No matches for \"{query}\"");
        }
        return Ok(());
    }

    println!("{}", output::format_rows(&rows, quiet));
    Ok(())
}

/// Print the tree, optionally with every node expanded
fn handle_tree_command(taxonomy: &Taxonomy, expanded: bool, quiet: bool) -> Result<()> {
    let line_ids = LineIds::build(taxonomy);
    let state = if expanded {
        TreeState::new().expanded_all(taxonomy)
    } else {
        TreeState::new()
    };

    let rows = visible_rows(taxonomy, &state, &line_ids, None);
    if rows.is_empty() {
        if !quiet {
            println!("The taxonomy is empty");
        }
        return Ok(());
    }

    println!("{}", output::format_rows(&rows, quiet));
    Ok(())
}

/// Select the node at `line_id` and print it
fn handle_select_command(taxonomy: Taxonomy, line_id: usize, quiet: bool) -> Result<()> {
    let mut store = TaxonomyStore::new(taxonomy);
    let path = store
        .line_ids()
        .path_of(line_id)
        .cloned()
        .ok_or_else(|| {
            TaxonavError::InvalidInput(format!(
                "No node has line id {line_id}. Use 'taxonav tree --expanded' to list them"
            ))
        })?;

    store.update(|taxonomy, state| state.select(taxonomy, path));

    let item = store.selected_item().ok_or_else(|| {
        TaxonavError::InvalidInput(format!("Line id {line_id} could not be selected"))
    })?;
    println!("{}", output::format_selected(&item, quiet));
    Ok(())
}

/// Handle config subcommands
///
/// # Errors
///
/// Returns `TaxonavError` if the configuration key is invalid, value parsing
/// fails, or configuration save fails.
fn handle_config_command(mut config: TaxonavConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let rendered = toml::to_string_pretty(&config).map_err(|e| {
                TaxonavError::InvalidInput(format!("Failed to render configuration: {e}"))
            })?;
            print!("{rendered}");
        }
        ConfigCommands::Path => {
            println!("{}", TaxonavConfig::config_path()?.display());
        }
        ConfigCommands::Set { setting } => {
            let (key, value) = parse_setting(setting).ok_or_else(|| {
                TaxonavError::InvalidInput("Invalid format. Use: taxonav config set key=value".into())
            })?;

            config.set(key, value)?;
            config.save()?;
            if !quiet {
                println!("Set {key} = {}", config.get(key)?);
            }
        }
        ConfigCommands::Get { key } => {
            println!("{}", config.get(key)?);
        }
    }
    Ok(())
}

/// Main entry point for the taxonav application
///
/// Loads configuration, parses command-line arguments, and dispatches to the
/// appropriate command handler.
///
/// # Errors
///
/// Returns `TaxonavError` if configuration loading fails, the taxonomy cannot
/// be loaded, or any command handler returns an error.
fn main() -> Result<()> {
    #[cfg(feature = "dynamic-completions")]
    completions::init_dynamic_completions(Cli::command);

    let cli = Cli::parse_args();
    let command = cli.get_command();

    init_logging(cli.verbose, matches!(command, Commands::Browse { .. }))?;

    let config = TaxonavConfig::load()?;
    let quiet = cli.quiet || config.quiet;

    match &command {
        Commands::Config { command } => handle_config_command(config, command, quiet)?,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            completions::generate_static(*shell, &mut cmd, &mut io::stdout());
        }
        Commands::Browse { query, .. } => {
            let kind = resolve_source(&command, &config)?;
            handle_browse_command(kind, query.as_deref(), &config, quiet)?;
        }
        Commands::Search { query, .. } => {
            let taxonomy = load_taxonomy(resolve_source(&command, &config)?, &config)?;
            handle_search_command(&taxonomy, query, quiet)?;
        }
        Commands::Tree { expanded, .. } => {
            let taxonomy = load_taxonomy(resolve_source(&command, &config)?, &config)?;
            handle_tree_command(&taxonomy, *expanded, quiet)?;
        }
        Commands::Select { line_id, .. } => {
            let taxonomy = load_taxonomy(resolve_source(&command, &config)?, &config)?;
            handle_select_command(taxonomy, *line_id, quiet)?;
        }
    }

    Ok(())
}
