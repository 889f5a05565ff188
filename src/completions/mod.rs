//! Shell completion support for taxonav
//!
//! - **Static completions** (always available): subcommands, flags, shells
//!   and the keys accepted by `config get`
//! - **Dynamic completions** (behind the `dynamic-completions` feature):
//!   `KEY=VALUE` suggestions for `config set`

mod candidates;

pub use candidates::*;

use clap::Command;
use clap_complete::Shell;
use std::io::Write;

/// Generate static shell completions into `buf`
pub fn generate_static<W: Write>(shell: Shell, cmd: &mut Command, buf: &mut W) {
    clap_complete::generate(shell, cmd, cmd.get_name().to_string(), buf);
}

/// Initialize dynamic completion system
///
/// Call this at the start of main() before argument parsing. It answers
/// completion requests (signalled through the `COMPLETE` environment
/// variable) and exits; otherwise it returns and normal execution continues.
#[cfg(feature = "dynamic-completions")]
pub fn init_dynamic_completions<F: Fn() -> Command>(factory: F) {
    clap_complete::CompleteEnv::with_factory(factory).complete();
}

/// Complete the `KEY=VALUE` argument of `config set`
#[cfg(feature = "dynamic-completions")]
#[must_use]
pub fn complete_config_settings(
    current: &std::ffi::OsStr,
) -> Vec<clap_complete::engine::CompletionCandidate> {
    use clap_complete::engine::CompletionCandidate;

    let Some(current) = current.to_str() else {
        return Vec::new();
    };

    config_settings(current)
        .into_iter()
        .map(|c| {
            let mut candidate = CompletionCandidate::new(c.value);
            if let Some(help) = c.help {
                candidate = candidate.help(Some(help.into()));
            }
            candidate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::CommandFactory;

    #[test]
    fn test_generate_bash_mentions_subcommands() {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        generate_static(Shell::Bash, &mut cmd, &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("taxonav"));
        assert!(script.contains("search"));
        assert!(script.contains("completions"));
    }
}
