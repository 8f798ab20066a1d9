//! Global CLI options.
//!
//! clap only parses the options that may appear before the command. The
//! command itself and everything after it are collected verbatim in
//! [`Cli::args`] and handed to the registry-driven dispatcher, which owns
//! subcommand parsing and `--help` rendering.

use clap::Parser;
use std::path::PathBuf;

use crate::ui::OutputMode;

/// Foundry - command-line client for the Foundry backend API.
#[derive(Debug, Parser)]
#[command(name = "foundry")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true, disable_help_subcommand = true)]
pub struct Cli {
    /// Base URL of the Foundry API
    #[arg(long, env = "FOUNDRY_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "FOUNDRY_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to config file (overrides $FOUNDRY_HOME/config.yml)
    #[arg(long, env = "FOUNDRY_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print command output and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Command and its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub args: Vec<String>,
}

impl Cli {
    /// Output mode selected by `--quiet` / `--verbose`.
    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_options_before_command() {
        let cli = Cli::parse_from([
            "foundry",
            "--api-url",
            "http://api.test",
            "--debug",
            "project",
            "list",
        ]);
        assert_eq!(cli.api_url.as_deref(), Some("http://api.test"));
        assert!(cli.debug);
        assert_eq!(cli.args, vec!["project", "list"]);
    }

    #[test]
    fn everything_after_command_is_passed_through() {
        let cli = Cli::parse_from([
            "foundry", "api", "GET", "/projects", "--raw", "--header", "X-A: 1", "--debug",
        ]);
        assert!(!cli.debug);
        assert_eq!(
            cli.args,
            vec!["api", "GET", "/projects", "--raw", "--header", "X-A: 1", "--debug"]
        );
    }

    #[test]
    fn help_flag_reaches_dispatcher() {
        let cli = Cli::parse_from(["foundry", "--help"]);
        assert_eq!(cli.args, vec!["--help"]);

        let cli = Cli::parse_from(["foundry", "-h"]);
        assert_eq!(cli.args, vec!["-h"]);
    }

    #[test]
    fn no_args_is_empty() {
        let cli = Cli::parse_from(["foundry"]);
        assert!(cli.args.is_empty());
    }

    #[test]
    fn output_mode_from_flags() {
        assert_eq!(
            Cli::parse_from(["foundry", "-q"]).output_mode(),
            OutputMode::Quiet
        );
        assert_eq!(
            Cli::parse_from(["foundry", "--verbose"]).output_mode(),
            OutputMode::Verbose
        );
        assert_eq!(
            Cli::parse_from(["foundry"]).output_mode(),
            OutputMode::Normal
        );
    }
}
