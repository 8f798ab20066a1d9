//! Shell completions generation.
//!
//! `foundry completions <SHELL>` converts the command registry into a
//! `clap::Command` tree and lets `clap_complete` write the script, so the
//! completions always match what the dispatcher accepts.

use clap::{Arg, ArgAction, Command, CommandFactory, ValueEnum};
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::cli::help::BIN_NAME;
use crate::cli::registry::{ArgKind, ArgSpec, Registry, Subcommand};
use crate::error::{FoundryError, Result};

/// Generate a completion script for `shell`.
pub fn generate(registry: &Registry, shell: &str) -> Result<String> {
    let shell: Shell = shell.parse().map_err(|_| FoundryError::InvalidValue {
        name: "<SHELL>".to_string(),
        message: format!("'{}' is not one of {}", shell, shell_names().join(", ")),
    })?;

    let mut cmd = to_clap(registry);
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut buf);
    String::from_utf8(buf)
        .map_err(|e| anyhow::anyhow!("completion script is not UTF-8: {}", e).into())
}

/// Help text for the `completions` built-in.
pub fn render_help() -> String {
    format!(
        "Generate a shell completion script\n\n\
         Usage: {bin} completions <SHELL>\n\n\
         Arguments:\n  <SHELL>  One of: {shells}\n\n\
         Example:\n  {bin} completions zsh > ~/.zfunc/_{bin}\n",
        bin = BIN_NAME,
        shells = shell_names().join(", ")
    )
}

fn shell_names() -> Vec<String> {
    Shell::value_variants()
        .iter()
        .filter_map(|s| s.to_possible_value())
        .map(|v| v.get_name().to_string())
        .collect()
}

/// Mirror the registry as a clap command tree.
pub fn to_clap(registry: &Registry) -> Command {
    let globals: Vec<Arg> = Cli::command()
        .get_arguments()
        .filter(|arg| !arg.is_positional())
        .cloned()
        .collect();

    let mut root = Command::new(BIN_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .args(globals);

    for group in registry.list_groups() {
        let cmd = match group.direct_subcommand() {
            Some(sub) => with_args(Command::new(group.name), sub),
            None => group.subcommands.iter().fold(
                Command::new(group.name).subcommand_required(true),
                |cmd, sub| cmd.subcommand(with_args(Command::new(sub.name), sub)),
            ),
        };
        root = root.subcommand(cmd.about(group.summary));
    }

    for alias in registry.aliases() {
        if let Some((_, sub)) = registry.resolve_alias(alias.token) {
            root = root.subcommand(
                with_args(Command::new(alias.token), sub)
                    .about(format!("Alias for '{} {}'", alias.group, alias.subcommand)),
            );
        }
    }

    root.subcommand(
        Command::new("completions")
            .about("Generate a shell completion script")
            .arg(
                Arg::new("shell")
                    .required(true)
                    .value_parser(clap::builder::EnumValueParser::<Shell>::new()),
            ),
    )
}

fn with_args(cmd: Command, sub: &Subcommand) -> Command {
    let cmd = cmd.about(sub.summary);
    sub.args.iter().fold(cmd, |cmd, spec| cmd.arg(to_arg(spec)))
}

fn to_arg(spec: &ArgSpec) -> Arg {
    let value_name = spec.placeholder.trim_matches(|c| c == '<' || c == '>');
    let arg = Arg::new(spec.name).help(spec.help).required(spec.required);

    match spec.kind {
        ArgKind::Switch => arg.long(spec.name).action(ArgAction::SetTrue),
        ArgKind::Value => arg
            .long(spec.name)
            .value_name(value_name)
            .action(if spec.repeatable {
                ArgAction::Append
            } else {
                ArgAction::Set
            }),
        ArgKind::Positional => arg.value_name(value_name),
        ArgKind::Variadic => arg
            .value_name(value_name)
            .num_args(1..)
            .action(ArgAction::Append),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::builtin_registry;

    #[test]
    fn bash_script_covers_groups() {
        let registry = builtin_registry().unwrap();
        let script = generate(&registry, "bash").unwrap();
        assert!(script.contains("foundry"));
        assert!(script.contains("complete"));
        assert!(script.contains("screener"));
        assert!(script.contains("update-status"));
    }

    #[test]
    fn zsh_and_fish_scripts() {
        let registry = builtin_registry().unwrap();
        assert!(generate(&registry, "zsh").unwrap().contains("foundry"));
        assert!(generate(&registry, "fish").unwrap().contains("implementation"));
    }

    #[test]
    fn unknown_shell_is_usage_error() {
        let registry = builtin_registry().unwrap();
        let err = generate(&registry, "tcsh").unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("bash"));
    }

    #[test]
    fn clap_tree_mirrors_registry() {
        let registry = builtin_registry().unwrap();
        let cmd = to_clap(&registry);
        for group in registry.list_groups() {
            assert!(cmd.find_subcommand(group.name).is_some(), "{}", group.name);
        }
        assert!(cmd.find_subcommand("login").is_some());
        let api = cmd.find_subcommand("api").unwrap();
        assert!(api.get_arguments().any(|a| a.get_id() == "header"));
    }

    #[test]
    fn help_lists_shells() {
        let text = render_help();
        assert!(text.contains("Usage: foundry completions <SHELL>"));
        assert!(text.contains("zsh"));
    }
}
