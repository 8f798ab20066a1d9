//! Help text rendering.
//!
//! Three levels, all derived from the [`Registry`]:
//!
//! 1. **Root** (`foundry help`) lists every group, alias, and built-in
//! 2. **Group** (`foundry project --help`) lists the group's subcommands
//! 3. **Subcommand** (`foundry api --help`) shows the usage line and arguments
//!
//! Rendering is pure: no I/O, no handler calls, same output every time.

use clap::CommandFactory;

use super::args::Cli;
use super::registry::{ArgKind, ArgSpec, CommandGroup, Registry, Subcommand};

/// Binary name used in usage lines.
pub const BIN_NAME: &str = "foundry";

/// Help for the whole CLI.
pub fn render_root(registry: &Registry) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n{}\n\n",
        BIN_NAME,
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION")
    ));
    out.push_str(&format!(
        "Usage: {} [OPTIONS] <COMMAND> [ARGS]...\n\n",
        BIN_NAME
    ));

    let groups: Vec<(String, &str)> = registry
        .list_groups()
        .iter()
        .map(|g| (g.name.to_string(), g.summary))
        .collect();
    push_section(&mut out, "Commands", &groups);

    let aliases: Vec<(String, String)> = registry
        .aliases()
        .iter()
        .map(|a| {
            (
                a.token.to_string(),
                format!("Alias for '{} {}'", a.group, a.subcommand),
            )
        })
        .collect();
    if !aliases.is_empty() {
        let rows: Vec<(String, &str)> = aliases
            .iter()
            .map(|(token, desc)| (token.clone(), desc.as_str()))
            .collect();
        push_section(&mut out, "Aliases", &rows);
    }

    push_section(
        &mut out,
        "Other",
        &[
            (
                "help [COMMAND] [SUBCOMMAND]".to_string(),
                "Show help for a command",
            ),
            (
                "completions <SHELL>".to_string(),
                "Generate a shell completion script",
            ),
        ],
    );

    let options = global_options();
    let rows: Vec<(String, &str)> = options
        .iter()
        .map(|(label, help)| (label.clone(), help.as_str()))
        .collect();
    push_section(&mut out, "Options", &rows);

    out.push_str(&format!(
        "Run '{} <command> --help' for more information on a command.\n",
        BIN_NAME
    ));
    out
}

/// Help for one command group.
///
/// Direct groups have no subcommand listing; their subcommand help is shown.
pub fn render_group(registry: &Registry, group: &CommandGroup) -> String {
    if let Some(sub) = group.direct_subcommand() {
        return render_subcommand(registry, group, sub);
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n\n", group.summary));
    out.push_str(&format!(
        "Usage: {} {} <SUBCOMMAND> [ARGS]...\n\n",
        BIN_NAME, group.name
    ));

    let rows: Vec<(String, &str)> = group
        .subcommands
        .iter()
        .map(|s| (s.name.to_string(), s.summary))
        .collect();
    push_section(&mut out, "Subcommands", &rows);

    out.push_str(&format!(
        "Run '{} {} <subcommand> --help' for details.\n",
        BIN_NAME, group.name
    ));
    out
}

/// Help for one subcommand, including aliases that reach it.
pub fn render_subcommand(registry: &Registry, group: &CommandGroup, sub: &Subcommand) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", sub.summary));
    out.push_str(&format!("Usage: {}\n", usage_line(group, sub)));

    let aliases = registry.aliases_for(group.name, sub.name);
    if !aliases.is_empty() {
        let forms: Vec<String> = aliases
            .iter()
            .map(|a| format!("{} {}", BIN_NAME, a))
            .collect();
        out.push_str(&format!("Also:  {}\n", forms.join(", ")));
    }
    out.push('\n');

    let positionals: Vec<(String, &str)> = sub
        .positionals()
        .map(|a| (a.placeholder.to_string(), a.help))
        .collect();
    if !positionals.is_empty() {
        push_section(&mut out, "Arguments", &positionals);
    }

    let mut flags: Vec<(String, &str)> = sub.flags().map(|a| (flag_label(a), a.help)).collect();
    flags.push(("-h, --help".to_string(), "Print help"));
    push_section(&mut out, "Options", &flags);
    out
}

/// The `Usage:` line for a subcommand.
///
/// Positionals come first, then flags, each rendered by [`arg_usage`].
pub fn usage_line(group: &CommandGroup, sub: &Subcommand) -> String {
    let mut parts = vec![BIN_NAME.to_string(), group.name.to_string()];
    if !group.direct {
        parts.push(sub.name.to_string());
    }
    parts.extend(sub.positionals().map(arg_usage));
    parts.extend(sub.flags().map(arg_usage));
    parts.join(" ")
}

/// Usage fragment for one argument.
///
/// Required positionals are bare, optional ones bracketed, variadics get
/// `...`; flags show `--name <VALUE>` or `--name`, bracketed unless
/// required, with `...` when repeatable.
pub fn arg_usage(spec: &ArgSpec) -> String {
    let core = match spec.kind {
        ArgKind::Positional => spec.placeholder.to_string(),
        ArgKind::Variadic => format!("{}...", spec.placeholder),
        ArgKind::Value => format!("--{} {}", spec.name, spec.placeholder),
        ArgKind::Switch => format!("--{}", spec.name),
    };
    let mut text = if spec.required {
        core
    } else {
        format!("[{}]", core)
    };
    if spec.repeatable && spec.kind.is_flag() {
        text.push_str("...");
    }
    text
}

fn flag_label(spec: &ArgSpec) -> String {
    let mut label = match spec.kind {
        ArgKind::Value => format!("--{} {}", spec.name, spec.placeholder),
        _ => format!("--{}", spec.name),
    };
    if spec.required {
        label.push_str(" (required)");
    }
    if spec.repeatable {
        label.push_str(" (repeatable)");
    }
    label
}

/// Global options as declared on [`Cli`], so this list cannot go stale.
fn global_options() -> Vec<(String, String)> {
    let cmd = Cli::command();
    let mut rows: Vec<(String, String)> = cmd
        .get_arguments()
        .filter(|arg| !arg.is_positional() && !arg.is_hide_set())
        .map(|arg| {
            let mut label = String::new();
            if let Some(short) = arg.get_short() {
                label.push_str(&format!("-{}, ", short));
            }
            if let Some(long) = arg.get_long() {
                label.push_str(&format!("--{}", long));
            }
            if let Some(names) = arg.get_value_names() {
                for name in names {
                    label.push_str(&format!(" <{}>", name));
                }
            }
            let help = arg.get_help().map(|h| h.to_string()).unwrap_or_default();
            (label, help)
        })
        .collect();
    rows.push(("-h, --help".to_string(), "Print help".to_string()));
    rows
}

fn push_section(out: &mut String, title: &str, rows: &[(String, &str)]) {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    out.push_str(&format!("{}:\n", title));
    for (label, help) in rows {
        if help.is_empty() {
            out.push_str(&format!("  {}\n", label));
        } else {
            out.push_str(&format!("  {:width$}  {}\n", label, help, width = width));
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::builtin_registry;

    fn registry() -> Registry {
        builtin_registry().unwrap()
    }

    #[test]
    fn root_lists_every_group_and_alias() {
        let registry = registry();
        let text = render_root(&registry);
        for group in registry.list_groups() {
            assert!(text.contains(group.name), "missing group {}", group.name);
            assert!(text.contains(group.summary));
        }
        assert!(text.contains("login"));
        assert!(text.contains("logout"));
        assert!(text.contains("Alias for 'auth login'"));
    }

    #[test]
    fn root_lists_builtins_and_global_options() {
        let text = render_root(&registry());
        assert!(text.contains("help [COMMAND]"));
        assert!(text.contains("completions <SHELL>"));
        assert!(text.contains("--api-url <URL>"));
        assert!(text.contains("--debug"));
    }

    #[test]
    fn group_lists_every_subcommand() {
        let registry = registry();
        for group in registry.list_groups() {
            let text = render_group(&registry, group);
            for sub in &group.subcommands {
                assert!(
                    text.contains(sub.name),
                    "{} help is missing {}",
                    group.name,
                    sub.name
                );
            }
        }
    }

    #[test]
    fn api_help_shows_placeholders_and_flags() {
        let registry = registry();
        let group = registry.resolve_group("api").unwrap();
        let text = render_subcommand(&registry, group, &group.subcommands[0]);
        for needle in ["<METHOD>", "<PATH>", "--data", "--header", "--raw", "--json"] {
            assert!(text.contains(needle), "api help is missing {}", needle);
        }
    }

    #[test]
    fn api_usage_line_omits_repeated_name() {
        let registry = registry();
        let group = registry.resolve_group("api").unwrap();
        let line = usage_line(group, &group.subcommands[0]);
        assert!(line.starts_with("foundry api <METHOD> <PATH>"));
        assert!(line.contains("[--data <DATA>]..."));
        assert!(line.contains("[--raw]"));
    }

    #[test]
    fn direct_group_help_is_subcommand_help() {
        let registry = registry();
        let group = registry.resolve_group("api").unwrap();
        let text = render_group(&registry, group);
        assert!(text.contains("<METHOD>"));
        assert!(!text.contains("Subcommands:"));
    }

    #[test]
    fn subcommand_help_mentions_alias() {
        let registry = registry();
        let group = registry.resolve_group("auth").unwrap();
        let login = group.find("login").unwrap();
        let text = render_subcommand(&registry, group, login);
        assert!(text.contains("foundry login"));
    }

    #[test]
    fn arg_usage_rendering() {
        assert_eq!(arg_usage(&ArgSpec::positional("id", "<ID>", "")), "<ID>");
        assert_eq!(
            arg_usage(&ArgSpec::positional("id", "<ID>", "").optional()),
            "[<ID>]"
        );
        assert_eq!(
            arg_usage(&ArgSpec::variadic("msg", "<MESSAGE>", "")),
            "<MESSAGE>..."
        );
        assert_eq!(
            arg_usage(&ArgSpec::value("project", "<PROJECT_ID>", "").required()),
            "--project <PROJECT_ID>"
        );
        assert_eq!(
            arg_usage(&ArgSpec::value("header", "<HEADER>", "").repeatable()),
            "[--header <HEADER>]..."
        );
        assert_eq!(arg_usage(&ArgSpec::switch("json", "")), "[--json]");
    }

    #[test]
    fn rendering_is_deterministic() {
        let registry = registry();
        assert_eq!(render_root(&registry), render_root(&registry));
    }
}
