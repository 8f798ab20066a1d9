//! Declarative command table.
//!
//! The [`Registry`] is the single description of every command group,
//! subcommand, argument, and legacy alias the CLI understands. Both the
//! dispatcher (execution) and the help renderer (documentation) read from
//! it, so usage text and parsing behavior cannot drift apart.
//!
//! # Example
//!
//! ```
//! use foundry::cli::registry::{Alias, ArgSpec, CommandGroup, Registry, Subcommand};
//! use foundry::cli::{CommandResult, Context, ParsedInvocation};
//!
//! fn noop(_ctx: &mut Context<'_>, _args: &ParsedInvocation) -> foundry::Result<CommandResult> {
//!     Ok(CommandResult::success())
//! }
//!
//! let registry = Registry::new(
//!     vec![CommandGroup::new("auth", "Authenticate")
//!         .subcommand(Subcommand::new("login", "Log in", noop)
//!             .arg(ArgSpec::value("email", "<EMAIL>", "Account email")))],
//!     vec![Alias::new("login", "auth", "login")],
//! )
//! .unwrap();
//!
//! let (group, sub) = registry.resolve_alias("login").unwrap();
//! assert_eq!((group.name, sub.name), ("auth", "login"));
//! ```

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use super::commands::dispatcher::Handler;

/// Root tokens handled by the dispatcher itself.
pub const BUILTIN_COMMANDS: &[&str] = &["help", "completions"];

/// How an argument is supplied on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// `--name <VALUE>` or `--name=<VALUE>`.
    Value,
    /// `--name`, takes no value.
    Switch,
    /// A single positional token.
    Positional,
    /// All remaining positional tokens.
    Variadic,
}

impl ArgKind {
    /// Whether this kind is written as a `--flag`.
    pub fn is_flag(self) -> bool {
        matches!(self, Self::Value | Self::Switch)
    }
}

/// Declarative description of one flag or positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    /// Key under which the parsed value is stored (flag name without dashes).
    pub name: &'static str,
    pub kind: ArgKind,
    pub required: bool,
    /// Flag occurrences accumulate instead of replacing each other.
    pub repeatable: bool,
    /// Text shown in usage lines, e.g. `<METHOD>`.
    pub placeholder: &'static str,
    pub help: &'static str,
}

impl ArgSpec {
    /// A required positional argument.
    pub const fn positional(
        name: &'static str,
        placeholder: &'static str,
        help: &'static str,
    ) -> Self {
        Self {
            name,
            kind: ArgKind::Positional,
            required: true,
            repeatable: false,
            placeholder,
            help,
        }
    }

    /// A required positional that swallows every remaining positional token.
    pub const fn variadic(
        name: &'static str,
        placeholder: &'static str,
        help: &'static str,
    ) -> Self {
        Self {
            name,
            kind: ArgKind::Variadic,
            required: true,
            repeatable: false,
            placeholder,
            help,
        }
    }

    /// An optional flag taking a value.
    pub const fn value(name: &'static str, placeholder: &'static str, help: &'static str) -> Self {
        Self {
            name,
            kind: ArgKind::Value,
            required: false,
            repeatable: false,
            placeholder,
            help,
        }
    }

    /// A boolean flag.
    pub const fn switch(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            kind: ArgKind::Switch,
            required: false,
            repeatable: false,
            placeholder: "",
            help,
        }
    }

    /// Mark the argument as required.
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the argument as optional.
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Let a value flag be given more than once.
    pub const fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    /// The name used when reporting this argument to the user.
    ///
    /// Flags are shown as `--name`, positionals by their placeholder.
    pub fn display_name(&self) -> String {
        if self.kind.is_flag() {
            format!("--{}", self.name)
        } else {
            self.placeholder.to_string()
        }
    }
}

/// An action within a group, e.g. `project list`.
#[derive(Clone)]
pub struct Subcommand {
    pub name: &'static str,
    /// Identifier of the owning group; set when added to a [`CommandGroup`].
    pub group: &'static str,
    pub summary: &'static str,
    pub args: Vec<ArgSpec>,
    pub handler: Handler,
}

impl Subcommand {
    /// Create a subcommand with no arguments.
    pub fn new(name: &'static str, summary: &'static str, handler: Handler) -> Self {
        Self {
            name,
            group: "",
            summary,
            args: Vec::new(),
            handler,
        }
    }

    /// Append an argument spec.
    pub fn arg(mut self, spec: ArgSpec) -> Self {
        self.args.push(spec);
        self
    }

    /// Positional specs in declaration order.
    pub fn positionals(&self) -> impl Iterator<Item = &ArgSpec> {
        self.args.iter().filter(|a| !a.kind.is_flag())
    }

    /// Flag specs in declaration order.
    pub fn flags(&self) -> impl Iterator<Item = &ArgSpec> {
        self.args.iter().filter(|a| a.kind.is_flag())
    }

    /// Look up a flag by name (without dashes).
    pub fn flag(&self, name: &str) -> Option<&ArgSpec> {
        self.flags().find(|a| a.name == name)
    }
}

impl fmt::Debug for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subcommand")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("summary", &self.summary)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// A top-level command namespace, e.g. `project`.
///
/// A *direct* group (like `api`) owns exactly one subcommand, named after the
/// group, which receives every token after the group name.
#[derive(Debug, Clone)]
pub struct CommandGroup {
    pub name: &'static str,
    pub summary: &'static str,
    pub subcommands: Vec<Subcommand>,
    pub direct: bool,
}

impl CommandGroup {
    /// Create an empty group.
    pub fn new(name: &'static str, summary: &'static str) -> Self {
        Self {
            name,
            summary,
            subcommands: Vec::new(),
            direct: false,
        }
    }

    /// Create a group that runs `sub` without a subcommand token.
    pub fn direct(name: &'static str, summary: &'static str, mut sub: Subcommand) -> Self {
        sub.name = name;
        let mut group = Self::new(name, summary).subcommand(sub);
        group.direct = true;
        group
    }

    /// The subcommand of a direct group.
    pub fn direct_subcommand(&self) -> Option<&Subcommand> {
        if self.direct {
            self.subcommands.first()
        } else {
            None
        }
    }

    /// Add a subcommand, making this group its owner.
    pub fn subcommand(mut self, mut sub: Subcommand) -> Self {
        sub.group = self.name;
        self.subcommands.push(sub);
        self
    }

    /// Find a subcommand by exact name.
    pub fn find(&self, name: &str) -> Option<&Subcommand> {
        self.subcommands.iter().find(|s| s.name == name)
    }
}

/// A legacy root-level token that expands to a group and subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias {
    pub token: &'static str,
    pub group: &'static str,
    pub subcommand: &'static str,
}

impl Alias {
    pub const fn new(token: &'static str, group: &'static str, subcommand: &'static str) -> Self {
        Self {
            token,
            group,
            subcommand,
        }
    }
}

/// Structural problems found while building a [`Registry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate command group '{0}'")]
    DuplicateGroup(String),

    #[error("duplicate subcommand '{group} {name}'")]
    DuplicateSubcommand { group: String, name: String },

    #[error("duplicate argument '{arg}' in '{group} {subcommand}'")]
    DuplicateArgument {
        group: String,
        subcommand: String,
        arg: String,
    },

    #[error("required argument '{arg}' follows an optional positional in '{group} {subcommand}'")]
    RequiredAfterOptional {
        group: String,
        subcommand: String,
        arg: String,
    },

    #[error("variadic argument '{arg}' must be the last positional in '{group} {subcommand}'")]
    VariadicNotLast {
        group: String,
        subcommand: String,
        arg: String,
    },

    #[error("'{0}' is reserved")]
    ReservedName(String),

    #[error("alias '{token}' points to unknown command '{group} {subcommand}'")]
    DanglingAlias {
        token: String,
        group: String,
        subcommand: String,
    },

    #[error("alias '{0}' collides with a command group or another alias")]
    AliasCollision(String),
}

/// The authoritative, read-only command table.
#[derive(Debug, Clone)]
pub struct Registry {
    groups: Vec<CommandGroup>,
    aliases: Vec<Alias>,
}

impl Registry {
    /// Build a registry, validating its structure.
    pub fn new(groups: Vec<CommandGroup>, aliases: Vec<Alias>) -> Result<Self, RegistryError> {
        let registry = Self { groups, aliases };
        registry.validate()?;
        Ok(registry)
    }

    /// Groups in declaration order.
    pub fn list_groups(&self) -> &[CommandGroup] {
        &self.groups
    }

    /// Legacy aliases in declaration order.
    pub fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    /// Exact, case-sensitive group lookup.
    pub fn resolve_group(&self, name: &str) -> Option<&CommandGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Subcommand lookup within a group.
    pub fn resolve_subcommand<'a>(
        &self,
        group: &'a CommandGroup,
        name: &str,
    ) -> Option<&'a Subcommand> {
        group.find(name)
    }

    /// Expand a legacy alias token to the command it stands for.
    pub fn resolve_alias(&self, token: &str) -> Option<(&CommandGroup, &Subcommand)> {
        let alias = self.aliases.iter().find(|a| a.token == token)?;
        let group = self.resolve_group(alias.group)?;
        let sub = group.find(alias.subcommand)?;
        Some((group, sub))
    }

    /// Aliases that expand to the given subcommand.
    pub fn aliases_for(&self, group: &str, subcommand: &str) -> Vec<&'static str> {
        self.aliases
            .iter()
            .filter(|a| a.group == group && a.subcommand == subcommand)
            .map(|a| a.token)
            .collect()
    }

    fn validate(&self) -> Result<(), RegistryError> {
        let mut group_names = HashSet::new();
        for group in &self.groups {
            if BUILTIN_COMMANDS.contains(&group.name) {
                return Err(RegistryError::ReservedName(group.name.to_string()));
            }
            if !group_names.insert(group.name) {
                return Err(RegistryError::DuplicateGroup(group.name.to_string()));
            }

            let mut sub_names = HashSet::new();
            for sub in &group.subcommands {
                if !sub_names.insert(sub.name) {
                    return Err(RegistryError::DuplicateSubcommand {
                        group: group.name.to_string(),
                        name: sub.name.to_string(),
                    });
                }
                validate_args(group.name, sub)?;
            }
        }

        let mut alias_tokens = HashSet::new();
        for alias in &self.aliases {
            if group_names.contains(alias.token)
                || BUILTIN_COMMANDS.contains(&alias.token)
                || !alias_tokens.insert(alias.token)
            {
                return Err(RegistryError::AliasCollision(alias.token.to_string()));
            }
            if self.resolve_alias(alias.token).is_none() {
                return Err(RegistryError::DanglingAlias {
                    token: alias.token.to_string(),
                    group: alias.group.to_string(),
                    subcommand: alias.subcommand.to_string(),
                });
            }
        }

        Ok(())
    }
}

fn validate_args(group: &str, sub: &Subcommand) -> Result<(), RegistryError> {
    let mut names = HashSet::new();
    for spec in &sub.args {
        if spec.name == "help" {
            return Err(RegistryError::ReservedName(format!(
                "{} {} --help",
                group, sub.name
            )));
        }
        if !names.insert(spec.name) {
            return Err(RegistryError::DuplicateArgument {
                group: group.to_string(),
                subcommand: sub.name.to_string(),
                arg: spec.name.to_string(),
            });
        }
    }

    let mut seen_optional = false;
    let mut seen_variadic = false;
    for spec in sub.positionals() {
        if seen_variadic {
            // The earlier variadic would swallow this one's tokens.
            return Err(RegistryError::VariadicNotLast {
                group: group.to_string(),
                subcommand: sub.name.to_string(),
                arg: spec.name.to_string(),
            });
        }
        if spec.required && seen_optional {
            return Err(RegistryError::RequiredAfterOptional {
                group: group.to_string(),
                subcommand: sub.name.to_string(),
                arg: spec.name.to_string(),
            });
        }
        seen_optional |= !spec.required;
        seen_variadic |= spec.kind == ArgKind::Variadic;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::dispatcher::{CommandResult, Context};
    use crate::cli::parser::ParsedInvocation;

    fn noop(_ctx: &mut Context<'_>, _args: &ParsedInvocation) -> crate::Result<CommandResult> {
        Ok(CommandResult::success())
    }

    fn sample_groups() -> Vec<CommandGroup> {
        vec![
            CommandGroup::new("auth", "Authenticate")
                .subcommand(Subcommand::new("login", "Log in", noop))
                .subcommand(Subcommand::new("logout", "Log out", noop)),
            CommandGroup::new("project", "Manage projects")
                .subcommand(Subcommand::new("list", "List projects", noop))
                .subcommand(
                    Subcommand::new("get", "Show a project", noop)
                        .arg(ArgSpec::positional("id", "<PROJECT_ID>", "Project id")),
                ),
        ]
    }

    #[test]
    fn list_groups_preserves_declaration_order() {
        let registry = Registry::new(sample_groups(), vec![]).unwrap();
        let names: Vec<_> = registry.list_groups().iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["auth", "project"]);
    }

    #[test]
    fn resolve_group_is_exact_and_case_sensitive() {
        let registry = Registry::new(sample_groups(), vec![]).unwrap();
        assert!(registry.resolve_group("project").is_some());
        assert!(registry.resolve_group("Project").is_none());
        assert!(registry.resolve_group("proj").is_none());
    }

    #[test]
    fn resolve_subcommand_within_group() {
        let registry = Registry::new(sample_groups(), vec![]).unwrap();
        let group = registry.resolve_group("project").unwrap();
        assert_eq!(registry.resolve_subcommand(group, "get").unwrap().name, "get");
        assert!(registry.resolve_subcommand(group, "login").is_none());
    }

    #[test]
    fn subcommand_records_owning_group() {
        let registry = Registry::new(sample_groups(), vec![]).unwrap();
        let group = registry.resolve_group("auth").unwrap();
        assert!(group.subcommands.iter().all(|s| s.group == "auth"));
    }

    #[test]
    fn resolve_alias_expands_to_target() {
        let registry =
            Registry::new(sample_groups(), vec![Alias::new("login", "auth", "login")]).unwrap();
        let (group, sub) = registry.resolve_alias("login").unwrap();
        assert_eq!(group.name, "auth");
        assert_eq!(sub.name, "login");
        assert!(registry.resolve_alias("logout").is_none());
    }

    #[test]
    fn aliases_for_lists_tokens() {
        let registry =
            Registry::new(sample_groups(), vec![Alias::new("login", "auth", "login")]).unwrap();
        assert_eq!(registry.aliases_for("auth", "login"), vec!["login"]);
        assert!(registry.aliases_for("auth", "logout").is_empty());
    }

    #[test]
    fn rejects_duplicate_group() {
        let mut groups = sample_groups();
        groups.push(CommandGroup::new("auth", "Again"));
        let err = Registry::new(groups, vec![]).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateGroup("auth".into()));
    }

    #[test]
    fn rejects_duplicate_subcommand() {
        let groups = vec![CommandGroup::new("task", "Tasks")
            .subcommand(Subcommand::new("get", "Get", noop))
            .subcommand(Subcommand::new("get", "Get again", noop))];
        let err = Registry::new(groups, vec![]).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateSubcommand { .. }));
    }

    #[test]
    fn rejects_required_positional_after_optional() {
        let groups = vec![CommandGroup::new("task", "Tasks").subcommand(
            Subcommand::new("get", "Get", noop)
                .arg(ArgSpec::positional("a", "<A>", "").optional())
                .arg(ArgSpec::positional("b", "<B>", "")),
        )];
        let err = Registry::new(groups, vec![]).unwrap_err();
        assert!(matches!(err, RegistryError::RequiredAfterOptional { .. }));
    }

    #[test]
    fn optional_positional_after_required_is_fine() {
        let groups = vec![CommandGroup::new("task", "Tasks").subcommand(
            Subcommand::new("get", "Get", noop)
                .arg(ArgSpec::positional("a", "<A>", ""))
                .arg(ArgSpec::positional("b", "<B>", "").optional()),
        )];
        assert!(Registry::new(groups, vec![]).is_ok());
    }

    #[test]
    fn rejects_variadic_before_positional() {
        let groups = vec![CommandGroup::new("session", "Sessions").subcommand(
            Subcommand::new("send", "Send", noop)
                .arg(ArgSpec::variadic("words", "<WORDS>", ""))
                .arg(ArgSpec::positional("id", "<ID>", "").optional()),
        )];
        let err = Registry::new(groups, vec![]).unwrap_err();
        assert!(matches!(err, RegistryError::VariadicNotLast { .. }));
    }

    #[test]
    fn rejects_duplicate_argument_names() {
        let groups = vec![CommandGroup::new("task", "Tasks").subcommand(
            Subcommand::new("list", "List", noop)
                .arg(ArgSpec::value("status", "<STATUS>", ""))
                .arg(ArgSpec::switch("status", "")),
        )];
        let err = Registry::new(groups, vec![]).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateArgument { .. }));
    }

    #[test]
    fn rejects_reserved_names() {
        let groups = vec![CommandGroup::new("help", "Nope")];
        assert_eq!(
            Registry::new(groups, vec![]).unwrap_err(),
            RegistryError::ReservedName("help".into())
        );

        let groups = vec![CommandGroup::new("task", "Tasks")
            .subcommand(Subcommand::new("list", "List", noop).arg(ArgSpec::switch("help", "")))];
        assert!(matches!(
            Registry::new(groups, vec![]).unwrap_err(),
            RegistryError::ReservedName(_)
        ));
    }

    #[test]
    fn rejects_dangling_alias() {
        let err = Registry::new(sample_groups(), vec![Alias::new("whoami", "auth", "whoami")])
            .unwrap_err();
        assert!(matches!(err, RegistryError::DanglingAlias { .. }));
    }

    #[test]
    fn rejects_alias_shadowing_group() {
        let err = Registry::new(sample_groups(), vec![Alias::new("project", "auth", "login")])
            .unwrap_err();
        assert_eq!(err, RegistryError::AliasCollision("project".into()));
    }

    #[test]
    fn direct_group_owns_single_named_subcommand() {
        let group = CommandGroup::direct(
            "api",
            "Raw requests",
            Subcommand::new("request", "Send a request", noop),
        );
        let sub = group.direct_subcommand().unwrap();
        assert_eq!(sub.name, "api");
        assert_eq!(sub.group, "api");
        assert!(CommandGroup::new("task", "Tasks").direct_subcommand().is_none());
    }

    #[test]
    fn arg_display_names() {
        assert_eq!(
            ArgSpec::positional("method", "<METHOD>", "").display_name(),
            "<METHOD>"
        );
        assert_eq!(ArgSpec::value("data", "<DATA>", "").display_name(), "--data");
        assert_eq!(ArgSpec::switch("raw", "").display_name(), "--raw");
    }

    #[test]
    fn subcommand_debug_omits_handler() {
        let sub = Subcommand::new("list", "List", noop);
        let text = format!("{:?}", sub);
        assert!(text.contains("list"));
        assert!(!text.contains("handler"));
    }
}
