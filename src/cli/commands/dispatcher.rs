//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Handler`] signature shared by every registered subcommand
//! - [`Context`] bundling the backend, credentials, and UI for handlers
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing argv through the [`Registry`]
//!
//! Routing happens in two steps. [`CommandDispatcher::resolve`] is pure and
//! turns argv into a [`Resolution`]; [`CommandDispatcher::dispatch`] acts on
//! it, printing help or running a handler, and converts every failure into
//! an error line plus exit code.

use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{ApiRequest, ApiResponse, Backend};
use crate::cli::help::{self, BIN_NAME};
use crate::cli::parser::{self, ParseOutcome, ParsedInvocation};
use crate::cli::registry::{CommandGroup, Registry, Subcommand};
use crate::credentials::CredentialStore;
use crate::error::{FoundryError, Result};
use crate::ui::UserInterface;

use super::completions;

/// Signature of a subcommand implementation.
pub type Handler = fn(&mut Context<'_>, &ParsedInvocation) -> Result<CommandResult>;

/// Everything a handler may touch.
pub struct Context<'a> {
    pub backend: &'a dyn Backend,
    pub credentials: &'a CredentialStore,
    pub ui: &'a mut dyn UserInterface,
}

impl<'a> Context<'a> {
    pub fn new(
        backend: &'a dyn Backend,
        credentials: &'a CredentialStore,
        ui: &'a mut dyn UserInterface,
    ) -> Self {
        Self {
            backend,
            credentials,
            ui,
        }
    }

    /// Send a request with a spinner labelled `label`.
    pub fn send(&mut self, label: &str, request: ApiRequest) -> Result<ApiResponse> {
        let mut spinner = self.ui.start_spinner(label);
        let result = self.backend.send(request);
        spinner.finish_and_clear();
        result
    }

    /// Send a request and parse the JSON body.
    pub fn fetch_json(&mut self, label: &str, request: ApiRequest) -> Result<Value> {
        self.send(label, request)?.json()
    }
}

/// Result of command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// What an argv resolves to, before anything runs.
#[derive(Debug)]
pub enum Resolution<'r> {
    RootHelp,
    GroupHelp(&'r CommandGroup),
    SubcommandHelp(&'r CommandGroup, &'r Subcommand),
    CompletionsHelp,
    Completions(String),
    Invoke {
        group: &'r CommandGroup,
        subcommand: &'r Subcommand,
        invocation: ParsedInvocation,
    },
}

/// Routes argv to help output or a handler.
pub struct CommandDispatcher<'r> {
    registry: &'r Registry,
}

impl<'r> CommandDispatcher<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Resolve argv (without the program name). Performs no I/O.
    pub fn resolve(&self, args: &[String]) -> Result<Resolution<'r>> {
        let Some((first, rest)) = args.split_first() else {
            return Ok(Resolution::RootHelp);
        };

        match first.as_str() {
            "--help" | "-h" => return Ok(Resolution::RootHelp),
            "help" => return self.resolve_help_topic(rest),
            "completions" => return resolve_completions(rest),
            _ => {}
        }

        if let Some(group) = self.registry.resolve_group(first) {
            return self.resolve_in_group(group, rest);
        }
        if let Some((group, sub)) = self.registry.resolve_alias(first) {
            debug!(alias = %first, group = group.name, subcommand = sub.name, "expanded alias");
            return resolve_invocation(group, sub, rest);
        }

        Err(FoundryError::UnknownCommand {
            name: first.clone(),
        })
    }

    /// Resolve and act on argv. Never returns an error.
    pub fn dispatch(&self, args: &[String], ctx: &mut Context<'_>) -> CommandResult {
        let resolution = match self.resolve(args) {
            Ok(resolution) => resolution,
            Err(e) => return self.fail(ctx.ui, &e, args),
        };

        match resolution {
            Resolution::RootHelp => {
                ctx.ui.output(&help::render_root(self.registry));
                CommandResult::success()
            }
            Resolution::GroupHelp(group) => {
                ctx.ui.output(&help::render_group(self.registry, group));
                CommandResult::success()
            }
            Resolution::SubcommandHelp(group, sub) => {
                ctx.ui
                    .output(&help::render_subcommand(self.registry, group, sub));
                CommandResult::success()
            }
            Resolution::CompletionsHelp => {
                ctx.ui.output(&completions::render_help());
                CommandResult::success()
            }
            Resolution::Completions(shell) => {
                match completions::generate(self.registry, &shell) {
                    Ok(script) => {
                        ctx.ui.output(&script);
                        CommandResult::success()
                    }
                    Err(e) => self.fail(ctx.ui, &e, args),
                }
            }
            Resolution::Invoke {
                group,
                subcommand,
                invocation,
            } => self.invoke(group, subcommand, &invocation, ctx, args),
        }
    }

    fn invoke(
        &self,
        group: &CommandGroup,
        subcommand: &Subcommand,
        invocation: &ParsedInvocation,
        ctx: &mut Context<'_>,
        args: &[String],
    ) -> CommandResult {
        if !invocation.residual.is_empty() {
            let extra = invocation.residual.join(" ");
            warn!(group = group.name, subcommand = subcommand.name, %extra, "ignoring extra arguments");
            ctx.ui
                .warning(&format!("Ignoring unexpected arguments: {}", extra));
        }

        debug!(group = group.name, subcommand = subcommand.name, "invoking handler");
        let handler = subcommand.handler;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler(ctx, invocation)));

        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => self.fail(ctx.ui, &e, args),
            Err(_) => {
                ctx.ui.error(&format!(
                    "Internal error while running '{} {}'",
                    group.name, subcommand.name
                ));
                CommandResult::failure(1)
            }
        }
    }

    fn resolve_in_group(
        &self,
        group: &'r CommandGroup,
        rest: &[String],
    ) -> Result<Resolution<'r>> {
        if rest.is_empty() {
            return Ok(Resolution::GroupHelp(group));
        }
        if let Some(sub) = group.direct_subcommand() {
            return resolve_invocation(group, sub, rest);
        }

        let (name, tail) = (&rest[0], &rest[1..]);
        if name == "--help" || name == "-h" {
            return Ok(Resolution::GroupHelp(group));
        }

        let sub = self
            .registry
            .resolve_subcommand(group, name)
            .ok_or_else(|| FoundryError::UnknownSubcommand {
                group: group.name.to_string(),
                name: name.clone(),
            })?;
        resolve_invocation(group, sub, tail)
    }

    /// `help [<group> [<subcommand>]]`
    fn resolve_help_topic(&self, rest: &[String]) -> Result<Resolution<'r>> {
        let Some(topic) = rest.first() else {
            return Ok(Resolution::RootHelp);
        };

        match topic.as_str() {
            "help" | "--help" | "-h" => return Ok(Resolution::RootHelp),
            "completions" => return Ok(Resolution::CompletionsHelp),
            _ => {}
        }

        if let Some(group) = self.registry.resolve_group(topic) {
            return match rest.get(1) {
                Some(name) if !group.direct => self
                    .registry
                    .resolve_subcommand(group, name)
                    .map(|sub| Resolution::SubcommandHelp(group, sub))
                    .ok_or_else(|| FoundryError::UnknownSubcommand {
                        group: group.name.to_string(),
                        name: name.clone(),
                    }),
                _ => Ok(Resolution::GroupHelp(group)),
            };
        }
        if let Some((group, sub)) = self.registry.resolve_alias(topic) {
            return Ok(Resolution::SubcommandHelp(group, sub));
        }

        Err(FoundryError::UnknownCommand {
            name: topic.clone(),
        })
    }

    fn fail(&self, ui: &mut dyn UserInterface, err: &FoundryError, args: &[String]) -> CommandResult {
        debug!(error = ?err, "command failed");
        ui.error(&err.to_string());
        if err.is_usage() {
            ui.message(&format!(
                "Run '{} --help' for usage.",
                self.help_target(args)
            ));
        }
        CommandResult::failure(1)
    }

    /// The deepest command in argv that has its own help page.
    fn help_target(&self, args: &[String]) -> String {
        let Some(first) = args.first() else {
            return BIN_NAME.to_string();
        };

        if first == "completions" {
            return format!("{} completions", BIN_NAME);
        }
        if self.registry.resolve_alias(first).is_some() {
            return format!("{} {}", BIN_NAME, first);
        }
        let Some(group) = self.registry.resolve_group(first) else {
            return BIN_NAME.to_string();
        };

        match args.get(1) {
            Some(name) if !group.direct && group.find(name).is_some() => {
                format!("{} {} {}", BIN_NAME, group.name, name)
            }
            _ => format!("{} {}", BIN_NAME, group.name),
        }
    }
}

fn resolve_invocation<'r>(
    group: &'r CommandGroup,
    subcommand: &'r Subcommand,
    tokens: &[String],
) -> Result<Resolution<'r>> {
    Ok(match parser::parse(subcommand, tokens)? {
        ParseOutcome::Help => Resolution::SubcommandHelp(group, subcommand),
        ParseOutcome::Parsed(invocation) => Resolution::Invoke {
            group,
            subcommand,
            invocation,
        },
    })
}

fn resolve_completions<'r>(rest: &[String]) -> Result<Resolution<'r>> {
    if parser::wants_help(rest) {
        return Ok(Resolution::CompletionsHelp);
    }
    match rest.first() {
        Some(shell) => Ok(Resolution::Completions(shell.clone())),
        None => Err(FoundryError::MissingArgument {
            name: "<SHELL>".to_string(),
        }),
    }
}
