//! Command-line interface for Foundry.
//!
//! # Architecture
//!
//! - [`args`] - Global options parsed with clap's derive macros
//! - [`registry`] - Declarative table of groups, subcommands, and aliases
//! - [`parser`] - Argument parsing against a subcommand's specs
//! - [`help`] - Help text rendered from the registry
//! - [`commands`] - Dispatcher and per-group handlers

pub mod args;
pub mod commands;
pub mod help;
pub mod parser;
pub mod registry;

pub use args::Cli;
pub use commands::{
    builtin_registry, CommandDispatcher, CommandResult, Context, Handler, Resolution,
};
pub use parser::{ArgValue, ParseOutcome, ParsedInvocation};
pub use registry::{Alias, ArgKind, ArgSpec, CommandGroup, Registry, RegistryError, Subcommand};
