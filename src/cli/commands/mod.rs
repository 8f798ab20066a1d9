//! CLI command implementations.
//!
//! Each group module exposes a `group()` constructor returning its
//! [`CommandGroup`] with handlers attached; [`builtin_registry`] assembles
//! them together with the legacy root-level aliases.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which resolves argv
//! against the registry and calls the matching [`Handler`]. This allows:
//! - Help text and parsing driven by one declarative table
//! - Shared request plumbing through [`Context`]
//! - Handlers that are plain functions, testable with a mock backend

pub mod api;
pub mod auth;
pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod implementation;
pub mod project;
pub mod screener;
pub mod session;
pub mod signal;
pub mod task;

pub use dispatcher::{CommandDispatcher, CommandResult, Context, Handler, Resolution};

use serde_json::{Map, Value};

use crate::cli::parser::ParsedInvocation;
use crate::cli::registry::{Alias, ArgSpec, CommandGroup, Registry, RegistryError};
use crate::error::{FoundryError, Result};

/// Root-level tokens kept for scripts written against older releases.
pub const LEGACY_ALIASES: &[Alias] = &[
    Alias::new("login", "auth", "login"),
    Alias::new("logout", "auth", "logout"),
];

/// Every command group, in the order help lists them.
pub fn builtin_groups() -> Vec<CommandGroup> {
    vec![
        auth::group(),
        project::group(),
        session::group(),
        signal::group(),
        task::group(),
        screener::group(),
        implementation::group(),
        api::group(),
    ]
}

/// The registry the `foundry` binary runs with.
pub fn builtin_registry() -> std::result::Result<Registry, RegistryError> {
    Registry::new(builtin_groups(), LEGACY_ALIASES.to_vec())
}

/// `--json` switch shared by commands that print lists or records.
pub(crate) const fn json_flag() -> ArgSpec {
    ArgSpec::switch("json", "Print the raw JSON response")
}

/// Path of one resource, optionally with a trailing action segment.
///
/// Identifiers are checked so they cannot escape their path segment.
pub(crate) fn resource_path(collection: &str, id: &str, action: Option<&str>) -> Result<String> {
    if id.is_empty() || id.chars().any(|c| matches!(c, '/' | '?' | '#') || c.is_whitespace()) {
        return Err(FoundryError::InvalidValue {
            name: "id".to_string(),
            message: format!("'{}' is not a valid identifier", id),
        });
    }
    Ok(match action {
        Some(action) => format!("/{}/{}/{}", collection, id, action),
        None => format!("/{}/{}", collection, id),
    })
}

/// Numeric identifiers go over the wire as numbers, anything else as text.
pub(crate) fn id_value(id: &str) -> Value {
    id.parse::<i64>()
        .map(Value::from)
        .unwrap_or_else(|_| Value::String(id.to_string()))
}

/// Build a JSON object from the fields that are present.
pub(crate) fn object(fields: Vec<(&str, Option<Value>)>) -> Value {
    let map: Map<String, Value> = fields
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
        .collect();
    Value::Object(map)
}

/// An optional text argument as a JSON string.
pub(crate) fn text(args: &ParsedInvocation, name: &str) -> Option<Value> {
    args.value(name).map(|v| Value::String(v.to_string()))
}

/// Short label for a created or updated record.
pub(crate) fn describe(record: &Value) -> String {
    match record.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => "record".to_string(),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Dispatcher harness shared by handler tests.

    use tempfile::TempDir;

    use super::{builtin_registry, CommandDispatcher, CommandResult, Context};
    use crate::api::MockBackend;
    use crate::cli::registry::Registry;
    use crate::credentials::{CredentialStore, Credentials};
    use crate::ui::MockUI;

    pub struct Harness {
        pub backend: MockBackend,
        pub store: CredentialStore,
        pub ui: MockUI,
        _home: TempDir,
    }

    impl Harness {
        pub fn new() -> Self {
            let home = TempDir::new().unwrap();
            Self {
                backend: MockBackend::new(),
                store: CredentialStore::new(home.path().join("credentials.yml")),
                ui: MockUI::new(),
                _home: home,
            }
        }

        /// Harness with a stored token.
        pub fn logged_in() -> Self {
            let h = Self::new();
            h.store
                .save(&Credentials::new("tok_test_0123456789").with_email(Some(
                    "dev@example.com".to_string(),
                )))
                .unwrap();
            h
        }

        pub fn run(&mut self, args: &[&str]) -> CommandResult {
            let registry = builtin_registry().unwrap();
            self.run_with(&registry, args)
        }

        pub fn run_with(&mut self, registry: &Registry, args: &[&str]) -> CommandResult {
            let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
            let mut ctx = Context::new(&self.backend, &self.store, &mut self.ui);
            CommandDispatcher::new(registry).dispatch(&args, &mut ctx)
        }
    }
}
