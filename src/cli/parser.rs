//! Argument parsing against a subcommand's [`ArgSpec`] list.
//!
//! Rules:
//! - `--name value` and `--name=value` bind a value flag
//! - boolean flags consume nothing (`--name=true|false` is also accepted)
//! - other tokens fill positionals in declaration order; a variadic
//!   positional takes the rest, surplus tokens land in `residual`
//! - a bare `--help` or `-h` anywhere before `--` requests help instead
//! - `--` ends flag processing

use std::collections::BTreeMap;

use crate::error::{FoundryError, Result};

use super::registry::{ArgKind, ArgSpec, Subcommand};

/// A parsed argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Text(String),
    List(Vec<String>),
    Switch(bool),
}

/// The resolved, validated form of one CLI invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInvocation {
    /// Resolved group, `None` when help should be shown at the root.
    pub group: Option<&'static str>,
    /// Resolved subcommand, `None` when help should be shown for the group.
    pub subcommand: Option<&'static str>,
    values: BTreeMap<&'static str, ArgValue>,
    /// Positional tokens no spec claimed.
    pub residual: Vec<String>,
}

impl ParsedInvocation {
    /// An invocation with only the resolved command filled in.
    pub fn for_command(group: &'static str, subcommand: &'static str) -> Self {
        Self {
            group: Some(group),
            subcommand: Some(subcommand),
            ..Default::default()
        }
    }

    /// Set a value directly; mostly useful when driving handlers in tests.
    pub fn with(mut self, name: &'static str, value: ArgValue) -> Self {
        self.values.insert(name, value);
        self
    }

    /// Raw access to a parsed value.
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// Single value of a flag or positional.
    ///
    /// For list values this is the first element.
    pub fn value(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            ArgValue::Text(s) => Some(s),
            ArgValue::List(items) => items.first().map(String::as_str),
            ArgValue::Switch(_) => None,
        }
    }

    /// Every value given for an argument, in command-line order.
    pub fn values(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(ArgValue::Text(s)) => std::slice::from_ref(s),
            Some(ArgValue::List(items)) => items,
            _ => &[],
        }
    }

    /// Whether a boolean flag was set.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(ArgValue::Switch(true)))
    }

    /// Like [`value`](Self::value) but fails with `MissingArgument`.
    pub fn require(&self, name: &str) -> Result<&str> {
        self.value(name).ok_or_else(|| FoundryError::MissingArgument {
            name: name.to_string(),
        })
    }

    /// Number of bound arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no argument was bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Result of parsing a subcommand's tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// `--help` or `-h` was present; the handler must not run.
    Help,
    Parsed(ParsedInvocation),
}

/// Whether the tokens ask for help, ignoring anything after `--`.
pub fn wants_help(tokens: &[String]) -> bool {
    tokens
        .iter()
        .take_while(|t| t.as_str() != "--")
        .any(|t| t == "--help" || t == "-h")
}

/// Parse the tokens that follow `<group> <subcommand>`.
pub fn parse(sub: &Subcommand, tokens: &[String]) -> Result<ParseOutcome> {
    if wants_help(tokens) {
        return Ok(ParseOutcome::Help);
    }

    let mut invocation = ParsedInvocation::for_command(sub.group, sub.name);
    let mut positionals: Vec<String> = Vec::new();
    let mut flags_done = false;
    let mut iter = tokens.iter();

    while let Some(token) = iter.next() {
        if flags_done {
            positionals.push(token.clone());
            continue;
        }
        if token == "--" {
            flags_done = true;
            continue;
        }

        let Some(body) = token.strip_prefix("--").filter(|b| !b.is_empty()) else {
            positionals.push(token.clone());
            continue;
        };

        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        let spec = sub.flag(name).ok_or_else(|| FoundryError::UnknownFlag {
            flag: format!("--{}", name),
        })?;

        match spec.kind {
            ArgKind::Switch => {
                let on = match inline {
                    None | Some("true") => true,
                    Some("false") => false,
                    Some(other) => {
                        return Err(FoundryError::InvalidValue {
                            name: spec.display_name(),
                            message: format!("expected true or false, got '{}'", other),
                        })
                    }
                };
                invocation.values.insert(spec.name, ArgValue::Switch(on));
            }
            _ => {
                let value = match inline {
                    Some(v) => v.to_string(),
                    None => iter.next().cloned().ok_or_else(|| FoundryError::MissingValue {
                        flag: spec.display_name(),
                    })?,
                };
                bind_flag(&mut invocation, spec, value);
            }
        }
    }

    let mut remaining = positionals.into_iter();
    for spec in sub.positionals() {
        match spec.kind {
            ArgKind::Variadic => {
                let rest: Vec<String> = remaining.by_ref().collect();
                if !rest.is_empty() {
                    invocation.values.insert(spec.name, ArgValue::List(rest));
                }
            }
            _ => {
                if let Some(token) = remaining.next() {
                    invocation.values.insert(spec.name, ArgValue::Text(token));
                }
            }
        }
    }
    invocation.residual = remaining.collect();

    if let Some(missing) = sub
        .args
        .iter()
        .find(|spec| spec.required && !invocation.values.contains_key(spec.name))
    {
        return Err(FoundryError::MissingArgument {
            name: missing.display_name(),
        });
    }

    Ok(ParseOutcome::Parsed(invocation))
}

fn bind_flag(invocation: &mut ParsedInvocation, spec: &ArgSpec, value: String) {
    if !spec.repeatable {
        // Last occurrence wins.
        invocation.values.insert(spec.name, ArgValue::Text(value));
        return;
    }
    match invocation.values.get_mut(spec.name) {
        Some(ArgValue::List(items)) => items.push(value),
        _ => {
            invocation
                .values
                .insert(spec.name, ArgValue::List(vec![value]));
        }
    }
}
