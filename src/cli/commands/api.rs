//! `foundry api`: send an arbitrary request to the backend.
//!
//! Authentication, base URL, and error handling are shared with every other
//! command, so this is the escape hatch for endpoints without a dedicated
//! subcommand.

use std::fs;

use serde_json::{Map, Value};

use crate::api::{ApiRequest, Method};
use crate::cli::parser::ParsedInvocation;
use crate::cli::registry::{ArgSpec, CommandGroup, Subcommand};
use crate::error::{FoundryError, Result};

use super::display::{print_compact, print_json};
use super::{CommandResult, Context};

pub fn group() -> CommandGroup {
    CommandGroup::direct(
        "api",
        "Send a raw request to the API",
        Subcommand::new("request", "Send a raw request to the API", request)
            .arg(ArgSpec::positional(
                "method",
                "<METHOD>",
                "HTTP method: GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS",
            ))
            .arg(ArgSpec::positional(
                "path",
                "<PATH>",
                "Path relative to the API base URL, e.g. /projects",
            ))
            .arg(
                ArgSpec::value(
                    "data",
                    "<DATA>",
                    "JSON body, @file with JSON, or key=value; repeat to merge",
                )
                .repeatable(),
            )
            .arg(
                ArgSpec::value("header", "<HEADER>", "Extra header as 'Name: value'")
                    .repeatable(),
            )
            .arg(ArgSpec::switch("raw", "Print the response body unchanged"))
            .arg(ArgSpec::switch("json", "Print the response as compact JSON")),
    )
}

fn request(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let method: Method = args.require("method")?.parse()?;
    let path = args.require("path")?;

    let mut request = ApiRequest::new(method, path);
    for raw in args.values("header") {
        let (name, value) = parse_header(raw)?;
        request = request.header(name, value);
    }
    if let Some(body) = build_body(args.values("data"))? {
        request = request.json(body);
    }

    let label = format!("{} {}", method, request.path);
    let response = ctx.send(&label, request)?;

    if args.flag("raw") {
        ctx.ui.output(&response.body);
        return Ok(CommandResult::success());
    }
    if response.body.trim().is_empty() {
        ctx.ui.message(&format!("HTTP {}", response.status));
        return Ok(CommandResult::success());
    }

    match serde_json::from_str::<Value>(&response.body) {
        Ok(value) if args.flag("json") => print_compact(ctx.ui, &value),
        Ok(value) => print_json(ctx.ui, &value)?,
        Err(_) => ctx.ui.output(&response.body),
    }
    Ok(CommandResult::success())
}

/// Split a `Name: value` header.
fn parse_header(raw: &str) -> Result<(String, String)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(FoundryError::InvalidValue {
            name: "--header".to_string(),
            message: format!("expected 'Name: value', got '{}'", raw),
        }),
    }
}

/// Combine every `--data` value into one request body.
///
/// Objects merge left to right; a non-object value is only valid alone.
fn build_body(data: &[String]) -> Result<Option<Value>> {
    let mut parts = data
        .iter()
        .map(String::as_str)
        .map(data_value)
        .collect::<Result<Vec<_>>>()?;

    match parts.len() {
        0 => return Ok(None),
        1 => return Ok(parts.pop()),
        _ => {}
    }

    let mut merged = Map::new();
    for part in parts {
        match part {
            Value::Object(fields) => merged.extend(fields),
            other => {
                return Err(FoundryError::InvalidValue {
                    name: "--data".to_string(),
                    message: format!("only objects can be combined, got {}", other),
                })
            }
        }
    }
    Ok(Some(Value::Object(merged)))
}

/// One `--data` value: `@file`, inline JSON, or `key=value`.
fn data_value(raw: &str) -> Result<Value> {
    if let Some(path) = raw.strip_prefix('@') {
        let content = fs::read_to_string(path).map_err(|e| FoundryError::InvalidValue {
            name: "--data".to_string(),
            message: format!("cannot read {}: {}", path, e),
        })?;
        return serde_json::from_str(&content).map_err(|e| FoundryError::InvalidValue {
            name: "--data".to_string(),
            message: format!("{} is not valid JSON: {}", path, e),
        });
    }

    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        return Ok(value);
    }

    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => {
            let mut field = Map::new();
            field.insert(key.to_string(), Value::String(value.to_string()));
            Ok(Value::Object(field))
        }
        _ => Err(FoundryError::InvalidValue {
            name: "--data".to_string(),
            message: format!("'{}' is neither JSON nor key=value", raw),
        }),
    }
}
