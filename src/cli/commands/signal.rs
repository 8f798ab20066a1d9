//! `foundry signal`: signals captured from sessions.

use serde_json::json;

use crate::api::ApiRequest;
use crate::cli::parser::ParsedInvocation;
use crate::cli::registry::{ArgSpec, CommandGroup, Subcommand};
use crate::error::Result;

use super::display::{print_json, print_list};
use super::{id_value, json_flag, resource_path, CommandResult, Context};

pub fn group() -> CommandGroup {
    CommandGroup::new("signal", "Review signals captured from sessions")
        .subcommand(
            Subcommand::new("list", "List signals", list)
                .arg(ArgSpec::value("project", "<PROJECT_ID>", "Only signals in this project"))
                .arg(ArgSpec::value("session", "<SESSION_ID>", "Only signals from this session"))
                .arg(json_flag()),
        )
        .subcommand(
            Subcommand::new("link", "Attach a signal to a task", link)
                .arg(ArgSpec::positional("id", "<SIGNAL_ID>", "Signal to link"))
                .arg(ArgSpec::positional("task", "<TASK_ID>", "Task it supports")),
        )
}

fn list(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let request = ApiRequest::get("/signals")
        .query("project_id", args.value("project"))
        .query("session_id", args.value("session"));
    let signals = ctx.fetch_json("Fetching signals", request)?;
    print_list(
        ctx.ui,
        &signals,
        &["id", "kind", "summary", "task_id"],
        "signals",
        args.flag("json"),
    )?;
    Ok(CommandResult::success())
}

fn link(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let id = args.require("id")?;
    let task = args.require("task")?;

    let path = resource_path("signals", id, Some("link"))?;
    let signal = ctx.fetch_json(
        "Linking signal",
        ApiRequest::post(path).json(json!({ "task_id": id_value(task) })),
    )?;

    if !signal.is_null() {
        print_json(ctx.ui, &signal)?;
    }
    ctx.ui
        .success(&format!("Linked signal {} to task {}", id, task));
    Ok(CommandResult::success())
}
