//! `foundry session`: discovery sessions and their conversation.

use serde_json::{json, Value};

use crate::api::ApiRequest;
use crate::cli::parser::ParsedInvocation;
use crate::cli::registry::{ArgSpec, CommandGroup, Subcommand};
use crate::error::Result;

use super::display::{print_json, print_list};
use super::{describe, id_value, json_flag, object, resource_path, text, CommandResult, Context};

fn session_id() -> ArgSpec {
    ArgSpec::positional("id", "<SESSION_ID>", "Session identifier")
}

pub fn group() -> CommandGroup {
    CommandGroup::new("session", "Run discovery sessions")
        .subcommand(
            Subcommand::new("list", "List sessions", list)
                .arg(ArgSpec::value("project", "<PROJECT_ID>", "Only sessions in this project"))
                .arg(json_flag()),
        )
        .subcommand(
            Subcommand::new("create", "Create a session in a project", create)
                .arg(ArgSpec::value("project", "<PROJECT_ID>", "Owning project").required())
                .arg(ArgSpec::value("title", "<TITLE>", "Session title")),
        )
        .subcommand(Subcommand::new("start", "Start a session", start).arg(session_id()))
        .subcommand(
            Subcommand::new("send", "Send a message to a session", send)
                .arg(session_id())
                .arg(ArgSpec::variadic(
                    "message",
                    "<MESSAGE>",
                    "Message text; words are joined with spaces",
                )),
        )
        .subcommand(Subcommand::new("end", "End a session", end).arg(session_id()))
        .subcommand(Subcommand::new("get", "Show one session", get).arg(session_id()))
}

fn list(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let request = ApiRequest::get("/sessions").query("project_id", args.value("project"));
    let sessions = ctx.fetch_json("Fetching sessions", request)?;
    print_list(
        ctx.ui,
        &sessions,
        &["id", "title", "status", "project_id"],
        "sessions",
        args.flag("json"),
    )?;
    Ok(CommandResult::success())
}

fn create(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let body = object(vec![
        ("project_id", Some(id_value(args.require("project")?))),
        ("title", text(args, "title")),
    ]);
    let session = ctx.fetch_json("Creating session", ApiRequest::post("/sessions").json(body))?;

    print_json(ctx.ui, &session)?;
    ctx.ui
        .success(&format!("Created session {}", describe(&session)));
    Ok(CommandResult::success())
}

fn start(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    transition(ctx, args, "start", "Started")
}

fn end(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    transition(ctx, args, "end", "Ended")
}

fn transition(
    ctx: &mut Context<'_>,
    args: &ParsedInvocation,
    action: &str,
    past: &str,
) -> Result<CommandResult> {
    let id = args.require("id")?;
    let path = resource_path("sessions", id, Some(action))?;
    let session = ctx.fetch_json(&format!("{} session", capitalize(action)), ApiRequest::post(path))?;

    if !session.is_null() {
        print_json(ctx.ui, &session)?;
    }
    ctx.ui.success(&format!("{} session {}", past, id));
    Ok(CommandResult::success())
}

fn send(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let path = resource_path("sessions", args.require("id")?, Some("messages"))?;
    let content = args.values("message").join(" ");

    let reply = ctx.fetch_json(
        "Sending message",
        ApiRequest::post(path).json(json!({ "content": content })),
    )?;
    print_reply(ctx, &reply)?;
    Ok(CommandResult::success())
}

/// Show the assistant's answer when the backend returns one, else the record.
fn print_reply(ctx: &mut Context<'_>, reply: &Value) -> Result<()> {
    let answer = ["reply", "response"]
        .iter()
        .find_map(|key| reply.get(*key))
        .and_then(|r| r.get("content").or(Some(r)))
        .and_then(Value::as_str);

    match answer {
        Some(text) => ctx.ui.output(text),
        None => print_json(ctx.ui, reply)?,
    }
    Ok(())
}

fn get(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let path = resource_path("sessions", args.require("id")?, None)?;
    let session = ctx.fetch_json("Fetching session", ApiRequest::get(path))?;
    print_json(ctx.ui, &session)?;
    Ok(CommandResult::success())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
