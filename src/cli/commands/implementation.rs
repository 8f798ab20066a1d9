//! `foundry implementation`: read-only view of task implementations.

use crate::api::ApiRequest;
use crate::cli::parser::ParsedInvocation;
use crate::cli::registry::{ArgSpec, CommandGroup, Subcommand};
use crate::error::Result;

use super::display::{print_json, print_list};
use super::{json_flag, resource_path, CommandResult, Context};

pub fn group() -> CommandGroup {
    CommandGroup::new("implementation", "Inspect task implementations")
        .subcommand(
            Subcommand::new("list", "List implementations", list)
                .arg(ArgSpec::value("task", "<TASK_ID>", "Only implementations of this task"))
                .arg(json_flag()),
        )
        .subcommand(
            Subcommand::new("get", "Show one implementation", get).arg(ArgSpec::positional(
                "id",
                "<IMPLEMENTATION_ID>",
                "Implementation to show",
            )),
        )
}

fn list(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let request = ApiRequest::get("/implementations").query("task_id", args.value("task"));
    let implementations = ctx.fetch_json("Fetching implementations", request)?;
    print_list(
        ctx.ui,
        &implementations,
        &["id", "task_id", "status", "created_at"],
        "implementations",
        args.flag("json"),
    )?;
    Ok(CommandResult::success())
}

fn get(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let path = resource_path("implementations", args.require("id")?, None)?;
    let implementation = ctx.fetch_json("Fetching implementation", ApiRequest::get(path))?;
    print_json(ctx.ui, &implementation)?;
    Ok(CommandResult::success())
}
