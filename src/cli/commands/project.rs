//! `foundry project`: list, create, inspect, and rename projects.

use crate::api::ApiRequest;
use crate::cli::parser::ParsedInvocation;
use crate::cli::registry::{ArgSpec, CommandGroup, Subcommand};
use crate::error::{FoundryError, Result};

use super::display::{print_json, print_list};
use super::{describe, json_flag, object, resource_path, text, CommandResult, Context};

pub fn group() -> CommandGroup {
    CommandGroup::new("project", "Manage projects")
        .subcommand(Subcommand::new("list", "List projects", list).arg(json_flag()))
        .subcommand(
            Subcommand::new("create", "Create a project", create)
                .arg(ArgSpec::positional("name", "<NAME>", "Project name"))
                .arg(ArgSpec::value(
                    "description",
                    "<TEXT>",
                    "What the project is about",
                )),
        )
        .subcommand(
            Subcommand::new("get", "Show one project", get)
                .arg(ArgSpec::positional("id", "<PROJECT_ID>", "Project to show")),
        )
        .subcommand(
            Subcommand::new("update", "Change a project's name or description", update)
                .arg(ArgSpec::positional("id", "<PROJECT_ID>", "Project to update"))
                .arg(ArgSpec::value("name", "<NAME>", "New name"))
                .arg(ArgSpec::value("description", "<TEXT>", "New description")),
        )
}

fn list(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let projects = ctx.fetch_json("Fetching projects", ApiRequest::get("/projects"))?;
    print_list(
        ctx.ui,
        &projects,
        &["id", "name", "description"],
        "projects",
        args.flag("json"),
    )?;
    Ok(CommandResult::success())
}

fn create(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let body = object(vec![
        ("name", text(args, "name")),
        ("description", text(args, "description")),
    ]);
    let project = ctx.fetch_json("Creating project", ApiRequest::post("/projects").json(body))?;

    print_json(ctx.ui, &project)?;
    ctx.ui
        .success(&format!("Created project {}", describe(&project)));
    Ok(CommandResult::success())
}

fn get(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let path = resource_path("projects", args.require("id")?, None)?;
    let project = ctx.fetch_json("Fetching project", ApiRequest::get(path))?;
    print_json(ctx.ui, &project)?;
    Ok(CommandResult::success())
}

fn update(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let id = args.require("id")?;
    if args.value("name").is_none() && args.value("description").is_none() {
        return Err(FoundryError::MissingArgument {
            name: "--name or --description".to_string(),
        });
    }

    let body = object(vec![
        ("name", text(args, "name")),
        ("description", text(args, "description")),
    ]);
    let project = ctx.fetch_json(
        "Updating project",
        ApiRequest::patch(resource_path("projects", id, None)?).json(body),
    )?;

    print_json(ctx.ui, &project)?;
    ctx.ui.success(&format!("Updated project {}", id));
    Ok(CommandResult::success())
}
