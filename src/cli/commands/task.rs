//! `foundry task`: plan, track, and drive tasks through their lifecycle.

use serde_json::json;

use crate::api::ApiRequest;
use crate::cli::parser::ParsedInvocation;
use crate::cli::registry::{ArgSpec, CommandGroup, Subcommand};
use crate::error::{FoundryError, Result};

use super::display::{print_json, print_list};
use super::{json_flag, resource_path, CommandResult, Context};

/// Statuses the backend accepts for a task.
pub const TASK_STATUSES: &[&str] = &["todo", "in_progress", "review", "done", "blocked"];

fn task_id() -> ArgSpec {
    ArgSpec::positional("id", "<TASK_ID>", "Task identifier")
}

pub fn group() -> CommandGroup {
    CommandGroup::new("task", "Plan and track tasks")
        .subcommand(
            Subcommand::new("list", "List tasks", list)
                .arg(ArgSpec::value("project", "<PROJECT_ID>", "Only tasks in this project"))
                .arg(ArgSpec::value("status", "<STATUS>", "Only tasks with this status"))
                .arg(json_flag()),
        )
        .subcommand(Subcommand::new("get", "Show one task", get).arg(task_id()))
        .subcommand(
            Subcommand::new("update-status", "Move a task to another status", update_status)
                .arg(task_id())
                .arg(ArgSpec::positional(
                    "status",
                    "<STATUS>",
                    "One of: todo, in_progress, review, done, blocked",
                )),
        )
        .subcommand(
            Subcommand::new("spec", "Generate a spec for a task", spec).arg(task_id()),
        )
        .subcommand(
            Subcommand::new("implement", "Start implementing a task", implement).arg(task_id()),
        )
        .subcommand(
            Subcommand::new("measure", "Measure the outcome of a task", measure).arg(task_id()),
        )
}

fn parse_status(raw: &str) -> Result<&'static str> {
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    TASK_STATUSES
        .iter()
        .copied()
        .find(|s| *s == normalized)
        .ok_or_else(|| FoundryError::InvalidValue {
            name: "<STATUS>".to_string(),
            message: format!("'{}' is not one of {}", raw, TASK_STATUSES.join(", ")),
        })
}

fn list(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let status = args.value("status").map(parse_status).transpose()?;
    let request = ApiRequest::get("/tasks")
        .query("project_id", args.value("project"))
        .query("status", status);

    let tasks = ctx.fetch_json("Fetching tasks", request)?;
    print_list(
        ctx.ui,
        &tasks,
        &["id", "title", "status", "project_id"],
        "tasks",
        args.flag("json"),
    )?;
    Ok(CommandResult::success())
}

fn get(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let path = resource_path("tasks", args.require("id")?, None)?;
    let task = ctx.fetch_json("Fetching task", ApiRequest::get(path))?;
    print_json(ctx.ui, &task)?;
    Ok(CommandResult::success())
}

fn update_status(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let id = args.require("id")?;
    let status = parse_status(args.require("status")?)?;

    let path = resource_path("tasks", id, Some("status"))?;
    let task = ctx.fetch_json(
        "Updating task",
        ApiRequest::patch(path).json(json!({ "status": status })),
    )?;

    if !task.is_null() {
        print_json(ctx.ui, &task)?;
    }
    ctx.ui.success(&format!("Task {} is now {}", id, status));
    Ok(CommandResult::success())
}

fn spec(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    run_stage(ctx, args, "spec", "Generating spec")
}

fn implement(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    run_stage(ctx, args, "implement", "Starting implementation")
}

fn measure(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    run_stage(ctx, args, "measure", "Measuring outcome")
}

/// POST to one of the task lifecycle endpoints and print what comes back.
fn run_stage(
    ctx: &mut Context<'_>,
    args: &ParsedInvocation,
    stage: &str,
    label: &str,
) -> Result<CommandResult> {
    let id = args.require("id")?;
    let path = resource_path("tasks", id, Some(stage))?;
    let result = ctx.fetch_json(label, ApiRequest::post(path))?;

    if !result.is_null() {
        print_json(ctx.ui, &result)?;
    }
    ctx.ui.success(&format!("Task {}: {} requested", id, stage));
    Ok(CommandResult::success())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::cli::commands::testing::Harness;

    #[test]
    fn status_parsing_normalizes() {
        assert_eq!(parse_status("in-progress").unwrap(), "in_progress");
        assert_eq!(parse_status("DONE").unwrap(), "done");
        let err = parse_status("finished").unwrap_err();
        assert!(err.to_string().contains("blocked"));
    }

    #[test]
    fn list_validates_status_filter() {
        let mut h = Harness::logged_in();
        assert_eq!(h.run(&["task", "list", "--status", "finished"]).exit_code, 1);
        assert!(h.backend.requests().is_empty());

        h.backend.respond_json(json!([{"id": 1, "title": "Write copy", "status": "todo"}]));
        assert!(h.run(&["task", "list", "--status", "todo", "--project", "2"]).success);
        let request = h.backend.last_request().unwrap();
        assert_eq!(
            request.query,
            vec![
                ("project_id".to_string(), "2".to_string()),
                ("status".to_string(), "todo".to_string()),
            ]
        );
    }

    #[test]
    fn update_status_patches() {
        let mut h = Harness::logged_in();
        h.backend.respond_json(json!({"id": 7, "status": "review"}));

        assert!(h.run(&["task", "update-status", "7", "review"]).success);
        let request = h.backend.last_request().unwrap();
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.path, "/tasks/7/status");
        assert_eq!(request.body, Some(json!({"status": "review"})));
        assert!(h.ui.has_success("Task 7 is now review"));
    }

    #[test]
    fn update_status_rejects_unknown_status() {
        let mut h = Harness::logged_in();
        assert_eq!(h.run(&["task", "update-status", "7", "shipped"]).exit_code, 1);
        assert!(h.ui.has_error("shipped"));
        assert!(h.backend.requests().is_empty());
    }

    #[test]
    fn lifecycle_stages_post_to_their_endpoint() {
        let mut h = Harness::logged_in();
        for stage in ["spec", "implement", "measure"] {
            h.backend.respond_json(json!({"task_id": 7, "stage": stage}));
            assert!(h.run(&["task", stage, "7"]).success);
            let request = h.backend.last_request().unwrap();
            assert_eq!(request.method, Method::Post);
            assert_eq!(request.path, format!("/tasks/7/{}", stage));
        }
        assert_eq!(h.ui.successes().len(), 3);
    }

    #[test]
    fn get_prints_task() {
        let mut h = Harness::logged_in();
        h.backend.respond_json(json!({"id": 7, "title": "Write copy"}));
        h.run(&["task", "get", "7"]);
        assert!(h.ui.has_output("Write copy"));
    }
}
