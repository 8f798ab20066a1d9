//! `foundry screener`: screener surveys and their responses.

use serde_json::Value;

use crate::api::ApiRequest;
use crate::cli::parser::ParsedInvocation;
use crate::cli::registry::{ArgSpec, CommandGroup, Subcommand};
use crate::error::Result;

use super::display::{print_json, print_list};
use super::{describe, id_value, json_flag, object, resource_path, text, CommandResult, Context};

pub fn group() -> CommandGroup {
    CommandGroup::new("screener", "Build and answer screener surveys")
        .subcommand(
            Subcommand::new("list", "List screeners", list)
                .arg(ArgSpec::value("project", "<PROJECT_ID>", "Only screeners in this project"))
                .arg(json_flag()),
        )
        .subcommand(
            Subcommand::new("create", "Create a screener", create)
                .arg(ArgSpec::positional("title", "<TITLE>", "Screener title"))
                .arg(ArgSpec::value("project", "<PROJECT_ID>", "Owning project").required())
                .arg(
                    ArgSpec::value("question", "<QUESTION>", "Question to ask; repeat for more")
                        .repeatable(),
                ),
        )
        .subcommand(
            Subcommand::new("get", "Show one screener", get)
                .arg(ArgSpec::positional("id", "<SCREENER_ID>", "Screener to show")),
        )
        .subcommand(
            Subcommand::new("respond", "Submit an answer to a screener", respond)
                .arg(ArgSpec::positional("id", "<SCREENER_ID>", "Screener to answer"))
                .arg(ArgSpec::variadic(
                    "answer",
                    "<ANSWER>",
                    "Answer text; words are joined with spaces",
                ))
                .arg(ArgSpec::value("respondent", "<NAME>", "Who is answering")),
        )
}

fn list(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let request = ApiRequest::get("/screeners").query("project_id", args.value("project"));
    let screeners = ctx.fetch_json("Fetching screeners", request)?;
    print_list(
        ctx.ui,
        &screeners,
        &["id", "title", "project_id"],
        "screeners",
        args.flag("json"),
    )?;
    Ok(CommandResult::success())
}

fn create(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let questions: Vec<Value> = args
        .values("question")
        .iter()
        .map(|q| Value::String(q.clone()))
        .collect();

    let body = object(vec![
        ("project_id", Some(id_value(args.require("project")?))),
        ("title", text(args, "title")),
        ("questions", Some(Value::Array(questions))),
    ]);
    let screener = ctx.fetch_json("Creating screener", ApiRequest::post("/screeners").json(body))?;

    print_json(ctx.ui, &screener)?;
    ctx.ui
        .success(&format!("Created screener {}", describe(&screener)));
    Ok(CommandResult::success())
}

fn get(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let path = resource_path("screeners", args.require("id")?, None)?;
    let screener = ctx.fetch_json("Fetching screener", ApiRequest::get(path))?;
    print_json(ctx.ui, &screener)?;
    Ok(CommandResult::success())
}

fn respond(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    let id = args.require("id")?;
    let body = object(vec![
        ("answer", Some(Value::String(args.values("answer").join(" ")))),
        ("respondent", text(args, "respondent")),
    ]);

    let path = resource_path("screeners", id, Some("responses"))?;
    let response = ctx.fetch_json("Submitting response", ApiRequest::post(path).json(body))?;

    if !response.is_null() {
        print_json(ctx.ui, &response)?;
    }
    ctx.ui.success(&format!("Recorded response to screener {}", id));
    Ok(CommandResult::success())
}
