//! `foundry auth`: login, logout, and account lookup.

use serde_json::{json, Value};
use tracing::debug;

use crate::api::ApiRequest;
use crate::cli::parser::ParsedInvocation;
use crate::cli::registry::{ArgSpec, CommandGroup, Subcommand};
use crate::credentials::{redact_token, Credentials};
use crate::error::{FoundryError, Result};
use crate::ui::Prompt;

use super::display::print_json;
use super::{json_flag, CommandResult, Context};

pub fn group() -> CommandGroup {
    CommandGroup::new("auth", "Log in and manage stored credentials")
        .subcommand(
            Subcommand::new("login", "Log in and store an API token", login)
                .arg(ArgSpec::value("email", "<EMAIL>", "Account email"))
                .arg(ArgSpec::value(
                    "password",
                    "<PASSWORD>",
                    "Account password (prompted for when omitted)",
                ))
                .arg(ArgSpec::value(
                    "token",
                    "<TOKEN>",
                    "Store an existing API token instead of logging in",
                )),
        )
        .subcommand(Subcommand::new("logout", "Forget the stored token", logout))
        .subcommand(
            Subcommand::new("whoami", "Show the logged-in account", whoami).arg(json_flag()),
        )
}

fn login(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    if let Some(token) = args.value("token") {
        let me = ctx.fetch_json(
            "Verifying token",
            ApiRequest::get("/auth/me").header("Authorization", format!("Bearer {}", token)),
        )?;
        let email = me.get("email").and_then(Value::as_str).map(String::from);
        store(ctx, token, email)?;
        return Ok(CommandResult::success());
    }

    let email = match args.value("email") {
        Some(email) => email.to_string(),
        None => ctx.ui.prompt(&Prompt::input("email", "Email"))?,
    };
    let password = match args.value("password") {
        Some(password) => password.to_string(),
        None => ctx.ui.prompt(&Prompt::password("password", "Password"))?,
    };

    let body = ctx.fetch_json(
        "Logging in",
        ApiRequest::post("/auth/login").json(json!({ "email": email, "password": password })),
    )?;
    let token = body
        .get("token")
        .or_else(|| body.get("access_token"))
        .and_then(Value::as_str)
        .ok_or_else(|| FoundryError::InvalidResponse {
            message: "login response did not include a token".to_string(),
        })?;

    store(ctx, token, Some(email))?;
    Ok(CommandResult::success())
}

fn store(ctx: &mut Context<'_>, token: &str, email: Option<String>) -> Result<()> {
    let credentials = Credentials::new(token)
        .with_email(email.clone())
        .with_api_url(ctx.backend.base_url());
    ctx.credentials.save(&credentials)?;
    debug!(token = %redact_token(token), "stored token");

    match email {
        Some(email) => ctx.ui.success(&format!("Logged in as {}", email)),
        None => ctx.ui.success("Logged in"),
    }
    if ctx.credentials.token_from_env() {
        ctx.ui
            .warning("FOUNDRY_TOKEN is set and takes precedence over the stored token");
    }
    Ok(())
}

fn logout(ctx: &mut Context<'_>, _args: &ParsedInvocation) -> Result<CommandResult> {
    let stored = ctx.credentials.load()?;

    if stored.is_some() {
        // Revoking server-side is best effort; the local token goes regardless.
        if let Err(e) = ctx.send("Logging out", ApiRequest::post("/auth/logout")) {
            debug!(error = %e, "server-side logout failed");
        }
    }
    ctx.credentials.clear()?;

    match stored {
        Some(_) => ctx.ui.success("Logged out"),
        None => ctx.ui.message("Not logged in"),
    }
    if ctx.credentials.token_from_env() {
        ctx.ui
            .warning("FOUNDRY_TOKEN is still set; requests will keep using it");
    }
    Ok(CommandResult::success())
}

fn whoami(ctx: &mut Context<'_>, args: &ParsedInvocation) -> Result<CommandResult> {
    ctx.credentials.require_token()?;
    let me = ctx.fetch_json("Fetching account", ApiRequest::get("/auth/me"))?;

    if args.flag("json") {
        print_json(ctx.ui, &me)?;
        return Ok(CommandResult::success());
    }

    match me
        .get("email")
        .or_else(|| me.get("username"))
        .and_then(Value::as_str)
    {
        Some(who) => ctx.ui.output(who),
        None => print_json(ctx.ui, &me)?,
    }
    Ok(CommandResult::success())
}

#[cfg(test)]
mod tests {
    use crate::api::Method;
    use crate::cli::commands::testing::Harness;
    use serde_json::json;

    #[test]
    fn login_posts_credentials_and_stores_token() {
        let mut h = Harness::new();
        h.backend.respond_json(json!({"token": "tok_abcdefghijkl"}));

        let result = h.run(&["auth", "login", "--email", "dev@example.com", "--password", "pw"]);
        assert!(result.success);

        let request = h.backend.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/auth/login");
        assert_eq!(
            request.body,
            Some(json!({"email": "dev@example.com", "password": "pw"}))
        );

        let saved = h.store.load().unwrap().unwrap();
        assert_eq!(saved.token, "tok_abcdefghijkl");
        assert_eq!(saved.email.as_deref(), Some("dev@example.com"));
        assert!(h.ui.has_success("Logged in as dev@example.com"));
    }

    #[test]
    fn login_accepts_access_token_field() {
        let mut h = Harness::new();
        h.backend.respond_json(json!({"access_token": "at_1", "token_type": "bearer"}));
        h.run(&["login", "--email", "a@b.c", "--password", "pw"]);
        assert_eq!(h.store.token().unwrap().as_deref(), Some("at_1"));
    }

    #[test]
    fn login_prompts_for_missing_values() {
        let mut h = Harness::new();
        h.ui.set_prompt_response("email", "dev@example.com");
        h.ui.set_prompt_response("password", "hunter2");
        h.backend.respond_json(json!({"token": "t"}));

        assert!(h.run(&["login"]).success);
        assert_eq!(h.ui.prompts_shown(), &["email", "password"]);
        assert_eq!(
            h.backend.last_request().unwrap().body,
            Some(json!({"email": "dev@example.com", "password": "hunter2"}))
        );
    }

    #[test]
    fn login_without_input_fails_cleanly() {
        let mut h = Harness::new();
        let result = h.run(&["auth", "login"]);
        assert_eq!(result.exit_code, 1);
        assert!(h.ui.has_error("--email"));
        assert!(h.backend.requests().is_empty());
    }

    #[test]
    fn login_with_token_verifies_it() {
        let mut h = Harness::new();
        h.backend.respond_json(json!({"email": "ci@example.com"}));

        assert!(h.run(&["auth", "login", "--token", "pat_123456789"]).success);

        let request = h.backend.last_request().unwrap();
        assert_eq!(request.path, "/auth/me");
        assert!(request
            .headers
            .contains(&("Authorization".to_string(), "Bearer pat_123456789".to_string())));
        assert_eq!(h.store.token().unwrap().as_deref(), Some("pat_123456789"));
    }

    #[test]
    fn rejected_token_is_not_stored() {
        let mut h = Harness::new();
        h.backend.fail_with(401, "Invalid token");
        let result = h.run(&["auth", "login", "--token", "bad"]);
        assert_eq!(result.exit_code, 1);
        assert!(h.store.load().unwrap().is_none());
        assert!(h.ui.has_error("Invalid token"));
    }

    #[test]
    fn login_response_without_token_is_an_error() {
        let mut h = Harness::new();
        h.backend.respond_json(json!({"ok": true}));
        let result = h.run(&["login", "--email", "a@b.c", "--password", "pw"]);
        assert_eq!(result.exit_code, 1);
        assert!(h.ui.has_error("did not include a token"));
    }

    #[test]
    fn logout_clears_store_and_calls_backend() {
        let mut h = Harness::logged_in();
        assert!(h.run(&["logout"]).success);
        assert!(h.store.load().unwrap().is_none());
        assert_eq!(h.backend.requests()[0].path, "/auth/logout");
        assert!(h.ui.has_success("Logged out"));
    }

    #[test]
    fn logout_survives_backend_failure() {
        let mut h = Harness::logged_in();
        h.backend.fail_with(500, "down");
        assert!(h.run(&["auth", "logout"]).success);
        assert!(h.store.load().unwrap().is_none());
    }

    #[test]
    fn logout_when_logged_out_is_fine() {
        let mut h = Harness::new();
        assert!(h.run(&["auth", "logout"]).success);
        assert!(h.backend.requests().is_empty());
        assert!(h.ui.has_message("Not logged in"));
    }

    #[test]
    fn whoami_requires_login() {
        let mut h = Harness::new();
        let result = h.run(&["auth", "whoami"]);
        assert_eq!(result.exit_code, 1);
        assert!(h.ui.has_error("Not logged in"));
        assert!(h.backend.requests().is_empty());
    }

    #[test]
    fn whoami_prints_email_or_json() {
        let mut h = Harness::logged_in();
        h.backend.respond_json(json!({"id": 1, "email": "dev@example.com"}));
        h.run(&["auth", "whoami"]);
        assert_eq!(h.ui.outputs(), &["dev@example.com"]);

        h.ui.clear();
        h.backend.respond_json(json!({"id": 1, "email": "dev@example.com"}));
        h.run(&["auth", "whoami", "--json"]);
        assert!(h.ui.has_output("\"id\": 1"));
    }
}
