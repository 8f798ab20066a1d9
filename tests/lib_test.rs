//! Library integration tests.

use foundry::FoundryError;

#[test]
fn error_types_are_public() {
    let err = FoundryError::UnknownCommand {
        name: "test".into(),
    };
    assert!(err.to_string().contains("test"));
    assert!(err.is_usage());
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> foundry::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use foundry::cli::Cli;

    let cli = Cli::parse_from(["foundry", "--timeout", "5", "task", "list", "--json"]);
    assert_eq!(cli.timeout, Some(5));
    assert_eq!(cli.args, vec!["task", "list", "--json"]);
}

#[test]
fn handlers_run_against_mock_backend() {
    use foundry::api::MockBackend;
    use foundry::cli::{builtin_registry, CommandDispatcher, Context};
    use foundry::credentials::CredentialStore;
    use foundry::ui::MockUI;
    use serde_json::json;
    use tempfile::TempDir;

    let home = TempDir::new().unwrap();
    let store = CredentialStore::new(home.path().join("credentials.yml"));
    let backend = MockBackend::new();
    backend.respond_json(json!([{"id": 3, "title": "Kickoff", "status": "active"}]));
    let mut ui = MockUI::new();

    let registry = builtin_registry().unwrap();
    let args: Vec<String> = ["session", "list", "--project", "1"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let result = {
        let mut ctx = Context::new(&backend, &store, &mut ui);
        CommandDispatcher::new(&registry).dispatch(&args, &mut ctx)
    };

    assert!(result.success);
    assert!(ui.has_output("Kickoff"));
    assert_eq!(backend.last_request().unwrap().path, "/sessions");
}

#[test]
fn settings_resolve_from_file_and_overrides() {
    use foundry::config::SettingsSource;
    use std::fs;
    use tempfile::TempDir;

    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yml");
    fs::write(&path, "api_url: https://foundry.example.com/api/\ntimeout_secs: 12\n").unwrap();

    let settings = SettingsSource {
        config_path: Some(path.clone()),
        ..Default::default()
    }
    .resolve()
    .unwrap();
    assert_eq!(settings.api_url, "https://foundry.example.com/api");
    assert_eq!(settings.timeout_secs, 12);

    let settings = SettingsSource {
        config_path: Some(path),
        api_url: Some("http://localhost:9000".into()),
        timeout_secs: None,
    }
    .resolve()
    .unwrap();
    assert_eq!(settings.api_url, "http://localhost:9000");
    assert_eq!(settings.timeout_secs, 12);
}
