//! Foundry CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use foundry::api::ApiClient;
use foundry::cli::{builtin_registry, Cli, CommandDispatcher, Context};
use foundry::config::SettingsSource;
use foundry::credentials::CredentialStore;
use foundry::ui::{create_ui, is_ci};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr so they never mix with command output.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("foundry=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("foundry=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Foundry starting with args: {:?}", cli);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let mut ui = create_ui(!is_ci(), cli.output_mode());

    let registry = match builtin_registry() {
        Ok(registry) => registry,
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            return ExitCode::from(1);
        }
    };

    // Settings resolve on the first request, so help never reads config.
    let credentials = CredentialStore::from_env();
    let client = ApiClient::lazy(
        SettingsSource {
            config_path: cli.config.clone(),
            api_url: cli.api_url.clone(),
            timeout_secs: cli.timeout,
        },
        credentials.clone(),
    );

    let mut ctx = Context::new(&client, &credentials, ui.as_mut());
    let result = CommandDispatcher::new(&registry).dispatch(&cli.args, &mut ctx);
    ExitCode::from(u8::try_from(result.exit_code).unwrap_or(1))
}
