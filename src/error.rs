//! Error types for Foundry CLI operations.
//!
//! This module defines [`FoundryError`], the primary error type used throughout
//! the client, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Resolution and parse failures are usage errors ([`FoundryError::is_usage`])
//! - Backend failures carry the HTTP status and the backend's own message
//! - Use `anyhow::Error` (via `FoundryError::Other`) for unexpected errors
//! - Every error is rendered as a single line by the dispatcher

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Foundry CLI operations.
#[derive(Debug, Error)]
pub enum FoundryError {
    /// First token matched neither a command group nor an alias.
    #[error("Unknown command '{name}'")]
    UnknownCommand { name: String },

    /// Token after a group did not name one of its subcommands.
    #[error("Unknown subcommand '{name}' for '{group}'")]
    UnknownSubcommand { group: String, name: String },

    /// A required positional argument or flag was not provided.
    #[error("Missing required argument {name}")]
    MissingArgument { name: String },

    /// A value-taking flag appeared without a value.
    #[error("Flag {flag} requires a value")]
    MissingValue { flag: String },

    /// A flag that the subcommand does not declare.
    #[error("Unrecognized flag '{flag}'")]
    UnknownFlag { flag: String },

    /// A provided value failed validation.
    #[error("Invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },

    /// Command needs a stored token but none is available.
    #[error("Not logged in. Run 'foundry auth login' first")]
    NotAuthenticated,

    /// Backend answered with a non-success status.
    #[error("{method} {path} failed with HTTP {status}: {message}")]
    Http {
        status: u16,
        method: String,
        path: String,
        message: String,
    },

    /// Backend answered with a body that does not have the expected shape.
    #[error("Invalid response from backend: {message}")]
    InvalidResponse { message: String },

    /// Failed to parse a configuration or credentials file.
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The command table failed validation.
    #[error("Invalid command registry: {0}")]
    Registry(#[from] crate::cli::registry::RegistryError),

    /// Network or transport failure.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FoundryError {
    /// Whether the error comes from resolving or parsing the command line.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::UnknownCommand { .. }
                | Self::UnknownSubcommand { .. }
                | Self::MissingArgument { .. }
                | Self::MissingValue { .. }
                | Self::UnknownFlag { .. }
                | Self::InvalidValue { .. }
        )
    }
}

/// Result type alias for Foundry CLI operations.
pub type Result<T> = std::result::Result<T, FoundryError>;
