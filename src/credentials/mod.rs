//! Stored login credentials.
//!
//! The bearer token returned by `auth login` is kept in
//! `$FOUNDRY_HOME/credentials.yml`. `FOUNDRY_TOKEN` takes precedence over
//! the stored token without touching the file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::foundry_home;
use crate::error::{FoundryError, Result};

/// Environment variable that overrides the stored token.
pub const TOKEN_ENV: &str = "FOUNDRY_TOKEN";

const CREDENTIALS_FILE: &str = "credentials.yml";

/// A saved login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Bearer token sent with every request.
    pub token: String,

    /// Account the token belongs to, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Backend that issued the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// When the token was stored.
    pub saved_at: DateTime<Utc>,
}

impl Credentials {
    /// Credentials stamped with the current time.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            email: None,
            api_url: None,
            saved_at: Utc::now(),
        }
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        self.api_url = api_url;
        self
    }
}

/// File-backed credential storage.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    env_token: Option<String>,
}

impl CredentialStore {
    /// Store at an explicit path, ignoring `FOUNDRY_TOKEN`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            env_token: None,
        }
    }

    /// Store under `$FOUNDRY_HOME`, honoring `FOUNDRY_TOKEN`.
    pub fn from_env() -> Self {
        let env_token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty());
        Self::new(foundry_home().join(CREDENTIALS_FILE)).with_env_token(env_token)
    }

    /// Token that overrides whatever is on disk.
    pub fn with_env_token(mut self, token: Option<String>) -> Self {
        self.env_token = token;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the active token comes from the environment.
    pub fn token_from_env(&self) -> bool {
        self.env_token.is_some()
    }

    /// Load saved credentials, `None` when nothing is stored.
    pub fn load(&self) -> Result<Option<Credentials>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(FoundryError::Io(e)),
        };

        let credentials = serde_yaml::from_str(&content).map_err(|e| {
            FoundryError::ConfigParseError {
                path: self.path.clone(),
                message: e.to_string(),
            }
        })?;

        Ok(Some(credentials))
    }

    /// Save credentials using write-to-temp-then-rename.
    ///
    /// On unix the file is created with mode `0600`.
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = serde_yaml::to_string(credentials)
            .map_err(|e| anyhow::anyhow!("Failed to serialize credentials: {}", e))?;

        let temp_path = self.path.with_extension("yml.tmp");
        let mut file = open_private(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&temp_path, &self.path)?;

        debug!(
            path = %self.path.display(),
            token = %redact_token(&credentials.token),
            "saved credentials"
        );
        Ok(())
    }

    /// Remove saved credentials. Returns whether anything was removed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(FoundryError::Io(e)),
        }
    }

    /// The active token: `FOUNDRY_TOKEN` first, then the stored one.
    pub fn token(&self) -> Result<Option<String>> {
        if let Some(token) = &self.env_token {
            return Ok(Some(token.clone()));
        }
        Ok(self.load()?.map(|c| c.token))
    }

    /// Like [`token`](Self::token), failing with `NotAuthenticated`.
    pub fn require_token(&self) -> Result<String> {
        self.token()?.ok_or(FoundryError::NotAuthenticated)
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}

/// Shorten a token for logs and status lines.
pub fn redact_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if token.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{}…", visible)
    }
}
