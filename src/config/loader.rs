//! Configuration file discovery and layering.
//!
//! Sources in increasing priority:
//! 1. Built-in defaults
//! 2. `$FOUNDRY_HOME/config.yml` (or the `--config` path)
//! 3. `FOUNDRY_API_URL` / `FOUNDRY_TIMEOUT` and the matching global flags
//!
//! clap folds the environment variables into the flag values, so layer 3
//! arrives here as a single set of overrides.

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
use tracing::debug;

use crate::config::schema::{Settings, SettingsFile};
use crate::error::{FoundryError, Result};

/// Environment variable that relocates the Foundry home directory.
pub const HOME_ENV: &str = "FOUNDRY_HOME";

const CONFIG_FILE: &str = "config.yml";

/// Directory holding `config.yml` and `credentials.yml`.
///
/// `$FOUNDRY_HOME` when set, otherwise `~/.foundry`.
pub fn foundry_home() -> PathBuf {
    home_from(std::env::var_os(HOME_ENV).map(PathBuf::from))
}

fn home_from(env_value: Option<PathBuf>) -> PathBuf {
    match env_value {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".foundry"),
    }
}

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    foundry_home().join(CONFIG_FILE)
}

/// Where settings come from, captured before anything is read.
///
/// Resolution is deferred so that help and usage errors never touch the
/// filesystem.
#[derive(Debug, Clone, Default)]
pub struct SettingsSource {
    /// Explicit config file; falls back to [`default_config_path`].
    pub config_path: Option<PathBuf>,
    /// `--api-url` / `FOUNDRY_API_URL`.
    pub api_url: Option<String>,
    /// `--timeout` / `FOUNDRY_TIMEOUT`.
    pub timeout_secs: Option<u64>,
}

impl SettingsSource {
    /// Read the config file and apply overrides.
    pub fn resolve(&self) -> Result<Settings> {
        let path = self
            .config_path
            .clone()
            .unwrap_or_else(default_config_path);

        let file = load_settings_file(&path)?.unwrap_or_default();
        let settings = merge(file, self)?;
        debug!(api_url = %settings.api_url, timeout_secs = settings.timeout_secs, "resolved settings");
        Ok(settings)
    }
}

/// Load `config.yml`. A missing file yields `None`.
pub fn load_settings_file(path: &Path) -> Result<Option<SettingsFile>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file");
            return Ok(None);
        }
        Err(e) => return Err(FoundryError::Io(e)),
    };

    parse_settings(&content, path).map(Some)
}

/// Parse YAML content into a [`SettingsFile`].
pub fn parse_settings(content: &str, source_path: &Path) -> Result<SettingsFile> {
    if content.trim().is_empty() {
        return Ok(SettingsFile::default());
    }

    serde_yaml::from_str(content).map_err(|e| FoundryError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

fn merge(file: SettingsFile, overrides: &SettingsSource) -> Result<Settings> {
    let defaults = Settings::default();

    let api_url = overrides
        .api_url
        .clone()
        .or(file.api_url)
        .unwrap_or(defaults.api_url);
    let timeout_secs = overrides
        .timeout_secs
        .or(file.timeout_secs)
        .unwrap_or(defaults.timeout_secs);

    if timeout_secs == 0 {
        return Err(FoundryError::InvalidValue {
            name: "timeout".to_string(),
            message: "must be at least 1 second".to_string(),
        });
    }

    Ok(Settings {
        api_url: normalize_api_url(&api_url)?,
        timeout_secs,
    })
}

/// Validate an API base URL and drop any trailing slash.
pub fn normalize_api_url(raw: &str) -> Result<String> {
    let invalid = |message: String| FoundryError::InvalidValue {
        name: "api_url".to_string(),
        message,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(format!("'{}': {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("'{}' is not an http(s) URL", raw)));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}
