//! Client configuration.
//!
//! Settings live in `$FOUNDRY_HOME/config.yml` (default `~/.foundry`) and
//! can be overridden by environment variables and global flags.
//!
//! # Example
//!
//! ```
//! use foundry::config::SettingsSource;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "timeout_secs: 10").unwrap();
//!
//! let source = SettingsSource {
//!     config_path: Some(path),
//!     ..Default::default()
//! };
//! let settings = source.resolve().unwrap();
//! assert_eq!(settings.timeout_secs, 10);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    default_config_path, foundry_home, load_settings_file, normalize_api_url, parse_settings,
    SettingsSource, HOME_ENV,
};
pub use schema::{Settings, SettingsFile, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
