//! Foundry - command-line client for the Foundry product-discovery backend.
//!
//! Every command is described once in a declarative [`cli::Registry`]; the
//! dispatcher resolves argv against it, renders help from it, and calls the
//! matching handler, which talks to the REST API through [`api::Backend`].
//!
//! # Modules
//!
//! - [`api`] - Request/response types and the HTTP client
//! - [`cli`] - Registry, parser, help renderer, dispatcher, and handlers
//! - [`config`] - Settings file and environment resolution
//! - [`credentials`] - Stored API token
//! - [`error`] - Error types and result aliases
//! - [`ui`] - Terminal output, prompts, spinners, and tables
//!
//! # Example
//!
//! ```
//! use foundry::cli::{builtin_registry, CommandDispatcher, Resolution};
//!
//! let registry = builtin_registry().unwrap();
//! let dispatcher = CommandDispatcher::new(&registry);
//!
//! let args: Vec<String> = vec!["login".into(), "--email".into(), "a@b.c".into()];
//! match dispatcher.resolve(&args).unwrap() {
//!     Resolution::Invoke { group, subcommand, .. } => {
//!         assert_eq!((group.name, subcommand.name), ("auth", "login"));
//!     }
//!     other => panic!("unexpected resolution: {:?}", other),
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod ui;

pub use error::{FoundryError, Result};
