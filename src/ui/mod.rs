//! Terminal output and prompts.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for pipes, scripts, and CI
//! - [`MockUI`] for capturing output in tests
//! - Prompts, spinners, and tables
//!
//! Command data (JSON, tables, help text) goes through
//! [`UserInterface::output`] and is never suppressed. Status lines respect
//! the [`OutputMode`].
//!
//! # Example
//!
//! ```
//! use foundry::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.success("Logged in");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::{Channel, MockSpinner, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::prompt_user;
pub use spinner::ProgressSpinner;
pub use table::Table;
pub use terminal::{create_ui, is_ci, TerminalUI};
pub use theme::{should_use_colors, FoundryTheme, Level};

use crate::error::Result;

/// Everything a command may say or ask.
///
/// Handlers only see this trait; the binary picks a terminal or plain
/// implementation and tests use [`MockUI`].
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Print command output (help, JSON, tables) to stdout.
    fn output(&mut self, text: &str);

    /// Display an informational message.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message on stderr.
    fn error(&mut self, msg: &str);

    /// Ask a question and return the answer.
    fn prompt(&mut self, prompt: &Prompt) -> Result<String>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Remove the spinner without leaving a line behind.
    fn finish_and_clear(&mut self);
}

/// A question the user answers with a line of text.
///
/// `key` doubles as the flag that can supply the value instead, so
/// non-interactive UIs can say `--email` is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub key: String,
    pub question: String,
    /// Input is not echoed.
    pub secret: bool,
    pub default: Option<String>,
}

impl Prompt {
    pub fn input(key: &str, question: &str) -> Self {
        Self {
            key: key.to_string(),
            question: question.to_string(),
            secret: false,
            default: None,
        }
    }

    /// Hidden-input prompt for passwords and tokens.
    pub fn password(key: &str, question: &str) -> Self {
        Self {
            secret: true,
            ..Self::input(key, question)
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_prompt_is_secret() {
        let prompt = Prompt::password("password", "Password");
        assert_eq!(prompt.key, "password");
        assert_eq!(prompt.question, "Password");
        assert!(prompt.secret);
        assert!(prompt.default.is_none());
    }

    #[test]
    fn input_prompt_with_default() {
        let prompt = Prompt::input("email", "Email").with_default("dev@example.com");
        assert!(!prompt.secret);
        assert_eq!(prompt.default.as_deref(), Some("dev@example.com"));
    }
}
