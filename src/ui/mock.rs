//! Recording [`UserInterface`] for tests.
//!
//! Everything written is kept in one ordered transcript, so tests can
//! check both what was printed and on which channel. Prompts are answered
//! from a table keyed by [`Prompt::key`].
//!
//! # Example
//!
//! ```
//! use foundry::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("email", "dev@example.com");
//!
//! ui.output("{\"id\": 1}");
//! ui.success("Done!");
//!
//! assert!(ui.has_output("\"id\""));
//! assert!(ui.successes().contains(&"Done!".to_string()));
//! ```

use std::collections::HashMap;

use crate::error::{FoundryError, Result};

use super::{OutputMode, Prompt, SpinnerHandle, UserInterface};

/// Where a line went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Output,
    Message,
    Success,
    Warning,
    Error,
    Spinner,
}

#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    transcript: Vec<(Channel, String)>,
    answers: HashMap<String, String>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Answer prompts with `key` using `response`.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.answers.insert(key.to_string(), response.to_string());
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Every recorded line, oldest first.
    pub fn transcript(&self) -> &[(Channel, String)] {
        &self.transcript
    }

    /// Lines written to one channel.
    pub fn lines(&self, channel: Channel) -> Vec<String> {
        self.transcript
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn outputs(&self) -> Vec<String> {
        self.lines(Channel::Output)
    }

    /// Command output joined with newlines.
    pub fn output_text(&self) -> String {
        self.outputs().join("\n")
    }

    pub fn messages(&self) -> Vec<String> {
        self.lines(Channel::Message)
    }

    pub fn successes(&self) -> Vec<String> {
        self.lines(Channel::Success)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.lines(Channel::Warning)
    }

    pub fn errors(&self) -> Vec<String> {
        self.lines(Channel::Error)
    }

    /// Labels of spinners started, i.e. one per backend request.
    pub fn spinners(&self) -> Vec<String> {
        self.lines(Channel::Spinner)
    }

    /// Keys of prompts asked, in order.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Whether any line on `channel` contains `text`.
    pub fn contains(&self, channel: Channel, text: &str) -> bool {
        self.transcript
            .iter()
            .any(|(c, line)| *c == channel && line.contains(text))
    }

    pub fn has_output(&self, text: &str) -> bool {
        self.contains(Channel::Output, text)
    }

    pub fn has_message(&self, text: &str) -> bool {
        self.contains(Channel::Message, text)
    }

    pub fn has_success(&self, text: &str) -> bool {
        self.contains(Channel::Success, text)
    }

    pub fn has_warning(&self, text: &str) -> bool {
        self.contains(Channel::Warning, text)
    }

    pub fn has_error(&self, text: &str) -> bool {
        self.contains(Channel::Error, text)
    }

    /// Forget recorded lines and prompts; answers are kept.
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.prompts_shown.clear();
    }

    fn record(&mut self, channel: Channel, line: &str) {
        self.transcript.push((channel, line.to_string()));
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn output(&mut self, text: &str) {
        self.record(Channel::Output, text);
    }

    fn message(&mut self, msg: &str) {
        self.record(Channel::Message, msg);
    }

    fn success(&mut self, msg: &str) {
        self.record(Channel::Success, msg);
    }

    fn warning(&mut self, msg: &str) {
        self.record(Channel::Warning, msg);
    }

    fn error(&mut self, msg: &str) {
        self.record(Channel::Error, msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        self.prompts_shown.push(prompt.key.clone());

        self.answers
            .get(&prompt.key)
            .or(prompt.default.as_ref())
            .cloned()
            .ok_or_else(|| FoundryError::MissingArgument {
                name: format!("--{}", prompt.key),
            })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.record(Channel::Spinner, message);
        Box::new(MockSpinner)
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

pub struct MockSpinner;

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_and_clear(&mut self) {}
}
