//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::{
    prompt_user, FoundryTheme, Level, NonInteractiveUI, OutputMode, ProgressSpinner, Prompt,
    SpinnerHandle, UserInterface,
};

/// Colored UI for a real terminal.
///
/// Data goes to stdout and status lines to stderr, so `foundry ... | jq`
/// only ever sees data.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: FoundryTheme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: FoundryTheme::detect(),
            mode,
        }
    }

    fn status(&mut self, level: Level, msg: &str) {
        if level.is_shown(self.mode) {
            let line = self.theme.format(level, msg);
            writeln!(self.err, "{}", line).ok();
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn output(&mut self, text: &str) {
        writeln!(self.out, "{}", text.trim_end_matches('\n')).ok();
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        self.status(Level::Success, msg);
    }

    fn warning(&mut self, msg: &str) {
        self.status(Level::Warning, msg);
    }

    fn error(&mut self, msg: &str) {
        self.status(Level::Error, msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        prompt_user(prompt, &self.err)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(ProgressSpinner::for_mode(self.mode, message))
    }

    fn is_interactive(&self) -> bool {
        self.err.is_term()
    }
}

const CI_MARKERS: &[&str] = &["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "JENKINS_URL"];

/// True under a known CI runner.
pub fn is_ci() -> bool {
    CI_MARKERS.iter().any(|var| std::env::var_os(var).is_some())
}

/// Terminal UI when asked for and stderr is a tty, plain otherwise.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stderr().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
