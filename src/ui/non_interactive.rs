//! Plain output for pipes, scripts, and CI.

use crate::error::{FoundryError, Result};

use super::{FoundryTheme, Level, OutputMode, Prompt, SpinnerHandle, UserInterface};

/// Writes uncolored lines and never waits on stdin.
///
/// Prompts resolve to their default or fail naming the flag that should
/// have been passed instead.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: FoundryTheme,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: FoundryTheme::plain(),
        }
    }

    fn status(&self, level: Level, msg: &str) {
        if level.is_shown(self.mode) {
            eprintln!("{}", self.theme.format(level, msg));
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn output(&mut self, text: &str) {
        println!("{}", text.trim_end_matches('\n'));
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", msg);
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
        match &prompt.default {
            Some(default) => Ok(default.clone()),
            None => Err(FoundryError::MissingArgument {
                name: format!("--{}", prompt.key),
            }),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.echoes_requests() {
            eprintln!("{}...", message);
        }
        Box::new(SilentSpinner)
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

struct SilentSpinner;

impl SpinnerHandle for SilentSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_and_clear(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_uses_default() {
        let mut ui = NonInteractiveUI::new(OutputMode::Normal);
        let prompt = Prompt::input("email", "Email").with_default("me@example.com");
        assert_eq!(ui.prompt(&prompt).unwrap(), "me@example.com");
    }

    #[test]
    fn prompt_without_default_names_flag() {
        let mut ui = NonInteractiveUI::new(OutputMode::Normal);
        let err = ui.prompt(&Prompt::password("password", "Password")).unwrap_err();
        assert!(err.to_string().contains("--password"));
    }

    #[test]
    fn never_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Verbose);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn spinner_accepts_updates() {
        let mut ui = NonInteractiveUI::new(OutputMode::Quiet);
        let mut spinner = ui.start_spinner("Fetching");
        spinner.set_message("Still fetching");
        spinner.finish_and_clear();
    }
}
