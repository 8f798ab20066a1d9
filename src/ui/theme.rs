//! Colors for status lines.

use console::{Style, Term};

use super::OutputMode;

/// Kind of status line, each with its own marker and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Warning,
    Error,
}

impl Level {
    fn marker(self) -> &'static str {
        match self {
            Level::Success => "✓",
            Level::Warning => "⚠",
            Level::Error => "✗",
        }
    }

    /// Errors survive `--quiet`; the rest follow the output mode.
    pub fn is_shown(self, mode: OutputMode) -> bool {
        self == Level::Error || mode.shows_status()
    }
}

/// Styles used by the terminal UI.
#[derive(Debug, Clone)]
pub struct FoundryTheme {
    success: Style,
    warning: Style,
    error: Style,
}

impl Default for FoundryTheme {
    fn default() -> Self {
        Self::colored()
    }
}

impl FoundryTheme {
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
        }
    }

    /// No escape codes at all.
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
        }
    }

    /// Colored theme when the environment allows it, else plain.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// `msg` prefixed with the level's marker, styled.
    pub fn format(&self, level: Level, msg: &str) -> String {
        let style = match level {
            Level::Success => &self.success,
            Level::Warning => &self.warning,
            Level::Error => &self.error,
        };
        style
            .apply_to(format!("{} {}", level.marker(), msg))
            .to_string()
    }
}

/// Colors are used only when `NO_COLOR` is unset and stderr, where status
/// lines go, is a terminal.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    Term::stderr().is_term()
}
