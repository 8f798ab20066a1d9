//! How much the CLI says besides command output.

/// Verbosity selected by the global `--quiet` / `--verbose` flags.
///
/// Command data (JSON, tables, help) is printed in every mode; only status
/// lines on stderr are affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Status lines, spinners, and a line per request in non-TTY mode.
    Verbose,
    #[default]
    Normal,
    /// Data and errors only.
    Quiet,
}

impl OutputMode {
    /// `--quiet` beats `--verbose` when both are given.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, true) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }

    pub fn shows_spinners(&self) -> bool {
        *self != Self::Quiet
    }

    /// Whether success, warning, and info lines are printed.
    pub fn shows_status(&self) -> bool {
        *self != Self::Quiet
    }

    /// Whether request labels are echoed when no spinner can be drawn.
    pub fn echoes_requests(&self) -> bool {
        *self == Self::Verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(OutputMode::from_flags(true, true), OutputMode::Quiet);
        assert_eq!(OutputMode::from_flags(false, true), OutputMode::Verbose);
        assert_eq!(OutputMode::from_flags(false, false), OutputMode::Normal);
    }

    #[test]
    fn quiet_hides_status_and_spinners() {
        assert!(!OutputMode::Quiet.shows_status());
        assert!(!OutputMode::Quiet.shows_spinners());
        assert!(OutputMode::Normal.shows_status());
        assert!(OutputMode::Normal.shows_spinners());
    }

    #[test]
    fn only_verbose_echoes_requests() {
        assert!(OutputMode::Verbose.echoes_requests());
        assert!(!OutputMode::Normal.echoes_requests());
        assert!(!OutputMode::Quiet.echoes_requests());
    }
}
