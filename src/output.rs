//! Output abstraction for quiet mode support.
//!
//! Reports are data and always printed. The summary line is chatter and
//! disappears in quiet mode.

/// Output handler that respects quiet mode.
///
/// Quiet mode is enabled if either `--quiet` or `--json-errors` is passed, or
/// the report itself is JSON, so stdout stays parseable.
#[derive(Debug, Clone)]
pub struct Output {
    quiet: bool,
}

impl Output {
    #[must_use]
    pub const fn new(quiet: bool, json_errors: bool, json_report: bool) -> Self {
        Self {
            quiet: quiet || json_errors || json_report,
        }
    }

    /// Print the report itself. Never suppressed.
    pub fn data(&self, msg: impl std::fmt::Display) {
        // Intentional CLI output, not debug logging
        print!("{msg}");
    }

    /// Print informational message (suppressed in quiet mode).
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet {
            // Intentional CLI output, not debug logging
            println!("{msg}");
        }
    }

    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        self.quiet
    }
}
