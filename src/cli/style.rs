//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips ANSI codes when the stream
//! is not a terminal (e.g. plain CI logs without color support).

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Success marker
pub const CHECK: &str = "✓";
/// Failure marker
pub const CROSS: &str = "✗";

/// Semantic styles for CLI output
pub trait Stylize {
    /// Bold text for headings
    fn emphasis(&self) -> String;
    /// Dimmed secondary text
    fn muted(&self) -> String;
    /// Highlighted values (numbers, names)
    fn accent(&self) -> String;
    /// Success messages
    fn success(&self) -> String;
    /// Error messages
    fn failure(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    fn success(&self) -> String {
        self.green().to_string()
    }

    fn failure(&self) -> String {
        self.red().bold().to_string()
    }
}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Styled cross mark
pub fn cross() -> String {
    CROSS.failure()
}

/// Styled list arrow
pub fn arrow() -> String {
    "→".muted()
}
