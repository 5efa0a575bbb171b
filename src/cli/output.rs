//! Console messages for devlint
//!
//! Stdout is reserved for the announcement and the formatted lint blocks, so
//! everything here goes to stderr.

use console::style;

/// Output handler for status messages around a run
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("⚠").yellow(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            eprintln!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Print a verbose breakdown item
    pub fn verbose_breakdown(&self, label: &str, value: &str) {
        if self.verbose && !self.quiet {
            eprintln!(
                "  {} {} {}",
                style("•").cyan(),
                style(label).dim(),
                style(value).yellow().bold()
            );
        }
    }

    /// Get verbose mode status
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}
