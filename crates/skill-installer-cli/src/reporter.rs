//! Console rendering of core progress messages.

use std::io::Write;

use console::style;
use skill_installer_core::report::Reporter;

/// How much the console reporter prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only
    Silent,
    Normal,
    /// Include debug lines
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, silent: bool) -> Self {
        if silent {
            Verbosity::Silent
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub fn log_directive(self) -> &'static str {
        match self {
            Verbosity::Silent => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "debug",
        }
    }
}

/// Writes styled progress to stdout and errors to stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    verbosity: Verbosity,
}

impl ConsoleReporter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    pub fn newline(&self) {
        if self.verbosity != Verbosity::Silent {
            self.out(format_args!(""));
        }
    }

    pub fn divider(&self) {
        self.info(&"─".repeat(50));
    }

    fn out(&self, args: std::fmt::Arguments<'_>) {
        // Broken pipes are not worth failing an install over.
        let _ = writeln!(std::io::stdout().lock(), "{args}");
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, title: &str) {
        if self.verbosity == Verbosity::Silent {
            return;
        }
        self.out(format_args!(""));
        self.out(format_args!("{}", style(title).bold().cyan()));
    }

    fn info(&self, message: &str) {
        if self.verbosity != Verbosity::Silent {
            self.out(format_args!("{message}"));
        }
    }

    fn success(&self, message: &str) {
        if self.verbosity != Verbosity::Silent {
            self.out(format_args!("{} {message}", style("✓").green()));
        }
    }

    fn warn(&self, message: &str) {
        if self.verbosity != Verbosity::Silent {
            self.out(format_args!("{} {}", style("⚠").yellow(), style(message).yellow()));
        }
    }

    fn error(&self, message: &str) {
        let _ = writeln!(
            std::io::stderr().lock(),
            "{} {}",
            style("✗").red(),
            style(message).red()
        );
    }

    fn debug(&self, message: &str) {
        if self.verbosity == Verbosity::Verbose {
            self.out(format_args!("{}", style(format!("[debug] {message}")).dim()));
        }
    }
}
