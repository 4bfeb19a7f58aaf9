//! User-facing progress reporting.
//!
//! Commands and orchestrators write progress through a [`Reporter`] handed
//! in by the caller. Diagnostics that are not meant for the user go through
//! `tracing` instead.

/// Sink for user-facing progress messages.
pub trait Reporter {
    /// Start of a block of related output.
    fn section(&self, title: &str);
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    /// Detail shown only in verbose mode.
    fn debug(&self, message: &str);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn section(&self, _title: &str) {}
    fn info(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn debug(&self, _message: &str) {}
}
