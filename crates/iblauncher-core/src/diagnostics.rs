//! Diagnostics port for human-readable resolver output.
//!
//! The resolver reports which strategy succeeded, invalid descriptors and
//! total failure as free text. This port abstracts where that text goes so
//! the CLI can print it while library callers and tests capture or discard it.

/// Severity of a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// Only emitted when the caller asked for verbose output.
    Info,
    Warning,
    Error,
}

/// Port for emitting diagnostic lines.
///
/// Implementations must be thread-safe; a resolver may be shared across threads.
pub trait DiagnosticSink: Send + Sync {
    /// Emit one diagnostic line (without trailing newline).
    fn emit(&self, level: DiagnosticLevel, message: &str);

    fn info(&self, message: &str) {
        self.emit(DiagnosticLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.emit(DiagnosticLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.emit(DiagnosticLevel::Error, message);
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for std::sync::Arc<T> {
    fn emit(&self, level: DiagnosticLevel, message: &str) {
        (**self).emit(level, message);
    }
}

/// Prints diagnostics to standard output, prefixing warnings and errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl DiagnosticSink for StdoutSink {
    fn emit(&self, level: DiagnosticLevel, message: &str) {
        match level {
            DiagnosticLevel::Info => println!("{message}"),
            DiagnosticLevel::Warning => println!("Warning: {message}"),
            DiagnosticLevel::Error => println!("Error: {message}"),
        }
    }
}

/// Discards all diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn emit(&self, _level: DiagnosticLevel, _message: &str) {}
}

/// Captures diagnostics in memory for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: std::sync::Mutex<Vec<(DiagnosticLevel, String)>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(DiagnosticLevel, String)> {
        self.lines
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, level: DiagnosticLevel) -> usize {
        self.lines().iter().filter(|(l, _)| *l == level).count()
    }

    pub fn contains(&self, level: DiagnosticLevel, needle: &str) -> bool {
        self.lines()
            .iter()
            .any(|(l, message)| *l == level && message.contains(needle))
    }
}

#[cfg(test)]
impl DiagnosticSink for RecordingSink {
    fn emit(&self, level: DiagnosticLevel, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((level, message.to_string()));
    }
}
