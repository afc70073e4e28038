//! Structured diagnostics emitted while loading a program.
//!
//! The loader never prints anything itself. Every warning and syntax error is
//! turned into a [`Diagnostic`] tagged with its 1-based line and (when it
//! points at a character) 1-based column, and handed to a [`DiagnosticSink`].
//! Callers decide how to render them.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Reported and ignored; does not change the load outcome.
    Warning,
    /// Syntax error; the enclosing block fails.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("syntax error"),
        }
    }
}

/// A single located message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub line: usize,
    pub column: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn error(line: usize, column: usize, message: impl Into<String>) -> Self {
        Diagnostic { severity: Severity::Error, line, column: Some(column), message: message.into() }
    }

    pub fn warning(line: usize, column: Option<usize>, message: impl Into<String>) -> Self {
        Diagnostic { severity: Severity::Warning, line, column, message: message.into() }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(column) => write!(f, "[{}; {}] {}: {}", self.line, column, self.severity, self.message),
            None => write!(f, "[{}] {}: {}", self.line, self.severity, self.message),
        }
    }
}

/// Receiver for diagnostics produced by the loader.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Collecting sink that also mirrors every diagnostic to `tracing`.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| !d.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => {
                tracing::debug!(line = diagnostic.line, column = ?diagnostic.column, "{}", diagnostic.message)
            }
            Severity::Error => tracing::debug!(
                line = diagnostic.line,
                column = ?diagnostic.column,
                error = true,
                "{}",
                diagnostic.message
            ),
        }
        self.items.push(diagnostic);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
