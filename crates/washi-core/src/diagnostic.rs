//! Validation diagnostics.
//!
//! Rule violations are collected and returned as plain data. A diagnostic is
//! never raised as an error: a document with cardinality problems still
//! parses, mutates, and serializes.

use serde::Serialize;
use std::fmt;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    /// Tolerated malformation (e.g. an unquoted parameter value that should
    /// have been quoted). Safe to ignore.
    Warning,
    /// A rule of the format was broken (cardinality, cross-property
    /// consistency, uncoercible value).
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single validation finding.
///
/// `name` is the property or component the finding is about; `message` is
/// human-readable and stable (callers match on it in tests).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Property or component name the diagnostic refers to.
    pub name: String,
    /// Human-readable description of the violation.
    pub message: String,
    /// Diagnostic severity.
    pub severity: Severity,
}

impl Diagnostic {
    /// Creates an error-level diagnostic.
    #[must_use]
    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Creates a warning-level diagnostic.
    #[must_use]
    pub fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    /// Returns whether this diagnostic is error-level.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.name, self.message, self.severity)
    }
}

/// Filters a diagnostic list down to the error-level messages.
///
/// This is the view most callers want: warnings record lenient-mode
/// tolerances and are informational only.
#[must_use]
pub fn error_messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics
        .iter()
        .filter(|d| d.is_error())
        .map(|d| d.message.as_str())
        .collect()
}
