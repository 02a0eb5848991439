//! Recoverable classification problems
//!
//! Lexical errors stop a classification pass; everything in this module does not. When
//! the classifier meets structure it cannot reconcile (a closer with no opener, an `else`
//! with no preceding `if`) it repairs its state, records a [Diagnostic] and keeps
//! labelling. Consumers decide whether warnings matter to them.

use crate::cxx::location::Position;
use serde::Serialize;
use std::fmt;

/// Diagnostic severity levels. Every recovery is reported as a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticSeverity {
    Warning,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Closer with no matching opener, closer of the wrong kind, or a frame left open at
    /// end of input
    UnbalancedDelimiter,
    /// Keyword whose required context is missing: `else` without `if`, `catch` without
    /// `try`, `case` outside a switch
    UnrecognizedContextTransition,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnbalancedDelimiter => write!(f, "unbalanced-delimiter"),
            DiagnosticKind::UnrecognizedContextTransition => {
                write!(f, "unrecognized-context-transition")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: DiagnosticSeverity,
    pub position: Position,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(kind: DiagnosticKind, position: Position, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: DiagnosticSeverity::Warning,
            position,
            message: message.into(),
        }
    }

}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {} at {}",
            self.severity, self.kind, self.message, self.position
        )
    }
}
