//! Common lexer module
//!
//! Errors shared by the scanner stages.

use crate::cxx::location::Position;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Literal flavours that can be left open at end of line or input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LiteralKind {
    String,
    Char,
    RawString,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralKind::String => write!(f, "string literal"),
            LiteralKind::Char => write!(f, "character literal"),
            LiteralKind::RawString => write!(f, "raw string literal"),
        }
    }
}

/// Terminal lexical errors. Scanning stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum LexError {
    #[error("unterminated {kind} starting at {position}")]
    UnterminatedLiteral {
        kind: LiteralKind,
        position: Position,
    },
    #[error("unterminated block comment starting at {position}")]
    UnterminatedComment { position: Position },
}

impl LexError {
    /// Start of the offending token.
    pub fn position(&self) -> Position {
        match self {
            LexError::UnterminatedLiteral { position, .. }
            | LexError::UnterminatedComment { position } => *position,
        }
    }
}
