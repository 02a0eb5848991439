//! Token stream formatting
//!
//! Converts token streams back to text. `detokenize` is the inverse of scanning and backs
//! the round-trip tests; `render_tokens` produces a compact one-token-per-line listing
//! used in snapshots and when debugging the scanner.

use super::core::{Token, TokenKind};
use std::fmt::Write;

/// Concatenate token texts. For any successful scan this reproduces the source exactly.
pub fn detokenize(tokens: &[Token<'_>]) -> String {
    let mut result = String::with_capacity(tokens.iter().map(|t| t.text.len()).sum());
    for token in tokens {
        result.push_str(token.text);
    }
    result
}

/// Render tokens as `line:column kind text` lines, skipping whitespace and newlines.
///
/// Newlines inside multi-line tokens are escaped so every token stays on one line.
pub fn render_tokens(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for token in tokens.iter().filter(|t| !t.is_trivia()) {
        let marker = if token.line_initial { "^" } else { " " };
        let kind = match token.kind {
            TokenKind::Keyword(_) => "keyword".to_string(),
            TokenKind::Punctuation(_) => "punct".to_string(),
            other => other.to_string(),
        };
        let _ = writeln!(
            out,
            "{}:{}{} {} {}",
            token.line,
            token.column,
            marker,
            kind,
            token.text.replace('\n', "\\n")
        );
    }
    out.truncate(out.trim_end().len());
    out
}
