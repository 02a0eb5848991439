//! Lexing
//!
//!     Turns C++ source text into a lossless stream of positioned tokens.
//!
//!     Tokenization happens in two stages. [base_tokenization] is a logos lexer that
//!     recognizes fixed-shape lexemes and the opening characters of open-ended ones.
//!     [scanner] drives it, finishes comments, literals, raw strings and directives, and
//!     attaches line/column and line-initial information. The result is pulled one token at
//!     a time; [tokenize] collects the whole stream for callers that want it eagerly.

pub mod base_tokenization;
pub mod common;
pub mod scanner;

pub use common::{LexError, LiteralKind};
pub use scanner::Scanner;

use crate::cxx::token::Token;

/// Scan the whole input. Stops at the first lexical error.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    Scanner::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cxx::token::TokenKind;

    #[test]
    fn test_tokenize_collects_everything() {
        let tokens = tokenize("a;\n").expect("scan failed");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds.len(), 3);
        assert_eq!(kinds[0], TokenKind::Identifier);
        assert_eq!(kinds[2], TokenKind::Newline);
    }

    #[test]
    fn test_tokenize_reports_first_error() {
        let err = tokenize("x = 'a").expect_err("should fail");
        assert_eq!(err.position().column, 5);
    }
}
