//! Core token types and helpers shared across the scanner, classifier, and tooling.

pub mod core;
pub mod formatting;

pub use self::core::{CommentStyle, Keyword, Punct, Token, TokenKind};
pub use self::formatting::{detokenize, render_tokens};
