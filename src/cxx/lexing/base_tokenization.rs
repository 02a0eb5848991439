//! Base tokenization using the logos lexer
//!
//!     logos recognizes every fixed-shape lexeme: identifiers, numbers, whitespace and all
//!     punctuation. Lexemes whose extent depends on what follows (comments, string and
//!     char literals, raw strings) are only recognized by their opening characters here;
//!     the scanner finishes them by bumping the logos lexer past the rest of the body.
//!
//!     Preprocessor directives are not a logos concern at all. Whether a `#` starts a
//!     directive depends on it being first on its line, which the scanner tracks.

use logos::Logos;

/// Raw lexemes as recognized by logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken {
    #[regex(r"[ \t\x0B\x0C]+")]
    Whitespace,

    #[regex(r"\r?\n")]
    Newline,

    // Backslash-newline outside a directive splices two physical lines
    #[regex(r"\\\r?\n")]
    LineSplice,

    #[token("//")]
    LineCommentStart,

    #[token("/*")]
    BlockCommentStart,

    #[regex(r#"(u8|u|U|L)?R""#)]
    RawStringStart,

    #[regex(r#"(u8|u|U|L)?""#)]
    StringStart,

    #[regex(r"(u8|u|U|L)?'")]
    CharStart,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    #[regex(r"[0-9]([0-9A-Za-z_'.]|[eEpP][+-])*")]
    #[regex(r"\.[0-9]([0-9A-Za-z_'.]|[eEpP][+-])*")]
    Number,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("::")]
    ColonColon,
    #[token(",")]
    Comma,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("=")]
    Assign,
    #[token("?")]
    Question,
    #[token("~")]
    Tilde,
    #[token("#")]
    Hash,

    #[token("##")]
    #[token("->")]
    #[token("->*")]
    #[token(".")]
    #[token(".*")]
    #[token("...")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("^")]
    #[token("&")]
    #[token("|")]
    #[token("!")]
    #[token("++")]
    #[token("--")]
    #[token("&&")]
    #[token("||")]
    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("<=>")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("^=")]
    #[token("&=")]
    #[token("|=")]
    #[token("<<=")]
    #[token(">>=")]
    Operator,

    #[regex(r"[^\x00-\x7F]+")]
    NonAscii,
}
