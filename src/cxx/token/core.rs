//! Token model produced by the scanner
//!
//!     A token borrows its text from the source buffer and records where it starts. The
//!     kind set is deliberately coarse: the classifier only needs to tell structural
//!     punctuation and a handful of keywords apart from everything else, so all other
//!     operators collapse into `Punct::Other` and all other reserved words into
//!     `Keyword::Other`.
//!
//!     Whitespace and newlines are real tokens. Keeping them is what makes the token stream
//!     lossless: concatenating every token's text reproduces the input byte for byte.

use crate::cxx::location::Position;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Comment flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommentStyle {
    /// `// ...` up to the end of the line
    Line,
    /// `/* ... */`, possibly spanning lines
    Block,
}

/// Keywords the classifier reacts to. Every other reserved word is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Keyword {
    Class,
    Struct,
    Union,
    Enum,
    Namespace,
    Extern,
    Template,
    If,
    Else,
    While,
    For,
    Do,
    Switch,
    Case,
    Default,
    Try,
    Catch,
    Public,
    Protected,
    Private,
    Friend,
    Operator,
    Return,
    Throw,
    Mutable,
    Other,
}

impl Keyword {
    /// Look up an identifier spelling. Returns `None` for plain identifiers.
    pub fn from_ident(ident: &str) -> Option<Keyword> {
        let keyword = match ident {
            "class" => Keyword::Class,
            "struct" => Keyword::Struct,
            "union" => Keyword::Union,
            "enum" => Keyword::Enum,
            "namespace" => Keyword::Namespace,
            "extern" => Keyword::Extern,
            "template" => Keyword::Template,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "while" => Keyword::While,
            "for" => Keyword::For,
            "do" => Keyword::Do,
            "switch" => Keyword::Switch,
            "case" => Keyword::Case,
            "default" => Keyword::Default,
            "try" => Keyword::Try,
            "catch" => Keyword::Catch,
            "public" => Keyword::Public,
            "protected" => Keyword::Protected,
            "private" => Keyword::Private,
            "friend" => Keyword::Friend,
            "operator" => Keyword::Operator,
            "return" => Keyword::Return,
            "throw" => Keyword::Throw,
            "mutable" => Keyword::Mutable,
            "alignas" | "alignof" | "asm" | "auto" | "bool" | "break" | "char" | "char8_t"
            | "char16_t" | "char32_t" | "co_await" | "co_return" | "co_yield" | "concept"
            | "const" | "consteval" | "constexpr" | "constinit" | "const_cast" | "continue"
            | "decltype" | "delete" | "double" | "dynamic_cast" | "explicit" | "export"
            | "false" | "float" | "goto" | "inline" | "int" | "long" | "new" | "noexcept"
            | "nullptr" | "register" | "reinterpret_cast" | "requires" | "short" | "signed"
            | "sizeof" | "static" | "static_assert" | "static_cast" | "this"
            | "thread_local" | "true" | "typedef" | "typeid" | "typename" | "unsigned"
            | "using" | "virtual" | "void" | "volatile" | "wchar_t" => Keyword::Other,
            _ => return None,
        };
        Some(keyword)
    }

    /// Access specifiers that form `access-label` lines inside class bodies.
    pub fn is_access_specifier(self) -> bool {
        matches!(self, Keyword::Public | Keyword::Protected | Keyword::Private)
    }

    /// Class-key keywords introducing a class head.
    pub fn is_class_key(self) -> bool {
        matches!(self, Keyword::Class | Keyword::Struct | Keyword::Union)
    }
}

/// Punctuation the classifier reacts to. Every other operator is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Punct {
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Semicolon,
    Colon,
    ColonColon,
    Comma,
    Less,
    Greater,
    Shl,
    Shr,
    Assign,
    Question,
    Tilde,
    Hash,
    Other,
}

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    Identifier,
    Keyword(Keyword),
    Punctuation(Punct),
    Number,
    StringLiteral,
    CharLiteral,
    RawString,
    Comment(CommentStyle),
    Directive,
    Whitespace,
    Newline,
    /// Bytes no lexical rule recognizes (stray `@`, `$`, non-ASCII outside literals)
    Unknown,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Keyword(_) => write!(f, "keyword"),
            TokenKind::Punctuation(_) => write!(f, "punctuation"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::StringLiteral => write!(f, "string-literal"),
            TokenKind::CharLiteral => write!(f, "char-literal"),
            TokenKind::RawString => write!(f, "raw-string"),
            TokenKind::Comment(_) => write!(f, "comment"),
            TokenKind::Directive => write!(f, "preprocessor-directive"),
            TokenKind::Whitespace => write!(f, "whitespace"),
            TokenKind::Newline => write!(f, "newline"),
            TokenKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// One lexical unit. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Source text of the token, borrowed from the input buffer
    pub text: &'a str,
    /// Byte range in the input buffer
    pub span: Range<usize>,
    /// 1-based line of the first byte
    pub line: usize,
    /// 1-based column (in characters) of the first byte
    pub column: usize,
    /// True for the first non-whitespace token on its physical line
    pub line_initial: bool,
}

impl<'a> Token<'a> {
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Line of the last byte; differs from `line` for multi-line comments, raw strings
    /// and continued directives.
    pub fn end_line(&self) -> usize {
        self.line + self.text.matches('\n').count()
    }

    pub fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Newline)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::Comment(_))
    }

    /// Tokens that take part in the syntactic structure: everything except whitespace,
    /// newlines, comments and preprocessor directives.
    pub fn is_significant(&self) -> bool {
        !self.is_trivia() && !self.is_comment() && self.kind != TokenKind::Directive
    }

    pub fn is_punct(&self, punct: Punct) -> bool {
        self.kind == TokenKind::Punctuation(punct)
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    pub fn punct(&self) -> Option<Punct> {
        match self.kind {
            TokenKind::Punctuation(p) => Some(p),
            _ => None,
        }
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(k) => Some(k),
            _ => None,
        }
    }

    /// String-like literal kinds, which concatenate when adjacent.
    pub fn is_string_like(&self) -> bool {
        matches!(self.kind, TokenKind::StringLiteral | TokenKind::RawString)
    }

    /// Identifier-like tokens that can end a name (`foo`, `operator`, builtin types).
    pub fn is_name(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Identifier | TokenKind::Keyword(Keyword::Other)
        )
    }
}
