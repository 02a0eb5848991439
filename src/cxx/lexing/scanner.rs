//! Pull scanner
//!
//!     The scanner wraps the logos lexer and turns raw lexemes into positioned [Token]s,
//!     one per call to [Scanner::next_token]. It owns three responsibilities logos cannot
//!     express:
//!
//!         - finishing lexemes whose end depends on their body (comments, string and char
//!           literals, raw strings with custom delimiters)
//!         - recognizing `#` as a preprocessor directive only at logical line start, and
//!           extending the directive across backslash-continued lines
//!         - tracking line, column and "first on its line" state
//!
//!     Open literals and comments are reported as terminal [LexError]s carrying the start
//!     position. After an error the scanner is fused and yields nothing more.

use super::base_tokenization::RawToken;
use super::common::{LexError, LiteralKind};
use crate::cxx::location::Position;
use crate::cxx::token::{CommentStyle, Keyword, Punct, Token, TokenKind};
use logos::{Lexer, Logos};

/// Longest delimiter a raw string may declare.
const MAX_RAW_DELIMITER: usize = 16;

/// Demand-driven tokenizer over one in-memory source buffer.
pub struct Scanner<'a> {
    source: &'a str,
    lexer: Lexer<'a, RawToken>,
    line: usize,
    column: usize,
    at_line_start: bool,
    finished: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lexer: RawToken::lexer(source),
            line: 1,
            column: 1,
            at_line_start: true,
            finished: false,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Produce the next token, `None` at end of input or after an error.
    pub fn next_token(&mut self) -> Option<Result<Token<'a>, LexError>> {
        if self.finished {
            return None;
        }
        let raw = match self.lexer.next() {
            Some(raw) => raw,
            None => {
                self.finished = true;
                return None;
            }
        };

        let position = Position::new(self.line, self.column);
        let kind = match raw {
            Ok(raw) => match self.complete(raw, position) {
                Ok(kind) => kind,
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            },
            Err(()) => TokenKind::Unknown,
        };

        let span = self.lexer.span();
        let text = &self.source[span.clone()];
        let is_trivia = matches!(kind, TokenKind::Whitespace | TokenKind::Newline);
        let token = Token {
            kind,
            text,
            span,
            line: position.line,
            column: position.column,
            line_initial: self.at_line_start && !is_trivia,
        };

        self.advance_position(text);
        if kind == TokenKind::Newline {
            self.at_line_start = true;
        } else if !is_trivia {
            self.at_line_start = false;
        }
        Some(Ok(token))
    }

    fn advance_position(&mut self, text: &str) {
        match text.rfind('\n') {
            Some(last) => {
                self.line += text.matches('\n').count();
                self.column = text[last + 1..].chars().count() + 1;
            }
            None => self.column += text.chars().count(),
        }
    }

    /// Map a raw lexeme to its token kind, consuming the body of open-ended lexemes.
    fn complete(&mut self, raw: RawToken, position: Position) -> Result<TokenKind, LexError> {
        let kind = match raw {
            RawToken::Whitespace | RawToken::LineSplice => TokenKind::Whitespace,
            RawToken::Newline => TokenKind::Newline,
            RawToken::LineCommentStart => {
                let end = line_end(self.lexer.remainder().as_bytes(), 0);
                self.lexer.bump(end);
                TokenKind::Comment(CommentStyle::Line)
            }
            RawToken::BlockCommentStart => {
                let rest = self.lexer.remainder();
                match rest.find("*/") {
                    Some(index) => self.lexer.bump(index + 2),
                    None => return Err(LexError::UnterminatedComment { position }),
                }
                TokenKind::Comment(CommentStyle::Block)
            }
            RawToken::RawStringStart => self.finish_raw_string(position)?,
            RawToken::StringStart => {
                self.finish_quoted(b'"', LiteralKind::String, position)?;
                TokenKind::StringLiteral
            }
            RawToken::CharStart => {
                self.finish_quoted(b'\'', LiteralKind::Char, position)?;
                TokenKind::CharLiteral
            }
            RawToken::Identifier => match Keyword::from_ident(self.lexer.slice()) {
                Some(keyword) => TokenKind::Keyword(keyword),
                None => TokenKind::Identifier,
            },
            RawToken::Number => TokenKind::Number,
            RawToken::Hash if self.at_line_start => {
                let end = directive_end(self.lexer.remainder().as_bytes());
                self.lexer.bump(end);
                TokenKind::Directive
            }
            RawToken::Hash => TokenKind::Punctuation(Punct::Hash),
            RawToken::LBrace => TokenKind::Punctuation(Punct::LBrace),
            RawToken::RBrace => TokenKind::Punctuation(Punct::RBrace),
            RawToken::LParen => TokenKind::Punctuation(Punct::LParen),
            RawToken::RParen => TokenKind::Punctuation(Punct::RParen),
            RawToken::LBracket => TokenKind::Punctuation(Punct::LBracket),
            RawToken::RBracket => TokenKind::Punctuation(Punct::RBracket),
            RawToken::Semicolon => TokenKind::Punctuation(Punct::Semicolon),
            RawToken::Colon => TokenKind::Punctuation(Punct::Colon),
            RawToken::ColonColon => TokenKind::Punctuation(Punct::ColonColon),
            RawToken::Comma => TokenKind::Punctuation(Punct::Comma),
            RawToken::Less => TokenKind::Punctuation(Punct::Less),
            RawToken::Greater => TokenKind::Punctuation(Punct::Greater),
            RawToken::Shl => TokenKind::Punctuation(Punct::Shl),
            RawToken::Shr => TokenKind::Punctuation(Punct::Shr),
            RawToken::Assign => TokenKind::Punctuation(Punct::Assign),
            RawToken::Question => TokenKind::Punctuation(Punct::Question),
            RawToken::Tilde => TokenKind::Punctuation(Punct::Tilde),
            RawToken::Operator => TokenKind::Punctuation(Punct::Other),
            RawToken::NonAscii => TokenKind::Unknown,
        };
        Ok(kind)
    }

    /// Consume a quoted literal body up to and including the closing quote.
    fn finish_quoted(
        &mut self,
        quote: u8,
        kind: LiteralKind,
        position: Position,
    ) -> Result<(), LexError> {
        match quoted_end(self.lexer.remainder().as_bytes(), quote) {
            Some(end) => {
                self.lexer.bump(end);
                Ok(())
            }
            None => Err(LexError::UnterminatedLiteral { kind, position }),
        }
    }

    /// Consume `delim(...)delim"`, or the bracketed `delim[...]delim"` form when no
    /// terminated paren form exists.
    ///
    /// A prefix that declares no valid delimiter for either form is scanned as an ordinary
    /// string.
    fn finish_raw_string(&mut self, position: Position) -> Result<TokenKind, LexError> {
        let rest = self.lexer.remainder();
        let paren = raw_body_end(rest, b'(', ')');
        let end = match paren {
            Some(Some(end)) => Some(end),
            _ => match raw_body_end(rest, b'[', ']') {
                Some(Some(end)) => Some(end),
                bracket if paren.is_some() || bracket.is_some() => {
                    return Err(LexError::UnterminatedLiteral {
                        kind: LiteralKind::RawString,
                        position,
                    })
                }
                _ => None,
            },
        };
        match end {
            Some(end) => {
                self.lexer.bump(end);
                Ok(TokenKind::RawString)
            }
            None => {
                self.finish_quoted(b'"', LiteralKind::String, position)?;
                Ok(TokenKind::StringLiteral)
            }
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

fn is_raw_delimiter_byte(b: u8) -> bool {
    b.is_ascii_graphic() && !matches!(b, b'(' | b')' | b'\\' | b'"')
}

/// Length of a raw string body after `R"`, opened by `open` and closed by `close`.
///
/// `None` when the prefix declares no valid delimiter for this form, `Some(None)` when it
/// does but the terminator never appears.
fn raw_body_end(rest: &str, open: u8, close: char) -> Option<Option<usize>> {
    let bytes = rest.as_bytes();
    let opener = bytes
        .iter()
        .take(MAX_RAW_DELIMITER + 1)
        .position(|b| *b == open)?;
    let delimiter = &rest[..opener];
    if !delimiter.bytes().all(is_raw_delimiter_byte) {
        return None;
    }
    let terminator = format!("{close}{delimiter}\"");
    Some(
        rest[opener + 1..]
            .find(&terminator)
            .map(|index| opener + 1 + index + terminator.len()),
    )
}

/// True when the newline at `newline` is escaped by a backslash (optionally before `\r`).
fn is_continued(bytes: &[u8], newline: usize) -> bool {
    let mut k = newline;
    if k > 0 && bytes[k - 1] == b'\r' {
        k -= 1;
    }
    k > 0 && bytes[k - 1] == b'\\'
}

/// End of the logical line starting at `from`, excluding the newline (and a preceding `\r`).
fn line_end(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] == b'\n' {
            if is_continued(bytes, i) {
                i += 1;
                continue;
            }
            return trim_cr(bytes, i);
        }
        i += 1;
    }
    bytes.len()
}

fn trim_cr(bytes: &[u8], end: usize) -> usize {
    if end > 0 && bytes[end - 1] == b'\r' {
        end - 1
    } else {
        end
    }
}

/// Offset just past the closing quote, or `None` when the line or input ends first.
fn quoted_end(bytes: &[u8], quote: u8) -> Option<usize> {
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                if bytes.get(i + 1) == Some(&b'\r') && bytes.get(i + 2) == Some(&b'\n') {
                    i += 3;
                } else {
                    i += 2;
                }
            }
            b'\n' => return None,
            b if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// Extent of a directive body following `#`.
///
/// Runs to the end of the logical line. Quoted text is skipped so `//` inside a string
/// does not end it, `/* */` comments are absorbed, and a trailing `//` comment is left
/// for the scanner to emit as its own token.
fn directive_end(bytes: &[u8]) -> usize {
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                if is_continued(bytes, i) {
                    i += 1;
                    continue;
                }
                return trim_cr(bytes, i);
            }
            b'"' | b'\'' => {
                let quote = bytes[i];
                let mut j = i + 1;
                while j < bytes.len() && bytes[j] != quote && bytes[j] != b'\n' {
                    j += if bytes[j] == b'\\' { 2 } else { 1 };
                }
                i = if j < bytes.len() && bytes[j] == quote {
                    j + 1
                } else {
                    j.min(bytes.len())
                };
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                let mut end = i;
                while end > 0 && matches!(bytes[end - 1], b' ' | b'\t') {
                    end -= 1;
                }
                return end;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                match find_bytes(&bytes[i + 2..], b"*/") {
                    Some(index) => i += 2 + index + 2,
                    // Leave the open comment for the scanner to report
                    None => return i,
                }
            }
            _ => i += 1,
        }
    }
    bytes.len()
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<Token<'_>> {
        Scanner::new(source)
            .collect::<Result<Vec<_>, _>>()
            .expect("scan failed")
    }

    fn significant(source: &str) -> Vec<(TokenKind, &str)> {
        scan(source)
            .into_iter()
            .filter(|t| !t.is_trivia())
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(scan("").is_empty());
    }

    #[test]
    fn test_positions_and_line_initial() {
        let tokens: Vec<_> = scan("int x;\n  foo();")
            .into_iter()
            .filter(|t| !t.is_trivia())
            .collect();
        assert_eq!(tokens[0].position(), Position::new(1, 1));
        assert!(tokens[0].line_initial);
        assert!(!tokens[1].line_initial);
        assert_eq!(tokens[3].text, "foo");
        assert_eq!(tokens[3].position(), Position::new(2, 3));
        assert!(tokens[3].line_initial);
    }

    #[test]
    fn test_raw_string_with_brackets_is_one_token() {
        let tokens = significant(r#"x = R"[abc "quoted" def]";"#);
        assert_eq!(
            tokens[2],
            (TokenKind::RawString, r#"R"[abc "quoted" def]""#)
        );
        assert_eq!(tokens[3], (TokenKind::Punctuation(Punct::Semicolon), ";"));
    }

    #[test]
    fn test_bracket_in_paren_form_delimiter() {
        let tokens = significant(r#"auto s = R"x[(abc)x[";"#);
        assert_eq!(tokens[3], (TokenKind::RawString, r#"R"x[(abc)x[""#));
        assert_eq!(tokens[4], (TokenKind::Punctuation(Punct::Semicolon), ";"));
    }

    #[test]
    fn test_bracket_form_when_paren_form_never_closes() {
        let tokens = significant(r#"R"[(a]";"#);
        assert_eq!(tokens[0], (TokenKind::RawString, r#"R"[(a]""#));
    }

    #[test]
    fn test_raw_string_with_delimiter_spans_lines() {
        let source = "auto s = R\"xy(line )\" one\nline two)xy\";";
        let tokens = scan(source);
        let raw = tokens
            .iter()
            .find(|t| t.kind == TokenKind::RawString)
            .expect("raw string token");
        assert_eq!(raw.text, "R\"xy(line )\" one\nline two)xy\"");
        assert_eq!(raw.end_line(), 2);
    }

    #[test]
    fn test_directive_with_continuations() {
        let source = "#define TEST \\\n    \"a\" \\\n    \"b\"\nint x;";
        let tokens = scan(source);
        assert_eq!(tokens[0].kind, TokenKind::Directive);
        assert_eq!(tokens[0].text, "#define TEST \\\n    \"a\" \\\n    \"b\"");
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!(tokens[2].line, 4);
    }

    #[test]
    fn test_directive_leaves_trailing_comment() {
        let tokens = significant("#include <cstdlib> // <- cpp-macro");
        assert_eq!(tokens[0], (TokenKind::Directive, "#include <cstdlib>"));
        assert_eq!(
            tokens[1],
            (TokenKind::Comment(CommentStyle::Line), "// <- cpp-macro")
        );
    }

    #[test]
    fn test_hash_mid_line_is_punctuation() {
        let tokens = significant("a # b");
        assert_eq!(tokens[1], (TokenKind::Punctuation(Punct::Hash), "#"));
    }

    #[test]
    fn test_comments() {
        let tokens = scan("/* a\n b */ x // tail\r\ny");
        assert_eq!(tokens[0].kind, TokenKind::Comment(CommentStyle::Block));
        assert!(tokens[0].line_initial);
        let x = tokens.iter().find(|t| t.text == "x").expect("x");
        assert!(!x.line_initial);
        let tail = tokens.iter().find(|t| t.text == "// tail").expect("tail");
        assert!(!tail.line_initial);
        let newline = tokens.iter().find(|t| t.kind == TokenKind::Newline).expect("nl");
        assert_eq!(newline.text, "\r\n");
        let y = tokens.last().expect("y");
        assert_eq!(y.position(), Position::new(3, 1));
    }

    #[test]
    fn test_char_literal_and_escapes() {
        let tokens = significant(r"case '\'': s = L'x';");
        assert_eq!(tokens[1], (TokenKind::CharLiteral, r"'\''"));
        assert_eq!(tokens[5], (TokenKind::CharLiteral, "L'x'"));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let mut scanner = Scanner::new("int x;\n/* open");
        let results: Vec<_> = scanner.by_ref().collect();
        let err = results.last().cloned().expect("items").expect_err("error");
        assert_eq!(
            err,
            LexError::UnterminatedComment {
                position: Position::new(2, 1)
            }
        );
        assert!(scanner.next_token().is_none());
    }

    #[test]
    fn test_unterminated_string_at_newline() {
        let results: Vec<_> = Scanner::new("s = \"abc\nx").collect();
        let err = results.last().cloned().expect("items").expect_err("error");
        assert_eq!(
            err,
            LexError::UnterminatedLiteral {
                kind: LiteralKind::String,
                position: Position::new(1, 5)
            }
        );
    }

    #[test]
    fn test_unterminated_raw_string() {
        let results: Vec<_> = Scanner::new("R\"(never closed").collect();
        assert!(matches!(
            results.last(),
            Some(Err(LexError::UnterminatedLiteral {
                kind: LiteralKind::RawString,
                ..
            }))
        ));
    }

    #[test]
    fn test_unknown_bytes_are_kept() {
        let tokens = scan("a @ é");
        assert_eq!(tokens[2].kind, TokenKind::Unknown);
        assert_eq!(tokens[4].kind, TokenKind::Unknown);
        assert_eq!(tokens[4].text, "é");
    }
}
