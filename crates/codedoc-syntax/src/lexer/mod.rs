//! Lexer for JavaScript.
//!
//! This module provides a lexer that tokenizes JavaScript source code into a
//! stream of tokens with their positions in the source text.

mod tokens;

pub use tokens::TokenKind;

use logos::Logos;
use text_size::{TextRange, TextSize};

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The byte range of the token in the source text.
    pub range: TextRange,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, range: TextRange) -> Self {
        Self { kind, range }
    }

    /// Returns the length of the token in bytes.
    #[must_use]
    pub fn len(&self) -> TextSize {
        self.range.len()
    }

    /// Returns true if the token has zero length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Lexer for JavaScript source code.
///
/// The lexer is an iterator over tokens. It handles all error recovery
/// internally - any unrecognized characters are returned as `TokenKind::Error`.
///
/// On top of the generated `logos` lexer it tracks the last significant
/// token so that `/` can be told apart from the start of a regular
/// expression literal.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    source: &'src str,
    prev: Option<TokenKind>,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            source,
            prev: None,
        }
    }

    /// Returns the source text being lexed.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Returns the text of the current token.
    #[must_use]
    pub fn slice(&self) -> &'src str {
        self.inner.slice()
    }

    fn regex_allowed(&self) -> bool {
        self.prev.is_none_or(|kind| !kind.ends_expression())
    }
}

/// Scans a regular expression body starting at `start` (the opening `/`).
/// Returns the byte offset just past the flags, or `None` if the literal is
/// not closed on the same line.
fn scan_regex(source: &str, start: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut i = start + 1;
    let mut in_class = false;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' | b'\n' => return None,
            b'\\' => {
                if matches!(bytes.get(i + 1), None | Some(b'\r' | b'\n')) {
                    return None;
                }
                i += 2;
                continue;
            }
            b'[' => in_class = true,
            b']' => in_class = false,
            b'/' if !in_class => {
                i += 1;
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                return Some(i);
            }
            _ => {}
        }
        i += 1;
    }
    None
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = self.inner.next()?;
        let span = self.inner.span();

        let mut kind = kind.unwrap_or(TokenKind::Error);
        let mut end = span.end;

        if matches!(kind, TokenKind::Slash | TokenKind::SlashEq) && self.regex_allowed() {
            if let Some(regex_end) = scan_regex(self.source, span.start) {
                // Multi-byte characters inside the body keep `regex_end` on a
                // char boundary because it always follows an ASCII byte.
                self.inner.bump(regex_end - span.end);
                kind = TokenKind::RegexLiteral;
                end = regex_end;
            }
        }

        if !kind.is_trivia() {
            self.prev = Some(kind);
        }

        let range = TextRange::new(
            TextSize::from(span.start as u32),
            TextSize::from(end as u32),
        );
        Some(Token::new(kind, range))
    }
}

/// Lex the entire source and return all tokens.
///
/// This is a convenience function for testing and simple use cases.
/// For the parser, use the `Lexer` iterator directly.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Lex source and return tokens paired with their text.
///
/// Useful for debugging and testing.
#[must_use]
pub fn lex_with_text(source: &str) -> Vec<(Token, &str)> {
    Lexer::new(source)
        .map(|token| {
            let text = &source[usize::from(token.range.start())..usize::from(token.range.end())];
            (token, text)
        })
        .collect()
}
