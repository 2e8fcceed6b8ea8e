//! Token source for the parser.
//!
//! This module provides the `Source` struct that wraps a token stream
//! and provides lookahead and consumption operations.

use text_size::{TextRange, TextSize};

use crate::lexer::{Token, TokenKind};

/// A token source that provides tokens to the parser.
pub struct Source<'t, 'src> {
    tokens: &'t [Token],
    source: &'src str,
    cursor: usize,
}

impl<'t, 'src> Source<'t, 'src> {
    /// Creates a new source from tokens and source text.
    pub fn new(tokens: &'t [Token], source: &'src str) -> Self {
        Self {
            tokens,
            source,
            cursor: 0,
        }
    }

    /// Returns the current token kind, or `Eof` if at end.
    pub fn current(&self) -> TokenKind {
        self.peek_kind_n(0)
    }

    /// Returns the current token, or `None` if at end.
    pub fn current_token(&self) -> Option<&Token> {
        self.peek_token_n(0)
    }

    /// Peeks at the nth non-trivia token ahead (0 = current).
    pub fn peek_kind_n(&self, n: usize) -> TokenKind {
        self.peek_token_n(n).map_or(TokenKind::Eof, |t| t.kind)
    }

    /// Peeks at the nth non-trivia token ahead and returns the token.
    pub fn peek_token_n(&self, n: usize) -> Option<&Token> {
        self.tokens[self.cursor..]
            .iter()
            .filter(|token| !token.kind.is_trivia())
            .nth(n)
    }

    /// Advances past the current token.
    pub fn bump(&mut self) {
        while let Some(token) = self.tokens.get(self.cursor) {
            self.cursor += 1;
            if !token.kind.is_trivia() {
                break;
            }
        }
    }

    /// Returns `true` if at end of input.
    pub fn at_end(&self) -> bool {
        self.current_token().is_none()
    }

    /// Raw cursor position, used by loops to assert progress.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Returns the text of the nth non-trivia token ahead.
    pub fn peek_text_n(&self, n: usize) -> &'src str {
        self.peek_token_n(n).map_or("", |t| self.text(t.range))
    }

    /// Returns `true` if a line terminator separates the previous significant
    /// token from the current one. Drives automatic semicolon insertion and
    /// the restricted productions (`return`, `break`, `continue`, `throw`,
    /// postfix `++`/`--`, `async` arrows).
    pub fn at_line_break(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.tokens[self.cursor..]
            .iter()
            .take_while(|token| token.kind.is_trivia())
            .any(|token| self.text(token.range).contains('\n'))
    }

    /// Returns `true` if a line terminator separates the nth and (n+1)th
    /// non-trivia tokens ahead.
    pub fn line_break_before_n(&self, n: usize) -> bool {
        let mut seen = 0;
        let mut between = false;
        for token in &self.tokens[self.cursor..] {
            if token.kind.is_trivia() {
                if between && self.text(token.range).contains('\n') {
                    return true;
                }
                continue;
            }
            if seen == n + 1 {
                return false;
            }
            between = seen == n;
            seen += 1;
        }
        false
    }

    /// Range used to report an error at the current position.
    pub fn error_range(&self) -> TextRange {
        self.current_token().map_or_else(
            || TextRange::empty(TextSize::of(self.source)),
            |t| t.range,
        )
    }

    fn text(&self, range: TextRange) -> &'src str {
        &self.source[range]
    }
}
