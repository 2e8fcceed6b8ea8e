//! Main parser implementation.

use crate::lexer::{lex, Token, TokenKind};
use crate::parser::event::Event;
use crate::parser::sink::Sink;
use crate::parser::source::Source;
use crate::parser::{Parse, ParseError};
use crate::syntax::SyntaxKind;
use drop_bomb::DropBomb;

/// Nesting depth after which expressions and statements stop recursing.
const MAX_DEPTH: u32 = 128;

/// Parses source text into a syntax tree.
#[must_use]
pub fn parse(source: &str) -> Parse {
    let tokens = lex(source);
    let parser = Parser::new(&tokens, source);
    let (events, errors) = parser.parse();

    let sink = Sink::new(&tokens, source, events);
    let green_node = sink.finish();

    Parse { green_node, errors }
}

/// The parser state.
pub(crate) struct Parser<'t, 'src> {
    pub(crate) source: Source<'t, 'src>,
    pub(crate) events: Vec<Event>,
    errors: Vec<ParseError>,
    depth: u32,
}

pub(crate) struct Marker {
    pos: usize,
    bomb: DropBomb,
}

impl Marker {
    pub(crate) fn complete(
        mut self,
        parser: &mut Parser<'_, '_>,
        kind: SyntaxKind,
    ) -> CompletedMarker {
        self.bomb.defuse();
        match parser.events.get_mut(self.pos) {
            Some(Event::Placeholder) => {
                parser.events[self.pos] = Event::start(kind);
            }
            Some(Event::Start {
                kind: existing_kind,
                ..
            }) => {
                *existing_kind = kind;
            }
            _ => {}
        }
        parser.events.push(Event::Finish);
        CompletedMarker { pos: self.pos, kind }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct CompletedMarker {
    pos: usize,
    kind: SyntaxKind,
}

impl CompletedMarker {
    pub(crate) fn precede(self, parser: &mut Parser<'_, '_>) -> Marker {
        let new_pos = parser.events.len();
        parser.events.push(Event::Placeholder);
        set_forward_parent(&mut parser.events, self.pos, new_pos);
        Marker {
            pos: new_pos,
            bomb: DropBomb::new("uncompleted marker"),
        }
    }

    /// Kind the marker was completed with.
    pub(crate) fn kind(self) -> SyntaxKind {
        self.kind
    }
}

fn set_forward_parent(events: &mut [Event], from: usize, to: usize) {
    let mut current = from;
    loop {
        match &mut events[current] {
            Event::Start {
                forward_parent: Some(fp),
                ..
            } => {
                current += *fp as usize;
            }
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some((to - current) as u32);
                break;
            }
            _ => break,
        }
    }
}

impl<'t, 'src> Parser<'t, 'src> {
    fn new(tokens: &'t [Token], source: &'src str) -> Self {
        Self {
            source: Source::new(tokens, source),
            events: Vec::new(),
            errors: Vec::new(),
            depth: 0,
        }
    }

    fn parse(mut self) -> (Vec<Event>, Vec<ParseError>) {
        let root = self.start();

        while !self.at_end() {
            self.parse_statement_with_progress();
        }

        root.complete(&mut self, SyntaxKind::SourceFile);

        (self.events, self.errors)
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    pub(crate) fn current(&self) -> TokenKind {
        self.source.current()
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.source.current() == kind
    }

    /// Returns `true` if the current token is an identifier with this text.
    /// Used for contextual words such as `of`, `get`, `set`, `from`.
    pub(crate) fn at_contextual(&self, text: &str) -> bool {
        self.at(TokenKind::Ident) && self.source.peek_text_n(0) == text
    }

    pub(crate) fn at_end(&self) -> bool {
        self.source.at_end()
    }

    pub(crate) fn nth(&self, n: usize) -> TokenKind {
        self.source.peek_kind_n(n)
    }

    /// Returns `true` if a newline precedes the current token.
    pub(crate) fn at_line_break(&self) -> bool {
        self.source.at_line_break()
    }

    pub(crate) fn bump(&mut self) {
        let kind = self.source.current();
        if kind == TokenKind::Eof {
            return;
        }
        self.events.push(Event::token(SyntaxKind::from(kind)));
        self.source.bump();
    }

    /// Bumps the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Bumps the given token, or reports `expected <what>`.
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(&format!("expected {what}"));
            false
        }
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            bomb: DropBomb::new("uncompleted marker"),
        }
    }

    pub(crate) fn error(&mut self, message: &str) {
        let range = self.source.error_range();
        self.errors.push(ParseError {
            message: message.to_string(),
            range,
        });
    }

    /// Wraps the current token in an error node and skips it.
    pub(crate) fn err_and_bump(&mut self, message: &str) -> CompletedMarker {
        self.error(message);
        let marker = self.start();
        self.bump();
        marker.complete(self, SyntaxKind::ErrorNode)
    }

    /// Enters a nested construct. Returns `false` when the nesting limit is
    /// reached; the caller must then skip instead of recursing.
    pub(crate) fn enter(&mut self) -> bool {
        if self.depth >= MAX_DEPTH {
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Parses one statement and guarantees that at least one token was
    /// consumed, so that statement lists always terminate.
    pub(crate) fn parse_statement_with_progress(&mut self) {
        let before = self.source.position();
        self.parse_statement();
        if self.source.position() == before && !self.at_end() {
            self.err_and_bump("unexpected token");
        }
    }

    /// Consume a statement terminator, applying automatic semicolon
    /// insertion: a `;` may be omitted before `}`, at the end of input, or
    /// when the next token starts on a new line.
    pub(crate) fn expect_semicolon(&mut self) {
        if self.eat(TokenKind::Semicolon) {
            return;
        }

        if self.at(TokenKind::RBrace) || self.at_end() || self.at_line_break() {
            return;
        }

        self.error("expected ';'");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let parse = parse("");
        assert!(parse.ok());
        assert_eq!(parse.syntax().kind(), SyntaxKind::SourceFile);
    }

    #[test]
    fn test_parse_is_lossless() {
        let source = "/* head */\nfunction f(a, b) { return a + b; } // tail\n";
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors());
        assert_eq!(parse.syntax().text().to_string(), source);
    }

    #[test]
    fn test_parse_function_declaration() {
        let source = "function add(a, b) {\n  return a + b;\n}\n";
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors());
        let first = parse.syntax().first_child().map(|n| n.kind());
        assert_eq!(first, Some(SyntaxKind::FunctionDecl));
    }

    #[test]
    fn test_node_ranges_exclude_surrounding_trivia() {
        let source = "// lead\nvar x = 1;\n// trail\n";
        let parse = parse(source);
        let stmt = parse.syntax().first_child().unwrap();
        assert_eq!(stmt.kind(), SyntaxKind::VarStmt);
        assert_eq!(stmt.text().to_string(), "var x = 1;");
    }

    #[test]
    fn test_automatic_semicolon_insertion() {
        let source = "var a = 1\nvar b = 2\nfoo()\n";
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors());
        assert_eq!(parse.syntax().children().count(), 3);
    }

    #[test]
    fn test_missing_semicolon_on_same_line() {
        let parse = parse("var a = 1 var b = 2;");
        assert!(!parse.ok(), "expected errors for missing semicolon");
        assert!(
            parse
                .errors()
                .iter()
                .any(|error| error.message == "expected ';'"),
            "errors: {:?}",
            parse.errors()
        );
    }

    #[test]
    fn test_deep_nesting_terminates() {
        let source = format!("x = {}1{};", "(".repeat(2000), ")".repeat(2000));
        let parse = parse(&source);
        assert_eq!(parse.syntax().text().to_string(), source);
    }

    #[test]
    fn test_stray_closing_brace_at_top_level() {
        let parse = parse("} function f() {}");
        assert!(!parse.ok());
        let kinds: Vec<_> = parse.syntax().children().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec![SyntaxKind::ErrorNode, SyntaxKind::FunctionDecl]);
    }
}
