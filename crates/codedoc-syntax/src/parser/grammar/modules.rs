//! `import` and `export` declarations.
//!
//! Import and export clauses are kept flat: their tokens are attached
//! directly to the declaration node. Declarations wrapped by `export` are
//! parsed as ordinary declarations so that they keep their own nodes.

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::Parser;

impl Parser<'_, '_> {
    pub(crate) fn parse_import_decl(&mut self) {
        let marker = self.start();
        self.bump(); // import

        if !self.eat(TokenKind::StringLiteral) {
            self.parse_module_clause();
            self.parse_from_clause();
        }

        self.expect_semicolon();
        marker.complete(self, SyntaxKind::ImportDecl);
    }

    pub(crate) fn parse_export_decl(&mut self) {
        let marker = self.start();
        self.bump(); // export

        match self.current() {
            TokenKind::KwDefault => {
                self.bump();
                match self.current() {
                    TokenKind::KwFunction => {
                        self.parse_function(SyntaxKind::FunctionDecl);
                    }
                    TokenKind::KwAsync if self.at_async_function() => {
                        self.parse_function(SyntaxKind::FunctionDecl);
                    }
                    TokenKind::KwClass => {
                        self.parse_class(SyntaxKind::ClassDecl);
                    }
                    _ => {
                        self.parse_assign_expr();
                        self.expect_semicolon();
                    }
                }
            }
            TokenKind::KwVar
            | TokenKind::KwLet
            | TokenKind::KwConst
            | TokenKind::KwFunction
            | TokenKind::KwAsync
            | TokenKind::KwClass => self.parse_statement(),
            TokenKind::LBrace | TokenKind::Star => {
                self.parse_module_clause();
                if self.at_contextual("from") {
                    self.parse_from_clause();
                }
                self.expect_semicolon();
            }
            _ => self.error("expected declaration after 'export'"),
        }

        marker.complete(self, SyntaxKind::ExportDecl);
    }

    /// `x`, `* as ns`, `{ a, b as c, default as d }` and combinations.
    fn parse_module_clause(&mut self) {
        loop {
            match self.current() {
                TokenKind::LBrace => {
                    self.bump();
                    while !self.at(TokenKind::RBrace) && !self.at_end() {
                        let kind = self.current();
                        if kind.is_ident_like()
                            || kind.is_keyword()
                            || matches!(kind, TokenKind::StringLiteral | TokenKind::Comma)
                        {
                            self.bump();
                        } else {
                            break;
                        }
                    }
                    self.expect(TokenKind::RBrace, "'}'");
                }
                TokenKind::Star | TokenKind::Comma => self.bump(),
                kind if kind.is_ident_like() && !self.at_contextual("from") => self.bump(),
                _ => break,
            }
        }
    }

    fn parse_from_clause(&mut self) {
        if self.at_contextual("from") {
            self.bump();
            self.expect(TokenKind::StringLiteral, "module specifier");
        } else {
            self.error("expected 'from'");
        }
    }
}
