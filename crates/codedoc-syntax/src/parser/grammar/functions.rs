//! Functions, classes and the property keys they share with object literals.

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::{CompletedMarker, Parser};

/// Tokens that may begin a property or method key.
fn starts_property_key(kind: TokenKind) -> bool {
    kind.is_ident_like()
        || kind.is_keyword()
        || matches!(
            kind,
            TokenKind::StringLiteral
                | TokenKind::NumberLiteral
                | TokenKind::PrivateName
                | TokenKind::LBracket
                | TokenKind::Star
        )
}

impl Parser<'_, '_> {
    /// Parse `[async] function [*] [name] (params) { body }` as either a
    /// declaration or an expression.
    pub(crate) fn parse_function(&mut self, kind: SyntaxKind) -> CompletedMarker {
        let marker = self.start();
        self.eat(TokenKind::KwAsync);
        self.expect(TokenKind::KwFunction, "'function'");
        self.eat(TokenKind::Star);

        if self.current().is_ident_like() {
            self.parse_name();
        }

        self.parse_param_list();
        self.parse_block();
        marker.complete(self, kind)
    }

    /// Parse `(a, b = 1, {c}, ...rest)`.
    pub(crate) fn parse_param_list(&mut self) -> CompletedMarker {
        let marker = self.start();
        if !self.expect(TokenKind::LParen, "'('") {
            return marker.complete(self, SyntaxKind::ParamList);
        }

        while !self.at(TokenKind::RParen) && !self.at_end() {
            let param = self.start();
            self.parse_assign_expr();
            param.complete(self, SyntaxKind::Param);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::RParen, "')'");
        marker.complete(self, SyntaxKind::ParamList)
    }

    /// Parse `class [Name] [extends Base] { members }`.
    pub(crate) fn parse_class(&mut self, kind: SyntaxKind) -> CompletedMarker {
        let marker = self.start();
        self.bump(); // class

        if self.current().is_ident_like() {
            self.parse_name();
        }
        if self.eat(TokenKind::KwExtends) {
            self.parse_lhs_expr();
        }

        self.parse_class_body();
        marker.complete(self, kind)
    }

    fn parse_class_body(&mut self) {
        let marker = self.start();
        if self.expect(TokenKind::LBrace, "'{'") {
            while !self.at(TokenKind::RBrace) && !self.at_end() {
                if self.eat(TokenKind::Semicolon) {
                    continue;
                }
                let before = self.source.position();
                self.parse_class_member();
                if self.source.position() == before {
                    self.err_and_bump("expected class member");
                }
            }
            self.expect(TokenKind::RBrace, "'}'");
        }
        marker.complete(self, SyntaxKind::ClassBody);
    }

    fn parse_class_member(&mut self) {
        if self.at(TokenKind::KwStatic) && self.nth(1) == TokenKind::LBrace {
            let marker = self.start();
            self.bump();
            self.parse_block();
            marker.complete(self, SyntaxKind::StaticBlock);
            return;
        }

        let marker = self.start();
        self.parse_member_modifiers();
        if !self.parse_property_key() {
            marker.complete(self, SyntaxKind::ErrorNode);
            return;
        }

        if self.at(TokenKind::LParen) {
            self.parse_param_list();
            self.parse_block();
        } else {
            if self.eat(TokenKind::Eq) {
                self.parse_assign_expr();
            }
            self.expect_semicolon();
        }
        marker.complete(self, SyntaxKind::ClassMember);
    }

    /// Skips `static`, `async`, `get`, `set` and `*` when they modify a
    /// following key rather than being the key themselves.
    pub(crate) fn parse_member_modifiers(&mut self) {
        loop {
            let is_modifier = self.at(TokenKind::KwStatic)
                || self.at(TokenKind::KwAsync)
                || self.at_contextual("get")
                || self.at_contextual("set");
            if is_modifier && starts_property_key(self.nth(1)) {
                self.bump();
            } else if self.at(TokenKind::Star) {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Parse a property key. Returns `false` (after reporting an error) if
    /// the current token cannot be a key.
    pub(crate) fn parse_property_key(&mut self) -> bool {
        match self.current() {
            TokenKind::LBracket => {
                let marker = self.start();
                self.bump();
                self.parse_assign_expr();
                self.expect(TokenKind::RBracket, "']'");
                marker.complete(self, SyntaxKind::ComputedName);
                true
            }
            kind if kind != TokenKind::Star && starts_property_key(kind) => {
                self.parse_name();
                true
            }
            _ => {
                self.error("expected property name");
                false
            }
        }
    }

    /// Parse a single token as a `Name` node.
    pub(crate) fn parse_name(&mut self) {
        let marker = self.start();
        self.bump();
        marker.complete(self, SyntaxKind::Name);
    }
}
