//! Expression parsing using Pratt parsing.
//!
//! Operator precedence (low to high):
//! - `,` (sequence, handled by `parse_expression`)
//! - `=`, `+=`, ... (2-1, right associative)
//! - `? :` (3)
//! - `||`, `??` (4-5)
//! - `&&` (6-7)
//! - `|` (8-9), `^` (10-11), `&` (12-13)
//! - `==`, `!=`, `===`, `!==` (14-15)
//! - `<`, `<=`, `>`, `>=`, `instanceof`, `in` (16-17)
//! - `<<`, `>>`, `>>>` (18-19)
//! - `+`, `-` (20-21)
//! - `*`, `/`, `%` (22-23)
//! - `**` (25-24, right associative)
//! - prefix `!`, `~`, `+`, `-`, `++`, `--`, `typeof`, `void`, `delete`, `await` (26)
//! - postfix: member access, calls, indexing, tagged templates, `++`/`--`

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::{CompletedMarker, Parser};

/// Binding power used for `extends` clauses and `new` callees: only
/// postfix operators bind tighter.
const LHS_BINDING_POWER: u8 = 27;

impl Parser<'_, '_> {
    /// Parse an expression, including comma sequences.
    pub(crate) fn parse_expression(&mut self) -> CompletedMarker {
        let mut lhs = self.parse_assign_expr();
        if self.at(TokenKind::Comma) {
            let marker = lhs.precede(self);
            while self.eat(TokenKind::Comma) {
                // Trailing comma in arrow parameters: `(a, b,) => ...`
                if self.at(TokenKind::RParen) {
                    break;
                }
                self.parse_assign_expr();
            }
            lhs = marker.complete(self, SyntaxKind::SequenceExpr);
        }
        lhs
    }

    /// Parse an assignment-level expression (no top-level commas).
    pub(crate) fn parse_assign_expr(&mut self) -> CompletedMarker {
        self.parse_expr_bp(0)
    }

    /// Parse a left-hand-side expression: a primary expression followed by
    /// postfix operators only.
    pub(crate) fn parse_lhs_expr(&mut self) -> CompletedMarker {
        self.parse_expr_bp(LHS_BINDING_POWER)
    }

    /// Parse expression with minimum binding power.
    pub(crate) fn parse_expr_bp(&mut self, min_bp: u8) -> CompletedMarker {
        if !self.enter() {
            return self.err_and_bump("expression nested too deeply");
        }
        let expr = self.parse_expr_bp_inner(min_bp);
        self.leave();
        expr
    }

    fn parse_expr_bp_inner(&mut self, min_bp: u8) -> CompletedMarker {
        let mut lhs = match self.current() {
            TokenKind::Ellipsis => {
                let marker = self.start();
                self.bump();
                self.parse_assign_expr();
                marker.complete(self, SyntaxKind::SpreadElement)
            }
            TokenKind::KwYield => self.parse_yield_expr(),
            TokenKind::KwAsync if self.at_async_arrow() => self.parse_async_arrow(),
            kind => {
                if let Some(bp) = kind.prefix_binding_power() {
                    let marker = self.start();
                    self.bump();
                    self.parse_expr_bp(bp);
                    marker.complete(self, SyntaxKind::UnaryExpr)
                } else {
                    self.parse_primary_expr()
                }
            }
        };

        loop {
            if let Some(next) = self.parse_postfix_expr(lhs) {
                lhs = next;
                continue;
            }

            let op = self.current();

            if op == TokenKind::FatArrow
                && matches!(
                    lhs.kind(),
                    SyntaxKind::NameRef | SyntaxKind::ParenExpr | SyntaxKind::CallExpr
                )
            {
                let marker = lhs.precede(self);
                self.bump(); // =>
                self.parse_arrow_body();
                lhs = marker.complete(self, SyntaxKind::ArrowFunction);
                break;
            }

            if op.is_assign_op() {
                let (l_bp, r_bp) = TokenKind::ASSIGN_BINDING_POWER;
                if l_bp < min_bp {
                    break;
                }
                let marker = lhs.precede(self);
                self.bump(); // operator
                self.parse_expr_bp(r_bp);
                lhs = marker.complete(self, SyntaxKind::AssignExpr);
                continue;
            }

            if op == TokenKind::Question {
                if TokenKind::CONDITIONAL_BINDING_POWER < min_bp {
                    break;
                }
                let marker = lhs.precede(self);
                self.bump(); // ?
                self.parse_assign_expr();
                self.expect(TokenKind::Colon, "':'");
                self.parse_expr_bp(TokenKind::ASSIGN_BINDING_POWER.1);
                lhs = marker.complete(self, SyntaxKind::ConditionalExpr);
                continue;
            }

            if let Some((l_bp, r_bp)) = op.infix_binding_power() {
                if l_bp < min_bp {
                    break;
                }

                let marker = lhs.precede(self);
                self.bump(); // operator
                self.parse_expr_bp(r_bp);
                lhs = marker.complete(self, SyntaxKind::BinaryExpr);
                continue;
            }

            break;
        }

        lhs
    }

    /// Parse postfix expressions (member access, calls, indexing, tagged
    /// templates, `++`/`--`).
    pub(crate) fn parse_postfix_expr(&mut self, lhs: CompletedMarker) -> Option<CompletedMarker> {
        match self.current() {
            TokenKind::Dot | TokenKind::QuestionDot => {
                let optional = self.at(TokenKind::QuestionDot);
                let marker = lhs.precede(self);
                self.bump();
                match self.current() {
                    TokenKind::LParen if optional => {
                        self.parse_arg_list();
                        return Some(marker.complete(self, SyntaxKind::CallExpr));
                    }
                    TokenKind::LBracket if optional => {
                        self.bump();
                        self.parse_expression();
                        self.expect(TokenKind::RBracket, "']'");
                        return Some(marker.complete(self, SyntaxKind::IndexExpr));
                    }
                    kind if kind.is_ident_like()
                        || kind.is_keyword()
                        || kind == TokenKind::PrivateName =>
                    {
                        self.parse_name();
                    }
                    _ => self.error("expected property name"),
                }
                Some(marker.complete(self, SyntaxKind::MemberExpr))
            }
            TokenKind::LBracket => {
                let marker = lhs.precede(self);
                self.bump();
                self.parse_expression();
                self.expect(TokenKind::RBracket, "']'");
                Some(marker.complete(self, SyntaxKind::IndexExpr))
            }
            TokenKind::LParen => {
                let marker = lhs.precede(self);
                self.parse_arg_list();
                Some(marker.complete(self, SyntaxKind::CallExpr))
            }
            TokenKind::TemplateLiteral => {
                let marker = lhs.precede(self);
                self.bump();
                Some(marker.complete(self, SyntaxKind::TaggedTemplateExpr))
            }
            TokenKind::PlusPlus | TokenKind::MinusMinus if !self.at_line_break() => {
                let marker = lhs.precede(self);
                self.bump();
                Some(marker.complete(self, SyntaxKind::PostfixExpr))
            }
            _ => None,
        }
    }

    /// Parse call arguments: `(a, ...b)`.
    pub(crate) fn parse_arg_list(&mut self) {
        let marker = self.start();
        self.bump(); // (

        while !self.at(TokenKind::RParen) && !self.at_end() {
            self.parse_assign_expr();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::RParen, "')'");
        marker.complete(self, SyntaxKind::ArgList);
    }

    /// Parse primary expressions (literals, names, grouping, literals of
    /// compound values, function and class expressions).
    pub(crate) fn parse_primary_expr(&mut self) -> CompletedMarker {
        match self.current() {
            kind if kind.is_literal() => {
                let marker = self.start();
                self.bump();
                marker.complete(self, SyntaxKind::Literal)
            }
            TokenKind::KwThis => {
                let marker = self.start();
                self.bump();
                marker.complete(self, SyntaxKind::ThisExpr)
            }
            TokenKind::KwSuper => {
                let marker = self.start();
                self.bump();
                marker.complete(self, SyntaxKind::SuperExpr)
            }
            TokenKind::KwFunction => self.parse_function(SyntaxKind::FunctionExpr),
            TokenKind::KwAsync if self.at_async_function() => {
                self.parse_function(SyntaxKind::FunctionExpr)
            }
            TokenKind::KwClass => self.parse_class(SyntaxKind::ClassExpr),
            TokenKind::KwNew => self.parse_new_expr(),
            TokenKind::LParen => {
                let marker = self.start();
                self.bump();
                if !self.at(TokenKind::RParen) {
                    self.parse_expression();
                }
                self.expect(TokenKind::RParen, "')'");
                marker.complete(self, SyntaxKind::ParenExpr)
            }
            TokenKind::LBracket => self.parse_array_expr(),
            TokenKind::LBrace => self.parse_object_expr(),
            // `import(...)` and `import.meta`
            TokenKind::KwImport | TokenKind::PrivateName => {
                let marker = self.start();
                self.bump();
                marker.complete(self, SyntaxKind::NameRef)
            }
            kind if kind.is_ident_like() => {
                let marker = self.start();
                self.bump();
                marker.complete(self, SyntaxKind::NameRef)
            }
            _ => {
                self.error("expected expression");
                let marker = self.start();
                marker.complete(self, SyntaxKind::ErrorNode)
            }
        }
    }

    fn parse_new_expr(&mut self) -> CompletedMarker {
        let marker = self.start();
        self.bump(); // new

        // `new.target`
        if self.eat(TokenKind::Dot) {
            if self.current().is_ident_like() {
                self.parse_name();
            } else {
                self.error("expected 'target'");
            }
            return marker.complete(self, SyntaxKind::NewExpr);
        }

        let mut callee = if self.at(TokenKind::KwNew) {
            self.parse_lhs_expr()
        } else {
            self.parse_primary_expr()
        };
        while matches!(
            self.current(),
            TokenKind::Dot | TokenKind::LBracket | TokenKind::TemplateLiteral
        ) {
            match self.parse_postfix_expr(callee) {
                Some(next) => callee = next,
                None => break,
            }
        }

        if self.at(TokenKind::LParen) {
            self.parse_arg_list();
        }
        marker.complete(self, SyntaxKind::NewExpr)
    }

    fn parse_array_expr(&mut self) -> CompletedMarker {
        let marker = self.start();
        self.bump(); // [

        while !self.at(TokenKind::RBracket) && !self.at_end() {
            // Holes: `[a, , b]`
            if self.eat(TokenKind::Comma) {
                continue;
            }
            self.parse_assign_expr();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::RBracket, "']'");
        marker.complete(self, SyntaxKind::ArrayExpr)
    }

    fn parse_object_expr(&mut self) -> CompletedMarker {
        let marker = self.start();
        self.bump(); // {

        while !self.at(TokenKind::RBrace) && !self.at_end() {
            self.parse_object_property();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::RBrace, "'}'");
        marker.complete(self, SyntaxKind::ObjectExpr)
    }

    fn parse_object_property(&mut self) {
        let marker = self.start();

        if self.eat(TokenKind::Ellipsis) {
            self.parse_assign_expr();
            marker.complete(self, SyntaxKind::SpreadElement);
            return;
        }

        self.parse_member_modifiers();
        if !self.parse_property_key() {
            marker.complete(self, SyntaxKind::ErrorNode);
            return;
        }

        if self.at(TokenKind::LParen) {
            // Method shorthand: `name(params) { body }`
            self.parse_param_list();
            self.parse_block();
        } else if self.eat(TokenKind::Colon) || self.eat(TokenKind::Eq) {
            // `key: value`, or `name = default` inside a destructuring pattern
            self.parse_assign_expr();
        }

        marker.complete(self, SyntaxKind::Property);
    }

    fn parse_yield_expr(&mut self) -> CompletedMarker {
        let marker = self.start();
        self.bump(); // yield
        self.eat(TokenKind::Star);

        let has_operand = !self.at_line_break()
            && self.current().can_start_expr()
            && !self.current().is_assign_op();
        if has_operand {
            self.parse_assign_expr();
        }
        marker.complete(self, SyntaxKind::YieldExpr)
    }

    /// `async x => ...` on a single line.
    fn at_async_arrow(&self) -> bool {
        self.nth(1).is_ident_like()
            && self.nth(2) == TokenKind::FatArrow
            && !self.source.line_break_before_n(0)
    }

    fn parse_async_arrow(&mut self) -> CompletedMarker {
        let marker = self.start();
        self.bump(); // async
        let param = self.start();
        self.parse_name();
        param.complete(self, SyntaxKind::Param);
        self.bump(); // =>
        self.parse_arrow_body();
        marker.complete(self, SyntaxKind::ArrowFunction)
    }

    fn parse_arrow_body(&mut self) {
        if self.at(TokenKind::LBrace) {
            self.parse_block();
        } else {
            self.parse_assign_expr();
        }
    }
}
