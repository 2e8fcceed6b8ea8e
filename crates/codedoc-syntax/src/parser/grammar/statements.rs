//! Statement parsing for JavaScript.
//!
//! Supported statements:
//! - Declarations: `var`/`let`/`const`, `function`, `class`
//! - Expression statements with automatic semicolon insertion
//! - `if`/`else`, `for` (classic, `in`, `of`), `while`, `do ... while`
//! - `return`, `break`, `continue`, `throw`
//! - `try`/`catch`/`finally`, `switch`/`case`/`default`
//! - Labeled, empty, `debugger` and `with` statements

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::{CompletedMarker, Parser};

impl Parser<'_, '_> {
    /// Parse a single statement.
    pub(crate) fn parse_statement(&mut self) {
        if !self.enter() {
            self.err_and_bump("statement nested too deeply");
            return;
        }
        self.parse_statement_inner();
        self.leave();
    }

    fn parse_statement_inner(&mut self) {
        match self.current() {
            TokenKind::LBrace => {
                self.parse_block();
            }
            TokenKind::KwVar | TokenKind::KwConst => {
                self.parse_var_stmt(false);
            }
            TokenKind::KwLet if self.at_let_declaration() => {
                self.parse_var_stmt(false);
            }
            TokenKind::KwFunction => {
                self.parse_function(SyntaxKind::FunctionDecl);
            }
            TokenKind::KwAsync if self.at_async_function() => {
                self.parse_function(SyntaxKind::FunctionDecl);
            }
            TokenKind::KwClass => {
                self.parse_class(SyntaxKind::ClassDecl);
            }
            TokenKind::KwIf => self.parse_if_stmt(),
            TokenKind::KwFor => self.parse_for_stmt(),
            TokenKind::KwWhile => self.parse_while_stmt(),
            TokenKind::KwDo => self.parse_do_while_stmt(),
            TokenKind::KwReturn => self.parse_jump_stmt(SyntaxKind::ReturnStmt),
            TokenKind::KwThrow => self.parse_jump_stmt(SyntaxKind::ThrowStmt),
            TokenKind::KwBreak => self.parse_jump_stmt(SyntaxKind::BreakStmt),
            TokenKind::KwContinue => self.parse_jump_stmt(SyntaxKind::ContinueStmt),
            TokenKind::KwTry => self.parse_try_stmt(),
            TokenKind::KwSwitch => self.parse_switch_stmt(),
            TokenKind::KwWith => self.parse_with_stmt(),
            TokenKind::KwDebugger => {
                let marker = self.start();
                self.bump();
                self.expect_semicolon();
                marker.complete(self, SyntaxKind::DebuggerStmt);
            }
            TokenKind::Semicolon => {
                let marker = self.start();
                self.bump();
                marker.complete(self, SyntaxKind::EmptyStmt);
            }
            TokenKind::KwImport
                if !matches!(self.nth(1), TokenKind::LParen | TokenKind::Dot) =>
            {
                self.parse_import_decl();
            }
            TokenKind::KwExport => self.parse_export_decl(),
            kind if kind.is_ident_like() && self.nth(1) == TokenKind::Colon => {
                self.parse_labeled_stmt();
            }
            kind if kind.can_start_expr() => self.parse_expr_stmt(),
            TokenKind::RBrace | TokenKind::Eof => self.error("expected statement"),
            _ => {
                self.err_and_bump("expected statement");
            }
        }
    }

    /// `let` starts a declaration only when followed by a binding.
    pub(crate) fn at_let_declaration(&self) -> bool {
        let next = self.nth(1);
        next.is_ident_like() || matches!(next, TokenKind::LBracket | TokenKind::LBrace)
    }

    /// `async function` on a single line.
    pub(crate) fn at_async_function(&self) -> bool {
        self.at(TokenKind::KwAsync)
            && self.nth(1) == TokenKind::KwFunction
            && !self.source.line_break_before_n(0)
    }

    /// Parse a `{ ... }` block. A missing `{` yields an empty block rather
    /// than swallowing the following statements.
    pub(crate) fn parse_block(&mut self) -> CompletedMarker {
        let marker = self.start();
        if !self.expect(TokenKind::LBrace, "'{'") {
            return marker.complete(self, SyntaxKind::Block);
        }

        while !self.at(TokenKind::RBrace) && !self.at_end() {
            self.parse_statement_with_progress();
        }

        self.expect(TokenKind::RBrace, "'}'");
        marker.complete(self, SyntaxKind::Block)
    }

    /// Parse a variable statement. Inside a `for` head the terminator is
    /// left to the loop.
    pub(crate) fn parse_var_stmt(&mut self, in_for_head: bool) -> CompletedMarker {
        let marker = self.start();
        self.bump(); // var / let / const

        loop {
            let declarator = self.start();
            self.parse_binding();
            if self.eat(TokenKind::Eq) {
                self.parse_assign_expr();
            }
            declarator.complete(self, SyntaxKind::VarDeclarator);

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        if !in_for_head {
            self.expect_semicolon();
        }
        marker.complete(self, SyntaxKind::VarStmt)
    }

    /// Parse a binding target: a name or a destructuring pattern.
    pub(crate) fn parse_binding(&mut self) {
        match self.current() {
            kind if kind.is_ident_like() => self.parse_name(),
            TokenKind::LBracket | TokenKind::LBrace => {
                self.parse_primary_expr();
            }
            _ => self.error("expected binding name"),
        }
    }

    fn parse_paren_condition(&mut self) {
        self.expect(TokenKind::LParen, "'('");
        self.parse_expression();
        self.expect(TokenKind::RParen, "')'");
    }

    fn parse_if_stmt(&mut self) {
        let marker = self.start();
        self.bump(); // if
        self.parse_paren_condition();
        self.parse_statement();

        if self.at(TokenKind::KwElse) {
            let else_branch = self.start();
            self.bump();
            self.parse_statement();
            else_branch.complete(self, SyntaxKind::ElseBranch);
        }

        marker.complete(self, SyntaxKind::IfStmt);
    }

    fn parse_for_stmt(&mut self) {
        let marker = self.start();
        self.bump(); // for
        self.eat(TokenKind::KwAwait);
        self.expect(TokenKind::LParen, "'('");

        match self.current() {
            TokenKind::Semicolon => {}
            TokenKind::KwVar | TokenKind::KwConst => {
                self.parse_var_stmt(true);
            }
            TokenKind::KwLet if self.at_let_declaration() => {
                self.parse_var_stmt(true);
            }
            _ => {
                self.parse_expression();
            }
        }

        if self.at(TokenKind::KwIn) || self.at_contextual("of") {
            self.bump();
            self.parse_expression();
        } else {
            self.expect(TokenKind::Semicolon, "';'");
            if !self.at(TokenKind::Semicolon) && !self.at(TokenKind::RParen) {
                self.parse_expression();
            }
            self.expect(TokenKind::Semicolon, "';'");
            if !self.at(TokenKind::RParen) {
                self.parse_expression();
            }
        }

        self.expect(TokenKind::RParen, "')'");
        self.parse_statement();
        marker.complete(self, SyntaxKind::ForStmt);
    }

    fn parse_while_stmt(&mut self) {
        let marker = self.start();
        self.bump(); // while
        self.parse_paren_condition();
        self.parse_statement();
        marker.complete(self, SyntaxKind::WhileStmt);
    }

    fn parse_do_while_stmt(&mut self) {
        let marker = self.start();
        self.bump(); // do
        self.parse_statement();
        self.expect(TokenKind::KwWhile, "'while'");
        self.parse_paren_condition();
        self.eat(TokenKind::Semicolon);
        marker.complete(self, SyntaxKind::DoWhileStmt);
    }

    /// `return`, `throw`, `break` and `continue`. Their operand must start
    /// on the same line.
    fn parse_jump_stmt(&mut self, kind: SyntaxKind) {
        let marker = self.start();
        self.bump();

        let has_operand = !self.at(TokenKind::Semicolon)
            && !self.at(TokenKind::RBrace)
            && !self.at_end()
            && !self.at_line_break();
        if has_operand {
            match kind {
                SyntaxKind::ReturnStmt | SyntaxKind::ThrowStmt => {
                    self.parse_expression();
                }
                _ if self.current().is_ident_like() => {
                    let label = self.start();
                    self.bump();
                    label.complete(self, SyntaxKind::NameRef);
                }
                _ => {}
            }
        }

        self.expect_semicolon();
        marker.complete(self, kind);
    }

    fn parse_try_stmt(&mut self) {
        let marker = self.start();
        self.bump(); // try
        self.parse_block();

        let mut has_handler = false;
        if self.at(TokenKind::KwCatch) {
            let clause = self.start();
            self.bump();
            if self.eat(TokenKind::LParen) {
                self.parse_binding();
                self.expect(TokenKind::RParen, "')'");
            }
            self.parse_block();
            clause.complete(self, SyntaxKind::CatchClause);
            has_handler = true;
        }
        if self.at(TokenKind::KwFinally) {
            let clause = self.start();
            self.bump();
            self.parse_block();
            clause.complete(self, SyntaxKind::FinallyClause);
            has_handler = true;
        }
        if !has_handler {
            self.error("expected 'catch' or 'finally'");
        }

        marker.complete(self, SyntaxKind::TryStmt);
    }

    fn parse_switch_stmt(&mut self) {
        let marker = self.start();
        self.bump(); // switch
        self.parse_paren_condition();

        if self.expect(TokenKind::LBrace, "'{'") {
            while !self.at(TokenKind::RBrace) && !self.at_end() {
                if matches!(self.current(), TokenKind::KwCase | TokenKind::KwDefault) {
                    self.parse_switch_case();
                } else {
                    self.err_and_bump("expected 'case' or 'default'");
                }
            }
            self.expect(TokenKind::RBrace, "'}'");
        }

        marker.complete(self, SyntaxKind::SwitchStmt);
    }

    fn parse_switch_case(&mut self) {
        let marker = self.start();
        if self.eat(TokenKind::KwCase) {
            self.parse_expression();
        } else {
            self.bump(); // default
        }
        self.expect(TokenKind::Colon, "':'");

        while !matches!(
            self.current(),
            TokenKind::KwCase | TokenKind::KwDefault | TokenKind::RBrace | TokenKind::Eof
        ) {
            self.parse_statement_with_progress();
        }

        marker.complete(self, SyntaxKind::SwitchCase);
    }

    fn parse_with_stmt(&mut self) {
        let marker = self.start();
        self.bump(); // with
        self.parse_paren_condition();
        self.parse_statement();
        marker.complete(self, SyntaxKind::WithStmt);
    }

    fn parse_labeled_stmt(&mut self) {
        let marker = self.start();
        self.parse_name();
        self.bump(); // :
        self.parse_statement();
        marker.complete(self, SyntaxKind::LabeledStmt);
    }

    fn parse_expr_stmt(&mut self) {
        let marker = self.start();
        self.parse_expression();
        self.expect_semicolon();
        marker.complete(self, SyntaxKind::ExprStmt);
    }
}
