//! Syntax tree types for JavaScript.
//!
//! This module provides the `rowan`-based syntax tree implementation,
//! including the `SyntaxKind` enum that covers both tokens and composite nodes.

use crate::lexer::TokenKind;
use crate::token_kinds::for_each_token_kind;

macro_rules! define_syntax_kinds {
    (
        tokens: [$($token:ident),* $(,)?],
        nodes: [$($(#[doc = $doc:literal])* $node:ident),* $(,)?] $(,)?
    ) => {
        /// All syntax node and token kinds in JavaScript.
        ///
        /// This enum includes both token kinds (from the lexer) and composite
        /// node kinds (produced by the parser).
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum SyntaxKind {
            // =========================================================================
            // TOKEN KINDS (mirrors TokenKind)
            // =========================================================================
            $($token,)*

            // =========================================================================
            // COMPOSITE NODE KINDS (produced by parser)
            // =========================================================================
            $($(#[doc = $doc])* $node,)*
        }

        const SYNTAX_KINDS: &[SyntaxKind] = &[
            $(SyntaxKind::$token,)*
            $(SyntaxKind::$node,)*
        ];

        impl From<TokenKind> for SyntaxKind {
            fn from(kind: TokenKind) -> Self {
                match kind {
                    $(TokenKind::$token => SyntaxKind::$token,)*
                }
            }
        }
    };
}

macro_rules! with_node_kinds {
    ($($token:ident),* $(,)?) => {
        define_syntax_kinds! {
            tokens: [$($token),*],
            nodes: [
                /// Root node of a source file
                SourceFile,

                // Declarations and statements
                /// `function name(params) { ... }`, optionally `async` or a generator
                FunctionDecl,
                /// `class Name extends Base { ... }`
                ClassDecl,
                /// `var`/`let`/`const` statement with one or more declarators
                VarStmt,
                /// A single `name = init` inside a `VarStmt`
                VarDeclarator,
                /// An expression followed by `;`
                ExprStmt,
                /// `{ ... }`
                Block,
                /// `if (cond) stmt else stmt`
                IfStmt,
                /// The `else stmt` part of an `IfStmt`
                ElseBranch,
                /// `for (init; test; update) stmt`, `for (x in y)`, `for (x of y)`
                ForStmt,
                /// `while (cond) stmt`
                WhileStmt,
                /// `do stmt while (cond)`
                DoWhileStmt,
                /// `return expr`
                ReturnStmt,
                /// `break label`
                BreakStmt,
                /// `continue label`
                ContinueStmt,
                /// `throw expr`
                ThrowStmt,
                /// `try { } catch (e) { } finally { }`
                TryStmt,
                /// `catch (e) { ... }`
                CatchClause,
                /// `finally { ... }`
                FinallyClause,
                /// `switch (expr) { ... }`
                SwitchStmt,
                /// `case expr:` or `default:` with its statements
                SwitchCase,
                /// `label: stmt`
                LabeledStmt,
                /// `;`
                EmptyStmt,
                /// `debugger;`
                DebuggerStmt,
                /// `with (obj) stmt`
                WithStmt,
                /// `import ... from 'module'`
                ImportDecl,
                /// `export ...`
                ExportDecl,

                // Classes and functions
                /// `{ members }` of a class
                ClassBody,
                /// A method, accessor or field inside a class body
                ClassMember,
                /// `static { ... }` initialization block
                StaticBlock,
                /// A binding name
                Name,
                /// `(a, b = 1, ...rest)`
                ParamList,
                /// A single parameter
                Param,
                /// `(args)` of a call
                ArgList,

                // Expressions
                /// `function (params) { ... }` in expression position
                FunctionExpr,
                /// `(params) => body`
                ArrowFunction,
                /// `class { ... }` in expression position
                ClassExpr,
                /// `target = value` and compound assignments
                AssignExpr,
                /// `cond ? a : b`
                ConditionalExpr,
                /// `a op b`
                BinaryExpr,
                /// `op a`
                UnaryExpr,
                /// `a++`, `a--`
                PostfixExpr,
                /// `a, b`
                SequenceExpr,
                /// `callee(args)`
                CallExpr,
                /// `new Callee(args)`
                NewExpr,
                /// `object.property`, `object?.property`
                MemberExpr,
                /// `object[index]`
                IndexExpr,
                /// ``tag`template` ``
                TaggedTemplateExpr,
                /// `(expr)`
                ParenExpr,
                /// `[a, b, ...c]`
                ArrayExpr,
                /// `{ a: 1, b() {} }`
                ObjectExpr,
                /// A property inside an object literal
                Property,
                /// `[expr]` used as a property key
                ComputedName,
                /// `...expr`
                SpreadElement,
                /// `yield expr`
                YieldExpr,
                /// A name used as an expression
                NameRef,
                /// A literal value
                Literal,
                /// `this`
                ThisExpr,
                /// `super`
                SuperExpr,

                /// Tokens the parser could not fit into the grammar
                ErrorNode,
            ],
        }
    };
}

for_each_token_kind!(with_node_kinds);

impl SyntaxKind {
    /// Returns `true` if this is a trivia kind.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::BlockComment | Self::Hashbang
        )
    }

    /// Returns `true` if this is a comment token.
    #[must_use]
    pub fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }

    /// Returns `true` if this is a token kind (not a composite node).
    #[must_use]
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::Eof as u16)
    }

    /// Returns `true` if this is a composite node kind.
    #[must_use]
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns `true` for expression nodes that evaluate to a function.
    #[must_use]
    pub fn is_function_expr(self) -> bool {
        matches!(self, Self::FunctionExpr | Self::ArrowFunction)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// The language type for JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JsLanguage {}

impl rowan::Language for JsLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SYNTAX_KINDS
            .get(raw.0 as usize)
            .copied()
            .unwrap_or(SyntaxKind::ErrorNode)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// A syntax node in the JavaScript syntax tree.
pub type SyntaxNode = rowan::SyntaxNode<JsLanguage>;

/// A syntax token in the JavaScript syntax tree.
pub type SyntaxToken = rowan::SyntaxToken<JsLanguage>;

/// A syntax element (either node or token) in the JavaScript syntax tree.
pub type SyntaxElement = rowan::SyntaxElement<JsLanguage>;
