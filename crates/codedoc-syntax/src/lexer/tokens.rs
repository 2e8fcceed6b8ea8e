//! Token definitions for JavaScript.
//!
//! This module defines all lexical tokens that can appear in a JavaScript
//! source file. The token kinds are designed to work with both the `logos`
//! lexer generator and the `rowan` lossless syntax tree library.
//!
//! Regular expression literals are context dependent and are not produced
//! here; the [`Lexer`](super::Lexer) wrapper rewrites a `/` or `/=` into a
//! [`TokenKind::RegexLiteral`] when the previous token cannot end an
//! expression.

use logos::Logos;

fn lex_block_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(rest.len());
            false
        }
    }
}

fn lex_template(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let bytes = lex.remainder().as_bytes();
    match scan_template(bytes, 0) {
        Some(end) => {
            lex.bump(end);
            true
        }
        None => {
            lex.bump(bytes.len());
            false
        }
    }
}

/// Scans template text starting just after the opening backtick.
/// Returns the index just past the closing backtick.
fn scan_template(bytes: &[u8], mut i: usize) -> Option<usize> {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => return Some(i + 1),
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                i = scan_substitution(bytes, i + 2)?;
            }
            _ => i += 1,
        }
    }
    None
}

/// Scans a `${ ... }` substitution body. Returns the index just past the
/// matching `}`.
fn scan_substitution(bytes: &[u8], mut i: usize) -> Option<usize> {
    let mut depth = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                depth += 1;
                i += 1;
            }
            b'}' => {
                if depth == 0 {
                    return Some(i + 1);
                }
                depth -= 1;
                i += 1;
            }
            b'`' => i = scan_template(bytes, i + 1)?,
            quote @ (b'"' | b'\'') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote && bytes[i] != b'\n' {
                    i += if bytes[i] == b'\\' { 2 } else { 1 };
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    None
}

/// All token kinds in JavaScript.
///
/// Token kinds are divided into categories:
/// - Trivia (whitespace, comments) - preserved but not semantically significant
/// - Punctuation and operators
/// - Keywords (reserved and contextual words the grammar cares about)
/// - Literals (numbers, strings, templates, regular expressions)
/// - Identifiers
/// - Special tokens (errors, EOF)
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    /// Whitespace (spaces, tabs, newlines, no-break space, byte order mark)
    #[regex(r"[ \t\r\n\x0B\x0C\x{A0}\x{FEFF}]+")]
    Whitespace,

    /// Single-line comment: // ...
    #[regex(r"//[^\r\n]*", allow_greedy = true)]
    LineComment,

    /// Block comment: /* ... */ (does not nest).
    #[token("/*", lex_block_comment)]
    BlockComment,

    /// Interpreter directive: `#!/usr/bin/env node`
    #[regex(r"#![^\r\n]*", allow_greedy = true)]
    Hashbang,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    /// `;`
    #[token(";")]
    Semicolon,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `...`
    #[token("...")]
    Ellipsis,

    /// `?.`
    #[token("?.")]
    QuestionDot,

    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,

    /// `[`
    #[token("[")]
    LBracket,

    /// `]`
    #[token("]")]
    RBracket,

    /// `{`
    #[token("{")]
    LBrace,

    /// `}`
    #[token("}")]
    RBrace,

    /// `:`
    #[token(":")]
    Colon,

    /// `?`
    #[token("?")]
    Question,

    /// `=>`
    #[token("=>")]
    FatArrow,

    // =========================================================================
    // OPERATORS - Assignment
    // =========================================================================
    /// `=`
    #[token("=")]
    Eq,

    /// `+=`
    #[token("+=")]
    PlusEq,

    /// `-=`
    #[token("-=")]
    MinusEq,

    /// `*=`
    #[token("*=")]
    StarEq,

    /// `/=`
    #[token("/=")]
    SlashEq,

    /// `%=`
    #[token("%=")]
    PercentEq,

    /// `**=`
    #[token("**=")]
    StarStarEq,

    /// `<<=`
    #[token("<<=")]
    ShlEq,

    /// `>>=`
    #[token(">>=")]
    ShrEq,

    /// `>>>=`
    #[token(">>>=")]
    UShrEq,

    /// `&=`
    #[token("&=")]
    AmpEq,

    /// `|=`
    #[token("|=")]
    PipeEq,

    /// `^=`
    #[token("^=")]
    CaretEq,

    /// `&&=`
    #[token("&&=")]
    AmpAmpEq,

    /// `||=`
    #[token("||=")]
    PipePipeEq,

    /// `??=`
    #[token("??=")]
    QuestionQuestionEq,

    // =========================================================================
    // OPERATORS - Comparison
    // =========================================================================
    /// `==`
    #[token("==")]
    EqEq,

    /// `!=`
    #[token("!=")]
    NotEq,

    /// `===`
    #[token("===")]
    EqEqEq,

    /// `!==`
    #[token("!==")]
    NotEqEq,

    /// `<`
    #[token("<")]
    Lt,

    /// `<=`
    #[token("<=")]
    LtEq,

    /// `>`
    #[token(">")]
    Gt,

    /// `>=`
    #[token(">=")]
    GtEq,

    // =========================================================================
    // OPERATORS - Arithmetic
    // =========================================================================
    /// `+`
    #[token("+")]
    Plus,

    /// `-`
    #[token("-")]
    Minus,

    /// `*`
    #[token("*")]
    Star,

    /// `/` (division; see module docs for regular expressions)
    #[token("/")]
    Slash,

    /// `%`
    #[token("%")]
    Percent,

    /// `**`
    #[token("**")]
    StarStar,

    /// `++`
    #[token("++")]
    PlusPlus,

    /// `--`
    #[token("--")]
    MinusMinus,

    // =========================================================================
    // OPERATORS - Bitwise and logical
    // =========================================================================
    /// `<<`
    #[token("<<")]
    Shl,

    /// `>>`
    #[token(">>")]
    Shr,

    /// `>>>`
    #[token(">>>")]
    UShr,

    /// `&`
    #[token("&")]
    Amp,

    /// `|`
    #[token("|")]
    Pipe,

    /// `^`
    #[token("^")]
    Caret,

    /// `~`
    #[token("~")]
    Tilde,

    /// `!`
    #[token("!")]
    Bang,

    /// `&&`
    #[token("&&")]
    AmpAmp,

    /// `||`
    #[token("||")]
    PipePipe,

    /// `??`
    #[token("??")]
    QuestionQuestion,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    /// `async` (contextual)
    #[token("async")]
    KwAsync,

    /// `await` (contextual)
    #[token("await")]
    KwAwait,

    /// `break`
    #[token("break")]
    KwBreak,

    /// `case`
    #[token("case")]
    KwCase,

    /// `catch`
    #[token("catch")]
    KwCatch,

    /// `class`
    #[token("class")]
    KwClass,

    /// `const`
    #[token("const")]
    KwConst,

    /// `continue`
    #[token("continue")]
    KwContinue,

    /// `debugger`
    #[token("debugger")]
    KwDebugger,

    /// `default`
    #[token("default")]
    KwDefault,

    /// `delete`
    #[token("delete")]
    KwDelete,

    /// `do`
    #[token("do")]
    KwDo,

    /// `else`
    #[token("else")]
    KwElse,

    /// `export`
    #[token("export")]
    KwExport,

    /// `extends`
    #[token("extends")]
    KwExtends,

    /// `false`
    #[token("false")]
    KwFalse,

    /// `finally`
    #[token("finally")]
    KwFinally,

    /// `for`
    #[token("for")]
    KwFor,

    /// `function`
    #[token("function")]
    KwFunction,

    /// `if`
    #[token("if")]
    KwIf,

    /// `import`
    #[token("import")]
    KwImport,

    /// `in`
    #[token("in")]
    KwIn,

    /// `instanceof`
    #[token("instanceof")]
    KwInstanceof,

    /// `let` (contextual)
    #[token("let")]
    KwLet,

    /// `new`
    #[token("new")]
    KwNew,

    /// `null`
    #[token("null")]
    KwNull,

    /// `return`
    #[token("return")]
    KwReturn,

    /// `static` (contextual)
    #[token("static")]
    KwStatic,

    /// `super`
    #[token("super")]
    KwSuper,

    /// `switch`
    #[token("switch")]
    KwSwitch,

    /// `this`
    #[token("this")]
    KwThis,

    /// `throw`
    #[token("throw")]
    KwThrow,

    /// `true`
    #[token("true")]
    KwTrue,

    /// `try`
    #[token("try")]
    KwTry,

    /// `typeof`
    #[token("typeof")]
    KwTypeof,

    /// `var`
    #[token("var")]
    KwVar,

    /// `void`
    #[token("void")]
    KwVoid,

    /// `while`
    #[token("while")]
    KwWhile,

    /// `with`
    #[token("with")]
    KwWith,

    /// `yield` (contextual)
    #[token("yield")]
    KwYield,

    // =========================================================================
    // LITERALS
    // =========================================================================
    /// Numeric literal: `42`, `3.14`, `.5`, `1e-3`, `0xFF`, `0o17`, `0b1010`,
    /// `1_000`, `10n`
    #[regex(r"0[xX][0-9a-fA-F_]+n?")]
    #[regex(r"0[oO][0-7_]+n?")]
    #[regex(r"0[bB][01_]+n?")]
    #[regex(r"[0-9][0-9_]*n")]
    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9_]+)?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?")]
    NumberLiteral,

    /// String literal: `'hello'` or `"world"` (line continuations allowed)
    #[regex(r#""([^"\\\r\n]|\\[^\r\n]|\\\r?\n)*""#)]
    #[regex(r#"'([^'\\\r\n]|\\[^\r\n]|\\\r?\n)*'"#)]
    StringLiteral,

    /// Template literal including its substitutions: `` `a ${b} c` ``
    #[token("`", lex_template)]
    TemplateLiteral,

    /// Regular expression literal: `/ab+c/gi` (produced by the lexer wrapper)
    RegexLiteral,

    // =========================================================================
    // IDENTIFIERS
    // =========================================================================
    /// Identifier: letters, digits, `_`, `$` and non-ASCII letters
    #[regex(r"[A-Za-z_$\x{AA}-\x{FEFE}\x{FF00}-\x{10FFFF}][A-Za-z0-9_$\x{AA}-\x{FEFE}\x{FF00}-\x{10FFFF}]*")]
    Ident,

    /// Private class member name: `#count`
    #[regex(r"#[A-Za-z_$][A-Za-z0-9_$]*")]
    PrivateName,

    // =========================================================================
    // SPECIAL TOKENS
    // =========================================================================
    /// Lexer error - unrecognized character or unterminated literal/comment
    Error,

    /// End of file marker (not produced by lexer, added by parser)
    Eof,
}

impl TokenKind {
    /// Returns `true` if this token is trivia (whitespace, comment, or hashbang).
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::BlockComment | Self::Hashbang
        )
    }

    /// Returns `true` if this token is a comment.
    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }

    /// Returns `true` if this token is a keyword.
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::KwAsync as u16) && (self as u16) <= (Self::KwYield as u16)
    }

    /// Returns `true` if this token may be used as a binding or reference
    /// name in sloppy-mode code (`var async = 1; let = 2;`).
    pub fn is_ident_like(self) -> bool {
        matches!(
            self,
            Self::Ident | Self::KwAsync | Self::KwAwait | Self::KwLet | Self::KwStatic | Self::KwYield
        )
    }

    /// Returns `true` if this token is a literal.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::NumberLiteral
                | Self::StringLiteral
                | Self::TemplateLiteral
                | Self::RegexLiteral
                | Self::KwTrue
                | Self::KwFalse
                | Self::KwNull
        )
    }

    /// Returns `true` if a `/` following this token is a division operator
    /// rather than the start of a regular expression.
    pub fn ends_expression(self) -> bool {
        self.is_ident_like()
            || matches!(
                self,
                Self::PrivateName
                    | Self::NumberLiteral
                    | Self::StringLiteral
                    | Self::TemplateLiteral
                    | Self::RegexLiteral
                    | Self::RParen
                    | Self::RBracket
                    | Self::RBrace
                    | Self::KwThis
                    | Self::KwSuper
                    | Self::KwNull
                    | Self::KwTrue
                    | Self::KwFalse
                    | Self::PlusPlus
                    | Self::MinusMinus
            )
    }

    /// Returns `true` if this token can start an expression.
    pub fn can_start_expr(self) -> bool {
        self.is_ident_like()
            || self.is_literal()
            || self.prefix_binding_power().is_some()
            || matches!(
                self,
                Self::PrivateName
                    | Self::LParen
                    | Self::LBracket
                    | Self::LBrace
                    | Self::Ellipsis
                    | Self::KwThis
                    | Self::KwSuper
                    | Self::KwNew
                    | Self::KwFunction
                    | Self::KwClass
                    | Self::KwImport
            )
    }

    /// Returns `true` if this token can start a statement.
    pub fn can_start_statement(self) -> bool {
        self.can_start_expr()
            || matches!(
                self,
                Self::KwVar
                    | Self::KwConst
                    | Self::KwIf
                    | Self::KwFor
                    | Self::KwWhile
                    | Self::KwDo
                    | Self::KwReturn
                    | Self::KwBreak
                    | Self::KwContinue
                    | Self::KwThrow
                    | Self::KwTry
                    | Self::KwSwitch
                    | Self::KwDebugger
                    | Self::KwWith
                    | Self::KwExport
                    | Self::Semicolon // Empty statement
            )
    }

    /// Returns `true` if this token is an assignment operator.
    pub fn is_assign_op(self) -> bool {
        matches!(
            self,
            Self::Eq
                | Self::PlusEq
                | Self::MinusEq
                | Self::StarEq
                | Self::SlashEq
                | Self::PercentEq
                | Self::StarStarEq
                | Self::ShlEq
                | Self::ShrEq
                | Self::UShrEq
                | Self::AmpEq
                | Self::PipeEq
                | Self::CaretEq
                | Self::AmpAmpEq
                | Self::PipePipeEq
                | Self::QuestionQuestionEq
        )
    }

    /// Returns the binding power for Pratt parsing (left, right).
    /// Returns None if not a binary infix operator.
    ///
    /// Assignment and the conditional operator are handled by the
    /// expression parser directly; see [`Self::ASSIGN_BINDING_POWER`].
    pub fn infix_binding_power(self) -> Option<(u8, u8)> {
        Some(match self {
            Self::PipePipe | Self::QuestionQuestion => (4, 5),
            Self::AmpAmp => (6, 7),
            Self::Pipe => (8, 9),
            Self::Caret => (10, 11),
            Self::Amp => (12, 13),
            Self::EqEq | Self::NotEq | Self::EqEqEq | Self::NotEqEq => (14, 15),
            Self::Lt
            | Self::LtEq
            | Self::Gt
            | Self::GtEq
            | Self::KwInstanceof
            | Self::KwIn => (16, 17),
            Self::Shl | Self::Shr | Self::UShr => (18, 19),
            Self::Plus | Self::Minus => (20, 21),
            Self::Star | Self::Slash | Self::Percent => (22, 23),
            Self::StarStar => (25, 24), // Right associative
            _ => return None,
        })
    }

    /// Binding power of assignment operators (right associative).
    pub const ASSIGN_BINDING_POWER: (u8, u8) = (2, 1);

    /// Left binding power of the conditional operator `?:`.
    pub const CONDITIONAL_BINDING_POWER: u8 = 3;

    /// Returns the binding power for prefix operators.
    pub fn prefix_binding_power(self) -> Option<u8> {
        Some(match self {
            Self::Bang
            | Self::Tilde
            | Self::Plus
            | Self::Minus
            | Self::PlusPlus
            | Self::MinusMinus
            | Self::KwTypeof
            | Self::KwVoid
            | Self::KwDelete
            | Self::KwAwait => 26,
            _ => return None,
        })
    }
}

impl From<TokenKind> for rowan::SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        Self(kind as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<(TokenKind, &str)> {
        TokenKind::lexer(input)
            .spanned()
            .map(|(tok, span)| (tok.unwrap_or(TokenKind::Error), &input[span]))
            .collect()
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        lex(input)
            .into_iter()
            .map(|(k, _)| k)
            .filter(|k| !k.is_trivia())
            .collect()
    }

    #[test]
    fn test_declaration_keywords() {
        assert_eq!(
            kinds("function var let const class async"),
            vec![
                TokenKind::KwFunction,
                TokenKind::KwVar,
                TokenKind::KwLet,
                TokenKind::KwConst,
                TokenKind::KwClass,
                TokenKind::KwAsync
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(
            kinds("Function VAR Class"),
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Ident]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(kinds("functional varName"), vec![TokenKind::Ident, TokenKind::Ident]);
    }

    #[test]
    fn test_basic_operators() {
        assert_eq!(
            kinds("= == === != !== => ... ?. ?? ??= ** >>> >>>="),
            vec![
                TokenKind::Eq,
                TokenKind::EqEq,
                TokenKind::EqEqEq,
                TokenKind::NotEq,
                TokenKind::NotEqEq,
                TokenKind::FatArrow,
                TokenKind::Ellipsis,
                TokenKind::QuestionDot,
                TokenKind::QuestionQuestion,
                TokenKind::QuestionQuestionEq,
                TokenKind::StarStar,
                TokenKind::UShr,
                TokenKind::UShrEq
            ]
        );
    }

    #[test]
    fn test_number_literals() {
        let kinds = kinds("42 3.14 .5 1e10 2.5E-3 0xFF 0o17 0b1010 1_000_000 10n");
        assert_eq!(kinds.len(), 10);
        assert!(kinds.iter().all(|k| *k == TokenKind::NumberLiteral));
    }

    #[test]
    fn test_strings() {
        let tokens = lex(r#"'hello' "wor\"ld" 'it\'s'"#);
        let strings: Vec<_> = tokens
            .iter()
            .filter(|(k, _)| *k == TokenKind::StringLiteral)
            .map(|(_, text)| *text)
            .collect();
        assert_eq!(strings, vec!["'hello'", r#""wor\"ld""#, r"'it\'s'"]);
    }

    #[test]
    fn test_unterminated_string_is_error() {
        assert!(kinds("'abc\nx").contains(&TokenKind::Error));
    }

    #[test]
    fn test_comments() {
        let tokens = lex("// line comment\n/* block \n comment */ x");
        let kinds: Vec<_> = tokens.iter().map(|(k, _)| *k).collect();
        assert!(kinds.contains(&TokenKind::LineComment));
        assert!(kinds.contains(&TokenKind::BlockComment));
        assert_eq!(tokens[2].1, "/* block \n comment */");
    }

    #[test]
    fn test_block_comments_do_not_nest() {
        let tokens = lex("/* a /* b */ c */");
        assert_eq!(tokens[0], (TokenKind::BlockComment, "/* a /* b */"));
    }

    #[test]
    fn test_unterminated_block_comment_is_error() {
        let tokens = lex("x /* never closed");
        assert_eq!(tokens.last().map(|(k, _)| *k), Some(TokenKind::Error));
    }

    #[test]
    fn test_template_literal_with_substitutions() {
        let tokens = lex("`a ${ {b: `c${d}`}.b } e` + 1");
        assert_eq!(tokens[0], (TokenKind::TemplateLiteral, "`a ${ {b: `c${d}`}.b } e`"));
    }

    #[test]
    fn test_template_literal_spans_lines() {
        let tokens = lex("`line one\nline two`");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].0, TokenKind::TemplateLiteral);
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(
            kinds("$ _private $el café #secret"),
            vec![
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::PrivateName
            ]
        );
    }

    #[test]
    fn test_hashbang_is_trivia() {
        assert_eq!(kinds("#!/usr/bin/env node\nx"), vec![TokenKind::Ident]);
    }

    #[test]
    fn test_keyword_range() {
        assert!(TokenKind::KwAsync.is_keyword());
        assert!(TokenKind::KwYield.is_keyword());
        assert!(TokenKind::KwFunction.is_keyword());
        assert!(!TokenKind::Ident.is_keyword());
        assert!(!TokenKind::NumberLiteral.is_keyword());
    }

    #[test]
    fn test_binding_powers() {
        let (_, star_r) = TokenKind::Star.infix_binding_power().unwrap();
        let (plus_l, _) = TokenKind::Plus.infix_binding_power().unwrap();
        assert!(star_r > plus_l);
        let (pow_l, pow_r) = TokenKind::StarStar.infix_binding_power().unwrap();
        assert!(pow_l > pow_r);
        assert!(TokenKind::Eq.infix_binding_power().is_none());
        assert!(TokenKind::Eq.is_assign_op());
    }
}
