//! Single source of truth for the token kind list.
//!
//! `TokenKind` (lexer) and `SyntaxKind` (tree) must agree on every token
//! variant; both are generated from this list so they cannot drift.

macro_rules! for_each_token_kind {
    ($callback:ident) => {
        $callback! {
            // Trivia
            Whitespace,
            LineComment,
            BlockComment,
            Hashbang,
            // Punctuation
            Semicolon,
            Comma,
            Dot,
            Ellipsis,
            QuestionDot,
            LParen,
            RParen,
            LBracket,
            RBracket,
            LBrace,
            RBrace,
            Colon,
            Question,
            FatArrow,
            // Assignment operators
            Eq,
            PlusEq,
            MinusEq,
            StarEq,
            SlashEq,
            PercentEq,
            StarStarEq,
            ShlEq,
            ShrEq,
            UShrEq,
            AmpEq,
            PipeEq,
            CaretEq,
            AmpAmpEq,
            PipePipeEq,
            QuestionQuestionEq,
            // Comparison operators
            EqEq,
            NotEq,
            EqEqEq,
            NotEqEq,
            Lt,
            LtEq,
            Gt,
            GtEq,
            // Arithmetic operators
            Plus,
            Minus,
            Star,
            Slash,
            Percent,
            StarStar,
            PlusPlus,
            MinusMinus,
            // Bitwise and logical operators
            Shl,
            Shr,
            UShr,
            Amp,
            Pipe,
            Caret,
            Tilde,
            Bang,
            AmpAmp,
            PipePipe,
            QuestionQuestion,
            // Keywords
            KwAsync,
            KwAwait,
            KwBreak,
            KwCase,
            KwCatch,
            KwClass,
            KwConst,
            KwContinue,
            KwDebugger,
            KwDefault,
            KwDelete,
            KwDo,
            KwElse,
            KwExport,
            KwExtends,
            KwFalse,
            KwFinally,
            KwFor,
            KwFunction,
            KwIf,
            KwImport,
            KwIn,
            KwInstanceof,
            KwLet,
            KwNew,
            KwNull,
            KwReturn,
            KwStatic,
            KwSuper,
            KwSwitch,
            KwThis,
            KwThrow,
            KwTrue,
            KwTry,
            KwTypeof,
            KwVar,
            KwVoid,
            KwWhile,
            KwWith,
            KwYield,
            // Literals
            NumberLiteral,
            StringLiteral,
            TemplateLiteral,
            RegexLiteral,
            // Names
            Ident,
            PrivateName,
            // Special
            Error,
            Eof,
        }
    };
}

pub(crate) use for_each_token_kind;
