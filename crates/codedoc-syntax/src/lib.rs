//! `codedoc-syntax` - Lexer, parser, and concrete syntax tree for JavaScript.
//!
//! This crate provides the low-level syntactic analysis used by the CodeDoc
//! editor core:
//!
//! - **Lexer**: Tokenizes source text into a stream of tokens
//! - **Parser**: Builds a concrete syntax tree (CST) from tokens
//! - **Syntax Tree**: Lossless representation of the source code
//! - **Line Index**: Maps byte offsets to 1-based line numbers
//!
//! # Design Principles
//!
//! The crate follows the design of `rust-analyzer` and uses the `rowan`
//! library for building lossless syntax trees:
//!
//! - **Lossless**: All source text is preserved, including whitespace and comments
//! - **Error-tolerant**: Parsing continues after errors, producing a partial tree
//! - **Shallow where it matters**: Statement boundaries are always recovered, so a
//!   broken construct never hides the valid top-level statements around it
//!
//! # Example
//!
//! ```
//! use codedoc_syntax::lexer::{lex, TokenKind};
//!
//! let source = "var x = 42;";
//! let tokens = lex(source);
//!
//! // Filter out whitespace to see the meaningful tokens
//! let meaningful: Vec<_> = tokens.iter()
//!     .filter(|t| !t.kind.is_trivia())
//!     .collect();
//!
//! assert_eq!(meaningful[0].kind, TokenKind::KwVar);
//! assert_eq!(meaningful[1].kind, TokenKind::Ident);
//! assert_eq!(meaningful[2].kind, TokenKind::Eq);
//! assert_eq!(meaningful[3].kind, TokenKind::NumberLiteral);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod lexer;
pub mod line_index;
pub mod parser;
pub mod syntax;
mod token_kinds;

pub use lexer::{lex, Lexer, Token, TokenKind};
pub use line_index::{LineCol, LineIndex};
pub use parser::{parse, Parse, ParseError};
pub use syntax::{JsLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
