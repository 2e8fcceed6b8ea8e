//! `codedoc-ide` - Editor features for JavaScript sources.
//!
//! This crate provides the analysis features the CodeDoc editor offers on
//! top of `codedoc-syntax`:
//!
//! - **Declarations**: Top-level named functions with optional header comments
//! - **Comments**: Collecting and stripping comments
//! - **Folding**: Foldable regions of a buffer
//! - **Code ranges**: Literal source lines for a declaration
//!
//! # Architecture
//!
//! All features are pure functions over a text buffer. Nothing is cached;
//! every call parses the text it is given.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod code_range;
pub mod comments;
pub mod declarations;
pub mod dialect;
mod error;
pub mod folding;
pub mod strip;

pub use code_range::{code_range, function_code};
pub use comments::{all_comments, collect_comments, format_comment, Comment, CommentKind};
pub use declarations::{
    extract_declarations, find_declaration_code, Declaration, DeclarationKind, ExtractOptions,
    LineSpan, ParseScope,
};
pub use dialect::Dialect;
pub use error::ExtractError;
pub use folding::{folding_ranges, FoldingKind, FoldingRange};
pub use strip::strip_all_comments;
