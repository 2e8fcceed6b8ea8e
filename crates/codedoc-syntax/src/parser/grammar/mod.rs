//! Grammar rules for JavaScript.
//!
//! This module contains the grammar rules organized by category:
//!
//! - `statements.rs` - Statements, blocks and variable declarations
//! - `functions.rs` - Functions, classes and parameter lists
//! - `modules.rs` - `import` and `export` declarations
//! - `expressions.rs` - Expression parsing (Pratt parser) and literals

mod expressions;
mod functions;
mod modules;
mod statements;
