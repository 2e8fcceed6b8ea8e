//! Top-level function declarations.
//!
//! Only the statements directly under the root are inspected. Three shapes
//! qualify:
//!
//! - `function name() {}` (also `export`ed and `async`/generator forms)
//! - `object.property = function () {}` and other function-valued
//!   assignments
//! - `var name = function () {}`, one entry per qualifying declarator
//!
//! Arrow functions count as function values.

use smol_str::SmolStr;
use tracing::debug;

use codedoc_syntax::{parse, LineIndex, SyntaxKind, SyntaxNode};

use crate::comments::{collect_comments, format_comment, Comment};
use crate::strip::strip_script_comments;
use crate::ExtractError;

/// A 1-based, inclusive line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineSpan {
    /// First line.
    pub start: u32,
    /// Last line.
    pub end: u32,
}

/// Which part of a buffer is being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseScope {
    /// The whole buffer.
    #[default]
    WholeFile,
    /// A selection whose first line is the 0-based row `start_line` of the
    /// buffer.
    Selection {
        /// 0-based buffer row of the first selected line.
        start_line: u32,
    },
}

impl ParseScope {
    /// Offset to add to parsed line numbers to get buffer line numbers.
    #[must_use]
    pub fn line_offset(self) -> i64 {
        match self {
            Self::WholeFile => 0,
            Self::Selection { start_line } => i64::from(start_line),
        }
    }
}

/// Options for [`extract_declarations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractOptions {
    /// Which part of the buffer the text is.
    pub scope: ParseScope,
    /// Keep comments inside each declaration's code.
    pub inline_comments: bool,
    /// Pull the comment preceding each declaration into it. Only applied
    /// to selections.
    pub header_comments: bool,
}

/// The statement shape a declaration was recognised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// `function name() {}`
    Function,
    /// `target = function () {}`
    AssignedFunction,
    /// `var name = function () {}`
    BoundFunction,
}

/// A top-level named function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Function name, `object.property` for assignments.
    pub name: SmolStr,
    /// How the function was declared.
    pub kind: DeclarationKind,
    /// 1-based lines in parsed-text coordinates. Adding `line_offset` gives
    /// buffer lines.
    pub location: LineSpan,
    /// Correction from `location` to buffer lines.
    pub line_offset: i64,
    /// Source of the declaring statement, header comment first when merged.
    pub code: String,
    /// The header comment merged into this declaration, if any.
    pub header: Option<Comment>,
}

impl Declaration {
    /// Buffer lines covered by the declaration, clamped at line 1.
    #[must_use]
    pub fn buffer_lines(&self) -> LineSpan {
        let shift = |line: u32| {
            let shifted = (i64::from(line) + self.line_offset).max(1);
            u32::try_from(shifted).unwrap_or(u32::MAX)
        };
        LineSpan {
            start: shift(self.location.start),
            end: shift(self.location.end),
        }
    }
}

/// Extracts the top-level function declarations of `text`, in source order.
///
/// Recovery is best-effort: a broken statement never hides the valid ones
/// around it. [`ExtractError::Parse`] is only returned when nothing could be
/// recovered from text with syntax errors.
pub fn extract_declarations(
    text: &str,
    options: &ExtractOptions,
) -> Result<Vec<Declaration>, ExtractError> {
    let parsed = parse(text);
    let root = parsed.syntax();
    let index = LineIndex::new(text);
    let line_offset = options.scope.line_offset();

    let mut declarations = Vec::new();
    for statement in root.children() {
        for (name, kind) in classify_statement(&statement) {
            let range = statement.text_range();
            let source = &text[range];
            let code = if options.inline_comments {
                source.to_string()
            } else {
                strip_script_comments(source)
            };
            declarations.push(Declaration {
                name,
                kind,
                location: LineSpan {
                    start: index.line_number(range.start()),
                    end: index.line_number(range.end()),
                },
                line_offset,
                code,
                header: None,
            });
        }
    }

    if declarations.is_empty() {
        if let Some(error) = parsed.errors().first() {
            debug!(errors = parsed.errors().len(), "no declarations in unparsable text");
            return Err(ExtractError::Parse(error.clone()));
        }
        return Err(ExtractError::NoDeclarationsFound);
    }

    let merge = options.header_comments && matches!(options.scope, ParseScope::Selection { .. });
    if merge {
        merge_header_comments(&mut declarations, &collect_comments(text));
    }

    debug!(
        count = declarations.len(),
        errors = parsed.errors().len(),
        header_comments = merge,
        "extracted declarations"
    );
    Ok(declarations)
}

/// Code of the whole-file declaration named `name` or `exports.name`.
#[must_use]
pub fn find_declaration_code(text: &str, name: &str, inline_comments: bool) -> Option<String> {
    let options = ExtractOptions {
        inline_comments,
        ..ExtractOptions::default()
    };
    let exported = format!("exports.{name}");
    extract_declarations(text, &options)
        .ok()?
        .into_iter()
        .find(|declaration| declaration.name == name || declaration.name == exported)
        .map(|declaration| declaration.code)
}

/// Attaches to each declaration the first comment that ends at or before
/// its start line and, after the first declaration, starts at or after the
/// previous declaration's end line.
///
/// The first qualifying comment in source order wins, not the nearest one.
/// A merged declaration's `line_offset` drops by the comment's line count
/// and its `location` is shifted up by the same amount, so that
/// `location + line_offset` covers the comment and the declaration in
/// buffer lines.
fn merge_header_comments(declarations: &mut [Declaration], comments: &[Comment]) {
    let mut previous_end: Option<u32> = None;
    for declaration in declarations.iter_mut() {
        let start = declaration.location.start;
        let end = declaration.location.end;
        let header = comments.iter().find(|comment| {
            comment.location.end <= start
                && previous_end.is_none_or(|previous| comment.location.start >= previous)
        });
        previous_end = Some(end);

        let Some(header) = header else {
            continue;
        };
        let span = header.line_span();
        declaration.code.insert_str(0, &format_comment(header));
        declaration.line_offset -= i64::from(span);
        declaration.location = LineSpan {
            start: header.location.start + span,
            end: end + span,
        };
        declaration.header = Some(header.clone());
    }
}

/// Declarations introduced by one top-level statement.
fn classify_statement(statement: &SyntaxNode) -> Vec<(SmolStr, DeclarationKind)> {
    match statement.kind() {
        SyntaxKind::FunctionDecl => {
            let name = child_name(statement).unwrap_or_else(|| SmolStr::new_static("default"));
            vec![(name, DeclarationKind::Function)]
        }
        SyntaxKind::ExprStmt => statement
            .first_child()
            .and_then(|expr| assigned_function_name(&expr))
            .map(|name| vec![(name, DeclarationKind::AssignedFunction)])
            .unwrap_or_default(),
        SyntaxKind::VarStmt => statement
            .children()
            .filter(|child| child.kind() == SyntaxKind::VarDeclarator)
            .filter_map(|declarator| bound_function_name(&declarator))
            .map(|name| (name, DeclarationKind::BoundFunction))
            .collect(),
        SyntaxKind::ExportDecl => statement
            .children()
            .find(|child| matches!(child.kind(), SyntaxKind::FunctionDecl | SyntaxKind::VarStmt))
            .map(|inner| classify_statement(&inner))
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Name of `target = function () {}`, if the statement has that shape.
fn assigned_function_name(expr: &SyntaxNode) -> Option<SmolStr> {
    if expr.kind() != SyntaxKind::AssignExpr {
        return None;
    }
    let mut operands = expr.children();
    let target = operands.next()?;
    let value = operands.next()?;
    if !unwrap_parens(value).kind().is_function_expr() {
        return None;
    }
    Some(target_name(&target))
}

/// Name of `name = function () {}` inside a `var`/`let`/`const`.
fn bound_function_name(declarator: &SyntaxNode) -> Option<SmolStr> {
    let binding = declarator
        .first_child()
        .filter(|child| child.kind() == SyntaxKind::Name)?;
    let init = declarator
        .children_with_tokens()
        .skip_while(|element| element.kind() != SyntaxKind::Eq)
        .find_map(|element| element.into_node())?;
    if !unwrap_parens(init).kind().is_function_expr() {
        return None;
    }
    Some(SmolStr::new(binding.text().to_string()))
}

fn unwrap_parens(mut node: SyntaxNode) -> SyntaxNode {
    while node.kind() == SyntaxKind::ParenExpr {
        match node.first_child() {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

fn child_name(node: &SyntaxNode) -> Option<SmolStr> {
    node.children()
        .find(|child| child.kind() == SyntaxKind::Name)
        .map(|name| SmolStr::new(name.text().to_string()))
}

/// `object.property` for member targets; empty parts are left out.
fn target_name(target: &SyntaxNode) -> SmolStr {
    match target.kind() {
        SyntaxKind::NameRef | SyntaxKind::ThisExpr => SmolStr::new(target.text().to_string()),
        SyntaxKind::MemberExpr | SyntaxKind::IndexExpr => {
            let object = target
                .first_child()
                .map(|object| dotted_path(&object))
                .unwrap_or_default();
            let property = property_name(target).unwrap_or_default();
            match (object.is_empty(), property.is_empty()) {
                (false, false) => SmolStr::new(format!("{object}.{property}")),
                (false, true) => SmolStr::new(object),
                (true, _) => SmolStr::new(property),
            }
        }
        _ => SmolStr::default(),
    }
}

fn dotted_path(node: &SyntaxNode) -> String {
    match node.kind() {
        SyntaxKind::NameRef | SyntaxKind::ThisExpr => node.text().to_string(),
        SyntaxKind::MemberExpr | SyntaxKind::IndexExpr => target_name(node).to_string(),
        SyntaxKind::ParenExpr => node.first_child().map(|inner| dotted_path(&inner)).unwrap_or_default(),
        _ => String::new(),
    }
}

/// Property of a member or index target. Index targets only name a
/// property when the index is a string or number literal.
fn property_name(target: &SyntaxNode) -> Option<String> {
    if target.kind() == SyntaxKind::MemberExpr {
        return target
            .children()
            .filter(|child| child.kind() == SyntaxKind::Name)
            .last()
            .map(|name| name.text().to_string());
    }

    let index = target.children().nth(1)?;
    if index.kind() != SyntaxKind::Literal {
        return None;
    }
    let token = index.first_token()?;
    match token.kind() {
        SyntaxKind::StringLiteral => {
            let text = token.text();
            Some(text.get(1..text.len().saturating_sub(1)).unwrap_or_default().to_string())
        }
        SyntaxKind::NumberLiteral => Some(token.text().to_string()),
        _ => None,
    }
}
