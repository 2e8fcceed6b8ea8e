//! Folding ranges.

use codedoc_syntax::{parse, LineIndex, SyntaxKind};
use text_size::TextRange;

/// What a folding range covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoldingKind {
    /// A bracketed region of code.
    Region,
    /// A multi-line block comment.
    Comment,
}

/// A foldable region in 0-based lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FoldingRange {
    /// Line the region starts on; stays visible when folded.
    pub start_line: u32,
    /// Last hidden line.
    pub end_line: u32,
    /// Region kind.
    pub kind: FoldingKind,
}

fn is_foldable_kind(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Block
            | SyntaxKind::ClassBody
            | SyntaxKind::ObjectExpr
            | SyntaxKind::ArrayExpr
            | SyntaxKind::ParamList
            | SyntaxKind::SwitchStmt
            | SyntaxKind::ArgList
    )
}

/// All regions of `text` spanning more than one line, in source order.
#[must_use]
pub fn folding_ranges(text: &str) -> Vec<FoldingRange> {
    let parsed = parse(text);
    let root = parsed.syntax();
    let index = LineIndex::new(text);

    let mut ranges = Vec::new();
    for element in root.descendants_with_tokens() {
        let kind = match element.kind() {
            SyntaxKind::BlockComment => FoldingKind::Comment,
            kind if is_foldable_kind(kind) => FoldingKind::Region,
            _ => continue,
        };
        if let Some(range) = line_range(&index, element.text_range(), kind) {
            ranges.push(range);
        }
    }
    ranges
}

fn line_range(index: &LineIndex, range: TextRange, kind: FoldingKind) -> Option<FoldingRange> {
    let start_line = index.line_col(range.start()).line;
    let end = index.line_col(range.end());
    let mut end_line = end.line;
    if end_line > start_line && end.col == 0 {
        end_line = end_line.saturating_sub(1);
    }
    (end_line > start_line).then_some(FoldingRange {
        start_line,
        end_line,
        kind,
    })
}
