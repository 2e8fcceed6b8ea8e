//! Shared helpers for parser tests.
#![allow(dead_code, unused_imports)]

pub use codedoc_syntax::parser::parse;
pub use codedoc_syntax::syntax::{SyntaxKind, SyntaxNode};

/// Formats a parse result as an indented tree for snapshot testing.
pub fn snapshot_parse(source: &str) -> String {
    let parsed = parse(source);
    let syntax = parsed.syntax();

    let mut output = String::new();
    format_node(&syntax, &mut output, 0);

    if !parsed.ok() {
        output.push_str("---\nErrors:\n");
        for err in parsed.errors() {
            output.push_str(&format!("  - {err}\n"));
        }
    }

    output
}

fn format_node(node: &SyntaxNode, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);

    out.push_str(&format!(
        "{}{:?}@{:?}\n",
        indent,
        node.kind(),
        node.text_range()
    ));

    for child in node.children_with_tokens() {
        match child {
            rowan::NodeOrToken::Node(n) => format_node(&n, out, depth + 1),
            rowan::NodeOrToken::Token(t) => {
                // Only show significant tokens
                let kind = t.kind();
                if !kind.is_trivia() {
                    out.push_str(&format!(
                        "{}{:?}@{:?} {:?}\n",
                        "  ".repeat(depth + 1),
                        kind,
                        t.text_range(),
                        t.text()
                    ));
                }
            }
        }
    }
}

/// Kinds of the root's child nodes, i.e. the top-level statements.
pub fn top_level_kinds(source: &str) -> Vec<SyntaxKind> {
    parse(source).syntax().children().map(|n| n.kind()).collect()
}

/// Returns `true` if any node of `kind` appears in the tree.
pub fn contains_node(source: &str, kind: SyntaxKind) -> bool {
    parse(source).syntax().descendants().any(|n| n.kind() == kind)
}

/// Asserts that `source` parses without errors and returns the root.
pub fn parse_ok(source: &str) -> SyntaxNode {
    let parsed = parse(source);
    assert!(parsed.ok(), "errors: {:?}", parsed.errors());
    assert_eq!(parsed.syntax().text().to_string(), source, "tree must be lossless");
    parsed.syntax()
}
