//! Snapshot tests for outlines and folding over a realistic script.

use expect_test::{expect, Expect};

use codedoc_ide::{
    all_comments, extract_declarations, folding_ranges, Dialect, ExtractOptions, ParseScope,
};

const SCRIPT: &str = r"// Widget helpers.
var Widget = function (el) {
  this.el = el;
};

/* Renders the widget. */
Widget.prototype.render = function () {
  return [
    this.el,
  ];
};

function mount(selector) {
  return new Widget(document.querySelector(selector));
}
";

fn check_outline(text: &str, options: ExtractOptions, expect: Expect) {
    let mut out = String::new();
    for declaration in extract_declarations(text, &options).unwrap() {
        let lines = declaration.buffer_lines();
        out.push_str(&format!(
            "{:?} {} {}..{} (+{})\n",
            declaration.kind,
            declaration.name,
            lines.start,
            lines.end,
            declaration.line_offset
        ));
    }
    expect.assert_eq(&out);
}

#[test]
fn test_outline_whole_file() {
    check_outline(
        SCRIPT,
        ExtractOptions::default(),
        expect![[r#"
            BoundFunction Widget 2..4 (+0)
            AssignedFunction Widget.prototype.render 7..11 (+0)
            Function mount 13..15 (+0)
        "#]],
    );
}

#[test]
fn test_outline_selection_with_headers() {
    let selected = SCRIPT.lines().skip(5).collect::<Vec<_>>().join("\n");
    check_outline(
        &selected,
        ExtractOptions {
            scope: ParseScope::Selection { start_line: 5 },
            inline_comments: false,
            header_comments: true,
        },
        expect![[r#"
            AssignedFunction Widget.prototype.render 6..11 (+4)
            Function mount 13..15 (+5)
        "#]],
    );
}

#[test]
fn test_all_comments_snapshot() {
    expect![[r#"
        // Widget helpers.
        /* Renders the widget. */
    "#]]
    .assert_eq(&all_comments(SCRIPT, Dialect::JavaScript).unwrap());
}

#[test]
fn test_folding_snapshot() {
    let rendered: Vec<_> = folding_ranges(SCRIPT)
        .into_iter()
        .map(|range| format!("{:?} {}..{}", range.kind, range.start_line, range.end_line))
        .collect();
    expect![[r#"
        [
            "Region 1..3",
            "Region 6..10",
            "Region 7..9",
            "Region 12..14",
        ]
    "#]]
    .assert_debug_eq(&rendered);
}
