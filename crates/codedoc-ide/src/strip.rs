//! Comment removal.
//!
//! Stripping works on the lossless token stream, so everything that is not a
//! comment is reproduced byte for byte. Lines that held a comment are trimmed
//! at the end, and dropped entirely when nothing but whitespace remains.

use std::borrow::Cow;

use codedoc_syntax::lex;

use crate::comments::TEMPLATE_COMMENT;
use crate::Dialect;

/// Returns `text` with every comment removed.
///
/// Applying this twice gives the same result as applying it once.
#[must_use]
pub fn strip_all_comments(text: &str, dialect: Dialect) -> String {
    match dialect {
        Dialect::JavaScript => strip_script_comments(text),
        Dialect::Template => strip_template_comments(text),
    }
}

pub(crate) fn strip_script_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Output lines that lost a comment, ascending.
    let mut touched: Vec<usize> = Vec::new();
    let mut line = 0;

    for token in lex(text) {
        let slice = &text[token.range];
        if !token.kind.is_comment() {
            line += slice.matches('\n').count();
            out.push_str(slice);
            continue;
        }

        if touched.last() != Some(&line) {
            touched.push(line);
        }
        // A multi-line comment is a line terminator: `return /*\n*/ x` returns
        // undefined, so the break has to survive.
        if slice.contains('\n') {
            out.push_str(if slice.contains("\r\n") { "\r\n" } else { "\n" });
            line += 1;
            touched.push(line);
            continue;
        }
        // Keep neighbouring tokens apart: `a/*x*/b` must not become `ab`.
        let before = out.chars().next_back();
        let after = text[usize::from(token.range.end())..].chars().next();
        if let (Some(before), Some(after)) = (before, after) {
            if !before.is_whitespace() && !after.is_whitespace() {
                out.push(' ');
            }
        }
    }

    if touched.is_empty() {
        return out;
    }

    let mut lines: Vec<Cow<'_, str>> = Vec::new();
    for (index, text_line) in out.split('\n').enumerate() {
        if touched.binary_search(&index).is_err() {
            lines.push(Cow::Borrowed(text_line));
            continue;
        }
        let (body, cr) = match text_line.strip_suffix('\r') {
            Some(body) => (body, "\r"),
            None => (text_line, ""),
        };
        let body = body.trim_end();
        if !body.is_empty() {
            lines.push(Cow::Owned(format!("{body}{cr}")));
        }
    }
    lines.join("\n")
}

fn strip_template_comments(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let mut line = Cow::Borrowed(line);
            // Removing a marker can join the halves of another one.
            while TEMPLATE_COMMENT.is_match(&line) {
                line = Cow::Owned(TEMPLATE_COMMENT.replace_all(&line, "").into_owned());
            }
            line
        })
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(text: &str) -> String {
        strip_all_comments(text, Dialect::JavaScript)
    }

    #[test]
    fn text_without_comments_is_unchanged() {
        let text = "var a = 1;\n\n\nfunction f() {}\n";
        assert_eq!(strip(text), text);
    }

    #[test]
    fn comment_only_lines_are_dropped() {
        let text = "/**\n * Header.\n */\nfunction f() {\n  // inside\n  return 1;\n}\n";
        assert_eq!(strip(text), "function f() {\n  return 1;\n}\n");
    }

    #[test]
    fn trailing_comments_are_trimmed() {
        assert_eq!(strip("var a = 1; // one\nvar b;\n"), "var a = 1;\nvar b;\n");
    }

    #[test]
    fn inline_block_comment_keeps_tokens_apart() {
        assert_eq!(strip("var a/*x*/=/*y*/1;"), "var a = 1;");
        assert_eq!(strip("f(a /* x */, b);"), "f(a , b);");
    }

    #[test]
    fn comment_markers_in_literals_survive() {
        let text = "var url = 'http://example.com'; var re = /\\/\\*/;\n";
        assert_eq!(strip(text), text);
    }

    #[test]
    fn crlf_line_endings_are_kept() {
        assert_eq!(strip("a(); // x\r\nb();\r\n"), "a();\r\nb();\r\n");
    }

    #[test]
    fn multi_line_comment_keeps_line_break() {
        assert_eq!(
            strip("function f(value) {\n  return /* see\n     below */ value;\n}\n"),
            "function f(value) {\n  return\n value;\n}\n"
        );
        assert_eq!(strip("return /* x\r\n */ v;\r\n"), "return\r\n v;\r\n");
    }

    #[test]
    fn stripping_twice_is_stable() {
        for text in [
            "a/*1*//*2*/b // c\n/* d */\n",
            "x = y /*c*// 2;\n",
            "/* only */",
            "// only\n",
            "var r = /a/ /*c*/ .source;\n",
            "*/\\/*é'f\nreturn '\"b?*/\t;?default =/*var else?.//=?./\r\n(",
            "a = b /* one\n two */ / c / d;\n",
        ] {
            let once = strip(text);
            assert_eq!(strip(&once), once, "not idempotent for {text:?}");
        }
    }

    #[test]
    fn template_markers_are_removed() {
        let text = "<p><%# note %>Hello</p>\n<%# whole line %>\n\n<%= name %>";
        let stripped = strip_all_comments(text, Dialect::Template);
        assert_eq!(stripped, "<p>Hello</p>\n<%= name %>");
        assert_eq!(strip_all_comments(&stripped, Dialect::Template), stripped);
    }

    #[test]
    fn nested_template_markers_are_removed() {
        assert_eq!(
            strip_all_comments("a<%<%# x %># y %>b", Dialect::Template),
            "ab"
        );
    }
}
