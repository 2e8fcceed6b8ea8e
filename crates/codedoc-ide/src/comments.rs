//! Comment collection and formatting.
//!
//! Comments are read straight from the token stream, so they are found even
//! inside constructs the parser had to recover from.

use once_cell::sync::Lazy;
use regex::Regex;
use text_size::TextRange;

use codedoc_syntax::{lex, LineIndex, TokenKind};

use crate::declarations::LineSpan;
use crate::{Dialect, ExtractError};

/// `<%# ... %>` template comment markers, matched non-greedily.
pub(crate) static TEMPLATE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<%#.*?%>").expect("template comment regex must compile"));

/// Comment flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `/* ... */`
    Block,
    /// `// ...`
    Line,
}

/// A comment captured from parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment flavour.
    pub kind: CommentKind,
    /// Body without the comment markers.
    pub value: String,
    /// 1-based lines in the coordinates of the parsed text.
    pub location: LineSpan,
    /// Byte range of the whole comment, markers included.
    pub range: TextRange,
}

impl Comment {
    /// Number of lines the comment covers.
    #[must_use]
    pub fn line_span(&self) -> u32 {
        self.location.end - self.location.start + 1
    }
}

/// Every comment in `text`, in source order.
#[must_use]
pub fn collect_comments(text: &str) -> Vec<Comment> {
    let index = LineIndex::new(text);
    lex(text)
        .into_iter()
        .filter_map(|token| {
            let raw = &text[token.range];
            let (kind, value) = match token.kind {
                TokenKind::BlockComment => (CommentKind::Block, &raw[2..raw.len() - 2]),
                TokenKind::LineComment => (CommentKind::Line, &raw[2..]),
                _ => return None,
            };
            Some(Comment {
                kind,
                value: value.to_string(),
                location: LineSpan {
                    start: index.line_number(token.range.start()),
                    end: index.line_number(token.range.end()),
                },
                range: token.range,
            })
        })
        .collect()
}

/// Renders a comment back to source form, terminated by a line break.
#[must_use]
pub fn format_comment(comment: &Comment) -> String {
    match comment.kind {
        CommentKind::Block => format!("/*{}*/\n", comment.value),
        CommentKind::Line => format!("//{}\n", comment.value),
    }
}

/// All comments of `text` concatenated in source order.
///
/// JavaScript comments are rendered with [`format_comment`]. Template
/// markers are gathered per line, and lines holding markers are joined with
/// line breaks.
pub fn all_comments(text: &str, dialect: Dialect) -> Result<String, ExtractError> {
    let rendered = match dialect {
        Dialect::JavaScript => collect_comments(text).iter().map(format_comment).collect(),
        Dialect::Template => text
            .split('\n')
            .map(|line| {
                TEMPLATE_COMMENT
                    .find_iter(line)
                    .map(|found| found.as_str())
                    .collect::<String>()
            })
            .filter(|markers| !markers.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
    };

    if rendered.is_empty() {
        return Err(ExtractError::NoComments);
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_and_line_comments() {
        let comments = collect_comments("/** doc\n * more\n */\nvar x; // tail\n");
        assert_eq!(comments.len(), 2);

        assert_eq!(comments[0].kind, CommentKind::Block);
        assert_eq!(comments[0].value, "* doc\n * more\n ");
        assert_eq!(comments[0].location, LineSpan { start: 1, end: 3 });
        assert_eq!(comments[0].line_span(), 3);

        assert_eq!(comments[1].kind, CommentKind::Line);
        assert_eq!(comments[1].value, " tail");
        assert_eq!(comments[1].location, LineSpan { start: 4, end: 4 });
    }

    #[test]
    fn formatting_restores_markers() {
        let comments = collect_comments("/* a */\n// b");
        let rendered: Vec<_> = comments.iter().map(format_comment).collect();
        assert_eq!(rendered, vec!["/* a */\n", "// b\n"]);
    }

    #[test]
    fn comments_inside_broken_code_are_found() {
        let comments = collect_comments("function (( { /* kept */ ");
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].value, " kept ");
    }

    #[test]
    fn all_comments_in_script() {
        let text = "// one\nvar a = 1; /* two */\n";
        assert_eq!(
            all_comments(text, Dialect::JavaScript).unwrap(),
            "// one\n/* two */\n"
        );
        assert_eq!(
            all_comments("var a;", Dialect::JavaScript),
            Err(ExtractError::NoComments)
        );
    }

    #[test]
    fn all_comments_in_template() {
        let text = "<p><%# first %>x<%# second %></p>\n<p>plain</p>\n<%# third %>";
        assert_eq!(
            all_comments(text, Dialect::Template).unwrap(),
            "<%# first %><%# second %>\n<%# third %>"
        );
        assert_eq!(
            all_comments("<p></p>", Dialect::Template),
            Err(ExtractError::NoComments)
        );
    }
}
