//! Literal source lines.

use crate::Declaration;

/// Lines `first..=last` of `text`, 1-based. Out-of-range lines are clipped.
#[must_use]
pub fn code_range(text: &str, first: u32, last: u32) -> Vec<&str> {
    let first = first.max(1);
    if last < first {
        return Vec::new();
    }
    text.lines()
        .skip(first as usize - 1)
        .take((last - first + 1) as usize)
        .collect()
}

/// The buffer lines of a declaration, `location` shifted by `line_offset`.
#[must_use]
pub fn function_code(text: &str, declaration: &Declaration) -> String {
    let lines = declaration.buffer_lines();
    code_range(text, lines.start, lines.end).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "one\ntwo\nthree\nfour\n";

    #[test]
    fn inclusive_range() {
        assert_eq!(code_range(TEXT, 2, 3), vec!["two", "three"]);
        assert_eq!(code_range(TEXT, 4, 4), vec!["four"]);
    }

    #[test]
    fn clipped_range() {
        assert_eq!(code_range(TEXT, 0, 1), vec!["one"]);
        assert_eq!(code_range(TEXT, 3, 99), vec!["three", "four"]);
        assert!(code_range(TEXT, 3, 2).is_empty());
        assert!(code_range(TEXT, 9, 12).is_empty());
    }

    #[test]
    fn crlf_lines() {
        assert_eq!(code_range("a\r\nb\r\n", 1, 2), vec!["a", "b"]);
    }
}
