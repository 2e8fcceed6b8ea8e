//! Offset to line/column mapping.
//!
//! Declarations and comments report 1-based line numbers; folding ranges use
//! 0-based lines. Both are derived from the same table of line starts.

use text_size::TextSize;

/// A 0-based line and column (in bytes) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    /// 0-based line.
    pub line: u32,
    /// 0-based byte column within the line.
    pub col: u32,
}

/// Index of line start offsets for a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    /// Builds the index. Lines are terminated by `\n`; a preceding `\r`
    /// belongs to the line it ends.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| TextSize::from((i + 1) as u32)),
        );
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Number of lines in the text. An empty text has one line.
    #[must_use]
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Converts an offset into a 0-based line/column pair. Offsets past the
    /// end are clamped.
    #[must_use]
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1);
        let col = offset - self.line_starts[line];
        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    /// 1-based line number containing `offset`.
    #[must_use]
    pub fn line_number(&self, offset: TextSize) -> u32 {
        self.line_col(offset).line + 1
    }

    /// Offset of the start of a 0-based line, if it exists.
    #[must_use]
    pub fn line_start(&self, line: u32) -> Option<TextSize> {
        self.line_starts.get(line as usize).copied()
    }
}
