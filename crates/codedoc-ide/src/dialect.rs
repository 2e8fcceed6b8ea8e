//! Source dialects recognised by file name.

use crate::ExtractError;

/// The languages the comment and outline features understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// JavaScript scripts and modules, handled by the full parser.
    JavaScript,
    /// Embedded templates (`.ejs`) whose comments are `<%# ... %>` markers.
    /// Only the line-oriented marker features apply.
    Template,
}

impl Dialect {
    /// Detects the dialect from a file name's extension.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, extension) = name.rsplit_once('.')?;
        match extension {
            "js" | "mjs" | "cjs" => Some(Self::JavaScript),
            "ejs" => Some(Self::Template),
            _ => None,
        }
    }

    /// Like [`Dialect::from_file_name`], reporting unknown files as
    /// [`ExtractError::UnsupportedDialect`].
    pub fn for_file(name: &str) -> Result<Self, ExtractError> {
        Self::from_file_name(name).ok_or_else(|| ExtractError::UnsupportedDialect {
            name: name.to_string(),
        })
    }

    /// Returns `true` if the full parser can be used on this dialect.
    #[must_use]
    pub fn is_parsed(self) -> bool {
        matches!(self, Self::JavaScript)
    }
}
