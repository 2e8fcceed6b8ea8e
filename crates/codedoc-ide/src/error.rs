use codedoc_syntax::ParseError;

/// Reasons an extraction produced nothing useful.
///
/// None of these are fatal: callers report them to the user and carry on
/// with an empty result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// The text was too broken to recover any declaration.
    #[error("unable to parse the file: {0}")]
    Parse(ParseError),
    /// Parsing succeeded but no top-level statement declares a function.
    #[error("no functions found")]
    NoDeclarationsFound,
    /// The file type is not one the parser understands.
    #[error("cannot parse a non-JS file [{name}]")]
    UnsupportedDialect {
        /// Name of the rejected file.
        name: String,
    },
    /// The text contains no comments.
    #[error("no comments found in the code")]
    NoComments,
}
