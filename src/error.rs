use thiserror::Error;

/// Failures of the snippet dispatch path.
///
/// Only [`SnippetError::NoActiveTarget`] is reachable through the command surface; the other
/// variants guard free-form input (operation names, cursor placement).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnippetError {
    #[error("No document is open. Open a file to insert code!")]
    NoActiveTarget,

    #[error("Unknown snippet operation `{0}`. Expected one of: addition, subtraction, multiplication, inverse")]
    UnknownOperation(String),

    #[error("Offset {offset} is past the end of the document ({len} characters)")]
    OffsetOutOfBounds { offset: usize, len: usize },

    #[error("Line {line}, column {column} is outside the document")]
    PositionOutOfBounds { line: usize, column: usize },
}
