//! Errors that can occur when checking a file
use thiserror::Error;

/// The input could not be parsed as XML.
///
/// `offset` is a byte index into the input, never past its end. `line` and
/// `column` are the 1-based position the XML library reported, when it
/// reported one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at byte offset {offset})")]
pub struct ParseFailure {
    pub message: String,
    pub offset: usize,
    pub line: Option<u64>,
    pub column: Option<u64>,
}

#[derive(Debug, Error)]
pub enum XMLProbeError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseFailure),
}
