use std::io::Write;

use crate::errors::ParseFailure;

/// How a single check ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(ParseFailure),
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Failure(_) => 1,
        }
    }
}

/// Writes the message and then the byte offset, one per line.
pub fn write_failure<W: Write>(out: &mut W, failure: &ParseFailure) -> Result<(), std::io::Error> {
    writeln!(out, "{}", failure.message)?;
    writeln!(out, "{}", failure.offset)?;
    out.flush()
}
