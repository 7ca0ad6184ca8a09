#![forbid(unsafe_code)]
#![deny(nonstandard_style)]
#![warn(array_into_iter)]
// #![warn(missing_docs)]
#![crate_type = "lib"]

//! Check XML files
//!
//! This library reads a whole file into memory, hands it to [`xmltree`] once and,
//! if the document is malformed, reports what went wrong together with the byte
//! offset of the failure. The parsed tree is returned but never inspected.
//!
//! ```no_run
//! let mut stdout = std::io::stdout();
//! let outcome = xmlprobe::run("document.xml", &mut stdout).unwrap();
//! std::process::exit(outcome.exit_code().into());
//! ```

use std::{io::Write, path::Path};

mod buffer;
mod errors;
mod report;

mod parsers;

use log::debug;
use xmltree::Element;

pub use buffer::InputBuffer;
pub use errors::{ParseFailure, XMLProbeError};
pub use parsers::{parse_document, ParseFlags};
pub use report::{write_failure, Outcome};

/// Parses `bytes` as an XML document with the default flags.
pub fn check_bytes(bytes: &[u8]) -> Result<Element, ParseFailure> {
    parse_document(&InputBuffer::from_bytes(bytes), ParseFlags::DEFAULT)
}

/// Reads the file at `path` and parses it with the default flags.
///
/// I/O errors and parse failures come back as the two variants of [`XMLProbeError`].
pub fn check_file<P: AsRef<Path>>(path: P) -> Result<Element, XMLProbeError> {
    let buffer = InputBuffer::from_path(path)?;
    let root = parse_document(&buffer, ParseFlags::DEFAULT)?;

    Ok(root)
}

/// Checks the file at `path`, writing a two-line report to `out` if it does not parse.
///
/// Nothing is written on success. Only I/O errors (reading the file or writing
/// the report) are returned as `Err`; a parse failure is an [`Outcome`].
pub fn run<P: AsRef<Path>, W: Write>(path: P, out: &mut W) -> Result<Outcome, XMLProbeError> {
    match check_file(path) {
        Ok(_) => {
            debug!("document is well-formed");
            Ok(Outcome::Success)
        }
        Err(XMLProbeError::Parse(failure)) => {
            debug!(
                "parse failed at byte {} (line {:?}, column {:?})",
                failure.offset, failure.line, failure.column
            );
            write_failure(out, &failure)?;
            Ok(Outcome::Failure(failure))
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_bytes() {
        assert!(check_bytes(b"<root/>").is_ok());
        assert_eq!(check_bytes(b"<root><child></root>").unwrap_err().offset, 13);
    }

    #[test]
    fn test_check_missing_file() {
        let result = check_file("this/path/does/not/exist.xml");
        assert!(matches!(result, Err(XMLProbeError::Io(_))));
    }

    #[test]
    fn test_run_missing_file_writes_nothing() {
        let mut out = Vec::new();
        let result = run("this/path/does/not/exist.xml", &mut out);

        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
