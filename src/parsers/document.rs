use log::debug;
use xml::{common::Position, reader::ErrorKind};
use xmltree::{Element, ParseError};

use crate::{buffer::InputBuffer, errors::ParseFailure};

use super::{anchor_to_markup, byte_offset};

/// Configuration bits handed to the parse entry point.
///
/// Only the default (no bits set) is defined: library defaults, whitespace
/// preserved, no relaxations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseFlags(u32);

impl ParseFlags {
    pub const DEFAULT: Self = Self(0);

    pub const fn bits(self) -> u32 {
        self.0
    }
}

/// Parses the buffer's content as an XML document.
///
/// Any failure position is turned into a byte offset into `buffer` right here,
/// while the buffer is still borrowed, so the returned [`ParseFailure`] does
/// not depend on the buffer afterwards.
pub fn parse_document(buffer: &InputBuffer, flags: ParseFlags) -> Result<Element, ParseFailure> {
    debug_assert_eq!(buffer.terminated().last(), Some(&0));
    debug!("parsing {} bytes with flags {:#x}", buffer.len(), flags.bits());

    let content = buffer.content();

    match Element::parse(content) {
        Ok(root) => {
            debug!("parsed document with root element <{}>", root.name);
            Ok(root)
        }
        Err(ParseError::MalformedXml(err)) => {
            let position = err.position();
            let offset = decode_error_offset(&err, content).unwrap_or_else(|| {
                anchor_to_markup(content, byte_offset(content, position.row, position.column))
            });

            Err(ParseFailure {
                message: failure_message(&err),
                offset,
                line: Some(position.row + 1),
                column: Some(position.column + 1),
            })
        }
        // no position to go on, the whole input was consumed
        Err(err) => Err(ParseFailure {
            message: err.to_string(),
            offset: content.len(),
            line: None,
            column: None,
        }),
    }
}

// `Error::msg` only covers syntax errors, the other kinds carry their own message
fn failure_message(err: &xml::reader::Error) -> String {
    match err.kind() {
        ErrorKind::Syntax(msg) => msg.to_string(),
        ErrorKind::Io(io_err) => io_err.to_string(),
        ErrorKind::Utf8(utf8_err) => utf8_err.to_string(),
        ErrorKind::UnexpectedEof => "Unexpected end of stream".to_string(),
    }
}

// decode errors are reported at 1:1, point them at the first invalid byte instead
fn decode_error_offset(err: &xml::reader::Error, content: &[u8]) -> Option<usize> {
    match err.kind() {
        ErrorKind::Utf8(_) | ErrorKind::Io(_) => std::str::from_utf8(content).err().map(|e| e.valid_up_to()),
        _ => None,
    }
}
