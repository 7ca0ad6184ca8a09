use std::{fs::File, io::Read, path::Path};

use log::debug;

const TERMINATOR: u8 = 0;

/// The whole input file held in memory, followed by a single zero byte.
///
/// The terminator is never part of [`InputBuffer::content`], so lengths and
/// offsets reported against the buffer always refer to the file bytes alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    bytes: Vec<u8>,
}

impl InputBuffer {
    pub fn from_bytes(content: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(content.len() + 1);
        bytes.extend_from_slice(content);
        bytes.push(TERMINATOR);

        Self { bytes }
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, std::io::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        bytes.push(TERMINATOR);

        Ok(Self { bytes })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let path = path.as_ref();
        let buffer = Self::from_reader(File::open(path)?)?;
        debug!("read {} bytes from {}", buffer.len(), path.display());

        Ok(buffer)
    }

    /// The file bytes, without the terminator.
    pub fn content(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }

    pub fn terminated(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        // the terminator is pushed by every constructor
        self.bytes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[test]
fn test_terminator_appended() {
    let buffer = InputBuffer::from_bytes(b"<a/>");

    assert_eq!(buffer.content(), b"<a/>");
    assert_eq!(buffer.terminated(), b"<a/>\0");
    assert_eq!(buffer.len(), 4);
}

#[test]
fn test_empty_buffer() {
    let buffer = InputBuffer::from_bytes(&[]);

    assert!(buffer.is_empty());
    assert_eq!(buffer.content(), &[] as &[u8]);
    assert_eq!(buffer.terminated(), &[0_u8]);
}

#[test]
fn test_from_reader() {
    let input: &[u8] = b"<root>text</root>";
    let buffer = InputBuffer::from_reader(input).unwrap();

    assert_eq!(buffer, InputBuffer::from_bytes(input));
}

#[test]
fn test_content_keeps_interior_zero_bytes() {
    let buffer = InputBuffer::from_bytes(&[b'<', 0, b'>']);

    assert_eq!(buffer.len(), 3);
    assert_eq!(buffer.content(), &[b'<', 0, b'>']);
}

#[test]
fn test_from_missing_path() {
    let result = InputBuffer::from_path("this/path/does/not/exist.xml");

    assert!(result.is_err());
}
