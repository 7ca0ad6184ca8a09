use log::warn;
use nom::{
    bytes::complete::{tag, take_till, take_until},
    multi::fold_many_m_n,
    sequence::terminated,
    IResult, Parser,
};

// positions reported by the xml library:
// [row] lines separated by '\n', 0-based
// [column] characters (not bytes) into that row, 0-based
// a UTF-16 byte order mark is not counted

const UTF16_BOM_LEN: usize = 2;

fn line(input: &[u8]) -> IResult<&[u8], &[u8]> {
    terminated(take_until("\n"), tag("\n")).parse(input)
}

// skips `rows` complete lines and returns the number of bytes skipped
fn skip_lines(input: &[u8], rows: usize) -> IResult<&[u8], usize> {
    fold_many_m_n(rows, rows, line, || 0, |skipped, line| skipped + line.len() + 1).parse(input)
}

fn rest_of_line(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_till(|b| b == b'\n').parse(input)
}

// byte index of the `column`th character in `line`, or the line length if it is shorter
fn char_index(line: &[u8], column: usize) -> usize {
    line.iter()
        .enumerate()
        .filter(|&(_, &b)| !is_utf8_continuation(b))
        .nth(column)
        .map_or(line.len(), |(i, _)| i)
}

fn is_utf8_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Resolves a 0-based row/column position to a byte offset into `input`.
///
/// Rows past the end of the input resolve to `input.len()`, columns past the
/// end of their row resolve to the end of that row.
pub(crate) fn byte_offset(input: &[u8], row: u64, column: u64) -> usize {
    let (Ok(row), Ok(column)) = (usize::try_from(row), usize::try_from(column)) else {
        warn!("position {}:{} does not fit in usize, using end of input", row, column);
        return input.len();
    };

    match input {
        [0xFF, 0xFE, ..] => return utf16_offset(input, u16::from_le_bytes, row, column),
        [0xFE, 0xFF, ..] => return utf16_offset(input, u16::from_be_bytes, row, column),
        _ => {}
    }

    let Ok((rest, line_start)) = skip_lines(input, row) else {
        warn!("row {} is past the last line of the input, using end of input", row);
        return input.len();
    };

    match rest_of_line(rest) {
        Ok((_, line)) => line_start + char_index(line, column),
        Err(_) => line_start,
    }
}

// walks the code units after the BOM; a surrogate pair is one character
fn utf16_offset(input: &[u8], decode: fn([u8; 2]) -> u16, row: usize, column: usize) -> usize {
    let units = input[UTF16_BOM_LEN..]
        .chunks_exact(2)
        .map(|pair| decode([pair[0], pair[1]]));

    let (mut current_row, mut current_column) = (0, 0);
    for (i, unit) in units.enumerate() {
        if (0xDC00..=0xDFFF).contains(&unit) {
            continue;
        }

        let is_newline = unit == u16::from(b'\n');
        if current_row == row && (current_column == column || is_newline) {
            return UTF16_BOM_LEN + 2 * i;
        }

        if is_newline {
            current_row += 1;
            current_column = 0;
        } else {
            current_column += 1;
        }
    }

    input.len()
}

/// Moves `offset` back to the opening `<` of the markup it falls inside, if any.
///
/// An offset is inside markup when the nearest `<` before it has not been
/// closed by a `>` yet.
pub(crate) fn anchor_to_markup(input: &[u8], offset: usize) -> usize {
    let offset = offset.min(input.len());
    let head = &input[..offset];

    match head.iter().rposition(|&b| b == b'<') {
        Some(open) if !head[open..].contains(&b'>') => align_to_code_unit(input, open),
        _ => offset,
    }
}

// in big-endian UTF-16 the ASCII byte is the second of its code unit
fn align_to_code_unit(input: &[u8], index: usize) -> usize {
    match input {
        [0xFF, 0xFE, ..] | [0xFE, 0xFF, ..] if index >= UTF16_BOM_LEN => {
            index - (index - UTF16_BOM_LEN) % 2
        }
        _ => index,
    }
}

#[test]
fn test_line() {
    let (rest, first) = line(b"<a>\n<b/>").unwrap();
    assert_eq!(first, b"<a>");
    assert_eq!(rest, b"<b/>");

    // a line without a newline is not complete
    assert!(line(b"<a>").is_err());
}

#[test]
fn test_byte_offset_first_line() {
    let input = b"<root><child></root>";
    assert_eq!(byte_offset(input, 0, 0), 0);
    assert_eq!(byte_offset(input, 0, 13), 13);
}

#[test]
fn test_byte_offset_later_lines() {
    let input = b"<root>\n  <child>\n</root>\n";
    assert_eq!(byte_offset(input, 1, 2), 9);
    assert_eq!(byte_offset(input, 2, 0), 17);
    // the empty line after the last newline
    assert_eq!(byte_offset(input, 3, 0), input.len());
}

#[test]
fn test_byte_offset_counts_characters() {
    // 'ä' is two bytes in UTF-8
    let input = "<ä>x</ä>".as_bytes();
    assert_eq!(byte_offset(input, 0, 2), 3);
    assert_eq!(byte_offset(input, 0, 3), 4);
}

#[test]
fn test_byte_offset_clamps() {
    let input = b"<a>\n<b>";
    // column past the end of the row stops at the row's end
    assert_eq!(byte_offset(input, 0, 100), 3);
    assert_eq!(byte_offset(input, 1, 100), input.len());
    // row past the end of the input
    assert_eq!(byte_offset(input, 5, 0), input.len());
    assert_eq!(byte_offset(b"", 0, 0), 0);
    assert_eq!(byte_offset(b"", 1, 0), 0);
}

#[test]
fn test_byte_offset_carriage_returns() {
    let input = b"<a>\r\n<b>\r\n</a>";
    assert_eq!(byte_offset(input, 1, 0), 5);
    assert_eq!(byte_offset(input, 2, 1), 11);
}

#[cfg(test)]
fn utf16(text: &str, big_endian: bool) -> Vec<u8> {
    let mut bytes = if big_endian { vec![0xFE, 0xFF] } else { vec![0xFF, 0xFE] };
    for unit in text.encode_utf16() {
        bytes.extend(if big_endian { unit.to_be_bytes() } else { unit.to_le_bytes() });
    }
    bytes
}

#[test]
fn test_byte_offset_utf16() {
    for big_endian in [false, true] {
        let input = utf16("<a></b>", big_endian);
        assert_eq!(byte_offset(&input, 0, 0), 2);
        // the '>' of "</b>"
        assert_eq!(byte_offset(&input, 0, 6), 14);
        // the '<' of "</b>", at the start of its code unit in either byte order
        assert_eq!(anchor_to_markup(&input, byte_offset(&input, 0, 6)), 8);

        let input = utf16("<a>\n<b>", big_endian);
        assert_eq!(byte_offset(&input, 1, 0), 10);
        // past the end of a row, past the last row
        assert_eq!(byte_offset(&input, 0, 100), 8);
        assert_eq!(byte_offset(&input, 5, 0), input.len());
    }
}

#[test]
fn test_byte_offset_utf16_surrogate_pairs() {
    // U+1D11E takes two UTF-16 units
    let input = utf16("\u{1D11E}x", false);
    assert_eq!(byte_offset(&input, 0, 1), 6);
}

#[test]
fn test_anchor_inside_closing_tag() {
    let input = b"<root><child></root>";
    // somewhere inside "</root>" before the '>'
    for offset in 13..=19 {
        assert_eq!(anchor_to_markup(input, offset), 13, "offset {}", offset);
    }
}

#[test]
fn test_anchor_outside_markup() {
    let input = b"<a>text &bogus;</a>";
    assert_eq!(anchor_to_markup(input, 8), 8);
    assert_eq!(anchor_to_markup(input, 3), 3);
    assert_eq!(anchor_to_markup(input, input.len()), input.len());
    assert_eq!(anchor_to_markup(input, 0), 0);
}

#[test]
fn test_anchor_clamps_to_input() {
    let input = b"<a/>";
    assert_eq!(anchor_to_markup(input, 100), input.len());
}
