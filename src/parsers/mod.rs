mod document;
mod position;

pub use document::{parse_document, ParseFlags};
use position::{anchor_to_markup, byte_offset};
