//! Parse entry points.

mod number;
mod parser;
mod string;

use crate::arena::Arena;
use crate::document::Document;
use crate::error::ParseError;
use crate::value::Value;

/// Parses a UTF-8 byte buffer into an owning [`Document`].
pub fn parse(input: &[u8]) -> Result<Document, ParseError> {
    Document::parse(input)
}

/// Parses a string slice into an owning [`Document`].
pub fn parse_str(input: &str) -> Result<Document, ParseError> {
    Document::parse(input.as_bytes())
}

/// Parses into a caller-owned arena and returns the root value directly.
///
/// This is the full-surface form of [`parse`]: the returned value borrows
/// `arena` and every allocating mutation on it lands there.
pub fn parse_in<'a>(arena: &'a Arena, input: &[u8]) -> Result<Value<'a>, ParseError> {
    parser::parse_document(arena, input)
}
