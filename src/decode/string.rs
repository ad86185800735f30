//! Two-pass string scanner.
//!
//! Pass one locates the closing quote and validates UTF-8; strings without
//! escapes are copied into the arena in one shot. Pass two, entered only
//! when an escape was seen, decodes into an arena buffer sized to the raw
//! span (escapes only ever shrink the text).

use std::alloc::Layout;

use memchr::memchr2;

use crate::arena::Arena;
use crate::error::{ParseError, ParseErrorKind};

const REPLACEMENT: &[u8] = "\u{FFFD}".as_bytes();

/// Scans the string whose opening quote sits at `start`; returns the decoded
/// arena-resident text and the offset just past the closing quote.
pub(crate) fn scan_string<'a>(
    arena: &'a Arena,
    input: &[u8],
    start: usize,
) -> Result<(&'a str, usize), ParseError> {
    debug_assert_eq!(input[start], b'"');
    let content_start = start + 1;
    let mut i = content_start;
    let mut needs_decode = false;

    let close = loop {
        match memchr2(b'"', b'\\', &input[i..]) {
            None => {
                check_utf8(&input[i..], i)?;
                return Err(ParseError::new(
                    ParseErrorKind::UnterminatedString,
                    input.len(),
                ));
            }
            Some(off) => {
                check_utf8(&input[i..i + off], i)?;
                let at = i + off;
                if input[at] == b'"' {
                    break at;
                }
                // Backslash: the escaped byte is consumed unconditionally so
                // an escaped quote cannot end the string.
                needs_decode = true;
                if at + 1 >= input.len() {
                    return Err(ParseError::new(
                        ParseErrorKind::UnterminatedString,
                        input.len(),
                    ));
                }
                i = at + 2;
            }
        }
    };

    let span = &input[content_start..close];
    let text = if needs_decode {
        decode_escapes(arena, span, content_start)?
    } else {
        // Pass one validated every byte of the span.
        arena.alloc_str(unsafe { std::str::from_utf8_unchecked(span) })
    };
    Ok((text, close + 1))
}

fn check_utf8(chunk: &[u8], base: usize) -> Result<(), ParseError> {
    match std::str::from_utf8(chunk) {
        Ok(_) => Ok(()),
        Err(e) => Err(ParseError::new(
            ParseErrorKind::InvalidUtf8Codepoint,
            base + e.valid_up_to(),
        )),
    }
}

/// Decodes the escaped span into a fresh arena buffer. `base` is the span's
/// offset in the document, for error positions.
fn decode_escapes<'a>(
    arena: &'a Arena,
    span: &[u8],
    base: usize,
) -> Result<&'a str, ParseError> {
    // Upper bound: every escape shrinks (\uXXXX is six bytes in, at most
    // four out).
    let layout = Layout::from_size_align(span.len(), 1).expect("string buffer layout");
    let buf = unsafe { std::slice::from_raw_parts_mut(arena.alloc(layout).as_ptr(), span.len()) };
    let mut w = 0;
    let mut i = 0;

    while i < span.len() {
        let Some(off) = memchr::memchr(b'\\', &span[i..]) else {
            buf[w..w + span.len() - i].copy_from_slice(&span[i..]);
            w += span.len() - i;
            break;
        };
        buf[w..w + off].copy_from_slice(&span[i..i + off]);
        w += off;
        i += off;

        // Pass one guarantees a byte after every backslash.
        match span[i + 1] {
            b'"' | b'\\' | b'/' => {
                buf[w] = span[i + 1];
                w += 1;
                i += 2;
            }
            b'b' => {
                buf[w] = 0x08;
                w += 1;
                i += 2;
            }
            b'f' => {
                buf[w] = 0x0C;
                w += 1;
                i += 2;
            }
            b'n' => {
                buf[w] = b'\n';
                w += 1;
                i += 2;
            }
            b'r' => {
                buf[w] = b'\r';
                w += 1;
                i += 2;
            }
            b't' => {
                buf[w] = b'\t';
                w += 1;
                i += 2;
            }
            b'u' => {
                let unit = hex4(span, i + 2, base)?;
                i += 6;
                match unit {
                    0xD800..=0xDBFF => {
                        // High surrogate: pair it with an immediately
                        // following \u low surrogate, else recover with
                        // U+FFFD and rescan whatever follows.
                        if span[i..].starts_with(b"\\u") {
                            let low = hex4(span, i + 2, base)?;
                            if (0xDC00..=0xDFFF).contains(&low) {
                                let cp = 0x10000
                                    + ((unit - 0xD800) << 10)
                                    + (low - 0xDC00);
                                w += encode_utf8(cp, &mut buf[w..]);
                                i += 6;
                                continue;
                            }
                        }
                        buf[w..w + 3].copy_from_slice(REPLACEMENT);
                        w += 3;
                    }
                    0xDC00..=0xDFFF => {
                        // Lone low surrogate.
                        buf[w..w + 3].copy_from_slice(REPLACEMENT);
                        w += 3;
                    }
                    _ => w += encode_utf8(unit, &mut buf[w..]),
                }
            }
            _ => {
                return Err(ParseError::new(ParseErrorKind::InvalidEscape, base + i));
            }
        }
    }

    let text = &buf[..w];
    debug_assert!(std::str::from_utf8(text).is_ok());
    Ok(unsafe { std::str::from_utf8_unchecked(text) })
}

/// Parses four case-insensitive hex digits at `span[at..at + 4]`.
fn hex4(span: &[u8], at: usize, base: usize) -> Result<u32, ParseError> {
    if at + 4 > span.len() {
        return Err(ParseError::new(
            ParseErrorKind::InvalidUtf16CodeUnit,
            base + span.len(),
        ));
    }
    let mut unit = 0u32;
    for (k, &b) in span[at..at + 4].iter().enumerate() {
        let digit = match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'a'..=b'f' => u32::from(b - b'a') + 10,
            b'A'..=b'F' => u32::from(b - b'A') + 10,
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidUtf16CodeUnit,
                    base + at + k,
                ))
            }
        };
        unit = unit << 4 | digit;
    }
    Ok(unit)
}

/// Encodes a code point outside the surrogate range; returns bytes written.
fn encode_utf8(cp: u32, out: &mut [u8]) -> usize {
    if cp < 0x80 {
        out[0] = cp as u8;
        1
    } else if cp < 0x800 {
        out[0] = 0xC0 | (cp >> 6) as u8;
        out[1] = 0x80 | (cp & 0x3F) as u8;
        2
    } else if cp < 0x10000 {
        out[0] = 0xE0 | (cp >> 12) as u8;
        out[1] = 0x80 | (cp >> 6 & 0x3F) as u8;
        out[2] = 0x80 | (cp & 0x3F) as u8;
        3
    } else {
        out[0] = 0xF0 | (cp >> 18) as u8;
        out[1] = 0x80 | (cp >> 12 & 0x3F) as u8;
        out[2] = 0x80 | (cp >> 6 & 0x3F) as u8;
        out[3] = 0x80 | (cp & 0x3F) as u8;
        4
    }
}
