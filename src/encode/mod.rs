//! Serialization entry points.
//!
//! Two output shapes: compact (no whitespace between tokens) and pretty
//! (2-space indent, LF line breaks). Both are infallible over valid values;
//! only [`to_writer`] can fail, and only on the underlying writer.

mod writer;

use std::io;

use crate::value::Value;

use writer::Writer;

/// Compact serialization, the form behind [`Value::dump`].
pub fn to_string(value: &Value) -> String {
    let mut w = Writer::new(false);
    w.write_value(value, 0);
    w.finish()
}

/// Pretty serialization: 2-space indent, `": "` separators, LF breaks.
pub fn to_string_pretty(value: &Value) -> String {
    let mut w = Writer::new(true);
    w.write_value(value, 0);
    w.finish()
}

/// Streams the compact form into `out`.
pub fn to_writer<W: io::Write>(mut out: W, value: &Value) -> io::Result<()> {
    let mut w = Writer::new(false);
    w.write_value(value, 0);
    out.write_all(w.as_bytes())
}
