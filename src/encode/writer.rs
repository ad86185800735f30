use crate::value::{Data, Pair, Value};

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Short escape forms for the C0 bytes that have one; 0 means `\u00XX`.
const SHORT_ESCAPES: [u8; 32] = {
    let mut table = [0u8; 32];
    table[0x08] = b'b';
    table[0x09] = b't';
    table[0x0A] = b'n';
    table[0x0C] = b'f';
    table[0x0D] = b'r';
    table
};

pub(super) struct Writer {
    out: Vec<u8>,
    pretty: bool,
}

impl Writer {
    pub fn new(pretty: bool) -> Self {
        Self {
            out: Vec::with_capacity(128),
            pretty,
        }
    }

    pub fn finish(self) -> String {
        // Everything pushed is either escaped ASCII or a str slice.
        debug_assert!(std::str::from_utf8(&self.out).is_ok());
        unsafe { String::from_utf8_unchecked(self.out) }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.out
    }

    pub fn write_value(&mut self, value: &Value, depth: usize) {
        match &value.data {
            Data::Null => self.out.extend_from_slice(b"null"),
            Data::Bool(true) => self.out.extend_from_slice(b"true"),
            Data::Bool(false) => self.out.extend_from_slice(b"false"),
            Data::Int(n) => {
                let mut buffer = itoa::Buffer::new();
                self.out.extend_from_slice(buffer.format(*n).as_bytes());
            }
            Data::Uint(n) => {
                let mut buffer = itoa::Buffer::new();
                self.out.extend_from_slice(buffer.format(*n).as_bytes());
            }
            Data::Float(n) => self.write_float(*n),
            Data::Str(s) => self.write_escaped(s.as_str()),
            Data::Array(a) => self.write_array(a.as_slice(), depth),
            Data::Object(o) => self.write_object(o.as_slice(), depth),
        }
    }

    fn write_array(&mut self, elems: &[Value], depth: usize) {
        if elems.is_empty() {
            self.out.extend_from_slice(b"[]");
            return;
        }
        self.out.push(b'[');
        for (idx, value) in elems.iter().enumerate() {
            if idx > 0 {
                self.out.push(b',');
            }
            self.break_line(depth + 1);
            self.write_value(value, depth + 1);
        }
        self.break_line(depth);
        self.out.push(b']');
    }

    fn write_object(&mut self, pairs: &[Pair], depth: usize) {
        if pairs.is_empty() {
            self.out.extend_from_slice(b"{}");
            return;
        }
        self.out.push(b'{');
        for (idx, pair) in pairs.iter().enumerate() {
            if idx > 0 {
                self.out.push(b',');
            }
            self.break_line(depth + 1);
            self.write_escaped(pair.key());
            self.out.push(b':');
            if self.pretty {
                self.out.push(b' ');
            }
            self.write_value(pair.value(), depth + 1);
        }
        self.break_line(depth);
        self.out.push(b'}');
    }

    fn break_line(&mut self, depth: usize) {
        if !self.pretty {
            return;
        }
        self.out.push(b'\n');
        for _ in 0..depth {
            self.out.extend_from_slice(b"  ");
        }
    }

    fn write_float(&mut self, n: f64) {
        if !n.is_finite() {
            self.out.extend_from_slice(b"null");
            return;
        }
        let mut buffer = ryu::Buffer::new();
        self.out
            .extend_from_slice(buffer.format_finite(n).as_bytes());
    }

    /// Escapes `"`, `\`, and the C0 range; everything else is emitted
    /// verbatim in runs.
    fn write_escaped(&mut self, s: &str) {
        let bytes = s.as_bytes();
        self.out.push(b'"');
        let mut start = 0;
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            if b == b'"' || b == b'\\' || b <= 0x1F {
                self.out.extend_from_slice(&bytes[start..i]);
                match b {
                    b'"' => self.out.extend_from_slice(b"\\\""),
                    b'\\' => self.out.extend_from_slice(b"\\\\"),
                    _ if SHORT_ESCAPES[b as usize] != 0 => {
                        self.out.push(b'\\');
                        self.out.push(SHORT_ESCAPES[b as usize]);
                    }
                    _ => {
                        self.out.extend_from_slice(b"\\u00");
                        self.out.push(HEX[(b >> 4) as usize]);
                        self.out.push(HEX[(b & 0xF) as usize]);
                    }
                }
                start = i + 1;
            }
            i += 1;
        }
        self.out.extend_from_slice(&bytes[start..]);
        self.out.push(b'"');
    }
}
