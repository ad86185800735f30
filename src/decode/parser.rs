//! Iterative structure builder.
//!
//! Containers never recurse: an explicit frame stack tracks the open
//! containers while parsed children collect in two scratch vectors (array
//! elements and object pairs). Frames record scratch offsets, so when a
//! closing bracket arrives the pending suffix is moved into an exact-size
//! arena buffer and the finished container is attached to its parent.

use smallvec::SmallVec;

use crate::arena::{AVec, Arena};
use crate::error::{ParseError, ParseErrorKind};
use crate::value::{Data, Pair, Storage, Str, Value};

use super::number::{self, Number};
use super::string;

/// Outcome of dispatching on one leading byte.
enum Token<'a> {
    Scalar(Value<'a>),
    ArrayOpen,
    ObjectOpen,
}

/// Where a finished container goes once its bracket closes.
enum Attach<'a> {
    Root,
    ArrayElem,
    ObjectMember(Str<'a>),
}

struct Frame<'a> {
    is_object: bool,
    /// Scratch length at open; everything past it belongs to this frame.
    start: usize,
    attach: Attach<'a>,
}

pub(crate) fn parse_document<'a>(
    arena: &'a Arena,
    input: &[u8],
) -> Result<Value<'a>, ParseError> {
    let mut p = Parser {
        arena,
        input,
        pos: 0,
    };

    let mut frames: SmallVec<[Frame<'a>; 16]> = SmallVec::new();
    let mut elems: Vec<Value<'a>> = Vec::new();
    let mut pairs: Vec<Pair<'a>> = Vec::new();

    p.skip_whitespace();
    match p.next_token()? {
        Token::Scalar(root) => {
            // A whole document may be a single scalar.
            p.expect_end()?;
            return Ok(root);
        }
        Token::ArrayOpen => frames.push(Frame {
            is_object: false,
            start: 0,
            attach: Attach::Root,
        }),
        Token::ObjectOpen => frames.push(Frame {
            is_object: true,
            start: 0,
            attach: Attach::Root,
        }),
    }

    while let Some(top) = frames.last() {
        let is_object = top.is_object;
        let start = top.start;

        let opened = if is_object {
            match p.next_member_key(pairs.len() > start)? {
                None => {
                    let closed = close_object(arena, &mut pairs, start);
                    match frames.pop().map(|f| f.attach) {
                        Some(Attach::ArrayElem) => elems.push(closed),
                        Some(Attach::ObjectMember(key)) => pairs.push(Pair {
                            key,
                            value: closed,
                        }),
                        _ => {
                            p.expect_end()?;
                            return Ok(closed);
                        }
                    }
                    continue;
                }
                Some(key) => {
                    p.skip_whitespace();
                    match p.next_token()? {
                        Token::Scalar(value) => {
                            pairs.push(Pair { key, value });
                            continue;
                        }
                        Token::ArrayOpen => Frame {
                            is_object: false,
                            start: elems.len(),
                            attach: Attach::ObjectMember(key),
                        },
                        Token::ObjectOpen => Frame {
                            is_object: true,
                            start: pairs.len(),
                            attach: Attach::ObjectMember(key),
                        },
                    }
                }
            }
        } else {
            if !p.next_element(elems.len() > start)? {
                let closed = close_array(arena, &mut elems, start);
                match frames.pop().map(|f| f.attach) {
                    Some(Attach::ArrayElem) => elems.push(closed),
                    Some(Attach::ObjectMember(key)) => pairs.push(Pair {
                        key,
                        value: closed,
                    }),
                    _ => {
                        p.expect_end()?;
                        return Ok(closed);
                    }
                }
                continue;
            }
            match p.next_token()? {
                Token::Scalar(value) => {
                    elems.push(value);
                    continue;
                }
                Token::ArrayOpen => Frame {
                    is_object: false,
                    start: elems.len(),
                    attach: Attach::ArrayElem,
                },
                Token::ObjectOpen => Frame {
                    is_object: true,
                    start: pairs.len(),
                    attach: Attach::ArrayElem,
                },
            }
        };
        frames.push(opened);
    }

    // The stack only empties by attaching the root above.
    Err(ParseError::new(ParseErrorKind::UnexpectedToken, p.pos))
}

fn close_array<'a>(arena: &'a Arena, elems: &mut Vec<Value<'a>>, start: usize) -> Value<'a> {
    let mut out = AVec::with_capacity_in(elems.len() - start, arena);
    for value in elems.drain(start..) {
        out.push(value);
    }
    Value::new_in(Data::Array(Storage::Arena(out)), arena)
}

fn close_object<'a>(arena: &'a Arena, pairs: &mut Vec<Pair<'a>>, start: usize) -> Value<'a> {
    let mut out = AVec::with_capacity_in(pairs.len() - start, arena);
    for pair in pairs.drain(start..) {
        out.push(pair);
    }
    Value::new_in(Data::Object(Storage::Arena(out)), arena)
}

struct Parser<'a, 'b> {
    arena: &'a Arena,
    input: &'b [u8],
    pos: usize,
}

impl<'a> Parser<'a, '_> {
    /// Only space, tab, CR, and LF are whitespace.
    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.input.get(self.pos) {
            self.pos += 1;
        }
    }

    fn expect_end(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.pos != self.input.len() {
            return Err(self.err(ParseErrorKind::TrailingGarbage));
        }
        Ok(())
    }

    fn err(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.pos)
    }

    /// Dispatches on the byte under the cursor. The cursor must already sit
    /// on a non-whitespace byte.
    fn next_token(&mut self) -> Result<Token<'a>, ParseError> {
        let Some(&b) = self.input.get(self.pos) else {
            return Err(self.err(ParseErrorKind::UnexpectedEndOfInput));
        };
        match b {
            b'{' => {
                self.pos += 1;
                Ok(Token::ObjectOpen)
            }
            b'[' => {
                self.pos += 1;
                Ok(Token::ArrayOpen)
            }
            b'"' => {
                let (text, end) = string::scan_string(self.arena, self.input, self.pos)?;
                self.pos = end;
                Ok(Token::Scalar(Value::new_in(
                    Data::Str(Str::Arena(text)),
                    self.arena,
                )))
            }
            b't' => self.keyword(b"true", Data::Bool(true)),
            b'f' => self.keyword(b"false", Data::Bool(false)),
            b'n' => self.keyword(b"null", Data::Null),
            b'-' | b'0'..=b'9' => {
                let (num, end) = number::scan_number(self.input, self.pos)?;
                self.pos = end;
                let data = match num {
                    Number::Int(n) => Data::Int(n),
                    Number::Uint(n) => Data::Uint(n),
                    Number::Float(n) => Data::Float(n),
                };
                Ok(Token::Scalar(Value::new_in(data, self.arena)))
            }
            _ => Err(self.err(ParseErrorKind::UnexpectedToken)),
        }
    }

    fn keyword(&mut self, word: &'static [u8], data: Data<'a>) -> Result<Token<'a>, ParseError> {
        let end = self.pos + word.len();
        if end > self.input.len() {
            self.pos = self.input.len();
            return Err(self.err(ParseErrorKind::UnexpectedEndOfInput));
        }
        if &self.input[self.pos..end] != word {
            return Err(self.err(ParseErrorKind::UnexpectedToken));
        }
        self.pos = end;
        Ok(Token::Scalar(Value::new_in(data, self.arena)))
    }

    /// Positions the cursor on the next array element, returning `false`
    /// when the array closes instead. `after_element` selects the comma
    /// rule: exactly one comma between elements, none before the first.
    fn next_element(&mut self, after_element: bool) -> Result<bool, ParseError> {
        self.skip_whitespace();
        match self.input.get(self.pos) {
            Some(b']') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b',') if after_element => {
                self.pos += 1;
                self.skip_whitespace();
                // A bracket here would be a trailing comma.
                if self.input.get(self.pos) == Some(&b']') {
                    return Err(self.err(ParseErrorKind::UnexpectedToken));
                }
                Ok(true)
            }
            _ if after_element => Err(self.err(ParseErrorKind::ExpectedComma)),
            _ => Ok(true),
        }
    }

    /// Scans up to the next member key, returning `None` when the object
    /// closes instead. The cursor ends just past the `:`.
    fn next_member_key(&mut self, after_member: bool) -> Result<Option<Str<'a>>, ParseError> {
        self.skip_whitespace();
        match self.input.get(self.pos) {
            Some(b'}') => {
                self.pos += 1;
                return Ok(None);
            }
            Some(b',') if after_member => {
                self.pos += 1;
                self.skip_whitespace();
            }
            _ if after_member => return Err(self.err(ParseErrorKind::ExpectedComma)),
            _ => {}
        }
        let key = match self.input.get(self.pos) {
            None => return Err(self.err(ParseErrorKind::UnexpectedEndOfInput)),
            Some(b'"') => {
                let (text, end) = string::scan_string(self.arena, self.input, self.pos)?;
                self.pos = end;
                Str::Arena(text)
            }
            Some(_) => return Err(self.err(ParseErrorKind::ExpectedKeyString)),
        };
        self.skip_whitespace();
        if self.input.get(self.pos) != Some(&b':') {
            return Err(self.err(ParseErrorKind::ExpectedColon));
        }
        self.pos += 1;
        Ok(Some(key))
    }
}
