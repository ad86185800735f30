//! Arena-backed in-memory JSON parser and serializer.
//!
//! Parsing builds a typed [`Value`] tree whose strings and container
//! buffers live in a bump [`Arena`], released as a unit when the document
//! goes away. The scanner is a single pass with a finite-state number
//! recognizer and a two-pass string decoder; containers are assembled
//! iteratively, so arbitrarily deep nesting cannot overflow the call stack.
//!
//! # Examples
//!
//! Parse, inspect, extract:
//!
//! ```rust
//! let doc = arena_json::parse(br#"{"a":1,"b":[2,3]}"#)?;
//! let root = doc.root();
//! assert!(root.is_object());
//! assert_eq!(root["b"][1].get::<u64>(), Ok(3));
//! assert_eq!(root["a"].get::<f64>(), Ok(1.0));
//! # Ok::<(), arena_json::ParseError>(())
//! ```
//!
//! Parse into your own arena for the full mutation surface:
//!
//! ```rust
//! use arena_json::{parse_in, Arena, Value};
//!
//! let arena = Arena::new();
//! let mut root = parse_in(&arena, br#"{"name":"Ada"}"#)?;
//! root["age"] = Value::from(37u32);
//! root["tags"].push_back("pioneer");
//! assert_eq!(root.dump(), r#"{"name":"Ada","age":37,"tags":["pioneer"]}"#);
//! # Ok::<(), arena_json::ParseError>(())
//! ```
//!
//! Build values without any document:
//!
//! ```rust
//! use arena_json::Value;
//!
//! let v = Value::object_of([
//!     ("id", Value::from(7u64)),
//!     ("ok", Value::from(true)),
//! ]);
//! assert_eq!(v.dump(), r#"{"id":7,"ok":true}"#);
//! assert_eq!(format!("{v}"), "{\n  \"id\": 7,\n  \"ok\": true\n}");
//! ```
//!
//! Errors carry the byte offset where the scanner stopped:
//!
//! ```rust
//! use arena_json::ParseErrorKind;
//!
//! let err = arena_json::parse(b"[").unwrap_err();
//! assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfInput);
//! assert_eq!(err.offset, 1);
//! ```

pub mod arena;
pub mod decode;
pub mod encode;
pub mod error;
pub mod value;

mod document;

pub use arena::Arena;
pub use decode::{parse, parse_in, parse_str};
pub use document::Document;
pub use error::{InvalidType, ParseError, ParseErrorKind};
pub use value::{FromValue, Kind, Pair, Str, Value};

pub type Result<T> = std::result::Result<T, ParseError>;
