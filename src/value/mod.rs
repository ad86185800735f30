//! The in-memory JSON value tree.
//!
//! A [`Value`] is a tagged cell: one variant per JSON kind, with strings and
//! containers recording whether their payload lives in a parse [`Arena`] or
//! on the heap. Values built by hand own their storage and may outlive any
//! document; values produced by parsing borrow the document's arena and
//! carry a back-reference to it so that allocating mutations (key inserts,
//! container promotion) land in the same arena.

mod get;
mod iter;

pub use get::FromValue;
pub use iter::{Items, Iter, IterMut};

use std::fmt;
use std::ops::{Index, IndexMut};

use smol_str::SmolStr;

use crate::arena::{AVec, Arena};
use crate::error::InvalidType;

/// Runtime kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Uint,
    Float,
    String,
    Array,
    Object,
}

/// String payload: borrowed from an arena or owned on the heap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Str<'a> {
    Arena(&'a str),
    Owned(SmolStr),
}

impl<'a> Str<'a> {
    pub fn as_str(&self) -> &str {
        match self {
            Str::Arena(s) => s,
            Str::Owned(s) => s.as_str(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl fmt::Display for Str<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> std::ops::Deref for Str<'a> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Str<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl From<&str> for Str<'_> {
    fn from(s: &str) -> Self {
        Str::Owned(SmolStr::new(s))
    }
}

impl From<SmolStr> for Str<'_> {
    fn from(s: SmolStr) -> Self {
        Str::Owned(s)
    }
}

/// One object member.
#[derive(Debug, Clone)]
pub struct Pair<'a> {
    pub(crate) key: Str<'a>,
    pub(crate) value: Value<'a>,
}

impl<'a> Pair<'a> {
    pub fn new(key: impl Into<Str<'a>>, value: Value<'a>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn value(&self) -> &Value<'a> {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value<'a> {
        &mut self.value
    }
}

/// Container storage: an arena-backed buffer or a heap `Vec`.
#[derive(Debug, Clone)]
pub(crate) enum Storage<'a, T> {
    Arena(AVec<'a, T>),
    Owned(Vec<T>),
}

impl<'a, T> Storage<'a, T> {
    fn len(&self) -> usize {
        match self {
            Storage::Arena(v) => v.len(),
            Storage::Owned(v) => v.len(),
        }
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        match self {
            Storage::Arena(v) => v.as_slice(),
            Storage::Owned(v) => v.as_slice(),
        }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        match self {
            Storage::Arena(v) => v.as_mut_slice(),
            Storage::Owned(v) => v.as_mut_slice(),
        }
    }

    fn push(&mut self, item: T) {
        match self {
            Storage::Arena(v) => v.push(item),
            Storage::Owned(v) => v.push(item),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Data<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(Str<'a>),
    Array(Storage<'a, Value<'a>>),
    Object(Storage<'a, Pair<'a>>),
}

/// A JSON value.
///
/// See the [module docs](self) for the ownership model. Equality is
/// structural: `Int` and `Uint` compare by integer magnitude, floats compare
/// bit-for-bit (so `-0.0 != 0.0` and `NaN == NaN`), objects compare their
/// pairs in insertion order.
#[derive(Clone)]
pub struct Value<'a> {
    pub(crate) data: Data<'a>,
    pub(crate) arena: Option<&'a Arena>,
}

impl<'a> Value<'a> {
    /// The null value, tied to nothing.
    pub const fn null() -> Self {
        Value {
            data: Data::Null,
            arena: None,
        }
    }

    pub(crate) fn null_in(arena: &'a Arena) -> Self {
        Value {
            data: Data::Null,
            arena: Some(arena),
        }
    }

    pub(crate) fn new_in(data: Data<'a>, arena: &'a Arena) -> Self {
        Value {
            data,
            arena: Some(arena),
        }
    }

    /// A string value whose bytes are copied into `arena`.
    pub fn str_in(arena: &'a Arena, s: &str) -> Self {
        Value {
            data: Data::Str(Str::Arena(arena.alloc_str(s))),
            arena: Some(arena),
        }
    }

    /// Builds an array from a sequence of values (heap-owned storage).
    pub fn array_of(values: impl IntoIterator<Item = Value<'a>>) -> Self {
        Value {
            data: Data::Array(Storage::Owned(values.into_iter().collect())),
            arena: None,
        }
    }

    /// Builds an object from `(key, value)` pairs (heap-owned storage).
    pub fn object_of<K: Into<SmolStr>>(pairs: impl IntoIterator<Item = (K, Value<'a>)>) -> Self {
        let pairs = pairs
            .into_iter()
            .map(|(k, v)| Pair {
                key: Str::Owned(k.into()),
                value: v,
            })
            .collect();
        Value {
            data: Data::Object(Storage::Owned(pairs)),
            arena: None,
        }
    }

    /// Literal-construction convenience: builds an object when every element
    /// is a two-element array whose first element is a string, otherwise an
    /// array of the elements as given.
    pub fn from_elements(values: Vec<Value<'a>>) -> Self {
        let looks_like_object = !values.is_empty()
            && values.iter().all(|v| {
                v.as_array()
                    .is_some_and(|a| a.len() == 2 && a[0].is_string())
            });
        if !looks_like_object {
            return Value::array_of(values);
        }
        let pairs = values.into_iter().map(|mut v| {
            let slots = match &mut v.data {
                Data::Array(storage) => storage.as_mut_slice(),
                _ => unreachable!("checked above"),
            };
            let key = match std::mem::take(&mut slots[0]).data {
                Data::Str(s) => s,
                _ => unreachable!("checked above"),
            };
            let value = std::mem::take(&mut slots[1]);
            Pair { key, value }
        });
        Value {
            data: Data::Object(Storage::Owned(pairs.collect())),
            arena: None,
        }
    }

    pub fn kind(&self) -> Kind {
        match self.data {
            Data::Null => Kind::Null,
            Data::Bool(_) => Kind::Bool,
            Data::Int(_) => Kind::Int,
            Data::Uint(_) => Kind::Uint,
            Data::Float(_) => Kind::Float,
            Data::Str(_) => Kind::String,
            Data::Array(_) => Kind::Array,
            Data::Object(_) => Kind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.data, Data::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self.data, Data::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self.data, Data::Int(_) | Data::Uint(_) | Data::Float(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self.data, Data::Int(_))
    }

    pub fn is_uint(&self) -> bool {
        matches!(self.data, Data::Uint(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self.data, Data::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.data, Data::Str(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.data, Data::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self.data, Data::Object(_))
    }

    /// Element count for containers, byte length for strings, 0 otherwise.
    pub fn len(&self) -> usize {
        match &self.data {
            Data::Array(a) => a.len(),
            Data::Object(o) => o.len(),
            Data::Str(s) => s.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.data {
            Data::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            Data::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value<'a>]> {
        match &self.data {
            Data::Array(a) => Some(a.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[Pair<'a>]> {
        match &self.data {
            Data::Object(o) => Some(o.as_slice()),
            _ => None,
        }
    }

    /// Mutable element view. A null value is promoted to an empty array
    /// first; non-array, non-null values yield `None`.
    pub fn as_array_mut(&mut self) -> Option<&mut [Value<'a>]> {
        if self.is_null() {
            self.data = Data::Array(self.new_array_storage());
        }
        match &mut self.data {
            Data::Array(a) => Some(a.as_mut_slice()),
            _ => None,
        }
    }

    /// Mutable member view. A null value is promoted to an empty object
    /// first; non-object, non-null values yield `None`.
    pub fn as_object_mut(&mut self) -> Option<&mut [Pair<'a>]> {
        if self.is_null() {
            self.data = Data::Object(self.new_object_storage());
        }
        match &mut self.data {
            Data::Object(o) => Some(o.as_mut_slice()),
            _ => None,
        }
    }

    fn new_array_storage(&self) -> Storage<'a, Value<'a>> {
        match self.arena {
            Some(arena) => Storage::Arena(AVec::new_in(arena)),
            None => Storage::Owned(Vec::new()),
        }
    }

    fn new_object_storage(&self) -> Storage<'a, Pair<'a>> {
        match self.arena {
            Some(arena) => Storage::Arena(AVec::new_in(arena)),
            None => Storage::Owned(Vec::new()),
        }
    }

    /// Appends to an array. A null value is promoted to an empty array
    /// first.
    ///
    /// # Panics
    ///
    /// Panics if the value is neither null nor an array.
    pub fn push_back(&mut self, value: impl Into<Value<'a>>) {
        if self.is_null() {
            self.data = Data::Array(self.new_array_storage());
        }
        match &mut self.data {
            Data::Array(a) => a.push(value.into()),
            _ => panic!("push_back on a {:?} value", self.kind()),
        }
    }

    /// Looks up an object member by key (first match wins).
    pub fn get_member(&self, key: &str) -> Option<&Value<'a>> {
        self.as_object()?
            .iter()
            .find(|p| p.key.as_str() == key)
            .map(|p| &p.value)
    }

    pub fn get_member_mut(&mut self, key: &str) -> Option<&mut Value<'a>> {
        match &mut self.data {
            Data::Object(o) => o
                .as_mut_slice()
                .iter_mut()
                .find(|p| p.key.as_str() == key)
                .map(|p| &mut p.value),
            _ => None,
        }
    }

    /// Inserts or replaces an object member. A null value is promoted to an
    /// empty object first; the first pair matching `key` is replaced,
    /// otherwise `(key, value)` is appended in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the value is neither null nor an object.
    pub fn insert(&mut self, key: &str, value: impl Into<Value<'a>>) {
        *self.member_slot(key) = value.into();
    }

    /// Finds or creates the member slot for `key`; the workhorse behind
    /// `value[key] = …`. The key is copied into the arena when the object is
    /// arena-tied, onto the heap otherwise.
    fn member_slot(&mut self, key: &str) -> &mut Value<'a> {
        if self.is_null() {
            self.data = Data::Object(self.new_object_storage());
        }
        let child_arena = self.arena;
        let kind = self.kind();
        let storage = match &mut self.data {
            Data::Object(o) => o,
            _ => panic!("string-key index on a {:?} value", kind),
        };
        let pos = storage
            .as_slice()
            .iter()
            .position(|p| p.key.as_str() == key);
        let pos = match pos {
            Some(pos) => pos,
            None => {
                let key = match storage {
                    Storage::Arena(v) => Str::Arena(v.arena().alloc_str(key)),
                    Storage::Owned(_) => Str::Owned(SmolStr::new(key)),
                };
                storage.push(Pair {
                    key,
                    value: Value {
                        data: Data::Null,
                        arena: child_arena,
                    },
                });
                storage.len() - 1
            }
        };
        &mut storage.as_mut_slice()[pos].value
    }

    /// Moves the value out, leaving null behind.
    pub fn take(&mut self) -> Value<'a> {
        std::mem::take(self)
    }

    /// Typed extraction with the range rules of [`FromValue`].
    pub fn get<T: FromValue>(&self) -> Result<T, InvalidType> {
        T::from_value(self)
    }

    /// Compact serialization.
    pub fn dump(&self) -> String {
        crate::encode::to_string(self)
    }
}

impl Default for Value<'_> {
    fn default() -> Self {
        Value::null()
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.data.fmt(f)
    }
}

impl fmt::Display for Value<'_> {
    /// Pretty-prints with 2-space indentation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::encode::to_string_pretty(self))
    }
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.data, &other.data) {
            (Data::Null, Data::Null) => true,
            (Data::Bool(a), Data::Bool(b)) => a == b,
            (Data::Int(a), Data::Int(b)) => a == b,
            (Data::Uint(a), Data::Uint(b)) => a == b,
            (Data::Int(a), Data::Uint(b)) | (Data::Uint(b), Data::Int(a)) => {
                u64::try_from(*a).is_ok_and(|a| a == *b)
            }
            (Data::Float(a), Data::Float(b)) => a.to_bits() == b.to_bits(),
            (Data::Str(a), Data::Str(b)) => a.as_str() == b.as_str(),
            (Data::Array(a), Data::Array(b)) => a.as_slice() == b.as_slice(),
            (Data::Object(a), Data::Object(b)) => {
                a.len() == b.len()
                    && a.as_slice()
                        .iter()
                        .zip(b.as_slice())
                        .all(|(x, y)| x.key.as_str() == y.key.as_str() && x.value == y.value)
            }
            _ => false,
        }
    }
}

impl Index<usize> for Value<'_> {
    type Output = Self;

    fn index(&self, index: usize) -> &Self {
        match self.as_array() {
            Some(a) => &a[index],
            None => panic!("integer index on a {:?} value", self.kind()),
        }
    }
}

impl IndexMut<usize> for Value<'_> {
    /// Requires `index < len`; writing does not create padding elements.
    fn index_mut(&mut self, index: usize) -> &mut Self {
        let kind = self.kind();
        match &mut self.data {
            Data::Array(a) => &mut a.as_mut_slice()[index],
            _ => panic!("integer index on a {:?} value", kind),
        }
    }
}

impl Index<&str> for Value<'_> {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if the value is not an object or the key is absent; use
    /// [`Value::get_member`] for an `Option`-returning lookup.
    fn index(&self, key: &str) -> &Self {
        match self.get_member(key) {
            Some(v) => v,
            None => panic!("no member {key:?} in {:?} value", self.kind()),
        }
    }
}

impl<'a> IndexMut<&str> for Value<'a> {
    /// Promotes null to an empty object and inserts `(key, null)` for a
    /// missing key, per the object-index contract.
    fn index_mut(&mut self, key: &str) -> &mut Self {
        self.member_slot(key)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value {
            data: Data::Bool(b),
            arena: None,
        }
    }
}

macro_rules! value_from_int {
    ($($t:ty)*) => {$(
        impl From<$t> for Value<'_> {
            fn from(n: $t) -> Self {
                Value { data: Data::Int(n as i64), arena: None }
            }
        }
    )*};
}

macro_rules! value_from_uint {
    ($($t:ty)*) => {$(
        impl From<$t> for Value<'_> {
            fn from(n: $t) -> Self {
                Value { data: Data::Uint(n as u64), arena: None }
            }
        }
    )*};
}

value_from_int!(i8 i16 i32 i64);
value_from_uint!(u8 u16 u32 u64);

impl From<f64> for Value<'_> {
    fn from(n: f64) -> Self {
        Value {
            data: Data::Float(n),
            arena: None,
        }
    }
}

impl From<f32> for Value<'_> {
    fn from(n: f32) -> Self {
        Value {
            data: Data::Float(n as f64),
            arena: None,
        }
    }
}

impl From<&str> for Value<'_> {
    fn from(s: &str) -> Self {
        Value {
            data: Data::Str(Str::Owned(SmolStr::new(s))),
            arena: None,
        }
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value {
            data: Data::Str(Str::Owned(SmolStr::from(s))),
            arena: None,
        }
    }
}

impl From<SmolStr> for Value<'_> {
    fn from(s: SmolStr) -> Self {
        Value {
            data: Data::Str(Str::Owned(s)),
            arena: None,
        }
    }
}
