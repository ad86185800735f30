//! Iteration over arrays and objects.
//!
//! [`Value::iter`] walks array elements, or the member values of an object;
//! [`Value::items`] walks `(key, value)` pairs of an object. Iterating any
//! other kind, null included, yields nothing.

use std::slice;

use super::{Data, Pair, Value};

enum Inner<'b, 'a> {
    Empty,
    Values(slice::Iter<'b, Value<'a>>),
    Pairs(slice::Iter<'b, Pair<'a>>),
}

/// Iterator over element or member values.
pub struct Iter<'b, 'a> {
    inner: Inner<'b, 'a>,
}

impl<'b, 'a> Iterator for Iter<'b, 'a> {
    type Item = &'b Value<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Empty => None,
            Inner::Values(it) => it.next(),
            Inner::Pairs(it) => it.next().map(|p| &p.value),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Inner::Empty => (0, Some(0)),
            Inner::Values(it) => it.size_hint(),
            Inner::Pairs(it) => it.size_hint(),
        }
    }
}

enum InnerMut<'b, 'a> {
    Empty,
    Values(slice::IterMut<'b, Value<'a>>),
    Pairs(slice::IterMut<'b, Pair<'a>>),
}

/// Mutable counterpart of [`Iter`].
pub struct IterMut<'b, 'a> {
    inner: InnerMut<'b, 'a>,
}

impl<'b, 'a> Iterator for IterMut<'b, 'a> {
    type Item = &'b mut Value<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            InnerMut::Empty => None,
            InnerMut::Values(it) => it.next(),
            InnerMut::Pairs(it) => it.next().map(|p| &mut p.value),
        }
    }
}

/// Iterator over `(key, value)` pairs of an object.
pub struct Items<'b, 'a> {
    inner: Option<slice::Iter<'b, Pair<'a>>>,
}

impl<'b, 'a> Iterator for Items<'b, 'a> {
    type Item = (&'b str, &'b Value<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .as_mut()?
            .next()
            .map(|p| (p.key.as_str(), &p.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Some(it) => it.size_hint(),
            None => (0, Some(0)),
        }
    }
}

impl<'a> Value<'a> {
    pub fn iter(&self) -> Iter<'_, 'a> {
        let inner = match &self.data {
            Data::Array(a) => Inner::Values(a.as_slice().iter()),
            Data::Object(o) => Inner::Pairs(o.as_slice().iter()),
            _ => Inner::Empty,
        };
        Iter { inner }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, 'a> {
        let inner = match &mut self.data {
            Data::Array(a) => InnerMut::Values(a.as_mut_slice().iter_mut()),
            Data::Object(o) => InnerMut::Pairs(o.as_mut_slice().iter_mut()),
            _ => InnerMut::Empty,
        };
        IterMut { inner }
    }

    pub fn items(&self) -> Items<'_, 'a> {
        Items {
            inner: match &self.data {
                Data::Object(o) => Some(o.as_slice().iter()),
                _ => None,
            },
        }
    }
}

impl<'b, 'a> IntoIterator for &'b Value<'a> {
    type Item = &'b Value<'a>;
    type IntoIter = Iter<'b, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
