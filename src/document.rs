//! Owning pair of arena and root value.

use std::fmt;

use crate::arena::Arena;
use crate::error::ParseError;
use crate::value::Value;

/// A parsed JSON document: the root [`Value`] together with the [`Arena`]
/// holding its strings and container buffers.
///
/// A document is moveable but not shareable or cloneable; dropping it
/// releases the arena and with it every allocation the tree points into.
/// For direct, lifetime-visible access to a parsed tree, parse into your
/// own arena with [`crate::parse_in`] instead.
pub struct Document {
    // Field order matters: the root must drop before the arena it borrows.
    root: Value<'static>,
    arena: Box<Arena>,
}

impl Document {
    /// Parses a UTF-8 byte buffer.
    pub fn parse(input: &[u8]) -> Result<Self, ParseError> {
        let arena = Box::new(Arena::new());
        // The box gives the arena a stable address for the lifetime of the
        // document, and `root` never outlives it (drop order above), so the
        // borrow may be detached from the local scope.
        let detached: &'static Arena = unsafe { &*(&*arena as *const Arena) };
        let root = crate::decode::parse_in(detached, input)?;
        Ok(Document { root, arena })
    }

    /// The root value. The returned borrow is tied to the document, not to
    /// the erased internal lifetime.
    pub fn root(&self) -> &Value<'_> {
        &self.root
    }

    /// Runs `f` with mutable access to the root.
    ///
    /// The closure is higher-ranked over the tree lifetime, which keeps
    /// borrows of shorter-lived foreign arenas out of the tree; heap-owned
    /// values and rearrangements of the tree itself are unrestricted.
    ///
    /// ```
    /// let mut doc = arena_json::parse(b"{\"count\":1}")?;
    /// doc.edit(|root| root["count"] = 2u64.into());
    /// assert_eq!(doc.dump(), r#"{"count":2}"#);
    /// # Ok::<(), arena_json::ParseError>(())
    /// ```
    pub fn edit<R>(&mut self, f: impl for<'x> FnOnce(&'x mut Value<'x>) -> R) -> R {
        fn shrink<'s>(root: &'s mut Value<'static>) -> &'s mut Value<'s> {
            // Covariant lifetime shrink; sound behind `&mut` because the
            // higher-ranked closure cannot store anything shorter-lived
            // than the tree into it.
            unsafe { std::mem::transmute(root) }
        }
        f(shrink(&mut self.root))
    }

    /// Compact serialization of the whole document.
    pub fn dump(&self) -> String {
        self.root.dump()
    }

    /// Bytes the parse allocated in the document's arena.
    pub fn arena_size(&self) -> usize {
        self.arena.allocated_bytes()
    }
}

impl fmt::Display for Document {
    /// Pretty-prints with 2-space indentation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt(f)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document").field("root", &self.root).finish()
    }
}

// A document owns its arena and tree exclusively; the pair moves between
// threads as a unit. Shared access stays confined to one thread because the
// document is not Sync.
unsafe impl Send for Document {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Document>();
    }

    #[test]
    fn root_survives_a_move() {
        let doc = Document::parse(br#"{"k":"value that is long enough to heap"}"#).unwrap();
        let moved = doc;
        assert_eq!(
            moved.root()["k"].as_str(),
            Some("value that is long enough to heap")
        );
    }

    #[test]
    fn edit_can_graft_owned_values() {
        let mut doc = Document::parse(b"[1,2]").unwrap();
        doc.edit(|root| {
            root.push_back(Value::from("tail"));
            root[0] = Value::from(10u64);
        });
        assert_eq!(doc.dump(), r#"[10,2,"tail"]"#);
    }
}
