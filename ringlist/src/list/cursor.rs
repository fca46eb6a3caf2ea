use super::{
    slots::{Index, Node},
    List, SENTINEL,
};
use crate::error::InvalidArgument;
use core::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
};

/// The identity of a [`List`].
///
/// Every list is assigned a process-unique `SourceId` when it is created.
/// Cursors carry the id of the list they were obtained from, and the list
/// compares ids to reject cursors that belong to some other list. The id is
/// only ever used for that comparison; it does not keep the list alive.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(usize);

/// A handle naming a position in a [`List`].
///
/// A position is either one of the list's elements or the list's *end*, the
/// sentinel position just past the last element (and, since the list is a
/// ring, just before the first one). Cursors are plain `Copy` values that do
/// not borrow the list; they are resolved against a list by passing them to
/// its methods, such as [`List::get`], [`List::next`], [`List::insert_value`]
/// and [`List::erase`].
///
/// # Validity
///
/// A cursor stays valid across any insertion and across the removal of other
/// elements. Once the element it names is erased, the cursor is *stale*: the
/// list will refuse it with an [`InvalidArgument`] error, and [`List::get`]
/// returns `None` for it. The end cursor never goes stale, not even when the
/// list is [cleared](List::clear).
///
/// After [`List::swap`], cursors follow their elements: a cursor obtained
/// from `a` before `a.swap(&mut b)` names the same element, which now belongs
/// to `b`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    source: SourceId,
    index: Index,
    generation: u32,
}

/// A cursor over a [`List`] that borrows the list mutably.
///
/// Unlike a [`Cursor`], a `CursorMut` can read and modify the elements it
/// passes and change the *structure* of the list by inserting or removing
/// elements at its position. Moving past either end of the list puts the
/// cursor on the end position, from which moving once more wraps around to
/// the other end.
pub struct CursorMut<'list, T> {
    list: &'list mut List<T>,
    curr: Index,
    /// Position of `curr`; the end position is `list.len()`.
    index: usize,
}

// === impl SourceId ===

impl SourceId {
    pub(super) fn next() -> Self {
        static NEXT_ID: AtomicUsize = AtomicUsize::new(0);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceId({})", self.0)
    }
}

// === impl Cursor ===

impl Cursor {
    #[inline]
    pub(super) const fn new(source: SourceId, index: Index, generation: u32) -> Self {
        Self {
            source,
            index,
            generation,
        }
    }

    /// Returns the identity of the list this cursor was obtained from.
    #[inline]
    #[must_use]
    pub fn source(&self) -> SourceId {
        self.source
    }

    #[inline]
    pub(super) fn index(&self) -> Index {
        self.index
    }

    #[inline]
    pub(super) fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Cursor");
        dbg.field("source", &self.source);
        if self.index == SENTINEL {
            dbg.field("index", &format_args!("end"));
        } else {
            dbg.field("index", &self.index);
        }
        dbg.field("generation", &self.generation).finish()
    }
}

// === impl CursorMut ===

impl<T> List<T> {
    /// Returns a [`CursorMut`] positioned at the first element.
    ///
    /// If the list is empty, the cursor is positioned at the end.
    #[must_use]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            curr: self.begin,
            index: 0,
            list: self,
        }
    }

    /// Returns a [`CursorMut`] positioned at the last element.
    ///
    /// If the list is empty, the cursor is positioned at the end.
    #[must_use]
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T> {
        let curr = self.slots.node(SENTINEL).prev;
        CursorMut {
            curr,
            index: self.len.saturating_sub(1),
            list: self,
        }
    }

    /// Returns a [`CursorMut`] positioned at `position`.
    ///
    /// Computing the cursor's index walks the list from the front, so this
    /// takes *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// If `position` does not name a position in this list.
    pub fn cursor_mut_at(&mut self, position: Cursor) -> Result<CursorMut<'_, T>, InvalidArgument> {
        let curr = self.validate(position)?;
        let index = if curr == SENTINEL {
            self.len
        } else {
            self.span(self.begin, curr)?
        };
        Ok(CursorMut {
            list: self,
            curr,
            index,
        })
    }
}

impl<'list, T> CursorMut<'list, T> {
    /// Returns the index of the cursor's position in the [`List`].
    ///
    /// This returns `None` if the cursor is at the end position.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        (self.curr != SENTINEL).then_some(self.index)
    }

    /// Returns a [`Cursor`] naming the current position.
    #[must_use]
    pub fn position(&self) -> Cursor {
        self.list.cursor(self.curr)
    }

    /// Moves the cursor to the next position.
    ///
    /// From the last element this moves to the end position; from the end
    /// position it moves to the first element.
    pub fn move_next(&mut self) {
        self.curr = self.node().next;
        self.index = (self.index + 1) % (self.list.len + 1);
    }

    /// Moves the cursor to the previous position.
    ///
    /// From the first element this moves to the end position; from the end
    /// position it moves to the last element.
    pub fn move_prev(&mut self) {
        self.curr = self.node().prev;
        self.index = (self.index + self.list.len) % (self.list.len + 1);
    }

    /// Borrows the element at the cursor's position.
    ///
    /// This returns `None` at the end position.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.node().value.as_ref()
    }

    /// Mutably borrows the element at the cursor's position.
    ///
    /// This returns `None` at the end position.
    #[must_use]
    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.list.slots.node_mut(self.curr).value.as_mut()
    }

    /// Borrows the element after the cursor's position.
    ///
    /// At the end position this is the first element; at the last element
    /// this returns `None`.
    #[must_use]
    pub fn peek_next(&self) -> Option<&T> {
        let next = self.node().next;
        self.list.slots.node(next).value.as_ref()
    }

    /// Borrows the element before the cursor's position.
    ///
    /// At the end position this is the last element; at the first element
    /// this returns `None`.
    #[must_use]
    pub fn peek_prev(&self) -> Option<&T> {
        let prev = self.node().prev;
        self.list.slots.node(prev).value.as_ref()
    }

    /// Inserts `value` before the cursor's position.
    ///
    /// At the end position, this appends `value` to the back of the list.
    /// Returns a [`Cursor`] naming the new element.
    pub fn insert_before(&mut self, value: T) -> Cursor {
        let node = self.list.insert_nodes(self.curr, Some(value));
        self.index += 1;
        self.list.cursor(node)
    }

    /// Inserts `value` after the cursor's position.
    ///
    /// At the end position, this prepends `value` to the front of the list.
    /// Returns a [`Cursor`] naming the new element.
    pub fn insert_after(&mut self, value: T) -> Cursor {
        let next = self.node().next;
        let node = self.list.insert_nodes(next, Some(value));
        if self.curr == SENTINEL {
            // the end position's index has shifted.
            self.index = self.list.len;
        }
        self.list.cursor(node)
    }

    /// Removes the element at the cursor's position and returns it.
    ///
    /// The cursor moves to the position that followed the removed element.
    /// At the end position nothing is removed and this returns `None`.
    pub fn remove_current(&mut self) -> Option<T> {
        if self.curr == SENTINEL {
            return None;
        }

        let next = self.node().next;
        let mut removed = None;
        self.list.unlink_nodes(self.curr, next, 1, |value| removed = Some(value));
        self.curr = next;
        removed
    }

    /// Finds and removes the first element matching `predicate`, starting
    /// at the cursor's position.
    ///
    /// The cursor moves forward until an element matches, removes it, and
    /// is left on the position after the removed element. If the end of the
    /// list is reached first, nothing is removed and the cursor stays on the
    /// end position. Elements before the cursor's starting position are not
    /// considered.
    pub fn remove_first(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Option<T> {
        while !predicate(self.current()?) {
            self.move_next();
        }
        self.remove_current()
    }

    /// Returns the length of the [`List`] this cursor points into.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the [`List`] this cursor points into is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    fn node(&self) -> &Node<T> {
        self.list.slots.node(self.curr)
    }
}

impl<T: fmt::Debug> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("position", &self.position())
            .field("index", &self.index())
            .field("list", &self.list)
            .finish()
    }
}
