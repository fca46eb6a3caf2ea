//! A doubly-linked list built as a ring around a sentinel node.
//!
//! See the [`List`] type for details.
use crate::{
    error::{InvalidArgument, Reason},
    repeat::Repeat,
};
use core::{fmt, hash, mem};

mod cursor;
mod iter;
mod slots;

pub use self::{
    cursor::{Cursor, CursorMut, SourceId},
    iter::{Cursors, IntoIter, Iter, IterMut, Range},
};
use self::slots::{Index, Node, Slots};


/// Slot of the sentinel node. The sentinel is the first node a list
/// allocates and is never removed.
const SENTINEL: Index = 0;

/// A doubly-linked list.
///
/// Elements are stored in individually linked nodes, arranged in a ring
/// together with a *sentinel* node that holds no value. The sentinel is the
/// list's end position: the node after it is the first element and the node
/// before it is the last, so an empty list is just the sentinel linked to
/// itself. The list caches its first node and its length, so [`begin`],
/// [`end`] and [`len`] are all *O*(1).
///
/// Positions in the list are named by [`Cursor`]s. A cursor is a small
/// `Copy` handle that does not borrow the list, so cursors can be kept while
/// the list is modified; see [`Cursor`] for when a cursor stays valid.
///
/// Every structural change goes through one of two operations:
/// [`insert_iter`], which links any number of new elements before a
/// position, and [`erase_range`], which unlinks a range of elements. The
/// other mutating methods are shorthands for one of the two.
///
/// [`begin`]: List::begin
/// [`end`]: List::end
/// [`len`]: List::len
/// [`insert_iter`]: List::insert_iter
/// [`erase_range`]: List::erase_range
///
/// # Examples
///
/// Using a `List` as a double-ended queue:
///
/// ```
/// use ringlist::List;
///
/// let mut list = List::new();
/// list.push_back(2);
/// list.push_back(3);
/// list.push_front(1);
///
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
/// assert_eq!(list.pop_front(), Some(1));
/// assert_eq!(list.pop_back(), Some(3));
/// assert_eq!(list.len(), 1);
/// ```
///
/// Inserting and erasing at cursors:
///
/// ```
/// use ringlist::List;
///
/// let mut list = List::from_iter([1, 2, 3]);
///
/// // erase the second element
/// let second = list.next(list.begin())?;
/// let after = list.erase(second)?;
/// assert_eq!(list.get(after), Some(&3));
///
/// // insert two copies of `0` in its place
/// let first = list.insert_repeated(after, 2, 0)?;
/// assert_eq!(list.get(first), Some(&0));
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 0, 0, 3]);
///
/// // cursors from other lists are rejected
/// let other = List::<i32>::new();
/// assert!(list.insert_value(other.end(), 4).is_err());
/// # Ok::<(), ringlist::InvalidArgument>(())
/// ```
pub struct List<T> {
    source: SourceId,
    slots: Slots<T>,
    /// First node, or `SENTINEL` when the list is empty.
    begin: Index,
    len: usize,
}

// ==== impl List ====

impl<T> List<T> {
    /// Returns a new empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::from_slots(Slots::new())
    }

    /// Returns a new empty list with room for at least `capacity` elements
    /// before it needs to grow its node storage.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_slots(Slots::with_capacity(capacity.saturating_add(1)))
    }

    fn from_slots(mut slots: Slots<T>) -> Self {
        let sentinel = slots.insert(Node::unlinked(None));
        debug_assert_eq!(sentinel, SENTINEL);
        Self {
            source: SourceId::next(),
            slots,
            begin: SENTINEL,
            len: 0,
        }
    }

    /// Returns the identity of this list.
    ///
    /// Every [`Cursor`] obtained from this list reports the same
    /// [`Cursor::source`].
    #[inline]
    #[must_use]
    pub fn source(&self) -> SourceId {
        self.source
    }

    /// Returns the number of elements in the list.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        if self.len == 0 {
            debug_assert_eq!(
                self.begin, SENTINEL,
                "inconsistent state: an empty list's first node is not the sentinel"
            );
            return true;
        }

        false
    }

    /// Returns the number of elements the list can hold without growing its
    /// node storage.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.capacity().saturating_sub(1)
    }

    /// Reserves node storage for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    /// Returns a cursor naming the first element, or [`end`](List::end) if
    /// the list is empty.
    #[inline]
    #[must_use]
    pub fn begin(&self) -> Cursor {
        self.cursor(self.begin)
    }

    /// Returns a cursor naming the end position, just past the last element.
    ///
    /// The end cursor of a list never changes.
    #[inline]
    #[must_use]
    pub fn end(&self) -> Cursor {
        self.cursor(SENTINEL)
    }

    /// Removes and drops every element.
    ///
    /// Afterwards `begin() == end()` and `len() == 0`. Cursors to the removed
    /// elements go stale; the end cursor stays valid.
    pub fn clear(&mut self) {
        self.unlink_nodes(self.begin, SENTINEL, self.len, drop);
        debug_assert_eq!(self.slots.occupied(), 1);
        debug_assert_eq!(self.begin, SENTINEL);
    }

    // === navigation ===

    /// Returns `true` if `cursor` names a position in this list.
    #[must_use]
    pub fn contains_cursor(&self, cursor: Cursor) -> bool {
        cursor.source() == self.source && self.slots.is_live(cursor.index(), cursor.generation())
    }

    /// Returns the position after `cursor`.
    ///
    /// The position after the last element is [`end`](List::end), and the
    /// position after `end` is the first element.
    ///
    /// # Errors
    ///
    /// If `cursor` does not name a position in this list.
    pub fn next(&self, cursor: Cursor) -> Result<Cursor, InvalidArgument> {
        let index = self.validate(cursor)?;
        Ok(self.cursor(self.slots.node(index).next))
    }

    /// Returns the position before `cursor`.
    ///
    /// The position before the first element is [`end`](List::end), and the
    /// position before `end` is the last element.
    ///
    /// # Errors
    ///
    /// If `cursor` does not name a position in this list.
    pub fn prev(&self, cursor: Cursor) -> Result<Cursor, InvalidArgument> {
        let index = self.validate(cursor)?;
        Ok(self.cursor(self.slots.node(index).prev))
    }

    /// Returns the position `n` steps away from `cursor`: forward if `n` is
    /// positive, backward if it is negative.
    ///
    /// Steps follow the ring, so the end position counts as a step.
    ///
    /// # Errors
    ///
    /// If `cursor` does not name a position in this list.
    pub fn advance(&self, cursor: Cursor, n: isize) -> Result<Cursor, InvalidArgument> {
        let mut index = self.validate(cursor)?;
        let steps = n.unsigned_abs() % (self.len + 1);
        for _ in 0..steps {
            let node = self.slots.node(index);
            index = if n < 0 { node.prev } else { node.next };
        }
        Ok(self.cursor(index))
    }

    /// Returns the number of elements in `[first, last)`.
    ///
    /// # Errors
    ///
    /// If either cursor does not name a position in this list, or if
    /// `last` cannot be reached from `first` without passing the end of the
    /// list.
    pub fn distance(&self, first: Cursor, last: Cursor) -> Result<usize, InvalidArgument> {
        let first = self.validate(first)?;
        let last = self.validate(last)?;
        self.span(first, last)
    }

    // === element access ===

    /// Borrows the element at `cursor`.
    ///
    /// Returns `None` for the end position and for cursors that do not name
    /// a position in this list.
    #[must_use]
    pub fn get(&self, cursor: Cursor) -> Option<&T> {
        let index = self.validate(cursor).ok()?;
        self.slots.node(index).value.as_ref()
    }

    /// Mutably borrows the element at `cursor`.
    ///
    /// Returns `None` for the end position and for cursors that do not name
    /// a position in this list.
    #[must_use]
    pub fn get_mut(&mut self, cursor: Cursor) -> Option<&mut T> {
        let index = self.validate(cursor).ok()?;
        self.slots.node_mut(index).value.as_mut()
    }

    /// Borrows the first element, if there is one.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.slots.node(self.begin).value.as_ref()
    }

    /// Mutably borrows the first element, if there is one.
    #[must_use]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.slots.node_mut(self.begin).value.as_mut()
    }

    /// Borrows the last element, if there is one.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        let last = self.slots.node(SENTINEL).prev;
        self.slots.node(last).value.as_ref()
    }

    /// Mutably borrows the last element, if there is one.
    #[must_use]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.slots.node(SENTINEL).prev;
        self.slots.node_mut(last).value.as_mut()
    }

    // === insertion ===

    /// Inserts every value produced by `values` before `position`, in
    /// order.
    ///
    /// Returns a cursor naming the first inserted element, or `position`
    /// itself if `values` was empty. Inserting at [`begin`](List::begin)
    /// prepends; inserting at [`end`](List::end) appends.
    ///
    /// # Errors
    ///
    /// If `position` does not name a position in this list. The list is not
    /// modified.
    pub fn insert_iter<I>(&mut self, position: Cursor, values: I) -> Result<Cursor, InvalidArgument>
    where
        I: IntoIterator<Item = T>,
    {
        let position = self.validate(position)?;
        let first = self.insert_nodes(position, values);
        Ok(self.cursor(first))
    }

    /// Inserts `value` before `position`.
    ///
    /// Returns a cursor naming the new element.
    ///
    /// # Errors
    ///
    /// If `position` does not name a position in this list. The list is not
    /// modified.
    pub fn insert_value(&mut self, position: Cursor, value: T) -> Result<Cursor, InvalidArgument> {
        self.insert_iter(position, Some(value))
    }

    /// Inserts `count` copies of `value` before `position`.
    ///
    /// Returns a cursor naming the first inserted element, or `position` if
    /// `count` is zero.
    ///
    /// # Errors
    ///
    /// If `position` does not name a position in this list. The list is not
    /// modified.
    pub fn insert_repeated(
        &mut self,
        position: Cursor,
        count: usize,
        value: T,
    ) -> Result<Cursor, InvalidArgument>
    where
        T: Clone,
    {
        self.insert_iter(position, Repeat::new(value, count))
    }

    /// Inserts clones of the elements in `[first, last)` of `other` before
    /// `position`.
    ///
    /// Returns a cursor naming the first inserted element, or `position` if
    /// the range was empty.
    ///
    /// # Errors
    ///
    /// If `position` does not name a position in this list, if `first` and
    /// `last` do not name positions in `other`, or if `last` cannot be
    /// reached from `first` without passing the end of `other`. Neither list
    /// is modified.
    pub fn insert_range(
        &mut self,
        position: Cursor,
        other: &List<T>,
        first: Cursor,
        last: Cursor,
    ) -> Result<Cursor, InvalidArgument>
    where
        T: Clone,
    {
        let values = other.range(first, last)?;
        self.insert_iter(position, values.cloned())
    }

    /// Appends `value` to the back of the list.
    pub fn push_back(&mut self, value: T) {
        self.insert_nodes(SENTINEL, Some(value));
    }

    /// Prepends `value` to the front of the list.
    pub fn push_front(&mut self, value: T) {
        self.insert_nodes(self.begin, Some(value));
    }

    /// Appends every value produced by `values` to the back of the list and
    /// returns the new length.
    pub fn push<I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        self.insert_nodes(SENTINEL, values);
        self.len
    }

    // === removal ===

    /// Removes the element at `position` and returns a cursor naming the
    /// position that followed it.
    ///
    /// Erasing [`end`](List::end) removes nothing and returns `end`.
    ///
    /// # Errors
    ///
    /// If `position` does not name a position in this list. The list is not
    /// modified.
    pub fn erase(&mut self, position: Cursor) -> Result<Cursor, InvalidArgument> {
        let first = self.validate(position)?;
        if first == SENTINEL {
            return Ok(position);
        }
        let last = self.slots.node(first).next;
        self.unlink_nodes(first, last, 1, drop);
        Ok(self.cursor(last))
    }

    /// Removes the elements in `[first, last)` and returns `last`.
    ///
    /// Erasing `[begin(), end())` empties the list.
    ///
    /// # Errors
    ///
    /// If either cursor does not name a position in this list, or if
    /// `last` cannot be reached from `first` without passing the end of the
    /// list. The list is not modified.
    pub fn erase_range(&mut self, first: Cursor, last: Cursor) -> Result<Cursor, InvalidArgument> {
        let first = self.validate(first)?;
        let last_index = self.validate(last)?;
        self.erase_nodes(first, last_index, drop)?;
        Ok(last)
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    pub fn pop_front(&mut self) -> Option<T> {
        self.take(self.begin)
    }

    /// Removes the last element and returns it, or `None` if the list is
    /// empty.
    pub fn pop_back(&mut self) -> Option<T> {
        self.take(self.slots.node(SENTINEL).prev)
    }

    // === whole-list operations ===

    /// Replaces the contents of the list with the values produced by
    /// `values`.
    pub fn assign_iter<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.clear();
        self.insert_nodes(SENTINEL, values);
    }

    /// Replaces the contents of the list with `count` copies of `value`.
    pub fn assign_repeated(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        self.assign_iter(Repeat::new(value, count));
    }

    /// Resizes the list to `len` elements.
    ///
    /// If the list is longer than `len`, the trailing elements are removed.
    /// If it is shorter, `T::default()` values are appended.
    pub fn resize(&mut self, len: usize)
    where
        T: Default,
    {
        self.resize_with(len, T::default);
    }

    /// Resizes the list to `len` elements, appending values returned by `f`
    /// if it must grow.
    pub fn resize_with(&mut self, len: usize, f: impl FnMut() -> T) {
        if len > self.len {
            let expansion = len - self.len;
            self.insert_nodes(SENTINEL, core::iter::repeat_with(f).take(expansion));
        } else if len < self.len {
            let mut first = SENTINEL;
            for _ in len..self.len {
                first = self.slots.node(first).prev;
            }
            self.unlink_nodes(first, SENTINEL, self.len - len, drop);
        }
    }

    /// Exchanges the contents of this list with those of `other` in *O*(1)
    /// time.
    ///
    /// No element is moved or relinked: the two lists trade their
    /// sentinels, first nodes and lengths. Cursors obtained before the swap
    /// keep naming the same elements, which now belong to the other list.
    pub fn swap(&mut self, other: &mut List<T>) {
        mem::swap(&mut self.source, &mut other.source);
        mem::swap(&mut self.slots, &mut other.slots);
        mem::swap(&mut self.begin, &mut other.begin);
        mem::swap(&mut self.len, &mut other.len);
    }

    // === invariants ===

    /// Asserts as many of the list's invariants as possible.
    ///
    /// # Panics
    ///
    /// If the ring is not closed, if the cached first node or length
    /// disagree with the ring, or if the sentinel holds a value.
    #[track_caller]
    pub fn assert_valid(&self) {
        let sentinel = self.slots.node(SENTINEL);
        assert!(
            sentinel.value.is_none(),
            "the sentinel must not hold a value"
        );
        assert_eq!(
            self.begin, sentinel.next,
            "the first node must be the sentinel's next node"
        );
        assert_eq!(
            self.len == 0,
            self.begin == SENTINEL,
            "a list is empty if and only if its first node is the sentinel; len={}",
            self.len,
        );
        assert_eq!(
            self.slots.occupied(),
            self.len + 1,
            "every occupied slot must be a node of the ring"
        );

        let mut forward = 0;
        let mut curr = self.begin;
        while curr != SENTINEL {
            let node = self.slots.node(curr);
            assert!(node.value.is_some(), "node {curr} has no value");
            self.assert_closed(curr);
            forward += 1;
            assert!(
                forward <= self.len,
                "walking forward did not return to the sentinel"
            );
            curr = node.next;
        }
        self.assert_closed(SENTINEL);
        assert_eq!(forward, self.len, "forward walk length must equal len");

        let mut backward = 0;
        let mut curr = sentinel.prev;
        while curr != SENTINEL {
            backward += 1;
            assert!(
                backward <= self.len,
                "walking backward did not return to the sentinel"
            );
            curr = self.slots.node(curr).prev;
        }
        assert_eq!(backward, self.len, "backward walk length must equal len");
    }

    #[track_caller]
    fn assert_closed(&self, index: Index) {
        let node = self.slots.node(index);
        assert_eq!(
            self.slots.node(node.next).prev,
            index,
            "node's next must link back to it; node={index}: {node:?}"
        );
        assert_eq!(
            self.slots.node(node.prev).next,
            index,
            "node's prev must link back to it; node={index}: {node:?}"
        );
    }

    // === primitives ===

    /// Links every value produced by `values` in before `position`, and
    /// returns the first new node, or `position` if nothing was produced.
    ///
    /// `position` must be a live node of this list.
    fn insert_nodes<I>(&mut self, position: Index, values: I) -> Index
    where
        I: IntoIterator<Item = T>,
    {
        let mut prev = self.slots.node(position).prev;
        let mut first = position;
        let mut count = 0usize;

        for value in values {
            let node = self.slots.insert(Node {
                value: Some(value),
                prev,
                next: position,
            });
            // `values` may panic, so the ring is closed again after every
            // node.
            self.slots.node_mut(prev).next = node;
            self.slots.node_mut(position).prev = node;
            if count == 0 {
                first = node;
                if position == self.begin {
                    self.begin = node;
                }
            }
            self.len += 1;
            prev = node;
            count += 1;
        }

        tracing::trace!(position, first, count, len = self.len, "insert_nodes");
        first
    }

    /// Unlinks the nodes in `[first, last)`, passing each removed value to
    /// `sink` in order.
    ///
    /// Both indices must be live nodes of this list. Nothing is modified if
    /// `last` is not reachable from `first` without passing the sentinel.
    fn erase_nodes(
        &mut self,
        first: Index,
        last: Index,
        sink: impl FnMut(T),
    ) -> Result<usize, InvalidArgument> {
        let count = self.span(first, last)?;
        self.unlink_nodes(first, last, count, sink);
        Ok(count)
    }

    /// Unlinks the `count` nodes in `[first, last)`, passing each removed
    /// value to `sink` in order.
    ///
    /// `count` must be the number of nodes between `first` and `last`. The
    /// ring is closed and every slot in the range is vacated even if `sink`
    /// or a value's destructor panics.
    fn unlink_nodes(&mut self, first: Index, last: Index, count: usize, mut sink: impl FnMut(T)) {
        if count == 0 {
            return;
        }

        let prev = self.slots.node(first).prev;
        self.slots.node_mut(prev).next = last;
        self.slots.node_mut(last).prev = prev;
        if first == self.begin {
            self.begin = last;
        }
        self.len -= count;
        tracing::trace!(first, last, count, len = self.len, "unlink_nodes");

        let mut chain = Vacate {
            slots: &mut self.slots,
            next: first,
            remaining: count,
        };
        while let Some(node) = chain.next_node() {
            if let Some(value) = node.value {
                sink(value);
            }
        }
    }

    /// Counts the nodes in `[first, last)`.
    fn span(&self, first: Index, last: Index) -> Result<usize, InvalidArgument> {
        let mut count = 0;
        let mut curr = first;
        while curr != last {
            if curr == SENTINEL {
                tracing::debug!(first, last, "range end precedes its start");
                return Err(InvalidArgument::new(Reason::Unordered));
            }
            curr = self.slots.node(curr).next;
            count += 1;
        }
        Ok(count)
    }

    /// Removes the single node at `index` and returns its value, or `None`
    /// if `index` is the sentinel.
    fn take(&mut self, index: Index) -> Option<T> {
        if index == SENTINEL {
            return None;
        }
        let next = self.slots.node(index).next;
        let mut taken = None;
        self.unlink_nodes(index, next, 1, |value| taken = Some(value));
        taken
    }

    /// Resolves `cursor` to a live node of this list.
    fn validate(&self, cursor: Cursor) -> Result<Index, InvalidArgument> {
        if cursor.source() != self.source {
            tracing::debug!(?cursor, list = ?self.source, "rejected cursor from another list");
            return Err(InvalidArgument::new(Reason::Foreign));
        }
        if !self.slots.is_live(cursor.index(), cursor.generation()) {
            tracing::debug!(?cursor, "rejected stale cursor");
            return Err(InvalidArgument::new(Reason::Stale));
        }
        Ok(cursor.index())
    }

    #[inline]
    fn cursor(&self, index: Index) -> Cursor {
        Cursor::new(self.source, index, self.slots.generation(index))
    }
}

/// Vacates the slots of a chain of nodes that has already been unlinked
/// from the ring.
///
/// Whatever is left of the chain when this is dropped is vacated too, so a
/// panic while handing out one node's value cannot leave the rest of the
/// chain occupied.
struct Vacate<'a, T> {
    slots: &'a mut Slots<T>,
    next: Index,
    remaining: usize,
}

// === impl Vacate ===

impl<T> Vacate<'_, T> {
    fn next_node(&mut self) -> Option<Node<T>> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.slots.remove(self.next);
        self.next = node.next;
        self.remaining -= 1;
        Some(node)
    }
}

impl<T> Drop for Vacate<'_, T> {
    fn drop(&mut self) {
        while self.next_node().is_some() {}
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        let mut list = List::with_capacity(self.len);
        list.push(self.iter().cloned());
        list
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: hash::Hash> hash::Hash for List<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for value in self.iter() {
            value.hash(state);
        }
    }
}
