use super::{
    slots::{self, Index, Slot, Slots},
    Cursor, List, SENTINEL,
};
use crate::error::InvalidArgument;
use core::{fmt, iter::FusedIterator, marker::PhantomData, ptr::NonNull};

/// Iterates over the elements of a [`List`] by reference.
///
/// Returned by [`List::iter`].
pub struct Iter<'list, T> {
    slots: &'list Slots<T>,
    front: Index,
    back: Index,
    remaining: usize,
}

/// Iterates over the elements of a [`List`] by mutable reference.
///
/// Returned by [`List::iter_mut`].
pub struct IterMut<'list, T> {
    base: NonNull<Slot<T>>,
    front: Index,
    back: Index,
    remaining: usize,
    _list: PhantomData<&'list mut List<T>>,
}

/// An owning iterator over the elements of a [`List`].
///
/// Returned by the [`IntoIterator`] implementation for [`List`].
pub struct IntoIter<T> {
    list: List<T>,
}

/// Iterates by reference over the elements in a range `[first, last)` of a
/// [`List`].
///
/// Returned by [`List::range`].
pub struct Range<'list, T> {
    slots: &'list Slots<T>,
    curr: Index,
    remaining: usize,
}

/// Iterates over [`Cursor`]s naming each element of a [`List`], front to
/// back.
///
/// Returned by [`List::cursors`].
pub struct Cursors<'list, T> {
    list: &'list List<T>,
    front: Index,
    back: Index,
    remaining: usize,
}

impl<T> List<T> {
    /// Returns an iterator over the elements, front to back.
    ///
    /// The iterator is double-ended: [`Iterator::rev`] walks the list back to
    /// front.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            front: self.begin,
            back: self.slots.node(SENTINEL).prev,
            remaining: self.len,
        }
    }

    /// Returns an iterator that allows modifying each element, front to
    /// back.
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let back = self.slots.node(SENTINEL).prev;
        IterMut {
            base: self.slots.base_mut(),
            front: self.begin,
            back,
            remaining: self.len,
            _list: PhantomData,
        }
    }

    /// Returns an iterator over the elements in `[first, last)`.
    ///
    /// # Errors
    ///
    /// If either cursor does not name a position in this list, or if `last`
    /// cannot be reached from `first` without passing the end of the list.
    pub fn range(&self, first: Cursor, last: Cursor) -> Result<Range<'_, T>, InvalidArgument> {
        let curr = self.validate(first)?;
        let remaining = self.span(curr, self.validate(last)?)?;
        Ok(Range {
            slots: &self.slots,
            curr,
            remaining,
        })
    }

    /// Returns an iterator over cursors naming each element, front to back.
    ///
    /// The cursors stay valid after the iterator is dropped, so this can be
    /// used to collect positions to modify later.
    #[must_use]
    pub fn cursors(&self) -> Cursors<'_, T> {
        Cursors {
            list: self,
            front: self.begin,
            back: self.slots.node(SENTINEL).prev,
            remaining: self.len,
        }
    }
}

// === impl Iter ===

impl<'list, T> Iterator for Iter<'list, T> {
    type Item = &'list T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.slots.node(self.front);
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_ref()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.slots.node(self.back);
        self.back = node.prev;
        self.remaining -= 1;
        node.value.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

// === impl IterMut ===

impl<'list, T> Iterator for IterMut<'list, T> {
    type Item = &'list mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // safety: `base` was taken from a list that is mutably borrowed for
        // `'list`, so its slots cannot move or change. the front and back
        // ends never cross while `remaining` is nonzero, so every node is
        // handed out at most once.
        let node = unsafe { slots::node_at(self.base, self.front) };
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_mut()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // safety: see `IterMut::next`.
        let node = unsafe { slots::node_at(self.base, self.back) };
        self.back = node.prev;
        self.remaining -= 1;
        node.value.as_mut()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("remaining", &self.remaining)
            .finish()
    }
}

// safety: an `IterMut` is equivalent to a `&mut List<T>`.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

// === impl IntoIter ===

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

// === impl Range ===

impl<'list, T> Iterator for Range<'list, T> {
    type Item = &'list T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.slots.node(self.curr);
        self.curr = node.next;
        self.remaining -= 1;
        node.value.as_ref()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Range<'_, T> {}

impl<T> FusedIterator for Range<'_, T> {}

impl<T> fmt::Debug for Range<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Range")
            .field("curr", &self.curr)
            .field("remaining", &self.remaining)
            .finish()
    }
}

// === impl Cursors ===

impl<T> Iterator for Cursors<'_, T> {
    type Item = Cursor;

    fn next(&mut self) -> Option<Cursor> {
        if self.remaining == 0 {
            return None;
        }
        let cursor = self.list.cursor(self.front);
        self.front = self.list.slots.node(self.front).next;
        self.remaining -= 1;
        Some(cursor)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Cursors<'_, T> {
    fn next_back(&mut self) -> Option<Cursor> {
        if self.remaining == 0 {
            return None;
        }
        let cursor = self.list.cursor(self.back);
        self.back = self.list.slots.node(self.back).prev;
        self.remaining -= 1;
        Some(cursor)
    }
}

impl<T> ExactSizeIterator for Cursors<'_, T> {}

impl<T> FusedIterator for Cursors<'_, T> {}

impl<T> fmt::Debug for Cursors<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursors")
            .field("remaining", &self.remaining)
            .finish()
    }
}

// === trait impls for List ===

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'list, T> IntoIterator for &'list List<T> {
    type Item = &'list T;
    type IntoIter = Iter<'list, T>;

    fn into_iter(self) -> Iter<'list, T> {
        self.iter()
    }
}

impl<'list, T> IntoIterator for &'list mut List<T> {
    type Item = &'list mut T;
    type IntoIter = IterMut<'list, T>;

    fn into_iter(self) -> IterMut<'list, T> {
        self.iter_mut()
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.push(iter);
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.push(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut list = List::with_capacity(iter.size_hint().0);
        list.push(iter);
        list
    }
}
