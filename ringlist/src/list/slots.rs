//! Backing storage for the nodes of a [`List`](super::List).
//!
//! Nodes are kept in a table of slots addressed by `u32` indices, so links
//! between nodes are plain indices rather than pointers. Every slot carries a
//! generation that is bumped whenever its node is removed; a [`Cursor`]
//! records the generation it was created with, which lets the list tell a
//! live cursor from one whose node has since been erased, even if the slot
//! has been reused.
//!
//! [`Cursor`]: super::Cursor
use alloc::vec::Vec;
use core::{fmt, mem, ptr::NonNull};

/// Index of a slot in a [`Slots`] table.
pub(super) type Index = u32;

/// Marks the end of the free list.
const NONE: Index = Index::MAX;

/// A node in the ring.
///
/// The sentinel is the only node whose `value` is `None`.
pub(super) struct Node<T> {
    pub(super) value: Option<T>,
    pub(super) prev: Index,
    pub(super) next: Index,
}

pub(super) struct Slots<T> {
    slots: Vec<Slot<T>>,
    /// Head of the free list, or `NONE`.
    free: Index,
    /// Number of occupied slots.
    occupied: usize,
}

pub(super) struct Slot<T> {
    generation: u32,
    entry: Entry<T>,
}

enum Entry<T> {
    Occupied(Node<T>),
    Vacant { next_free: Index },
}

// === impl Node ===

impl<T> Node<T> {
    pub(super) const fn unlinked(value: Option<T>) -> Self {
        Self {
            value,
            prev: 0,
            next: 0,
        }
    }
}

impl<T> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("prev", &self.prev)
            .field("next", &self.next)
            .field("sentinel", &self.value.is_none())
            .finish()
    }
}

// === impl Slots ===

impl<T> Slots<T> {
    pub(super) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: NONE,
            occupied: 0,
        }
    }

    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: NONE,
            occupied: 0,
        }
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub(super) fn occupied(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub(super) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(super) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    /// Stores `node` in a free slot and returns that slot's index.
    ///
    /// # Panics
    ///
    /// If the table would need more than `u32::MAX - 1` slots.
    pub(super) fn insert(&mut self, node: Node<T>) -> Index {
        self.occupied += 1;
        if self.free != NONE {
            let index = self.free;
            let slot = &mut self.slots[index as usize];
            match mem::replace(&mut slot.entry, Entry::Occupied(node)) {
                Entry::Vacant { next_free } => self.free = next_free,
                Entry::Occupied(_) => unreachable!("free list points at occupied slot {index}"),
            }
            return index;
        }

        let index = self.slots.len();
        assert!(index < NONE as usize, "list node storage exhausted");
        self.slots.push(Slot {
            generation: 0,
            entry: Entry::Occupied(node),
        });
        index as Index
    }

    /// Vacates slot `index`, returning the node it held and bumping the
    /// slot's generation.
    ///
    /// A slot whose generation would overflow is retired rather than put
    /// back on the free list, so no generation is ever handed out twice.
    pub(super) fn remove(&mut self, index: Index) -> Node<T> {
        let slot = &mut self.slots[index as usize];
        let entry = mem::replace(
            &mut slot.entry,
            Entry::Vacant {
                next_free: self.free,
            },
        );
        match entry {
            Entry::Occupied(node) => {
                self.occupied -= 1;
                match slot.generation.checked_add(1) {
                    Some(generation) => {
                        slot.generation = generation;
                        self.free = index;
                    }
                    None => {
                        tracing::debug!(index, "retiring slot with exhausted generations");
                        slot.entry = Entry::Vacant { next_free: NONE };
                    }
                }
                node
            }
            Entry::Vacant { .. } => unreachable!("removed vacant slot {index}"),
        }
    }

    /// Returns the generation of slot `index`.
    #[inline]
    pub(super) fn generation(&self, index: Index) -> u32 {
        self.slots[index as usize].generation
    }

    /// Returns `true` if slot `index` holds a node and was last filled at
    /// `generation`.
    pub(super) fn is_live(&self, index: Index, generation: u32) -> bool {
        match self.slots.get(index as usize) {
            Some(Slot {
                generation: g,
                entry: Entry::Occupied(_),
            }) => *g == generation,
            _ => false,
        }
    }

    /// Returns the node in slot `index`.
    ///
    /// # Panics
    ///
    /// If the slot is vacant. Indices reached through links always name
    /// occupied slots.
    #[inline]
    #[track_caller]
    pub(super) fn node(&self, index: Index) -> &Node<T> {
        match &self.slots[index as usize].entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => unreachable!("linked slot {index} is vacant"),
        }
    }

    #[inline]
    #[track_caller]
    pub(super) fn node_mut(&mut self, index: Index) -> &mut Node<T> {
        match &mut self.slots[index as usize].entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => unreachable!("linked slot {index} is vacant"),
        }
    }

    /// Returns a pointer to the first slot, for iterators that hand out
    /// mutable references to several nodes at once.
    #[inline]
    pub(super) fn base_mut(&mut self) -> NonNull<Slot<T>> {
        // safety: `Vec::as_mut_ptr` never returns null, even when the vector
        // has not allocated.
        unsafe { NonNull::new_unchecked(self.slots.as_mut_ptr()) }
    }
}

/// Returns the node stored in the slot at `index` past `base`.
///
/// # Safety
///
/// - `base` must have been returned by [`Slots::base_mut`] on a table that
///   has not been mutated since, and `index` must name an occupied slot in it.
/// - No other reference to that slot may be live for `'a`.
#[inline]
pub(super) unsafe fn node_at<'a, T>(base: NonNull<Slot<T>>, index: Index) -> &'a mut Node<T> {
    match &mut (*base.as_ptr().add(index as usize)).entry {
        Entry::Occupied(node) => node,
        Entry::Vacant { .. } => unreachable!("linked slot {index} is vacant"),
    }
}

impl<T> fmt::Debug for Slots<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slots")
            .field("slots", &self.slots.len())
            .field("occupied", &self.occupied)
            .field("free", &self.free)
            .finish()
    }
}
