//! Errors returned by [`List`](crate::List) operations.
use core::fmt;

/// A [`Cursor`](crate::Cursor) passed to a [`List`](crate::List) operation
/// did not name a position in that list.
///
/// This is the only error a list operation can return. It is reported before
/// any link in the list is touched, so a failed operation never leaves the
/// list partially modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("parametric cursor is not this container's own ({reason})")]
pub struct InvalidArgument {
    reason: Reason,
}

/// Why a cursor was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Reason {
    /// The cursor was obtained from a different list.
    Foreign,
    /// The node the cursor pointed at has been erased.
    Stale,
    /// The end of an erase range is not reachable from its start without
    /// passing the end of the list.
    Unordered,
}

impl InvalidArgument {
    pub(crate) const fn new(reason: Reason) -> Self {
        Self { reason }
    }

    /// Returns why the cursor was rejected.
    #[must_use]
    pub fn reason(&self) -> Reason {
        self.reason
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Reason::Foreign => "cursor belongs to another list",
            Reason::Stale => "cursor points at an erased node",
            Reason::Unordered => "range end is not reachable from its start",
        })
    }
}
