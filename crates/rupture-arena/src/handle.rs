//! Point handles.

use std::fmt;

/// Slot of a point within a [`PointArena`](crate::PointArena).
///
/// Slots are dense, assigned in insertion order starting at zero, and
/// never reused: an arena only grows during construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointHandle(pub(crate) u32);

impl PointHandle {
    /// The slot index.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Handle for slot `index`.
    ///
    /// The handle is only meaningful for an arena with more than `index`
    /// entries; lookups with an out-of-range handle return `None`.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

impl fmt::Display for PointHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}
