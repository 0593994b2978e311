//! Slot handles.

use std::fmt;

/// Number of slots in a pool.
pub type SlotCount = u32;

/// Integer handle to a slot inside a `SlotPool`.
///
/// Handles are indices, not addresses: they survive a buffer relocation
/// during `shrink_to_fit`, but every handle is logically dead after the
/// owning pool is cleared or destroyed. [`SlotId::NULL`] is the reserved
/// "no slot" value and is never issued by an allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct SlotId(u32);

impl SlotId {
    /// The handle that refers to no slot.
    pub const NULL: Self = Self(u32::MAX);

    /// Largest number of slots addressable without colliding with [`SlotId::NULL`].
    pub const MAX_SLOTS: SlotCount = u32::MAX;

    /// Handle for the slot at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is the reserved null value.
    pub fn new(index: SlotCount) -> Self {
        assert!(index != u32::MAX, "slot index {index} collides with SlotId::NULL");
        Self(index)
    }

    /// Whether this is the null handle.
    pub fn is_null(self) -> bool {
        self == Self::NULL
    }

    /// The slot index, or `None` for the null handle.
    pub fn index(self) -> Option<usize> {
        if self.is_null() {
            None
        } else {
            Some(self.0 as usize)
        }
    }

    /// Raw integer value, including the null sentinel.
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl Default for SlotId {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "null")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
