//! Declaration IDs for the translation-unit arena.

use std::fmt;

/// Index into a translation unit's top-level declaration list.
///
/// The target function's `DeclId` is the "function index" of the candidate
/// core: replacing the function means replacing the entry at this index,
/// never mutating through a parent pointer.
///
/// # Design
/// - Memory: 4 bytes
/// - Equality: O(1) integer compare
/// - Usable as a hash-map key for override slots
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct DeclId(u32);

impl DeclId {
    /// Invalid declaration ID (sentinel value).
    pub const INVALID: DeclId = DeclId(u32::MAX);

    /// Create a new `DeclId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        DeclId(index)
    }

    /// Get the index into the declaration list.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a valid ID.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "DeclId({})", self.0)
        } else {
            write!(f, "DeclId::INVALID")
        }
    }
}

impl Default for DeclId {
    fn default() -> Self {
        Self::INVALID
    }
}
