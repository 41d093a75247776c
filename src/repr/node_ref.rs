//! Complement-edge node references.
//!
//! A [`NodeRef`] is a 32-bit tagged pointer into the unique table: the high
//! bit is a complement flag, the remaining 31 bits are the table index.
//! Index 0 is the reserved terminal slot, so the two constants are
//! `FALSE = 0x0000_0000` and `TRUE = 0x8000_0000` (the complement of index
//! 0).

const COMPLEMENT_BIT: u32 = 0x8000_0000;
const INDEX_MASK: u32 = 0x7FFF_FFFF;

/// A canonical reference to a Boolean function: either a terminal constant
/// or a (possibly complemented) pointer into the unique table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(u32);

impl NodeRef {
    /// The constant function `false`.
    pub const FALSE: NodeRef = NodeRef(0);
    /// The constant function `true`, encoded as the complement of index 0.
    pub const TRUE: NodeRef = NodeRef(COMPLEMENT_BIT);

    #[inline]
    #[must_use]
    pub(crate) const fn from_raw(raw: u32) -> NodeRef {
        NodeRef(raw)
    }

    #[inline]
    #[must_use]
    pub(crate) const fn raw(self) -> u32 {
        self.0
    }

    /// Builds an uncomplemented reference to the node stored at `index`.
    #[inline]
    #[must_use]
    pub(crate) const fn of_index(index: u32) -> NodeRef {
        debug_assert!(index & COMPLEMENT_BIT == 0);
        NodeRef(index)
    }

    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == NodeRef::TRUE || self == NodeRef::FALSE
    }

    #[inline]
    #[must_use]
    pub fn is_complemented(self) -> bool {
        self.0 & COMPLEMENT_BIT != 0
    }

    #[inline]
    #[must_use]
    pub fn complement(self) -> NodeRef {
        NodeRef(self.0 ^ COMPLEMENT_BIT)
    }

    /// The index into the unique table this reference points at, ignoring
    /// the complement bit. Meaningless for terminals beyond the fact that it
    /// is always `0`.
    #[inline]
    #[must_use]
    pub(crate) fn index(self) -> u32 {
        self.0 & INDEX_MASK
    }
}

impl std::fmt::Display for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == NodeRef::TRUE {
            write!(f, "TRUE")
        } else if *self == NodeRef::FALSE {
            write!(f, "FALSE")
        } else if self.is_complemented() {
            write!(f, "!n{}", self.index())
        } else {
            write!(f, "n{}", self.index())
        }
    }
}
