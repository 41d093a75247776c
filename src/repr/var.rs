//! Variable identifiers.

/// A variable identifier in the ordering. Smaller values sit higher in the
/// diagram (closer to the root).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(u32);

impl VarId {
    /// Sentinel used for the "variable" of a terminal reference: no real
    /// node has a variable this large, so it always sorts last in
    /// `min(var(a), var(b), var(c))` comparisons.
    pub const INFINITY: VarId = VarId(u32::MAX);

    #[inline]
    #[must_use]
    pub const fn new(v: u32) -> VarId {
        VarId(v)
    }

    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for VarId {
    #[inline]
    fn from(v: u32) -> VarId {
        VarId::new(v)
    }
}

impl std::fmt::Display for VarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
