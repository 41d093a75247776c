//! The crate's error hierarchy.

use crate::repr::VarId;

/// Failures that can arise while building or querying a diagram.
///
/// All three are capacity or precondition failures rather than algorithmic
/// bugs: a correctly sized [`Manager`](crate::manager::Manager) for the
/// problem at hand should never hit them in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BddError {
    /// The unique table has no free slot left for a new node and no probe
    /// sequence found one either. The original implementation this crate is
    /// descended from silently returned a garbage index in this situation;
    /// here it is a reported error instead.
    #[error("unique table exhausted its {capacity} slots")]
    TableFull { capacity: usize },

    /// A variable named in a model-counting or witness query falls outside
    /// the variable set the caller supplied.
    #[error("variable {var} is not a member of the supplied variable set")]
    VariableNotInSet { var: VarId },

    /// The computed cache's backing storage could not be allocated at the
    /// requested capacity.
    #[error("computed cache exhausted its {capacity} slots")]
    CacheFull { capacity: usize },
}
