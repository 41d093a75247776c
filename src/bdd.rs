//! The public handle type: a node reference paired with the manager that
//! owns it.

use std::collections::HashMap;

use crate::error::BddError;
use crate::manager::Manager;
use crate::repr::{NodeRef, VarId};
use crate::traversal;

/// A reference-counted-in-spirit (but actually `Copy`) handle to a Boolean
/// function, scoped to the [`Manager`] that built it. All operations return
/// fresh handles into the same manager; nothing is ever mutated in place.
#[derive(Debug, Clone, Copy)]
pub struct Bdd<'m> {
    node: NodeRef,
    manager: &'m Manager,
}

impl<'m> Bdd<'m> {
    /// Wraps an existing node reference. Not exposed publicly: callers reach
    /// a `Bdd` only through the constructors below, so that a `Bdd` never
    /// outlives the manager it was built from.
    fn wrap(manager: &'m Manager, node: NodeRef) -> Bdd<'m> {
        Bdd { manager, node }
    }

    /// The constant function `true` or `false`.
    #[must_use]
    pub fn constant(manager: &'m Manager, value: bool) -> Bdd<'m> {
        Bdd::wrap(manager, if value { NodeRef::TRUE } else { NodeRef::FALSE })
    }

    /// The function that is `true` exactly when `var` is `true`.
    pub fn variable(manager: &'m Manager, var: VarId) -> Result<Bdd<'m>, BddError> {
        let node = manager.make(var, NodeRef::TRUE, NodeRef::FALSE)?;
        Ok(Bdd::wrap(manager, node))
    }

    /// The function that is `true` exactly when `var` is `false`.
    pub fn negated_variable(manager: &'m Manager, var: VarId) -> Result<Bdd<'m>, BddError> {
        Ok(Bdd::variable(manager, var)?.not())
    }

    #[must_use]
    pub fn is_constant(self) -> bool {
        self.node == NodeRef::TRUE || self.node == NodeRef::FALSE
    }

    #[must_use]
    pub fn node_ref(self) -> NodeRef {
        self.node
    }

    fn ite(self, then: Bdd<'m>, otherwise: Bdd<'m>) -> Result<Bdd<'m>, BddError> {
        let node = self.manager.ite(self.node, then.node, otherwise.node)?;
        Ok(Bdd::wrap(self.manager, node))
    }

    #[must_use]
    pub fn not(self) -> Bdd<'m> {
        Bdd::wrap(self.manager, self.node.complement())
    }

    pub fn and(self, other: Bdd<'m>) -> Result<Bdd<'m>, BddError> {
        self.ite(other, Bdd::constant(self.manager, false))
    }

    pub fn or(self, other: Bdd<'m>) -> Result<Bdd<'m>, BddError> {
        self.ite(Bdd::constant(self.manager, true), other)
    }

    pub fn xor(self, other: Bdd<'m>) -> Result<Bdd<'m>, BddError> {
        self.ite(other.not(), other)
    }

    pub fn implies(self, other: Bdd<'m>) -> Result<Bdd<'m>, BddError> {
        self.ite(other, Bdd::constant(self.manager, true))
    }

    pub fn reverse_implies(self, other: Bdd<'m>) -> Result<Bdd<'m>, BddError> {
        self.ite(Bdd::constant(self.manager, true), other.not())
    }

    /// A satisfying partial assignment, or an empty map if this function is
    /// identically `false`.
    #[must_use]
    pub fn one_sat(self) -> HashMap<VarId, bool> {
        traversal::one_sat(self.manager, self.node)
    }

    /// The number of assignments to exactly `vars` that satisfy this
    /// function. Errors if the function's DAG mentions a variable outside
    /// `vars`.
    pub fn count_sat(self, vars: &std::collections::HashSet<VarId>) -> Result<f64, BddError> {
        traversal::count_sat(self.manager, self.node, vars)
    }

    /// As [`Bdd::count_sat`], but silently extends `vars` with this
    /// function's actual support instead of erroring.
    #[must_use]
    pub fn count_sat_or_support(self, vars: &std::collections::HashSet<VarId>) -> f64 {
        traversal::count_sat_or_support(self.manager, self.node, vars)
    }

    /// Writes a GraphViz representation of this function's DAG to `sink`.
    pub fn to_dot(self, title: &str, sink: &mut impl std::io::Write) -> std::io::Result<()> {
        crate::dot::write_dot(self.manager, self.node, title, sink)
    }
}

impl<'m> PartialEq for Bdd<'m> {
    /// Structural equality is a bitwise comparison of canonical references:
    /// two functions built through the same manager are equal iff they
    /// denote the same node, by the unique table's canonicity guarantee.
    fn eq(&self, other: &Bdd<'m>) -> bool {
        self.node == other.node
    }
}

impl<'m> Eq for Bdd<'m> {}
