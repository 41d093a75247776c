//! Witness extraction: find one satisfying assignment, if any exists.

use std::collections::HashMap;

use crate::manager::Manager;
use crate::repr::{NodeRef, VarId};

/// Returns a partial assignment satisfying `r`, or an empty map if `r` is
/// identically `FALSE`.
///
/// Walks depth-first, always preferring the low branch, and tracks a
/// running parity bit seeded from the root's complement flag: a path
/// reaches a satisfying terminal iff the accumulated parity is clear when a
/// terminal is reached.
pub fn one_sat(manager: &Manager, r: NodeRef) -> HashMap<VarId, bool> {
    let mut assignment = HashMap::new();
    let parity = r.is_complemented();
    search(manager, r, parity, &mut assignment);
    assignment
}

fn search(manager: &Manager, r: NodeRef, parity: bool, out: &mut HashMap<VarId, bool>) -> bool {
    if r.is_terminal() {
        return !parity;
    }
    let node = manager.node_at(r);

    out.insert(node.var, false);
    if search(manager, node.lo, parity, out) {
        return true;
    }

    out.insert(node.var, true);
    let hi_parity = parity ^ node.hi.is_complemented();
    if search(manager, node.hi, hi_parity, out) {
        return true;
    }

    out.remove(&node.var);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::Manager;

    fn fresh() -> Manager {
        Manager::with_capacities(1024, 1024).unwrap()
    }

    #[test]
    fn false_has_no_witness() {
        let m = fresh();
        assert!(one_sat(&m, NodeRef::FALSE).is_empty());
    }

    #[test]
    fn true_has_the_empty_witness() {
        let m = fresh();
        assert!(one_sat(&m, NodeRef::TRUE).is_empty());
    }

    #[test]
    fn a_single_variable_witnesses_itself_true() {
        let m = fresh();
        let v = VarId::new(1);
        let f = m.make(v, NodeRef::TRUE, NodeRef::FALSE).unwrap();
        let witness = one_sat(&m, f);
        assert_eq!(witness.get(&v), Some(&true));
    }

    #[test]
    fn a_negated_variable_witnesses_itself_false() {
        let m = fresh();
        let v = VarId::new(1);
        let f = m.make(v, NodeRef::FALSE, NodeRef::TRUE).unwrap();
        let witness = one_sat(&m, f);
        assert_eq!(witness.get(&v), Some(&false));
    }
}
