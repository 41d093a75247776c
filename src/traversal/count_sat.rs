//! Weighted model counting.

use std::collections::{HashMap, HashSet};

use crate::error::BddError;
use crate::manager::Manager;
use crate::repr::{NodeRef, VarId};

/// Counts the assignments to exactly `vars` under which `r` evaluates to
/// true. Errors if `r`'s DAG mentions a variable outside `vars` — a correct
/// caller passes a superset of the function's support, or calls
/// [`count_sat_or_support`] instead.
pub fn count_sat(manager: &Manager, r: NodeRef, vars: &HashSet<VarId>) -> Result<f64, BddError> {
    let pow2 = 2f64.powi(vars.len() as i32);
    let mut memo = HashMap::new();
    count(manager, r, pow2, vars, &mut memo)
}

/// As [`count_sat`], but treats any variable missing from `vars` as if the
/// caller had included it: counts over `vars ∪ support(r)`.
pub fn count_sat_or_support(manager: &Manager, r: NodeRef, vars: &HashSet<VarId>) -> f64 {
    let mut full = vars.clone();
    let mut visited = HashSet::new();
    collect_support(manager, r, &mut full, &mut visited);
    count_sat(manager, r, &full).expect("support-closed variable set always validates")
}

/// Walks the DAG once (tracking visited node indices, not variables, since
/// the same variable can legitimately recur in separate branches) to
/// collect every variable `r` depends on.
fn collect_support(
    manager: &Manager,
    r: NodeRef,
    out: &mut HashSet<VarId>,
    visited: &mut HashSet<u32>,
) {
    if r.is_terminal() || !visited.insert(r.index()) {
        return;
    }
    let node = manager.node_at(r);
    out.insert(node.var);
    collect_support(manager, node.hi, out, visited);
    collect_support(manager, node.lo, out, visited);
}

fn count(
    manager: &Manager,
    r: NodeRef,
    pow2: f64,
    vars: &HashSet<VarId>,
    memo: &mut HashMap<NodeRef, f64>,
) -> Result<f64, BddError> {
    if r == NodeRef::TRUE {
        return Ok(pow2);
    }
    if r == NodeRef::FALSE {
        return Ok(0.0);
    }
    if r.is_complemented() {
        let inner = count(manager, r.complement(), pow2, vars, memo)?;
        return Ok(pow2 - inner);
    }
    if let Some(&cached) = memo.get(&r) {
        return Ok(cached);
    }

    let node = manager.node_at(r);
    if !vars.contains(&node.var) {
        return Err(BddError::VariableNotInSet { var: node.var });
    }

    let hi = count(manager, node.hi, pow2, vars, memo)?;
    let lo = count(manager, node.lo, pow2, vars, memo)?;
    let total = (hi + lo) / 2.0;
    memo.insert(r, total);
    Ok(total)
}
