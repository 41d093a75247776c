//! N-queens as a Boolean satisfiability count: one variable per board cell,
//! `row * n + col`, true iff a queen occupies that cell.

use std::collections::HashSet;

use crate::bdd::Bdd;
use crate::error::BddError;
use crate::manager::Manager;
use crate::repr::VarId;

fn cell(row: usize, col: usize, n: usize) -> VarId {
    VarId::new((row * n + col) as u32)
}

/// Builds the conjunction "exactly one queen per row, exactly one per
/// column, no two queens share a diagonal" and returns the number of
/// satisfying boards for an `n x n` board.
pub fn queens_count(n: usize) -> Result<f64, BddError> {
    if n == 0 {
        return Ok(1.0);
    }
    // A crude but serviceable size estimate: the constraint DAG grows with
    // the number of pairwise exclusions, which is quadratic in n^2 cells.
    let cells = n * n;
    let table_capacity = (cells * cells * 8).max(4096);
    let manager = Manager::with_capacities(table_capacity, table_capacity)?;

    let mut formula = Bdd::constant(&manager, true);

    for row in 0..n {
        formula = formula.and(one_queen_among(&manager, (0..n).map(|col| cell(row, col, n)))?)?;
    }
    for col in 0..n {
        formula = formula.and(one_queen_among(&manager, (0..n).map(|row| cell(row, col, n)))?)?;
    }
    formula = formula.and(no_diagonal_attacks(&manager, n)?)?;

    let vars: HashSet<VarId> = (0..cells as u32).map(VarId::new).collect();
    formula.count_sat(&vars)
}

/// "Exactly one of `vars` is true": at least one, and every pair mutually
/// exclusive.
fn one_queen_among(
    manager: &Manager,
    vars: impl Iterator<Item = VarId> + Clone,
) -> Result<Bdd<'_>, BddError> {
    let literals: Vec<Bdd> = vars
        .clone()
        .map(|v| Bdd::variable(manager, v))
        .collect::<Result<_, _>>()?;

    let mut at_least_one = Bdd::constant(manager, false);
    for &lit in &literals {
        at_least_one = at_least_one.or(lit)?;
    }

    let mut at_most_one = Bdd::constant(manager, true);
    for i in 0..literals.len() {
        for j in (i + 1)..literals.len() {
            let not_both = literals[i].and(literals[j])?.not();
            at_most_one = at_most_one.and(not_both)?;
        }
    }

    at_least_one.and(at_most_one)
}

fn no_diagonal_attacks(manager: &Manager, n: usize) -> Result<Bdd<'_>, BddError> {
    let mut constraint = Bdd::constant(manager, true);
    for r1 in 0..n {
        for c1 in 0..n {
            for r2 in (r1 + 1)..n {
                for c2 in 0..n {
                    let row_delta = r2 - r1;
                    let col_delta = c1.abs_diff(c2);
                    if row_delta == col_delta {
                        let a = Bdd::variable(manager, cell(r1, c1, n))?;
                        let b = Bdd::variable(manager, cell(r2, c2, n))?;
                        constraint = constraint.and(a.and(b)?.not())?;
                    }
                }
            }
        }
    }
    Ok(constraint)
}
