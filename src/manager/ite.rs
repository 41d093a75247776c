//! The `ITE` rewriter: terminal rules, standard-triple normalization, and
//! Shannon expansion with opportunistic parallel recursion.

use crate::error::BddError;
use crate::repr::NodeRef;

use super::manager::Manager;

impl Manager {
    /// `if a then b else c`, as a canonical node reference.
    pub(crate) fn ite(&self, a: NodeRef, b: NodeRef, c: NodeRef) -> Result<NodeRef, BddError> {
        // Terminal rules, checked before any cache lookup.
        if a == NodeRef::TRUE {
            return Ok(b);
        }
        if a == NodeRef::FALSE {
            return Ok(c);
        }
        if b == NodeRef::TRUE && c == NodeRef::FALSE {
            return Ok(a);
        }
        if b == NodeRef::FALSE && c == NodeRef::TRUE {
            return Ok(a.complement());
        }
        if b == c {
            return Ok(b);
        }

        if let Some(r) = self.cache().get(a, b, c) {
            return Ok(r);
        }

        let r = self.ite_uncached(a, b, c)?;
        self.cache().insert(a, b, c, r);
        Ok(r)
    }

    /// Applies standard-triple normalization, falling through to Shannon
    /// expansion once no rule's guard matches. Each branch recurses into
    /// [`Manager::ite`], not directly into this function, so cache lookups
    /// still happen for the normalized triple.
    fn ite_uncached(&self, a: NodeRef, b: NodeRef, c: NodeRef) -> Result<NodeRef, BddError> {
        let var_a = self.var_of(a);
        let var_b = self.var_of(b);
        let var_c = self.var_of(c);

        if a == b {
            return self.ite(a, NodeRef::TRUE, c);
        }
        if a == b.complement() {
            return self.ite(a, NodeRef::FALSE, c);
        }
        if a == c {
            return self.ite(a, b, NodeRef::FALSE);
        }
        if a == c.complement() {
            return self.ite(a, b, NodeRef::TRUE);
        }
        if b == NodeRef::TRUE && var_c < var_a {
            return self.ite(c, NodeRef::TRUE, a);
        }
        if b == NodeRef::FALSE && var_c < var_a {
            return self.ite(c.complement(), NodeRef::FALSE, a.complement());
        }
        if c == NodeRef::TRUE && var_b < var_a {
            return self.ite(b.complement(), a.complement(), NodeRef::TRUE);
        }
        if c == NodeRef::FALSE && var_b < var_a {
            return self.ite(b, a, NodeRef::FALSE);
        }
        if b == c.complement() && var_b < var_c {
            return self.ite(b, a, a.complement());
        }
        if a.is_complemented() {
            return self.ite(a.complement(), c, b);
        }
        if b.is_complemented() {
            return Ok(self.ite(a, b.complement(), c.complement())?.complement());
        }

        let x = var_a.min(var_b).min(var_c);

        let a0 = self.cofactor(a, x, false);
        let a1 = self.cofactor(a, x, true);
        let b0 = self.cofactor(b, x, false);
        let b1 = self.cofactor(b, x, true);
        let c0 = self.cofactor(c, x, false);
        let c1 = self.cofactor(c, x, true);

        let lo_weight = self.operand_weight(a0) + self.operand_weight(b0) + self.operand_weight(c0);
        let hi_weight = self.operand_weight(a1) + self.operand_weight(b1) + self.operand_weight(c1);
        let g = self.granularity();

        // Both sides large: fork both and join. Only one side large: fork
        // it alone and compute the other inline on this thread (the second
        // `rayon::join` closure is a no-op placeholder so the heavy side is
        // eligible for work-stealing while we keep making progress). Both
        // small: plain sequential recursion, avoiding join overhead.
        let (r0, r1) = if lo_weight > g && hi_weight > g {
            rayon::join(|| self.ite(a0, b0, c0), || self.ite(a1, b1, c1))
        } else if lo_weight > g {
            let (r0, ()) = rayon::join(|| self.ite(a0, b0, c0), || ());
            (r0, self.ite(a1, b1, c1))
        } else if hi_weight > g {
            let (r1, ()) = rayon::join(|| self.ite(a1, b1, c1), || ());
            (self.ite(a0, b0, c0), r1)
        } else {
            (self.ite(a0, b0, c0), self.ite(a1, b1, c1))
        };
        let r0 = r0?;
        let r1 = r1?;

        self.make(x, r1, r0)
    }

    fn operand_weight(&self, r: NodeRef) -> usize {
        self.size_of(r) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::VarId;

    fn fresh() -> Manager {
        Manager::with_capacities(4096, 4096).unwrap()
    }

    /// A measure over an `ITE` triple used only to check that normalization
    /// rules make progress: the sum of operand DAG sizes plus the number of
    /// complement bits set on `a`/`b`. Every rule either shrinks an operand
    /// (e.g. substituting `TRUE`/`FALSE` for a larger argument) or clears a
    /// complement bit, so the measure strictly decreases across a rewrite.
    fn measure(m: &Manager, a: NodeRef, b: NodeRef, c: NodeRef) -> u32 {
        m.size_of(a)
            + m.size_of(b)
            + m.size_of(c)
            + u32::from(a.is_complemented())
            + u32::from(b.is_complemented())
    }

    #[test]
    fn rule_a_equals_b_strictly_decreases_the_measure() {
        let m = fresh();
        let v1 = VarId::new(1);
        let v2 = VarId::new(2);
        let a = m.make(v1, NodeRef::TRUE, NodeRef::FALSE).unwrap();
        let c = m.make(v2, NodeRef::TRUE, NodeRef::FALSE).unwrap();
        // Triple (a, a, c) matches rule 1 ("A = B"), rewriting to (a, TRUE, c).
        let before = measure(&m, a, a, c);
        let after = measure(&m, a, NodeRef::TRUE, c);
        assert!(after < before);
    }

    #[test]
    fn rule_a_complemented_strictly_decreases_the_measure() {
        let m = fresh();
        let v1 = VarId::new(1);
        let v2 = VarId::new(2);
        let v3 = VarId::new(3);
        let a = m.make(v1, NodeRef::TRUE, NodeRef::FALSE).unwrap();
        let b = m.make(v2, NodeRef::TRUE, NodeRef::FALSE).unwrap();
        let c = m.make(v3, NodeRef::TRUE, NodeRef::FALSE).unwrap();
        let a_compl = a.complement();
        // Rule 10 ("A complemented") rewrites (!a, b, c) to (a, c, b),
        // clearing the complement bit on the first operand.
        let before = measure(&m, a_compl, b, c);
        let after = measure(&m, a, c, b);
        assert!(after < before);
    }

    #[test]
    fn ite_agrees_with_direct_construction_for_a_simple_conjunction() {
        let m = fresh();
        let v1 = VarId::new(1);
        let v2 = VarId::new(2);
        let a = m.make(v1, NodeRef::TRUE, NodeRef::FALSE).unwrap();
        let b = m.make(v2, NodeRef::TRUE, NodeRef::FALSE).unwrap();
        let and_ab = m.ite(a, b, NodeRef::FALSE).unwrap();
        let and_ba = m.ite(b, a, NodeRef::FALSE).unwrap();
        assert_eq!(and_ab, and_ba);
    }

    #[test]
    fn serial_and_parallel_granularity_produce_identical_results() {
        let serial = Manager::with_capacities_and_granularity(4096, 4096, usize::MAX).unwrap();
        let parallel = Manager::with_capacities_and_granularity(4096, 4096, 0).unwrap();
        let v1 = VarId::new(1);
        let v2 = VarId::new(2);
        let v3 = VarId::new(3);

        let build = |m: &Manager| -> NodeRef {
            let a = m.make(v1, NodeRef::TRUE, NodeRef::FALSE).unwrap();
            let b = m.make(v2, NodeRef::TRUE, NodeRef::FALSE).unwrap();
            let c = m.make(v3, NodeRef::TRUE, NodeRef::FALSE).unwrap();
            let ab = m.ite(a, b, NodeRef::FALSE).unwrap();
            m.ite(ab, NodeRef::TRUE, c).unwrap()
        };

        // The two managers have disjoint tables, so we can't compare
        // `NodeRef`s directly; instead check both report the same `var` at
        // the root, which is the externally observable invariant that
        // matters (canonical shape, not table placement).
        let r_serial = build(&serial);
        let r_parallel = build(&parallel);
        assert_eq!(serial.var_of(r_serial), parallel.var_of(r_parallel));
    }
}
