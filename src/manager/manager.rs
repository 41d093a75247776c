//! Manager lifecycle: owns the unique table and computed cache, and sizes
//! them from available physical memory at first use.

use std::sync::OnceLock;

use crate::backing_store::UniqueTable;
use crate::error::BddError;
use crate::repr::{Node, NodeRef, VarId};

use super::cache::ComputedCache;

/// Default granularity `G` for the ITE engine's fork-join heuristic: a
/// recursive call is only worth spawning as a separate task once the
/// combined size of its operands exceeds this many nodes.
pub const DEFAULT_GRANULARITY: usize = 50_000;

/// Bytes reserved for the computed cache by default, independent of
/// available memory (the source's fixed 0.5 GiB budget).
const DEFAULT_CACHE_BYTES: usize = 512 * 1024 * 1024;

/// Bytes per unique-table / computed-cache slot, used only to translate a
/// memory budget into a slot count.
const UNIQUE_TABLE_SLOT_BYTES: usize = 24;
const COMPUTED_CACHE_SLOT_BYTES: usize = 24;

/// Physical memory left unallocated regardless of how much is available, so
/// the process doesn't starve the rest of the system.
const MEMORY_HEADROOM_BYTES: u64 = 512 * 1024 * 1024;

/// A cap on how much memory a single default-constructed manager will claim,
/// even on a machine with a very large amount of physical RAM.
const MAX_MANAGER_BYTES: u64 = 16 * 1024 * 1024 * 1024;

static GLOBAL: OnceLock<Manager> = OnceLock::new();

/// Owns the unique table and computed cache backing every [`Bdd`](crate::Bdd)
/// operation. Most callers never construct one directly: [`Manager::global`]
/// lazily builds a process-wide instance sized from available memory.
/// [`Manager::with_capacities`] exists for tests and embedders that want an
/// isolated, independently sized instance.
pub struct Manager {
    table: UniqueTable,
    cache: ComputedCache,
    granularity: usize,
}

impl Manager {
    /// Builds a manager with explicit table and cache sizes and the default
    /// granularity.
    pub fn with_capacities(
        table_capacity: usize,
        cache_capacity: usize,
    ) -> Result<Manager, BddError> {
        Manager::with_capacities_and_granularity(
            table_capacity,
            cache_capacity,
            DEFAULT_GRANULARITY,
        )
    }

    /// Builds a manager with explicit table and cache sizes and a custom
    /// fork-join granularity. Setting `granularity` to `usize::MAX`
    /// serializes the ITE engine entirely, which is useful for tests that
    /// want to compare parallel and sequential execution.
    pub fn with_capacities_and_granularity(
        table_capacity: usize,
        cache_capacity: usize,
        granularity: usize,
    ) -> Result<Manager, BddError> {
        Ok(Manager {
            table: UniqueTable::with_capacity(table_capacity),
            cache: ComputedCache::with_capacity(cache_capacity)?,
            granularity,
        })
    }

    /// The process-wide manager, built on first access. Sizing probes
    /// physical memory via `sysinfo`, reserves [`DEFAULT_CACHE_BYTES`] for
    /// the computed cache, and gives the remainder (up to
    /// [`MAX_MANAGER_BYTES`] total) to the unique table.
    pub fn global() -> &'static Manager {
        GLOBAL.get_or_init(Manager::build_default)
    }

    fn build_default() -> Manager {
        let mut system = sysinfo::System::new();
        system.refresh_memory();
        let available = system.available_memory();
        let budget = available
            .saturating_sub(MEMORY_HEADROOM_BYTES)
            .min(MAX_MANAGER_BYTES)
            .max((DEFAULT_CACHE_BYTES as u64) * 2);

        let cache_bytes = (DEFAULT_CACHE_BYTES as u64).min(budget / 2) as usize;
        let table_bytes = (budget as usize).saturating_sub(cache_bytes);

        let table_capacity = (table_bytes / UNIQUE_TABLE_SLOT_BYTES).max(1024);
        let cache_capacity = (cache_bytes / COMPUTED_CACHE_SLOT_BYTES).max(1024);

        tracing::info!(
            table_capacity,
            cache_capacity,
            available_memory_bytes = available,
            "sized global BDD manager"
        );

        Manager::with_capacities_and_granularity(table_capacity, cache_capacity, DEFAULT_GRANULARITY)
            .expect("default manager sizing never produces a zero-capacity cache")
    }

    pub(crate) fn granularity(&self) -> usize {
        self.granularity
    }

    pub(crate) fn cache(&self) -> &ComputedCache {
        &self.cache
    }

    /// The variable at the root of `r`, or [`VarId::INFINITY`] for a
    /// terminal. `VarId::INFINITY` sorts after every real variable, which is
    /// what lets the ITE engine's `min(var(a), var(b), var(c))` treat
    /// terminals as "no constraint" without a special case.
    pub(crate) fn var_of(&self, r: NodeRef) -> VarId {
        if r.is_terminal() {
            VarId::INFINITY
        } else {
            self.table.get(r.index()).var
        }
    }

    pub(crate) fn size_of(&self, r: NodeRef) -> u32 {
        if r.is_terminal() {
            0
        } else {
            self.table.get(r.index()).size
        }
    }

    /// The node `r` points at. Panics if `r` is a terminal; callers must
    /// branch on `r.is_terminal()` first.
    pub(crate) fn node_at(&self, r: NodeRef) -> Node {
        debug_assert!(!r.is_terminal(), "node_at called on a terminal reference");
        self.table.get(r.index())
    }

    /// Builds the canonical reference for a node with root variable `var`
    /// and children `hi`/`lo`, applying both reduction rules:
    /// - `hi == lo` collapses to that shared child (the variable is
    ///   irrelevant).
    /// - a complemented `lo` is normalized away by storing the node with
    ///   both children complemented and complementing the result, which
    ///   keeps the unique table's `lo` field always uncomplemented.
    pub(crate) fn make(&self, var: VarId, hi: NodeRef, lo: NodeRef) -> Result<NodeRef, BddError> {
        if hi == lo {
            return Ok(hi);
        }
        if lo.is_complemented() {
            let idx = self
                .table
                .lookup_or_create(Node::new(
                    var,
                    hi.complement(),
                    lo.complement(),
                    self.size_of(hi),
                    self.size_of(lo),
                ))?;
            Ok(NodeRef::of_index(idx).complement())
        } else {
            let idx = self.table.lookup_or_create(Node::new(
                var,
                hi,
                lo,
                self.size_of(hi),
                self.size_of(lo),
            ))?;
            Ok(NodeRef::of_index(idx))
        }
    }

    /// The function `r` with variable `x` fixed to `v`. Returns `r`
    /// unchanged when `x` is not in its support (terminal, or `var(r) > x`).
    pub(crate) fn cofactor(&self, r: NodeRef, x: VarId, v: bool) -> NodeRef {
        if r.is_terminal() {
            return r;
        }
        let node = self.table.get(r.index());
        if node.var > x {
            return r;
        }
        debug_assert_eq!(node.var, x, "cofactor invoked below the target variable");
        let child = if v { node.hi } else { node.lo };
        if r.is_complemented() {
            child.complement()
        } else {
            child
        }
    }
}
