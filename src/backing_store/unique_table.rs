//! The unique table: a concurrent, content-addressed store of canonical
//! nodes.
//!
//! Each slot is protected by its own spin lock (a single `AtomicBool`
//! test-and-set), mirroring a per-cache-line lock rather than one table-wide
//! mutex. Lock hold times are O(1) — a triple comparison and, on miss, a
//! field copy — so spinning is preferable to parking a thread.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::error::BddError;
use crate::repr::{Node, NodeRef, VarId};

use super::mixer::hash_bytes;

struct Slot {
    exists: AtomicBool,
    locked: AtomicBool,
    node: UnsafeCell<Node>,
}

// SAFETY: `node` is only read or written while `locked` is held (see
// `with_slot_locked`), so concurrent access is serialized per slot.
unsafe impl Sync for Slot {}

impl Slot {
    fn empty() -> Slot {
        Slot {
            exists: AtomicBool::new(false),
            locked: AtomicBool::new(false),
            node: UnsafeCell::new(Node {
                var: VarId::new(0),
                hi: NodeRef::FALSE,
                lo: NodeRef::FALSE,
                size: 0,
            }),
        }
    }

    /// Spins until the slot's lock is acquired, runs `f` with exclusive
    /// access to the slot's fields, then releases the lock.
    fn with_locked<R>(&self, f: impl FnOnce(&AtomicBool, &UnsafeCell<Node>) -> R) -> R {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            std::hint::spin_loop();
        }
        let result = f(&self.exists, &self.node);
        self.locked.store(false, Ordering::Release);
        result
    }
}

/// Fixed-capacity, linearly-probed hash table mapping canonical
/// `(var, hi, lo)` triples to a stable index.
pub struct UniqueTable {
    slots: Vec<Slot>,
    capacity: usize,
    /// Number of occupied slots, tracked for diagnostics and load-factor
    /// checks; not load-bearing for correctness.
    len: AtomicU32,
}

impl UniqueTable {
    /// Builds a table sized to hold roughly `capacity` nodes. Slot 0 is
    /// reserved as the terminal sentinel and pre-marked occupied so no real
    /// node can ever collide into it.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> UniqueTable {
        let capacity = capacity.max(2);
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Slot::empty);
        slots[0].exists.store(true, Ordering::Release);
        UniqueTable {
            slots,
            capacity,
            len: AtomicU32::new(1),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed) as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot_for(&self, node: &Node) -> usize {
        (hash_bytes(&node.key_bytes()) as usize) % self.capacity
    }

    /// Finds or installs the canonical slot for `node`, returning its index.
    /// Preconditions (enforced by `make`, not here): `node.lo` is not
    /// complemented and `node.hi != node.lo`.
    pub fn lookup_or_create(&self, node: Node) -> Result<u32, BddError> {
        let start = self.slot_for(&node);
        for probe in 0..self.capacity {
            let idx = (start + probe) % self.capacity;
            // Skip the reserved terminal sentinel when probing for new
            // nodes; it can never be a legitimate match since no caller
            // constructs a node equal to the zeroed sentinel.
            if idx == 0 {
                continue;
            }
            let slot = &self.slots[idx];
            let found = slot.with_locked(|exists, cell| {
                if !exists.load(Ordering::Acquire) {
                    // SAFETY: lock held.
                    unsafe {
                        *cell.get() = node;
                    }
                    exists.store(true, Ordering::Release);
                    self.len.fetch_add(1, Ordering::Relaxed);
                    Some(idx as u32)
                } else {
                    // SAFETY: lock held.
                    let stored = unsafe { *cell.get() };
                    if stored.var == node.var && stored.hi == node.hi && stored.lo == node.lo {
                        Some(idx as u32)
                    } else {
                        None
                    }
                }
            });
            if let Some(i) = found {
                return Ok(i);
            }
        }
        tracing::error!(capacity = self.capacity, "unique table exhausted, no free slot found");
        Err(BddError::TableFull {
            capacity: self.capacity,
        })
    }

    /// Reads back the node stored at `index`. Panics if `index` is out of
    /// range or the slot has never been installed; both indicate a caller
    /// bug (an index derived from something other than this table).
    #[must_use]
    pub fn get(&self, index: u32) -> Node {
        let slot = &self.slots[index as usize];
        slot.with_locked(|exists, cell| {
            debug_assert!(exists.load(Ordering::Acquire), "dereferencing empty slot");
            // SAFETY: lock held.
            unsafe { *cell.get() }
        })
    }
}
