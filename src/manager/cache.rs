//! The computed cache: a lossy memo table for `ITE(A, B, C) -> R`.
//!
//! Unlike the unique table, a miss here is never wrong, only slow — the
//! cache exists purely to avoid recomputation, so collisions resolve by
//! overwriting rather than probing onward.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::backing_store::hash_bytes;
use crate::error::BddError;
use crate::repr::NodeRef;

struct Entry {
    a: NodeRef,
    b: NodeRef,
    c: NodeRef,
    r: NodeRef,
}

struct Slot {
    exists: AtomicBool,
    locked: AtomicBool,
    entry: UnsafeCell<Entry>,
}

// SAFETY: `entry` is only touched while `locked` is held.
unsafe impl Sync for Slot {}

impl Slot {
    fn empty() -> Slot {
        Slot {
            exists: AtomicBool::new(false),
            locked: AtomicBool::new(false),
            entry: UnsafeCell::new(Entry {
                a: NodeRef::FALSE,
                b: NodeRef::FALSE,
                c: NodeRef::FALSE,
                r: NodeRef::FALSE,
            }),
        }
    }

    fn with_locked<R>(&self, f: impl FnOnce(&AtomicBool, &UnsafeCell<Entry>) -> R) -> R {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            std::hint::spin_loop();
        }
        let result = f(&self.exists, &self.entry);
        self.locked.store(false, Ordering::Release);
        result
    }
}

fn key_bytes(a: NodeRef, b: NodeRef, c: NodeRef) -> [u8; 12] {
    let mut bytes = [0u8; 12];
    bytes[0..4].copy_from_slice(&a.raw().to_le_bytes());
    bytes[4..8].copy_from_slice(&b.raw().to_le_bytes());
    bytes[8..12].copy_from_slice(&c.raw().to_le_bytes());
    bytes
}

/// Fixed-capacity, lock-striped memo table over `ITE` argument triples.
pub struct ComputedCache {
    slots: Vec<Slot>,
    capacity: usize,
}

impl ComputedCache {
    /// Builds a cache with room for `capacity` entries. `capacity == 0` is a
    /// degenerate budget and is reported as [`BddError::CacheFull`] rather
    /// than silently producing an unusable cache.
    pub fn with_capacity(capacity: usize) -> Result<ComputedCache, BddError> {
        if capacity == 0 {
            tracing::error!(capacity, "computed cache budget could not size a single slot");
            return Err(BddError::CacheFull { capacity });
        }
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Slot::empty);
        Ok(ComputedCache { slots, capacity })
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn slot_for(&self, a: NodeRef, b: NodeRef, c: NodeRef) -> usize {
        (hash_bytes(&key_bytes(a, b, c)) as usize) % self.capacity
    }

    /// Returns the memoized result for `(a, b, c)`, if present. A `None`
    /// here is never a correctness signal, only a cue to recompute.
    #[must_use]
    pub fn get(&self, a: NodeRef, b: NodeRef, c: NodeRef) -> Option<NodeRef> {
        let idx = self.slot_for(a, b, c);
        let slot = &self.slots[idx];
        slot.with_locked(|exists, cell| {
            if !exists.load(Ordering::Acquire) {
                return None;
            }
            // SAFETY: lock held.
            let stored = unsafe { *cell.get() };
            if stored.a == a && stored.b == b && stored.c == c {
                Some(stored.r)
            } else {
                None
            }
        })
    }

    /// Records `(a, b, c) -> r`, overwriting whatever previously occupied
    /// the slot.
    pub fn insert(&self, a: NodeRef, b: NodeRef, c: NodeRef, r: NodeRef) {
        let idx = self.slot_for(a, b, c);
        let slot = &self.slots[idx];
        slot.with_locked(|exists, cell| {
            // SAFETY: lock held.
            unsafe {
                *cell.get() = Entry { a, b, c, r };
            }
            exists.store(true, Ordering::Release);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_recalls_an_entry() {
        let cache = ComputedCache::with_capacity(64).unwrap();
        let (a, b, c, r) = (
            NodeRef::of_index(1),
            NodeRef::TRUE,
            NodeRef::FALSE,
            NodeRef::of_index(2),
        );
        assert_eq!(cache.get(a, b, c), None);
        cache.insert(a, b, c, r);
        assert_eq!(cache.get(a, b, c), Some(r));
    }

    #[test]
    fn zero_capacity_is_reported_not_silently_allocated() {
        assert!(matches!(
            ComputedCache::with_capacity(0),
            Err(BddError::CacheFull { capacity: 0 })
        ));
    }

    #[test]
    fn a_colliding_insert_is_allowed_to_evict_silently() {
        // Cache correctness depends only on the unique table; an eviction is
        // a performance event, not a bug, so this just documents that the
        // last writer for a given slot wins.
        let cache = ComputedCache::with_capacity(1).unwrap();
        let r1 = NodeRef::of_index(1);
        let r2 = NodeRef::of_index(2);
        cache.insert(NodeRef::TRUE, NodeRef::TRUE, NodeRef::TRUE, r1);
        cache.insert(NodeRef::FALSE, NodeRef::FALSE, NodeRef::FALSE, r2);
        assert_eq!(cache.get(NodeRef::TRUE, NodeRef::TRUE, NodeRef::TRUE), None);
        assert_eq!(
            cache.get(NodeRef::FALSE, NodeRef::FALSE, NodeRef::FALSE),
            Some(r2)
        );
    }
}
