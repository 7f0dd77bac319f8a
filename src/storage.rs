//! Pluggable identifier → slot maps for [`IndexedMinHeap`](crate::IndexedMinHeap)
//!
//! The heap keeps a side table recording where every stored identifier
//! currently sits in its array. This module abstracts over how that table is
//! stored:
//!
//! - [`DenseIndexMap`]: Default. A flat array covering identifiers `[0, capacity)`,
//!   giving O(1) lookup without hashing.
//! - [`HashIndexMap`]: A hash map from identifier to slot for sparse or
//!   unbounded identifier spaces (requires the `hash-index` feature).
//!
//! # Design
//!
//! "No slot" is always `None`. The dense map stores `Option<NonMaxUsize>`, which
//! has the same size as a bare `usize`: `usize::MAX` is never a valid slot because
//! the heap array has at most `capacity + 1` entries.
//!
//! # Example
//!
//! ```rust
//! use indexed_min_heap::storage::{DenseIndexMap, IndexMap};
//!
//! let mut map = DenseIndexMap::with_capacity(4);
//! map.set(2, 1);
//! assert_eq!(map.get(2), Some(1));
//! assert_eq!(map.remove(2), Some(1));
//! assert_eq!(map.get(2), None);
//! assert!(!map.accepts(4));
//! ```

use nonmax::NonMaxUsize;

#[cfg(feature = "hash-index")]
use rustc_hash::FxHashMap;

use crate::indexed::Id;

/// Trait for identifier → slot map backends
///
/// Implementations never validate slots; the heap is responsible for only
/// recording slots it actually occupies.
pub trait IndexMap {
    /// Creates an empty map for a heap of the given capacity
    fn with_capacity(capacity: usize) -> Self;

    /// Returns true if `id` lies in the identifier domain this map covers
    fn accepts(&self, id: Id) -> bool;

    /// Returns the slot currently recorded for `id`
    fn get(&self, id: Id) -> Option<usize>;

    /// Records `slot` as the current position of `id`
    ///
    /// Has no effect if `id` is outside the domain.
    fn set(&mut self, id: Id, slot: usize);

    /// Forgets `id`, returning the slot it was recorded at
    fn remove(&mut self, id: Id) -> Option<usize>;

    /// Forgets every identifier
    fn clear(&mut self);

    /// Iterates over every `(id, slot)` entry, in no particular order
    fn entries(&self) -> impl Iterator<Item = (Id, usize)> + '_;
}

// ============================================================================
// DenseIndexMap - flat array over [0, capacity)
// ============================================================================

/// Array-backed index map covering identifiers `[0, capacity)`
#[derive(Debug, Clone)]
pub struct DenseIndexMap {
    slots: Box<[Option<NonMaxUsize>]>,
}

impl IndexMap for DenseIndexMap {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
        }
    }

    #[inline]
    fn accepts(&self, id: Id) -> bool {
        id < self.slots.len()
    }

    #[inline]
    fn get(&self, id: Id) -> Option<usize> {
        self.slots.get(id).copied().flatten().map(|slot| slot.get())
    }

    #[inline]
    fn set(&mut self, id: Id, slot: usize) {
        if let Some(entry) = self.slots.get_mut(id) {
            *entry = NonMaxUsize::new(slot);
        }
    }

    #[inline]
    fn remove(&mut self, id: Id) -> Option<usize> {
        self.slots
            .get_mut(id)
            .and_then(Option::take)
            .map(|slot| slot.get())
    }

    fn clear(&mut self) {
        self.slots.fill(None);
    }

    fn entries(&self) -> impl Iterator<Item = (Id, usize)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.map(|slot| (id, slot.get())))
    }
}

// ============================================================================
// HashIndexMap - FxHash map for sparse identifiers
// ============================================================================

/// Hash-map-backed index map accepting any identifier
///
/// The heap's capacity still bounds how many identifiers can be stored at
/// once, but the identifiers themselves may be arbitrary.
///
/// # Feature Flag
/// Requires the `hash-index` feature (enabled by default).
#[cfg(feature = "hash-index")]
#[derive(Debug, Clone, Default)]
pub struct HashIndexMap {
    slots: FxHashMap<Id, usize>,
}

#[cfg(feature = "hash-index")]
impl IndexMap for HashIndexMap {
    fn with_capacity(capacity: usize) -> Self {
        let mut slots = FxHashMap::default();
        slots.reserve(capacity);
        Self { slots }
    }

    #[inline]
    fn accepts(&self, _id: Id) -> bool {
        true
    }

    #[inline]
    fn get(&self, id: Id) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    #[inline]
    fn set(&mut self, id: Id, slot: usize) {
        self.slots.insert(id, slot);
    }

    #[inline]
    fn remove(&mut self, id: Id) -> Option<usize> {
        self.slots.remove(&id)
    }

    fn clear(&mut self) {
        self.slots.clear();
    }

    fn entries(&self) -> impl Iterator<Item = (Id, usize)> + '_ {
        self.slots.iter().map(|(&id, &slot)| (id, slot))
    }
}
