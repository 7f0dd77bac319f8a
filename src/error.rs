//! Error types for heap and graph operations
//!
//! Every caller contract of the heap is checked: a violated precondition is
//! reported through [`HeapError`] and leaves the heap untouched.

use std::fmt;

use crate::indexed::{Id, Priority};

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// Every slot is occupied
    Full {
        /// Fixed capacity of the heap
        capacity: usize,
    },
    /// The identifier lies outside the domain the index map covers
    IdOutOfRange {
        /// Rejected identifier
        id: Id,
        /// Fixed capacity of the heap
        capacity: usize,
    },
    /// The identifier is already stored in the heap
    DuplicateId {
        /// Rejected identifier
        id: Id,
    },
    /// The identifier is not currently stored in the heap
    NotPresent {
        /// Requested identifier
        id: Id,
    },
    /// The new priority is not less than the current priority
    PriorityNotDecreased {
        /// Identifier whose priority was to be lowered
        id: Id,
        /// Priority currently stored
        current: Priority,
        /// Priority that was requested
        requested: Priority,
    },
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::Full { capacity } => {
                write!(f, "heap is full (capacity {})", capacity)
            }
            HeapError::IdOutOfRange { id, capacity } => {
                write!(f, "id {} is outside the range [0, {})", id, capacity)
            }
            HeapError::DuplicateId { id } => write!(f, "id {} is already in the heap", id),
            HeapError::NotPresent { id } => write!(f, "id {} is not in the heap", id),
            HeapError::PriorityNotDecreased {
                id,
                current,
                requested,
            } => write!(
                f,
                "new priority {} for id {} is not less than current priority {}",
                requested, id, current
            ),
        }
    }
}

impl std::error::Error for HeapError {}

/// A broken structural invariant, as reported by
/// [`IndexedMinHeap::validate`](crate::IndexedMinHeap::validate)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// More slots are occupied than the heap can hold
    SizeExceedsCapacity { size: usize, capacity: usize },
    /// A child is strictly smaller than its parent
    HeapOrder { parent: usize, child: usize },
    /// The index map does not point back at the slot holding this id
    IndexMismatch {
        index: usize,
        id: Id,
        mapped: Option<usize>,
    },
    /// The index map has an entry for an id that no occupied slot holds
    StaleIndex { id: Id, mapped: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::SizeExceedsCapacity { size, capacity } => {
                write!(f, "size {} exceeds capacity {}", size, capacity)
            }
            InvariantViolation::HeapOrder { parent, child } => write!(
                f,
                "heap order broken between parent slot {} and child slot {}",
                parent, child
            ),
            InvariantViolation::IndexMismatch { index, id, mapped } => match mapped {
                Some(mapped) => write!(
                    f,
                    "slot {} holds id {} but the index map points at slot {}",
                    index, id, mapped
                ),
                None => write!(
                    f,
                    "slot {} holds id {} but the index map has no entry",
                    index, id
                ),
            },
            InvariantViolation::StaleIndex { id, mapped } => write!(
                f,
                "index map points id {} at slot {}, which does not hold it",
                id, mapped
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Error type for graph construction and search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// A vertex number outside `0..vertex_count`
    VertexOutOfRange { vertex: usize, vertex_count: usize },
    /// Dijkstra's algorithm requires non-negative edge weights
    NegativeWeight {
        from: usize,
        to: usize,
        weight: Priority,
    },
    /// A path length or tree weight does not fit in [`Priority`]
    Overflow { vertex: usize },
    /// A heap operation failed during the search
    Heap(HeapError),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::VertexOutOfRange {
                vertex,
                vertex_count,
            } => write!(
                f,
                "vertex {} is out of range for a graph with {} vertices",
                vertex, vertex_count
            ),
            GraphError::NegativeWeight { from, to, weight } => {
                write!(f, "edge {} -> {} has negative weight {}", from, to, weight)
            }
            GraphError::Overflow { vertex } => {
                write!(f, "accumulated weight at vertex {} overflows", vertex)
            }
            GraphError::Heap(err) => write!(f, "heap operation failed: {}", err),
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GraphError::Heap(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HeapError> for GraphError {
    fn from(err: HeapError) -> Self {
        GraphError::Heap(err)
    }
}
