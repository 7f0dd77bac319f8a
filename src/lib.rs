//! Indexed Binary Min-Heap for Rust
//!
//! This crate provides a fixed-capacity binary min-heap over `(priority, id)`
//! pairs with an identifier → slot side table, so the priority of any stored
//! element can be lowered in O(log n) without searching for it. This
//! `decrease_priority` operation is what Dijkstra's shortest path and Prim's
//! minimum spanning tree algorithms need from their priority queue.
//!
//! # Features
//!
//! - **[`IndexedMinHeap`]**: O(log n) insert, extract-min and decrease-priority;
//!   O(1) peek and lookup by identifier
//! - **Checked contracts**: a full heap, duplicate or out-of-range identifier, or
//!   a priority that would not decrease is reported as a [`HeapError`] and never
//!   mutates the heap
//! - **Pluggable index maps** ([`storage`]): a dense array for identifiers in
//!   `[0, capacity)`, or an FxHash map for sparse identifiers (`hash-index` feature)
//! - **[`pathfinding`]**: Dijkstra and Prim over a dense integer graph
//!
//! # Example
//!
//! ```rust
//! use indexed_min_heap::{HeapError, HeapNode, IndexedMinHeap};
//!
//! let mut heap = IndexedMinHeap::new(4);
//! heap.insert(5, 0).unwrap();
//! heap.insert(3, 1).unwrap();
//! heap.insert(8, 2).unwrap();
//! heap.insert(1, 3).unwrap();
//!
//! heap.decrease_priority(2, 0).unwrap();
//! assert_eq!(
//!     heap.decrease_priority(0, 9),
//!     Err(HeapError::PriorityNotDecreased { id: 0, current: 5, requested: 9 })
//! );
//!
//! assert_eq!(heap.extract_min(), Some(HeapNode::new(0, 2)));
//! assert_eq!(heap.extract_min(), Some(HeapNode::new(1, 3)));
//! ```

pub mod error;
pub mod indexed;
pub mod pathfinding;
pub mod storage;

// Re-export the main types for convenience
pub use error::{GraphError, HeapError, InvariantViolation};
pub use indexed::{HeapNode, Id, IndexedMinHeap, Priority};
