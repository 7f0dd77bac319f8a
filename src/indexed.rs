//! Indexed binary min-heap
//!
//! A fixed-capacity binary min-heap over `(priority, id)` pairs that can find
//! any stored element by its identifier in O(1), which makes `decrease_priority`
//! an O(log n) operation. This is the operation Dijkstra's and Prim's algorithms
//! lean on: a plain binary heap would need an O(n) scan to locate the element.
//!
//! # Layout
//!
//! Nodes live in a fixed array that is 1-indexed; slot 0 is never used so that
//! `parent(i) = i / 2`, `left(i) = 2i` and `right(i) = 2i + 1`. An
//! [`IndexMap`] records the slot of every stored identifier and is updated on
//! every move.
//!
//! # Time Complexity
//!
//! | Operation           | Complexity |
//! |---------------------|------------|
//! | `insert`            | O(log n)   |
//! | `extract_min`       | O(log n)   |
//! | `decrease_priority` | O(log n)   |
//! | `peek_min`          | O(1)       |
//! | `priority_of`       | O(1)       |
//! | `index_of`          | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use indexed_min_heap::{HeapNode, IndexedMinHeap};
//!
//! let mut heap = IndexedMinHeap::new(4);
//! heap.insert(5, 0).unwrap();
//! heap.insert(3, 1).unwrap();
//! heap.insert(8, 2).unwrap();
//!
//! heap.decrease_priority(2, 1).unwrap();
//! assert_eq!(heap.extract_min(), Some(HeapNode::new(1, 2)));
//! assert_eq!(heap.extract_min(), Some(HeapNode::new(3, 1)));
//! assert_eq!(heap.priority_of(0), Some(5));
//! ```

use std::fmt;

use crate::error::{HeapError, InvariantViolation};
use crate::storage::{DenseIndexMap, IndexMap};

/// Ordering key; lower values are extracted first
pub type Priority = i64;

/// Caller-assigned identifier of a stored element
pub type Id = usize;

const ROOT_INDEX: usize = 1;

/// A `(priority, id)` pair stored in the heap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HeapNode {
    pub priority: Priority,
    pub id: Id,
}

impl HeapNode {
    /// Creates a node
    pub const fn new(priority: Priority, id: Id) -> Self {
        Self { priority, id }
    }
}

/// A fixed-capacity binary min-heap addressable by identifier
///
/// With the default [`DenseIndexMap`] backend identifiers must lie in
/// `[0, capacity)`. Use [`HashIndexMap`](crate::storage::HashIndexMap) for
/// arbitrary identifiers.
///
/// Every precondition is checked: operations that cannot apply return an
/// error or `None` and leave the heap unchanged.
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<M: IndexMap = DenseIndexMap> {
    /// Heap slots; `arr[0]` is unused and `arr[1..=size]` are occupied
    arr: Box<[HeapNode]>,
    /// Identifier -> slot
    index: M,
    size: usize,
}

impl IndexedMinHeap<DenseIndexMap> {
    /// Creates an empty heap holding at most `capacity` elements with
    /// identifiers in `[0, capacity)`
    pub fn new(capacity: usize) -> Self {
        Self::with_backend(capacity)
    }
}

impl<M: IndexMap> IndexedMinHeap<M> {
    /// Creates an empty heap holding at most `capacity` elements, using `M`
    /// to map identifiers to slots
    ///
    /// # Panics
    /// Panics if `capacity` is `usize::MAX`, since slot 0 is reserved.
    pub fn with_backend(capacity: usize) -> Self {
        let slots = capacity.checked_add(1).unwrap_or_else(|| {
            panic!("heap capacity {} leaves no room for the reserved slot", capacity)
        });
        Self {
            arr: vec![HeapNode::default(); slots].into_boxed_slice(),
            index: M::with_capacity(capacity),
            size: 0,
        }
    }

    /// Returns the number of stored elements
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if no element is stored
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns true if no further element can be inserted
    #[inline]
    pub fn is_full(&self) -> bool {
        self.size == self.capacity()
    }

    /// Returns the fixed capacity chosen at construction
    #[inline]
    pub fn capacity(&self) -> usize {
        self.arr.len() - 1
    }

    /// Returns true if `id` is currently stored
    #[inline]
    pub fn contains(&self, id: Id) -> bool {
        self.index_of(id).is_some()
    }

    /// Inserts a node with the given priority and identifier
    ///
    /// # Errors
    /// - [`HeapError::Full`] if `len() == capacity()`
    /// - [`HeapError::IdOutOfRange`] if the index map does not cover `id`
    /// - [`HeapError::DuplicateId`] if `id` is already stored
    ///
    /// The heap is unchanged when an error is returned.
    pub fn insert(&mut self, priority: Priority, id: Id) -> Result<(), HeapError> {
        let capacity = self.capacity();
        if self.size == capacity {
            return Err(HeapError::Full { capacity });
        }
        if !self.index.accepts(id) {
            return Err(HeapError::IdOutOfRange { id, capacity });
        }
        if self.index.get(id).is_some() {
            return Err(HeapError::DuplicateId { id });
        }

        self.size += 1;
        self.arr[self.size] = HeapNode::new(priority, id);
        self.index.set(id, self.size);
        self.bubble_up(self.size);
        Ok(())
    }

    /// Returns the node with minimum priority without removing it
    #[inline]
    pub fn peek_min(&self) -> Option<HeapNode> {
        self.node_at(ROOT_INDEX)
    }

    /// Removes and returns the node with minimum priority
    ///
    /// Returns `None` if the heap is empty.
    pub fn extract_min(&mut self) -> Option<HeapNode> {
        let min = self.peek_min()?;
        let last_index = self.size;

        // Move the last node into the root rather than swapping it there.
        self.index.remove(min.id);
        if last_index > ROOT_INDEX {
            let last = self.arr[last_index];
            self.arr[ROOT_INDEX] = last;
            self.index.set(last.id, ROOT_INDEX);
        }
        self.arr[last_index] = HeapNode::default();
        self.size -= 1;

        if self.size > 0 {
            self.bubble_down();
        }
        Some(min)
    }

    /// Lowers the priority of the node with identifier `id` to `new_priority`
    ///
    /// # Errors
    /// - [`HeapError::NotPresent`] if `id` is not stored
    /// - [`HeapError::PriorityNotDecreased`] if `new_priority` is not strictly
    ///   less than the current priority
    ///
    /// The heap is unchanged when an error is returned.
    pub fn decrease_priority(&mut self, id: Id, new_priority: Priority) -> Result<(), HeapError> {
        let index = self.index_of(id).ok_or(HeapError::NotPresent { id })?;

        let current = self.arr[index].priority;
        if current <= new_priority {
            return Err(HeapError::PriorityNotDecreased {
                id,
                current,
                requested: new_priority,
            });
        }

        self.arr[index].priority = new_priority;
        self.bubble_up(index);
        Ok(())
    }

    /// Returns the priority of the node with identifier `id`, if stored
    #[inline]
    pub fn priority_of(&self, id: Id) -> Option<Priority> {
        self.index_of(id).map(|index| self.arr[index].priority)
    }

    /// Returns the slot (1-based) currently holding identifier `id`, if stored
    #[inline]
    pub fn index_of(&self, id: Id) -> Option<usize> {
        self.index
            .get(id)
            .filter(|&index| self.is_valid_index(index))
    }

    /// Removes every node, keeping the capacity
    pub fn clear(&mut self) {
        for node in &mut self.arr[ROOT_INDEX..=self.size] {
            *node = HeapNode::default();
        }
        self.index.clear();
        self.size = 0;
    }

    /// Returns the occupied slots in array order (not sorted)
    #[inline]
    pub fn as_slice(&self) -> &[HeapNode] {
        &self.arr[ROOT_INDEX..=self.size]
    }

    /// Iterates over the stored nodes in array order (not sorted)
    pub fn iter(&self) -> std::slice::Iter<'_, HeapNode> {
        self.as_slice().iter()
    }

    /// Consumes the heap, returning its nodes in extraction order
    pub fn into_sorted_vec(mut self) -> Vec<HeapNode> {
        let mut sorted = Vec::with_capacity(self.size);
        while let Some(node) = self.extract_min() {
            sorted.push(node);
        }
        sorted
    }

    /// Checks every structural invariant, reporting the first violation found
    ///
    /// Useful in tests and debugging; O(n) for the dense backend's domain.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let capacity = self.capacity();
        if self.size > capacity {
            return Err(InvariantViolation::SizeExceedsCapacity {
                size: self.size,
                capacity,
            });
        }

        for child in (ROOT_INDEX + 1)..=self.size {
            let parent = child / 2;
            if self.arr[parent].priority > self.arr[child].priority {
                return Err(InvariantViolation::HeapOrder { parent, child });
            }
        }

        for (index, node) in self.iter().enumerate() {
            let index = index + ROOT_INDEX;
            let mapped = self.index.get(node.id);
            if mapped != Some(index) {
                return Err(InvariantViolation::IndexMismatch {
                    index,
                    id: node.id,
                    mapped,
                });
            }
        }

        // Every slot's id maps back to that slot, so any surplus entry is stale.
        for (id, mapped) in self.index.entries() {
            if self.node_at(mapped).map(|node| node.id) != Some(id) {
                return Err(InvariantViolation::StaleIndex { id, mapped });
            }
        }

        Ok(())
    }

    /// Returns a [`Display`](fmt::Display) adapter listing every occupied slot
    ///
    /// Each line shows `index: priority [id]` followed by the index map entry
    /// for the identifier equal to that slot number. Meant for interactive
    /// debugging; the format is not stable.
    pub fn dump(&self) -> Dump<'_, M> {
        Dump { heap: self }
    }

    // ------------------------------------------------------------------------
    // Navigation helpers
    // ------------------------------------------------------------------------

    /// Returns true if `index` is an occupied slot
    #[inline]
    fn is_valid_index(&self, index: usize) -> bool {
        (ROOT_INDEX..=self.size).contains(&index)
    }

    #[inline]
    fn node_at(&self, index: usize) -> Option<HeapNode> {
        if self.is_valid_index(index) {
            Some(self.arr[index])
        } else {
            None
        }
    }

    #[inline]
    fn parent_idx(&self, index: usize) -> Option<usize> {
        if self.is_valid_index(index) && index > ROOT_INDEX {
            Some(index / 2)
        } else {
            None
        }
    }

    #[inline]
    fn left_idx(&self, index: usize) -> Option<usize> {
        if !self.is_valid_index(index) {
            return None;
        }
        Some(2 * index).filter(|&left| self.is_valid_index(left))
    }

    #[inline]
    fn right_idx(&self, index: usize) -> Option<usize> {
        if !self.is_valid_index(index) {
            return None;
        }
        Some(2 * index + 1).filter(|&right| self.is_valid_index(right))
    }

    /// Exchanges two occupied slots along with their index map entries
    ///
    /// Has no effect unless both slots are occupied.
    fn swap(&mut self, a: usize, b: usize) {
        if !(self.is_valid_index(a) && self.is_valid_index(b)) {
            return;
        }
        self.arr.swap(a, b);
        self.index.set(self.arr[a].id, a);
        self.index.set(self.arr[b].id, b);
    }

    /// Moves the node at `index` toward the root while it is strictly smaller
    /// than its parent
    fn bubble_up(&mut self, mut index: usize) {
        while let Some(parent) = self.parent_idx(index) {
            if self.arr[index].priority >= self.arr[parent].priority {
                break;
            }
            self.swap(index, parent);
            index = parent;
        }
    }

    /// Moves the root toward the leaves while a child is strictly smaller
    fn bubble_down(&mut self) {
        let mut index = ROOT_INDEX;
        while let Some(left) = self.left_idx(index) {
            let smallest = match self.right_idx(index) {
                Some(right) if self.arr[right].priority < self.arr[left].priority => right,
                _ => left,
            };

            if self.arr[smallest].priority >= self.arr[index].priority {
                break;
            }
            self.swap(index, smallest);
            index = smallest;
        }
    }
}

impl Default for IndexedMinHeap<DenseIndexMap> {
    /// An empty heap of capacity zero
    fn default() -> Self {
        Self::new(0)
    }
}

impl<'a, M: IndexMap> IntoIterator for &'a IndexedMinHeap<M> {
    type Item = &'a HeapNode;
    type IntoIter = std::slice::Iter<'a, HeapNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Diagnostic view of a heap, created by [`IndexedMinHeap::dump`]
pub struct Dump<'a, M: IndexMap> {
    heap: &'a IndexedMinHeap<M>,
}

impl<M: IndexMap> fmt::Display for Dump<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heap = self.heap;
        writeln!(
            f,
            "IndexedMinHeap with size: {}\n\tcapacity: {}\n",
            heap.len(),
            heap.capacity()
        )?;
        writeln!(f, "index: priority [ID]\t ID: index")?;
        for (offset, node) in heap.iter().enumerate() {
            let index = offset + ROOT_INDEX;
            write!(f, "{}: {} [{}]\t\t{}: ", index, node.priority, node.id, index)?;
            match heap.index_of(index) {
                Some(slot) => writeln!(f, "{}", slot)?,
                None => writeln!(f, "-")?,
            }
        }
        Ok(())
    }
}
