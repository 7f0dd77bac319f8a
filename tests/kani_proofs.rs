//! Kani verification proofs for heap operations
//!
//! Kani is AWS's model checker for Rust. It can verify properties of Rust code
//! by checking all possible executions up to certain bounds. Every proof here
//! works on a heap of capacity at most 4, so all shapes of a small heap are
//! explored exhaustively.
//!
//! To run these proofs:
//!   cargo kani --tests

#[cfg(kani)]
use indexed_min_heap::{HeapError, IndexedMinHeap, Priority};

/// Builds a heap of capacity 4 holding ids 0..3 with arbitrary priorities
#[cfg(kani)]
fn any_heap_of_three() -> (IndexedMinHeap, [Priority; 3]) {
    let mut heap = IndexedMinHeap::new(4);
    let priorities: [Priority; 3] = [kani::any(), kani::any(), kani::any()];
    for (id, &priority) in priorities.iter().enumerate() {
        assert!(heap.insert(priority, id).is_ok());
    }
    (heap, priorities)
}

/// Proof that insert increments the length exactly when it succeeds
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_insert_increments_len() {
    let mut heap = IndexedMinHeap::new(2);
    let id: usize = kani::any();
    kani::assume(id < 3);

    let before = heap.len();
    let result = heap.insert(kani::any(), id);

    if result.is_ok() {
        assert!(heap.len() == before + 1);
        assert!(heap.contains(id));
    } else {
        assert!(heap.len() == before);
        assert!(result == Err(HeapError::IdOutOfRange { id, capacity: 2 }));
    }
}

/// Proof that the invariants hold after arbitrary inserts
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_insert_preserves_invariants() {
    let (heap, priorities) = any_heap_of_three();
    assert!(heap.validate().is_ok());

    let min = heap.peek_min().unwrap();
    for &priority in &priorities {
        assert!(min.priority <= priority);
    }
}

/// Proof that extract_min returns the minimum and keeps the invariants
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_extract_min_returns_min() {
    let (mut heap, priorities) = any_heap_of_three();

    let node = heap.extract_min().unwrap();
    assert!(node.priority == priorities[node.id]);
    for &priority in &priorities {
        assert!(node.priority <= priority);
    }
    assert!(heap.len() == 2);
    assert!(!heap.contains(node.id));
    assert!(heap.validate().is_ok());
}

/// Proof that decrease_priority either lowers the priority or changes nothing
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_decrease_priority() {
    let (mut heap, priorities) = any_heap_of_three();
    let id: usize = kani::any();
    kani::assume(id < 4);
    let new_priority: Priority = kani::any();

    let before = heap.clone();
    let result = heap.decrease_priority(id, new_priority);

    if id == 3 {
        assert!(result == Err(HeapError::NotPresent { id }));
    } else if new_priority < priorities[id] {
        assert!(result.is_ok());
        assert!(heap.priority_of(id) == Some(new_priority));
        assert!(heap.peek_min().unwrap().priority <= new_priority);
    } else {
        assert!(result.is_err());
    }

    if result.is_err() {
        assert!(heap.as_slice() == before.as_slice());
    }
    assert!(heap.validate().is_ok());
}

/// Proof that a full heap rejects inserts without mutation
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_full_insert_is_rejected() {
    let (mut heap, _) = any_heap_of_three();
    assert!(heap.insert(kani::any(), 3).is_ok());
    assert!(heap.is_full());

    let before = heap.clone();
    let result = heap.insert(kani::any(), kani::any());
    assert!(result == Err(HeapError::Full { capacity: 4 }));
    assert!(heap.as_slice() == before.as_slice());
}
