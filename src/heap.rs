//! Bounded max-priority-queue used as the candidate buffer during search.

use crate::error::LofError;

/// Fixed-capacity max-heap over `(squared_distance, point_index)` pairs.
///
/// The capacity is hard-capped at `2k`: a k-neighborhood can legitimately
/// exceed k points when ties occur at the k-distance boundary, and `2k`
/// bounds that growth without dynamic resizing. Created fresh per neighbor
/// query and discarded once results are extracted.
///
/// Storage is 1-indexed (slot 0 unused) so that the parent of slot `i` is
/// `i / 2` and its children are `2i` and `2i + 1`.
#[derive(Debug, Clone)]
pub struct BoundedMaxHeap {
    values: Vec<f64>,
    ids: Vec<usize>,
    size: usize,
}

impl BoundedMaxHeap {
    /// Creates an empty heap with capacity `2 * k`.
    pub fn new(k: usize) -> Self {
        let cap = 2 * k;
        Self {
            values: vec![0.0; cap + 1],
            ids: vec![0; cap + 1],
            size: 0,
        }
    }

    /// Maximum number of entries the heap can hold.
    pub fn capacity(&self) -> usize {
        self.values.len() - 1
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the heap holds no entries.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if the heap is filled to capacity.
    pub fn is_full(&self) -> bool {
        self.size == self.capacity()
    }

    /// Current maximum value.
    ///
    /// Returns a NaN sentinel when the heap is empty; callers must check
    /// [`len`](Self::len) first.
    pub fn top_value(&self) -> f64 {
        if self.size == 0 {
            f64::NAN
        } else {
            self.values[1]
        }
    }

    /// Returns `true` if `id` is stored in any populated slot.
    pub fn contains_id(&self, id: usize) -> bool {
        self.ids[1..=self.size].contains(&id)
    }

    /// Stored values in slot order (slot 1 first, i.e. the maximum first).
    pub fn values(&self) -> &[f64] {
        &self.values[1..=self.size]
    }

    /// Stored identifiers in slot order, parallel to [`values`](Self::values).
    pub fn ids(&self) -> &[usize] {
        &self.ids[1..=self.size]
    }

    /// Inserts a `(value, id)` pair, restoring heap order by sift-up.
    ///
    /// # Errors
    ///
    /// Returns [`LofError::CapacityExceeded`] when the heap is full; the heap
    /// is left unchanged.
    pub fn insert(&mut self, value: f64, id: usize) -> Result<(), LofError> {
        if self.is_full() {
            return Err(LofError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }
        self.size += 1;
        self.values[self.size] = value;
        self.ids[self.size] = id;
        self.swim(self.size);
        Ok(())
    }

    /// Removes and returns the maximum entry, restoring heap order by
    /// sift-down.
    ///
    /// # Errors
    ///
    /// Returns [`LofError::EmptyHeap`] when the heap is empty.
    pub fn remove_top(&mut self) -> Result<(f64, usize), LofError> {
        if self.size == 0 {
            return Err(LofError::EmptyHeap);
        }
        let top = (self.values[1], self.ids[1]);
        self.values[1] = self.values[self.size];
        self.ids[1] = self.ids[self.size];
        self.size -= 1;
        self.sink(1);
        Ok(top)
    }

    /// Unconditionally overwrites the maximum entry and restores heap order.
    ///
    /// Must only be called on a non-empty heap (debug-asserted).
    pub fn replace_top(&mut self, value: f64, id: usize) {
        debug_assert!(self.size > 0);
        self.values[1] = value;
        self.ids[1] = id;
        self.sink(1);
    }

    fn swim(&mut self, mut i: usize) {
        while i > 1 && self.values[i / 2] < self.values[i] {
            self.values.swap(i, i / 2);
            self.ids.swap(i, i / 2);
            i /= 2;
        }
    }

    fn sink(&mut self, mut i: usize) {
        while 2 * i <= self.size {
            let mut j = 2 * i;
            if j < self.size && self.values[j] < self.values[j + 1] {
                j += 1;
            }
            if self.values[i] >= self.values[j] {
                break;
            }
            self.values.swap(i, j);
            self.ids.swap(i, j);
            i = j;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Asserts the max-heap order invariant over all populated slots.
    fn assert_heap_order(heap: &BoundedMaxHeap) {
        let values = heap.values();
        for i in 1..=values.len() {
            for child in [2 * i, 2 * i + 1] {
                if child <= values.len() {
                    assert!(
                        values[i - 1] >= values[child - 1],
                        "parent slot {i} ({}) < child slot {child} ({})",
                        values[i - 1],
                        values[child - 1]
                    );
                }
            }
        }
    }

    #[test]
    fn test_new_is_empty() {
        let heap = BoundedMaxHeap::new(3);
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert_eq!(heap.capacity(), 6);
        assert!(heap.top_value().is_nan());
    }

    #[test]
    fn test_insert_tracks_max() {
        let mut heap = BoundedMaxHeap::new(4);
        heap.insert(3.0, 10).unwrap();
        assert_eq!(heap.top_value(), 3.0);
        heap.insert(7.0, 11).unwrap();
        assert_eq!(heap.top_value(), 7.0);
        heap.insert(5.0, 12).unwrap();
        assert_eq!(heap.top_value(), 7.0);
        heap.insert(9.0, 13).unwrap();
        assert_eq!(heap.top_value(), 9.0);
        assert_heap_order(&heap);
    }

    #[test]
    fn test_order_invariant_after_every_insert() {
        let mut heap = BoundedMaxHeap::new(5);
        for (i, v) in [4.0, 1.0, 9.0, 2.0, 8.0, 3.0, 7.0, 0.0, 6.0, 5.0]
            .iter()
            .enumerate()
        {
            heap.insert(*v, i).unwrap();
            assert_heap_order(&heap);
        }
        assert_eq!(heap.len(), 10);
        assert_eq!(heap.top_value(), 9.0);
    }

    #[test]
    fn test_capacity_exceeded_leaves_state_unchanged() {
        let mut heap = BoundedMaxHeap::new(2);
        for i in 0..4 {
            heap.insert(i as f64, i).unwrap();
        }
        assert!(heap.is_full());
        let before_values = heap.values().to_vec();
        let before_ids = heap.ids().to_vec();

        let result = heap.insert(99.0, 99);
        assert!(matches!(result, Err(LofError::CapacityExceeded { capacity: 4 })));
        assert_eq!(heap.len(), 4);
        assert_eq!(heap.values(), before_values.as_slice());
        assert_eq!(heap.ids(), before_ids.as_slice());
    }

    #[test]
    fn test_remove_top_empty_fails() {
        let mut heap = BoundedMaxHeap::new(2);
        assert!(matches!(heap.remove_top(), Err(LofError::EmptyHeap)));
    }

    #[test]
    fn test_remove_top_descending() {
        let mut heap = BoundedMaxHeap::new(3);
        for (i, v) in [2.0, 6.0, 4.0, 1.0, 5.0].iter().enumerate() {
            heap.insert(*v, i).unwrap();
        }
        let mut drained = Vec::new();
        while !heap.is_empty() {
            drained.push(heap.remove_top().unwrap().0);
            assert_heap_order(&heap);
        }
        assert_eq!(drained, vec![6.0, 5.0, 4.0, 2.0, 1.0]);
    }

    #[test]
    fn test_remove_top_returns_id() {
        let mut heap = BoundedMaxHeap::new(2);
        heap.insert(1.0, 7).unwrap();
        heap.insert(8.0, 42).unwrap();
        assert_eq!(heap.remove_top().unwrap(), (8.0, 42));
        assert_eq!(heap.remove_top().unwrap(), (1.0, 7));
    }

    #[test]
    fn test_replace_top() {
        let mut heap = BoundedMaxHeap::new(3);
        heap.insert(10.0, 0).unwrap();
        heap.insert(6.0, 1).unwrap();
        heap.insert(8.0, 2).unwrap();

        heap.replace_top(1.0, 3);
        assert_heap_order(&heap);
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.top_value(), 8.0);
        assert!(!heap.contains_id(0));
        assert!(heap.contains_id(3));
    }

    #[test]
    fn test_contains_id_only_populated_slots() {
        let mut heap = BoundedMaxHeap::new(2);
        heap.insert(3.0, 5).unwrap();
        heap.insert(1.0, 6).unwrap();
        assert!(heap.contains_id(5));
        assert!(heap.contains_id(6));
        assert!(!heap.contains_id(0));

        heap.remove_top().unwrap();
        assert!(!heap.contains_id(5));
        assert!(heap.contains_id(6));
    }

    #[test]
    fn test_tie_values_all_retained() {
        let mut heap = BoundedMaxHeap::new(2);
        heap.insert(2.0, 0).unwrap();
        heap.insert(2.0, 1).unwrap();
        heap.insert(2.0, 2).unwrap();
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.top_value(), 2.0);
        assert_heap_order(&heap);
    }

    #[test]
    fn test_slot_order_accessors_parallel() {
        let mut heap = BoundedMaxHeap::new(3);
        heap.insert(4.0, 10).unwrap();
        heap.insert(9.0, 20).unwrap();
        heap.insert(1.0, 30).unwrap();
        let values = heap.values();
        let ids = heap.ids();
        assert_eq!(values.len(), ids.len());
        // Slot 1 holds the maximum and its id.
        assert_eq!(values[0], 9.0);
        assert_eq!(ids[0], 20);
    }
}
