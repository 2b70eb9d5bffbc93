//! Output type for neighborhood queries.

use crate::heap::BoundedMaxHeap;

/// Result of a k-neighborhood query.
///
/// Contains the neighbor indices and their Euclidean distances in heap slot
/// order, so the first distance is always the query point's k-distance (the
/// largest distance among its retained neighbors). Holds at least k entries
/// and at most 2k (ties at the k-distance boundary enlarge the set).
#[derive(Debug, Clone)]
pub struct Neighborhood {
    /// Row indices of the neighbors in the fitted point set.
    indices: Vec<usize>,
    /// Euclidean distances to the neighbors, heap slot order.
    distances: Vec<f64>,
}

impl Neighborhood {
    /// Extracts the heap's contents, converting squared distances back to
    /// Euclidean distances.
    pub(crate) fn from_heap(heap: &BoundedMaxHeap) -> Self {
        Self {
            indices: heap.ids().to_vec(),
            distances: heap.values().iter().map(|v| v.sqrt()).collect(),
        }
    }

    /// Returns the neighbor indices.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the Euclidean distances, parallel to [`indices`](Self::indices).
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// The k-distance: the largest distance among the retained neighbors.
    pub fn k_distance(&self) -> f64 {
        self.distances[0]
    }

    /// Number of neighbors retained (between k and 2k).
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Always `false` for a neighborhood produced by a query.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
