//! Error types for the balltree-lof crate.

/// Error type for all fallible operations in the balltree-lof crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LofError {
    /// Returned when the point set is empty.
    #[error("point set is empty")]
    EmptyData,

    /// Returned when the data slice length is not divisible by the number of
    /// dimensions (or when `n_dims` is zero).
    #[error("data length {len} is not divisible by n_dims {n_dims}")]
    ShapeMismatch {
        /// Length of the data slice.
        len: usize,
        /// Number of dimensions per point.
        n_dims: usize,
    },

    /// Returned when the point set contains NaN or infinity.
    #[error("non-finite value in point set")]
    NonFiniteData,

    /// Returned when k is zero or not strictly smaller than the number of
    /// points.
    #[error("k must satisfy 0 < k < {n_points}, got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
        /// Number of fitted points.
        n_points: usize,
    },

    /// Returned when a query index is out of range.
    #[error("point index {index} is out of range for {n_points} points")]
    IndexOutOfRange {
        /// The out-of-range index.
        index: usize,
        /// Number of fitted points.
        n_points: usize,
    },

    /// Returned when a query or scoring operation is requested before `fit`.
    #[error("model has not been fitted yet")]
    NotFitted,

    /// Returned when a heap insert is attempted at full capacity.
    #[error("heap is filled to capacity ({capacity})")]
    CapacityExceeded {
        /// The heap's fixed capacity (2k).
        capacity: usize,
    },

    /// Returned when `remove_top` is called on an empty heap.
    #[error("heap is empty")]
    EmptyHeap,
}
