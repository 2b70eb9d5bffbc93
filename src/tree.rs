//! Ball-partitioning spatial index construction.
//!
//! The tree recursively splits a point subset along the coordinate axis with
//! the largest value range, at the median of that axis. Each node summarizes
//! its subset with a scalar center and radius taken from the split axis
//! alone (see [`crate::distance::broadcast_dist_squared`] for how the search
//! consumes that summary). Construction follows the k-d construction scheme
//! of Omohundro's "Five Balltree Construction Algorithms".
//!
//! Subsets are moved into each recursive call, so the finished tree owns its
//! leaf points outright and the caller's full copy is only read during
//! queries.

/// A ball tree node: either an internal split or a leaf bucket.
///
/// Every original point index appears in exactly one leaf, exactly once.
#[derive(Debug, Clone)]
pub(crate) enum BallTree {
    /// Internal node bounding two children.
    Node {
        center: f64,
        radius: f64,
        left: Box<BallTree>,
        right: Box<BallTree>,
    },
    /// Leaf bucket holding rows of the original point set and their indices.
    Leaf {
        center: f64,
        radius: f64,
        points: Vec<f64>,
        indices: Vec<usize>,
    },
}

impl BallTree {
    /// Scalar center along the node's split axis.
    pub(crate) fn center(&self) -> f64 {
        match self {
            BallTree::Node { center, .. } | BallTree::Leaf { center, .. } => *center,
        }
    }

    /// Scalar radius along the node's split axis.
    pub(crate) fn radius(&self) -> f64 {
        match self {
            BallTree::Node { radius, .. } | BallTree::Leaf { radius, .. } => *radius,
        }
    }
}

/// Split summary for one subset: the chosen axis and its extremes.
struct Split {
    axis: usize,
    min: f64,
    max: f64,
}

/// Builds a ball tree over `points` (row-major, `n_dims` per row).
///
/// `indices[i]` is the row number of `points[i * n_dims..]` in the original
/// point set. Both vectors are consumed; subsets are moved into the
/// recursive calls during partitioning.
///
/// Termination: each split strictly shrinks both halves, and a subset that
/// is degenerate along its widest axis (`min_d >= med_d`) becomes a leaf
/// verbatim, so construction completes for any finite input.
pub(crate) fn build(points: Vec<f64>, indices: Vec<usize>, n_dims: usize) -> BallTree {
    debug_assert!(n_dims >= 1);
    debug_assert!(!indices.is_empty());
    debug_assert_eq!(points.len(), indices.len() * n_dims);

    let split = widest_axis(&points, n_dims);
    let center = split.min + (split.max - split.min) / 2.0;
    let radius = (center - split.min).abs();
    let med = column_median(&points, n_dims, split.axis);

    if split.min >= med {
        // Degenerate along the widest axis: no split can make progress.
        return BallTree::Leaf {
            center,
            radius,
            points,
            indices,
        };
    }

    let (less, greater) = partition(points, indices, n_dims, split.axis, med);
    BallTree::Node {
        center,
        radius,
        left: Box::new(build(less.0, less.1, n_dims)),
        right: Box::new(build(greater.0, greater.1, n_dims)),
    }
}

/// Finds the axis with the largest value range across the subset.
///
/// Ties resolve to the lowest axis index: only a strictly larger range
/// replaces the current best.
fn widest_axis(points: &[f64], n_dims: usize) -> Split {
    let mut best = axis_extent(points, n_dims, 0);
    for axis in 1..n_dims {
        let ext = axis_extent(points, n_dims, axis);
        if ext.max - ext.min > best.max - best.min {
            best = ext;
        }
    }
    best
}

fn axis_extent(points: &[f64], n_dims: usize, axis: usize) -> Split {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for row in points.chunks_exact(n_dims) {
        min = min.min(row[axis]);
        max = max.max(row[axis]);
    }
    Split { axis, min, max }
}

/// Median of the subset's values along `axis`, averaging the two middle
/// values for even-sized subsets.
fn column_median(points: &[f64], n_dims: usize, axis: usize) -> f64 {
    let mut col: Vec<f64> = points.chunks_exact(n_dims).map(|row| row[axis]).collect();
    col.sort_unstable_by(f64::total_cmp);
    let n = col.len();
    if n % 2 == 1 {
        col[n / 2]
    } else {
        (col[n / 2 - 1] + col[n / 2]) / 2.0
    }
}

type Subset = (Vec<f64>, Vec<usize>);

/// Splits rows into (`< med`, `>= med`) along `axis`, moving each row and
/// its index into exactly one half.
fn partition(
    points: Vec<f64>,
    indices: Vec<usize>,
    n_dims: usize,
    axis: usize,
    med: f64,
) -> (Subset, Subset) {
    let mut less_points = Vec::new();
    let mut less_indices = Vec::new();
    let mut greater_points = Vec::new();
    let mut greater_indices = Vec::new();

    for (row, &idx) in points.chunks_exact(n_dims).zip(indices.iter()) {
        if row[axis] < med {
            less_points.extend_from_slice(row);
            less_indices.push(idx);
        } else {
            greater_points.extend_from_slice(row);
            greater_indices.push(idx);
        }
    }

    ((less_points, less_indices), (greater_points, greater_indices))
}
