//! Branch-and-bound nearest-neighbor search over the ball tree.

use crate::distance::{broadcast_dist_squared, dist_squared};
use crate::error::LofError;
use crate::heap::BoundedMaxHeap;
use crate::tree::BallTree;

/// Updates `heap` to hold (at least) the k nearest stored points to `query`.
///
/// The heap must arrive pre-seeded with at least one candidate — in practice
/// the caller seeds it with k candidates, so the heap's top is always the
/// current k-distance bound. `exclude` suppresses a point matching itself
/// when the query is part of the indexed set.
///
/// Visits the nearer child first so the bound tightens early, then skips the
/// farther child whenever its proxy distance squared exceeds the bound. The
/// proxy is the scalar-broadcast center/radius summary, not a true
/// D-dimensional ball, so pruning is exact only in one dimension.
///
/// # Errors
///
/// Propagates heap failures. With a correctly seeded heap the guards below
/// make every heap operation infallible.
pub(crate) fn find_nearest(
    query: &[f64],
    k: usize,
    node: &BallTree,
    heap: &mut BoundedMaxHeap,
    exclude: Option<usize>,
) -> Result<(), LofError> {
    debug_assert!(!heap.is_empty());
    match node {
        BallTree::Leaf {
            points, indices, ..
        } => {
            for (&j, y) in indices.iter().zip(points.chunks_exact(query.len())) {
                let d = dist_squared(query, y);
                if d > heap.top_value() {
                    // Provably outside the current k-neighborhood bound.
                    continue;
                }
                if exclude == Some(j) || heap.contains_id(j) {
                    continue;
                }
                // Shrink back toward k while a strictly closer candidate
                // makes room.
                while heap.len() > k && d < heap.top_value() {
                    heap.remove_top()?;
                }
                if d < heap.top_value() {
                    heap.replace_top(d, j);
                } else if d == heap.top_value() && !heap.is_full() {
                    // Tie at the k-distance boundary: keep it, up to the 2k
                    // hard cap. Ties beyond the cap are dropped.
                    heap.insert(d, j)?;
                }
            }
            Ok(())
        }
        BallTree::Node { left, right, .. } => {
            let left_dist = broadcast_dist_squared(query, left.center()).sqrt() - left.radius();
            let right_dist = broadcast_dist_squared(query, right.center()).sqrt() - right.radius();

            let (near, far, far_dist) = if left_dist < right_dist {
                (left, right, right_dist)
            } else {
                (right, left, left_dist)
            };

            find_nearest(query, k, near, heap, exclude)?;
            if far_dist * far_dist > heap.top_value() {
                return Ok(());
            }
            find_nearest(query, k, far, heap, exclude)
        }
    }
}
