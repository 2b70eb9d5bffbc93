//! Squared Euclidean distance computation.

/// Squared Euclidean distance between two points of equal dimension.
///
/// # Panics
///
/// Debug-asserts that `x.len() == y.len()`.
#[inline]
pub(crate) fn dist_squared(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    x.iter()
        .zip(y.iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum()
}

/// Squared distance from `x` to the scalar `center` broadcast along every
/// axis, i.e. `Σₐ (x[a] − center)²`.
///
/// Ball nodes summarize their subset with a scalar center taken from the
/// split axis alone; the pruning bound therefore compares the query against
/// that scalar as if it were identical on every axis. Exact in one
/// dimension, a heuristic proxy in higher dimensions.
#[inline]
pub(crate) fn broadcast_dist_squared(x: &[f64], center: f64) -> f64 {
    x.iter().map(|a| (a - center) * (a - center)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_dist_squared_hand_computed() {
        // (3-1)^2 + (7-2)^2 = 4 + 25 = 29
        assert_abs_diff_eq!(
            dist_squared(&[3.0, 7.0], &[1.0, 2.0]),
            29.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_dist_squared_zero() {
        assert_abs_diff_eq!(
            dist_squared(&[1.5, -2.5, 0.0], &[1.5, -2.5, 0.0]),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_dist_squared_1d() {
        assert_abs_diff_eq!(dist_squared(&[4.0], &[1.0]), 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_broadcast_matches_dist_to_diagonal_point() {
        // Broadcasting c along every axis is the distance to the point (c, c).
        let x = [0.5, 3.0];
        let c = 2.0;
        assert_abs_diff_eq!(
            broadcast_dist_squared(&x, c),
            dist_squared(&x, &[c, c]),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_broadcast_1d_is_exact() {
        // In one dimension the proxy is the plain squared distance.
        assert_abs_diff_eq!(broadcast_dist_squared(&[7.0], 4.0), 9.0, epsilon = 1e-12);
    }
}
