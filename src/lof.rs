//! Local outlier factor scoring over the fitted point set.

use rand::Rng;
use tracing::debug;

use crate::distance::dist_squared;
use crate::error::LofError;
use crate::heap::BoundedMaxHeap;
use crate::neighborhood::Neighborhood;
use crate::search::find_nearest;
use crate::tree::{self, BallTree};

/// Density-based outlier scorer (Breunig et al. 2000).
///
/// Owns a copy of the fitted point set and a ball tree built over it. The
/// tree is built once per [`fit`](Self::fit) and reused across queries, so
/// the same model can be scored with different k without refitting.
///
/// Every randomized operation takes an explicit `&mut impl Rng`; seeding the
/// generator makes results reproducible.
#[derive(Debug, Default)]
pub struct LocalOutlierFactor {
    fitted: Option<Fitted>,
}

#[derive(Debug)]
struct Fitted {
    data: Vec<f64>,
    n_dims: usize,
    n_points: usize,
    tree: BallTree,
}

impl LocalOutlierFactor {
    /// Creates an unfitted model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once [`fit`](Self::fit) has succeeded.
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Number of fitted points, if fitted.
    pub fn n_points(&self) -> Option<usize> {
        self.fitted.as_ref().map(|f| f.n_points)
    }

    /// Fits a ball tree to `data`, a flat row-major matrix of
    /// `n_points × n_dims` values. One-dimensional input is the `n_dims = 1`
    /// case.
    ///
    /// Validation happens before any state changes, so a failed `fit` leaves
    /// a previously fitted model untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LofError::ShapeMismatch`] when `n_dims` is zero or does not
    /// divide the data length, [`LofError::EmptyData`] for an empty slice,
    /// and [`LofError::NonFiniteData`] when any value is NaN or infinite.
    #[tracing::instrument(skip_all, fields(len = data.len(), n_dims))]
    pub fn fit(&mut self, data: &[f64], n_dims: usize) -> Result<(), LofError> {
        if n_dims == 0 || !data.len().is_multiple_of(n_dims) {
            return Err(LofError::ShapeMismatch {
                len: data.len(),
                n_dims,
            });
        }
        if data.is_empty() {
            return Err(LofError::EmptyData);
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(LofError::NonFiniteData);
        }

        let n_points = data.len() / n_dims;
        let owned = data.to_vec();
        let tree = tree::build(owned.clone(), (0..n_points).collect(), n_dims);
        debug!(n_points, n_dims, "fitted ball tree");

        self.fitted = Some(Fitted {
            data: owned,
            n_dims,
            n_points,
            tree,
        });
        Ok(())
    }

    /// Returns the k-neighborhood of the fitted point with row index `i`.
    ///
    /// The neighborhood holds between k and 2k points; the first distance is
    /// the point's k-distance. The heap is seeded with k distinct indices
    /// drawn uniformly from the other points, so unseeded reproducibility is
    /// up to the caller's `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`LofError::NotFitted`] before a successful fit,
    /// [`LofError::InvalidK`] unless `0 < k < n`, and
    /// [`LofError::IndexOutOfRange`] when `i >= n`.
    pub fn neighborhood(
        &self,
        i: usize,
        k: usize,
        rng: &mut impl Rng,
    ) -> Result<Neighborhood, LofError> {
        let fitted = self.fitted.as_ref().ok_or(LofError::NotFitted)?;
        fitted.check_k(k)?;
        if i >= fitted.n_points {
            return Err(LofError::IndexOutOfRange {
                index: i,
                n_points: fitted.n_points,
            });
        }
        let heap = fitted.query(i, k, rng)?;
        Ok(Neighborhood::from_heap(&heap))
    }

    /// Computes the local outlier factor of every fitted point.
    ///
    /// Scores near 1 indicate density comparable to the point's neighbors,
    /// scores well above 1 indicate likely outliers, and scores below 1
    /// indicate denser-than-average regions.
    ///
    /// Three passes: the k-neighborhood of every point, then each point's
    /// local reachability density
    /// `lrd(i) = |N(i)| / Σ_j max(k_distance(j), dist(i, j))`, then
    /// `lof(i) = (Σ_j lrd(j) / lrd(i)) / |N(i)|`.
    ///
    /// # Errors
    ///
    /// Returns [`LofError::NotFitted`] before a successful fit and
    /// [`LofError::InvalidK`] unless `0 < k < n`.
    #[tracing::instrument(skip_all, fields(k))]
    pub fn scores(&self, k: usize, rng: &mut impl Rng) -> Result<Vec<f64>, LofError> {
        let fitted = self.fitted.as_ref().ok_or(LofError::NotFitted)?;
        fitted.check_k(k)?;
        let n = fitted.n_points;

        // Pass 1: the k-neighborhood of every point, kept in heap slot order
        // so that distances[0] is each point's k-distance.
        let mut hoods = Vec::with_capacity(n);
        for i in 0..n {
            let heap = fitted.query(i, k, rng)?;
            hoods.push(Neighborhood::from_heap(&heap));
        }
        debug!(n, k, "collected neighborhoods");

        // Pass 2: local reachability density.
        let mut lrd = vec![0.0; n];
        for (i, hood) in hoods.iter().enumerate() {
            let mut reach_sum = 0.0;
            for (slot, &j) in hood.indices().iter().enumerate() {
                let k_dist_j = hoods[j].k_distance();
                let dist_ij = hood.distances()[slot];
                reach_sum += k_dist_j.max(dist_ij);
            }
            lrd[i] = hood.len() as f64 / reach_sum;
        }

        // Pass 3: local outlier factor.
        let scores = hoods
            .iter()
            .enumerate()
            .map(|(i, hood)| {
                let lrd_sum: f64 = hood.indices().iter().map(|&j| lrd[j]).sum();
                (lrd_sum / lrd[i]) / hood.len() as f64
            })
            .collect();
        Ok(scores)
    }
}

impl Fitted {
    fn check_k(&self, k: usize) -> Result<(), LofError> {
        if k == 0 || k >= self.n_points {
            return Err(LofError::InvalidK {
                k,
                n_points: self.n_points,
            });
        }
        Ok(())
    }

    fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n_dims..(i + 1) * self.n_dims]
    }

    /// Runs one neighbor query: seed a fresh heap with k distinct random
    /// points other than `i`, then refine it against the tree.
    fn query(&self, i: usize, k: usize, rng: &mut impl Rng) -> Result<BoundedMaxHeap, LofError> {
        let x = self.row(i);
        let mut heap = BoundedMaxHeap::new(k);

        // Uniform draw of k distinct indices from {0..n} \ {i}: sample from
        // a range one short and shift past the query index.
        for drawn in rand::seq::index::sample(rng, self.n_points - 1, k) {
            let j = if drawn >= i { drawn + 1 } else { drawn };
            heap.insert(dist_squared(x, self.row(j)), j)?;
        }

        find_nearest(x, k, &self.tree, &mut heap, Some(i))?;
        Ok(heap)
    }
}
