//! Density-based outlier scoring over a ball-partitioning spatial index.
//!
//! This crate computes, for a static set of points in a multi-dimensional
//! space, a local outlier factor (LOF, Breunig et al. 2000) for every point,
//! using approximate k-nearest-neighbor retrieval accelerated by a ball
//! tree. Three tightly coupled pieces make up the core:
//!
//! | Component | Role |
//! |-----------|------|
//! | [`BoundedMaxHeap`] | fixed-capacity (2k) candidate buffer per query |
//! | ball tree (internal) | binary spatial index, rebuilt on each fit |
//! | [`LocalOutlierFactor`] | neighbor queries + density-ratio scoring |
//!
//! # Quick start
//!
//! ```
//! use balltree_lof::LocalOutlierFactor;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! // Nine points near the origin plus one far outlier, 2 dims each.
//! let mut data: Vec<f64> = (0..9)
//!     .flat_map(|i| [(i % 3) as f64, (i / 3) as f64])
//!     .collect();
//! data.extend([50.0, 50.0]);
//!
//! let mut model = LocalOutlierFactor::new();
//! model.fit(&data, 2)?;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let scores = model.scores(3, &mut rng)?;
//! assert_eq!(scores.len(), 10);
//! # Ok::<(), balltree_lof::LofError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! LocalOutlierFactor::fit()
//!   └─ tree::build()            (tree.rs)
//! LocalOutlierFactor::scores()
//!   ├─ seed BoundedMaxHeap      (heap.rs, k random candidates)
//!   ├─ search::find_nearest()   (search.rs, branch-and-bound)
//!   └─ lrd / lof passes         (lof.rs)
//! ```
//!
//! The index is transient: rebuilt from scratch on each `fit`, held only in
//! memory, and never mutated afterwards, which makes concurrent read access
//! across queries safe by construction.

pub mod error;
pub mod heap;
pub mod lof;
pub mod neighborhood;

pub(crate) mod distance;
pub(crate) mod search;
pub(crate) mod tree;

pub use error::LofError;
pub use heap::BoundedMaxHeap;
pub use lof::LocalOutlierFactor;
pub use neighborhood::Neighborhood;
