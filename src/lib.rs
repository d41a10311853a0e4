//! # curvedist-core
//!
//! Core algorithms for polygonal curve analysis in Rust.
//!
//! This crate provides pure Rust implementations of:
//! - Curve distances: continuous Fréchet (free-space diagram with
//!   parametric search), discrete Fréchet, and dynamic time warping with
//!   matching reconstruction
//! - Curve simplification: exact minimum-error via the shortcut graph, and
//!   approximate minimum-link / minimum-error searches
//! - (k, ℓ)-clustering: farthest-first seeding with optional local search
//!   under the center and median objectives, cluster assignment and
//!   per-vertex enclosing balls
//! - Johnson–Lindenstrauss random projection of curve collections
//!
//! ## Data Layout
//!
//! Curves are represented by the [`Curve`] type: shared immutable point
//! storage plus an inclusive subcurve window, so subcurves are cheap
//! by-value views. Collections live in [`Curves`], which enforces a common
//! dimension. Distances between inputs and candidate cluster centers are
//! memoized in a lazily filled matrix owned by a
//! [`clustering::ClusteringContext`].
//!
//! Process-wide tunables (search tolerance, verbosity, worker-pool size,
//! memoization and memory budget) live in [`config`]. Diagnostics go
//! through the `log` facade; warnings are always emitted, phase and
//! per-item messages are gated by the configured verbosity.

#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]

pub mod parallel;

pub mod bounding;
pub mod clustering;
pub mod config;
pub mod curve;
pub mod dtw;
pub mod error;
pub mod frechet;
pub mod helpers;
pub mod interval;
pub mod jl_transform;
pub mod point;
pub mod random;
pub mod simplification;

// Re-export the core model types
pub use curve::{Curve, Curves};
pub use error::CurveError;
pub use interval::Interval;
pub use point::{centroid, Point, Points};

// Re-export the distance engines
pub use dtw::{dtw, DtwDistance};
pub use frechet::{
    continuous_frechet, discrete_frechet, ContinuousDistance, DiscreteDistance,
};

// Re-export simplification and clustering entry points
pub use bounding::bounding_sphere;
pub use clustering::{
    kl_center, kl_median, one_median_exhaustive, one_median_sampling, ClusterAssignment,
    ClusteringContext, ClusteringResult, CurveDistance, DistanceFunc,
};
pub use jl_transform::jl_transform;
pub use simplification::{
    approximate_minimum_error_simplification, approximate_minimum_link_simplification,
    minimum_error_simplification,
};
