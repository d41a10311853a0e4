//! Johnson–Lindenstrauss random projection for curve collections.
//!
//! Projects every vertex of every curve through one Gaussian matrix drawn
//! per call, scaling by `1/√k`. With `N` the total vertex count, the target
//! dimension is `⌈2 ln N / ε²⌉` (the empirical variant) or
//! `⌈4 ln N / (ε²/2 − ε³/3)⌉` (the classical bound). Pairwise distances
//! are preserved up to a factor of `1 ± ε` with high probability.

use log::info;
#[cfg(feature = "parallel")]
use rayon::iter::ParallelIterator;

use crate::config;
use crate::curve::{Curve, Curves};
use crate::iter_maybe_parallel;
use crate::point::Point;
use crate::random::GaussianGenerator;

/// Project a curve collection into a lower-dimensional space.
///
/// `empirical_k` selects the tighter empirical target dimension; the
/// classical bound is used otherwise. An empty collection is returned
/// unchanged; curve names are preserved.
pub fn jl_transform(input: &Curves, epsilon: f64, empirical_k: bool) -> Curves {
    if input.is_empty() {
        return input.clone();
    }

    let number_points: usize = input.iter().map(|curve| curve.len()).sum();
    let dimensions = input.dimensions();

    let epsilon_sqr = epsilon * epsilon;
    let epsilon_cub = epsilon_sqr * epsilon;
    let new_dimensions = if empirical_k {
        (2.0 * (number_points as f64).ln() / epsilon_sqr).ceil() as usize
    } else {
        (4.0 * (number_points as f64).ln() / (epsilon_sqr / 2.0 - epsilon_cub / 3.0)).ceil()
            as usize
    };

    if config::verbosity() >= 1 {
        info!(
            "projecting {} curves from {dimensions} to {new_dimensions} dimensions",
            input.len()
        );
    }

    let mut generator = GaussianGenerator::new(0.0, 1.0);
    let matrix: Vec<Vec<f64>> = (0..new_dimensions)
        .map(|_| generator.get_n(dimensions))
        .collect();
    let scale = (new_dimensions as f64).sqrt();

    let curves: Vec<Curve> = {
        let matrix = &matrix;
        iter_maybe_parallel!(0..input.len())
            .map(|l| {
                let curve = &input[l];
                let points: Vec<Point> = curve
                    .iter()
                    .map(|point| {
                        let coordinates: Vec<f64> = matrix
                            .iter()
                            .map(|row| {
                                let mut projected = 0.0;
                                for (weight, coordinate) in
                                    row.iter().zip(point.coordinates().iter())
                                {
                                    projected += weight * coordinate;
                                }
                                projected / scale
                            })
                            .collect();
                        Point::new(coordinates)
                    })
                    .collect();
                Curve::with_name(points, curve.name().to_string())
                    .expect("projected points share the target dimension")
            })
            .collect()
    };

    curves.into_iter().collect()
}
