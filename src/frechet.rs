//! Continuous and discrete Fréchet distance engines.
//!
//! The continuous engine brackets the distance between a greedy upper bound
//! and a projective lower bound, then binary-searches the bracket deciding
//! feasibility of each candidate through a free-space diagram with
//! reachability propagation. The discrete engine is a bottom-up dynamic
//! program over vertex pairs. Both reject curves with fewer than two
//! vertices or mismatched dimensions by returning a NaN-valued result with
//! a warning.

use std::time::Instant;

use log::{debug, trace, warn};
#[cfg(feature = "parallel")]
use rayon::iter::ParallelIterator;

use crate::config;
use crate::curve::Curve;
use crate::helpers::round_to_implied_digits;
use crate::interval::Interval;
use crate::iter_maybe_parallel;
use crate::point::{Point, Points};

/// Result of a continuous Fréchet distance computation.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousDistance {
    /// The distance, up to the configured relative error. NaN on invalid
    /// input.
    pub value: f64,
    /// Wall-clock seconds spent computing the lower and upper bounds.
    pub time_bounds: f64,
    /// Wall-clock seconds spent in the parametric search.
    pub time_searches: f64,
    /// Number of feasibility decisions made by the parametric search.
    pub number_searches: usize,
}

impl ContinuousDistance {
    fn invalid() -> Self {
        Self {
            value: f64::NAN,
            time_bounds: 0.0,
            time_searches: 0.0,
            number_searches: 0,
        }
    }
}

/// Result of a discrete Fréchet distance computation.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteDistance {
    /// The distance. NaN on invalid input.
    pub value: f64,
    /// Wall-clock seconds spent in the dynamic program.
    pub time: f64,
}

fn check_input(curve1: &Curve, curve2: &Curve) -> bool {
    if curve1.len() < 2 || curve2.len() < 2 {
        warn!(
            "distance undefined for curves of complexity {} and {}",
            curve1.len(),
            curve2.len()
        );
        return false;
    }
    if curve1.dimensions() != curve2.dimensions() {
        warn!(
            "distance undefined for curves of dimensions {} and {}",
            curve1.dimensions(),
            curve2.dimensions()
        );
        return false;
    }
    true
}

/// Continuous Fréchet distance between two curves, up to the configured
/// relative error.
///
/// # Examples
///
/// ```
/// use curvedist_core::{continuous_frechet, Curve};
///
/// let p = Curve::from_coordinates(&[vec![0.0, 0.0], vec![1.0, 0.0]]).unwrap();
/// let q = Curve::from_coordinates(&[vec![0.0, 1.0], vec![1.0, 1.0]]).unwrap();
/// assert!((continuous_frechet(&p, &q).value - 1.0).abs() < 1e-9);
/// ```
pub fn continuous_frechet(curve1: &Curve, curve2: &Curve) -> ContinuousDistance {
    if !check_input(curve1, curve2) {
        return ContinuousDistance::invalid();
    }

    let start = Instant::now();
    let lb = projective_lower_bound(curve1, curve2);
    let ub = greedy_upper_bound(curve1, curve2).max(lb);
    let time_bounds = start.elapsed().as_secs_f64();

    if config::verbosity() >= 2 {
        debug!("continuous Fréchet bracketed in [{lb}, {ub}]");
    }

    let error = config::continuous_frechet_error();
    let start = Instant::now();
    let (value, number_searches, tolerance) = parametric_search(curve1, curve2, lb, ub, error);
    let time_searches = start.elapsed().as_secs_f64();

    let value = if config::continuous_frechet_rounding() {
        round_to_implied_digits(value, tolerance)
    } else {
        value
    };

    ContinuousDistance {
        value,
        time_bounds,
        time_searches,
        number_searches,
    }
}

/// Greedy upper bound on the continuous Fréchet distance.
///
/// Walks both curves simultaneously, always advancing the pointer pair with
/// the smallest squared distance, and tracks the maximum distance
/// witnessed.
pub fn greedy_upper_bound(curve1: &Curve, curve2: &Curve) -> f64 {
    let len1 = curve1.len();
    let len2 = curve2.len();
    let mut result: f64 = 0.0;
    let mut i = 0;
    let mut j = 0;

    while i < len1 - 1 && j < len2 - 1 {
        result = result.max(curve1[i].dist_sqr(&curve2[j]));

        let dist1 = curve1[i + 1].dist_sqr(&curve2[j]);
        let dist2 = curve1[i].dist_sqr(&curve2[j + 1]);
        let dist3 = curve1[i + 1].dist_sqr(&curve2[j + 1]);

        if dist1 <= dist2 && dist1 <= dist3 {
            i += 1;
        } else if dist2 <= dist1 && dist2 <= dist3 {
            j += 1;
        } else {
            i += 1;
            j += 1;
        }
    }

    while i < len1 - 1 {
        result = result.max(curve1[i].dist_sqr(&curve2[j]));
        i += 1;
    }
    while j < len2 - 1 {
        result = result.max(curve1[i].dist_sqr(&curve2[j]));
        j += 1;
    }
    result = result.max(curve1[len1 - 1].dist_sqr(&curve2[len2 - 1]));

    result.sqrt()
}

/// Projective lower bound on the continuous Fréchet distance.
///
/// Any matching must realize the endpoint-to-endpoint distances, and every
/// vertex must be matched to some point of the other curve, so the maximum
/// over all vertices of the minimum distance to the other curve's segments
/// is a valid lower bound. Degenerate segments contribute their vertex
/// distance.
pub fn projective_lower_bound(curve1: &Curve, curve2: &Curve) -> f64 {
    let len1 = curve1.len();
    let len2 = curve2.len();

    let endpoints = curve1[0]
        .dist_sqr(&curve2[0])
        .max(curve1[len1 - 1].dist_sqr(&curve2[len2 - 1]));

    let mins1: Vec<f64> = iter_maybe_parallel!(0..len1)
        .map(|i| {
            (0..len2 - 1)
                .map(|j| curve1[i].line_segment_dist_sqr(&curve2[j], &curve2[j + 1]))
                .fold(f64::INFINITY, f64::min)
        })
        .collect();
    let mins2: Vec<f64> = iter_maybe_parallel!(0..len2)
        .map(|j| {
            (0..len1 - 1)
                .map(|i| curve2[j].line_segment_dist_sqr(&curve1[i], &curve1[i + 1]))
                .fold(f64::INFINITY, f64::min)
        })
        .collect();

    let result = mins1
        .into_iter()
        .chain(mins2)
        .fold(endpoints, f64::max);
    result.sqrt()
}

/// Binary search on the candidate distance. Returns the value, the number
/// of feasibility decisions, and the achieved tolerance.
fn parametric_search(
    curve1: &Curve,
    curve2: &Curve,
    mut lb: f64,
    mut ub: f64,
    error: f64,
) -> (f64, usize, f64) {
    let mut number_searches = 0;
    let mut tolerance = (lb * error).max(f64::EPSILON);

    while ub - lb > tolerance {
        number_searches += 1;
        let split = (ub + lb) / 2.0;
        if is_within(split, curve1, curve2) {
            ub = split;
        } else {
            lb = split;
        }
        if config::verbosity() >= 3 {
            trace!("continuous Fréchet narrowed to [{lb}, {ub}]");
        }
        tolerance = (lb * error).max(f64::EPSILON);
    }

    ((ub + lb) / 2.0, number_searches, tolerance)
}

/// Decide whether the continuous Fréchet distance is at most `distance` by
/// propagating reachability through the free-space diagram.
fn is_within(distance: f64, curve1: &Curve, curve2: &Curve) -> bool {
    let len1 = curve1.len();
    let len2 = curve2.len();
    let dist_sqr = distance * distance;

    if curve1[0].dist_sqr(&curve2[0]) > dist_sqr
        || curve1[len1 - 1].dist_sqr(&curve2[len2 - 1]) > dist_sqr
    {
        return false;
    }

    // free1[j][i]: sub-interval of segment (P[i], P[i+1]) within reach of
    // Q[j]; free2[i][j]: symmetric.
    let free1: Vec<Vec<Interval>> = iter_maybe_parallel!(0..len2)
        .map(|j| {
            (0..len1)
                .map(|i| {
                    if i < len1 - 1 && j > 0 {
                        curve2[j].intersection_interval(dist_sqr, &curve1[i], &curve1[i + 1])
                    } else {
                        Interval::empty()
                    }
                })
                .collect()
        })
        .collect();
    let free2: Vec<Vec<Interval>> = iter_maybe_parallel!(0..len1)
        .map(|i| {
            (0..len2)
                .map(|j| {
                    if j < len2 - 1 && i > 0 {
                        curve1[i].intersection_interval(dist_sqr, &curve2[j], &curve2[j + 1])
                    } else {
                        Interval::empty()
                    }
                })
                .collect()
        })
        .collect();

    let mut reachable1 = vec![vec![f64::INFINITY; len2]; len1 - 1];
    let mut reachable2 = vec![vec![f64::INFINITY; len2 - 1]; len1];

    for i in 0..len1 - 1 {
        reachable1[i][0] = 0.0;
        if curve2[0].dist_sqr(&curve1[i + 1]) > dist_sqr {
            break;
        }
    }
    for j in 0..len2 - 1 {
        reachable2[0][j] = 0.0;
        if curve1[0].dist_sqr(&curve2[j + 1]) > dist_sqr {
            break;
        }
    }

    for i in 0..len1 {
        for j in 0..len2 {
            if i < len1 - 1 && j > 0 {
                let free = &free1[j][i];
                if !free.is_empty() {
                    if reachable2[i][j - 1].is_finite() {
                        reachable1[i][j] = free.begin();
                    } else if reachable1[i][j - 1] <= free.end() {
                        reachable1[i][j] = free.begin().max(reachable1[i][j - 1]);
                    }
                }
            }
            if j < len2 - 1 && i > 0 {
                let free = &free2[i][j];
                if !free.is_empty() {
                    if reachable1[i - 1][j].is_finite() {
                        reachable2[i][j] = free.begin();
                    } else if reachable2[i - 1][j] <= free.end() {
                        reachable2[i][j] = free.begin().max(reachable2[i - 1][j]);
                    }
                }
            }
        }
    }

    reachable1[len1 - 2][len2 - 1].is_finite()
}

/// Recover one matching point on `curve` per vertex of `center` at an
/// accepted distance.
///
/// Scans the free space of the accepted distance (inflated by the
/// configured relative error to absorb rounding) with a monotone column
/// pointer: each interior vertex is matched at the parameter where its row
/// first opens. Endpoints map to endpoints. A row that never opens falls
/// back to the nearest point on `curve`; this only occurs for degenerate
/// inputs.
pub fn vertices_matching_points(center: &Curve, curve: &Curve, distance: f64) -> Points {
    let n = center.len();
    let m = curve.len();

    if n < 2 || m < 2 {
        warn!(
            "matching points undefined for curves of complexity {n} and {m}, \
             falling back to nearest points"
        );
        return (0..n).map(|i| nearest_point(&center[i], curve)).collect();
    }

    let inflated = distance * (1.0 + config::continuous_frechet_error());
    let dist_sqr = inflated * inflated;

    let mut result = Points::with_capacity(n);
    result.push(curve[0].clone());

    let mut j = 0;
    for i in 1..n - 1 {
        let mut matched = None;
        loop {
            let free = center[i].intersection_interval(dist_sqr, &curve[j], &curve[j + 1]);
            if !free.is_empty() {
                let t = free.begin().clamp(0.0, 1.0);
                let step = &curve[j + 1] - &curve[j];
                matched = Some(&curve[j] + &(&step * t));
                break;
            }
            if j + 1 < m - 1 {
                j += 1;
            } else {
                break;
            }
        }
        result.push(matched.unwrap_or_else(|| nearest_point(&center[i], curve)));
    }

    result.push(curve[m - 1].clone());
    result
}

fn nearest_point(point: &Point, curve: &Curve) -> Point {
    let mut best = curve[0].clone();
    let mut best_dist = f64::INFINITY;
    for i in 0..curve.len() - 1 {
        let dist = point.line_segment_dist_sqr(&curve[i], &curve[i + 1]);
        if dist < best_dist {
            best_dist = dist;
            // Recompute the projection parameter for the winning segment.
            let len_sqr = curve[i].dist_sqr(&curve[i + 1]);
            if len_sqr == 0.0 {
                best = curve[i].clone();
            } else {
                let diff = point - &curve[i];
                let step = &curve[i + 1] - &curve[i];
                let t = (diff.dot(&step) / len_sqr).clamp(0.0, 1.0);
                best = &curve[i] + &(&step * t);
            }
        }
    }
    best
}

/// Discrete Fréchet distance between two curves.
pub fn discrete_frechet(curve1: &Curve, curve2: &Curve) -> DiscreteDistance {
    if !check_input(curve1, curve2) {
        return DiscreteDistance {
            value: f64::NAN,
            time: 0.0,
        };
    }

    let start = Instant::now();
    let table = discrete_table(curve1, curve2);
    let value = table[curve1.len() - 1][curve2.len() - 1].sqrt();
    let time = start.elapsed().as_secs_f64();

    if config::verbosity() >= 2 {
        debug!("discrete Fréchet distance is {value}");
    }

    DiscreteDistance { value, time }
}

fn discrete_table(curve1: &Curve, curve2: &Curve) -> Vec<Vec<f64>> {
    let n = curve1.len();
    let m = curve2.len();
    let mut table = vec![vec![0.0f64; m]; n];

    table[0][0] = curve1[0].dist_sqr(&curve2[0]);
    for i in 1..n {
        table[i][0] = table[i - 1][0].max(curve1[i].dist_sqr(&curve2[0]));
    }
    for j in 1..m {
        table[0][j] = table[0][j - 1].max(curve1[0].dist_sqr(&curve2[j]));
    }
    for i in 1..n {
        for j in 1..m {
            let reach = table[i - 1][j]
                .min(table[i - 1][j - 1])
                .min(table[i][j - 1]);
            table[i][j] = reach.max(curve1[i].dist_sqr(&curve2[j]));
        }
    }
    table
}

/// Vertex-to-vertex matching realizing the discrete Fréchet distance,
/// recovered by walking the dynamic program back from the last vertex
/// pair. Pairs are emitted front to back, starting at `(0, 0)`.
pub fn discrete_frechet_matching(curve1: &Curve, curve2: &Curve) -> Vec<(usize, usize)> {
    if curve1.len() < 2 || curve2.len() < 2 {
        warn!(
            "matching undefined for curves of complexity {} and {}",
            curve1.len(),
            curve2.len()
        );
        return Vec::new();
    }

    let table = discrete_table(curve1, curve2);
    let mut matching = Vec::new();
    let mut i = curve1.len() - 1;
    let mut j = curve2.len() - 1;
    matching.push((i, j));

    while i > 0 || j > 0 {
        let (pi, pj) = if i == 0 {
            (0, j - 1)
        } else if j == 0 {
            (i - 1, 0)
        } else {
            let diagonal = table[i - 1][j - 1];
            let up = table[i - 1][j];
            let left = table[i][j - 1];
            if diagonal <= up && diagonal <= left {
                (i - 1, j - 1)
            } else if up <= left {
                (i - 1, j)
            } else {
                (i, j - 1)
            }
        };
        i = pi;
        j = pj;
        matching.push((i, j));
    }

    matching.reverse();
    matching
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(rows: &[Vec<f64>]) -> Curve {
        Curve::from_coordinates(rows).unwrap()
    }

    fn parallel_segments() -> (Curve, Curve) {
        (
            curve(&[vec![0.0, 0.0], vec![1.0, 0.0]]),
            curve(&[vec![0.0, 1.0], vec![1.0, 1.0]]),
        )
    }

    #[test]
    fn test_parallel_segments() {
        let (p, q) = parallel_segments();
        let dist = continuous_frechet(&p, &q);
        assert!((dist.value - 1.0).abs() < 1e-12);
        assert_eq!(discrete_frechet(&p, &q).value, 1.0);
    }

    #[test]
    fn test_two_vertex_curves_reduce_to_endpoint_distances() {
        let p = curve(&[vec![0.0, 0.0], vec![4.0, 0.0]]);
        let q = curve(&[vec![0.0, 3.0], vec![4.0, 1.0]]);
        // For segments the distance is the max of the endpoint distances.
        let dist = continuous_frechet(&p, &q);
        assert!((dist.value - 3.0).abs() <= 3.0 * 0.01 + 1e-12);
    }

    #[test]
    fn test_detour_curve() {
        let p = curve(&[vec![0.0, 0.0], vec![2.0, 0.0], vec![2.0, 2.0]]);
        let q = curve(&[vec![0.0, 0.0], vec![2.0, 2.0]]);
        let dist = continuous_frechet(&p, &q);
        let expected = std::f64::consts::SQRT_2;
        assert!(
            (dist.value - expected).abs() <= expected * 0.011,
            "got {}",
            dist.value
        );
        assert!(dist.number_searches > 0);
    }

    #[test]
    fn test_symmetry() {
        let p = curve(&[vec![0.0, 0.0], vec![1.0, 2.0], vec![3.0, 1.0]]);
        let q = curve(&[vec![0.0, 1.0], vec![2.0, 2.0], vec![3.0, 0.0]]);
        let pq = continuous_frechet(&p, &q).value;
        let qp = continuous_frechet(&q, &p).value;
        assert!((pq - qp).abs() <= pq.max(qp) * 0.03);
    }

    #[test]
    fn test_identical_curves_zero() {
        let p = curve(&[vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 0.0]]);
        assert_eq!(continuous_frechet(&p, &p).value, 0.0);
        assert_eq!(discrete_frechet(&p, &p).value, 0.0);
    }

    #[test]
    fn test_bounds_bracket_value() {
        let p = curve(&[vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, -1.0], vec![4.0, 0.0]]);
        let q = curve(&[vec![0.0, 0.5], vec![2.0, 1.0], vec![4.0, -0.5]]);
        let lb = projective_lower_bound(&p, &q);
        let ub = greedy_upper_bound(&p, &q);
        let value = continuous_frechet(&p, &q).value;
        assert!(lb <= ub + 1e-12);
        assert!(value >= lb - lb * 0.02 - 1e-12);
        assert!(value <= ub + ub * 0.01 + 1e-12);
    }

    #[test]
    fn test_discrete_at_least_continuous() {
        let p = curve(&[vec![0.0, 0.0], vec![2.0, 0.0], vec![2.0, 2.0]]);
        let q = curve(&[vec![0.0, 0.0], vec![2.0, 2.0]]);
        let continuous = continuous_frechet(&p, &q).value;
        let discrete = discrete_frechet(&p, &q).value;
        assert!(discrete >= continuous - continuous * 0.02);
    }

    #[test]
    fn test_relative_tolerance_on_small_values() {
        // The tolerance is relative to the lower bound with a ULP floor,
        // so tiny distances keep their leading digits.
        let s = 1e-6;
        let p = curve(&[vec![0.0, 0.0], vec![2.0 * s, 0.0], vec![2.0 * s, 2.0 * s]]);
        let q = curve(&[vec![0.0, 0.0], vec![2.0 * s, 2.0 * s]]);
        let value = continuous_frechet(&p, &q).value;
        let expected = std::f64::consts::SQRT_2 * s;
        assert!(
            (value - expected).abs() <= expected * 0.011,
            "got {value}, expected {expected}"
        );
    }

    #[test]
    fn test_invalid_too_short() {
        let p = curve(&[vec![0.0, 0.0]]);
        let q = curve(&[vec![0.0, 1.0], vec![1.0, 1.0]]);
        assert!(continuous_frechet(&p, &q).value.is_nan());
        assert!(discrete_frechet(&p, &q).value.is_nan());
    }

    #[test]
    fn test_invalid_dimension_mismatch() {
        let p = curve(&[vec![0.0, 0.0], vec![1.0, 0.0]]);
        let q = curve(&[vec![0.0, 0.0, 0.0], vec![1.0, 0.0, 0.0]]);
        assert!(continuous_frechet(&p, &q).value.is_nan());
        assert!(discrete_frechet(&p, &q).value.is_nan());
    }

    #[test]
    fn test_duplicate_consecutive_vertices() {
        let p = curve(&[vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 0.0], vec![2.0, 0.0]]);
        let q = curve(&[vec![0.0, 0.1], vec![2.0, 0.1]]);
        let dist = continuous_frechet(&p, &q);
        assert!(dist.value.is_finite());
        assert!((dist.value - 0.1).abs() <= 0.1 * 0.011);
    }

    #[test]
    fn test_projective_lower_bound_degenerate_segments() {
        // Zero-length segments of the other curve contribute their vertex
        // distance instead of a projection.
        let p = curve(&[vec![0.0, 0.0], vec![1.0, 1.0]]);
        let q = curve(&[vec![0.0, 0.5], vec![0.0, 0.5], vec![1.0, 1.5]]);
        let lb = projective_lower_bound(&p, &q);
        assert!(lb.is_finite());
        assert!((lb - 0.5).abs() < 1e-9, "lower bound {lb}");
    }

    #[test]
    fn test_greedy_upper_bound_covers_tails() {
        let p = curve(&[vec![0.0, 0.0], vec![0.0, 1.0], vec![0.0, 2.0], vec![0.0, 3.0]]);
        let q = curve(&[vec![0.0, 0.0], vec![0.0, 3.0]]);
        assert!(greedy_upper_bound(&p, &q) >= 0.0);
    }

    #[test]
    fn test_matching_points_identical_curves() {
        let p = curve(&[vec![0.0, 0.0], vec![1.0, 0.0], vec![2.0, 0.0]]);
        let matching = vertices_matching_points(&p, &p, 0.0);
        assert_eq!(matching.len(), 3);
        for (i, point) in matching.iter().enumerate() {
            assert!(point.dist(&p[i]) < 1e-9);
        }
    }

    #[test]
    fn test_matching_points_endpoints() {
        let p = curve(&[vec![0.0, 0.0], vec![2.0, 0.0], vec![2.0, 2.0]]);
        let q = curve(&[vec![0.0, 0.0], vec![2.0, 2.0]]);
        let d = continuous_frechet(&p, &q).value;
        let matching = vertices_matching_points(&p, &q, d);
        assert_eq!(matching.len(), 3);
        assert_eq!(&matching[0], q.front());
        assert_eq!(&matching[2], q.back());
        // The interior vertex is matched within distance d.
        assert!(matching[1].dist(&p[1]) <= d * (1.0 + 0.011) + 1e-9);
    }

    #[test]
    fn test_discrete_matching_monotone() {
        let p = curve(&[vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 0.0], vec![3.0, 1.0]]);
        let q = curve(&[vec![0.0, 0.0], vec![1.5, 1.0], vec![3.0, 1.0]]);
        let matching = discrete_frechet_matching(&p, &q);
        assert_eq!(matching.first(), Some(&(0, 0)));
        assert_eq!(matching.last(), Some(&(3, 2)));
        for pair in matching.windows(2) {
            assert!(pair[1].0 >= pair[0].0);
            assert!(pair[1].1 >= pair[0].1);
            assert!(pair[1].0 - pair[0].0 <= 1);
            assert!(pair[1].1 - pair[0].1 <= 1);
        }
    }

    #[test]
    fn test_search_statistics_populated() {
        let p = curve(&[vec![0.0, 0.0], vec![2.0, 0.0], vec![2.0, 2.0]]);
        let q = curve(&[vec![0.0, 0.0], vec![2.0, 2.0]]);
        let dist = continuous_frechet(&p, &q);
        assert!(dist.time_bounds >= 0.0);
        assert!(dist.time_searches >= 0.0);
        assert!(dist.number_searches > 0);
    }
}
