//! Discrete dynamic time warping.
//!
//! Sums pointwise distances along an optimal monotone vertex-to-vertex
//! alignment and reconstructs the alignment itself from a predecessor
//! table. An optional contingency constraint caps the number of
//! consecutive stationary steps per axis, preventing degenerate matchings
//! that dwell on a single vertex.

use std::time::Instant;

use log::{debug, warn};

use crate::config;
use crate::curve::Curve;
use crate::point::{centroid, Points};

/// Result of a dynamic time warping computation.
#[derive(Debug, Clone, PartialEq)]
pub struct DtwDistance {
    /// Sum of pointwise distances along the optimal alignment. NaN on
    /// invalid input.
    pub value: f64,
    /// Wall-clock seconds spent in the dynamic program.
    pub time: f64,
    /// The optimal alignment as vertex index pairs, front to back,
    /// starting at `(0, 0)`.
    pub matching: Vec<(usize, usize)>,
}

const STEP_DIAGONAL: u8 = 0;
const STEP_UP: u8 = 1;
const STEP_LEFT: u8 = 2;

/// Dynamic time warping distance between two curves, with the optimal
/// warping matching.
///
/// With `dtw_contingency` enabled, consecutive stationary steps are capped
/// at `⌈√n⌉ + max(0, m − n + 1)` on the first curve's axis and
/// symmetrically on the second's; the diagonal step is always admissible
/// and resets both counters.
pub fn dtw(curve1: &Curve, curve2: &Curve) -> DtwDistance {
    if curve1.len() < 2 || curve2.len() < 2 || curve1.dimensions() != curve2.dimensions() {
        warn!(
            "dynamic time warping undefined for curves of complexity {} x {} and dimensions {} x {}",
            curve1.len(),
            curve2.len(),
            curve1.dimensions(),
            curve2.dimensions()
        );
        return DtwDistance {
            value: f64::NAN,
            time: 0.0,
            matching: Vec::new(),
        };
    }

    let start = Instant::now();
    let n = curve1.len();
    let m = curve2.len();
    let contingency = config::dtw_contingency();

    // Caps on consecutive stationary steps per axis.
    let cap1 = (n as f64).sqrt().ceil() as usize + m.saturating_sub(n) + usize::from(m >= n);
    let cap2 = (m as f64).sqrt().ceil() as usize + n.saturating_sub(m) + usize::from(n >= m);

    let mut table = vec![vec![f64::INFINITY; m + 1]; n + 1];
    let mut steps = vec![vec![STEP_DIAGONAL; m + 1]; n + 1];
    // Consecutive stationary steps along each axis on the optimal path
    // into a cell.
    let mut repeats1 = vec![vec![0usize; m + 1]; n + 1];
    let mut repeats2 = vec![vec![0usize; m + 1]; n + 1];

    table[0][0] = 0.0;

    for i in 1..=n {
        for j in 1..=m {
            let cost = curve1[i - 1].dist(&curve2[j - 1]);

            let mut best = f64::INFINITY;
            let mut step = STEP_DIAGONAL;
            let mut rep1 = 0;
            let mut rep2 = 0;

            // Diagonal advances both curves and resets both counters.
            if table[i - 1][j - 1] < best {
                best = table[i - 1][j - 1];
                step = STEP_DIAGONAL;
                rep1 = 0;
                rep2 = 0;
            }
            // Up advances the first curve only; the second stays put.
            if table[i - 1][j] < best && (!contingency || repeats2[i - 1][j] < cap2) {
                best = table[i - 1][j];
                step = STEP_UP;
                rep1 = 0;
                rep2 = repeats2[i - 1][j] + 1;
            }
            // Left advances the second curve only; the first stays put.
            if table[i][j - 1] < best && (!contingency || repeats1[i][j - 1] < cap1) {
                best = table[i][j - 1];
                step = STEP_LEFT;
                rep1 = repeats1[i][j - 1] + 1;
                rep2 = 0;
            }

            if best.is_finite() {
                table[i][j] = cost + best;
                steps[i][j] = step;
                repeats1[i][j] = rep1;
                repeats2[i][j] = rep2;
            }
        }
    }

    let value = table[n][m];

    let mut matching = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (n, m);
    while i > 1 || j > 1 {
        matching.push((i - 1, j - 1));
        match steps[i][j] {
            STEP_DIAGONAL => {
                i -= 1;
                j -= 1;
            }
            STEP_UP => i -= 1,
            _ => j -= 1,
        }
    }
    matching.push((0, 0));
    matching.reverse();

    let time = start.elapsed().as_secs_f64();

    if config::verbosity() >= 2 {
        debug!("dynamic time warping distance is {value}");
    }

    DtwDistance {
        value,
        time,
        matching,
    }
}

/// One matching point on `curve` per vertex of `center`, averaged over all
/// vertices of `curve` aligned to it by `matching`.
///
/// The matching is expected to pair indices of `center` with indices of
/// `curve`, as produced by [`dtw`]`(center, curve)`.
pub fn vertices_matching_points(
    center: &Curve,
    curve: &Curve,
    matching: &[(usize, usize)],
) -> Points {
    let mut buckets: Vec<Points> = vec![Points::new(); center.len()];
    for &(i, j) in matching {
        if i < center.len() && j < curve.len() {
            buckets[i].push(curve[j].clone());
        }
    }
    buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            if bucket.is_empty() {
                center[i].clone()
            } else {
                centroid(bucket)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(rows: &[Vec<f64>]) -> Curve {
        Curve::from_coordinates(rows).unwrap()
    }

    #[test]
    fn test_parallel_segments() {
        let p = curve(&[vec![0.0, 0.0], vec![1.0, 0.0]]);
        let q = curve(&[vec![0.0, 1.0], vec![1.0, 1.0]]);
        let dist = dtw(&p, &q);
        assert!((dist.value - 2.0).abs() < 1e-12);
        assert_eq!(dist.matching, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_identical_curves_zero() {
        let p = curve(&[vec![0.0], vec![1.0], vec![2.0], vec![3.0]]);
        let dist = dtw(&p, &p);
        assert!(dist.value.abs() < 1e-12);
        assert_eq!(dist.matching.len(), 4);
    }

    #[test]
    fn test_matching_monotone_and_complete() {
        let p = curve(&[vec![0.0], vec![1.0], vec![5.0], vec![6.0]]);
        let q = curve(&[vec![0.0], vec![1.0], vec![2.0], vec![5.0], vec![6.0]]);
        let dist = dtw(&p, &q);
        assert_eq!(dist.matching.first(), Some(&(0, 0)));
        assert_eq!(dist.matching.last(), Some(&(3, 4)));
        for pair in dist.matching.windows(2) {
            let di = pair[1].0 - pair[0].0;
            let dj = pair[1].1 - pair[0].1;
            assert!(di <= 1 && dj <= 1 && di + dj >= 1);
        }
        // Every vertex of both curves appears in the matching.
        for i in 0..p.len() {
            assert!(dist.matching.iter().any(|&(a, _)| a == i));
        }
        for j in 0..q.len() {
            assert!(dist.matching.iter().any(|&(_, b)| b == j));
        }
    }

    #[test]
    fn test_invalid_inputs() {
        let p = curve(&[vec![0.0]]);
        let q = curve(&[vec![0.0], vec![1.0]]);
        assert!(dtw(&p, &q).value.is_nan());
        let r = curve(&[vec![0.0, 0.0], vec![1.0, 0.0]]);
        assert!(dtw(&q, &r).value.is_nan());
    }

    #[test]
    fn test_contingency_caps_repeats() {
        // A flat curve against a wiggly one tempts the alignment to dwell
        // on single vertices.
        let n = 9;
        let p = curve(
            &(0..n)
                .map(|i| vec![i as f64, 0.0])
                .collect::<Vec<_>>(),
        );
        let q = curve(
            &(0..n)
                .map(|i| vec![i as f64, if i % 2 == 0 { 0.0 } else { 4.0 }])
                .collect::<Vec<_>>(),
        );

        config::set_dtw_contingency(true);
        let dist = dtw(&p, &q);
        config::set_dtw_contingency(false);

        let bound = (n as f64).sqrt().ceil() as usize + 1;
        let mut run1 = 0usize;
        let mut run2 = 0usize;
        for pair in dist.matching.windows(2) {
            if pair[1].0 == pair[0].0 {
                run1 += 1;
                assert!(run1 <= bound, "first-axis repeat run exceeded {bound}");
            } else {
                run1 = 0;
            }
            if pair[1].1 == pair[0].1 {
                run2 += 1;
                assert!(run2 <= bound, "second-axis repeat run exceeded {bound}");
            } else {
                run2 = 0;
            }
        }
        assert!(dist.value.is_finite());
    }

    #[test]
    fn test_contingency_never_disconnects() {
        let p = curve(&[vec![0.0], vec![0.0], vec![0.0]]);
        let q = curve(
            &(0..12)
                .map(|i| vec![i as f64])
                .collect::<Vec<_>>(),
        );
        config::set_dtw_contingency(true);
        let dist = dtw(&p, &q);
        config::set_dtw_contingency(false);
        assert!(dist.value.is_finite());
        assert_eq!(dist.matching.last(), Some(&(2, 11)));
    }

    #[test]
    fn test_vertices_matching_points_averages() {
        let center = curve(&[vec![0.0, 0.0], vec![2.0, 0.0]]);
        let other = curve(&[vec![0.0, 1.0], vec![1.0, 1.0], vec![2.0, 1.0]]);
        let dist = dtw(&center, &other);
        let points = vertices_matching_points(&center, &other, &dist.matching);
        assert_eq!(points.len(), 2);
        for point in &points {
            assert_eq!(point.dimensions(), 2);
            assert!((point[1] - 1.0).abs() < 1e-12);
        }
    }
}
