//! Curve simplification with vertices restricted to the input curve.
//!
//! The exact algorithm builds the shortcut graph, whose edge `(i, j)` is
//! weighted by the continuous Fréchet distance between the chord
//! `(C[i], C[j])` and the subcurve `C[i..j]`, and runs a dynamic program
//! over the number of used links. The approximate algorithms replace the
//! quadratic edge table with exponential doubling plus binary search on the
//! link length, and with an outer binary search on the error bound.

use log::{info, warn};
#[cfg(feature = "parallel")]
use rayon::iter::ParallelIterator;

use crate::config;
use crate::curve::Curve;
use crate::frechet;
use crate::iter_maybe_parallel;

/// Continuous Fréchet distance from the subcurve `C[i..j]` to its chord.
fn chord_error(curve: &Curve, i: usize, j: usize) -> f64 {
    let subcurve = curve.subcurve(i, j);
    let segment = chord(&subcurve);
    frechet::continuous_frechet(&subcurve, &segment).value
}

fn chord(curve: &Curve) -> Curve {
    Curve::new(vec![curve.front().clone(), curve.back().clone()])
        .expect("chord endpoints share the curve dimension")
}

/// The complete shortcut graph of a curve: an upper-triangular table of
/// chord errors for every vertex pair.
pub struct ShortcutGraph {
    curve: Curve,
    edges: Vec<Vec<f64>>,
}

impl ShortcutGraph {
    /// Build the edge table, one continuous Fréchet computation per vertex
    /// pair `(i, j)` with `i < j`.
    pub fn new(curve: &Curve) -> Self {
        let complexity = curve.len();
        let pairs: Vec<(usize, usize)> = (0..complexity.saturating_sub(1))
            .flat_map(|i| ((i + 1)..complexity).map(move |j| (i, j)))
            .collect();

        let weights: Vec<((usize, usize), f64)> = iter_maybe_parallel!(pairs)
            .map(|(i, j)| ((i, j), chord_error(curve, i, j)))
            .collect();

        let mut edges = vec![vec![f64::INFINITY; complexity]; complexity];
        for ((i, j), weight) in weights {
            edges[i][j] = weight;
        }

        Self {
            curve: curve.clone(),
            edges,
        }
    }

    /// Chord error of the shortcut `(i, j)`.
    #[inline]
    pub fn edge(&self, i: usize, j: usize) -> f64 {
        self.edges[i][j]
    }

    /// Minimum-error simplification with at most `ell` vertices.
    ///
    /// Picks the vertex subset (always containing both endpoints) whose
    /// worst chord error is minimal among all subsets of `ell` vertices. A
    /// curve of complexity at most `ell` is returned unchanged; `ell == 2`
    /// yields exactly the endpoints.
    pub fn minimum_error_simplification(&self, ell: usize) -> Curve {
        let complexity = self.curve.len();
        if ell >= complexity {
            return self.curve.clone();
        }
        if ell <= 2 {
            if ell < 2 {
                warn!("simplification complexity must be at least 2, got {ell}");
            }
            return chord(&self.curve);
        }

        let links = ell - 1;
        let mut distances = vec![vec![f64::INFINITY; links]; complexity];
        let mut predecessors = vec![vec![0usize; links]; complexity];

        for j in 1..complexity {
            distances[j][0] = self.edges[0][j];
        }

        for k in 1..links {
            for j in 1..complexity {
                let mut best = f64::INFINITY;
                let mut best_i = 0;
                for i in 1..j {
                    let cost = distances[i][k - 1].max(self.edges[i][j]);
                    if cost < best {
                        best = cost;
                        best_i = i;
                    }
                }
                distances[j][k] = best;
                predecessors[j][k] = best_i;
            }
        }

        let mut vertices = Vec::with_capacity(ell);
        let mut j = complexity - 1;
        for k in (0..links).rev() {
            vertices.push(self.curve[j].clone());
            j = predecessors[j][k];
        }
        vertices.push(self.curve[0].clone());
        vertices.reverse();

        Curve::with_name(vertices, self.curve.name().to_string())
            .expect("simplification vertices share the curve dimension")
    }
}

/// Minimum-error simplification with at most `ell` vertices, computed
/// exactly through the shortcut graph.
pub fn minimum_error_simplification(curve: &Curve, ell: usize) -> Curve {
    if curve.len() < 2 {
        warn!(
            "cannot simplify curve of complexity {}, returning it unchanged",
            curve.len()
        );
        return curve.clone();
    }
    if ell >= curve.len() {
        return curve.clone();
    }
    if config::verbosity() >= 1 {
        info!(
            "simplifying curve of complexity {} to {ell} vertices",
            curve.len()
        );
    }
    ShortcutGraph::new(curve).minimum_error_simplification(ell)
}

/// Fewest-vertex simplification with chord error at most `epsilon`.
///
/// Greedy per anchor: double the shortcut length until the chord error
/// exceeds `epsilon`, then binary-search the largest feasible length. The
/// number of continuous Fréchet calls is linear in the output size times
/// the logarithm of the input size.
pub fn approximate_minimum_link_simplification(curve: &Curve, epsilon: f64) -> Curve {
    if curve.len() < 2 {
        warn!(
            "cannot simplify curve of complexity {}, returning it unchanged",
            curve.len()
        );
        return curve.clone();
    }

    let complexity = curve.len();
    let mut vertices = vec![curve[0].clone()];
    let mut i = 0;

    while i < complexity - 1 {
        // Exponential doubling until the chord breaks or the curve ends.
        let mut j = 0u32;
        loop {
            j += 1;
            let offset = 1usize << j;
            if i + offset >= complexity || chord_error(curve, i, i + offset) > epsilon {
                break;
            }
        }

        // Largest feasible offset within [2^(j-1), 2^j]; offset 1 is a
        // plain segment and always feasible, so the anchor advances.
        let mut low = 1usize << (j - 1);
        let mut high = (1usize << j).min(complexity - 1 - i);
        while low < high {
            let mid = (low + high + 1) / 2;
            if chord_error(curve, i, i + mid) <= epsilon {
                low = mid;
            } else {
                high = mid - 1;
            }
        }

        i += low;
        vertices.push(curve[i].clone());
    }

    Curve::with_name(vertices, curve.name().to_string())
        .expect("simplification vertices share the curve dimension")
}

/// Minimum-error simplification with exactly `ell` vertices, approximated
/// by binary search on the error bound.
///
/// The upper bound starts one above the discrete Fréchet distance to the
/// chord and doubles until feasible; the search then narrows the error down
/// to the configured continuous Fréchet tolerance. A result shorter than
/// `ell` is padded by repeating the last vertex.
pub fn approximate_minimum_error_simplification(curve: &Curve, ell: usize) -> Curve {
    if curve.len() < 2 {
        warn!(
            "cannot simplify curve of complexity {}, returning it unchanged",
            curve.len()
        );
        return curve.clone();
    }

    let segment = chord(curve);
    if ell <= 2 {
        if ell < 2 {
            warn!("simplification complexity must be at least 2, got {ell}");
        }
        return segment;
    }

    let mut min_distance = 0.0;
    let mut max_distance = frechet::discrete_frechet(curve, &segment).value + 1.0;

    let mut best = approximate_minimum_link_simplification(curve, max_distance);
    while best.len() > ell {
        max_distance *= 2.0;
        best = approximate_minimum_link_simplification(curve, max_distance);
    }

    while max_distance - min_distance > config::continuous_frechet_error() {
        let mid_distance = (min_distance + max_distance) / 2.0;
        let candidate = approximate_minimum_link_simplification(curve, mid_distance);
        if candidate.len() > ell {
            min_distance = mid_distance;
        } else {
            best = candidate;
            max_distance = mid_distance;
        }
    }

    let mut vertices = best.vertices().to_vec();
    while vertices.len() < ell {
        vertices.push(vertices[vertices.len() - 1].clone());
    }

    Curve::with_name(vertices, curve.name().to_string())
        .expect("simplification vertices share the curve dimension")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    fn curve(rows: &[Vec<f64>]) -> Curve {
        Curve::from_coordinates(rows).unwrap()
    }

    fn collinear(n: usize) -> Curve {
        curve(
            &(0..n)
                .map(|i| vec![i as f64, 0.0])
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_collinear_to_two_vertices() {
        let c = collinear(5);
        let simplified = minimum_error_simplification(&c, 2);
        assert_eq!(simplified.len(), 2);
        assert_eq!(simplified.front(), &Point::new(vec![0.0, 0.0]));
        assert_eq!(simplified.back(), &Point::new(vec![4.0, 0.0]));
        // The collinear chord has zero error.
        assert!(chord_error(&c, 0, 4) < 1e-9);
    }

    #[test]
    fn test_complexity_at_most_ell_unchanged() {
        let c = curve(&[vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 0.0]]);
        assert_eq!(minimum_error_simplification(&c, 3), c);
        assert_eq!(minimum_error_simplification(&c, 7), c);
    }

    #[test]
    fn test_detour_to_two_vertices() {
        let c = curve(&[vec![0.0, 0.0], vec![2.0, 0.0], vec![2.0, 2.0]]);
        let simplified = minimum_error_simplification(&c, 2);
        assert_eq!(simplified.vertices(), &[
            Point::new(vec![0.0, 0.0]),
            Point::new(vec![2.0, 2.0]),
        ]);
    }

    #[test]
    fn test_exact_picks_best_interior_vertex() {
        // A spike at (2, 3) dominates every chord that skips it.
        let c = curve(&[
            vec![0.0, 0.0],
            vec![1.0, 0.1],
            vec![2.0, 3.0],
            vec![3.0, 0.1],
            vec![4.0, 0.0],
        ]);
        let simplified = minimum_error_simplification(&c, 3);
        assert_eq!(simplified.len(), 3);
        assert_eq!(simplified[1], Point::new(vec![2.0, 3.0]));
    }

    #[test]
    fn test_exact_error_monotone_in_ell() {
        let c = curve(&[
            vec![0.0, 0.0],
            vec![1.0, 1.0],
            vec![2.0, -1.0],
            vec![3.0, 1.5],
            vec![4.0, 0.0],
            vec![5.0, -0.5],
        ]);
        let graph = ShortcutGraph::new(&c);
        let mut previous = f64::INFINITY;
        for ell in 2..=5 {
            let simplified = graph.minimum_error_simplification(ell);
            let error = frechet::continuous_frechet(&c, &simplified).value;
            assert!(
                error <= previous + 0.05,
                "error {error} at ell {ell} above {previous}"
            );
            previous = error;
        }
    }

    #[test]
    fn test_minimum_link_zero_error_keeps_shape() {
        let c = collinear(9);
        let simplified = approximate_minimum_link_simplification(&c, 1e-9);
        // Collinear vertices: a single shortcut suffices.
        assert_eq!(simplified.len(), 2);
        assert_eq!(simplified.back(), &Point::new(vec![8.0, 0.0]));
    }

    #[test]
    fn test_minimum_link_respects_error_bound() {
        let c = curve(&[
            vec![0.0, 0.0],
            vec![1.0, 1.0],
            vec![2.0, 0.0],
            vec![3.0, 1.0],
            vec![4.0, 0.0],
            vec![5.0, 1.0],
            vec![6.0, 0.0],
        ]);
        let epsilon = 0.25;
        let simplified = approximate_minimum_link_simplification(&c, epsilon);
        // Every consecutive pair of retained vertices is a shortcut within
        // the error bound (retained vertices are a subset of the input).
        let mut anchor = 0;
        for vertex in simplified.iter().skip(1) {
            let next = (anchor + 1..c.len())
                .find(|&i| &c[i] == vertex)
                .expect("retained vertex comes from the input");
            assert!(chord_error(&c, anchor, next) <= epsilon + 1e-9);
            anchor = next;
        }
        assert_eq!(anchor, c.len() - 1);
    }

    #[test]
    fn test_approximate_minimum_error_padding() {
        let c = collinear(5);
        let simplified = approximate_minimum_error_simplification(&c, 4);
        // Two vertices suffice; the rest is padding with the last vertex.
        assert_eq!(simplified.len(), 4);
        assert_eq!(simplified[0], Point::new(vec![0.0, 0.0]));
        assert_eq!(simplified[3], Point::new(vec![4.0, 0.0]));
    }

    #[test]
    fn test_approximate_close_to_exact() {
        let c = curve(&[
            vec![0.0, 0.0],
            vec![1.0, 2.0],
            vec![2.0, -1.0],
            vec![3.0, 2.5],
            vec![4.0, 0.0],
            vec![5.0, 1.0],
            vec![6.0, 0.0],
        ]);
        let ell = 4;
        let exact = minimum_error_simplification(&c, ell);
        let approximate = approximate_minimum_error_simplification(&c, ell);
        let exact_error = frechet::continuous_frechet(&c, &exact).value;
        let approx_error = frechet::continuous_frechet(&c, &approximate).value;
        assert!(approximate.len() <= ell);
        // Within a constant factor of the exact error.
        assert!(
            approx_error <= 4.0 * exact_error + 0.05,
            "approximate error {approx_error} too far above exact {exact_error}"
        );
    }

    #[test]
    fn test_ell_two_approximate_is_chord() {
        let c = curve(&[vec![0.0, 0.0], vec![2.0, 0.0], vec![2.0, 2.0]]);
        let simplified = approximate_minimum_error_simplification(&c, 2);
        assert_eq!(simplified.vertices(), &[
            Point::new(vec![0.0, 0.0]),
            Point::new(vec![2.0, 2.0]),
        ]);
    }

    #[test]
    fn test_single_vertex_curve_unchanged() {
        let c = curve(&[vec![1.0, 1.0]]);
        assert_eq!(minimum_error_simplification(&c, 2).len(), 1);
        assert_eq!(approximate_minimum_link_simplification(&c, 0.1).len(), 1);
    }
}
