//! Points in d-dimensional Euclidean space and the geometric primitives
//! built on them.
//!
//! Everything the distance engines need lives here: componentwise vector
//! arithmetic, squared/Euclidean distances, the squared distance from a
//! point to a segment, and the ball/segment intersection interval that the
//! free-space diagram is assembled from.

use crate::interval::Interval;

/// A point in d-dimensional Euclidean space.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    coordinates: Vec<f64>,
}

/// An ordered sequence of points sharing a dimension.
pub type Points = Vec<Point>;

impl Point {
    /// Create a point from its coordinates.
    #[inline]
    pub fn new(coordinates: Vec<f64>) -> Self {
        Self { coordinates }
    }

    /// The origin of the d-dimensional space.
    #[inline]
    pub fn zero(dimensions: usize) -> Self {
        Self {
            coordinates: vec![0.0; dimensions],
        }
    }

    /// Number of coordinates.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.coordinates.len()
    }

    /// Coordinate slice.
    #[inline]
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: &Point) -> f64 {
        self.coordinates
            .iter()
            .zip(other.coordinates.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Squared Euclidean norm.
    #[inline]
    pub fn length_sqr(&self) -> f64 {
        self.coordinates.iter().map(|c| c * c).sum()
    }

    /// Euclidean norm.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length_sqr().sqrt()
    }

    /// Squared Euclidean distance to another point.
    #[inline]
    pub fn dist_sqr(&self, other: &Point) -> f64 {
        self.coordinates
            .iter()
            .zip(other.coordinates.iter())
            .map(|(a, b)| {
                let d = a - b;
                d * d
            })
            .sum()
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn dist(&self, other: &Point) -> f64 {
        self.dist_sqr(other).sqrt()
    }

    /// Squared distance from this point to the segment from `a` to `b`.
    ///
    /// Projects onto the segment's supporting line and clamps the parameter
    /// to [0, 1]; a degenerate segment falls back to the vertex distance.
    pub fn line_segment_dist_sqr(&self, a: &Point, b: &Point) -> f64 {
        let len_sqr = a.dist_sqr(b);
        if len_sqr == 0.0 {
            return self.dist_sqr(a);
        }
        let mut t = 0.0;
        for i in 0..self.coordinates.len() {
            t += (self.coordinates[i] - a.coordinates[i]) * (b.coordinates[i] - a.coordinates[i]);
        }
        t = (t / len_sqr).clamp(0.0, 1.0);
        let mut result = 0.0;
        for i in 0..self.coordinates.len() {
            let d = a.coordinates[i] + t * (b.coordinates[i] - a.coordinates[i])
                - self.coordinates[i];
            result += d * d;
        }
        result
    }

    /// Sub-interval of the segment from `a` to `b` lying within squared
    /// distance `distance_sqr` of this point.
    ///
    /// Solves `λ² + pλ + c = 0` for the segment parameter λ with
    /// `p = −2 ((b−a)·(q−a)) / ‖b−a‖²` and
    /// `c = (‖q−a‖² − r²) / ‖b−a‖²`, clamping the root pair to [0, 1]. A
    /// negative discriminant yields the empty interval; a degenerate
    /// segment yields [0, 1] or empty depending on the vertex distance.
    pub fn intersection_interval(&self, distance_sqr: f64, a: &Point, b: &Point) -> Interval {
        let len_sqr = a.dist_sqr(b);
        if len_sqr == 0.0 {
            return if self.dist_sqr(a) <= distance_sqr {
                Interval::new(0.0, 1.0)
            } else {
                Interval::empty()
            };
        }

        let mut dot = 0.0;
        for i in 0..self.coordinates.len() {
            dot +=
                (b.coordinates[i] - a.coordinates[i]) * (self.coordinates[i] - a.coordinates[i]);
        }
        let p = -2.0 * dot / len_sqr;
        let c = (self.dist_sqr(a) - distance_sqr) / len_sqr;

        let discriminant = p * p / 4.0 - c;
        if discriminant < 0.0 {
            return Interval::empty();
        }

        let root = discriminant.sqrt();
        let lambda1 = -p / 2.0 - root;
        let lambda2 = -p / 2.0 + root;

        Interval::new(lambda1.max(0.0), lambda2.min(1.0))
    }
}

impl std::ops::Index<usize> for Point {
    type Output = f64;

    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.coordinates[i]
    }
}

impl std::ops::IndexMut<usize> for Point {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.coordinates[i]
    }
}

impl std::ops::Add<&Point> for &Point {
    type Output = Point;

    fn add(self, other: &Point) -> Point {
        Point {
            coordinates: self
                .coordinates
                .iter()
                .zip(other.coordinates.iter())
                .map(|(a, b)| a + b)
                .collect(),
        }
    }
}

impl std::ops::Sub<&Point> for &Point {
    type Output = Point;

    fn sub(self, other: &Point) -> Point {
        Point {
            coordinates: self
                .coordinates
                .iter()
                .zip(other.coordinates.iter())
                .map(|(a, b)| a - b)
                .collect(),
        }
    }
}

impl std::ops::Mul<f64> for &Point {
    type Output = Point;

    fn mul(self, factor: f64) -> Point {
        Point {
            coordinates: self.coordinates.iter().map(|c| c * factor).collect(),
        }
    }
}

impl std::ops::Div<f64> for &Point {
    type Output = Point;

    fn div(self, divisor: f64) -> Point {
        Point {
            coordinates: self.coordinates.iter().map(|c| c / divisor).collect(),
        }
    }
}

impl std::ops::AddAssign<&Point> for Point {
    fn add_assign(&mut self, other: &Point) {
        for (a, b) in self.coordinates.iter_mut().zip(other.coordinates.iter()) {
            *a += b;
        }
    }
}

impl std::ops::SubAssign<&Point> for Point {
    fn sub_assign(&mut self, other: &Point) {
        for (a, b) in self.coordinates.iter_mut().zip(other.coordinates.iter()) {
            *a -= b;
        }
    }
}

impl std::ops::DivAssign<f64> for Point {
    fn div_assign(&mut self, divisor: f64) {
        for a in self.coordinates.iter_mut() {
            *a /= divisor;
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coordinates.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

/// Arithmetic mean of a point sequence.
///
/// An empty sequence yields the zero-dimensional point.
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::zero(0);
    }
    let mut result = Point::zero(points[0].dimensions());
    for point in points {
        result += point;
    }
    result /= points.len() as f64;
    result
}
