//! Polygonal curves and curve collections.
//!
//! A [`Curve`] is an ordered point sequence together with a name and an
//! inclusive subcurve window. The point storage is shared and immutable:
//! [`Curve::subcurve`] returns a by-value view onto the same storage with a
//! narrower window, so the simplification engine can hand subcurves to the
//! Fréchet engine without copying vertices. [`Curves`] collects curves of a
//! common dimension and caches the maximum complexity.

use std::sync::Arc;

use log::warn;

use crate::error::CurveError;
use crate::point::{Point, Points};

/// A polygonal curve: shared point storage, a name and a vertex window.
///
/// All indexed access, iteration, `front`/`back` and `len` address the
/// window `[vstart, vend]` (inclusive). Freshly constructed curves cover
/// the full sequence.
#[derive(Debug, Clone)]
pub struct Curve {
    points: Arc<Points>,
    name: String,
    vstart: usize,
    vend: usize,
}

impl Curve {
    /// Create a curve from a point sequence.
    ///
    /// # Errors
    /// `CurveError::Empty` for an empty sequence,
    /// `CurveError::DimensionMismatch` when the points disagree on their
    /// dimension.
    pub fn new(points: Points) -> Result<Self, CurveError> {
        Self::with_name(points, String::new())
    }

    /// Create a named curve from a point sequence.
    pub fn with_name(points: Points, name: String) -> Result<Self, CurveError> {
        if points.is_empty() {
            return Err(CurveError::Empty);
        }
        let dimensions = points[0].dimensions();
        for point in &points {
            if point.dimensions() != dimensions {
                return Err(CurveError::DimensionMismatch {
                    expected: dimensions,
                    got: point.dimensions(),
                });
            }
        }
        let vend = points.len() - 1;
        Ok(Self {
            points: Arc::new(points),
            name,
            vstart: 0,
            vend,
        })
    }

    /// Convenience constructor from rows of coordinates.
    pub fn from_coordinates(rows: &[Vec<f64>]) -> Result<Self, CurveError> {
        Self::new(rows.iter().map(|row| Point::new(row.clone())).collect())
    }

    /// Curve name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the curve.
    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Dimension of the ambient space.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.points[0].dimensions()
    }

    /// Number of vertices in the current window (the curve complexity).
    #[inline]
    pub fn len(&self) -> usize {
        self.vend - self.vstart + 1
    }

    /// Whether the window holds fewer than one vertex. Always false for a
    /// successfully constructed curve.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// First vertex of the window.
    #[inline]
    pub fn front(&self) -> &Point {
        &self.points[self.vstart]
    }

    /// Last vertex of the window.
    #[inline]
    pub fn back(&self) -> &Point {
        &self.points[self.vend]
    }

    /// Iterate over the vertices of the window.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points[self.vstart..=self.vend].iter()
    }

    /// The window as a point slice.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.points[self.vstart..=self.vend]
    }

    /// A by-value view restricted to vertices `i..=j` of the current
    /// window. Shares the point storage; the underlying sequence is never
    /// copied or mutated.
    ///
    /// # Panics
    /// Panics if `i > j` or `j` is out of the window.
    pub fn subcurve(&self, i: usize, j: usize) -> Curve {
        assert!(i <= j, "subcurve window inverted: {i} > {j}");
        assert!(
            self.vstart + j <= self.vend,
            "subcurve window end {j} out of range"
        );
        Curve {
            points: Arc::clone(&self.points),
            name: self.name.clone(),
            vstart: self.vstart + i,
            vend: self.vstart + j,
        }
    }

    /// Narrow the window in place to vertices `i..=j` of the underlying
    /// sequence.
    pub fn set_subcurve(&mut self, i: usize, j: usize) {
        assert!(i <= j, "subcurve window inverted: {i} > {j}");
        assert!(
            j < self.points.len(),
            "subcurve window end {j} out of range"
        );
        self.vstart = i;
        self.vend = j;
    }

    /// Restore the window to the full sequence.
    pub fn reset_subcurve(&mut self) {
        self.vstart = 0;
        self.vend = self.points.len() - 1;
    }

    /// Append a vertex.
    ///
    /// Copies the storage when it is shared and repositions the window to
    /// cover the full sequence ending at the new last vertex. Points of a
    /// mismatched dimension are rejected with a warning.
    pub fn push_back(&mut self, point: Point) {
        if point.dimensions() != self.dimensions() {
            warn!(
                "ignoring vertex of dimension {} appended to curve of dimension {}",
                point.dimensions(),
                self.dimensions()
            );
            return;
        }
        Arc::make_mut(&mut self.points).push(point);
        self.vstart = 0;
        self.vend = self.points.len() - 1;
    }
}

impl std::ops::Index<usize> for Curve {
    type Output = Point;

    #[inline]
    fn index(&self, i: usize) -> &Point {
        &self.points[self.vstart + i]
    }
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        self.vertices() == other.vertices()
    }
}

impl std::fmt::Display for Curve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, point) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{point}")?;
        }
        write!(f, "]")
    }
}

/// An ordered collection of curves sharing a dimension.
#[derive(Debug, Clone, Default)]
pub struct Curves {
    curves: Vec<Curve>,
    dimensions: usize,
    max_complexity: usize,
}

impl Curves {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a curve to the collection.
    ///
    /// # Errors
    /// `CurveError::DimensionMismatch` when the curve's dimension differs
    /// from the collection's; the collection is left unchanged.
    pub fn add(&mut self, curve: Curve) -> Result<(), CurveError> {
        if self.curves.is_empty() {
            self.dimensions = curve.dimensions();
        } else if curve.dimensions() != self.dimensions {
            warn!(
                "rejecting curve of dimension {} in collection of dimension {}",
                curve.dimensions(),
                self.dimensions
            );
            return Err(CurveError::DimensionMismatch {
                expected: self.dimensions,
                got: curve.dimensions(),
            });
        }
        self.max_complexity = self.max_complexity.max(curve.len());
        self.curves.push(curve);
        Ok(())
    }

    /// Number of curves.
    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Whether the collection holds no curves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Common dimension of the curves (0 while empty).
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Largest complexity among the curves.
    #[inline]
    pub fn max_complexity(&self) -> usize {
        self.max_complexity
    }

    /// Curve at index `i`.
    #[inline]
    pub fn get(&self, i: usize) -> &Curve {
        &self.curves[i]
    }

    /// Iterate over the curves.
    pub fn iter(&self) -> impl Iterator<Item = &Curve> {
        self.curves.iter()
    }
}

impl std::ops::Index<usize> for Curves {
    type Output = Curve;

    #[inline]
    fn index(&self, i: usize) -> &Curve {
        &self.curves[i]
    }
}

impl FromIterator<Curve> for Curves {
    /// Collect curves, skipping (with a warning) any of mismatched
    /// dimension.
    fn from_iter<T: IntoIterator<Item = Curve>>(iter: T) -> Self {
        let mut curves = Curves::new();
        for curve in iter {
            let _ = curves.add(curve);
        }
        curves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(rows: &[Vec<f64>]) -> Curve {
        Curve::from_coordinates(rows).unwrap()
    }

    #[test]
    fn test_construction() {
        let c = curve(&[vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0]]);
        assert_eq!(c.len(), 3);
        assert_eq!(c.dimensions(), 2);
        assert_eq!(c.front(), &Point::new(vec![0.0, 0.0]));
        assert_eq!(c.back(), &Point::new(vec![1.0, 1.0]));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(Curve::new(vec![]), Err(CurveError::Empty)));
    }

    #[test]
    fn test_mixed_dimensions_rejected() {
        let result = Curve::from_coordinates(&[vec![0.0, 0.0], vec![1.0]]);
        assert!(matches!(
            result,
            Err(CurveError::DimensionMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_subcurve_view() {
        let c = curve(&[
            vec![0.0],
            vec![1.0],
            vec![2.0],
            vec![3.0],
            vec![4.0],
        ]);
        let sub = c.subcurve(1, 3);
        assert_eq!(sub.len(), 3);
        assert_eq!(sub.front(), &Point::new(vec![1.0]));
        assert_eq!(sub.back(), &Point::new(vec![3.0]));
        assert_eq!(sub[1], Point::new(vec![2.0]));
        // The original window is untouched.
        assert_eq!(c.len(), 5);
    }

    #[test]
    fn test_nested_subcurve() {
        let c = curve(&[vec![0.0], vec![1.0], vec![2.0], vec![3.0], vec![4.0]]);
        let sub = c.subcurve(1, 4).subcurve(1, 2);
        assert_eq!(sub.vertices(), &[Point::new(vec![2.0]), Point::new(vec![3.0])]);
    }

    #[test]
    fn test_set_and_reset_subcurve() {
        let mut c = curve(&[vec![0.0], vec![1.0], vec![2.0]]);
        c.set_subcurve(1, 2);
        assert_eq!(c.len(), 2);
        assert_eq!(c.front(), &Point::new(vec![1.0]));
        c.reset_subcurve();
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn test_push_back_repositions_window() {
        let mut c = curve(&[vec![0.0], vec![1.0], vec![2.0]]);
        c.set_subcurve(0, 1);
        c.push_back(Point::new(vec![3.0]));
        assert_eq!(c.len(), 4);
        assert_eq!(c.back(), &Point::new(vec![3.0]));
    }

    #[test]
    fn test_push_back_does_not_alias_views() {
        let mut c = curve(&[vec![0.0], vec![1.0]]);
        let view = c.subcurve(0, 1);
        c.push_back(Point::new(vec![2.0]));
        // The earlier view still sees the original two vertices.
        assert_eq!(view.len(), 2);
        assert_eq!(view.back(), &Point::new(vec![1.0]));
    }

    #[test]
    fn test_push_back_dimension_mismatch_ignored() {
        let mut c = curve(&[vec![0.0, 0.0], vec![1.0, 1.0]]);
        c.push_back(Point::new(vec![1.0]));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_curves_add_enforces_dimension() {
        let mut curves = Curves::new();
        curves.add(curve(&[vec![0.0, 0.0], vec![1.0, 0.0]])).unwrap();
        let err = curves.add(curve(&[vec![0.0], vec![1.0]]));
        assert!(err.is_err());
        assert_eq!(curves.len(), 1);
        assert_eq!(curves.dimensions(), 2);
    }

    #[test]
    fn test_curves_max_complexity() {
        let mut curves = Curves::new();
        curves.add(curve(&[vec![0.0], vec![1.0]])).unwrap();
        curves
            .add(curve(&[vec![0.0], vec![1.0], vec![2.0], vec![3.0]]))
            .unwrap();
        assert_eq!(curves.max_complexity(), 4);
    }

    #[test]
    fn test_display() {
        let c = curve(&[vec![0.0, 0.0], vec![1.0, 2.0]]);
        assert_eq!(format!("{c}"), "[(0, 0), (1, 2)]");
    }
}
