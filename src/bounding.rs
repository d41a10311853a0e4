//! Approximate minimum enclosing balls.
//!
//! Ritter's two-pass construction: pick an arbitrary point x, take the
//! farthest point y from x, then the farthest point z from y, start from
//! the ball spanned by (y, z) and grow it in a single pass whenever a point
//! falls outside. The result encloses all points and its radius is within a
//! constant factor of the exact minimum enclosing ball; it is not the exact
//! optimum.

use crate::point::Point;

/// Compute an approximate minimum enclosing ball of a point set.
///
/// # Returns
/// The ball as a `(center, radius)` pair. An empty input yields the
/// zero-dimensional point with infinite radius; one and two points are
/// handled exactly.
pub fn bounding_sphere(points: &[Point]) -> (Point, f64) {
    if points.is_empty() {
        return (Point::zero(0), f64::INFINITY);
    }

    let x = &points[0];

    if points.len() < 2 {
        return (x.clone(), 0.0);
    }

    let mut max_dist = 0.0;
    let mut y = x;
    for point in points {
        let dist = x.dist_sqr(point);
        if dist > max_dist {
            y = point;
            max_dist = dist;
        }
    }

    if points.len() < 3 {
        return (&(x + y) / 2.0, x.dist(y) / 2.0);
    }

    max_dist = 0.0;
    let mut z = y;
    for point in points {
        let dist = y.dist_sqr(point);
        if dist > max_dist {
            z = point;
            max_dist = dist;
        }
    }

    let mut center = &(y + z) / 2.0;
    let mut radius = y.dist(z) / 2.0;

    // Growth pass: any point outside the current ball pushes the center
    // toward it and enlarges the radius to cover both extremes.
    for point in points {
        let dist = center.dist(point);
        if dist > radius {
            radius = (radius + dist) / 2.0;
            let shifted = &(&center * radius) + &(point * (dist - radius));
            center = &shifted / dist;
        }
    }

    (center, radius)
}
