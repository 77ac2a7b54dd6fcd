// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon ring value type and metric predicates.
//!
//! A [`Ring`] is an ordered, implicitly closed polygon boundary: the last
//! point connects back to the first, with no duplicate closing point stored.
//! Three points are the minimum for a valid boundary; anything shorter is
//! degenerate and rejected by the area computation.

use crate::error::{Error, Result};
use nalgebra::Point2;

/// Minimum number of points for a valid polygon boundary.
pub const MIN_RING_POINTS: usize = 3;

/// An ordered, implicitly closed polygon boundary in planar space.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ring {
    points: Vec<Point2<f64>>,
}

impl Ring {
    /// Create a ring from an ordered point list.
    ///
    /// A trailing duplicate of the first point (the GeoJSON closing
    /// convention used by the drawing collaborator) is dropped.
    pub fn new(mut points: Vec<Point2<f64>>) -> Self {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self { points }
    }

    /// An empty ring, the result of clipping away the whole subject.
    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the ring has enough points to bound an area.
    pub fn is_valid(&self) -> bool {
        self.points.len() >= MIN_RING_POINTS
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point2<f64>> {
        self.points.iter()
    }

    /// Consecutive point pairs, wrapping from the last point to the first.
    pub fn edges(&self) -> impl Iterator<Item = (Point2<f64>, Point2<f64>)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Shoelace sum over the closed boundary.
    ///
    /// Positive for counter-clockwise winding, negative for clockwise.
    /// Callers wanting a physical area take the absolute value.
    pub fn signed_area(&self) -> Result<f64> {
        if !self.is_valid() {
            return Err(Error::DegenerateRing(self.points.len()));
        }
        let mut sum = 0.0;
        for (a, b) in self.edges() {
            sum += a.x * b.y - a.y * b.x;
        }
        Ok(sum / 2.0)
    }

    /// Unsigned enclosed area.
    pub fn area(&self) -> Result<f64> {
        Ok(self.signed_area()?.abs())
    }

    pub fn is_ccw(&self) -> Result<bool> {
        Ok(self.signed_area()? >= 0.0)
    }

    /// Return the same boundary with counter-clockwise winding.
    pub fn to_ccw(&self) -> Result<Ring> {
        if self.is_ccw()? {
            Ok(self.clone())
        } else {
            Ok(Ring {
                points: self.points.iter().rev().cloned().collect(),
            })
        }
    }

    /// Ray-casting parity test.
    ///
    /// Casts a horizontal ray towards +X and counts edge crossings; an odd
    /// count means inside. Points exactly on an edge get no guaranteed
    /// classification (the standard ray-casting limitation); use
    /// [`Self::contains_with_tolerance`] where boundary inclusion matters.
    pub fn contains(&self, point: Point2<f64>) -> bool {
        if !self.is_valid() {
            return false;
        }
        let mut inside = false;
        let n = self.points.len();
        let mut j = n - 1;
        for i in 0..n {
            let pi = self.points[i];
            let pj = self.points[j];
            if ((pi.y > point.y) != (pj.y > point.y))
                && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Boundary-inclusive containment: inside by parity, or within `eps`
    /// of some edge.
    pub fn contains_with_tolerance(&self, point: Point2<f64>, eps: f64) -> bool {
        self.contains(point) || self.distance_to_boundary(point) <= eps
    }

    /// Distance from a point to the nearest boundary segment.
    pub fn distance_to_boundary(&self, point: Point2<f64>) -> f64 {
        let mut best = f64::INFINITY;
        for (a, b) in self.edges() {
            best = best.min(segment_distance(point, a, b));
        }
        best
    }

    /// Axis-aligned bounding box, `None` for an empty ring.
    pub fn bounds(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let first = *self.points.first()?;
        let mut min = first;
        let mut max = first;
        for p in self.points.iter().skip(1) {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some((min, max))
    }
}

impl From<Vec<Point2<f64>>> for Ring {
    fn from(points: Vec<Point2<f64>>) -> Self {
        Ring::new(points)
    }
}

impl FromIterator<Point2<f64>> for Ring {
    fn from_iter<I: IntoIterator<Item = Point2<f64>>>(iter: I) -> Self {
        Ring::new(iter.into_iter().collect())
    }
}

fn segment_distance(p: Point2<f64>, a: Point2<f64>, b: Point2<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(size: f64) -> Ring {
        Ring::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ])
    }

    #[test]
    fn test_signed_area_ccw() {
        assert_relative_eq!(square(1.0).signed_area().unwrap(), 1.0);
    }

    #[test]
    fn test_signed_area_cw() {
        let cw = Ring::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
        ]);
        assert_relative_eq!(cw.signed_area().unwrap(), -1.0);
    }

    #[test]
    fn test_area_invariant_under_reversal() {
        let ring = square(10.0);
        let reversed: Ring = ring.points().iter().rev().cloned().collect();
        assert_relative_eq!(ring.area().unwrap(), reversed.area().unwrap());
        assert_relative_eq!(
            ring.signed_area().unwrap(),
            -reversed.signed_area().unwrap()
        );
    }

    #[test]
    fn test_area_invariant_under_translation() {
        let ring = square(10.0);
        let shifted: Ring = ring
            .points()
            .iter()
            .map(|p| Point2::new(p.x + 123.4, p.y - 56.7))
            .collect();
        assert_relative_eq!(ring.area().unwrap(), shifted.area().unwrap(), epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_ring_fails() {
        let two: Ring = Ring::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
        assert!(matches!(
            two.signed_area().unwrap_err(),
            Error::DegenerateRing(2)
        ));
        assert!(matches!(
            Ring::empty().signed_area().unwrap_err(),
            Error::DegenerateRing(0)
        ));
    }

    #[test]
    fn test_closing_point_dropped() {
        let ring = Ring::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 0.0),
        ]);
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_to_ccw() {
        let cw = Ring::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
        ]);
        let ccw = cw.to_ccw().unwrap();
        assert!(ccw.is_ccw().unwrap());
        assert_relative_eq!(ccw.area().unwrap(), 1.0);
    }

    #[test]
    fn test_contains() {
        let ring = square(10.0);
        assert!(ring.contains(Point2::new(5.0, 5.0)));
        assert!(!ring.contains(Point2::new(15.0, 5.0)));
        assert!(!ring.contains(Point2::new(-1.0, 5.0)));
        assert!(!ring.contains(Point2::new(5.0, 10.5)));
    }

    #[test]
    fn test_contains_with_tolerance() {
        let ring = square(10.0);
        // on the boundary
        assert!(ring.contains_with_tolerance(Point2::new(10.0, 5.0), 1e-9));
        assert!(ring.contains_with_tolerance(Point2::new(0.0, 0.0), 1e-9));
        // just outside, beyond tolerance
        assert!(!ring.contains_with_tolerance(Point2::new(10.1, 5.0), 1e-9));
    }

    #[test]
    fn test_concave_contains() {
        // L-shape: notch cut from the top-right corner
        let ring = Ring::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 5.0),
            Point2::new(5.0, 5.0),
            Point2::new(5.0, 10.0),
            Point2::new(0.0, 10.0),
        ]);
        assert!(ring.contains(Point2::new(2.0, 8.0)));
        assert!(!ring.contains(Point2::new(8.0, 8.0)));
    }

    #[test]
    fn test_bounds() {
        let (min, max) = square(10.0).bounds().unwrap();
        assert_eq!(min, Point2::new(0.0, 0.0));
        assert_eq!(max, Point2::new(10.0, 10.0));
        assert!(Ring::empty().bounds().is_none());
    }
}
