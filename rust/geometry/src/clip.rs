// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon clipping of building footprints against the playground boundary.
//!
//! Sutherland–Hodgman clipping, generalized to walk whatever boundary the
//! editor holds: each boundary edge defines a half-plane, and the subject is
//! successively cut down edge by edge. The boundary is normalized to
//! counter-clockwise winding first so "inside" is always the left half-plane.
//! The inside test is boundary-inclusive: a point exactly on a clip edge is
//! kept. An empty result is a legitimate outcome (subject fully outside),
//! not an error.

use crate::ring::Ring;
use nalgebra::Point2;

/// Cross-product magnitude below which two directions count as parallel.
const PARALLEL_EPS: f64 = 1e-12;

/// Intersect `subject` with the region bounded by `boundary`.
///
/// Returns the clipped boundary, following the subject's winding with
/// intersection points inserted at crossings, or an empty ring when the
/// subject lies entirely outside. Degenerate inputs (under 3 points on
/// either side) also clip to empty rather than erroring; the editor treats
/// both the same way.
pub fn clip(subject: &Ring, boundary: &Ring) -> Ring {
    if !subject.is_valid() || !boundary.is_valid() {
        return Ring::empty();
    }

    // Normalizing the winding keeps the half-plane sign test uniform for
    // boundaries drawn in either direction.
    let boundary = match boundary.to_ccw() {
        Ok(ring) => ring,
        Err(_) => return Ring::empty(),
    };

    let mut output: Vec<Point2<f64>> = subject.points().to_vec();

    for (edge_start, edge_end) in boundary.edges() {
        // A zero-length clip edge constrains nothing.
        if edge_start == edge_end {
            continue;
        }
        if output.is_empty() {
            break;
        }

        let input = std::mem::take(&mut output);
        let mut prev = input[input.len() - 1];

        for current in input {
            let current_inside = is_inside(edge_start, edge_end, current);
            let prev_inside = is_inside(edge_start, edge_end, prev);

            if current_inside {
                if !prev_inside {
                    if let Some(p) = line_intersection(prev, current, edge_start, edge_end) {
                        output.push(p);
                    }
                }
                output.push(current);
            } else if prev_inside {
                if let Some(p) = line_intersection(prev, current, edge_start, edge_end) {
                    output.push(p);
                }
            }
            prev = current;
        }
    }

    Ring::new(output)
}

/// Left-of-edge test for a CCW boundary, inclusive of the edge itself.
#[inline]
fn is_inside(edge_start: Point2<f64>, edge_end: Point2<f64>, p: Point2<f64>) -> bool {
    let edge = edge_end - edge_start;
    let to_point = p - edge_start;
    edge.x * to_point.y - edge.y * to_point.x >= 0.0
}

/// Intersection of the infinite lines through (a1, a2) and (b1, b2).
///
/// Standard 2x2 determinant formula; a zero determinant means the lines are
/// parallel and yields no point.
#[inline]
fn line_intersection(
    a1: Point2<f64>,
    a2: Point2<f64>,
    b1: Point2<f64>,
    b2: Point2<f64>,
) -> Option<Point2<f64>> {
    let da = a2 - a1;
    let db = b2 - b1;
    let det = da.x * db.y - da.y * db.x;
    if det.abs() < PARALLEL_EPS {
        return None;
    }
    let diff = b1 - a1;
    let t = (diff.x * db.y - diff.y * db.x) / det;
    Some(a1 + da * t)
}
