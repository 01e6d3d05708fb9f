//! Orientation-based predicates.
//!
//! Everything here is built on one primitive, [`orient`], the 2D cross product
//! `(a - b) × (p - b)`. Its sign tells which side of the directed line
//! `b -> a` the point `p` is on (positive = left, y-up). Collinear inputs give
//! 0 and are never "left"; callers that care about near-zero cases pass an
//! epsilon through the `_eps` variants.

use super::types::{AxisAlignedRect, Point2};
use crate::arena::Sequence;
use crate::error::{Degeneracy, GeomError};

/// Euclidean distance.
#[inline]
pub fn distance_to(p: Point2, q: Point2) -> f64 {
    (q - p).norm()
}

/// Cross product `(a - b) × (p - b)`.
#[inline]
pub fn orient(p: Point2, a: Point2, b: Point2) -> f64 {
    let ab = a - b;
    let pb = p - b;
    ab.x * pb.y - ab.y * pb.x
}

/// Signed turn of the path `a -> b -> c` (positive = counter-clockwise).
#[inline]
pub fn turn(a: Point2, b: Point2, c: Point2) -> f64 {
    orient(c, b, a)
}

/// `p` strictly left of the directed line `b -> a`.
#[inline]
pub fn is_left(p: Point2, a: Point2, b: Point2) -> bool {
    orient(p, a, b) > 0.0
}

/// `is_left` with the cross product required to exceed `eps`.
#[inline]
pub fn is_left_eps(p: Point2, a: Point2, b: Point2, eps: f64) -> bool {
    orient(p, a, b) > eps
}

/// Two-argument orientation: the line through `q` is taken as `q -> p` itself,
/// so the cross product is `(p - q) × (p - q)`, identically zero.
#[inline]
pub fn is_left_of(p: Point2, q: Point2) -> bool {
    let d = p - q;
    d.x * d.y - d.y * d.x > 0.0
}

/// Triangle test composed from three two-argument orientation calls.
///
/// Each call degenerates (see [`is_left_of`]), so this reports `false` for
/// every input. Kept with that composition; use [`is_in_triangle_strict`] for
/// real containment.
#[inline]
pub fn is_in_triangle(p: Point2, q: Point2, r: Point2) -> bool {
    is_left_of(p, q) && is_left_of(q, r) && is_left_of(r, p)
}

/// `p` strictly inside triangle `abc`, either winding.
pub fn is_in_triangle_strict(p: Point2, a: Point2, b: Point2, c: Point2) -> bool {
    let (d1, d2, d3) = (turn(a, b, p), turn(b, c, p), turn(c, a, p));
    (d1 > 0.0 && d2 > 0.0 && d3 > 0.0) || (d1 < 0.0 && d2 < 0.0 && d3 < 0.0)
}

/// `p` strictly inside `rect`: left of all four edges walked with a
/// consistent winding.
pub fn is_in_rectangle(p: Point2, rect: &AxisAlignedRect) -> bool {
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.x + rect.width, rect.y + rect.height);
    is_left(p, Point2::new(x1, y0), Point2::new(x0, y0))
        && is_left(p, Point2::new(x1, y1), Point2::new(x1, y0))
        && is_left(p, Point2::new(x0, y0), Point2::new(x0, y1))
        && is_left(p, Point2::new(x0, y1), Point2::new(x1, y1))
}

/// Mean of the vertices.
pub fn centroid(points: &Sequence<'_, Point2>) -> Result<Point2, GeomError> {
    let items = points.as_slice()?;
    if items.is_empty() {
        return Err(Degeneracy::EmptyInput.into());
    }
    let sum = items
        .iter()
        .fold(nalgebra::Vector2::zeros(), |acc, p| acc + p.coords());
    Ok((sum / items.len() as f64).into())
}

/// Mean of the edge start points (for a closed ring: the vertex centroid).
pub fn edges_centroid(edges: &Sequence<'_, super::types::Edge>) -> Result<Point2, GeomError> {
    let items = edges.as_slice()?;
    if items.is_empty() {
        return Err(Degeneracy::EmptyInput.into());
    }
    let sum = items
        .iter()
        .fold(nalgebra::Vector2::zeros(), |acc, e| acc + e.p.coords());
    Ok((sum / items.len() as f64).into())
}
