//! Ray casting against colliders.
//!
//! `cast_ray` marches sample points along `from -> to` in steps of
//! `resolution` (a fraction of the segment) and reports the first sample that
//! falls strictly inside a collider. It is approximate: a hit point is up to
//! `resolution * |to - from|` past the true boundary, and colliders thinner
//! than one step can be skipped entirely. Smaller resolution costs
//! proportionally more samples.
//!
//! `cast_ray_exact` is the closed-form alternative for rectangles.

use bytemuck::Pod;
use nalgebra::Vector2;

use super::predicates::is_in_rectangle;
use super::types::{AxisAlignedRect, Circle, Collision, Point2};
use crate::arena::Sequence;
use crate::error::{Degeneracy, GeomError};

/// A shape a ray sample can land in.
pub trait Collider: Pod + Default {
    fn contains_point(&self, p: Point2) -> bool;
}

impl Collider for AxisAlignedRect {
    #[inline]
    fn contains_point(&self, p: Point2) -> bool {
        is_in_rectangle(p, self)
    }
}

impl Collider for Circle {
    #[inline]
    fn contains_point(&self, p: Point2) -> bool {
        !self.is_empty() && (p - self.center()).norm() < self.r
    }
}

/// First sampled hit along `from -> to`, scanning colliders in order per step.
pub fn cast_ray<S: Collider>(
    from: Point2,
    to: Point2,
    colliders: &Sequence<'_, S>,
    resolution: f64,
) -> Result<Collision<S>, GeomError> {
    if !(resolution.is_finite() && resolution > 0.0 && resolution <= 1.0) {
        return Err(Degeneracy::Resolution(resolution).into());
    }
    let shapes = colliders.as_slice()?;
    // t = k * resolution rather than a running sum, so the sample grid does
    // not drift with accumulated rounding.
    let mut k = 0u64;
    loop {
        let t = k as f64 * resolution;
        if t >= 1.0 {
            break;
        }
        let sample = from.lerp(to, t);
        if let Some(shape) = shapes.iter().find(|s| s.contains_point(sample)) {
            tracing::trace!(t, x = sample.x, y = sample.y, "ray hit");
            return Ok(Collision::hit(sample, *shape));
        }
        k += 1;
    }
    Ok(Collision::miss())
}

/// Nearest entry point of the segment into any rectangle (closed boxes, slab
/// method). A segment starting inside a rectangle hits at `from`.
pub fn cast_ray_exact(
    from: Point2,
    to: Point2,
    colliders: &Sequence<'_, AxisAlignedRect>,
) -> Result<Collision<AxisAlignedRect>, GeomError> {
    let d = to - from;
    let mut best: Option<(f64, AxisAlignedRect)> = None;
    for rect in colliders.as_slice()?.iter() {
        if let Some(t) = segment_entry(from, d, rect) {
            if best.map_or(true, |(bt, _)| t < bt) {
                best = Some((t, *rect));
            }
        }
    }
    Ok(match best {
        Some((t, rect)) => Collision::hit(from + d * t, rect),
        None => Collision::miss(),
    })
}

fn segment_entry(from: Point2, d: Vector2<f64>, rect: &AxisAlignedRect) -> Option<f64> {
    let (lo, hi) = (rect.min(), rect.max());
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (o, dir, min, max) in [(from.x, d.x, lo.x, hi.x), (from.y, d.y, lo.y, hi.y)] {
        if dir == 0.0 {
            if o < min || o > max {
                return None;
            }
            continue;
        }
        let (a, b) = ((min - o) / dir, (max - o) / dir);
        let (a, b) = if a > b { (b, a) } else { (a, b) };
        t0 = t0.max(a);
        t1 = t1.min(b);
        if t0 > t1 {
            return None;
        }
    }
    Some(t0)
}
