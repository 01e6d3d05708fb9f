//! Plain 2D value types and tolerances.
//!
//! - `GeomCfg`: centralizes epsilons and the default ray resolution.
//! - `Point2`, `Edge`, `Circle`, `AxisAlignedRect`: `Pod` so they can live in
//!   arena sequences; arithmetic goes through `nalgebra::Vector2`.
//! - `Collision<S>`: ray-cast result record.

use bytemuck::{Pod, Zeroable};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::predicates::is_left;

/// Default ray-march step as a fraction of the segment.
pub const DEFAULT_RAY_RESOLUTION: f64 = 0.01;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Orientation tests report "left" only for cross products above this.
    pub eps_orient: f64,
    /// Hulls widen `eps_orient` to this fraction of the squared extent of
    /// their input, so near-collinear points are classified the same way by
    /// every algorithm whatever the coordinate scale.
    pub eps_orient_rel: f64,
    /// Slack for containment checks (point in disk, point in hull).
    pub eps_contain: f64,
    /// Below this |det| a 3-point circumcircle is treated as degenerate.
    pub eps_det: f64,
    pub ray_resolution: f64,
    /// Seed for shuffling enclosing-disk input; `None` keeps input order.
    pub shuffle_seed: Option<u64>,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_orient: 0.0,
            eps_orient_rel: 1e-12,
            eps_contain: 1e-9,
            eps_det: 1e-12,
            ray_resolution: DEFAULT_RAY_RESOLUTION,
            shuffle_seed: Some(0x5eed),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
    #[inline]
    pub fn coords(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
    /// `self + t (to - self)`.
    #[inline]
    pub fn lerp(self, to: Point2, t: f64) -> Point2 {
        (self.coords() + (to - self) * t).into()
    }
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Vector2<f64>> for Point2 {
    #[inline]
    fn from(v: Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl std::ops::Sub for Point2 {
    type Output = Vector2<f64>;
    #[inline]
    fn sub(self, rhs: Point2) -> Vector2<f64> {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add<Vector2<f64>> for Point2 {
    type Output = Point2;
    #[inline]
    fn add(self, rhs: Vector2<f64>) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Directed segment `p -> q`. Direction matters for hull assembly and angles.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Edge {
    pub p: Point2,
    pub q: Point2,
}

impl Edge {
    #[inline]
    pub const fn new(p: Point2, q: Point2) -> Self {
        Self { p, q }
    }
    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        self.q - self.p
    }
    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }
    #[inline]
    pub fn reversed(&self) -> Edge {
        Edge::new(self.q, self.p)
    }
    /// Heading `atan2(dy, dx)` in `(-π, π]`.
    #[inline]
    pub fn heading(&self) -> f64 {
        let d = self.direction();
        d.y.atan2(d.x)
    }

    /// Signed heading difference `other - self`, in `(-2π, 2π)`.
    #[inline]
    pub fn angle_to(&self, other: &Edge) -> f64 {
        other.heading() - self.heading()
    }

    /// `angle_to` normalized into `[0, 2π)`: the counter-clockwise turn from
    /// `self`'s heading to `other`'s.
    #[inline]
    pub fn turn_to(&self, other: &Edge) -> f64 {
        let a = self.angle_to(other);
        if a < 0.0 {
            a + std::f64::consts::TAU
        } else {
            a
        }
    }

    /// Proper crossing test: each segment's endpoints lie on different sides
    /// of the other's supporting line.
    pub fn intersects(&self, other: &Edge) -> bool {
        is_left(other.p, self.p, self.q) != is_left(other.q, self.p, self.q)
            && is_left(self.p, other.p, other.q) != is_left(self.q, other.p, other.q)
    }
}

/// Circle; `r = -1` is the empty sentinel.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl Circle {
    pub const EMPTY: Circle = Circle {
        x: 0.0,
        y: 0.0,
        r: -1.0,
    };

    #[inline]
    pub const fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }
    #[inline]
    pub fn at(center: Point2, r: f64) -> Self {
        Self::new(center.x, center.y, r)
    }
    #[inline]
    pub fn center(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.r < 0.0
    }
    /// `|p - center| <= r + eps`; never true for the empty circle.
    #[inline]
    pub fn contains(&self, p: Point2, eps: f64) -> bool {
        !self.is_empty() && (p - self.center()).norm() <= self.r + eps
    }
    /// Open-disk overlap: centre distance below the radius sum.
    #[inline]
    pub fn intersects(&self, other: &Circle) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && (other.center() - self.center()).norm() < self.r + other.r
    }
}

impl Default for Circle {
    fn default() -> Self {
        Circle::EMPTY
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct AxisAlignedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl AxisAlignedRect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
    #[inline]
    pub fn min(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
    #[inline]
    pub fn max(&self) -> Point2 {
        Point2::new(self.x + self.width, self.y + self.height)
    }
    /// Corners counter-clockwise from `min` (y-up).
    pub fn corners(&self) -> [Point2; 4] {
        let (lo, hi) = (self.min(), self.max());
        [
            lo,
            Point2::new(hi.x, lo.y),
            hi,
            Point2::new(lo.x, hi.y),
        ]
    }
    /// Strict interior test.
    #[inline]
    pub fn contains(&self, p: Point2) -> bool {
        super::predicates::is_in_rectangle(p, self)
    }
    /// Positive-area overlap.
    #[inline]
    pub fn intersects(&self, other: &AxisAlignedRect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
    pub fn overlap(&self, other: &AxisAlignedRect) -> Option<AxisAlignedRect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Some(AxisAlignedRect::new(
            x,
            y,
            (self.x + self.width).min(other.x + other.width) - x,
            (self.y + self.height).min(other.y + other.height) - y,
        ))
    }
    #[inline]
    pub fn overlap_area(&self, other: &AxisAlignedRect) -> f64 {
        self.overlap(other).map_or(0.0, |o| o.width * o.height)
    }
}

/// Result of a ray cast. `point` and `shape` are meaningful only if `hit`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Collision<S> {
    pub hit: bool,
    pub point: Point2,
    pub shape: S,
}

impl<S: Default> Collision<S> {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Point2::default(),
            shape: S::default(),
        }
    }
}

impl<S> Collision<S> {
    #[inline]
    pub fn hit(point: Point2, shape: S) -> Self {
        Self {
            hit: true,
            point,
            shape,
        }
    }
    /// `Some((point, shape))` on a hit.
    #[inline]
    pub fn as_hit(&self) -> Option<(Point2, &S)> {
        self.hit.then_some((self.point, &self.shape))
    }
}
