//! 2D computational geometry over arena sequences.
//!
//! Purpose
//! - Value types (`Point2`, `Edge`, `Circle`, `AxisAlignedRect`) and the
//!   orientation predicates everything else is built on.
//! - Convex hulls (`extreme_edges`, `jarvis_march`, `graham_scan`), the
//!   smallest enclosing disk, and ray casting.
//!
//! Conventions
//! - y-up; counter-clockwise is the positive orientation.
//! - Inputs and outputs are `Sequence`s; callers choose the arena results land
//!   in. Algorithms that sort do so in place on their input.
//! - Tolerances come from `GeomCfg`; there are no hidden epsilons.

mod disk;
mod hull;
mod predicates;
pub mod rand;
mod ray;
mod types;

pub use disk::{circle_through, enclosing_disk};
pub use hull::{extreme_edges, graham_scan, jarvis_march};
pub use predicates::{
    centroid, distance_to, edges_centroid, is_in_rectangle, is_in_triangle,
    is_in_triangle_strict, is_left, is_left_eps, is_left_of, orient, turn,
};
pub use ray::{cast_ray, cast_ray_exact, Collider};
pub use types::{
    AxisAlignedRect, Circle, Collision, Edge, GeomCfg, Point2, DEFAULT_RAY_RESOLUTION,
};

#[cfg(test)]
mod tests;
