//! Curated surface for the CLI and benches (UNSTABLE).
//!
//! Prefer these re-exports over deep module paths so callers survive
//! internal moves.

// Storage
pub use crate::arena::{
    Allocation, Arena, ArenaCfg, OverflowPolicy, Sequence, BASE_ALIGN, DEFAULT_ARENA_BYTES,
};
pub use crate::error::{ArenaError, Degeneracy, GeomError, SequenceError};
// 2D primitives and predicates
pub use crate::geom2::{
    centroid, distance_to, edges_centroid, is_in_rectangle, is_in_triangle_strict, is_left,
    orient, turn, AxisAlignedRect, Circle, Collision, Edge, GeomCfg, Point2,
    DEFAULT_RAY_RESOLUTION,
};
// Algorithms
pub use crate::geom2::{
    cast_ray, cast_ray_exact, circle_through, enclosing_disk, extreme_edges, graham_scan,
    jarvis_march, Collider,
};
// Seeded inputs
pub use crate::geom2::rand::{
    sample_points, sample_points_vec, Region as SampleRegion, ReplayToken, SampleCfg,
};
