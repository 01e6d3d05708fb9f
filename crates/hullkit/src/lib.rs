//! Arena-backed sequences and 2D computational geometry.
//!
//! Layout
//! - `arena`: fixed-capacity byte regions with an explicit overflow policy,
//!   and `Sequence<T>`, the bounded stack/array every algorithm reads and
//!   writes.
//! - `geom2`: points, edges, circles, rectangles; orientation predicates;
//!   convex hulls, smallest enclosing disk, ray casting.
//! - `error`: `thiserror` enums shared by both.
//!
//! API Policy
//! - `api` is the curated surface for the CLI and benches; `prelude` is the
//!   short list for quick imports. Module paths may move.

pub mod api;
pub mod arena;
pub mod error;
pub mod geom2;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use arena::{Arena, Sequence};
pub use error::{ArenaError, GeomError, SequenceError};
pub use geom2::GeomCfg;
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::arena::{Arena, ArenaCfg, OverflowPolicy, Sequence};
    pub use crate::error::{ArenaError, Degeneracy, GeomError, SequenceError};
    pub use crate::geom2::rand::{sample_points, Region, ReplayToken, SampleCfg};
    pub use crate::geom2::{
        cast_ray, enclosing_disk, extreme_edges, graham_scan, jarvis_march, AxisAlignedRect,
        Circle, Collision, Edge, GeomCfg, Point2,
    };
    pub use nalgebra::Vector2 as Vec2;
}
