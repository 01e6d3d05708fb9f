//! Region allocation and arena-backed bounded sequences.
//!
//! Purpose
//! - `Arena`: one fixed byte buffer, bump cursor, explicit overflow policy.
//! - `Sequence<'a, T>`: fixed-capacity stack/array of plain-old-data values
//!   living in an arena (shared and borrowed, or private and owned).
//!
//! Ownership
//! - A sequence borrowing an arena carries the arena's lifetime, so it cannot
//!   outlive the buffer. Everything else about validity is generational: a
//!   `clear` or a cycling wrap turns older allocations stale, and every
//!   sequence access checks that before touching bytes.
//! - Arenas are single-threaded (`!Sync`); callers serialize access by
//!   construction.
//!
//! Element types are `bytemuck::Pod` so the byte buffer can be reinterpreted
//! without `unsafe`.

mod gap;
mod region;
mod sequence;

pub use region::{
    Allocation, Arena, ArenaCfg, OverflowPolicy, BASE_ALIGN, DEFAULT_ARENA_BYTES,
};
pub use sequence::Sequence;
