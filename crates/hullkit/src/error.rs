//! Error kinds for arenas, sequences and geometry.
//!
//! - `ArenaError`: overflow under the `Error` policy, unsupported alignment, and
//!   reads through an allocation that a `clear` or wrap has since invalidated.
//! - `SequenceError`: capacity/index violations (recoverable unless fail-fast).
//! - `GeomError`: degenerate geometric input plus the two storage errors above.

use thiserror::Error;

/// Arena allocation and access failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ArenaError {
    #[error("arena overflow: requested {requested} bytes at cursor {cursor}, capacity {capacity}")]
    Overflow {
        requested: usize,
        cursor: usize,
        capacity: usize,
    },
    #[error("alignment {align} exceeds the arena base alignment")]
    Unaligned { align: usize },
    #[error("stale allocation: generation {handle_generation}, arena is at {arena_generation}")]
    Stale {
        handle_generation: u64,
        arena_generation: u64,
    },
}

/// Bounded sequence failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("sequence capacity {capacity} exceeded")]
    CapacityExceeded { capacity: usize },
    #[error("index {index} out of bounds for count {count}")]
    IndexOutOfBounds { index: usize, count: usize },
    #[error("operation requires a non-empty sequence")]
    Empty,
    #[error(transparent)]
    Arena(#[from] ArenaError),
}

/// Why a geometric input was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Degeneracy {
    #[error("need at least {need} points, got {got}")]
    TooFewPoints { need: usize, got: usize },
    #[error("input contains non-finite coordinates")]
    NonFinite,
    #[error("input contains coincident points")]
    DuplicatePoints,
    #[error("all input points are collinear")]
    Collinear,
    #[error("input is empty")]
    EmptyInput,
    #[error("hull walk did not close after {steps} steps")]
    Unclosed { steps: usize },
    #[error("ray resolution must be finite and in (0, 1], got {0}")]
    Resolution(f64),
}

/// Geometry algorithm failures.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum GeomError {
    #[error("degenerate input: {0}")]
    DegenerateInput(Degeneracy),
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    #[error(transparent)]
    Arena(#[from] ArenaError),
}

impl From<Degeneracy> for GeomError {
    fn from(d: Degeneracy) -> Self {
        GeomError::DegenerateInput(d)
    }
}
