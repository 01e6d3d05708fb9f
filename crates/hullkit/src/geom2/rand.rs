//! Seeded point clouds (replay tokens).
//!
//! Model
//! - A `SampleCfg` fixes the point count and the region to draw from: uniform
//!   in a rectangle, or on a circle's boundary (every point is a hull vertex).
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG,
//!   so draw `k` of a sweep can be reproduced without drawing `0..k`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::{AxisAlignedRect, Circle, Point2};
use crate::arena::{Arena, Sequence};
use crate::error::SequenceError;

/// Where sample points come from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Region {
    /// Uniform over the rectangle.
    Rect(AxisAlignedRect),
    /// Uniform angle on the circle's boundary.
    Ring(Circle),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleCfg {
    pub count: usize,
    pub region: Region,
}

impl Default for SampleCfg {
    fn default() -> Self {
        Self {
            count: 64,
            region: Region::Rect(AxisAlignedRect::new(0.0, 0.0, 1.0, 1.0)),
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }
    /// Token for the next draw of the same sweep.
    #[inline]
    pub fn next(self) -> Self {
        Self {
            index: self.index.wrapping_add(1),
            ..self
        }
    }
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

fn draw<R: Rng>(rng: &mut R, region: &Region) -> Point2 {
    match *region {
        Region::Rect(b) => Point2::new(
            b.x + rng.gen::<f64>() * b.width,
            b.y + rng.gen::<f64>() * b.height,
        ),
        Region::Ring(c) => {
            let th = rng.gen::<f64>() * std::f64::consts::TAU;
            Point2::new(c.x + c.r * th.cos(), c.y + c.r * th.sin())
        }
    }
}

/// Draw `cfg.count` points into a new sequence in `arena`.
pub fn sample_points<'a>(
    cfg: SampleCfg,
    tok: ReplayToken,
    arena: &'a Arena,
) -> Result<Sequence<'a, Point2>, SequenceError> {
    let mut rng = tok.to_std_rng();
    let mut pts = Sequence::new(cfg.count, arena)?;
    for _ in 0..cfg.count {
        pts.push(draw(&mut rng, &cfg.region))?;
    }
    Ok(pts)
}

/// Same draw as [`sample_points`], on the heap.
pub fn sample_points_vec(cfg: SampleCfg, tok: ReplayToken) -> Vec<Point2> {
    let mut rng = tok.to_std_rng();
    (0..cfg.count).map(|_| draw(&mut rng, &cfg.region)).collect()
}
