//! Experiment bodies behind the CLI subcommands.
//!
//! Each function samples its own input from a `ReplayToken`, so a run is
//! reproducible from the parameters recorded in its provenance sidecar.

use anyhow::{ensure, Context, Result};
use clap::ValueEnum;
use hullkit::api::{
    cast_ray, cast_ray_exact, enclosing_disk, extreme_edges, graham_scan, jarvis_march,
    sample_points, Arena, AxisAlignedRect, Circle, Collision, Edge, GeomCfg, GeomError, Point2,
    ReplayToken, SampleCfg, SampleRegion, Sequence,
};
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use std::time::Instant;

use crate::provenance::ensure_parent;

/// Side of the square sample points are drawn from.
pub const SAMPLE_SIDE: f64 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algo {
    ExtremeEdges,
    Jarvis,
    Graham,
}

impl Algo {
    pub fn run<'o>(
        self,
        points: &mut Sequence<'_, Point2>,
        out: &'o Arena,
        cfg: &GeomCfg,
    ) -> Result<Sequence<'o, Edge>, GeomError> {
        match self {
            Algo::ExtremeEdges => extreme_edges(points, out, cfg),
            Algo::Jarvis => jarvis_march(points, out, cfg),
            Algo::Graham => graham_scan(points, out, cfg),
        }
    }
}

fn square(count: usize) -> SampleCfg {
    SampleCfg {
        count,
        region: SampleRegion::Rect(AxisAlignedRect::new(0.0, 0.0, SAMPLE_SIDE, SAMPLE_SIDE)),
    }
}

/// Input points, hull stack and output edges of an `n`-point run.
fn run_arena(n: usize) -> Arena {
    let point = std::mem::size_of::<Point2>();
    let edge = std::mem::size_of::<Edge>();
    Arena::new(point * n + point * (n + 1) + edge * n)
}

#[derive(Debug, Serialize)]
pub struct HullReport {
    pub algo: Algo,
    pub points: Vec<Point2>,
    pub hull: Vec<Edge>,
}

pub fn hull(algo: Algo, count: usize, seed: u64, cfg: &GeomCfg) -> Result<HullReport> {
    let arena = run_arena(count);
    let mut pts = sample_points(square(count), ReplayToken::new(seed, 0), &arena)?;
    let points = pts.to_vec()?;
    let hull = algo.run(&mut pts, &arena, cfg)?.to_vec()?;
    tracing::info!(?algo, count, hull = hull.len(), "hull");
    Ok(HullReport { algo, points, hull })
}

#[derive(Debug, Serialize)]
pub struct DiskReport {
    pub points: Vec<Point2>,
    pub disk: Circle,
}

pub fn disk(count: usize, seed: u64, cfg: &GeomCfg) -> Result<DiskReport> {
    let arena = run_arena(count);
    let pts = sample_points(square(count), ReplayToken::new(seed, 0), &arena)?;
    let disk = enclosing_disk(&pts, &arena, cfg)?;
    tracing::info!(count, r = disk.r, "disk");
    Ok(DiskReport {
        points: pts.to_vec()?,
        disk,
    })
}

pub fn ray(
    from: Point2,
    to: Point2,
    rects: &[AxisAlignedRect],
    resolution: f64,
    exact: bool,
) -> Result<Collision<AxisAlignedRect>> {
    let colliders = Sequence::private_from_slice(rects)?;
    let hit = if exact {
        cast_ray_exact(from, to, &colliders)?
    } else {
        cast_ray(from, to, &colliders, resolution)?
    };
    tracing::info!(hit = hit.hit, exact, "ray");
    Ok(hit)
}

/// Sweep settings for [`bench_frame`].
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Sweep {
    pub min: usize,
    pub max: usize,
    pub step: usize,
    pub seed: u64,
    /// Largest `n` timed with the cubic brute force; above it the cell is null.
    pub extreme_max: usize,
}

fn time_hull(algo: Algo, n: usize, tok: ReplayToken, cfg: &GeomCfg) -> Result<u64> {
    let arena = run_arena(n);
    let mut pts = sample_points(square(n), tok, &arena)?;
    let start = Instant::now();
    let h = algo.run(&mut pts, &arena, cfg)?.len();
    let ns = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);
    tracing::debug!(?algo, n, hull = h, ns, "timed");
    Ok(ns)
}

/// Time all three hull algorithms on the same cloud for each size.
pub fn bench_frame(sweep: Sweep, cfg: &GeomCfg) -> Result<DataFrame> {
    ensure!(sweep.min >= 3, "hulls need at least 3 points, got min {}", sweep.min);
    ensure!(sweep.max >= sweep.min, "max {} below min {}", sweep.max, sweep.min);
    let mut n_col = Vec::new();
    let mut graham_ns = Vec::new();
    let mut jarvis_ns = Vec::new();
    let mut extreme_ns = Vec::new();
    for n in (sweep.min..=sweep.max).step_by(sweep.step.max(1)) {
        let tok = ReplayToken::new(sweep.seed, n as u64);
        graham_ns.push(time_hull(Algo::Graham, n, tok, cfg)?);
        jarvis_ns.push(time_hull(Algo::Jarvis, n, tok, cfg)?);
        extreme_ns.push(if n <= sweep.extreme_max {
            Some(time_hull(Algo::ExtremeEdges, n, tok, cfg)?)
        } else {
            None
        });
        n_col.push(n as u64);
    }
    let df = df!(
        "n" => n_col,
        "graham_ns" => graham_ns,
        "jarvis_ns" => jarvis_ns,
        "extreme_ns" => extreme_ns
    )?;
    Ok(df)
}

pub fn write_csv(df: &mut DataFrame, out: &Path) -> Result<()> {
    ensure_parent(out)?;
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

pub fn write_json<T: Serialize>(value: &T, out: &Path) -> Result<()> {
    ensure_parent(out)?;
    std::fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}
