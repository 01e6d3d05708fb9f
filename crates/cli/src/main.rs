use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use hullkit::api::{AxisAlignedRect, GeomCfg, Point2, DEFAULT_RAY_RESOLUTION};
use serde_json::json;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod experiments;
mod provenance;

use experiments::{Algo, Sweep};
use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Hull, enclosing-disk and ray-cast experiments over seeded point clouds")]
struct Cmd {
    /// Log at DEBUG instead of INFO
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Convex hull of a seeded cloud; writes {points, hull} JSON
    Hull {
        #[arg(long, value_enum, default_value_t = Algo::Graham)]
        algo: Algo,
        #[arg(long, default_value_t = 64)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Smallest enclosing disk of a seeded cloud; writes {points, disk} JSON
    Disk {
        #[arg(long, default_value_t = 64)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Cast a ray against rectangles and print the collision record
    Ray {
        /// Start point as `x,y`
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: Point2,
        /// End point as `x,y`
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Point2,
        /// Collider as `x,y,w,h`; repeatable, checked in the given order
        #[arg(long = "rect", value_parser = parse_rect, allow_hyphen_values = true)]
        rects: Vec<AxisAlignedRect>,
        #[arg(long, default_value_t = DEFAULT_RAY_RESOLUTION)]
        resolution: f64,
        /// Use the closed-form slab test instead of marching
        #[arg(long)]
        exact: bool,
    },
    /// Time the three hull algorithms over a size sweep; writes a CSV
    Bench {
        #[arg(long, default_value_t = 16)]
        min: usize,
        #[arg(long, default_value_t = 512)]
        max: usize,
        #[arg(long, default_value_t = 16)]
        step: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Skip the cubic brute force above this size
        #[arg(long, default_value_t = 256)]
        extreme_max: usize,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    let cfg = GeomCfg::default();
    match cmd.action {
        Action::Hull {
            algo,
            count,
            seed,
            out,
        } => {
            let report = experiments::hull(algo, count, seed, &cfg)?;
            experiments::write_json(&report, &out)?;
            write_sidecar(
                &out,
                Payload::new("hull", json!({"algo": algo, "count": count, "seed": seed})),
            )?;
        }
        Action::Disk { count, seed, out } => {
            let report = experiments::disk(count, seed, &cfg)?;
            experiments::write_json(&report, &out)?;
            write_sidecar(
                &out,
                Payload::new(
                    "disk",
                    json!({"count": count, "seed": seed, "shuffle_seed": cfg.shuffle_seed}),
                ),
            )?;
        }
        Action::Ray {
            from,
            to,
            rects,
            resolution,
            exact,
        } => {
            let hit = experiments::ray(from, to, &rects, resolution, exact)?;
            println!("{}", serde_json::to_string_pretty(&hit)?);
        }
        Action::Bench {
            min,
            max,
            step,
            seed,
            extreme_max,
            out,
        } => {
            let sweep = Sweep {
                min,
                max,
                step,
                seed,
                extreme_max,
            };
            let mut df = experiments::bench_frame(sweep, &cfg)?;
            experiments::write_csv(&mut df, &out)?;
            tracing::info!(rows = df.height(), out = %out.display(), "bench");
            write_sidecar(&out, Payload::new("bench", json!(sweep)))?;
        }
        Action::Report => report()?,
    }
    Ok(())
}

fn report() -> Result<()> {
    let payload = Payload::new("report", json!({}));
    let doc = provenance::document(&payload, &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn parse_floats<const N: usize>(s: &str) -> Result<[f64; N]> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|t| t.trim().parse::<f64>())
        .collect::<Result<_, _>>()?;
    parts
        .try_into()
        .map_err(|v: Vec<f64>| anyhow!("expected {} comma-separated numbers, got {}", N, v.len()))
}

fn parse_point(s: &str) -> Result<Point2, String> {
    let [x, y] = parse_floats::<2>(s).map_err(|e| e.to_string())?;
    Ok(Point2::new(x, y))
}

fn parse_rect(s: &str) -> Result<AxisAlignedRect, String> {
    let [x, y, w, h] = parse_floats::<4>(s).map_err(|e| e.to_string())?;
    if w < 0.0 || h < 0.0 {
        return Err(format!("negative extent in `{s}`"));
    }
    Ok(AxisAlignedRect::new(x, y, w, h))
}
