//! Smallest enclosing disk (Welzl's algorithm).
//!
//! Iterative form: scan the points, and whenever `p_i` falls outside the
//! current disk, rebuild the disk over the prefix `0..i` with `p_i` added to
//! the support set `R` (at most 3 points known to lie on the boundary).
//! Recursion only nests per support point, so it is at most 3 deep whatever
//! the input size. Expected linear time needs a random candidate order, so
//! input is copied into the scratch arena and shuffled with
//! `GeomCfg::shuffle_seed` (`None` keeps input order).

use nalgebra::{Matrix2, Vector2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::types::{Circle, GeomCfg, Point2};
use crate::arena::{Arena, Sequence};
use crate::error::{Degeneracy, GeomError};

/// Up to three boundary points, passed by value into each nested scan.
#[derive(Clone, Copy, Debug, Default)]
struct Support {
    pts: [Point2; 3],
    len: usize,
}

impl Support {
    #[inline]
    fn with(mut self, p: Point2) -> Self {
        self.pts[self.len] = p;
        self.len += 1;
        self
    }
    #[inline]
    fn points(&self) -> &[Point2] {
        &self.pts[..self.len]
    }
}

/// Minimum-radius circle containing every point.
///
/// `scratch` receives a copy of the input (one `Point2` per point).
pub fn enclosing_disk(
    points: &Sequence<'_, Point2>,
    scratch: &Arena,
    cfg: &GeomCfg,
) -> Result<Circle, GeomError> {
    let n = points.len();
    if n == 0 {
        return Err(Degeneracy::EmptyInput.into());
    }
    let mut work = Sequence::new(n, scratch)?;
    for i in 0..n {
        let p = points.get(i)?;
        if !p.is_finite() {
            return Err(Degeneracy::NonFinite.into());
        }
        work.push(p)?;
    }
    if let Some(seed) = cfg.shuffle_seed {
        let mut rng = StdRng::seed_from_u64(seed);
        work.as_mut_slice()?.shuffle(&mut rng);
    }
    let disk = welzl(&work, n, Support::default(), cfg)?;
    tracing::debug!(n, x = disk.x, y = disk.y, r = disk.r, "enclosing_disk");
    Ok(disk)
}

/// Smallest disk enclosing `p[..end]` with every point of `r` on its boundary.
fn welzl(
    p: &Sequence<'_, Point2>,
    end: usize,
    r: Support,
    cfg: &GeomCfg,
) -> Result<Circle, GeomError> {
    let mut d = circle_through(r.points(), cfg.eps_det);
    if r.len == 3 {
        return Ok(d);
    }
    for i in 0..end {
        let pi = p.get(i)?;
        if !d.contains(pi, cfg.eps_contain) {
            d = welzl(p, i, r.with(pi), cfg)?;
        }
    }
    Ok(d)
}

/// Smallest circle with all of `support` (0 to 3 points) on its boundary.
///
/// - 0 points: `Circle::EMPTY`.
/// - 1 point: radius 0 at the point.
/// - 2 points: the segment as diameter.
/// - 3 points: circumcircle; if `|det| < eps_det` (coincident or collinear
///   points) the farthest pair's diameter circle instead.
pub fn circle_through(support: &[Point2], eps_det: f64) -> Circle {
    debug_assert!(support.len() <= 3, "support set holds at most 3 points");
    match *support {
        [] => Circle::EMPTY,
        [a] => Circle::at(a, 0.0),
        [a, b] => diameter_circle(a, b),
        [a, b, c, ..] => {
            let (ab, ac) = (b - a, c - a);
            let m = Matrix2::new(ab.x, ab.y, ac.x, ac.y) * 2.0;
            if m.determinant().abs() < eps_det {
                return widest_pair(a, b, c);
            }
            let rhs = Vector2::new(ab.norm_squared(), ac.norm_squared());
            match m.try_inverse() {
                Some(inv) => {
                    let u = inv * rhs;
                    Circle::at(a + u, u.norm())
                }
                None => widest_pair(a, b, c),
            }
        }
    }
}

#[inline]
fn diameter_circle(a: Point2, b: Point2) -> Circle {
    let center = a.lerp(b, 0.5);
    Circle::at(center, (b - a).norm() / 2.0)
}

fn widest_pair(a: Point2, b: Point2, c: Point2) -> Circle {
    [(a, b), (a, c), (b, c)]
        .into_iter()
        .map(|(p, q)| diameter_circle(p, q))
        .fold(Circle::EMPTY, |best, d| if d.r > best.r { d } else { best })
}
