//! Convex hulls by three independent algorithms.
//!
//! - `extreme_edges`: brute force, O(n³).
//! - `jarvis_march`: gift wrapping, O(nh).
//! - `graham_scan`: angular sort + stack, O(n log n).
//!
//! Output contract (all three)
//! - A new `Sequence<Edge>` allocated in `out`, counter-clockwise (y-up) and
//!   closed: each edge starts where the previous one ends, the last edge ends
//!   where the first starts.
//! - Only strict hull vertices appear. Points on a hull side between two
//!   vertices are dropped, so the algorithms agree off general position too.
//! - Rejected with `GeomError::DegenerateInput`: fewer than 3 points,
//!   non-finite coordinates, coincident points, all points collinear.
//! - Orientation tolerance is `max(eps_orient, eps_orient_rel * extent²)`,
//!   with `extent` the larger side of the input's bounding box.
//!
//! Scratch (Graham's stack) is bump-allocated in `out` next to the result.
//! Reads from `points` are per element, so `out` may be the input's own arena.

use std::cmp::Ordering;

use nalgebra::Vector2;

use super::predicates::{distance_to, is_left_eps, orient};
use super::types::{Edge, GeomCfg, Point2};
use crate::arena::{Arena, Sequence};
use crate::error::{Degeneracy, GeomError};

/// Brute-force hull: a directed pair `a -> b` is a hull edge iff no other
/// point lies to its right. Scans ordered pairs until the first hull edge,
/// then follows hull edges vertex to vertex until the ring closes.
pub fn extreme_edges<'o>(
    points: &Sequence<'_, Point2>,
    out: &'o Arena,
    cfg: &GeomCfg,
) -> Result<Sequence<'o, Edge>, GeomError> {
    let n = points.len();
    let mut sorted = points.to_vec()?;
    let eps = validate(&mut sorted, Ordering::Less, cfg)?;

    let mut first = None;
    'scan: for i in 0..n {
        for j in 0..n {
            if i != j && is_extreme(points, i, j, eps)? {
                first = Some((i, j));
                break 'scan;
            }
        }
    }
    let (start, mut cur) = first.ok_or(Degeneracy::Unclosed { steps: 0 })?;

    let mut edges = Sequence::new(n, out)?;
    edges.push(Edge::new(points.get(start)?, points.get(cur)?))?;
    while cur != start {
        let mut next = None;
        for j in 0..n {
            if j != cur && is_extreme(points, cur, j, eps)? {
                next = Some(j);
                break;
            }
        }
        let next = match next {
            Some(j) if !edges.is_full() => j,
            _ => return Err(unclosed(&edges)),
        };
        edges.push(Edge::new(points.get(cur)?, points.get(next)?))?;
        cur = next;
    }
    tracing::debug!(n, hull = edges.len(), "extreme_edges");
    Ok(edges)
}

/// Gift wrapping from the rightmost point (max x, then max y).
///
/// Sorts `points` in place (descending). The first edge is found with the
/// brute-force side test; each further vertex minimizes the counter-clockwise
/// turn from the previous edge, preferring the farthest of collinear ties.
pub fn jarvis_march<'o>(
    points: &mut Sequence<'_, Point2>,
    out: &'o Arena,
    cfg: &GeomCfg,
) -> Result<Sequence<'o, Edge>, GeomError> {
    let n = points.len();
    let eps = validate(&mut points.as_mut_slice()?, Ordering::Greater, cfg)?;

    let mut first = None;
    for j in 1..n {
        if is_extreme(points, 0, j, eps)? {
            first = Some(j);
            break;
        }
    }
    let mut cur = first.ok_or(Degeneracy::Unclosed { steps: 0 })?;

    let mut edges = Sequence::new(n, out)?;
    let mut last = Edge::new(points.get(0)?, points.get(cur)?);
    edges.push(last)?;
    while cur != 0 {
        if edges.is_full() {
            return Err(unclosed(&edges));
        }
        let origin = points.get(cur)?;
        // (index, turn, distance) of the best candidate so far
        let mut best: Option<(usize, f64, f64)> = None;
        for j in 0..n {
            if j == cur {
                continue;
            }
            let cand = points.get(j)?;
            let turn = last.turn_to(&Edge::new(origin, cand));
            let dist = distance_to(origin, cand);
            let better = match best {
                None => true,
                Some((b, best_turn, best_dist)) => {
                    let pb = points.get(b)?;
                    let same_ray = orient(cand, pb, origin).abs() <= eps
                        && (cand - origin).dot(&(pb - origin)) > 0.0;
                    if same_ray {
                        dist > best_dist
                    } else {
                        turn < best_turn
                    }
                }
            };
            if better {
                best = Some((j, turn, dist));
            }
        }
        let Some((next, _, _)) = best else {
            return Err(unclosed(&edges));
        };
        last = Edge::new(origin, points.get(next)?);
        edges.push(last)?;
        cur = next;
    }
    tracing::debug!(n, hull = edges.len(), "jarvis_march");
    Ok(edges)
}

/// Graham scan around the lexicographically smallest point.
///
/// Sorts `points` in place: pivot first, then by descending polar angle
/// against the horizontal through the pivot (nearest first on ties). The scan
/// keeps clockwise turns; the ring is then emitted reversed, so the result
/// follows the counter-clockwise contract.
pub fn graham_scan<'o>(
    points: &mut Sequence<'_, Point2>,
    out: &'o Arena,
    cfg: &GeomCfg,
) -> Result<Sequence<'o, Edge>, GeomError> {
    let n = points.len();
    let (pivot, eps) = {
        let mut items = points.as_mut_slice()?;
        let eps = validate(&mut items, Ordering::Less, cfg)?;
        sort_polar(&mut items, eps);
        (items[0], eps)
    };

    let mut stack = Sequence::new(n + 1, out)?;
    stack.push(pivot)?;
    stack.push(points.get(1)?)?;
    for i in 2..n {
        let c = points.get(i)?;
        while stack.len() >= 2 && !is_left_eps(c, stack.get(stack.len() - 2)?, stack.last()?, eps)
        {
            stack.pop()?;
        }
        stack.push(c)?;
    }
    while stack.len() >= 3
        && !is_left_eps(pivot, stack.get(stack.len() - 2)?, stack.last()?, eps)
    {
        stack.pop()?;
    }
    stack.push(pivot)?;

    let mut edges = Sequence::new(stack.len() - 1, out)?;
    for j in (1..stack.len()).rev() {
        edges.push(Edge::new(stack.get(j)?, stack.get(j - 1)?))?;
    }
    tracing::debug!(n, hull = edges.len(), "graham_scan");
    Ok(edges)
}

/// `a -> b` has every other point on its left, or on the segment itself.
///
/// A point right of `a -> b` is one left of `b -> a`, i.e. `is_left(c, a, b)`.
fn is_extreme(
    points: &Sequence<'_, Point2>,
    i: usize,
    j: usize,
    eps: f64,
) -> Result<bool, GeomError> {
    let (a, b) = (points.get(i)?, points.get(j)?);
    let ab = b - a;
    let len2 = ab.norm_squared();
    for k in 0..points.len() {
        if k == i || k == j {
            continue;
        }
        let c = points.get(k)?;
        if is_left_eps(c, a, b, eps) {
            return Ok(false);
        }
        if orient(c, a, b).abs() <= eps {
            let t = (c - a).dot(&ab);
            if !(0.0..=len2).contains(&t) {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

fn lex_cmp(a: &Point2, b: &Point2) -> Ordering {
    match a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal) {
        Ordering::Equal => a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal),
        o => o,
    }
}

/// Sort lexicographically (`Less` = ascending, `Greater` = descending) and
/// reject inputs no hull algorithm can handle. Returns the orientation
/// tolerance for this input.
fn validate(items: &mut [Point2], order: Ordering, cfg: &GeomCfg) -> Result<f64, Degeneracy> {
    if items.len() < 3 {
        return Err(Degeneracy::TooFewPoints {
            need: 3,
            got: items.len(),
        });
    }
    if !items.iter().all(|p| p.is_finite()) {
        return Err(Degeneracy::NonFinite);
    }
    if order == Ordering::Greater {
        items.sort_by(|a, b| lex_cmp(b, a));
    } else {
        items.sort_by(lex_cmp);
    }
    if items.windows(2).any(|w| w[0] == w[1]) {
        return Err(Degeneracy::DuplicatePoints);
    }
    let eps = orient_tolerance(items, cfg);
    let (a, b) = (items[0], items[items.len() - 1]);
    if items.iter().all(|&p| orient(p, a, b).abs() <= eps) {
        return Err(Degeneracy::Collinear);
    }
    Ok(eps)
}

fn orient_tolerance(items: &[Point2], cfg: &GeomCfg) -> f64 {
    let (lo, hi) = items.iter().fold((items[0], items[0]), |(lo, hi), p| {
        (
            Point2::new(lo.x.min(p.x), lo.y.min(p.y)),
            Point2::new(hi.x.max(p.x), hi.y.max(p.y)),
        )
    });
    let extent = (hi.x - lo.x).max(hi.y - lo.y);
    cfg.eps_orient.max(cfg.eps_orient_rel * extent * extent)
}

/// Order `items[1..]` by descending angle around `items[0]`, then fix the two
/// boundary rays: nearest first on the first ray, farthest first on the last,
/// so collinear points on those hull sides get popped by the scan.
fn sort_polar(items: &mut [Point2], eps: f64) {
    let pivot = items[0];
    let horizontal = Edge::new(pivot, pivot + Vector2::new(1.0, 0.0));
    let key = |p: &Point2| {
        (
            horizontal.angle_to(&Edge::new(pivot, *p)),
            distance_to(pivot, *p),
        )
    };
    let by_distance = |a: &Point2, b: &Point2| {
        distance_to(pivot, *a).total_cmp(&distance_to(pivot, *b))
    };
    let fan = &mut items[1..];
    fan.sort_by(|a, b| {
        let ((aa, ad), (ba, bd)) = (key(a), key(b));
        ba.total_cmp(&aa).then(ad.total_cmp(&bd))
    });

    let m = fan.len();
    let head = fan[0];
    let first_run = fan
        .iter()
        .take_while(|&&p| orient(p, head, pivot).abs() <= eps)
        .count();
    fan[..first_run].sort_by(by_distance);
    let tail = fan[m - 1];
    let last_run = fan
        .iter()
        .rev()
        .take_while(|&&p| orient(p, tail, pivot).abs() <= eps)
        .count();
    fan[m - last_run..].sort_by(|a, b| by_distance(b, a));
}

fn unclosed(edges: &Sequence<'_, Edge>) -> GeomError {
    Degeneracy::Unclosed {
        steps: edges.len(),
    }
    .into()
}
