use super::rand::{sample_points_vec, Region, ReplayToken, SampleCfg};
use super::*;
use crate::arena::{Arena, Sequence};
use crate::error::{Degeneracy, GeomError};
use proptest::prelude::*;

type HullFn = for<'o> fn(
    &mut Sequence<'_, Point2>,
    &'o Arena,
    &GeomCfg,
) -> Result<Sequence<'o, Edge>, GeomError>;

fn extreme_mut<'o>(
    points: &mut Sequence<'_, Point2>,
    out: &'o Arena,
    cfg: &GeomCfg,
) -> Result<Sequence<'o, Edge>, GeomError> {
    extreme_edges(points, out, cfg)
}

const ALGOS: [(&str, HullFn); 3] = [
    ("extreme_edges", extreme_mut),
    ("jarvis_march", jarvis_march),
    ("graham_scan", graham_scan),
];

fn p(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

fn hull_arena(n: usize) -> Arena {
    Arena::new(64 * n + 256)
}

/// Run one algorithm on a private copy of `pts`, returning the ring vertices
/// rotated to start at the lexicographically smallest one.
fn hull_ring(algo: HullFn, pts: &[Point2]) -> Result<Vec<Point2>, GeomError> {
    let mut input = Sequence::private_from_slice(pts)?;
    let out = hull_arena(pts.len());
    let edges = algo(&mut input, &out, &GeomCfg::default())?;
    let edges = edges.to_vec()?;
    for (i, e) in edges.iter().enumerate() {
        let next = edges[(i + 1) % edges.len()];
        assert_eq!(e.q, next.p, "ring not closed at edge {i}");
    }
    let mut ring: Vec<Point2> = edges.iter().map(|e| e.p).collect();
    let start = (0..ring.len())
        .min_by(|&a, &b| {
            ring[a]
                .x
                .total_cmp(&ring[b].x)
                .then(ring[a].y.total_cmp(&ring[b].y))
        })
        .unwrap();
    ring.rotate_left(start);
    Ok(ring)
}

fn assert_ccw_convex(ring: &[Point2]) {
    let n = ring.len();
    for i in 0..n {
        let (a, b, c) = (ring[i], ring[(i + 1) % n], ring[(i + 2) % n]);
        assert!(turn(a, b, c) > 0.0, "not a strict left turn at {i}: {ring:?}");
    }
}

fn assert_encloses(ring: &[Point2], pts: &[Point2]) {
    let n = ring.len();
    for &c in pts {
        for i in 0..n {
            let (a, b) = (ring[i], ring[(i + 1) % n]);
            assert!(turn(a, b, c) >= -1e-9, "{c:?} outside edge {a:?} -> {b:?}");
        }
    }
}

fn unit_square_with_centre() -> Vec<Point2> {
    vec![p(0.5, 0.5), p(1.0, 1.0), p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]
}

// ---------- predicates ----------

proptest! {
    #[test]
    fn is_left_is_antisymmetric(
        ax in -1000i32..1000, ay in -1000i32..1000,
        bx in -1000i32..1000, by in -1000i32..1000,
        px in -1000i32..1000, py in -1000i32..1000,
    ) {
        // Small integer coordinates keep the cross products exact.
        let (a, b, q) = (
            p(ax as f64, ay as f64),
            p(bx as f64, by as f64),
            p(px as f64, py as f64),
        );
        prop_assert_eq!(orient(q, a, b), -orient(q, b, a));
        prop_assert!(!(is_left(q, a, b) && is_left(q, b, a)));
        if orient(q, a, b) != 0.0 {
            prop_assert!(is_left(q, a, b) != is_left(q, b, a));
        }
    }

    #[test]
    fn two_argument_triangle_test_never_holds(
        coords in prop::array::uniform6(-1e3f64..1e3),
    ) {
        let [a, b, c, d, e, f] = coords;
        prop_assert!(!is_left_of(p(a, b), p(c, d)));
        prop_assert!(!is_in_triangle(p(a, b), p(c, d), p(e, f)));
    }
}

#[test]
fn is_left_follows_line_direction() {
    let (a, b) = (p(1.0, 0.0), p(0.0, 0.0));
    // Directed line b -> a points along +x; left is +y.
    assert!(is_left(p(0.5, 1.0), a, b));
    assert!(!is_left(p(0.5, -1.0), a, b));
    assert!(!is_left(p(2.0, 0.0), a, b));
    assert!(is_left_eps(p(0.5, 1.0), a, b, 0.5));
    assert!(!is_left_eps(p(0.5, 1e-3), a, b, 0.5));
    assert!(turn(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)) > 0.0);
}

#[test]
fn strict_triangle_containment_either_winding() {
    let (a, b, c) = (p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0));
    assert!(is_in_triangle_strict(p(0.2, 0.2), a, b, c));
    assert!(is_in_triangle_strict(p(0.2, 0.2), a, c, b));
    assert!(!is_in_triangle_strict(p(1.0, 1.0), a, b, c));
    assert!(!is_in_triangle_strict(p(0.5, 0.0), a, b, c));
}

#[test]
fn rectangle_interior_is_strict() {
    let r = AxisAlignedRect::new(10.0, 10.0, 5.0, 5.0);
    assert!(is_in_rectangle(p(12.0, 12.0), &r));
    assert!(r.contains(p(14.9, 10.1)));
    assert!(!is_in_rectangle(p(10.0, 12.0), &r));
    assert!(!is_in_rectangle(p(16.0, 12.0), &r));
    assert!(!is_in_rectangle(p(12.0, 9.0), &r));
}

#[test]
fn edge_crossings_and_turns() {
    let d1 = Edge::new(p(0.0, 0.0), p(2.0, 2.0));
    let d2 = Edge::new(p(0.0, 2.0), p(2.0, 0.0));
    assert!(d1.intersects(&d2));
    let parallel = Edge::new(p(0.0, 1.0), p(2.0, 3.0));
    assert!(!d1.intersects(&parallel));
    let apart = Edge::new(p(5.0, 0.0), p(6.0, -1.0));
    assert!(!d1.intersects(&apart));

    let east = Edge::new(p(0.0, 0.0), p(1.0, 0.0));
    let north = Edge::new(p(0.0, 0.0), p(0.0, 1.0));
    let south = Edge::new(p(0.0, 0.0), p(0.0, -1.0));
    let half_pi = std::f64::consts::FRAC_PI_2;
    assert!((east.angle_to(&north) - half_pi).abs() < 1e-12);
    assert!((east.turn_to(&north) - half_pi).abs() < 1e-12);
    assert!((east.turn_to(&south) - 3.0 * half_pi).abs() < 1e-12);
    for e in [east, north, south, d1, d2] {
        let t = north.turn_to(&e);
        assert!((0.0..std::f64::consts::TAU).contains(&t));
    }
    assert_eq!(east.reversed().heading().abs(), std::f64::consts::PI);
    assert!((d1.length() - 8f64.sqrt()).abs() < 1e-12);
}

#[test]
fn rect_and_circle_helpers() {
    let a = AxisAlignedRect::new(0.0, 0.0, 2.0, 2.0);
    let b = AxisAlignedRect::new(1.0, 1.0, 2.0, 2.0);
    let c = AxisAlignedRect::new(5.0, 5.0, 1.0, 1.0);
    assert!(a.intersects(&b));
    assert_eq!(a.overlap(&b), Some(AxisAlignedRect::new(1.0, 1.0, 1.0, 1.0)));
    assert_eq!(a.overlap_area(&b), 1.0);
    assert!(!a.intersects(&c));
    assert_eq!(a.overlap(&c), None);
    assert_eq!(a.overlap_area(&c), 0.0);
    assert_eq!(a.corners()[2], p(2.0, 2.0));

    let unit = Circle::new(0.0, 0.0, 1.0);
    assert!(unit.contains(p(1.0, 0.0), 0.0));
    assert!(!unit.contains(p(1.1, 0.0), 1e-9));
    assert!(unit.intersects(&Circle::new(1.5, 0.0, 1.0)));
    assert!(!unit.intersects(&Circle::new(3.0, 0.0, 1.0)));
    assert!(Circle::default().is_empty());
    assert!(!Circle::EMPTY.contains(p(0.0, 0.0), 1.0));
}

#[test]
fn centroids_average_vertices() {
    let arena = Arena::new(1024);
    let square = Sequence::from_slice(
        &[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)],
        &arena,
    )
    .unwrap();
    assert_eq!(centroid(&square).unwrap(), p(0.5, 0.5));

    let mut input = Sequence::from_slice(&unit_square_with_centre(), &arena).unwrap();
    let hull = graham_scan(&mut input, &arena, &GeomCfg::default()).unwrap();
    assert_eq!(edges_centroid(&hull).unwrap(), p(0.5, 0.5));

    let empty: Sequence<Point2> = Sequence::new(1, &arena).unwrap();
    assert_eq!(
        centroid(&empty),
        Err(GeomError::DegenerateInput(Degeneracy::EmptyInput))
    );
}

// ---------- convex hulls ----------

#[test]
fn unit_square_hull_drops_interior_point() {
    let expected = vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
    for (name, algo) in ALGOS {
        let ring = hull_ring(algo, &unit_square_with_centre()).unwrap();
        assert_eq!(ring, expected, "{name}");
    }
}

#[test]
fn points_on_hull_sides_are_not_vertices() {
    let mut pts = unit_square_with_centre();
    pts.extend([p(0.5, 0.0), p(1.0, 0.5), p(0.5, 1.0), p(0.0, 0.5)]);
    let expected = vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
    for (name, algo) in ALGOS {
        let ring = hull_ring(algo, &pts).unwrap();
        assert_eq!(ring, expected, "{name}");
    }
}

#[test]
fn near_collinear_side_points_agree_at_any_scale() {
    for scale in [1.0, 1e6] {
        let mut pts = vec![p(0.0, 0.0), p(10.0 * scale, scale), p(5.0 * scale, 8.0 * scale)];
        for k in 1..=9 {
            let k = k as f64;
            pts.push(p(1.1 * k * scale, 0.11 * k * scale));
        }
        let expected = vec![pts[0], pts[1], pts[2]];
        for (name, algo) in ALGOS {
            let ring = hull_ring(algo, &pts).unwrap();
            assert_eq!(ring, expected, "{name} at scale {scale}");
        }
        if scale == 1.0 {
            assert_encloses(&expected, &pts);
        }
    }
}

#[test]
fn triangle_is_its_own_hull() {
    let pts = [p(3.0, 1.0), p(0.0, 0.0), p(1.0, 2.0)];
    for (name, algo) in ALGOS {
        let ring = hull_ring(algo, &pts).unwrap();
        assert_eq!(ring.len(), 3, "{name}");
        assert_ccw_convex(&ring);
    }
}

#[test]
fn algorithms_agree_on_seeded_clouds() {
    let bounds = AxisAlignedRect::new(-50.0, -50.0, 100.0, 100.0);
    for (index, count) in [(0u64, 3usize), (1, 8), (2, 40), (3, 200)] {
        let cfg = SampleCfg {
            count,
            region: Region::Rect(bounds),
        };
        let pts = sample_points_vec(cfg, ReplayToken::new(0xC0FFEE, index));
        let graham = hull_ring(graham_scan, &pts).unwrap();
        let jarvis = hull_ring(jarvis_march, &pts).unwrap();
        assert_eq!(graham, jarvis, "count {count}");
        if count <= 40 {
            assert_eq!(graham, hull_ring(extreme_mut, &pts).unwrap(), "count {count}");
        }
        assert_ccw_convex(&graham);
        assert_encloses(&graham, &pts);
    }
}

#[test]
fn every_ring_point_is_a_vertex() {
    let cfg = SampleCfg {
        count: 48,
        region: Region::Ring(Circle::new(2.0, -3.0, 10.0)),
    };
    let pts = sample_points_vec(cfg, ReplayToken::new(7, 0));
    for (name, algo) in ALGOS {
        let ring = hull_ring(algo, &pts).unwrap();
        assert_eq!(ring.len(), pts.len(), "{name}");
        assert_ccw_convex(&ring);
    }
}

#[test]
fn hull_can_share_the_input_arena() {
    let pts = unit_square_with_centre();
    let arena = Arena::new(2048);
    for (name, algo) in ALGOS {
        let mut input = Sequence::from_slice(&pts, &arena).unwrap();
        let edges = algo(&mut input, &arena, &GeomCfg::default()).unwrap();
        assert_eq!(edges.len(), 4, "{name}");
        assert!(edges.shares(&arena));
    }
}

#[test]
fn degenerate_inputs_are_rejected() {
    let nan = p(f64::NAN, 0.0);
    let cases: [(Vec<Point2>, Degeneracy); 4] = [
        (
            vec![p(0.0, 0.0), p(1.0, 1.0)],
            Degeneracy::TooFewPoints { need: 3, got: 2 },
        ),
        (
            vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), p(1.0, 0.0)],
            Degeneracy::DuplicatePoints,
        ),
        (
            vec![p(0.0, 0.0), p(2.0, 2.0), p(1.0, 1.0), p(3.0, 3.0)],
            Degeneracy::Collinear,
        ),
        (vec![p(0.0, 0.0), nan, p(0.0, 1.0)], Degeneracy::NonFinite),
    ];
    for (pts, why) in cases {
        for (name, algo) in ALGOS {
            let err = hull_ring(algo, &pts).unwrap_err();
            assert_eq!(err, GeomError::DegenerateInput(why), "{name}");
        }
    }
}

#[test]
fn hull_output_overflow_is_reported() {
    let pts = unit_square_with_centre();
    let mut input = Sequence::private_from_slice(&pts).unwrap();
    let tiny = Arena::new(32);
    let err = graham_scan(&mut input, &tiny, &GeomCfg::default()).unwrap_err();
    assert!(matches!(err, GeomError::Sequence(_)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn hulls_agree_and_enclose(
        raw in prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 3..30),
    ) {
        let pts: Vec<Point2> = raw.into_iter().map(|(x, y)| p(x, y)).collect();
        let graham = hull_ring(graham_scan, &pts).unwrap();
        prop_assert_eq!(&graham, &hull_ring(jarvis_march, &pts).unwrap());
        prop_assert_eq!(&graham, &hull_ring(extreme_mut, &pts).unwrap());
        assert_ccw_convex(&graham);
        assert_encloses(&graham, &pts);
    }
}

// ---------- enclosing disk ----------

fn disk_of(pts: &[Point2], cfg: &GeomCfg) -> Result<Circle, GeomError> {
    let input = Sequence::private_from_slice(pts)?;
    let scratch = Arena::new(16 * pts.len() + 16);
    enclosing_disk(&input, &scratch, cfg)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn disk_of_one_two_three_points() {
    let cfg = GeomCfg::default();
    let d = disk_of(&[p(3.0, 4.0)], &cfg).unwrap();
    assert_eq!((d.x, d.y, d.r), (3.0, 4.0, 0.0));

    let d = disk_of(&[p(0.0, 0.0), p(4.0, 0.0)], &cfg).unwrap();
    assert!(close(d.x, 2.0) && close(d.y, 0.0) && close(d.r, 2.0));

    // acute: circumcircle, centre (2, 5/6), radius 13/6
    let d = disk_of(&[p(0.0, 0.0), p(4.0, 0.0), p(2.0, 3.0)], &cfg).unwrap();
    assert!(close(d.x, 2.0) && close(d.y, 5.0 / 6.0) && close(d.r, 13.0 / 6.0));

    // obtuse: the long side is a diameter
    let d = disk_of(&[p(0.0, 0.0), p(4.0, 0.0), p(2.0, 0.5)], &cfg).unwrap();
    assert!(close(d.x, 2.0) && close(d.y, 0.0) && close(d.r, 2.0));
}

#[test]
fn disk_contains_every_point_and_is_tight() {
    let cfg = GeomCfg::default();
    let sample = SampleCfg {
        count: 300,
        region: Region::Rect(AxisAlignedRect::new(-5.0, -5.0, 10.0, 10.0)),
    };
    let pts = sample_points_vec(sample, ReplayToken::new(11, 0));
    let d = disk_of(&pts, &cfg).unwrap();
    assert!(pts.iter().all(|&q| d.contains(q, cfg.eps_contain)));
    let on_boundary = pts
        .iter()
        .filter(|&&q| ((q - d.center()).norm() - d.r).abs() < 1e-7)
        .count();
    assert!(on_boundary >= 2);

    let unshuffled = disk_of(
        &pts,
        &GeomCfg {
            shuffle_seed: None,
            ..cfg
        },
    )
    .unwrap();
    assert!((unshuffled.r - d.r).abs() < 1e-7);
}

#[test]
fn disk_of_large_cloud_runs_on_a_small_stack() {
    let sample = SampleCfg {
        count: 200_000,
        region: Region::Rect(AxisAlignedRect::new(-50.0, -50.0, 100.0, 100.0)),
    };
    let pts = sample_points_vec(sample, ReplayToken::new(21, 0));
    let worker = std::thread::Builder::new()
        .stack_size(1 << 20)
        .spawn(move || {
            let cfg = GeomCfg::default();
            let d = disk_of(&pts, &cfg).unwrap();
            (pts.iter().all(|&q| d.contains(q, cfg.eps_contain)), d.r)
        })
        .unwrap();
    let (covers, r) = worker.join().unwrap();
    assert!(covers);
    // the square's half-diagonal bounds the radius from above
    assert!(r > 0.0 && r <= 50.0 * std::f64::consts::SQRT_2 + 1e-9);
}

#[test]
fn disk_rejects_empty_and_non_finite() {
    let cfg = GeomCfg::default();
    let input: Sequence<Point2> = Sequence::private(4).unwrap();
    let scratch = Arena::new(64);
    assert_eq!(
        enclosing_disk(&input, &scratch, &cfg),
        Err(GeomError::DegenerateInput(Degeneracy::EmptyInput))
    );
    assert_eq!(
        disk_of(&[p(0.0, 0.0), p(f64::INFINITY, 1.0)], &cfg),
        Err(GeomError::DegenerateInput(Degeneracy::NonFinite))
    );
}

#[test]
fn collinear_support_falls_back_to_widest_pair() {
    let c = circle_through(&[p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)], 1e-12);
    assert!(close(c.x, 1.0) && close(c.y, 0.0) && close(c.r, 1.0));
    let c = circle_through(&[p(1.0, 1.0), p(1.0, 1.0), p(3.0, 1.0)], 1e-12);
    assert!(close(c.x, 2.0) && close(c.r, 1.0));
    assert!(circle_through(&[], 1e-12).is_empty());

    let d = disk_of(&[p(0.0, 0.0), p(1.0, 1.0), p(3.0, 3.0), p(2.0, 2.0)], &GeomCfg::default())
        .unwrap();
    assert!(close(d.x, 1.5) && close(d.y, 1.5) && close(d.r, 18f64.sqrt() / 2.0));
}

// ---------- ray casting ----------

#[test]
fn ray_hits_rectangle_near_its_boundary() {
    let colliders =
        Sequence::private_from_slice(&[AxisAlignedRect::new(10.0, 10.0, 5.0, 5.0)]).unwrap();
    let (from, to) = (p(0.0, 12.0), p(20.0, 12.0));
    let res = DEFAULT_RAY_RESOLUTION;
    let hit = cast_ray(from, to, &colliders, res).unwrap();
    assert!(hit.hit);
    let step = res * (to - from).norm();
    assert!(hit.point.x >= 10.0 && hit.point.x - 10.0 <= step + 1e-9);
    assert_eq!(hit.shape, AxisAlignedRect::new(10.0, 10.0, 5.0, 5.0));

    let exact = cast_ray_exact(from, to, &colliders).unwrap();
    let (point, shape) = exact.as_hit().unwrap();
    assert!(close(point.x, 10.0) && close(point.y, 12.0));
    assert_eq!(shape.width, 5.0);
}

#[test]
fn ray_reports_first_collider_in_order() {
    let near = Circle::new(5.0, 0.0, 1.0);
    let far = Circle::new(8.0, 0.0, 1.0);
    let colliders = Sequence::private_from_slice(&[far, near]).unwrap();
    let hit = cast_ray(p(0.0, 0.0), p(10.0, 0.0), &colliders, 0.01).unwrap();
    assert_eq!(hit.shape, near);

    // Overlapping colliders: the first listed wins at the first sample inside both.
    let a = AxisAlignedRect::new(4.0, -1.0, 2.0, 2.0);
    let b = AxisAlignedRect::new(4.0, -2.0, 4.0, 4.0);
    let colliders = Sequence::private_from_slice(&[b, a]).unwrap();
    let hit = cast_ray(p(0.0, 0.0), p(10.0, 0.0), &colliders, 0.01).unwrap();
    assert_eq!(hit.shape, b);
}

#[test]
fn ray_misses_and_bad_resolutions() {
    let colliders = Sequence::private_from_slice(&[AxisAlignedRect::new(0.0, 5.0, 1.0, 1.0)])
        .unwrap();
    let miss = cast_ray(p(0.0, 0.0), p(10.0, 0.0), &colliders, 0.1).unwrap();
    assert!(!miss.hit);
    assert!(miss.as_hit().is_none());
    assert!(!cast_ray_exact(p(0.0, 0.0), p(10.0, 0.0), &colliders).unwrap().hit);

    for bad in [0.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
        let err = cast_ray(p(0.0, 0.0), p(1.0, 0.0), &colliders, bad).unwrap_err();
        assert!(matches!(
            err,
            GeomError::DegenerateInput(Degeneracy::Resolution(_))
        ));
    }
}

#[test]
fn thin_collider_can_be_stepped_over() {
    let wall = AxisAlignedRect::new(5.05, -1.0, 0.02, 2.0);
    let colliders = Sequence::private_from_slice(&[wall]).unwrap();
    let coarse = cast_ray(p(0.0, 0.0), p(10.0, 0.0), &colliders, 0.01).unwrap();
    assert!(!coarse.hit);
    assert!(cast_ray_exact(p(0.0, 0.0), p(10.0, 0.0), &colliders).unwrap().hit);
}
