use super::*;
use crate::kernel::{orient2d_exact, Point, Polygon};
use crate::sample::{draw_x_monotone, draw_y_monotone, MonotoneCfg, ReplayToken};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

fn unit_square() -> Polygon {
    Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
}

/// y-monotone, one reflex vertex on each side.
fn arrowhead() -> Polygon {
    Polygon::from_coords(&[
        (0.0, 0.0),
        (3.0, 1.0),
        (1.5, 2.5),
        (0.0, 5.0),
        (-1.5, 2.5),
        (-3.0, 1.0),
    ])
}

/// x-monotone but not y-monotone: notches at the bottom and the top.
fn notched_hexagon() -> Polygon {
    Polygon::from_coords(&[
        (0.0, 0.0),
        (2.0, 1.0),
        (4.0, 0.0),
        (4.0, 3.0),
        (2.0, 2.0),
        (0.0, 3.0),
    ])
}

fn d(i: usize, j: usize) -> Diagonal {
    Diagonal::new(i, j).unwrap()
}

fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Proper crossing of segments `ab` and `cd` (shared endpoints excluded).
fn crosses(a: Point, b: Point, c: Point, e: Point) -> bool {
    let o1 = sign(orient2d_exact(a, b, c));
    let o2 = sign(orient2d_exact(a, b, e));
    let o3 = sign(orient2d_exact(c, e, a));
    let o4 = sign(orient2d_exact(c, e, b));
    o1 * o2 < 0 && o3 * o4 < 0
}

fn assert_valid_triangulation(poly: &Polygon, diags: &[Diagonal]) {
    let n = poly.len();
    assert_eq!(diags.len(), n - 3, "diagonal count");
    for dg in diags {
        let (i, j) = dg.ends();
        assert!(!poly.is_adjacent(i, j), "diagonal {dg} is a boundary edge");
        for (k, edge) in poly.edges().enumerate() {
            let k2 = poly.next(k);
            if dg.touches(k) || dg.touches(k2) {
                continue;
            }
            assert!(
                !crosses(poly.vs[i], poly.vs[j], edge.a, edge.b),
                "diagonal {dg} crosses edge {k}"
            );
        }
    }
    let tris = triangles(poly, diags);
    assert_eq!(tris.len(), n - 2, "triangle count");
    let area = triangles_area2(poly, &tris);
    let expect = poly.signed_area2();
    assert!(
        (area - expect).abs() <= 1e-9 * expect.abs().max(1.0),
        "area {area} vs {expect}"
    );
}

#[test]
fn square_classifies_one_start_one_end() {
    let vs = classify_vertices(&unit_square(), SweepCfg::default()).unwrap();
    assert_eq!(type_counts(&vs), [1, 1, 0, 0, 2]);
    assert_eq!(vs[2].kind, VertexType::Start);
    assert_eq!(vs[0].kind, VertexType::End);
    assert_eq!((vs[0].prev, vs[0].next), (3, 1));
}

#[test]
fn square_gets_single_diagonal() {
    let diags = triangulate_monotone(&unit_square(), SweepCfg::default()).unwrap();
    assert_eq!(diags, vec![d(1, 3)]);
    assert_valid_triangulation(&unit_square(), &diags);
}

#[test]
fn convex_polygon_has_no_split_or_merge() {
    let vs: Vec<Point> = (0..8)
        .map(|k| {
            let th = 0.1 + k as f64 * std::f64::consts::FRAC_PI_4;
            Point::new(th.cos(), th.sin())
        })
        .collect();
    let poly = Polygon::new(vs);
    let cv = classify_vertices(&poly, SweepCfg::default()).unwrap();
    let [start, end, split, merge, regular] = type_counts(&cv);
    assert_eq!((split, merge), (0, 0));
    assert_eq!(start, end);
    assert_eq!(start, 1);
    assert_eq!(regular, 6);
}

#[test]
fn arrowhead_diagonals_in_discovery_order() {
    let poly = arrowhead();
    let cv = classify_vertices(&poly, SweepCfg::default()).unwrap();
    assert_eq!(type_counts(&cv), [1, 1, 0, 0, 4]);
    assert_eq!(cv[3].kind, VertexType::Start);
    assert_eq!(cv[0].kind, VertexType::End);

    let diags = triangulate_monotone(&poly, SweepCfg::default()).unwrap();
    assert_eq!(diags, vec![d(1, 5), d(1, 4), d(2, 4)]);
    assert_valid_triangulation(&poly, &diags);

    let mut tris: Vec<[usize; 3]> = triangles(&poly, &diags)
        .into_iter()
        .map(|Triangle(mut t)| {
            t.sort_unstable();
            t
        })
        .collect();
    tris.sort_unstable();
    assert_eq!(tris, vec![[0, 1, 5], [1, 2, 4], [1, 4, 5], [2, 3, 4]]);
    assert!((poly.signed_area2() - 27.0).abs() < 1e-12);
}

#[test]
fn triangles_come_out_counter_clockwise() {
    let poly = arrowhead();
    let diags = triangulate_monotone(&poly, SweepCfg::default()).unwrap();
    for Triangle([a, b, c]) in triangles(&poly, &diags) {
        assert!(orient2d_exact(poly.vs[a], poly.vs[b], poly.vs[c]) > 0.0);
    }
}

#[test]
fn notched_hexagon_split_and_merge_under_vertical_order() {
    let cv = classify_vertices(&notched_hexagon(), SweepCfg::default()).unwrap();
    assert_eq!(type_counts(&cv), [2, 2, 1, 1, 0]);
    assert_eq!(cv[1].kind, VertexType::Split);
    assert_eq!(cv[4].kind, VertexType::Merge);
    assert_eq!(cv[3].kind, VertexType::Start);
    assert_eq!(cv[5].kind, VertexType::Start);
}

#[test]
fn notched_hexagon_triangulates_under_horizontal_order() {
    let cfg = SweepCfg {
        order: SweepOrder::XThenY,
    };
    let poly = notched_hexagon();
    let cv = classify_vertices(&poly, cfg).unwrap();
    let [_, _, split, merge, _] = type_counts(&cv);
    assert_eq!((split, merge), (0, 0));

    let diags = triangulate_monotone(&poly, cfg).unwrap();
    assert_eq!(diags, vec![d(1, 5), d(1, 4), d(2, 4)]);
    assert_valid_triangulation(&poly, &diags);
}

#[test]
fn collinear_midpoint_is_regular_and_skipped() {
    let poly = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.5), (1.0, 1.0), (0.0, 1.0)]);
    let cv = classify_vertices(&poly, SweepCfg::default()).unwrap();
    assert_eq!(cv[2].kind, VertexType::Regular);
    let diags = triangulate_monotone(&poly, SweepCfg::default()).unwrap();
    assert_eq!(diags, vec![d(0, 2), d(2, 4)]);
}

#[test]
fn degenerate_spike_is_regular() {
    let k = classify_vertex(
        Point::new(0.0, 0.0),
        Point::new(0.0, 2.0),
        Point::new(0.0, 1.0),
        SweepOrder::YThenX,
    );
    assert_eq!(k, VertexType::Regular);
}

#[test]
fn exact_turn_separates_start_from_split() {
    // The fast formula rounds this turn to zero.
    let u = f64::EPSILON * 0.5;
    let low = Point::new(0.5, 0.5 + u);
    let mid = Point::new(12.0, 12.0);
    let top = Point::new(24.0, 24.0);
    assert_eq!(
        classify_vertex(mid, top, low, SweepOrder::YThenX),
        VertexType::Start
    );
    assert_eq!(
        classify_vertex(low, top, mid, SweepOrder::YThenX),
        VertexType::Split
    );
}

#[test]
fn too_few_vertices_rejected() {
    let poly = Polygon::from_coords(&[(0.0, 0.0), (1.0, 1.0)]);
    assert_eq!(
        classify_vertices(&poly, SweepCfg::default()),
        Err(StepError::TooFewVertices { found: 2 })
    );
    assert_eq!(
        triangulate_monotone(&poly, SweepCfg::default()),
        Err(StepError::TooFewVertices { found: 2 })
    );
}

#[test]
fn triangle_needs_no_diagonals() {
    let poly = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
    let diags = triangulate_monotone(&poly, SweepCfg::default()).unwrap();
    assert!(diags.is_empty());
    assert_eq!(triangles(&poly, &diags).len(), 1);
}

#[test]
fn non_monotone_hook_reports_count_mismatch() {
    // Left chain climbs from 3 to 4 before falling to 5.
    let poly = Polygon::from_coords(&[
        (0.0, 0.0),
        (4.0, 0.5),
        (4.0, 6.0),
        (-6.0, 2.0),
        (-3.0, 3.0),
        (1.0, 1.0),
    ]);
    let mut log = StepLog::default();
    let res = triangulate(&poly, SweepCfg::default(), &mut log);
    assert_eq!(
        res,
        Err(StepError::DiagonalCount {
            expected: 3,
            found: 2
        })
    );
    assert_eq!(log.diagonals, vec![d(1, 5), d(1, 4)]);
}

#[test]
fn sink_sees_every_step_in_order() {
    let poly = arrowhead();
    let mut log = StepLog::default();
    let cv = classify(&poly, SweepCfg::default(), &mut log).unwrap();
    let diags = triangulate(&poly, SweepCfg::default(), &mut log).unwrap();
    assert_eq!(log.vertices, cv);
    assert_eq!(
        log.vertices.iter().map(|v| v.index).collect::<Vec<_>>(),
        (0..6).collect::<Vec<_>>()
    );
    assert_eq!(log.diagonals, diags);
}

struct Budget(usize);

impl Steps for Budget {
    fn proceed(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        true
    }
}

#[test]
fn checkpoint_interrupts_classification_and_triangulation() {
    let poly = arrowhead();
    assert_eq!(
        classify(&poly, SweepCfg::default(), &mut Budget(2)),
        Err(StepError::Interrupted)
    );
    assert_eq!(
        triangulate(&poly, SweepCfg::default(), &mut Budget(1)),
        Err(StepError::Interrupted)
    );
    assert!(classify(&poly, SweepCfg::default(), &mut Budget(6)).is_ok());
}

#[test]
fn chain_tags_split_at_extremes() {
    let tags = chain_tags(&arrowhead(), SweepOrder::YThenX);
    use Chain::{Left, Right};
    assert_eq!(tags, vec![Right, Right, Right, Left, Left, Left]);
}

#[test]
fn repeated_runs_are_identical() {
    let poly = draw_y_monotone(MonotoneCfg::default(), ReplayToken { seed: 5, index: 1 });
    let a = triangulate_monotone(&poly, SweepCfg::default()).unwrap();
    let b = triangulate_monotone(&poly, SweepCfg::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn diagonal_is_unordered() {
    assert_eq!(Diagonal::new(3, 1), Diagonal::new(1, 3));
    assert!(Diagonal::new(2, 2).is_none());
    assert_eq!(d(4, 2).to_string(), "2–4");
}

/// Integer-grid polygon, monotone under (y, then x), with `mid + 2` vertices.
///
/// Bottom `(0, 0)` and top `(0, h + 1)` are the unique extremes. The right
/// chain lives in `x >= 1` and the left chain in `x <= -1`; both sit on few
/// rows so equal-y runs and collinear triples are common.
fn grid_monotone(seed: u64, mid: usize) -> Polygon {
    let mut rng = StdRng::seed_from_u64(seed);
    let h = 1 + mid as i32 / 3;
    let mut right = BTreeSet::new();
    let mut left = BTreeSet::new();
    while right.len() + left.len() < mid {
        let y = rng.gen_range(1..=h);
        let x = rng.gen_range(1..=4);
        if rng.gen::<bool>() {
            right.insert((y, x));
        } else {
            left.insert((y, -x));
        }
    }
    let mut vs = vec![Point::new(0.0, 0.0)];
    vs.extend(right.iter().map(|&(y, x)| Point::new(x as f64, y as f64)));
    vs.push(Point::new(0.0, (h + 1) as f64));
    vs.extend(left.iter().rev().map(|&(y, x)| Point::new(x as f64, y as f64)));
    Polygon::new(vs)
}

#[test]
fn staircase_with_flat_runs_triangulates() {
    // Flat runs on both chains and a vertical collinear run on the right.
    let poly = Polygon::from_coords(&[
        (0.0, 0.0),
        (1.0, 1.0),
        (2.0, 1.0),
        (3.0, 1.0),
        (3.0, 2.0),
        (3.0, 3.0),
        (0.0, 4.0),
        (-1.0, 3.0),
        (-2.0, 3.0),
        (-3.0, 3.0),
        (-3.0, 2.0),
        (-1.0, 1.0),
    ]);
    let cv = classify_vertices(&poly, SweepCfg::default()).unwrap();
    let [_, _, split, merge, _] = type_counts(&cv);
    assert_eq!((split, merge), (0, 0));
    let diags = triangulate_monotone(&poly, SweepCfg::default()).unwrap();
    assert_valid_triangulation(&poly, &diags);
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn random_y_monotone_triangulates(seed in any::<u64>(), n in 3usize..40) {
        let cfg = MonotoneCfg { vertices: n, ..MonotoneCfg::default() };
        let poly = draw_y_monotone(cfg, ReplayToken { seed, index: 0 });
        let cv = classify_vertices(&poly, SweepCfg::default()).unwrap();
        let [start, end, split, merge, _] = type_counts(&cv);
        prop_assert_eq!((start, end, split, merge), (1, 1, 0, 0));
        let diags = triangulate_monotone(&poly, SweepCfg::default()).unwrap();
        assert_valid_triangulation(&poly, &diags);
    }

    #[test]
    fn random_x_monotone_triangulates(seed in any::<u64>(), n in 3usize..40) {
        let cfg = MonotoneCfg { vertices: n, ..MonotoneCfg::default() };
        let poly = draw_x_monotone(cfg, ReplayToken { seed, index: 1 });
        let sweep = SweepCfg { order: SweepOrder::XThenY };
        let diags = triangulate_monotone(&poly, sweep).unwrap();
        assert_valid_triangulation(&poly, &diags);
    }

    #[test]
    fn grid_monotone_with_ties_triangulates(seed in any::<u64>(), mid in 1usize..30) {
        let poly = grid_monotone(seed, mid);
        let cv = classify_vertices(&poly, SweepCfg::default()).unwrap();
        let [_, _, split, merge, _] = type_counts(&cv);
        prop_assert_eq!((split, merge), (0, 0));
        let diags = triangulate_monotone(&poly, SweepCfg::default()).unwrap();
        assert_valid_triangulation(&poly, &diags);
    }
}
