//! Per-vertex classification into start/end/split/merge/regular.
//!
//! Classification is local: a vertex's class depends only on its two ring
//! neighbours and the sweep order, so vertices are reported in index order.

use crate::kernel::{orient2d_exact, Point, Polygon};

use super::types::{ClassifiedVertex, StepError, Steps, SweepCfg, SweepOrder, VertexType};

/// Class of `v` given its predecessor `p` and successor `n` on a CCW ring.
///
/// The convex/reflex decision uses the exact predicate: a flipped sign would
/// swap start/split or end/merge. Exactly collinear triples are `Regular`.
pub fn classify_vertex(p: Point, v: Point, n: Point, order: SweepOrder) -> VertexType {
    let p_below = order.below(&p, &v);
    let n_below = order.below(&n, &v);
    if p_below != n_below {
        return VertexType::Regular;
    }
    let turn = orient2d_exact(p, v, n);
    if turn == 0.0 {
        return VertexType::Regular;
    }
    let convex = turn > 0.0;
    match (p_below, convex) {
        (true, true) => VertexType::Start,
        (true, false) => VertexType::Split,
        (false, true) => VertexType::End,
        (false, false) => VertexType::Merge,
    }
}

/// Classify every vertex of a CCW polygon, reporting each to `sink` in index order.
///
/// Orientation is the caller's responsibility (`Polygon::to_ccw`).
pub fn classify<S: Steps + ?Sized>(
    poly: &Polygon,
    cfg: SweepCfg,
    sink: &mut S,
) -> Result<Vec<ClassifiedVertex>, StepError> {
    let n = poly.len();
    if n < 3 {
        return Err(StepError::TooFewVertices { found: n });
    }
    let mut out = Vec::with_capacity(n);
    for index in 0..n {
        if !sink.proceed() {
            return Err(StepError::Interrupted);
        }
        let prev = poly.prev(index);
        let next = poly.next(index);
        let point = poly.vs[index];
        let kind = classify_vertex(poly.vs[prev], point, poly.vs[next], cfg.order);
        let cv = ClassifiedVertex {
            index,
            point,
            kind,
            prev,
            next,
        };
        sink.vertex_classified(&cv);
        out.push(cv);
    }
    Ok(out)
}

/// `classify` without observation.
pub fn classify_vertices(poly: &Polygon, cfg: SweepCfg) -> Result<Vec<ClassifiedVertex>, StepError> {
    classify(poly, cfg, &mut ())
}

/// Per-class counts in `VertexType::ALL` order.
pub fn type_counts(vertices: &[ClassifiedVertex]) -> [usize; 5] {
    let mut counts = [0usize; 5];
    for v in vertices {
        let slot = VertexType::ALL
            .iter()
            .position(|&t| t == v.kind)
            .unwrap_or(4);
        counts[slot] += 1;
    }
    counts
}
