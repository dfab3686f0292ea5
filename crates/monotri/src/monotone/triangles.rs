//! Triangle extraction from boundary edges plus diagonals.
//!
//! In a triangulated simple polygon every vertex lies on the outer face, so
//! each 3-cycle of the edge graph bounds exactly one triangle.

use crate::kernel::{orient2d_exact, Polygon};

use super::types::{Diagonal, Triangle};

/// Faces of the decomposition, each counter-clockwise, ordered by their
/// sorted vertex triple.
///
/// Returns `n − 2` triangles for a valid triangulation; fewer or more signal
/// missing or crossing diagonals.
pub fn triangles(poly: &Polygon, diagonals: &[Diagonal]) -> Vec<Triangle> {
    let n = poly.len();
    if n < 3 {
        return Vec::new();
    }
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut link = |i: usize, j: usize| {
        adj[i].push(j);
        adj[j].push(i);
    };
    for i in 0..n {
        link(i, poly.next(i));
    }
    for d in diagonals {
        if d.hi() < n {
            link(d.lo(), d.hi());
        }
    }
    for list in &mut adj {
        list.sort_unstable();
        list.dedup();
    }

    let mut out = Vec::with_capacity(n - 2);
    for i in 0..n {
        for &j in adj[i].iter().filter(|&&j| j > i) {
            for &k in adj[j].iter().filter(|&&k| k > j) {
                if adj[i].binary_search(&k).is_err() {
                    continue;
                }
                let turn = orient2d_exact(poly.vs[i], poly.vs[j], poly.vs[k]);
                out.push(if turn < 0.0 {
                    Triangle([i, k, j])
                } else {
                    Triangle([i, j, k])
                });
            }
        }
    }
    out
}

/// Twice the summed signed area of `tris`; equals `poly.signed_area2()` up to
/// rounding when the triangles tile the polygon.
pub fn triangles_area2(poly: &Polygon, tris: &[Triangle]) -> f64 {
    tris.iter()
        .map(|Triangle([a, b, c])| {
            let (pa, pb, pc) = (poly.vs[*a], poly.vs[*b], poly.vs[*c]);
            (pb - pa).perp(&(pc - pa))
        })
        .sum()
}
