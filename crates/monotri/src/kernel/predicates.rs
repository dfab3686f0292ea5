//! Orientation predicates (fast and exact) and the tests derived from them.
//!
//! Two-tier policy
//! - `orient2d` is the fast floating-point formula and the default everywhere.
//! - `orient2d_exact` returns a value with the correct sign for every finite
//!   input. Use it where a wrong sign changes a combinatorial decision, e.g. the
//!   convex/reflex test of the classifier and the triangulator's stack pops.

use super::expansion::{
    estimate, expansion_sum, two_diff_tail, two_prod, two_two_diff, CCW_ERR_BOUND_A,
    CCW_ERR_BOUND_B, CCW_ERR_BOUND_C, RESULT_ERR_BOUND,
};
use super::types::Point;

/// Sign class of an orientation value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

impl Orientation {
    #[inline]
    pub fn of(det: f64) -> Self {
        if det > 0.0 {
            Orientation::CounterClockwise
        } else if det < 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }
    #[inline]
    pub fn is_ccw(self) -> bool {
        self == Orientation::CounterClockwise
    }
    #[inline]
    pub fn is_cw(self) -> bool {
        self == Orientation::Clockwise
    }
    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::Collinear => Orientation::Collinear,
            Orientation::CounterClockwise => Orientation::Clockwise,
        }
    }
}

/// Default orientation predicate (fast).
#[inline]
pub fn orient2d(a: Point, b: Point, c: Point) -> f64 {
    orient2d_fast(a, b, c)
}

/// Twice the signed area of `(a, b, c)`: `(a − c) × (b − c)`.
///
/// Positive for counter-clockwise, negative for clockwise, zero for collinear.
/// Cancellation can flip or zero the sign for nearly collinear inputs.
#[inline]
pub fn orient2d_fast(a: Point, b: Point, c: Point) -> f64 {
    (a.x - c.x) * (b.y - c.y) - (a.y - c.y) * (b.x - c.x)
}

/// Same determinant expanded into six products; worse conditioning than
/// `orient2d_fast` far from the origin. Kept for cross-checks.
#[inline]
pub fn orient2d_fast_expanded(a: Point, b: Point, c: Point) -> f64 {
    a.x * b.y - a.y * b.x - a.x * c.y + a.y * c.x + b.x * c.y - b.y * c.x
}

/// Adaptive exact orientation: the returned value has the sign of the exact
/// determinant for every finite input.
///
/// Stages: a filtered float evaluation, then progressively longer expansions
/// only when the error bound of the previous stage cannot certify the sign.
pub fn orient2d_exact(a: Point, b: Point, c: Point) -> f64 {
    let detleft = (a.x - c.x) * (b.y - c.y);
    let detright = (a.y - c.y) * (b.x - c.x);
    let det = detleft - detright;

    let detsum = if detleft > 0.0 {
        if detright <= 0.0 {
            return det;
        }
        detleft + detright
    } else if detleft < 0.0 {
        if detright >= 0.0 {
            return det;
        }
        -detleft - detright
    } else {
        return det;
    };

    let errbound = CCW_ERR_BOUND_A * detsum;
    if det >= errbound || -det >= errbound {
        return det;
    }
    orient2d_adapt(a, b, c, detsum)
}

fn orient2d_adapt(a: Point, b: Point, c: Point, detsum: f64) -> f64 {
    let acx = a.x - c.x;
    let bcx = b.x - c.x;
    let acy = a.y - c.y;
    let bcy = b.y - c.y;

    let (detleft, detlefttail) = two_prod(acx, bcy);
    let (detright, detrighttail) = two_prod(acy, bcx);
    let b_exp = two_two_diff(detleft, detlefttail, detright, detrighttail);

    let mut det = estimate(&b_exp);
    let errbound = CCW_ERR_BOUND_B * detsum;
    if det >= errbound || -det >= errbound {
        return det;
    }

    let acxtail = two_diff_tail(a.x, c.x, acx);
    let bcxtail = two_diff_tail(b.x, c.x, bcx);
    let acytail = two_diff_tail(a.y, c.y, acy);
    let bcytail = two_diff_tail(b.y, c.y, bcy);

    if acxtail == 0.0 && acytail == 0.0 && bcxtail == 0.0 && bcytail == 0.0 {
        return det;
    }

    let errbound = CCW_ERR_BOUND_C * detsum + RESULT_ERR_BOUND * det.abs();
    det += (acx * bcytail + bcy * acxtail) - (acy * bcxtail + bcx * acytail);
    if det >= errbound || -det >= errbound {
        return det;
    }

    let (s1, s0) = two_prod(acxtail, bcy);
    let (t1, t0) = two_prod(acytail, bcx);
    let u = two_two_diff(s1, s0, t1, t0);
    let c1 = expansion_sum(&b_exp, &u);

    let (s1, s0) = two_prod(acx, bcytail);
    let (t1, t0) = two_prod(acy, bcxtail);
    let u = two_two_diff(s1, s0, t1, t0);
    let c2 = expansion_sum(&c1, &u);

    let (s1, s0) = two_prod(acxtail, bcytail);
    let (t1, t0) = two_prod(acytail, bcxtail);
    let u = two_two_diff(s1, s0, t1, t0);
    let d = expansion_sum(&c2, &u);

    // Largest component carries the sign of the exact sum.
    d.last().copied().unwrap_or(0.0)
}

#[inline]
pub fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    Orientation::of(orient2d(a, b, c))
}

#[inline]
pub fn orientation_exact(a: Point, b: Point, c: Point) -> Orientation {
    Orientation::of(orient2d_exact(a, b, c))
}

#[inline]
pub fn ccw(a: Point, b: Point, c: Point) -> bool {
    orient2d(a, b, c) > 0.0
}

#[inline]
pub fn cw(a: Point, b: Point, c: Point) -> bool {
    orient2d(a, b, c) < 0.0
}

#[inline]
pub fn colinear(a: Point, b: Point, c: Point) -> bool {
    orient2d(a, b, c) == 0.0
}

#[inline]
pub fn ccw_exact(a: Point, b: Point, c: Point) -> bool {
    orient2d_exact(a, b, c) > 0.0
}

#[inline]
pub fn colinear_exact(a: Point, b: Point, c: Point) -> bool {
    orient2d_exact(a, b, c) == 0.0
}

/// Twice the signed area of a closed ring (shoelace, fast arithmetic).
pub fn signed_area2(vs: &[Point]) -> f64 {
    let n = vs.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let p = vs[i];
            let q = vs[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum()
}

/// Collapses runs of collinear points in an open chain, keeping both endpoints.
///
/// Uses the exact predicate, so only truly collinear middles are dropped.
pub fn remove_colinear(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        while out.len() >= 2 && colinear_exact(out[out.len() - 2], out[out.len() - 1], p) {
            out.pop();
        }
        out.push(p);
    }
    out
}
