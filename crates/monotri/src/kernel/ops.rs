//! Vector arithmetic, interpolation, membership tests and point orders.
//!
//! Thin named wrappers over `nalgebra` operators where the kernel vocabulary
//! differs (`max_norm`, `lerp_poly`, ...). All functions are pure.

use std::cmp::Ordering;

use super::cfg::NORMALIZE_EPS;
use super::types::{KernelError, Point, Rect};

#[inline]
pub fn sum(a: Point, b: Point) -> Point {
    a + b
}

#[inline]
pub fn diff(a: Point, b: Point) -> Point {
    a - b
}

#[inline]
pub fn neg(a: Point) -> Point {
    -a
}

#[inline]
pub fn mul(s: f64, a: Point) -> Point {
    a * s
}

#[inline]
pub fn dot(a: Point, b: Point) -> f64 {
    a.dot(&b)
}

/// Euclidean norm (`hypot`, no intermediate overflow).
#[inline]
pub fn norm(a: Point) -> f64 {
    a.x.hypot(a.y)
}

#[inline]
pub fn norm_sq(a: Point) -> f64 {
    a.x * a.x + a.y * a.y
}

/// Chebyshev norm `max(|x|, |y|)`.
#[inline]
pub fn max_norm(a: Point) -> f64 {
    a.x.abs().max(a.y.abs())
}

#[inline]
pub fn dist(a: Point, b: Point) -> f64 {
    norm(a - b)
}

#[inline]
pub fn dist_sq(a: Point, b: Point) -> f64 {
    norm_sq(a - b)
}

#[inline]
pub fn max_dist(a: Point, b: Point) -> f64 {
    max_norm(a - b)
}

/// Unit vector along `a`; fails for `‖a‖ <= NORMALIZE_EPS`.
pub fn normalize(a: Point) -> Result<Point, KernelError> {
    let n = norm(a);
    if n.abs() > NORMALIZE_EPS {
        Ok(a * (1.0 / n))
    } else {
        Err(KernelError::DegenerateVector { norm: n })
    }
}

#[inline]
pub fn translate(p: Point, d: Point) -> Point {
    p + d
}

#[inline]
pub fn clamp(t: f64, a: f64, b: f64) -> f64 {
    if t < a {
        a
    } else if t > b {
        b
    } else {
        t
    }
}

#[inline]
pub fn in_interval(t: f64, a: f64, b: f64) -> bool {
    a <= t && t <= b
}

/// `(1 − t)·a + t·b`.
#[inline]
pub fn lerp(t: f64, a: f64, b: f64) -> f64 {
    t * b + (1.0 - t) * a
}

#[inline]
pub fn lerp_point(t: f64, a: Point, b: Point) -> Point {
    Point::new(lerp(t, a.x, b.x), lerp(t, a.y, b.y))
}

/// Piecewise-linear interpolation along `pts`, parameter in `[0, len − 1]`.
///
/// `t == len − 1` returns the last point exactly. Any `t` outside the range
/// (negative, past the end, NaN) or an empty sequence is `OutOfRange`.
pub fn lerp_poly(t: f64, pts: &[Point]) -> Result<Point, KernelError> {
    let max = pts.len() as f64 - 1.0;
    if pts.is_empty() || !(0.0..=max).contains(&t) {
        return Err(KernelError::OutOfRange { t, max: max.max(0.0) });
    }
    if t == max {
        return Ok(pts[pts.len() - 1]);
    }
    // 0 <= t < max, so `k + 1 <= len − 1`.
    let k = t as usize;
    Ok(lerp_point(t - k as f64, pts[k], pts[k + 1]))
}

/// Orthogonal projection of `p` onto the line through `a` and `b`.
pub fn project(a: Point, b: Point, p: Point) -> Point {
    let ab = b - a;
    let ap = p - a;
    let t = dot(ab, ap) / norm_sq(ab);
    lerp_point(t, a, b)
}

#[inline]
pub fn in_rect(rect: &Rect, p: Point) -> bool {
    in_interval(p.x, rect.left(), rect.right()) && in_interval(p.y, rect.bottom(), rect.top())
}

/// Closed disk of radius `r` around the origin.
#[inline]
pub fn in_circle(r: f64, p: Point) -> bool {
    norm_sq(p) <= r * r
}

/// Closed square `[-r, r]²`.
#[inline]
pub fn in_square(r: f64, p: Point) -> bool {
    max_norm(p) <= r
}

/// Axis-aligned bounding box; `None` for an empty set.
pub fn aabb(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let (mut left, mut right, mut bottom, mut top) = (first.x, first.x, first.y, first.y);
    for p in &points[1..] {
        left = left.min(p.x);
        right = right.max(p.x);
        bottom = bottom.min(p.y);
        top = top.max(p.y);
    }
    Some(Rect::bounds(left, bottom, right, top))
}

/// Coordinates equal under `==` (including `0.0` and `-0.0`) compare `Equal`;
/// otherwise `total_cmp`, which also places NaN deterministically.
#[inline]
fn cmp_coord(a: f64, b: f64) -> Ordering {
    if a == b {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Lexicographic order: x first, ties broken by y.
#[inline]
pub fn cmp_xy(a: &Point, b: &Point) -> Ordering {
    cmp_coord(a.x, b.x).then_with(|| cmp_coord(a.y, b.y))
}

/// Sweep order: y first, ties broken by x.
#[inline]
pub fn cmp_yx(a: &Point, b: &Point) -> Ordering {
    cmp_coord(a.y, b.y).then_with(|| cmp_coord(a.x, b.x))
}
