//! Value types of the kernel: points, segments, rectangles, polygons.
//!
//! - `Point`: alias of `nalgebra::Vector2<f64>`; equality is exact per component.
//! - `Segment`: ordered pair, direction matters for orientation tests.
//! - `Rect`: axis-aligned box, constructors keep `left <= right`, `bottom <= top`.
//! - `Polygon`: closed ring, vertex `i` joined to `(i + 1) % n`.

use std::fmt;

use nalgebra::Vector2;

use super::ops::{dist, dist_sq, lerp_point, translate};
use super::predicates::{orient2d, signed_area2};

/// 2D point (and free vector).
pub type Point = Vector2<f64>;

/// Kernel-level failures. Operations fail immediately; no partial value is returned.
#[derive(Clone, Debug, PartialEq)]
pub enum KernelError {
    /// `normalize` of a vector with `‖v‖ <= NORMALIZE_EPS`.
    DegenerateVector { norm: f64 },
    /// Interpolation parameter beyond the last index of the sequence.
    OutOfRange { t: f64, max: f64 },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::DegenerateVector { norm } => {
                write!(f, "cannot normalize near-zero vector (norm {norm:e})")
            }
            KernelError::OutOfRange { t, max } => {
                write!(f, "interpolation parameter {t} outside [0, {max}]")
            }
        }
    }
}

impl std::error::Error for KernelError {}

/// Directed segment `a → b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    #[inline]
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Direction vector `b − a`.
    #[inline]
    pub fn to_vec(&self) -> Point {
        self.b - self.a
    }

    #[inline]
    pub fn length(&self) -> f64 {
        dist(self.a, self.b)
    }

    #[inline]
    pub fn length_sq(&self) -> f64 {
        dist_sq(self.a, self.b)
    }

    /// Point at parameter `t` (0 at `a`, 1 at `b`).
    #[inline]
    pub fn lerp(&self, t: f64) -> Point {
        lerp_point(t, self.a, self.b)
    }

    #[inline]
    pub fn translate(&self, d: Point) -> Segment {
        Segment::new(translate(self.a, d), translate(self.b, d))
    }

    /// Fast orientation of `p` relative to the directed line `a → b`.
    #[inline]
    pub fn orient(&self, p: Point) -> f64 {
        orient2d(self.a, self.b, p)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[({}, {}), ({}, {})]",
            self.a.x, self.a.y, self.b.x, self.b.y
        )
    }
}

/// Axis-aligned rectangle (y grows upward, so `top >= bottom`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
}

impl Rect {
    /// Box spanned by two corner coordinates in any order.
    pub fn bounds(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            left: x0.min(x1),
            right: x0.max(x1),
            bottom: y0.min(y1),
            top: y0.max(y1),
        }
    }

    /// `[-rx, rx] × [-ry, ry]`.
    pub fn around_origin(rx: f64, ry: f64) -> Self {
        Self::bounds(-rx, -ry, rx, ry)
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.left
    }
    #[inline]
    pub fn right(&self) -> f64 {
        self.right
    }
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.bottom
    }
    #[inline]
    pub fn top(&self) -> f64 {
        self.top
    }
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }
    #[inline]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }
    #[inline]
    pub fn left_top(&self) -> Point {
        Point::new(self.left, self.top)
    }
    #[inline]
    pub fn right_bottom(&self) -> Point {
        Point::new(self.right, self.bottom)
    }
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            0.5 * (self.left + self.right),
            0.5 * (self.bottom + self.top),
        )
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            right: self.right.max(other.right),
            bottom: self.bottom.min(other.bottom),
            top: self.top.max(other.top),
        }
    }
}

/// Closed polygonal ring.
///
/// Precondition (not checked): the ring is simple. Algorithms that need at
/// least three vertices report the violation themselves, so construction is total.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub vs: Vec<Point>,
}

impl Polygon {
    #[inline]
    pub fn new(vs: Vec<Point>) -> Self {
        Self { vs }
    }

    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vs.is_empty()
    }

    #[inline]
    pub fn vertex(&self, i: usize) -> Option<Point> {
        self.vs.get(i).copied()
    }

    /// Ring predecessor of `i`. Caller guarantees `i < len`.
    #[inline]
    pub fn prev(&self, i: usize) -> usize {
        (i + self.vs.len() - 1) % self.vs.len()
    }

    /// Ring successor of `i`. Caller guarantees `i < len`.
    #[inline]
    pub fn next(&self, i: usize) -> usize {
        (i + 1) % self.vs.len()
    }

    /// True if `i` and `j` share a boundary edge.
    pub fn is_adjacent(&self, i: usize, j: usize) -> bool {
        let n = self.vs.len();
        if n == 0 || i >= n || j >= n {
            return false;
        }
        self.next(i) == j || self.next(j) == i
    }

    /// Boundary edges `(v_i, v_{i+1})`, closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.vs.len()).map(move |i| Segment::new(self.vs[i], self.vs[self.next(i)]))
    }

    /// Twice the signed area (shoelace); positive for counter-clockwise rings.
    pub fn signed_area2(&self) -> f64 {
        signed_area2(&self.vs)
    }

    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.signed_area2() > 0.0
    }

    /// Same ring traversed the other way.
    pub fn reversed(&self) -> Polygon {
        let mut vs = self.vs.clone();
        vs.reverse();
        Polygon { vs }
    }

    /// Copy in counter-clockwise order (reversed if needed).
    pub fn to_ccw(&self) -> Polygon {
        if self.signed_area2() < 0.0 {
            self.reversed()
        } else {
            self.clone()
        }
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(vs: Vec<Point>) -> Self {
        Polygon::new(vs)
    }
}
