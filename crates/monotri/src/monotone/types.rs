//! Data types shared by the classifier and the triangulator.
//!
//! Kept small and explicit so `classify` and `triangulate` read top to bottom.

use std::cmp::Ordering;
use std::fmt;

use crate::kernel::{cmp_xy, cmp_yx, Point};

/// Vertex class relative to the sweep direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexType {
    Start,
    End,
    Split,
    Merge,
    Regular,
}

impl VertexType {
    pub const ALL: [VertexType; 5] = [
        VertexType::Start,
        VertexType::End,
        VertexType::Split,
        VertexType::Merge,
        VertexType::Regular,
    ];

    pub fn name(self) -> &'static str {
        match self {
            VertexType::Start => "start",
            VertexType::End => "end",
            VertexType::Split => "split",
            VertexType::Merge => "merge",
            VertexType::Regular => "regular",
        }
    }
}

impl fmt::Display for VertexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A vertex with its class and ring neighbours. Never mutated after creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifiedVertex {
    pub index: usize,
    pub point: Point,
    pub kind: VertexType,
    pub prev: usize,
    pub next: usize,
}

/// Triangulation chord between two non-adjacent vertices.
///
/// Unordered: `Diagonal::new(3, 1) == Diagonal::new(1, 3)`; stored as `lo < hi`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Diagonal {
    lo: usize,
    hi: usize,
}

impl Diagonal {
    /// `None` when both ends coincide.
    pub fn new(i: usize, j: usize) -> Option<Self> {
        match i.cmp(&j) {
            Ordering::Less => Some(Self { lo: i, hi: j }),
            Ordering::Greater => Some(Self { lo: j, hi: i }),
            Ordering::Equal => None,
        }
    }
    #[inline]
    pub fn lo(&self) -> usize {
        self.lo
    }
    #[inline]
    pub fn hi(&self) -> usize {
        self.hi
    }
    #[inline]
    pub fn ends(&self) -> (usize, usize) {
        (self.lo, self.hi)
    }
    #[inline]
    pub fn touches(&self, v: usize) -> bool {
        self.lo == v || self.hi == v
    }
}

impl fmt::Display for Diagonal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.lo, self.hi)
    }
}

/// Face of the decomposition, vertex indices in counter-clockwise order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle(pub [usize; 3]);

/// Boundary chain of a monotone polygon, split at its lowest and highest vertex.
///
/// `Right` holds the vertices met walking forward (CCW) from the bottom,
/// `Left` those met walking forward from the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Chain {
    Left,
    Right,
}

/// Which coordinate the sweep line advances along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SweepOrder {
    /// Horizontal sweep line moving up: y first, ties broken by x.
    #[default]
    YThenX,
    /// Vertical sweep line moving right: x first, ties broken by y.
    XThenY,
}

impl SweepOrder {
    #[inline]
    pub fn cmp(self, a: &Point, b: &Point) -> Ordering {
        match self {
            SweepOrder::YThenX => cmp_yx(a, b),
            SweepOrder::XThenY => cmp_xy(a, b),
        }
    }

    /// `a` strictly precedes `b` along the sweep.
    #[inline]
    pub fn below(self, a: &Point, b: &Point) -> bool {
        self.cmp(a, b) == Ordering::Less
    }
}

/// Sweep configuration shared by classification and triangulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepCfg {
    pub order: SweepOrder,
}

/// Reasons a classification or triangulation run stops early.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// Polygon with fewer than three vertices.
    TooFewVertices { found: usize },
    /// Diagonal count differs from `n − 3`; the monotonicity precondition was violated.
    DiagonalCount { expected: usize, found: usize },
    /// The reflex-chain stack ran dry while processing `vertex`.
    StackUnderflow { vertex: usize },
    /// The sink asked to stop at a checkpoint.
    Interrupted,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::TooFewVertices { found } => {
                write!(f, "polygon needs at least 3 vertices, got {found}")
            }
            StepError::DiagonalCount { expected, found } => write!(
                f,
                "expected {expected} diagonals, found {found} (polygon not monotone?)"
            ),
            StepError::StackUnderflow { vertex } => {
                write!(f, "reflex-chain stack underflow at vertex {vertex}")
            }
            StepError::Interrupted => write!(f, "interrupted at checkpoint"),
        }
    }
}

impl std::error::Error for StepError {}

/// Receiver for algorithm steps, called synchronously in algorithm order.
///
/// `proceed` is polled at checkpoints between steps; returning `false` stops
/// the run with `StepError::Interrupted`. `()` is the no-op sink.
pub trait Steps {
    fn vertex_classified(&mut self, _v: &ClassifiedVertex) {}
    fn diagonal_added(&mut self, _d: Diagonal) {}
    fn proceed(&mut self) -> bool {
        true
    }
}

impl Steps for () {}

/// Collects every step; handy in tests.
#[derive(Clone, Debug, Default)]
pub struct StepLog {
    pub vertices: Vec<ClassifiedVertex>,
    pub diagonals: Vec<Diagonal>,
}

impl Steps for StepLog {
    fn vertex_classified(&mut self, v: &ClassifiedVertex) {
        self.vertices.push(*v);
    }
    fn diagonal_added(&mut self, d: Diagonal) {
        self.diagonals.push(d);
    }
}
