//! Monotone-polygon pipeline: vertex classification and triangulation.
//!
//! Purpose
//! - `classify`: start/end/split/merge/regular per vertex, relative to a sweep order.
//! - `triangulate`: classic two-chain stack algorithm producing `n − 3` diagonals
//!   for a monotone polygon, reported in discovery order.
//! - `triangles`: derive the faces from boundary edges plus diagonals.
//!
//! Robustness
//! - Both convex/reflex decisions go through `kernel::orient2d_exact`.
//! - Collinear neighbour triples are treated as `Regular` and never fail.
//!
//! Preconditions (not verified)
//! - Simple, counter-clockwise ring; monotone w.r.t. the sweep for `triangulate`.

mod classify;
mod triangles;
mod triangulate;
mod types;

pub use classify::{classify, classify_vertex, classify_vertices, type_counts};
pub use triangles::{triangles, triangles_area2};
pub use triangulate::{chain_tags, triangulate, triangulate_monotone};
pub use types::{
    Chain, ClassifiedVertex, Diagonal, StepError, StepLog, Steps, SweepCfg, SweepOrder, Triangle,
    VertexType,
};

#[cfg(test)]
mod tests;
