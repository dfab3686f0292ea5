//! Vector/predicate kernel for 2D points.
//!
//! Purpose
//! - Immutable value types (`Point`, `Segment`, `Rect`, `Polygon`).
//! - Pure arithmetic, interpolation and membership helpers.
//! - Orientation predicates in two tiers: fast float (`orient2d`) and
//!   adaptive exact (`orient2d_exact`).
//!
//! Conventions
//! - `Point` is `nalgebra::Vector2<f64>`; points and free vectors share a type.
//! - Positive orientation means counter-clockwise (y up).
//! - Failures (`KernelError`) are returned immediately, never partially.

pub mod cfg;
mod expansion;
mod ops;
mod predicates;
mod types;

pub use ops::{
    aabb, clamp, cmp_xy, cmp_yx, diff, dist, dist_sq, dot, in_circle, in_interval, in_rect,
    in_square, lerp, lerp_point, lerp_poly, max_dist, max_norm, mul, neg, norm, norm_sq,
    normalize, project, sum, translate,
};
pub use predicates::{
    ccw, ccw_exact, colinear, colinear_exact, cw, orient2d, orient2d_exact, orient2d_fast,
    orient2d_fast_expanded, orientation, orientation_exact, remove_colinear, signed_area2,
    Orientation,
};
pub use types::{KernelError, Point, Polygon, Rect, Segment};
