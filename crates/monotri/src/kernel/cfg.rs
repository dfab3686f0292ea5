//! Fixed kernel tolerances.
//!
//! Policy
//! - The kernel is eps-free except for the normalization guard below; sign
//!   decisions go through the fast or exact predicate, never a tolerance.

/// `normalize` rejects vectors whose Euclidean norm is at most this value.
pub const NORMALIZE_EPS: f64 = 1e-20;
