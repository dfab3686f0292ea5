//! Floating-point expansion arithmetic (Shewchuk, "Adaptive Precision
//! Floating-Point Arithmetic and Fast Robust Geometric Predicates", 1997).
//!
//! An expansion is a sequence of non-overlapping doubles, ordered by
//! increasing magnitude, whose exact sum is the represented value. All
//! routines below are error-free: the outputs represent the exact result.
//!
//! Round-to-nearest binary64 without overflow/underflow is assumed, as in
//! the paper.

/// Half an ulp of 1.0 (`2^-53`), the paper's `epsilon`.
pub(crate) const EPSILON: f64 = f64::EPSILON * 0.5;

pub(crate) const RESULT_ERR_BOUND: f64 = (3.0 + 8.0 * EPSILON) * EPSILON;
pub(crate) const CCW_ERR_BOUND_A: f64 = (3.0 + 16.0 * EPSILON) * EPSILON;
pub(crate) const CCW_ERR_BOUND_B: f64 = (2.0 + 12.0 * EPSILON) * EPSILON;
pub(crate) const CCW_ERR_BOUND_C: f64 = (9.0 + 64.0 * EPSILON) * EPSILON * EPSILON;

/// `a + b = s + err` exactly.
#[inline]
pub(crate) fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

/// `a − b = d + err` exactly.
#[inline]
pub(crate) fn two_diff(a: f64, b: f64) -> (f64, f64) {
    let d = a - b;
    (d, two_diff_tail(a, b, d))
}

/// Rounding error of `d = fl(a − b)`.
#[inline]
pub(crate) fn two_diff_tail(a: f64, b: f64, d: f64) -> f64 {
    let bvirt = a - d;
    let avirt = d + bvirt;
    let bround = bvirt - b;
    let around = a - avirt;
    around + bround
}

/// `a · b = p + err` exactly (fused multiply-add recovers the low part).
#[inline]
pub(crate) fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let err = f64::mul_add(a, b, -p);
    (p, err)
}

/// `(a1 + a0) − b` as a three-component expansion `[x0, x1, x2]`.
#[inline]
fn two_one_diff(a1: f64, a0: f64, b: f64) -> [f64; 3] {
    let (i, x0) = two_diff(a0, b);
    let (x2, x1) = two_sum(a1, i);
    [x0, x1, x2]
}

/// `(a1 + a0) − (b1 + b0)` as a four-component expansion, smallest first.
#[inline]
pub(crate) fn two_two_diff(a1: f64, a0: f64, b1: f64, b0: f64) -> [f64; 4] {
    let [x0, j0, j1] = two_one_diff(a1, a0, b0);
    let [x1, x2, x3] = two_one_diff(j1, j0, b1);
    [x0, x1, x2, x3]
}

/// Adds a scalar to an expansion, dropping zero components.
fn grow_expansion_zeroelim(e: &[f64], b: f64, out: &mut Vec<f64>) {
    out.clear();
    let mut q = b;
    for &enow in e {
        let (qnew, hh) = two_sum(q, enow);
        q = qnew;
        if hh != 0.0 {
            out.push(hh);
        }
    }
    if q != 0.0 || out.is_empty() {
        out.push(q);
    }
}

/// Exact sum of two expansions (repeated growth, zero components dropped).
///
/// Quadratic in the input sizes, which stay at most 16 for `orient2d`.
pub(crate) fn expansion_sum(e: &[f64], f: &[f64]) -> Vec<f64> {
    let mut h = e.to_vec();
    let mut scratch = Vec::with_capacity(e.len() + f.len());
    for &fnow in f {
        grow_expansion_zeroelim(&h, fnow, &mut scratch);
        std::mem::swap(&mut h, &mut scratch);
    }
    h
}

/// One-double approximation of an expansion.
#[inline]
pub(crate) fn estimate(e: &[f64]) -> f64 {
    e.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_sum_recovers_lost_bits() {
        let (s, e) = two_sum(1.0, 1e-20);
        assert_eq!(s, 1.0);
        assert_eq!(e, 1e-20);
        let (d, e) = two_diff(1.0, 1e-20);
        assert_eq!(d, 1.0);
        assert_eq!(e, -1e-20);
    }

    #[test]
    fn two_prod_is_exact() {
        let a = 1.0 + f64::EPSILON;
        let (p, e) = two_prod(a, a);
        // (1 + u)^2 = 1 + 2u + u^2; u^2 is the rounding error.
        assert_eq!(p, 1.0 + 2.0 * f64::EPSILON);
        assert_eq!(e, f64::EPSILON * f64::EPSILON);
    }

    #[test]
    fn expansion_sum_cancels_exactly() {
        let big = 1e16;
        let e = [1.0, big];
        let f = [-big];
        let h = expansion_sum(&e, &f);
        assert_eq!(estimate(&h), 1.0);
        // Zero elimination keeps a single non-zero component.
        assert_eq!(h, vec![1.0]);

        let z = expansion_sum(&[1.0], &[-1.0]);
        assert_eq!(z, vec![0.0]);
    }

    #[test]
    fn two_two_diff_sums_to_difference() {
        let x = two_two_diff(3.0, 1e-17, 1.0, -1e-17);
        assert_eq!(x[3] + x[2], 2.0);
        assert_eq!(x[1] + x[0], 2e-17);
    }
}
