//! Reproducible random monotone polygons (chain split + replay tokens).
//!
//! Purpose
//! - Deterministic fixtures for tests, benchmarks and the CLI `sample` command.
//!
//! Model
//! - `n` strictly increasing heights `y_k ∈ [k, k + jitter]`.
//! - Lowest and highest vertex sit near `x = 0`; every other height goes to
//!   the right chain (`x > 0`) or the left chain (`x < 0`) by a fair coin.
//! - Chains are separated by a vertical strip around `x = 0`, so the ring is
//!   simple, counter-clockwise and strictly y-monotone by construction.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::kernel::{Point, Polygon};

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct MonotoneCfg {
    /// Vertex count; values below 3 are raised to 3.
    pub vertices: usize,
    /// Maximum `|x|` of chain vertices.
    pub half_width: f64,
    /// Height jitter per level, clamped to `[0, 0.9]`.
    pub jitter: f64,
}

impl Default for MonotoneCfg {
    fn default() -> Self {
        Self {
            vertices: 16,
            half_width: 4.0,
            jitter: 0.6,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a simple, CCW, strictly y-monotone polygon.
pub fn draw_y_monotone(cfg: MonotoneCfg, tok: ReplayToken) -> Polygon {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertices.max(3);
    let w = cfg.half_width.abs().max(1e-6);
    let jitter = cfg.jitter.clamp(0.0, 0.9);

    let ys: Vec<f64> = (0..n)
        .map(|k| k as f64 + jitter * rng.gen::<f64>())
        .collect();
    let mut right: Vec<f64> = Vec::new();
    let mut left: Vec<f64> = Vec::new();
    for &y in &ys[1..n - 1] {
        if rng.gen::<bool>() {
            right.push(y);
        } else {
            left.push(y);
        }
    }

    let mut vs = Vec::with_capacity(n);
    vs.push(Point::new(strip_x(&mut rng, w), ys[0]));
    for &y in &right {
        vs.push(Point::new(chain_x(&mut rng, w), y));
    }
    vs.push(Point::new(strip_x(&mut rng, w), ys[n - 1]));
    for &y in left.iter().rev() {
        vs.push(Point::new(-chain_x(&mut rng, w), y));
    }
    Polygon::new(vs)
}

/// Same draw rotated by −90°: simple, CCW, strictly x-monotone.
pub fn draw_x_monotone(cfg: MonotoneCfg, tok: ReplayToken) -> Polygon {
    let p = draw_y_monotone(cfg, tok);
    Polygon::new(p.vs.iter().map(|v| Point::new(v.y, -v.x)).collect())
}

/// `|x| <= 0.1 w` for the extreme vertices.
fn strip_x(rng: &mut StdRng, w: f64) -> f64 {
    0.1 * w * (2.0 * rng.gen::<f64>() - 1.0)
}

/// `x ∈ [0.2 w, w]` for chain vertices.
fn chain_x(rng: &mut StdRng, w: f64) -> f64 {
    w * (0.2 + 0.8 * rng.gen::<f64>())
}
