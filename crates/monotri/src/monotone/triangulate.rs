//! Stack-based triangulation of a monotone polygon.
//!
//! Vertices are merged from the two boundary chains in sweep order. A stack
//! holds the reflex chain that cannot be cut yet; each new vertex either
//! closes a fan against the opposite chain or pops while the chord stays inside.
//! Every chord is reported the moment it is found; that order is observable.

use crate::kernel::{orient2d_exact, Polygon};

use super::types::{Chain, Diagonal, StepError, Steps, SweepCfg, SweepOrder};

/// Triangulate a monotone CCW polygon into `n − 3` diagonals.
///
/// Monotonicity with respect to `cfg.order` is assumed, not checked; violations
/// surface as `StepError::DiagonalCount` (or as unspecified chords).
pub fn triangulate<S: Steps + ?Sized>(
    poly: &Polygon,
    cfg: SweepCfg,
    sink: &mut S,
) -> Result<Vec<Diagonal>, StepError> {
    let n = poly.len();
    if n < 3 {
        return Err(StepError::TooFewVertices { found: n });
    }
    let chains = chain_tags(poly, cfg.order);
    let mut sorted: Vec<usize> = (0..n).collect();
    sorted.sort_by(|&i, &j| {
        cfg.order
            .cmp(&poly.vs[i], &poly.vs[j])
            .then_with(|| i.cmp(&j))
    });

    let mut run = Run {
        poly,
        chains: &chains,
        sink,
        stack: Vec::with_capacity(n),
        diagonals: Vec::with_capacity(n - 3),
    };
    run.stack.push(sorted[0]);
    run.stack.push(sorted[1]);
    for &u in &sorted[2..n - 1] {
        run.checkpoint()?;
        run.step(u)?;
    }
    run.checkpoint()?;
    run.close(sorted[n - 1])?;

    let found = run.diagonals.len();
    if found != n - 3 {
        return Err(StepError::DiagonalCount {
            expected: n - 3,
            found,
        });
    }
    Ok(run.diagonals)
}

/// `triangulate` without observation.
pub fn triangulate_monotone(poly: &Polygon, cfg: SweepCfg) -> Result<Vec<Diagonal>, StepError> {
    triangulate(poly, cfg, &mut ())
}

/// Chain membership per vertex: forward from the lowest vertex is `Right`,
/// forward from the highest is `Left`. Requires `n >= 1`.
pub fn chain_tags(poly: &Polygon, order: SweepOrder) -> Vec<Chain> {
    let n = poly.len();
    let extreme = |pick_max: bool| {
        (0..n)
            .reduce(|best, i| {
                let o = order.cmp(&poly.vs[i], &poly.vs[best]);
                if (pick_max && o.is_gt()) || (!pick_max && o.is_lt()) {
                    i
                } else {
                    best
                }
            })
            .unwrap_or(0)
    };
    let bottom = extreme(false);
    let top = extreme(true);
    let mut tags = vec![Chain::Left; n];
    let mut i = bottom;
    while i != top {
        tags[i] = Chain::Right;
        i = poly.next(i);
    }
    tags
}

struct Run<'a, S: Steps + ?Sized> {
    poly: &'a Polygon,
    chains: &'a [Chain],
    sink: &'a mut S,
    stack: Vec<usize>,
    diagonals: Vec<Diagonal>,
}

impl<S: Steps + ?Sized> Run<'_, S> {
    fn checkpoint(&mut self) -> Result<(), StepError> {
        if self.sink.proceed() {
            Ok(())
        } else {
            Err(StepError::Interrupted)
        }
    }

    fn pop(&mut self, vertex: usize) -> Result<usize, StepError> {
        self.stack.pop().ok_or(StepError::StackUnderflow { vertex })
    }

    fn emit(&mut self, a: usize, b: usize) {
        if self.poly.is_adjacent(a, b) {
            return;
        }
        if let Some(d) = Diagonal::new(a, b) {
            self.sink.diagonal_added(d);
            self.diagonals.push(d);
        }
    }

    fn step(&mut self, u: usize) -> Result<(), StepError> {
        let top = *self
            .stack
            .last()
            .ok_or(StepError::StackUnderflow { vertex: u })?;
        if self.chains[u] != self.chains[top] {
            // Opposite chain: fan from `u` to the whole stack but its bottom.
            while let Some(v) = self.stack.pop() {
                if !self.stack.is_empty() {
                    self.emit(u, v);
                }
            }
            self.stack.push(top);
            self.stack.push(u);
        } else {
            let mut last = self.pop(u)?;
            while let Some(&w) = self.stack.last() {
                if !self.chord_inside(w, last, u) {
                    break;
                }
                self.emit(u, w);
                last = self.pop(u)?;
            }
            self.stack.push(last);
            self.stack.push(u);
        }
        Ok(())
    }

    /// Final vertex: connect to every stacked vertex except the first and last.
    fn close(&mut self, u: usize) -> Result<(), StepError> {
        self.pop(u)?;
        while let Some(v) = self.stack.pop() {
            if !self.stack.is_empty() {
                self.emit(u, v);
            }
        }
        Ok(())
    }

    /// Chord `w–u` lies inside iff the chain turns towards the interior at `mid`.
    fn chord_inside(&self, w: usize, mid: usize, u: usize) -> bool {
        let vs = &self.poly.vs;
        let turn = orient2d_exact(vs[w], vs[mid], vs[u]);
        match self.chains[u] {
            Chain::Right => turn > 0.0,
            Chain::Left => turn < 0.0,
        }
    }
}
