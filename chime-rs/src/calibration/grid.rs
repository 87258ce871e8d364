use crate::{
    prelude::Real,
    utils::{argmin_finite, linspace},
};
use log::debug;
use rayon::prelude::*;

/// Losses of a batch of candidates, in candidate order.
#[derive(Debug, Clone, PartialEq)]
pub struct GridResult<C> {
    pub candidates: Vec<C>,
    pub losses: Vec<Real>,
}

impl<C: Copy> GridResult<C> {
    /// Index of the first minimal loss among accepted candidates.
    pub fn best_index(&self) -> Option<usize> {
        argmin_finite(self.losses.iter())
    }

    /// Best candidate and its loss.
    pub fn best(&self) -> Option<(C, Real)> {
        self.best_index()
            .map(|i| (self.candidates[i], self.losses[i]))
    }

    pub fn rejected(&self) -> usize {
        self.losses.iter().filter(|x| !x.is_finite()).count()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Score all candidates with loss.
///
/// Parallel evaluation collects results in candidate order so the outcome is
/// identical to a sequential run.
pub fn evaluate_grid<C, F>(candidates: Vec<C>, parallel: bool, loss: F) -> GridResult<C>
where
    C: Copy + Send + Sync + std::fmt::Debug,
    F: Fn(C) -> Real + Send + Sync,
{
    let losses: Vec<Real> = if parallel {
        candidates.par_iter().map(|&c| loss(c)).collect()
    } else {
        candidates.iter().map(|&c| loss(c)).collect()
    };
    for (c, l) in candidates.iter().zip(losses.iter()) {
        debug!(target: "calibration", "candidate {:?}: loss = {}", c, l);
    }
    GridResult { candidates, losses }
}

/// New grid spanning the neighbors of the best point. Neighbor indices are
/// clamped to the grid, so a best point on the edge keeps a one-sided bracket.
pub fn refine(grid: &[Real], best: usize, n: usize) -> Vec<Real> {
    let last = grid.len().saturating_sub(1);
    let lo = best.saturating_sub(1);
    let hi = (best + 1).min(last);
    linspace(grid[lo], grid[hi], n)
}
