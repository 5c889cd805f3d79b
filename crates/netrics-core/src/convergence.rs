//! Power-iteration convergence contract.
//!
//! Eigenvector centrality and PageRank share one stopping rule: after each
//! step, take the L1 norm of the change between the previous and the new
//! vector; stop once it is strictly below `tolerance`. Running out of
//! `max_iter` steps first is a [`ConvergenceError`], never a partial result.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConvergenceError;
use crate::metric::MetricName;

/// Tolerance and iteration cap of a power iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Convergence {
    /// Stop when the L1 delta between iterations is below this value.
    pub tolerance: f64,
    /// Hard cap on the number of steps.
    pub max_iter: usize,
}

impl Convergence {
    /// Default for eigenvector centrality.
    pub const EIGENVECTOR: Self = Self {
        tolerance: 1e-6,
        max_iter: 100,
    };

    /// Default for PageRank.
    pub const PAGERANK: Self = Self {
        tolerance: 1e-8,
        max_iter: 100,
    };

    #[must_use]
    pub fn is_converged(&self, delta: f64) -> bool {
        delta < self.tolerance
    }

    /// Drive a power iteration from `initial`.
    ///
    /// `step` reads the current vector and overwrites the second slice with
    /// the next one. Both slices have the length of `initial`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvergenceError`] tagged with `metric` when `max_iter`
    /// steps pass without the delta dropping under `tolerance`.
    pub fn run<F>(
        &self,
        metric: MetricName,
        initial: Vec<f64>,
        mut step: F,
    ) -> Result<Converged, ConvergenceError>
    where
        F: FnMut(&[f64], &mut [f64]),
    {
        let mut current = initial;
        let mut next = vec![0.0; current.len()];
        let mut delta = f64::INFINITY;

        for iter in 1..=self.max_iter {
            step(&current, &mut next);
            delta = l1_delta(&current, &next);
            std::mem::swap(&mut current, &mut next);

            if self.is_converged(delta) {
                debug!(%metric, iterations = iter, delta, "power iteration converged");
                return Ok(Converged {
                    vector: current,
                    iterations: iter,
                });
            }
        }

        Err(ConvergenceError {
            metric,
            iterations: self.max_iter,
            delta,
            tolerance: self.tolerance,
        })
    }
}

/// Output of a converged power iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Converged {
    pub vector: Vec<f64>,
    pub iterations: usize,
}

/// Sum of absolute element-wise differences.
#[must_use]
pub fn l1_delta(old: &[f64], new: &[f64]) -> f64 {
    old.iter().zip(new).map(|(a, b)| (a - b).abs()).sum()
}
