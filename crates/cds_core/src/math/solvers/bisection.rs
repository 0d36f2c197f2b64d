//! Bisection root-finding solver.

use super::traits::{bracket_collapsed, non_finite};
use super::{BracketedRootFinder, SolverConfig};
use crate::types::SolverError;
use num_traits::Float;

/// Bisection root finder.
///
/// Halves the bracket each iteration. Linear convergence, but every step is
/// guaranteed to keep the root inside the bracket.
///
/// # Example
///
/// ```
/// use cds_core::math::solvers::{BisectionSolver, BracketedRootFinder, SolverConfig};
///
/// let solver = BisectionSolver::new(SolverConfig::new(1e-12, 100));
/// let root = solver.find_root(|x: f64| x.exp() - 2.0, 0.0, 1.0).unwrap();
/// assert!((root - 2.0_f64.ln()).abs() < 1e-11);
/// ```
#[derive(Debug, Clone)]
pub struct BisectionSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BisectionSolver<T> {
    /// Create a new bisection solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl<T: Float> BracketedRootFinder<T> for BisectionSolver<T> {
    fn find_root<F>(&self, mut f: F, lower: T, upper: T) -> Result<T, SolverError>
    where
        F: FnMut(T) -> T,
    {
        let tolerance = self.config.tolerance;
        let two = T::from(2.0).unwrap();

        let (mut lo, mut hi) = (lower, upper);
        let f_lo = f(lo);
        let f_hi = f(hi);

        if !f_lo.is_finite() {
            return Err(non_finite(lo.to_f64().unwrap_or(f64::NAN)));
        }
        if !f_hi.is_finite() {
            return Err(non_finite(hi.to_f64().unwrap_or(f64::NAN)));
        }
        if f_lo.abs() < tolerance {
            return Ok(lo);
        }
        if f_hi.abs() < tolerance {
            return Ok(hi);
        }

        let lo_positive = f_lo > T::zero();
        if lo_positive == (f_hi > T::zero()) {
            return Err(SolverError::NoBracket {
                a: lo.to_f64().unwrap_or(f64::NAN),
                b: hi.to_f64().unwrap_or(f64::NAN),
            });
        }

        for _ in 0..self.config.max_iterations {
            let half = (hi - lo) / two;
            let mid = lo + half;
            let f_mid = f(mid);

            if !f_mid.is_finite() {
                return Err(non_finite(mid.to_f64().unwrap_or(f64::NAN)));
            }
            if f_mid.abs() < tolerance || bracket_collapsed(half, mid) {
                return Ok(mid);
            }

            if (f_mid > T::zero()) == lo_positive {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
