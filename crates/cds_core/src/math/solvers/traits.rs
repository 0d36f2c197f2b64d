//! Bracketed root-finder trait.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// A root finder that works on a sign-changing bracket.
///
/// # Contract
///
/// `find_root(f, lower, upper)` returns `x` in the bracket with
/// `|f(x)| < tolerance`, or the best estimate once the bracket has collapsed
/// to machine precision. It fails with `SolverError::NoBracket` if `f(lower)`
/// and `f(upper)` share a sign, and with `SolverError::MaxIterationsExceeded`
/// when the iteration budget runs out.
///
/// # Example
///
/// ```
/// use cds_core::math::solvers::{BisectionSolver, BracketedRootFinder, BrentSolver, SolverConfig};
///
/// fn solve<S: BracketedRootFinder<f64>>(solver: &S) -> f64 {
///     solver.find_root(|x| x * x - 2.0, 0.0, 2.0).unwrap()
/// }
///
/// let config = SolverConfig::new(1e-12, 100);
/// let brent = solve(&BrentSolver::new(config));
/// let bisection = solve(&BisectionSolver::new(config));
/// assert!((brent - bisection).abs() < 1e-11);
/// ```
pub trait BracketedRootFinder<T: Float> {
    /// Find a root of `f` in `[lower, upper]`.
    fn find_root<F>(&self, f: F, lower: T, upper: T) -> Result<T, SolverError>
    where
        F: FnMut(T) -> T;

    /// Solver configuration.
    fn config(&self) -> &SolverConfig<T>;
}

/// Whether the bracket around `b` has shrunk to machine precision.
#[inline]
pub(crate) fn bracket_collapsed<T: Float>(half_width: T, b: T) -> bool {
    half_width.abs() <= machine_tolerance(b)
}

#[inline]
pub(crate) fn machine_tolerance<T: Float>(b: T) -> T {
    T::from(2.0).unwrap() * T::epsilon() * b.abs().max(T::one())
}

#[inline]
pub(crate) fn non_finite(x: f64) -> SolverError {
    SolverError::NumericalInstability(format!("non-finite objective at x = {}", x))
}
