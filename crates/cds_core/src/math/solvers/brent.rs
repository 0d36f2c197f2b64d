//! Brent's method root-finding solver.

use super::traits::{bracket_collapsed, machine_tolerance, non_finite};
use super::{BracketedRootFinder, SolverConfig};
use crate::types::SolverError;
use num_traits::Float;

/// Brent's method root finder.
///
/// Combines bisection, secant, and inverse quadratic interpolation for
/// robust root finding without requiring derivatives. Converges for
/// continuous functions with a valid bracket.
///
/// # Example
///
/// ```
/// use cds_core::math::solvers::{BracketedRootFinder, BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!((f(root)).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl<T: Float> BracketedRootFinder<T> for BrentSolver<T> {
    fn find_root<F>(&self, mut f: F, lower: T, upper: T) -> Result<T, SolverError>
    where
        F: FnMut(T) -> T,
    {
        let tolerance = self.config.tolerance;
        let two = T::from(2.0).unwrap();
        let three = T::from(3.0).unwrap();

        let mut a = lower;
        let mut b = upper;
        let mut fa = f(a);
        let mut fb = f(b);

        if !fa.is_finite() {
            return Err(non_finite(a.to_f64().unwrap_or(f64::NAN)));
        }
        if !fb.is_finite() {
            return Err(non_finite(b.to_f64().unwrap_or(f64::NAN)));
        }
        if fa.abs() < tolerance {
            return Ok(a);
        }
        if fb.abs() < tolerance {
            return Ok(b);
        }
        if (fa > T::zero()) == (fb > T::zero()) {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        let mut c = b;
        let mut fc = fb;
        let mut d = b - a;
        let mut e = d;

        for _ in 0..self.config.max_iterations {
            // Keep the root between b and c
            if (fb > T::zero()) == (fc > T::zero()) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }

            // b is the best estimate so far
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol1 = machine_tolerance(b);
            let m = (c - b) / two;

            if fb.abs() < tolerance || bracket_collapsed(m, b) {
                return Ok(b);
            }

            if e.abs() >= tol1 && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    // Secant step
                    (two * m * s, T::one() - s)
                } else {
                    // Inverse quadratic interpolation
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (two * m * q * (q - r) - (b - a) * (r - T::one())),
                        (q - T::one()) * (r - T::one()) * (s - T::one()),
                    )
                };

                if p > T::zero() {
                    q = -q;
                }
                p = p.abs();

                let min1 = three * m * q - (tol1 * q).abs();
                let min2 = (e * q).abs();
                if two * p < min1.min(min2) {
                    e = d;
                    d = p / q;
                } else {
                    d = m;
                    e = d;
                }
            } else {
                d = m;
                e = d;
            }

            a = b;
            fa = fb;
            b = if d.abs() > tol1 {
                b + d
            } else if m > T::zero() {
                b + tol1
            } else {
                b - tol1
            };
            fb = f(b);
            if !fb.is_finite() {
                return Err(non_finite(b.to_f64().unwrap_or(f64::NAN)));
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

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Basic Functionality Tests
    // ========================================

    #[test]
    fn test_find_sqrt_2() {
        let solver = BrentSolver::new(SolverConfig::default());
        let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
        assert!(
            (root - std::f64::consts::SQRT_2).abs() < 1e-10,
            "Expected √2 ≈ {}, got {}",
            std::f64::consts::SQRT_2,
            root
        );
    }

    #[test]
    fn test_find_sin_root() {
        let solver = BrentSolver::new(SolverConfig::default());
        let root = solver.find_root(|x: f64| x.sin(), 3.0, 4.0).unwrap();
        assert!((root - std::f64::consts::PI).abs() < 1e-10);
    }

    #[test]
    fn test_find_exp_root() {
        let solver = BrentSolver::new(SolverConfig::default());
        let root = solver.find_root(|x: f64| x.exp() - 2.0, 0.0, 1.0).unwrap();
        assert!((root - 2.0_f64.ln()).abs() < 1e-10);
    }

    #[test]
    fn test_bracket_reversed() {
        let solver = BrentSolver::new(SolverConfig::default());
        let root = solver.find_root(|x: f64| x * x - 2.0, 2.0, 0.0).unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
    }

    #[test]
    fn test_root_at_endpoint() {
        let solver = BrentSolver::new(SolverConfig::default());
        let root = solver.find_root(|x: f64| x, 0.0, 1.0).unwrap();
        assert_eq!(root, 0.0);
    }

    #[test]
    fn test_counts_evaluations_through_fn_mut() {
        let solver = BrentSolver::new(SolverConfig::new(1e-12, 100));
        let mut calls = 0;
        let root = solver
            .find_root(
                |x: f64| {
                    calls += 1;
                    x.powi(3) - 0.001
                },
                0.0,
                1.0,
            )
            .unwrap();
        assert!((root - 0.1).abs() < 1e-9);
        assert!(calls > 2);
    }

    // ========================================
    // Error Handling Tests
    // ========================================

    #[test]
    fn test_no_bracket_same_sign() {
        let solver = BrentSolver::new(SolverConfig::default());
        match solver.find_root(|x: f64| x * x + 1.0, 1.0, 2.0).unwrap_err() {
            SolverError::NoBracket { a, b } => {
                assert_eq!(a, 1.0);
                assert_eq!(b, 2.0);
            }
            other => panic!("Expected NoBracket error, got {:?}", other),
        }
    }

    #[test]
    fn test_max_iterations_exceeded() {
        let solver = BrentSolver::new(SolverConfig::new(1e-300, 3));
        let result = solver.find_root(|x: f64| x.powi(3) - 2.0, 0.0, 5.0);
        assert_eq!(
            result.unwrap_err(),
            SolverError::MaxIterationsExceeded { iterations: 3 }
        );
    }

    #[test]
    fn test_non_finite_objective() {
        let solver = BrentSolver::new(SolverConfig::default());
        let result = solver.find_root(|x: f64| if x > 0.5 { f64::NAN } else { -1.0 }, 0.0, 1.0);
        assert!(matches!(
            result.unwrap_err(),
            SolverError::NumericalInstability(_)
        ));
    }

    #[test]
    fn test_config_accessor() {
        let config = SolverConfig::new(1e-8_f64, 42);
        let solver = BrentSolver::new(config);
        assert_eq!(solver.config(), &config);
        assert_eq!(BrentSolver::<f64>::with_defaults().config().max_iterations, 100);
    }
}
