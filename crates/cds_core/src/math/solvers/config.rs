//! Solver configuration types.

use crate::types::ConfigError;
use num_traits::Float;

/// Configuration for root-finding algorithms.
///
/// # Example
///
/// ```
/// use cds_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
/// assert!(config.max_iterations >= 50);
///
/// let custom = SolverConfig {
///     tolerance: 1e-12,
///     max_iterations: 200,
/// };
/// assert!(custom.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance on `|f(x)|`.
    pub tolerance: T,

    /// Maximum number of iterations before `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values:
    /// - `tolerance`: 1e-10
    /// - `max_iterations`: 100
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap(),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`. Use
    /// [`validate`](Self::validate) for configurations built from user input.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Check that the tolerance is positive and finite and the budget non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tolerance > T::zero()) || !self.tolerance.is_finite() {
            return Err(ConfigError::invalid_parameter(
                "tolerance",
                format!(
                    "must be positive and finite, got {}",
                    self.tolerance.to_f64().unwrap_or(f64::NAN)
                ),
            ));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::invalid_parameter(
                "max_iterations",
                "must be > 0",
            ));
        }
        Ok(())
    }
}
