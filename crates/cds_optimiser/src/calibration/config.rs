//! Calibration configuration types.
//!
//! This module provides the root-finder selection and the bracket-search and
//! convergence parameters used by the hazard bootstrapper.

use cds_core::math::quadrature::FixedGridQuadrature;
use cds_core::math::solvers::SolverConfig;
use cds_core::types::ConfigError;
use num_traits::Float;

/// Bracketed root finder used for each tenor.
///
/// # Variants
///
/// - `Brent`: Inverse quadratic interpolation with bisection safeguard (default)
/// - `Bisection`: Plain interval halving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SolverKind {
    /// Brent's method.
    #[default]
    Brent,
    /// Bisection.
    Bisection,
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Brent => write!(f, "brent"),
            Self::Bisection => write!(f, "bisection"),
        }
    }
}

/// Configuration for hazard-curve calibration.
///
/// # Examples
///
/// ```
/// use cds_optimiser::calibration::{CalibrationConfig, SolverKind};
///
/// // Use default configuration
/// let config: CalibrationConfig<f64> = CalibrationConfig::default();
/// assert!(config.tolerance <= 1e-12);
/// assert_eq!(config.solver, SolverKind::Brent);
///
/// // Custom configuration
/// let config = CalibrationConfig::<f64>::builder()
///     .tolerance(1e-10)
///     .solver(SolverKind::Bisection)
///     .allow_negative_hazard(true)
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationConfig<T: Float> {
    /// Convergence tolerance on the par-spread residual.
    ///
    /// Default: 1e-12
    pub tolerance: T,

    /// Maximum root-finder iterations per tenor.
    ///
    /// Default: 100
    pub max_iterations: usize,

    /// Root finder.
    ///
    /// Default: Brent
    pub solver: SolverKind,

    /// First bracket end tried on either side of zero.
    ///
    /// Default: 0.01
    pub initial_upper_bound: T,

    /// Factor applied to the bracket end on each expansion.
    ///
    /// Default: 2
    pub bracket_growth: T,

    /// Largest absolute hazard rate the bracket search will reach.
    ///
    /// Default: 10
    pub max_hazard_rate: T,

    /// Accept negative solved hazard rates.
    ///
    /// If true, a negative rate is logged and kept.
    /// If false, it is reported as `CalibrationError::NegativeHazard`.
    /// Default: false
    pub allow_negative_hazard: bool,

    /// Integration grid for the default-contingent legs.
    pub quadrature: FixedGridQuadrature,
}

impl<T: Float> Default for CalibrationConfig<T> {
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-12).unwrap(),
            max_iterations: 100,
            solver: SolverKind::Brent,
            initial_upper_bound: T::from(0.01).unwrap(),
            bracket_growth: T::from(2.0).unwrap(),
            max_hazard_rate: T::from(10.0).unwrap(),
            allow_negative_hazard: false,
            quadrature: FixedGridQuadrature::default(),
        }
    }
}

impl<T: Float> CalibrationConfig<T> {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder for fluent construction.
    pub fn builder() -> CalibrationConfigBuilder<T> {
        CalibrationConfigBuilder::new()
    }

    /// Root-finder configuration derived from this configuration.
    pub fn solver_config(&self) -> SolverConfig<T> {
        SolverConfig {
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
        }
    }

    /// Check every parameter against its domain.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.solver_config().validate()?;

        let positive = |x: T| x > T::zero() && x.is_finite();
        if !positive(self.initial_upper_bound) {
            return Err(ConfigError::invalid_parameter(
                "initial_upper_bound",
                "must be positive and finite",
            ));
        }
        if !(self.bracket_growth > T::one()) || !self.bracket_growth.is_finite() {
            return Err(ConfigError::invalid_parameter(
                "bracket_growth",
                "must be greater than 1",
            ));
        }
        if !positive(self.max_hazard_rate) || self.max_hazard_rate < self.initial_upper_bound {
            return Err(ConfigError::invalid_parameter(
                "max_hazard_rate",
                "must be finite and at least initial_upper_bound",
            ));
        }
        Ok(())
    }
}

/// Builder for `CalibrationConfig`.
#[derive(Debug, Clone)]
pub struct CalibrationConfigBuilder<T: Float> {
    config: CalibrationConfig<T>,
}

impl<T: Float> CalibrationConfigBuilder<T> {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            config: CalibrationConfig::default(),
        }
    }

    /// Set the convergence tolerance.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Set the maximum iterations.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Set the root finder.
    pub fn solver(mut self, solver: SolverKind) -> Self {
        self.config.solver = solver;
        self
    }

    /// Set the first bracket end.
    pub fn initial_upper_bound(mut self, bound: T) -> Self {
        self.config.initial_upper_bound = bound;
        self
    }

    /// Set the bracket growth factor.
    pub fn bracket_growth(mut self, growth: T) -> Self {
        self.config.bracket_growth = growth;
        self
    }

    /// Set the bracket ceiling.
    pub fn max_hazard_rate(mut self, max_hazard_rate: T) -> Self {
        self.config.max_hazard_rate = max_hazard_rate;
        self
    }

    /// Set whether negative hazard rates are accepted.
    pub fn allow_negative_hazard(mut self, allow: bool) -> Self {
        self.config.allow_negative_hazard = allow;
        self
    }

    /// Set the integration grid.
    pub fn quadrature(mut self, quadrature: FixedGridQuadrature) -> Self {
        self.config.quadrature = quadrature;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> CalibrationConfig<T> {
        self.config
    }
}

impl<T: Float> Default for CalibrationConfigBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
