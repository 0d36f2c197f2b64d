//! Error types for numerical routines and configuration validation.
//!
//! This module provides:
//! - `SolverError`: Errors from bracketed root finders
//! - `InterpolationError`: Errors from interpolators
//! - `ConfigError`: Construction-time validation of curves and contract terms

use crate::market_data::error::CurveError;
use thiserror::Error;

/// Root-finding errors.
///
/// # Examples
///
/// ```
/// use cds_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Objective returned a non-finite value.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

/// Interpolation errors.
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationError {
    /// Query point outside the interpolation domain.
    #[error("Out of bounds: {x} not in [{min}, {max}]")]
    OutOfBounds {
        /// Query point
        x: f64,
        /// Domain lower bound
        min: f64,
        /// Domain upper bound
        max: f64,
    },

    /// Not enough points to interpolate.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Points provided
        got: usize,
        /// Points required
        need: usize,
    },

    /// Abscissae not strictly increasing.
    #[error("Non-monotonic data at index {index}")]
    NonMonotonicData {
        /// First offending index
        index: usize,
    },

    /// Other malformed input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Construction-time configuration errors.
///
/// Raised before any numerical work when contract terms fall outside their
/// domain or a discount curve is malformed.
///
/// # Examples
///
/// ```
/// use cds_core::types::ConfigError;
///
/// let err = ConfigError::InvalidRecoveryRate { value: 1.5 };
/// assert_eq!(
///     format!("{}", err),
///     "Invalid recovery rate: 1.5 (must be in [0, 1])"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    /// Recovery rate outside [0, 1].
    #[error("Invalid recovery rate: {value} (must be in [0, 1])")]
    InvalidRecoveryRate {
        /// The rejected recovery rate
        value: f64,
    },

    /// Coupon frequency of zero.
    #[error("Invalid coupon frequency: {frequency} (must be > 0)")]
    InvalidFrequency {
        /// The rejected frequency
        frequency: u32,
    },

    /// Non-positive or non-finite day-count denominator.
    #[error("Invalid day count denominator: {denominator} (must be > 0)")]
    InvalidDayCount {
        /// The rejected denominator
        denominator: f64,
    },

    /// Non-positive or non-finite notional.
    #[error("Invalid notional: {notional} (must be > 0)")]
    InvalidNotional {
        /// The rejected notional
        notional: f64,
    },

    /// Named parameter outside its domain.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Malformed discount-curve definition.
    #[error("Malformed curve: {0}")]
    MalformedCurve(#[from] CurveError),
}

impl ConfigError {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error wraps a malformed curve.
    pub fn is_malformed_curve(&self) -> bool {
        matches!(self, Self::MalformedCurve(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // SolverError Tests
    // ========================================

    #[test]
    fn test_max_iterations_display() {
        let err = SolverError::MaxIterationsExceeded { iterations: 50 };
        assert_eq!(format!("{}", err), "Failed to converge after 50 iterations");
    }

    #[test]
    fn test_no_bracket_display() {
        let err = SolverError::NoBracket { a: 0.0, b: 1.0 };
        assert_eq!(
            format!("{}", err),
            "No bracket: f(0) and f(1) have same sign"
        );
    }

    // ========================================
    // InterpolationError Tests
    // ========================================

    #[test]
    fn test_interpolation_out_of_bounds_display() {
        let err = InterpolationError::OutOfBounds {
            x: 5.0,
            min: 0.0,
            max: 3.0,
        };
        assert_eq!(format!("{}", err), "Out of bounds: 5 not in [0, 3]");
    }

    // ========================================
    // ConfigError Tests
    // ========================================

    #[test]
    fn test_frequency_display() {
        let err = ConfigError::InvalidFrequency { frequency: 0 };
        assert!(format!("{}", err).contains("must be > 0"));
    }

    #[test]
    fn test_invalid_parameter_helper() {
        let err = ConfigError::invalid_parameter("tolerance", "must be positive");
        assert_eq!(
            format!("{}", err),
            "Invalid parameter 'tolerance': must be positive"
        );
        assert!(!err.is_malformed_curve());
    }

    #[test]
    fn test_from_curve_error() {
        let err: ConfigError = CurveError::InsufficientData { got: 0, need: 1 }.into();
        assert!(err.is_malformed_curve());
        assert!(format!("{}", err).contains("got 0, need 1"));
    }
}
