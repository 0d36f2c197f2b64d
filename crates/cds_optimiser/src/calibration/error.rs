//! Calibration error types.
//!
//! Every numeric failure names the tenor it occurred at, so a failed
//! multi-tenor run can be traced back to a single quote.

use cds_core::market_data::CurveError;
use cds_core::types::{ConfigError, SolverError};
use cds_models::ValuationError;
use thiserror::Error;

/// Errors that can occur during hazard-curve calibration.
///
/// # Variants
///
/// - `EmptyQuotes`: No quotes supplied
/// - `InvalidQuote`: Non-positive maturity or non-finite spread
/// - `NonIncreasingMaturity`: Quotes not strictly increasing in maturity
/// - `BracketNotFound`: No sign change within the hazard-rate ceiling
/// - `ConvergenceFailure`: Root finder stopped above tolerance
/// - `NegativeHazard`: Solved rate below zero while negatives are disallowed
/// - `Solver`: Wrapped root-finder error at a tenor
/// - `Valuation`, `Curve`, `Config`: Wrapped lower-layer errors
///
/// # Examples
///
/// ```
/// use cds_optimiser::calibration::CalibrationError;
///
/// let err = CalibrationError::ConvergenceFailure {
///     maturity: 5.0,
///     residual: 1e-6,
///     iterations: 100,
/// };
/// assert!(err.is_convergence_failure());
/// assert_eq!(err.maturity(), Some(5.0));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// No quotes were supplied.
    #[error("No quotes supplied")]
    EmptyQuotes,

    /// A quote outside its domain.
    #[error("Invalid quote at index {index}: maturity = {maturity}, spread = {spread}")]
    InvalidQuote {
        /// Position in the input
        index: usize,
        /// Quoted maturity
        maturity: f64,
        /// Quoted spread
        spread: f64,
    },

    /// Quote maturities not strictly increasing.
    #[error("Quote {index} has maturity {maturity}, not after previous maturity {previous}")]
    NonIncreasingMaturity {
        /// Position in the input
        index: usize,
        /// Offending maturity
        maturity: f64,
        /// Maturity of the preceding quote
        previous: f64,
    },

    /// Bracket search reached the ceiling without a sign change.
    #[error("No bracket found at maturity {maturity}: searched [{lower}, {upper}]")]
    BracketNotFound {
        /// Tenor being solved
        maturity: f64,
        /// Lower end of the last bracket tried
        lower: f64,
        /// Upper end of the last bracket tried
        upper: f64,
    },

    /// Root finder stopped with the residual above tolerance.
    #[error("Failed to converge at maturity {maturity}: residual = {residual} after {iterations} iterations")]
    ConvergenceFailure {
        /// Tenor being solved
        maturity: f64,
        /// Final par-spread residual
        residual: f64,
        /// Objective evaluations spent
        iterations: usize,
    },

    /// Negative solved hazard rate.
    #[error("Negative hazard rate at maturity {maturity}: {hazard_rate}")]
    NegativeHazard {
        /// Tenor being solved
        maturity: f64,
        /// Solved rate
        hazard_rate: f64,
    },

    /// Root-finder error at a tenor.
    #[error("Solver error at maturity {maturity}: {source}")]
    Solver {
        /// Tenor being solved
        maturity: f64,
        /// Underlying solver error
        #[source]
        source: SolverError,
    },

    /// Wrapped valuation error.
    #[error("Valuation error: {0}")]
    Valuation(#[from] ValuationError),

    /// Wrapped curve error.
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// Invalid terms or calibration parameters.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CalibrationError {
    /// Create a non-increasing maturity error.
    pub fn non_increasing_maturity(index: usize, maturity: f64, previous: f64) -> Self {
        Self::NonIncreasingMaturity {
            index,
            maturity,
            previous,
        }
    }

    /// Create a bracket-not-found error.
    pub fn bracket_not_found(maturity: f64, lower: f64, upper: f64) -> Self {
        Self::BracketNotFound {
            maturity,
            lower,
            upper,
        }
    }

    /// Create a convergence failure error.
    pub fn convergence_failure(maturity: f64, residual: f64, iterations: usize) -> Self {
        Self::ConvergenceFailure {
            maturity,
            residual,
            iterations,
        }
    }

    /// Create a negative hazard error.
    pub fn negative_hazard(maturity: f64, hazard_rate: f64) -> Self {
        Self::NegativeHazard {
            maturity,
            hazard_rate,
        }
    }

    /// Wrap a solver error with its tenor.
    pub fn solver(maturity: f64, source: SolverError) -> Self {
        Self::Solver { maturity, source }
    }

    /// Check if this is a bracket-not-found error.
    pub fn is_bracket_not_found(&self) -> bool {
        matches!(self, Self::BracketNotFound { .. })
    }

    /// Check if this is a convergence failure.
    pub fn is_convergence_failure(&self) -> bool {
        matches!(self, Self::ConvergenceFailure { .. })
    }

    /// Check if this is a negative hazard error.
    pub fn is_negative_hazard(&self) -> bool {
        matches!(self, Self::NegativeHazard { .. })
    }

    /// Check if this error was raised by input validation.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyQuotes
                | Self::InvalidQuote { .. }
                | Self::NonIncreasingMaturity { .. }
                | Self::Config(_)
        )
    }

    /// Tenor the error occurred at, when it names one.
    pub fn maturity(&self) -> Option<f64> {
        match self {
            Self::InvalidQuote { maturity, .. }
            | Self::NonIncreasingMaturity { maturity, .. }
            | Self::BracketNotFound { maturity, .. }
            | Self::ConvergenceFailure { maturity, .. }
            | Self::NegativeHazard { maturity, .. }
            | Self::Solver { maturity, .. } => Some(*maturity),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Display Tests
    // ========================================

    #[test]
    fn test_bracket_not_found_display() {
        let err = CalibrationError::bracket_not_found(3.0, 0.0, 10.0);
        assert_eq!(
            format!("{}", err),
            "No bracket found at maturity 3: searched [0, 10]"
        );
    }

    #[test]
    fn test_non_increasing_display() {
        let err = CalibrationError::non_increasing_maturity(2, 3.0, 5.0);
        let msg = format!("{}", err);
        assert!(msg.contains("Quote 2"));
        assert!(msg.contains("previous maturity 5"));
    }

    #[test]
    fn test_solver_display_names_tenor() {
        let err = CalibrationError::solver(
            7.0,
            SolverError::MaxIterationsExceeded { iterations: 100 },
        );
        assert!(format!("{}", err).contains("maturity 7"));
    }

    // ========================================
    // Conversion Tests
    // ========================================

    #[test]
    fn test_from_config_error() {
        let err: CalibrationError = ConfigError::InvalidFrequency { frequency: 0 }.into();
        assert!(err.is_input_error());
        assert_eq!(err.maturity(), None);
    }

    #[test]
    fn test_from_valuation_error() {
        let err: CalibrationError = ValuationError::invalid_maturity(0.0_f64).into();
        assert!(matches!(err, CalibrationError::Valuation(_)));
        assert!(!err.is_input_error());
    }

    // ========================================
    // Predicate Tests
    // ========================================

    #[test]
    fn test_predicates() {
        assert!(CalibrationError::negative_hazard(1.0, -0.01).is_negative_hazard());
        assert!(CalibrationError::convergence_failure(1.0, 1e-6, 10).is_convergence_failure());
        assert!(CalibrationError::bracket_not_found(1.0, 0.0, 10.0).is_bracket_not_found());
        assert!(CalibrationError::EmptyQuotes.is_input_error());
        assert_eq!(
            CalibrationError::negative_hazard(3.0, -0.01).maturity(),
            Some(3.0)
        );
    }
}
