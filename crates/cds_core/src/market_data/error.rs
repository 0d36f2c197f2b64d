//! Curve error types.
//!
//! Structured errors for discount-curve construction, hazard-curve extension
//! and curve queries.

use crate::types::InterpolationError;
use thiserror::Error;

/// Curve operation errors.
///
/// # Variants
///
/// - `InvalidMaturity`: Negative (or non-finite) query time
/// - `InsufficientData`: Not enough pillars for construction
/// - `LengthMismatch`: Pillar times and rates differ in length
/// - `NonIncreasingBoundary`: Pillar time or segment end not past the previous one
/// - `NonFiniteRate`: NaN or infinite rate
/// - `Interpolation`: Wrapped interpolation error
///
/// # Examples
///
/// ```
/// use cds_core::market_data::CurveError;
///
/// let err = CurveError::InvalidMaturity { t: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveError {
    /// Invalid maturity (negative time).
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Pillar times and rates have different lengths.
    #[error("Length mismatch: {times} times, {rates} rates")]
    LengthMismatch {
        /// Number of times
        times: usize,
        /// Number of rates
        rates: usize,
    },

    /// A boundary is not strictly greater than the previous one.
    #[error("Non-increasing boundary: {end} is not after {last}")]
    NonIncreasingBoundary {
        /// Offending boundary
        end: f64,
        /// Current last boundary
        last: f64,
    },

    /// NaN or infinite rate.
    #[error("Non-finite rate {rate} at t = {t}")]
    NonFiniteRate {
        /// Time the rate is attached to
        t: f64,
        /// The rate
        rate: f64,
    },

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),
}

impl CurveError {
    /// Create an invalid maturity error from any float.
    pub fn invalid_maturity<T: num_traits::Float>(t: T) -> Self {
        Self::InvalidMaturity {
            t: t.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// Check if this is a non-increasing boundary error.
    pub fn is_non_increasing_boundary(&self) -> bool {
        matches!(self, Self::NonIncreasingBoundary { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_maturity_display() {
        let err = CurveError::InvalidMaturity { t: -1.5 };
        assert_eq!(format!("{}", err), "Invalid maturity: t = -1.5");
    }

    #[test]
    fn test_non_increasing_boundary_display() {
        let err = CurveError::NonIncreasingBoundary {
            end: 1.0,
            last: 2.0,
        };
        assert_eq!(
            format!("{}", err),
            "Non-increasing boundary: 1 is not after 2"
        );
        assert!(err.is_non_increasing_boundary());
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = CurveError::LengthMismatch { times: 3, rates: 2 };
        assert_eq!(format!("{}", err), "Length mismatch: 3 times, 2 rates");
    }

    #[test]
    fn test_invalid_maturity_helper() {
        let err = CurveError::invalid_maturity(-0.25_f64);
        assert_eq!(err, CurveError::InvalidMaturity { t: -0.25 });
    }

    #[test]
    fn test_from_interpolation_error() {
        let interp_err = InterpolationError::InsufficientData { got: 1, need: 2 };
        let err: CurveError = interp_err.into();
        assert!(format!("{}", err).contains("Interpolation error"));
    }
}
