//! Valuation error types.

use cds_core::market_data::CurveError;
use cds_core::types::ConfigError;
use thiserror::Error;

/// Errors raised by a single valuation call.
///
/// # Variants
///
/// - `InvalidMaturity`: Non-positive or non-finite contract maturity
/// - `InvalidTerms`: Contract terms outside their domain
/// - `DegenerateAnnuity`: Risky annuity not strictly positive, par spread undefined
/// - `Curve`: Wrapped curve query error
///
/// # Examples
///
/// ```
/// use cds_models::ValuationError;
///
/// let err = ValuationError::InvalidMaturity { maturity: 0.0 };
/// assert_eq!(format!("{}", err), "Invalid maturity: 0 (must be > 0)");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValuationError {
    /// Maturity not strictly positive.
    #[error("Invalid maturity: {maturity} (must be > 0)")]
    InvalidMaturity {
        /// The rejected maturity
        maturity: f64,
    },

    /// Contract terms outside their domain.
    #[error("Invalid contract terms: {0}")]
    InvalidTerms(#[from] ConfigError),

    /// Risky annuity not strictly positive and finite.
    #[error("Degenerate risky annuity {annuity} at maturity {maturity}")]
    DegenerateAnnuity {
        /// Contract maturity
        maturity: f64,
        /// Computed risky annuity
        annuity: f64,
    },

    /// Curve query error.
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),
}

impl ValuationError {
    /// Create an invalid maturity error from any float.
    pub fn invalid_maturity<T: num_traits::Float>(maturity: T) -> Self {
        Self::InvalidMaturity {
            maturity: maturity.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// Check if this is an invalid maturity error.
    pub fn is_invalid_maturity(&self) -> bool {
        matches!(self, Self::InvalidMaturity { .. })
    }

    /// Check if this is an invalid terms error.
    pub fn is_invalid_terms(&self) -> bool {
        matches!(self, Self::InvalidTerms(_))
    }
}
