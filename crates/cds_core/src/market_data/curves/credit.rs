//! Credit curve abstractions.
//!
//! This module provides:
//! - [`CreditCurve`]: Generic trait for hazard rate and survival probability calculations
//! - [`FlatHazardRateCurve`]: Constant hazard rate curve implementation

use crate::market_data::error::CurveError;
use num_traits::Float;

/// Generic credit curve trait for hazard rate and survival probability calculations.
///
/// # Contract
///
/// - `hazard_rate(t)` returns the instantaneous hazard rate λ(t) at time t
/// - `survival_probability(t)` returns Q(t) = P(τ > t) = exp(-∫₀ᵗ λ(s)ds)
/// - `default_probability(t)` returns P(τ ≤ t) = 1 - Q(t)
/// - Q(0) = 1
///
/// Hazard rates are not required to be non-negative. Q is non-increasing
/// wherever they are.
///
/// # Example
///
/// ```
/// use cds_core::market_data::curves::{CreditCurve, FlatHazardRateCurve};
///
/// let curve = FlatHazardRateCurve::new(0.02_f64);
/// let q = curve.survival_probability(1.0).unwrap();
/// assert!((q - (-0.02_f64).exp()).abs() < 1e-15);
/// ```
pub trait CreditCurve<T: Float> {
    /// Return the instantaneous hazard rate at time `t`.
    ///
    /// # Returns
    ///
    /// * `Ok(λ(t))` - Hazard rate at time t
    /// * `Err(CurveError::InvalidMaturity)` - If t < 0
    fn hazard_rate(&self, t: T) -> Result<T, CurveError>;

    /// Return the survival probability Q(t) = P(τ > t).
    ///
    /// # Returns
    ///
    /// * `Ok(Q(t))` - Survival probability at time t
    /// * `Err(CurveError::InvalidMaturity)` - If t < 0
    fn survival_probability(&self, t: T) -> Result<T, CurveError>;

    /// Return the default probability P(τ ≤ t) = 1 - Q(t).
    fn default_probability(&self, t: T) -> Result<T, CurveError> {
        Ok(T::one() - self.survival_probability(t)?)
    }

    /// Return the forward survival probability P(τ > t2 | τ > t1) = Q(t2) / Q(t1).
    ///
    /// # Returns
    ///
    /// * `Err(CurveError::InvalidMaturity)` - If t2 <= t1
    fn forward_survival_probability(&self, t1: T, t2: T) -> Result<T, CurveError> {
        if t2 <= t1 {
            return Err(CurveError::invalid_maturity(t2 - t1));
        }
        let s1 = self.survival_probability(t1)?;
        let s2 = self.survival_probability(t2)?;
        Ok(s2 / s1)
    }

    /// Return the points strictly inside `(from, to)` where λ may jump.
    ///
    /// Integrators split their intervals at these points so that the
    /// hazard rate is smooth on every piece. Curves with a continuous
    /// hazard rate return an empty vector.
    fn hazard_knots(&self, _from: T, _to: T) -> Vec<T> {
        Vec::new()
    }
}

/// Flat (constant) hazard rate curve.
///
/// ```text
/// Q(t) = exp(-λ * t)
/// ```
///
/// # Example
///
/// ```
/// use cds_core::market_data::curves::{CreditCurve, FlatHazardRateCurve};
///
/// let curve = FlatHazardRateCurve::new(0.01_f64);
/// assert_eq!(curve.hazard_rate(3.0).unwrap(), 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatHazardRateCurve<T: Float> {
    hazard_rate: T,
}

impl<T: Float> FlatHazardRateCurve<T> {
    /// Construct a flat hazard rate curve.
    #[inline]
    pub fn new(hazard_rate: T) -> Self {
        Self { hazard_rate }
    }

    /// Return the constant hazard rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.hazard_rate
    }
}

impl<T: Float> CreditCurve<T> for FlatHazardRateCurve<T> {
    fn hazard_rate(&self, t: T) -> Result<T, CurveError> {
        if !(t >= T::zero()) {
            return Err(CurveError::invalid_maturity(t));
        }
        Ok(self.hazard_rate)
    }

    fn survival_probability(&self, t: T) -> Result<T, CurveError> {
        if !(t >= T::zero()) {
            return Err(CurveError::invalid_maturity(t));
        }
        if t == T::zero() {
            return Ok(T::one());
        }
        Ok((-self.hazard_rate * t).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ========================================
    // FlatHazardRateCurve Tests
    // ========================================

    #[test]
    fn test_flat_hazard_rate() {
        let curve = FlatHazardRateCurve::new(0.02_f64);
        assert_eq!(curve.rate(), 0.02);
        assert_eq!(curve.hazard_rate(0.0).unwrap(), 0.02);
        assert_eq!(curve.hazard_rate(10.0).unwrap(), 0.02);
    }

    #[test]
    fn test_flat_survival_at_zero() {
        let curve = FlatHazardRateCurve::new(0.02_f64);
        assert_eq!(curve.survival_probability(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_flat_survival_probability() {
        let curve = FlatHazardRateCurve::new(0.02_f64);
        for t in [0.5, 1.0, 5.0] {
            assert_relative_eq!(
                curve.survival_probability(t).unwrap(),
                (-0.02 * t).exp(),
                max_relative = 1e-15
            );
        }
    }

    #[test]
    fn test_flat_negative_time_fails() {
        let curve = FlatHazardRateCurve::new(0.02_f64);
        assert!(curve.survival_probability(-1.0).is_err());
        assert!(curve.hazard_rate(-1.0).is_err());
    }

    // ========================================
    // Default Method Tests
    // ========================================

    #[test]
    fn test_default_probability() {
        let curve = FlatHazardRateCurve::new(0.03_f64);
        let pd = curve.default_probability(2.0).unwrap();
        assert_relative_eq!(pd, 1.0 - (-0.06_f64).exp(), max_relative = 1e-14);
    }

    #[test]
    fn test_forward_survival_probability() {
        let curve = FlatHazardRateCurve::new(0.03_f64);
        let fwd = curve.forward_survival_probability(1.0, 3.0).unwrap();
        assert_relative_eq!(fwd, (-0.06_f64).exp(), max_relative = 1e-14);
        assert!(curve.forward_survival_probability(3.0, 1.0).is_err());
    }

    #[test]
    fn test_flat_has_no_knots() {
        let curve = FlatHazardRateCurve::new(0.03_f64);
        assert!(curve.hazard_knots(0.0, 10.0).is_empty());
    }
}
