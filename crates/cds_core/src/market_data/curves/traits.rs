//! Yield curve trait definition.

use crate::market_data::error::CurveError;
use num_traits::Float;

/// Generic discount curve trait.
///
/// # Contract
///
/// - `discount_factor(0) == 1` exactly
/// - `discount_factor(t)` fails with `CurveError::InvalidMaturity` for `t < 0`
/// - Implementations are immutable after construction
///
/// # Example
///
/// ```
/// use cds_core::market_data::curves::{YieldCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.02_f64);
/// let r = curve.zero_rate(2.0).unwrap();
/// assert!((r - 0.02).abs() < 1e-12);
/// ```
pub trait YieldCurve<T: Float> {
    /// Return the discount factor D(t) for time `t` in years.
    ///
    /// # Returns
    ///
    /// * `Ok(D(t))` - Discount factor at time t
    /// * `Err(CurveError::InvalidMaturity)` - If t < 0
    fn discount_factor(&self, t: T) -> Result<T, CurveError>;

    /// Return the continuously compounded zero rate for maturity `t`.
    ///
    /// ```text
    /// r(t) = -ln(D(t)) / t
    /// ```
    fn zero_rate(&self, t: T) -> Result<T, CurveError> {
        let df = self.discount_factor(t)?;
        if t <= T::zero() {
            return Err(CurveError::invalid_maturity(t));
        }
        Ok(-df.ln() / t)
    }

    /// Return the continuously compounded forward rate between `t1` and `t2`.
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, CurveError> {
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        let dt = t2 - t1;
        if dt <= T::zero() {
            return Err(CurveError::invalid_maturity(dt));
        }
        Ok(-(df2 / df1).ln() / dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockCurve {
        rate: f64,
    }

    impl YieldCurve<f64> for MockCurve {
        fn discount_factor(&self, t: f64) -> Result<f64, CurveError> {
            if t < 0.0 {
                return Err(CurveError::InvalidMaturity { t });
            }
            Ok((-self.rate * t).exp())
        }
    }

    #[test]
    fn test_default_zero_rate() {
        let curve = MockCurve { rate: 0.05 };
        let r = curve.zero_rate(1.0).unwrap();
        assert!((r - 0.05).abs() < 1e-10);
    }

    #[test]
    fn test_default_zero_rate_at_zero_fails() {
        let curve = MockCurve { rate: 0.05 };
        match curve.zero_rate(0.0).unwrap_err() {
            CurveError::InvalidMaturity { t } => assert_eq!(t, 0.0),
            other => panic!("Expected InvalidMaturity error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_forward_rate() {
        let curve = MockCurve { rate: 0.03 };
        let f = curve.forward_rate(1.0, 4.0).unwrap();
        assert!((f - 0.03).abs() < 1e-10);
    }

    #[test]
    fn test_default_forward_rate_reversed_fails() {
        let curve = MockCurve { rate: 0.05 };
        assert!(curve.forward_rate(2.0, 1.0).is_err());
    }
}
