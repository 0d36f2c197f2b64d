//! Flat discount curve.

use super::YieldCurve;
use crate::market_data::error::CurveError;
use num_traits::Float;

/// Flat discount curve with a constant continuously compounded rate.
///
/// ```text
/// D(t) = exp(-r * t)
/// ```
///
/// # Example
///
/// ```
/// use cds_core::market_data::curves::{YieldCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.015_f64);
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - (-0.015_f64).exp()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatCurve<T: Float> {
    rate: T,
}

impl<T: Float> FlatCurve<T> {
    /// Construct a flat curve with the given constant rate.
    ///
    /// Negative rates are accepted. Finiteness is checked by
    /// [`DiscountCurve::flat`](super::DiscountCurve::flat).
    #[inline]
    pub fn new(rate: T) -> Self {
        Self { rate }
    }

    /// Return the constant rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }
}

impl<T: Float> YieldCurve<T> for FlatCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, CurveError> {
        if !(t >= T::zero()) {
            return Err(CurveError::invalid_maturity(t));
        }
        if t == T::zero() {
            return Ok(T::one());
        }
        Ok((-self.rate * t).exp())
    }

    fn zero_rate(&self, t: T) -> Result<T, CurveError> {
        if t <= T::zero() {
            return Err(CurveError::invalid_maturity(t));
        }
        Ok(self.rate)
    }

    fn forward_rate(&self, t1: T, t2: T) -> Result<T, CurveError> {
        if t2 <= t1 {
            return Err(CurveError::invalid_maturity(t2 - t1));
        }
        Ok(self.rate)
    }
}
