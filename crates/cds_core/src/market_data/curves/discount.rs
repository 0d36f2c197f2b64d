//! Static-dispatch discount curve.

use super::{CurveInterpolation, FlatCurve, InterpolatedCurve, YieldCurve};
use crate::market_data::error::CurveError;
use crate::types::ConfigError;
use num_traits::Float;

/// Discount curve used by valuation and calibration.
///
/// A closed enum over the supported curve shapes, dispatching
/// [`YieldCurve`] calls without trait objects.
///
/// # Variants
///
/// - `Flat`: Constant continuously compounded rate
/// - `Pillars`: Interpolated zero-rate pillars with flat extrapolation
///
/// # Example
///
/// ```
/// use cds_core::market_data::curves::{CurveInterpolation, DiscountCurve, YieldCurve};
///
/// let flat = DiscountCurve::flat(0.015_f64).unwrap();
/// let pillars = DiscountCurve::pillars(
///     &[1.0_f64, 5.0],
///     &[0.015, 0.015],
///     CurveInterpolation::Linear,
/// )
/// .unwrap();
///
/// let t = 3.0;
/// assert!((flat.discount_factor(t).unwrap() - pillars.discount_factor(t).unwrap()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiscountCurve<T: Float> {
    /// Flat curve.
    Flat(FlatCurve<T>),
    /// Pillar curve.
    Pillars(InterpolatedCurve<T>),
}

impl<T: Float> DiscountCurve<T> {
    /// Construct a flat curve.
    ///
    /// # Errors
    ///
    /// `ConfigError::MalformedCurve` if `rate` is NaN or infinite.
    pub fn flat(rate: T) -> Result<Self, ConfigError> {
        if !rate.is_finite() {
            return Err(CurveError::NonFiniteRate {
                t: 0.0,
                rate: rate.to_f64().unwrap_or(f64::NAN),
            }
            .into());
        }
        Ok(Self::Flat(FlatCurve::new(rate)))
    }

    /// Construct a pillar curve from `(time, zero_rate)` pairs.
    ///
    /// # Errors
    ///
    /// `ConfigError::MalformedCurve` wrapping the construction failure
    /// (empty input, mismatched lengths, non-increasing or negative times,
    /// non-finite rates).
    pub fn pillars(
        times: &[T],
        rates: &[T],
        method: CurveInterpolation,
    ) -> Result<Self, ConfigError> {
        Ok(Self::Pillars(InterpolatedCurve::new(times, rates, method)?))
    }
}

impl<T: Float> YieldCurve<T> for DiscountCurve<T> {
    #[inline]
    fn discount_factor(&self, t: T) -> Result<T, CurveError> {
        match self {
            Self::Flat(curve) => curve.discount_factor(t),
            Self::Pillars(curve) => curve.discount_factor(t),
        }
    }

    #[inline]
    fn zero_rate(&self, t: T) -> Result<T, CurveError> {
        match self {
            Self::Flat(curve) => curve.zero_rate(t),
            Self::Pillars(curve) => curve.zero_rate(t),
        }
    }

    #[inline]
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, CurveError> {
        match self {
            Self::Flat(curve) => curve.forward_rate(t1, t2),
            Self::Pillars(curve) => curve.forward_rate(t1, t2),
        }
    }
}

impl<T: Float> From<FlatCurve<T>> for DiscountCurve<T> {
    fn from(curve: FlatCurve<T>) -> Self {
        Self::Flat(curve)
    }
}

impl<T: Float> From<InterpolatedCurve<T>> for DiscountCurve<T> {
    fn from(curve: InterpolatedCurve<T>) -> Self {
        Self::Pillars(curve)
    }
}
