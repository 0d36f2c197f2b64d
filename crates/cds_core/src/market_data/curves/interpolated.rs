//! Pillar-based interpolated discount curve.

use super::YieldCurve;
use crate::market_data::error::CurveError;
use crate::math::interpolators::{Interpolator, LinearInterpolator};
use num_traits::Float;

/// Interpolation method for pillar discount curves.
///
/// # Variants
///
/// - `Linear`: Linear interpolation on zero rates, `z(t)` then `D = exp(-z t)`
/// - `LogLinear`: Linear interpolation on `ln D(t) = -z t`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CurveInterpolation {
    /// Linear interpolation on zero rates.
    #[default]
    Linear,

    /// Linear interpolation on log discount factors.
    LogLinear,
}

/// Discount curve built from ordered `(time, zero_rate)` pillars.
///
/// The zero rate is held flat before the first pillar and beyond the last
/// one. A single pillar therefore describes a flat curve.
///
/// # Example
///
/// ```
/// use cds_core::market_data::curves::{CurveInterpolation, InterpolatedCurve, YieldCurve};
///
/// let curve = InterpolatedCurve::new(
///     &[1.0_f64, 5.0],
///     &[0.01, 0.03],
///     CurveInterpolation::Linear,
/// )
/// .unwrap();
///
/// // z(3) = 0.02
/// let df = curve.discount_factor(3.0).unwrap();
/// assert!((df - (-0.06_f64).exp()).abs() < 1e-14);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterpolatedCurve<T: Float> {
    times: Vec<T>,
    rates: Vec<T>,
    method: CurveInterpolation,
    interpolator: Option<LinearInterpolator<T>>,
}

impl<T: Float> InterpolatedCurve<T> {
    /// Construct a curve from pillar times and zero rates.
    ///
    /// # Errors
    ///
    /// * `InsufficientData` - No pillars
    /// * `LengthMismatch` - `times` and `rates` differ in length
    /// * `InvalidMaturity` - Negative or non-finite pillar time
    /// * `NonIncreasingBoundary` - Pillar times not strictly increasing
    /// * `NonFiniteRate` - NaN or infinite zero rate
    pub fn new(times: &[T], rates: &[T], method: CurveInterpolation) -> Result<Self, CurveError> {
        if times.is_empty() {
            return Err(CurveError::InsufficientData { got: 0, need: 1 });
        }

        if times.len() != rates.len() {
            return Err(CurveError::LengthMismatch {
                times: times.len(),
                rates: rates.len(),
            });
        }

        for (i, (&t, &r)) in times.iter().zip(rates.iter()).enumerate() {
            if !(t >= T::zero()) || !t.is_finite() {
                return Err(CurveError::invalid_maturity(t));
            }
            if i > 0 && t <= times[i - 1] {
                return Err(CurveError::NonIncreasingBoundary {
                    end: t.to_f64().unwrap_or(f64::NAN),
                    last: times[i - 1].to_f64().unwrap_or(f64::NAN),
                });
            }
            if !r.is_finite() {
                return Err(CurveError::NonFiniteRate {
                    t: t.to_f64().unwrap_or(f64::NAN),
                    rate: r.to_f64().unwrap_or(f64::NAN),
                });
            }
        }

        let interpolator = if times.len() > 1 {
            let ordinates: Vec<T> = match method {
                CurveInterpolation::Linear => rates.to_vec(),
                CurveInterpolation::LogLinear => times
                    .iter()
                    .zip(rates.iter())
                    .map(|(&t, &r)| -r * t)
                    .collect(),
            };
            Some(LinearInterpolator::new(times, &ordinates)?)
        } else {
            None
        };

        Ok(Self {
            times: times.to_vec(),
            rates: rates.to_vec(),
            method,
            interpolator,
        })
    }

    /// Pillar times.
    #[inline]
    pub fn times(&self) -> &[T] {
        &self.times
    }

    /// Pillar zero rates.
    #[inline]
    pub fn rates(&self) -> &[T] {
        &self.rates
    }

    /// First and last pillar time.
    #[inline]
    pub fn domain(&self) -> (T, T) {
        (self.times[0], self.times[self.times.len() - 1])
    }

    /// Interpolation method.
    #[inline]
    pub fn method(&self) -> CurveInterpolation {
        self.method
    }
}

impl<T: Float> YieldCurve<T> for InterpolatedCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, CurveError> {
        if !(t >= T::zero()) {
            return Err(CurveError::invalid_maturity(t));
        }
        if t == T::zero() {
            return Ok(T::one());
        }

        let (t_min, t_max) = self.domain();
        if t <= t_min {
            return Ok((-self.rates[0] * t).exp());
        }
        if t >= t_max {
            return Ok((-self.rates[self.rates.len() - 1] * t).exp());
        }

        let interpolator = match &self.interpolator {
            Some(interpolator) => interpolator,
            None => return Ok((-self.rates[0] * t).exp()),
        };
        let y = interpolator.interpolate(t)?;
        match self.method {
            CurveInterpolation::Linear => Ok((-y * t).exp()),
            CurveInterpolation::LogLinear => Ok(y.exp()),
        }
    }
}
