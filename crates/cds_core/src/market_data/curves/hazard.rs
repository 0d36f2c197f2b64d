//! Piece-wise constant hazard curve.

use super::CreditCurve;
use crate::market_data::error::CurveError;
use num_traits::Float;

/// One constant-intensity segment `(start, end]` of a [`HazardCurve`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardSegment<T: Float> {
    /// Segment start (years)
    pub start: T,
    /// Segment end (years)
    pub end: T,
    /// Constant hazard rate on the segment
    pub hazard_rate: T,
}

impl<T: Float> HazardSegment<T> {
    /// Length of the overlap between this segment and `[0, t]`.
    #[inline]
    pub fn overlap(&self, t: T) -> T {
        (t.min(self.end) - self.start).max(T::zero())
    }
}

/// Piece-wise constant hazard curve built from contiguous segments.
///
/// Segment `i + 1` starts exactly where segment `i` ends and the first
/// segment starts at 0. Past the last boundary the final rate is
/// extrapolated. An empty curve has zero intensity.
///
/// ```text
/// Q(t) = exp(-Σᵢ λᵢ · |segmentᵢ ∩ [0, t]|)
/// ```
///
/// The only mutation is [`append_segment`](Self::append_segment).
///
/// # Example
///
/// ```
/// use cds_core::market_data::curves::{CreditCurve, HazardCurve};
///
/// let mut curve = HazardCurve::new();
/// curve.append_segment(1.0_f64, 0.01).unwrap();
/// curve.append_segment(3.0, 0.02).unwrap();
///
/// let q = curve.survival_probability(2.0).unwrap();
/// assert!((q - (-0.03_f64).exp()).abs() < 1e-15);
///
/// // Boundaries must advance
/// assert!(curve.append_segment(3.0, 0.02).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardCurve<T: Float> {
    segments: Vec<HazardSegment<T>>,
}

impl<T: Float> Default for HazardCurve<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> HazardCurve<T> {
    /// Create an empty curve.
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Rebuild a curve from segment end times and rates.
    ///
    /// # Errors
    ///
    /// * `LengthMismatch` - Inputs differ in length
    /// * Any error of [`append_segment`](Self::append_segment)
    pub fn from_pillars(maturities: &[T], hazard_rates: &[T]) -> Result<Self, CurveError> {
        if maturities.len() != hazard_rates.len() {
            return Err(CurveError::LengthMismatch {
                times: maturities.len(),
                rates: hazard_rates.len(),
            });
        }
        let mut curve = Self {
            segments: Vec::with_capacity(maturities.len()),
        };
        for (&end, &rate) in maturities.iter().zip(hazard_rates.iter()) {
            curve.append_segment(end, rate)?;
        }
        Ok(curve)
    }

    /// Segments in time order.
    #[inline]
    pub fn segments(&self) -> &[HazardSegment<T>] {
        &self.segments
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if no segment has been appended.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// End of the last segment, or 0 for an empty curve.
    #[inline]
    pub fn last_boundary(&self) -> T {
        self.segments.last().map_or(T::zero(), |s| s.end)
    }

    /// Append a terminal segment `(last_boundary, end_time]`.
    ///
    /// # Errors
    ///
    /// * `NonIncreasingBoundary` - `end_time` is not strictly after the last boundary
    /// * `NonFiniteRate` - `hazard_rate` is NaN or infinite
    pub fn append_segment(&mut self, end_time: T, hazard_rate: T) -> Result<(), CurveError> {
        let start = self.last_boundary();
        if !(end_time > start) || !end_time.is_finite() {
            return Err(CurveError::NonIncreasingBoundary {
                end: end_time.to_f64().unwrap_or(f64::NAN),
                last: start.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !hazard_rate.is_finite() {
            return Err(CurveError::NonFiniteRate {
                t: end_time.to_f64().unwrap_or(f64::NAN),
                rate: hazard_rate.to_f64().unwrap_or(f64::NAN),
            });
        }
        self.segments.push(HazardSegment {
            start,
            end: end_time,
            hazard_rate,
        });
        Ok(())
    }

    /// Return a copy of this curve with one more segment appended.
    ///
    /// The receiver is left untouched.
    pub fn extended(&self, end_time: T, hazard_rate: T) -> Result<Self, CurveError> {
        let mut trial = self.clone();
        trial.append_segment(end_time, hazard_rate)?;
        Ok(trial)
    }

    /// `(end_time, hazard_rate)` pairs, one per segment.
    pub fn pillars(&self) -> Vec<(T, T)> {
        self.segments
            .iter()
            .map(|s| (s.end, s.hazard_rate))
            .collect()
    }

    /// Interior segment boundaries (every end except the last).
    pub fn knots(&self) -> Vec<T> {
        let n = self.segments.len().saturating_sub(1);
        self.segments[..n].iter().map(|s| s.end).collect()
    }

    /// Hazard rate of the segment containing `t`.
    ///
    /// Segments are closed on the right, so a boundary belongs to the
    /// segment it ends. `t = 0` maps to the first segment.
    pub fn hazard_rate_at(&self, t: T) -> Result<T, CurveError> {
        if !(t >= T::zero()) {
            return Err(CurveError::invalid_maturity(t));
        }
        let last = match self.segments.last() {
            Some(last) => last,
            None => return Ok(T::zero()),
        };
        let idx = self.segments.partition_point(|s| s.end < t);
        Ok(self
            .segments
            .get(idx)
            .map_or(last.hazard_rate, |s| s.hazard_rate))
    }

    /// Integrated hazard ∫₀ᵗ λ(s) ds.
    pub fn integrated_hazard(&self, t: T) -> Result<T, CurveError> {
        if !(t >= T::zero()) {
            return Err(CurveError::invalid_maturity(t));
        }
        let mut total = self
            .segments
            .iter()
            .take_while(|s| s.start < t)
            .fold(T::zero(), |acc, s| acc + s.hazard_rate * s.overlap(t));

        if let Some(last) = self.segments.last() {
            if t > last.end {
                total = total + last.hazard_rate * (t - last.end);
            }
        }
        Ok(total)
    }
}

impl<T: Float> CreditCurve<T> for HazardCurve<T> {
    fn hazard_rate(&self, t: T) -> Result<T, CurveError> {
        self.hazard_rate_at(t)
    }

    fn survival_probability(&self, t: T) -> Result<T, CurveError> {
        let integrated = self.integrated_hazard(t)?;
        if t == T::zero() {
            return Ok(T::one());
        }
        Ok((-integrated).exp())
    }

    fn hazard_knots(&self, from: T, to: T) -> Vec<T> {
        self.segments
            .iter()
            .map(|s| s.end)
            .filter(|&end| end > from && end < to)
            .collect()
    }
}
