//! Linear interpolation implementation.

use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise linear interpolator.
///
/// Abscissae must be strictly increasing; input is never reordered.
///
/// # Example
///
/// ```
/// use cds_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(&[0.0_f64, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
/// assert!((interp.interpolate(1.5).unwrap() - 2.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
}

impl<T: Float> LinearInterpolator<T> {
    /// Create an interpolator from matching `xs` and `ys`.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - Lengths differ
    /// * `InsufficientData` - Fewer than 2 points
    /// * `NonMonotonicData` - `xs` not strictly increasing
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }

        if xs.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: xs.len(),
                need: 2,
            });
        }

        if let Some(index) = xs.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(InterpolationError::NonMonotonicData { index: index + 1 });
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// Abscissae.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Ordinates.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    #[inline]
    fn find_segment(&self, x: T) -> usize {
        let pos = self.xs.partition_point(|&xi| xi <= x);
        if pos == 0 {
            0
        } else if pos >= self.xs.len() {
            self.xs.len() - 2
        } else {
            pos - 1
        }
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();

        if !(x >= x_min && x <= x_max) {
            return Err(InterpolationError::OutOfBounds {
                x: x.to_f64().unwrap_or(f64::NAN),
                min: x_min.to_f64().unwrap_or(f64::NAN),
                max: x_max.to_f64().unwrap_or(f64::NAN),
            });
        }

        let i = self.find_segment(x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);

        let w = (x - x0) / (x1 - x0);
        Ok(y0 + (y1 - y0) * w)
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Construction Tests
    // ========================================

    #[test]
    fn test_new_rejects_single_point() {
        let result = LinearInterpolator::new(&[1.0_f64], &[1.0]);
        assert_eq!(
            result.unwrap_err(),
            InterpolationError::InsufficientData { got: 1, need: 2 }
        );
    }

    #[test]
    fn test_new_rejects_unsorted() {
        let result = LinearInterpolator::new(&[0.0_f64, 2.0, 1.0], &[0.0, 1.0, 2.0]);
        assert_eq!(
            result.unwrap_err(),
            InterpolationError::NonMonotonicData { index: 2 }
        );
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let result = LinearInterpolator::new(&[0.0_f64, 1.0], &[0.0]);
        assert!(matches!(
            result.unwrap_err(),
            InterpolationError::InvalidInput(_)
        ));
    }

    // ========================================
    // Interpolation Tests
    // ========================================

    #[test]
    fn test_interpolate_at_knots() {
        let interp = LinearInterpolator::new(&[0.0_f64, 1.0, 3.0], &[1.0, 2.0, 0.0]).unwrap();
        assert_eq!(interp.interpolate(0.0).unwrap(), 1.0);
        assert_eq!(interp.interpolate(1.0).unwrap(), 2.0);
        assert_eq!(interp.interpolate(3.0).unwrap(), 0.0);
    }

    #[test]
    fn test_interpolate_between_knots() {
        let interp = LinearInterpolator::new(&[0.0_f64, 1.0, 3.0], &[1.0, 2.0, 0.0]).unwrap();
        assert!((interp.interpolate(2.0).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_interpolate_out_of_bounds() {
        let interp = LinearInterpolator::new(&[0.0_f64, 1.0], &[0.0, 1.0]).unwrap();
        assert!(matches!(
            interp.interpolate(1.5).unwrap_err(),
            InterpolationError::OutOfBounds { .. }
        ));
    }
}
