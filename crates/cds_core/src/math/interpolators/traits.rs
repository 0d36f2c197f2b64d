//! Interpolator trait definition.

use crate::types::InterpolationError;
use num_traits::Float;

/// One-dimensional interpolator over a closed domain.
pub trait Interpolator<T: Float> {
    /// Interpolate at `x`.
    ///
    /// # Returns
    ///
    /// * `Ok(y)` - Interpolated value
    /// * `Err(InterpolationError::OutOfBounds)` - If `x` lies outside [`domain`](Self::domain)
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Return the valid interpolation range `(x_min, x_max)`.
    fn domain(&self) -> (T, T);
}
