//! Interpolation methods.
//!
//! - [`LinearInterpolator`]: Piecewise linear interpolation between data points
//! - [`Interpolator`]: Common one-dimensional interpolator trait

mod linear;
mod traits;

pub use linear::LinearInterpolator;
pub use traits::Interpolator;
