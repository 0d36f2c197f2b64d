//! Curve abstractions for discounting and credit risk.
//!
//! This module provides:
//! - [`YieldCurve`]: Generic trait for discount factor and rate calculations
//! - [`FlatCurve`]: Constant rate discount curve
//! - [`InterpolatedCurve`]: Pillar-based interpolated discount curve
//! - [`CurveInterpolation`]: Interpolation method selection
//! - [`DiscountCurve`]: Static dispatch enum over the discount curve shapes
//! - [`CreditCurve`]: Generic trait for hazard rate and survival probability calculations
//! - [`HazardCurve`]: Piece-wise constant hazard curve built segment by segment
//! - [`FlatHazardRateCurve`]: Constant hazard rate curve

mod credit;
mod discount;
mod flat;
mod hazard;
mod interpolated;
mod traits;

pub use credit::{CreditCurve, FlatHazardRateCurve};
pub use discount::DiscountCurve;
pub use flat::FlatCurve;
pub use hazard::{HazardCurve, HazardSegment};
pub use interpolated::{CurveInterpolation, InterpolatedCurve};
pub use traits::YieldCurve;
