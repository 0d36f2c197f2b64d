//! Market data structures for CDS valuation.
//!
//! # Components
//!
//! - [`curves`]: Discount curves (`FlatCurve`, `InterpolatedCurve`, `DiscountCurve`)
//!   and credit curves (`HazardCurve`, `FlatHazardRateCurve`)
//! - [`error`]: Curve error types (`CurveError`)
//!
//! All structures are generic over `T: Float`.
//!
//! # Example
//!
//! ```
//! use cds_core::market_data::curves::{YieldCurve, FlatCurve};
//!
//! let curve = FlatCurve::new(0.05_f64);
//! let df = curve.discount_factor(1.0).unwrap();
//! assert!((df - 0.951229).abs() < 1e-5);
//! ```

pub mod curves;
pub mod error;

pub use curves::{
    CreditCurve, CurveInterpolation, DiscountCurve, FlatCurve, FlatHazardRateCurve, HazardCurve,
    HazardSegment, InterpolatedCurve, YieldCurve,
};
pub use error::CurveError;
