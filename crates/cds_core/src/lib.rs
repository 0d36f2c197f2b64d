//! # cds_core: Numerical Foundation for CDS Hazard-Curve Calibration
//!
//! ## Layer 1 (Foundation) Role
//!
//! cds_core is the bottom layer of the calibration workspace, providing:
//! - Discount curves: `FlatCurve`, `InterpolatedCurve` and the static-dispatch
//!   `DiscountCurve` enum (`market_data::curves`)
//! - Credit curves: the piece-wise constant `HazardCurve` and
//!   `FlatHazardRateCurve` (`market_data::curves`)
//! - Fixed-grid quadrature (`math::quadrature`)
//! - Bracketed root finders: `BrentSolver`, `BisectionSolver` (`math::solvers`)
//! - Error types: `CurveError`, `SolverError`, `ConfigError`
//!
//! ## Dependencies
//!
//! Layer 1 has no dependencies on other cds_* crates:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use cds_core::market_data::curves::{CreditCurve, DiscountCurve, HazardCurve, YieldCurve};
//!
//! let discount = DiscountCurve::flat(0.015_f64).unwrap();
//! assert_eq!(discount.discount_factor(0.0).unwrap(), 1.0);
//!
//! let mut hazard = HazardCurve::new();
//! hazard.append_segment(1.0_f64, 0.02).unwrap();
//! let q = hazard.survival_probability(1.0).unwrap();
//! assert!((q - (-0.02_f64).exp()).abs() < 1e-15);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for curves, segments and error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
