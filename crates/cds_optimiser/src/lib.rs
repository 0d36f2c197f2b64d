//! # cds_optimiser
//!
//! Hazard-curve calibration for single-name CDS.
//!
//! This crate sits on top of the valuation layer and solves the inverse
//! problem: given par-spread quotes, find the piece-wise constant hazard
//! curve that reprices every one of them.
//!
//! ## Architecture Position
//!
//! Depends on `cds_core` (curves, solvers, quadrature) and `cds_models`
//! (contract terms and leg valuation).
//!
//! ## Modules
//!
//! - `calibration`: Sequential hazard-curve bootstrapping and spread scenarios
//!
//! ## Example
//!
//! ```
//! use cds_core::market_data::curves::DiscountCurve;
//! use cds_models::instruments::credit::{CdsQuote, ContractTerms};
//! use cds_optimiser::prelude::*;
//!
//! let quotes = [CdsQuote::from_bps(1.0_f64, 120.0)];
//! let discount = DiscountCurve::flat(0.015).unwrap();
//! let terms = ContractTerms::default();
//!
//! let result = HazardBootstrapper::with_defaults()
//!     .calibrate(&quotes, &discount, &terms)
//!     .unwrap();
//! let row = &result.par_reconciliation()[0];
//! assert!(row.error_bps.abs() < 1e-6);
//! ```

#![deny(missing_docs)]

pub mod calibration;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::calibration::*;
}
