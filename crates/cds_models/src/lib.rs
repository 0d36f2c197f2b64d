//! # CDS Models (L2: Business Logic)
//!
//! Credit default swap contract definitions and leg valuation.
//!
//! This crate provides:
//! - Contract terms and ISDA conventions (`instruments::credit`)
//! - Market quotes (`instruments::credit::CdsQuote`)
//! - Coupon schedules with short final stubs (`schedules`)
//! - The [`ValuationEngine`](instruments::credit::ValuationEngine): premium,
//!   accrual-on-default and protection legs, PV01 and par spread
//!
//! ## Example
//!
//! ```
//! use cds_core::market_data::curves::{DiscountCurve, HazardCurve};
//! use cds_models::instruments::credit::{ContractTerms, ValuationEngine};
//!
//! let discount = DiscountCurve::flat(0.015_f64).unwrap();
//! let hazard = HazardCurve::from_pillars(&[1.0], &[0.02]).unwrap();
//! let terms = ContractTerms::new(0.4, 4);
//!
//! let engine = ValuationEngine::new(&discount, &hazard, &terms).unwrap();
//! let par = engine.par_spread(1.0).unwrap();
//! // Credit triangle: s ≈ λ (1 - R)
//! assert!((par - 0.012).abs() < 5e-4);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod instruments;
pub mod schedules;

pub use error::ValuationError;
