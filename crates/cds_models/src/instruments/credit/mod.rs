//! Single-name credit default swaps.
//!
//! This module provides:
//! - [`ContractTerms`] and [`IsdaConventions`]: Run-wide contract parameters
//! - [`CdsQuote`]: Par-spread quote for one maturity
//! - [`ValuationEngine`]: Premium, accrual-on-default and protection legs
//! - [`CdsValuation`] and [`PremiumLegBreakdown`]: Valuation results
//!
//! # Examples
//!
//! ```
//! use cds_core::market_data::curves::{DiscountCurve, HazardCurve};
//! use cds_models::instruments::credit::{CdsQuote, ContractTerms, ValuationEngine};
//!
//! let discount = DiscountCurve::flat(0.015_f64).unwrap();
//! let hazard = HazardCurve::from_pillars(&[1.0, 3.0], &[0.02, 0.025]).unwrap();
//! let terms = ContractTerms::default();
//! let engine = ValuationEngine::new(&discount, &hazard, &terms).unwrap();
//!
//! let quote = CdsQuote::from_bps(3.0, 145.0).with_coupon_bps(100.0);
//! let valuation = engine.value_quote(&quote).unwrap();
//! assert!(valuation.protection_pv > valuation.premium_pv);
//! ```

mod pricing;
mod quote;
mod results;
mod terms;

pub use pricing::ValuationEngine;
pub use quote::{CdsQuote, BASIS_POINTS};
pub use results::{CdsValuation, PremiumLegBreakdown};
pub use terms::{ContractTerms, IsdaConventions, CALENDAR_DAYS_PER_YEAR};
