//! Calibration results.

use cds_core::market_data::curves::HazardCurve;
use cds_models::instruments::credit::{CdsQuote, CdsValuation, BASIS_POINTS};
use num_traits::Float;

/// Market against model par spread for one tenor, in basis points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParReconciliation<T: Float> {
    /// Tenor in years
    pub maturity: T,
    /// Quoted par spread
    pub market_bps: T,
    /// Par spread on the calibrated curve
    pub model_bps: T,
    /// Model minus market
    pub error_bps: T,
}

/// Result of a successful calibration.
///
/// Vectors are aligned with the input quotes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationResult<T: Float> {
    /// Calibrated hazard curve, one segment per quote
    pub curve: HazardCurve<T>,
    /// Quotes the curve was calibrated to
    pub quotes: Vec<CdsQuote<T>>,
    /// Valuation of each quote at its running coupon, per unit notional
    pub valuations: Vec<CdsValuation<T>>,
    /// Model minus market par spread
    pub residuals: Vec<T>,
    /// Objective evaluations spent on each tenor
    pub evaluations: Vec<usize>,
}

impl<T: Float> CalibrationResult<T> {
    /// (end time, hazard rate) per segment.
    pub fn hazard_pillars(&self) -> Vec<(T, T)> {
        self.curve.pillars()
    }

    /// Largest absolute par-spread residual.
    pub fn max_abs_residual(&self) -> T {
        self.residuals
            .iter()
            .fold(T::zero(), |acc, r| acc.max(r.abs()))
    }

    /// Total objective evaluations.
    pub fn total_evaluations(&self) -> usize {
        self.evaluations.iter().sum()
    }

    /// Market against model par spread per tenor.
    pub fn par_reconciliation(&self) -> Vec<ParReconciliation<T>> {
        let bps = T::from(BASIS_POINTS).unwrap();
        self.quotes
            .iter()
            .zip(&self.valuations)
            .map(|(quote, valuation)| {
                let market_bps = quote.spread * bps;
                let model_bps = valuation.par_spread * bps;
                ParReconciliation {
                    maturity: quote.maturity,
                    market_bps,
                    model_bps,
                    error_bps: model_bps - market_bps,
                }
            })
            .collect()
    }

    /// Valuations with PVs multiplied by `notional`.
    pub fn scaled_valuations(&self, notional: T) -> Vec<CdsValuation<T>> {
        self.valuations.iter().map(|v| v.scaled(notional)).collect()
    }
}
