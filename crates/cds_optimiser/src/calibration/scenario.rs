//! Spread scenarios: recalibration under shifted quotes.
//!
//! A [`SpreadShift`] moves every quoted par spread, either by a parallel
//! amount in basis points or by a multiplier. [`SpreadScenarioEngine`]
//! recalibrates the whole strip under each shift and reports how the
//! hazard curve, a reference-tenor par spread and the total net price
//! respond relative to the unshifted quotes.

use std::fmt;

use super::engine::HazardBootstrapper;
use super::error::CalibrationError;
use super::result::CalibrationResult;
use cds_core::market_data::curves::YieldCurve;
use cds_models::instruments::credit::{CdsQuote, ContractTerms, ValuationEngine, BASIS_POINTS};
use num_traits::Float;

/// Parallel bumps, in basis points, of the standard sensitivity ladder.
pub const STANDARD_PARALLEL_BUMPS_BPS: [f64; 7] = [-50.0, -25.0, -10.0, 0.0, 10.0, 25.0, 50.0];

/// Shift applied to every quoted par spread.
///
/// Running coupons set explicitly on a quote are left untouched; quotes
/// without one keep running at their (shifted) par spread.
///
/// # Example
///
/// ```
/// use cds_models::instruments::credit::CdsQuote;
/// use cds_optimiser::calibration::SpreadShift;
///
/// let quote = CdsQuote::from_bps(5.0_f64, 170.0);
/// let wider = SpreadShift::Parallel(25.0).apply(&quote);
/// assert!((wider.spread_bps() - 195.0).abs() < 1e-10);
///
/// let tighter = SpreadShift::Relative(0.5).apply(&quote);
/// assert!((tighter.spread_bps() - 85.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpreadShift<T: Float> {
    /// Add this many basis points to every spread.
    Parallel(T),
    /// Multiply every spread by this factor.
    Relative(T),
}

impl<T: Float> SpreadShift<T> {
    /// The shift that leaves quotes unchanged.
    pub fn none() -> Self {
        Self::Parallel(T::zero())
    }

    /// Parallel shifts for each entry of `bumps_bps`.
    pub fn parallel_ladder(bumps_bps: &[T]) -> Vec<Self> {
        bumps_bps.iter().map(|&bps| Self::Parallel(bps)).collect()
    }

    /// Whether the shift leaves every spread unchanged.
    pub fn is_identity(&self) -> bool {
        match *self {
            Self::Parallel(bps) => bps == T::zero(),
            Self::Relative(factor) => factor == T::one(),
        }
    }

    /// Shifted copy of `quote`.
    pub fn apply(&self, quote: &CdsQuote<T>) -> CdsQuote<T> {
        let spread = match *self {
            Self::Parallel(bps) => quote.spread + bps / T::from(BASIS_POINTS).unwrap(),
            Self::Relative(factor) => quote.spread * factor,
        };
        CdsQuote { spread, ..*quote }
    }

    /// Shifted copies of `quotes`.
    pub fn apply_all(&self, quotes: &[CdsQuote<T>]) -> Vec<CdsQuote<T>> {
        quotes.iter().map(|q| self.apply(q)).collect()
    }
}

impl<T: Float + fmt::Display> fmt::Display for SpreadShift<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parallel(bps) if *bps >= T::zero() => write!(f, "+{}bp", bps),
            Self::Parallel(bps) => write!(f, "{}bp", bps),
            Self::Relative(factor) => write!(f, "x{}", factor),
        }
    }
}

/// Calibration under one shift.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpreadScenario<T: Float> {
    /// Shift applied to the base quotes
    pub shift: SpreadShift<T>,
    /// Calibration to the shifted quotes
    pub result: CalibrationResult<T>,
    /// Par spread at the reference tenor, in basis points
    pub reference_par_bps: T,
    /// Sum of net prices across the shifted quotes, per unit notional
    pub total_net_price: T,
}

/// Change of one scenario against the base.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpreadSensitivity<T: Float> {
    /// Shift applied
    pub shift: SpreadShift<T>,
    /// Reference-tenor par spread in basis points
    pub reference_par_bps: T,
    /// Change of the reference par spread against the base
    pub reference_par_change_bps: T,
    /// Total net price
    pub total_net_price: T,
    /// Change of the total net price against the base
    pub net_price_change: T,
}

/// Base calibration plus every shifted recalibration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioAnalysis<T: Float> {
    /// Tenor at which the par spread is tracked
    pub reference_maturity: T,
    /// Calibration to the unshifted quotes
    pub base: SpreadScenario<T>,
    /// One entry per requested shift, in request order
    pub scenarios: Vec<SpreadScenario<T>>,
}

impl<T: Float> ScenarioAnalysis<T> {
    /// Per-scenario changes against the base.
    pub fn sensitivities(&self) -> Vec<SpreadSensitivity<T>> {
        self.scenarios
            .iter()
            .map(|s| SpreadSensitivity {
                shift: s.shift,
                reference_par_bps: s.reference_par_bps,
                reference_par_change_bps: s.reference_par_bps - self.base.reference_par_bps,
                total_net_price: s.total_net_price,
                net_price_change: s.total_net_price - self.base.total_net_price,
            })
            .collect()
    }
}

/// Recalibrates a quote strip under spread shifts.
///
/// # Example
///
/// ```
/// use cds_core::market_data::curves::DiscountCurve;
/// use cds_models::instruments::credit::{CdsQuote, ContractTerms};
/// use cds_optimiser::calibration::{HazardBootstrapper, SpreadScenarioEngine, SpreadShift};
///
/// let quotes = [CdsQuote::from_bps(1.0_f64, 120.0), CdsQuote::from_bps(5.0, 170.0)];
/// let discount = DiscountCurve::flat(0.015).unwrap();
/// let terms = ContractTerms::default();
/// let bootstrapper = HazardBootstrapper::with_defaults();
///
/// let engine = SpreadScenarioEngine::new(&bootstrapper, &discount, &terms);
/// let analysis = engine
///     .run(&quotes, &[SpreadShift::Parallel(25.0)], 5.0)
///     .unwrap();
/// let row = &analysis.sensitivities()[0];
/// assert!((row.reference_par_change_bps - 25.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SpreadScenarioEngine<'a, T: Float, D: YieldCurve<T>> {
    bootstrapper: &'a HazardBootstrapper<T>,
    discount: &'a D,
    terms: &'a ContractTerms<T>,
}

impl<'a, T: Float, D: YieldCurve<T>> SpreadScenarioEngine<'a, T, D> {
    /// Create an engine over fixed market data and terms.
    pub fn new(
        bootstrapper: &'a HazardBootstrapper<T>,
        discount: &'a D,
        terms: &'a ContractTerms<T>,
    ) -> Self {
        Self {
            bootstrapper,
            discount,
            terms,
        }
    }

    /// Calibrate `quotes` under a single shift.
    ///
    /// # Errors
    ///
    /// The first [`CalibrationError`] of the shifted calibration, or a
    /// valuation failure at `reference_maturity`.
    pub fn run_shift(
        &self,
        quotes: &[CdsQuote<T>],
        shift: SpreadShift<T>,
        reference_maturity: T,
    ) -> Result<SpreadScenario<T>, CalibrationError> {
        let shifted = shift.apply_all(quotes);
        let result = self
            .bootstrapper
            .calibrate(&shifted, self.discount, self.terms)?;

        let engine = ValuationEngine::new(self.discount, &result.curve, self.terms)?
            .with_quadrature(self.bootstrapper.config().quadrature);
        let reference_par_bps =
            engine.par_spread(reference_maturity)? * T::from(BASIS_POINTS).unwrap();
        let total_net_price = result
            .valuations
            .iter()
            .fold(T::zero(), |acc, v| acc + v.net_price);

        Ok(SpreadScenario {
            shift,
            result,
            reference_par_bps,
            total_net_price,
        })
    }

    /// Calibrate the base quotes and every shift in `shifts`.
    ///
    /// Stops at the first scenario that fails to calibrate.
    pub fn run(
        &self,
        quotes: &[CdsQuote<T>],
        shifts: &[SpreadShift<T>],
        reference_maturity: T,
    ) -> Result<ScenarioAnalysis<T>, CalibrationError> {
        let base = self.run_shift(quotes, SpreadShift::none(), reference_maturity)?;
        let scenarios = shifts
            .iter()
            .map(|&shift| {
                if shift.is_identity() {
                    Ok(SpreadScenario { shift, ..base.clone() })
                } else {
                    self.run_shift(quotes, shift, reference_maturity)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ScenarioAnalysis {
            reference_maturity,
            base,
            scenarios,
        })
    }
}
