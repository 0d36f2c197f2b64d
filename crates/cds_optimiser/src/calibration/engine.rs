//! Sequential hazard-curve bootstrapping engine.
//!
//! This module provides `HazardBootstrapper<T>`, which strips a piece-wise
//! constant hazard curve from CDS par-spread quotes one tenor at a time.

use super::config::{CalibrationConfig, SolverKind};
use super::error::CalibrationError;
use super::result::CalibrationResult;
use cds_core::market_data::curves::{HazardCurve, YieldCurve};
use cds_core::math::solvers::{BisectionSolver, BracketedRootFinder, BrentSolver};
use cds_core::types::SolverError;
use cds_models::instruments::credit::{CdsQuote, ContractTerms, ValuationEngine};
use num_traits::Float;
use tracing::{debug, warn};

/// Sequential hazard-curve bootstrapper.
///
/// Implements the standard stripping algorithm:
/// 1. Check that quotes are non-empty and strictly increasing in maturity
/// 2. For each quote, hold earlier segments fixed and solve for the hazard
///    rate on `(previous maturity, maturity]` that reprices the quote at par
/// 3. Append the solved segment and move on
///
/// # Examples
///
/// ```
/// use cds_core::market_data::curves::{CreditCurve, DiscountCurve};
/// use cds_models::instruments::credit::{CdsQuote, ContractTerms};
/// use cds_optimiser::calibration::HazardBootstrapper;
///
/// let quotes = vec![
///     CdsQuote::from_bps(1.0_f64, 120.0),
///     CdsQuote::from_bps(3.0, 145.0),
///     CdsQuote::from_bps(5.0, 170.0),
/// ];
/// let discount = DiscountCurve::flat(0.015).unwrap();
/// let terms = ContractTerms::new(0.4, 4);
///
/// let bootstrapper = HazardBootstrapper::with_defaults();
/// let result = bootstrapper.calibrate(&quotes, &discount, &terms).unwrap();
///
/// assert_eq!(result.curve.len(), 3);
/// assert!(result.max_abs_residual() < 1e-10);
/// assert!(result.curve.survival_probability(5.0).unwrap() < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct HazardBootstrapper<T: Float> {
    config: CalibrationConfig<T>,
}

impl<T: Float> HazardBootstrapper<T> {
    /// Create a new bootstrapper.
    pub fn new(config: CalibrationConfig<T>) -> Self {
        Self { config }
    }

    /// Create a bootstrapper with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(CalibrationConfig::default())
    }

    /// Get the configuration.
    pub fn config(&self) -> &CalibrationConfig<T> {
        &self.config
    }

    /// Calibrate a hazard curve to `quotes`.
    ///
    /// # Arguments
    ///
    /// * `quotes` - Par-spread quotes, strictly increasing in maturity
    /// * `discount` - Discount curve
    /// * `terms` - Contract terms shared by every quote
    ///
    /// # Returns
    ///
    /// * `Ok(result)` - Curve with one segment per quote plus diagnostics
    /// * `Err(CalibrationError)` - The first failure; nothing is retried
    pub fn calibrate<D: YieldCurve<T>>(
        &self,
        quotes: &[CdsQuote<T>],
        discount: &D,
        terms: &ContractTerms<T>,
    ) -> Result<CalibrationResult<T>, CalibrationError> {
        self.config.validate()?;
        terms.validate()?;
        validate_quotes(quotes)?;

        let mut curve = HazardCurve::new();
        let mut evaluations = Vec::with_capacity(quotes.len());

        for quote in quotes {
            let (hazard_rate, count) = self.solve_tenor(&curve, quote, discount, terms)?;
            curve.append_segment(quote.maturity, hazard_rate)?;
            debug!(
                maturity = to_f64(quote.maturity),
                spread_bps = to_f64(quote.spread_bps()),
                hazard_rate = to_f64(hazard_rate),
                evaluations = count,
                "calibrated tenor"
            );
            evaluations.push(count);
        }

        let engine = ValuationEngine::new(discount, &curve, terms)?
            .with_quadrature(self.config.quadrature);
        let valuations = quotes
            .iter()
            .map(|quote| engine.value_quote(quote))
            .collect::<Result<Vec<_>, _>>()?;
        let residuals = valuations
            .iter()
            .zip(quotes)
            .map(|(valuation, quote)| valuation.par_spread - quote.spread)
            .collect();

        Ok(CalibrationResult {
            curve,
            quotes: quotes.to_vec(),
            valuations,
            residuals,
            evaluations,
        })
    }

    /// Solve one tenor, returning the hazard rate and evaluation count.
    fn solve_tenor<D: YieldCurve<T>>(
        &self,
        curve: &HazardCurve<T>,
        quote: &CdsQuote<T>,
        discount: &D,
        terms: &ContractTerms<T>,
    ) -> Result<(T, usize), CalibrationError> {
        let maturity = quote.maturity;
        let tolerance = self.config.tolerance;
        let mut objective = TenorObjective {
            curve,
            discount,
            terms,
            config: &self.config,
            maturity,
            spread: quote.spread,
            evaluations: 0,
            last_residual: T::nan(),
            failure: None,
        };

        let f_zero = objective.residual(T::zero())?;
        if f_zero.abs() < tolerance {
            return Ok((T::zero(), objective.evaluations));
        }

        let (lower, upper) = self.bracket(&mut objective, f_zero)?;

        let root = match self.config.solver {
            SolverKind::Brent => {
                let solver = BrentSolver::new(self.config.solver_config());
                solver.find_root(|x| objective.residual_or_nan(x), lower, upper)
            }
            SolverKind::Bisection => {
                let solver = BisectionSolver::new(self.config.solver_config());
                solver.find_root(|x| objective.residual_or_nan(x), lower, upper)
            }
        };

        if let Some(failure) = objective.failure.take() {
            return Err(failure);
        }

        let hazard_rate = match root {
            Ok(root) => root,
            Err(SolverError::MaxIterationsExceeded { .. }) => {
                return Err(CalibrationError::convergence_failure(
                    to_f64(maturity),
                    to_f64(objective.last_residual),
                    objective.evaluations,
                ));
            }
            Err(e) => return Err(CalibrationError::solver(to_f64(maturity), e)),
        };

        let residual = objective.residual(hazard_rate)?;
        if !(residual.abs() <= tolerance) {
            return Err(CalibrationError::convergence_failure(
                to_f64(maturity),
                to_f64(residual),
                objective.evaluations,
            ));
        }

        if hazard_rate < T::zero() {
            if !self.config.allow_negative_hazard {
                return Err(CalibrationError::negative_hazard(
                    to_f64(maturity),
                    to_f64(hazard_rate),
                ));
            }
            warn!(
                maturity = to_f64(maturity),
                hazard_rate = to_f64(hazard_rate),
                "accepting negative hazard rate"
            );
        }

        Ok((hazard_rate, objective.evaluations))
    }

    /// Expand away from zero until the residual changes sign.
    ///
    /// A negative `f_zero` means the segment needs positive intensity; a
    /// positive one means the earlier segments already overprice the quote.
    fn bracket<D: YieldCurve<T>>(
        &self,
        objective: &mut TenorObjective<'_, T, D>,
        f_zero: T,
    ) -> Result<(T, T), CalibrationError> {
        let direction = if f_zero < T::zero() {
            T::one()
        } else {
            -T::one()
        };
        let ceiling = self.config.max_hazard_rate;
        let mut bound = self.config.initial_upper_bound.min(ceiling);

        loop {
            let candidate = direction * bound;
            let f = objective.residual(candidate)?;
            if !f.is_finite() {
                return Err(CalibrationError::solver(
                    to_f64(objective.maturity),
                    SolverError::NumericalInstability(format!(
                        "non-finite residual at hazard rate {}",
                        to_f64(candidate)
                    )),
                ));
            }
            if (f < T::zero()) != (f_zero < T::zero()) || f == T::zero() {
                return Ok((candidate.min(T::zero()), candidate.max(T::zero())));
            }
            if bound >= ceiling {
                return Err(CalibrationError::bracket_not_found(
                    to_f64(objective.maturity),
                    to_f64(candidate.min(T::zero())),
                    to_f64(candidate.max(T::zero())),
                ));
            }
            bound = (bound * self.config.bracket_growth).min(ceiling);
        }
    }
}

/// Par-spread residual of one tenor as a function of its hazard rate.
struct TenorObjective<'a, T: Float, D: YieldCurve<T>> {
    curve: &'a HazardCurve<T>,
    discount: &'a D,
    terms: &'a ContractTerms<T>,
    config: &'a CalibrationConfig<T>,
    maturity: T,
    spread: T,
    evaluations: usize,
    last_residual: T,
    failure: Option<CalibrationError>,
}

impl<T: Float, D: YieldCurve<T>> TenorObjective<'_, T, D> {
    fn residual(&mut self, hazard_rate: T) -> Result<T, CalibrationError> {
        self.evaluations += 1;
        let trial = self.curve.extended(self.maturity, hazard_rate)?;
        let engine = ValuationEngine::new(self.discount, &trial, self.terms)?
            .with_quadrature(self.config.quadrature);
        let residual = engine.par_spread(self.maturity)? - self.spread;
        self.last_residual = residual;
        Ok(residual)
    }

    /// Residual for the root finder; the first error is kept and NaN returned.
    fn residual_or_nan(&mut self, hazard_rate: T) -> T {
        match self.residual(hazard_rate) {
            Ok(residual) => residual,
            Err(e) => {
                self.failure.get_or_insert(e);
                T::nan()
            }
        }
    }
}

fn validate_quotes<T: Float>(quotes: &[CdsQuote<T>]) -> Result<(), CalibrationError> {
    if quotes.is_empty() {
        return Err(CalibrationError::EmptyQuotes);
    }
    for (index, quote) in quotes.iter().enumerate() {
        if !(quote.maturity > T::zero()) || !quote.maturity.is_finite() || !quote.spread.is_finite()
        {
            return Err(CalibrationError::InvalidQuote {
                index,
                maturity: to_f64(quote.maturity),
                spread: to_f64(quote.spread),
            });
        }
    }
    for (index, pair) in quotes.windows(2).enumerate() {
        if !(pair[1].maturity > pair[0].maturity) {
            return Err(CalibrationError::non_increasing_maturity(
                index + 1,
                to_f64(pair[1].maturity),
                to_f64(pair[0].maturity),
            ));
        }
    }
    Ok(())
}

#[inline]
fn to_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}
