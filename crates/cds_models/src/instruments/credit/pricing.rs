//! CDS leg valuation.
//!
//! # Pricing Model
//!
//! With Δ the settlement lag, κ the accrual scale and Tᵢ the coupon dates:
//!
//! ## Premium Leg
//!
//! ```text
//! PV_coupon = s × Σᵢ αᵢ × D(Tᵢ + Δ) × Q(Tᵢ)
//! PV_AoD    = s × Σᵢ ∫[Tᵢ₋₁, Tᵢ] κ(t - Tᵢ₋₁) × D(t + Δ) × λ(t) × Q(t) dt
//! ```
//!
//! ## Protection Leg
//!
//! ```text
//! PV_protection = (1 - R) × ∫[0, T] D(t + Δ) × λ(t) × Q(t) dt
//! ```
//!
//! ## Par Spread
//!
//! ```text
//! s_par = PV_protection / (PV01 + PV_AoD(s = 1))
//! ```
//!
//! Both integrals use the same [`FixedGridQuadrature`], split at the credit
//! curve's hazard knots so that λ is constant on every piece.
//!
//! # Example
//!
//! ```
//! use cds_core::market_data::curves::{DiscountCurve, FlatHazardRateCurve};
//! use cds_models::instruments::credit::{ContractTerms, ValuationEngine};
//!
//! let discount = DiscountCurve::flat(0.03_f64).unwrap();
//! let credit = FlatHazardRateCurve::new(0.01);
//! let terms = ContractTerms::new(0.4, 4);
//!
//! let engine = ValuationEngine::new(&discount, &credit, &terms).unwrap();
//! let valuation = engine.value(5.0, 0.01).unwrap();
//! assert!(valuation.protection_pv > 0.0);
//! assert!((valuation.net_price - (valuation.protection_pv - valuation.premium_pv)).abs() < 1e-15);
//! ```

use super::results::{CdsValuation, PremiumLegBreakdown};
use super::terms::ContractTerms;
use super::CdsQuote;
use crate::error::ValuationError;
use crate::schedules::{CouponPeriod, CouponSchedule};
use cds_core::market_data::curves::{CreditCurve, YieldCurve};
use cds_core::market_data::CurveError;
use cds_core::math::quadrature::FixedGridQuadrature;
use num_traits::Float;

/// CDS valuation engine.
///
/// Borrows the discount curve, credit curve and contract terms; every
/// method is a pure function of them.
pub struct ValuationEngine<'a, T: Float, D: YieldCurve<T>, C: CreditCurve<T>> {
    discount_curve: &'a D,
    credit_curve: &'a C,
    terms: &'a ContractTerms<T>,
    quadrature: FixedGridQuadrature,
}

impl<'a, T: Float, D: YieldCurve<T>, C: CreditCurve<T>> ValuationEngine<'a, T, D, C> {
    /// Create an engine after validating `terms`.
    ///
    /// # Errors
    ///
    /// `ValuationError::InvalidTerms` if recovery, frequency, notional or
    /// day count are outside their domain.
    pub fn new(
        discount_curve: &'a D,
        credit_curve: &'a C,
        terms: &'a ContractTerms<T>,
    ) -> Result<Self, ValuationError> {
        terms.validate()?;
        Ok(Self {
            discount_curve,
            credit_curve,
            terms,
            quadrature: FixedGridQuadrature::default(),
        })
    }

    /// Replace the integration grid.
    pub fn with_quadrature(mut self, quadrature: FixedGridQuadrature) -> Self {
        self.quadrature = quadrature;
        self
    }

    /// Contract terms.
    #[inline]
    pub fn terms(&self) -> &ContractTerms<T> {
        self.terms
    }

    /// Coupon schedule for `maturity`.
    pub fn schedule(&self, maturity: T) -> Result<CouponSchedule<T>, ValuationError> {
        CouponSchedule::generate(
            maturity,
            self.terms.coupon_frequency,
            self.terms.conventions.accrual_scale(),
        )
    }

    /// Coupon annuity at unit spread, Σᵢ αᵢ D(Tᵢ + Δ) Q(Tᵢ).
    pub fn pv01(&self, maturity: T) -> Result<T, ValuationError> {
        let schedule = self.schedule(maturity)?;
        Ok(self.coupon_annuity(&schedule)?)
    }

    /// Accrual-on-default PV at unit spread (zero when disabled).
    pub fn accrual_on_default_annuity(&self, maturity: T) -> Result<T, ValuationError> {
        let schedule = self.schedule(maturity)?;
        Ok(self.accrual_annuity(&schedule)?)
    }

    /// Risky annuity, PV01 plus accrual on default at unit spread.
    pub fn risky_annuity(&self, maturity: T) -> Result<T, ValuationError> {
        let schedule = self.schedule(maturity)?;
        Ok(self.coupon_annuity(&schedule)? + self.accrual_annuity(&schedule)?)
    }

    /// Premium leg PV at `spread`, split into coupon and accrual components.
    pub fn premium_leg(
        &self,
        maturity: T,
        spread: T,
    ) -> Result<PremiumLegBreakdown<T>, ValuationError> {
        let schedule = self.schedule(maturity)?;
        Ok(PremiumLegBreakdown {
            coupon_pv: spread * self.coupon_annuity(&schedule)?,
            accrual_on_default_pv: spread * self.accrual_annuity(&schedule)?,
        })
    }

    /// Protection leg PV.
    pub fn protection_leg(&self, maturity: T) -> Result<T, ValuationError> {
        let schedule = self.schedule(maturity)?;
        Ok(self.protection(&schedule)?)
    }

    /// Par spread, protection PV over risky annuity.
    ///
    /// # Errors
    ///
    /// `ValuationError::DegenerateAnnuity` if the risky annuity is not
    /// strictly positive and finite.
    pub fn par_spread(&self, maturity: T) -> Result<T, ValuationError> {
        let schedule = self.schedule(maturity)?;
        let annuity = self.coupon_annuity(&schedule)? + self.accrual_annuity(&schedule)?;
        check_annuity(maturity, annuity)?;
        Ok(self.protection(&schedule)? / annuity)
    }

    /// Full valuation with the premium leg paying `coupon`.
    pub fn value(&self, maturity: T, coupon: T) -> Result<CdsValuation<T>, ValuationError> {
        let schedule = self.schedule(maturity)?;
        let pv01 = self.coupon_annuity(&schedule)?;
        let accrual = self.accrual_annuity(&schedule)?;
        let protection_pv = self.protection(&schedule)?;

        let annuity = pv01 + accrual;
        check_annuity(maturity, annuity)?;

        let coupon_pv = coupon * pv01;
        let accrual_on_default_pv = coupon * accrual;
        let premium_pv = coupon_pv + accrual_on_default_pv;

        Ok(CdsValuation {
            maturity,
            coupon,
            premium_pv,
            coupon_pv,
            accrual_on_default_pv,
            pv01,
            protection_pv,
            net_price: protection_pv - premium_pv,
            par_spread: protection_pv / annuity,
        })
    }

    /// Value a quote at its running coupon.
    pub fn value_quote(&self, quote: &CdsQuote<T>) -> Result<CdsValuation<T>, ValuationError> {
        self.value(quote.maturity, quote.running_coupon())
    }

    fn coupon_annuity(&self, schedule: &CouponSchedule<T>) -> Result<T, CurveError> {
        let lag = self.terms.conventions.settlement_lag();
        schedule.periods().iter().try_fold(T::zero(), |acc, period| {
            let t = period.end();
            let df = self.discount_curve.discount_factor(t + lag)?;
            let q = self.credit_curve.survival_probability(t)?;
            Ok(acc + period.accrual_fraction() * df * q)
        })
    }

    fn accrual_annuity(&self, schedule: &CouponSchedule<T>) -> Result<T, CurveError> {
        if !self.terms.conventions.accrual_on_default {
            return Ok(T::zero());
        }
        let kappa = self.terms.conventions.accrual_scale();
        schedule.periods().iter().try_fold(T::zero(), |acc, period| {
            let start = period.start();
            let accrued = |t: T| kappa * (t - start);
            Ok(acc + self.default_weighted_integral(period, accrued)?)
        })
    }

    fn protection(&self, schedule: &CouponSchedule<T>) -> Result<T, CurveError> {
        let integral = schedule.periods().iter().try_fold(T::zero(), |acc, period| {
            Ok::<_, CurveError>(acc + self.default_weighted_integral(period, |_| T::one())?)
        })?;
        Ok(self.terms.loss_given_default() * integral)
    }

    /// ∫ w(t) D(t + Δ) λ(t) Q(t) dt over one coupon period.
    fn default_weighted_integral<W>(
        &self,
        period: &CouponPeriod<T>,
        weight: W,
    ) -> Result<T, CurveError>
    where
        W: Fn(T) -> T,
    {
        let lag = self.terms.conventions.settlement_lag();
        let two = T::from(2.0).unwrap();
        let (start, end) = (period.start(), period.end());
        let knots = self.credit_curve.hazard_knots(start, end);
        let weight = &weight;

        self.quadrature.integrate_piecewise(
            |left: T, right: T| -> Result<_, CurveError> {
                let lambda = self.credit_curve.hazard_rate((left + right) / two)?;
                Ok(move |t: T| -> Result<T, CurveError> {
                    let df = self.discount_curve.discount_factor(t + lag)?;
                    let q = self.credit_curve.survival_probability(t)?;
                    Ok(weight(t) * df * lambda * q)
                })
            },
            start,
            end,
            &knots,
        )
    }
}

fn check_annuity<T: Float>(maturity: T, annuity: T) -> Result<(), ValuationError> {
    if !(annuity > T::zero()) || !annuity.is_finite() {
        return Err(ValuationError::DegenerateAnnuity {
            maturity: maturity.to_f64().unwrap_or(f64::NAN),
            annuity: annuity.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}
