//! Valuation result types.

use super::quote::bps_scale;
use num_traits::Float;

/// Premium leg split into its two components.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PremiumLegBreakdown<T: Float> {
    /// Scheduled coupon payments.
    pub coupon_pv: T,
    /// Accrued coupon paid on default.
    pub accrual_on_default_pv: T,
}

impl<T: Float> PremiumLegBreakdown<T> {
    /// Total premium leg PV.
    #[inline]
    pub fn total(&self) -> T {
        self.coupon_pv + self.accrual_on_default_pv
    }
}

/// Full valuation of one contract, per unit notional unless scaled.
///
/// `net_price` is seen from the protection buyer: protection minus premium.
///
/// # Example
///
/// ```
/// use cds_models::instruments::credit::CdsValuation;
///
/// let valuation = CdsValuation {
///     maturity: 1.0_f64,
///     coupon: 0.012,
///     premium_pv: 0.0118,
///     coupon_pv: 0.0117,
///     accrual_on_default_pv: 0.0001,
///     pv01: 0.975,
///     protection_pv: 0.0118,
///     net_price: 0.0,
///     par_spread: 0.012,
/// };
/// let scaled = valuation.scaled(1_000_000.0);
/// assert!((scaled.premium_pv - 11_800.0).abs() < 1e-6);
/// assert_eq!(scaled.par_spread, 0.012);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CdsValuation<T: Float> {
    /// Contract maturity in years.
    pub maturity: T,
    /// Running coupon the premium leg was valued at.
    pub coupon: T,
    /// Premium leg PV (coupon + accrual on default).
    pub premium_pv: T,
    /// Coupon component of the premium leg.
    pub coupon_pv: T,
    /// Accrual-on-default component of the premium leg.
    pub accrual_on_default_pv: T,
    /// Coupon annuity at unit spread.
    pub pv01: T,
    /// Protection leg PV.
    pub protection_pv: T,
    /// Protection minus premium.
    pub net_price: T,
    /// Spread equating both legs.
    pub par_spread: T,
}

impl<T: Float> CdsValuation<T> {
    /// Premium leg components.
    #[inline]
    pub fn premium_breakdown(&self) -> PremiumLegBreakdown<T> {
        PremiumLegBreakdown {
            coupon_pv: self.coupon_pv,
            accrual_on_default_pv: self.accrual_on_default_pv,
        }
    }

    /// PV01 per basis point of spread.
    #[inline]
    pub fn pv01_per_bp(&self) -> T {
        self.pv01 / bps_scale()
    }

    /// Copy with every PV field multiplied by `notional`.
    ///
    /// Maturity, coupon and par spread are unchanged.
    pub fn scaled(&self, notional: T) -> Self {
        Self {
            premium_pv: self.premium_pv * notional,
            coupon_pv: self.coupon_pv * notional,
            accrual_on_default_pv: self.accrual_on_default_pv * notional,
            pv01: self.pv01 * notional,
            protection_pv: self.protection_pv * notional,
            net_price: self.net_price * notional,
            ..*self
        }
    }
}
