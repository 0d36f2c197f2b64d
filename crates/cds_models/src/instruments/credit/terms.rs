//! CDS contract terms and ISDA conventions.

use cds_core::types::ConfigError;
use num_traits::Float;

/// Calendar days per year used to measure model time.
pub const CALENDAR_DAYS_PER_YEAR: f64 = 365.0;

/// ISDA standard-model cash-flow conventions.
///
/// # Example
///
/// ```
/// use cds_models::instruments::credit::IsdaConventions;
///
/// let conventions: IsdaConventions<f64> = IsdaConventions::default();
/// assert_eq!(conventions.step_in_days, 1);
/// assert_eq!(conventions.cash_settle_days, 3);
/// assert!((conventions.settlement_lag() - 4.0 / 365.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsdaConventions<T: Float> {
    /// Days between valuation and protection start.
    pub step_in_days: u32,
    /// Days between valuation and cash settlement.
    pub cash_settle_days: u32,
    /// Day-count denominator (365 for ACT/365F, 360 for ACT/360).
    pub day_count_denominator: T,
    /// Whether the premium leg pays accrued coupon on default.
    pub accrual_on_default: bool,
}

impl<T: Float> Default for IsdaConventions<T> {
    /// Standard bundle: step-in 1 day, cash settle 3 days, ACT/365, accrual on default.
    fn default() -> Self {
        Self {
            step_in_days: 1,
            cash_settle_days: 3,
            day_count_denominator: T::from(CALENDAR_DAYS_PER_YEAR).unwrap(),
            accrual_on_default: true,
        }
    }
}

impl<T: Float> IsdaConventions<T> {
    /// Discounting offset Δ = (step_in_days + cash_settle_days) / day_count_denominator.
    #[inline]
    pub fn settlement_lag(&self) -> T {
        let step_in = T::from(self.step_in_days).unwrap();
        let cash_settle = T::from(self.cash_settle_days).unwrap();
        (step_in + cash_settle) / self.day_count_denominator
    }

    /// Accrual multiplier κ = 365 / day_count_denominator.
    ///
    /// Model time is in calendar years, so κ = 1 under ACT/365 and
    /// 365/360 under ACT/360.
    #[inline]
    pub fn accrual_scale(&self) -> T {
        T::from(CALENDAR_DAYS_PER_YEAR).unwrap() / self.day_count_denominator
    }

    /// Check that the day-count denominator is positive and finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = self.day_count_denominator;
        if !(d > T::zero()) || !d.is_finite() {
            return Err(ConfigError::InvalidDayCount {
                denominator: d.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }
}

/// Immutable contract terms shared by every valuation in a run.
///
/// # Example
///
/// ```
/// use cds_models::instruments::credit::{ContractTerms, IsdaConventions};
///
/// let terms = ContractTerms::new(0.4_f64, 4)
///     .with_notional(10_000_000.0)
///     .with_conventions(IsdaConventions {
///         accrual_on_default: false,
///         ..IsdaConventions::default()
///     });
///
/// assert!(terms.validate().is_ok());
/// assert!((terms.loss_given_default() - 0.6).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractTerms<T: Float> {
    /// Recovery rate R in [0, 1].
    pub recovery_rate: T,
    /// Coupons per year.
    pub coupon_frequency: u32,
    /// Notional used to scale reported PVs.
    pub notional: T,
    /// ISDA conventions.
    pub conventions: IsdaConventions<T>,
}

impl<T: Float> Default for ContractTerms<T> {
    /// 40% recovery, quarterly coupons, unit notional, standard conventions.
    fn default() -> Self {
        Self::new(T::from(0.4).unwrap(), 4)
    }
}

impl<T: Float> ContractTerms<T> {
    /// Create terms with unit notional and standard conventions.
    pub fn new(recovery_rate: T, coupon_frequency: u32) -> Self {
        Self {
            recovery_rate,
            coupon_frequency,
            notional: T::one(),
            conventions: IsdaConventions::default(),
        }
    }

    /// Set the notional.
    pub fn with_notional(mut self, notional: T) -> Self {
        self.notional = notional;
        self
    }

    /// Set the ISDA conventions.
    pub fn with_conventions(mut self, conventions: IsdaConventions<T>) -> Self {
        self.conventions = conventions;
        self
    }

    /// Loss given default, 1 - R.
    #[inline]
    pub fn loss_given_default(&self) -> T {
        T::one() - self.recovery_rate
    }

    /// Validate every field against its domain.
    ///
    /// # Errors
    ///
    /// * `InvalidRecoveryRate` - R outside [0, 1]
    /// * `InvalidFrequency` - zero coupon frequency
    /// * `InvalidNotional` - non-positive or non-finite notional
    /// * `InvalidDayCount` - non-positive or non-finite denominator
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = self.recovery_rate;
        if !(r >= T::zero() && r <= T::one()) {
            return Err(ConfigError::InvalidRecoveryRate {
                value: r.to_f64().unwrap_or(f64::NAN),
            });
        }
        if self.coupon_frequency == 0 {
            return Err(ConfigError::InvalidFrequency {
                frequency: self.coupon_frequency,
            });
        }
        if !(self.notional > T::zero()) || !self.notional.is_finite() {
            return Err(ConfigError::InvalidNotional {
                notional: self.notional.to_f64().unwrap_or(f64::NAN),
            });
        }
        self.conventions.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // IsdaConventions Tests
    // ========================================

    #[test]
    fn test_default_conventions() {
        let c: IsdaConventions<f64> = IsdaConventions::default();
        assert_eq!(c.day_count_denominator, 365.0);
        assert!(c.accrual_on_default);
        assert_eq!(c.accrual_scale(), 1.0);
    }

    #[test]
    fn test_act_360_scaling() {
        let c = IsdaConventions {
            day_count_denominator: 360.0_f64,
            ..IsdaConventions::default()
        };
        assert!((c.settlement_lag() - 4.0 / 360.0).abs() < 1e-15);
        assert!((c.accrual_scale() - 365.0 / 360.0).abs() < 1e-15);
    }

    #[test]
    fn test_lag_with_extreme_day_counts() {
        let c = IsdaConventions {
            step_in_days: u32::MAX,
            cash_settle_days: 3,
            ..IsdaConventions::<f64>::default()
        };
        let expected = (u32::MAX as f64 + 3.0) / 365.0;
        assert!((c.settlement_lag() - expected).abs() < 1e-6);
        assert!(c.settlement_lag() > 1e7);
    }

    #[test]
    fn test_zero_lag() {
        let c = IsdaConventions {
            step_in_days: 0,
            cash_settle_days: 0,
            ..IsdaConventions::<f64>::default()
        };
        assert_eq!(c.settlement_lag(), 0.0);
    }

    #[test]
    fn test_invalid_day_count() {
        let c = IsdaConventions {
            day_count_denominator: 0.0_f64,
            ..IsdaConventions::default()
        };
        assert_eq!(
            c.validate().unwrap_err(),
            ConfigError::InvalidDayCount { denominator: 0.0 }
        );
    }

    // ========================================
    // ContractTerms Tests
    // ========================================

    #[test]
    fn test_default_terms() {
        let terms: ContractTerms<f64> = ContractTerms::default();
        assert_eq!(terms.recovery_rate, 0.4);
        assert_eq!(terms.coupon_frequency, 4);
        assert_eq!(terms.notional, 1.0);
        assert!(terms.validate().is_ok());
    }

    #[test]
    fn test_recovery_bounds_are_inclusive() {
        assert!(ContractTerms::new(0.0_f64, 4).validate().is_ok());
        assert!(ContractTerms::new(1.0_f64, 4).validate().is_ok());
    }

    #[test]
    fn test_invalid_recovery() {
        for r in [-0.01_f64, 1.01, f64::NAN] {
            assert!(matches!(
                ContractTerms::new(r, 4).validate().unwrap_err(),
                ConfigError::InvalidRecoveryRate { .. }
            ));
        }
    }

    #[test]
    fn test_invalid_frequency() {
        assert_eq!(
            ContractTerms::new(0.4_f64, 0).validate().unwrap_err(),
            ConfigError::InvalidFrequency { frequency: 0 }
        );
    }

    #[test]
    fn test_invalid_notional() {
        let terms = ContractTerms::new(0.4_f64, 4).with_notional(-1.0);
        assert_eq!(
            terms.validate().unwrap_err(),
            ConfigError::InvalidNotional { notional: -1.0 }
        );
    }
}
