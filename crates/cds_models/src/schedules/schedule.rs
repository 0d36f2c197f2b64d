//! Coupon schedule generation.

use super::CouponPeriod;
use crate::error::ValuationError;
use cds_core::types::ConfigError;
use num_traits::Float;

/// Dates closer than this to the maturity are merged into it.
const DATE_MERGE_TOLERANCE: f64 = 1e-9;

/// Longest maturity, in years, a schedule is generated for.
pub const MAX_MATURITY_YEARS: f64 = 1_000.0;

/// Regular coupon schedule from 0 to maturity.
///
/// Coupon dates fall on `i / frequency` for every `i` with
/// `i / frequency < T - 1e-9`, followed by `T` itself. When the maturity is
/// off the regular grid the final period is a short stub.
///
/// # Example
///
/// ```
/// use cds_models::schedules::CouponSchedule;
///
/// let schedule = CouponSchedule::generate(1.1_f64, 4, 1.0).unwrap();
/// let ends: Vec<f64> = schedule.payment_times().collect();
/// assert_eq!(ends.len(), 5);
/// assert!((ends[4] - 1.1).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CouponSchedule<T: Float> {
    periods: Vec<CouponPeriod<T>>,
}

impl<T: Float> CouponSchedule<T> {
    /// Generate the schedule for `maturity` at `frequency` coupons per year.
    ///
    /// # Arguments
    ///
    /// * `maturity` - Contract maturity in years (must be > 0)
    /// * `frequency` - Coupons per year (must be > 0)
    /// * `accrual_scale` - Multiplier turning period length into accrual fraction
    ///
    /// # Errors
    ///
    /// * `ValuationError::InvalidMaturity` - Non-positive or non-finite maturity,
    ///   or one beyond [`MAX_MATURITY_YEARS`]
    /// * `ValuationError::InvalidTerms` - Zero frequency
    pub fn generate(maturity: T, frequency: u32, accrual_scale: T) -> Result<Self, ValuationError> {
        if !(maturity > T::zero()) || !(maturity <= T::from(MAX_MATURITY_YEARS).unwrap()) {
            return Err(ValuationError::invalid_maturity(maturity));
        }
        if frequency == 0 {
            return Err(ConfigError::InvalidFrequency { frequency }.into());
        }

        let freq = T::from(frequency).unwrap();
        let cutoff = maturity - T::from(DATE_MERGE_TOLERANCE).unwrap();

        let mut periods = Vec::new();
        let mut start = T::zero();
        let mut i: u64 = 1;
        loop {
            let date = T::from(i).unwrap() / freq;
            if !(date < cutoff) {
                break;
            }
            periods.push(CouponPeriod::new(start, date, accrual_scale));
            start = date;
            i += 1;
        }
        periods.push(CouponPeriod::new(start, maturity, accrual_scale));

        Ok(Self { periods })
    }

    /// Accrual periods in time order.
    #[inline]
    pub fn periods(&self) -> &[CouponPeriod<T>] {
        &self.periods
    }

    /// Number of coupon periods.
    #[inline]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Always false: a generated schedule has at least one period.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Final payment time.
    #[inline]
    pub fn maturity(&self) -> T {
        self.periods[self.periods.len() - 1].end()
    }

    /// Coupon payment times Tᵢ.
    pub fn payment_times(&self) -> impl Iterator<Item = T> + '_ {
        self.periods.iter().map(|p| p.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_on_grid_maturity() {
        let schedule = CouponSchedule::generate(1.0_f64, 4, 1.0).unwrap();
        let ends: Vec<f64> = schedule.payment_times().collect();
        assert_eq!(ends, vec![0.25, 0.5, 0.75, 1.0]);
        assert_eq!(schedule.maturity(), 1.0);
        assert!(!schedule.is_empty());
    }

    #[test]
    fn test_accrual_fractions_sum_to_maturity() {
        let schedule = CouponSchedule::generate(5.0_f64, 4, 1.0).unwrap();
        assert_eq!(schedule.len(), 20);
        let total: f64 = schedule.periods().iter().map(|p| p.accrual_fraction()).sum();
        assert_relative_eq!(total, 5.0, max_relative = 1e-14);
    }

    #[test]
    fn test_short_stub() {
        let schedule = CouponSchedule::generate(0.6_f64, 2, 1.0).unwrap();
        let periods = schedule.periods();
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].end(), 0.5);
        assert_relative_eq!(periods[1].length(), 0.1, max_relative = 1e-12);
    }

    #[test]
    fn test_maturity_shorter_than_one_period() {
        let schedule = CouponSchedule::generate(0.1_f64, 4, 1.0).unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.periods()[0].start(), 0.0);
        assert_eq!(schedule.maturity(), 0.1);
    }

    #[test]
    fn test_nearly_on_grid_merges() {
        let schedule = CouponSchedule::generate(1.0_f64 + 1e-12, 4, 1.0).unwrap();
        assert_eq!(schedule.len(), 4);
    }

    #[test]
    fn test_accrual_scale_applied() {
        let schedule = CouponSchedule::generate(1.0_f64, 1, 365.0 / 360.0).unwrap();
        assert_relative_eq!(
            schedule.periods()[0].accrual_fraction(),
            365.0 / 360.0,
            max_relative = 1e-15
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(CouponSchedule::generate(0.0_f64, 4, 1.0)
            .unwrap_err()
            .is_invalid_maturity());
        assert!(CouponSchedule::generate(f64::NAN, 4, 1.0)
            .unwrap_err()
            .is_invalid_maturity());
        assert!(CouponSchedule::generate(1.0_f64, 0, 1.0)
            .unwrap_err()
            .is_invalid_terms());
    }

    #[test]
    fn test_maturity_cap() {
        let longest = CouponSchedule::generate(MAX_MATURITY_YEARS, 1, 1.0).unwrap();
        assert_eq!(longest.len(), 1_000);

        assert!(CouponSchedule::generate(1e15_f64, 4, 1.0)
            .unwrap_err()
            .is_invalid_maturity());
        assert!(CouponSchedule::generate(f64::INFINITY, 4, 1.0)
            .unwrap_err()
            .is_invalid_maturity());
    }
}
