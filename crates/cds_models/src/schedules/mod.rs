//! Coupon schedules in year-fraction time.
//!
//! - [`CouponPeriod`]: One accrual period with its accrual fraction
//! - [`CouponSchedule`]: Regular schedule from 0 to maturity with a short final stub

mod period;
mod schedule;

pub use period::CouponPeriod;
pub use schedule::{CouponSchedule, MAX_MATURITY_YEARS};
