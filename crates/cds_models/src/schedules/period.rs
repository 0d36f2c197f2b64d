//! Coupon period definition.

use num_traits::Float;
use std::fmt;

/// One accrual period `[start, end]` in year-fraction time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CouponPeriod<T: Float> {
    start: T,
    end: T,
    accrual_fraction: T,
}

impl<T: Float> CouponPeriod<T> {
    /// Create a period whose accrual fraction is `accrual_scale · (end - start)`.
    #[inline]
    pub fn new(start: T, end: T, accrual_scale: T) -> Self {
        Self {
            start,
            end,
            accrual_fraction: accrual_scale * (end - start),
        }
    }

    /// Period start.
    #[inline]
    pub fn start(&self) -> T {
        self.start
    }

    /// Period end, also the coupon payment time.
    #[inline]
    pub fn end(&self) -> T {
        self.end
    }

    /// Accrual fraction αᵢ.
    #[inline]
    pub fn accrual_fraction(&self) -> T {
        self.accrual_fraction
    }

    /// Length of the period in years.
    #[inline]
    pub fn length(&self) -> T {
        self.end - self.start
    }

    /// Returns true if `t` lies in `[start, end)`.
    #[inline]
    pub fn contains(&self, t: T) -> bool {
        t >= self.start && t < self.end
    }
}

impl<T: Float + fmt::Display> fmt::Display for CouponPeriod<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Period({} to {}, accrual {})",
            self.start, self.end, self.accrual_fraction
        )
    }
}
