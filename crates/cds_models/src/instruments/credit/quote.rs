//! CDS market quotes.

use num_traits::Float;

/// Basis points per unit of spread.
pub const BASIS_POINTS: f64 = 10_000.0;

/// A par-spread quote for one maturity.
///
/// `spread` and `coupon` are decimals (120bp = 0.012). The optional running
/// coupon is used when reporting the upfront (net price) of a
/// standard-coupon contract; it defaults to the par spread.
///
/// # Example
///
/// ```
/// use cds_models::instruments::credit::CdsQuote;
///
/// let quote = CdsQuote::from_bps(5.0_f64, 170.0).with_coupon_bps(100.0);
/// assert!((quote.spread - 0.017).abs() < 1e-15);
/// assert!((quote.running_coupon() - 0.01).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CdsQuote<T: Float> {
    /// Maturity in years.
    pub maturity: T,
    /// Par spread as a decimal.
    pub spread: T,
    /// Running coupon as a decimal.
    pub coupon: Option<T>,
}

impl<T: Float> CdsQuote<T> {
    /// Create a quote with decimal spread.
    pub fn new(maturity: T, spread: T) -> Self {
        Self {
            maturity,
            spread,
            coupon: None,
        }
    }

    /// Create a quote with spread in basis points.
    pub fn from_bps(maturity: T, spread_bps: T) -> Self {
        Self::new(maturity, spread_bps / bps_scale())
    }

    /// Attach a decimal running coupon.
    pub fn with_coupon(mut self, coupon: T) -> Self {
        self.coupon = Some(coupon);
        self
    }

    /// Attach a running coupon in basis points.
    pub fn with_coupon_bps(self, coupon_bps: T) -> Self {
        self.with_coupon(coupon_bps / bps_scale())
    }

    /// Coupon paid on the premium leg: the explicit coupon or the par spread.
    #[inline]
    pub fn running_coupon(&self) -> T {
        self.coupon.unwrap_or(self.spread)
    }

    /// Par spread in basis points.
    #[inline]
    pub fn spread_bps(&self) -> T {
        self.spread * bps_scale()
    }
}

#[inline]
pub(crate) fn bps_scale<T: Float>() -> T {
    T::from(BASIS_POINTS).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_coupon() {
        let quote = CdsQuote::new(1.0_f64, 0.012);
        assert_eq!(quote.coupon, None);
        assert_eq!(quote.running_coupon(), 0.012);
    }

    #[test]
    fn test_bps_conversion() {
        let quote = CdsQuote::from_bps(3.0_f64, 145.0);
        assert!((quote.spread - 0.0145).abs() < 1e-15);
        assert!((quote.spread_bps() - 145.0).abs() < 1e-10);
    }

    #[test]
    fn test_explicit_coupon_overrides_spread() {
        let quote = CdsQuote::new(5.0_f64, 0.017).with_coupon(0.01);
        assert_eq!(quote.running_coupon(), 0.01);
    }
}
