//! Fixed-grid numerical integration.
//!
//! Composite Simpson's rule on a uniform grid whose step count depends only
//! on the interval length. The protection and accrual-on-default legs share
//! one [`FixedGridQuadrature`].
//!
//! ```text
//! n = max(min_steps, ⌈(b - a) · steps_per_year⌉), rounded up to even
//! ∫ₐᵇ f ≈ h/3 · [f₀ + 4f₁ + 2f₂ + … + 4fₙ₋₁ + fₙ]
//! ```

use num_traits::Float;

/// Minimum number of Simpson steps per integration interval.
pub const MIN_QUADRATURE_STEPS: usize = 32;

/// Default grid density in steps per year.
pub const DEFAULT_STEPS_PER_YEAR: usize = 128;

/// Composite Simpson integrator on a fixed uniform grid.
///
/// # Example
///
/// ```
/// use cds_core::math::quadrature::FixedGridQuadrature;
///
/// let quad = FixedGridQuadrature::default();
/// let integral: Result<f64, ()> = quad.integrate(|x: f64| Ok(x.exp()), 0.0, 1.0);
/// assert!((integral.unwrap() - (1.0_f64.exp() - 1.0)).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedGridQuadrature {
    min_steps: usize,
    steps_per_year: usize,
}

impl Default for FixedGridQuadrature {
    fn default() -> Self {
        Self {
            min_steps: MIN_QUADRATURE_STEPS,
            steps_per_year: DEFAULT_STEPS_PER_YEAR,
        }
    }
}

impl FixedGridQuadrature {
    /// Create an integrator with custom grid density.
    ///
    /// `min_steps` is raised to the next even number and to at least 2.
    pub fn new(min_steps: usize, steps_per_year: usize) -> Self {
        Self {
            min_steps: round_up_even(min_steps.max(2)),
            steps_per_year,
        }
    }

    /// Minimum step count.
    #[inline]
    pub fn min_steps(&self) -> usize {
        self.min_steps
    }

    /// Grid density in steps per year.
    #[inline]
    pub fn steps_per_year(&self) -> usize {
        self.steps_per_year
    }

    /// Number of Simpson steps used for an interval of `length` years.
    pub fn steps_for<T: Float>(&self, length: T) -> usize {
        let scaled = (length.abs() * T::from(self.steps_per_year).unwrap())
            .ceil()
            .to_usize()
            .unwrap_or(self.min_steps);
        round_up_even(scaled.max(self.min_steps))
    }

    /// Integrate a fallible integrand over `[a, b]`.
    ///
    /// Returns zero for an empty or reversed interval. The first integrand
    /// error aborts the integration.
    pub fn integrate<T, E, F>(&self, mut f: F, a: T, b: T) -> Result<T, E>
    where
        T: Float,
        F: FnMut(T) -> Result<T, E>,
    {
        if !(b > a) {
            return Ok(T::zero());
        }

        let n = self.steps_for(b - a);
        let h = (b - a) / T::from(n).unwrap();
        let two = T::from(2.0).unwrap();
        let four = T::from(4.0).unwrap();

        let mut sum = f(a)? + f(b)?;
        for i in 1..n {
            let x = a + h * T::from(i).unwrap();
            let weight = if i % 2 == 1 { four } else { two };
            sum = sum + weight * f(x)?;
        }

        Ok(sum * h / T::from(3.0).unwrap())
    }

    /// Integrate over `[a, b]` split at `breakpoints`.
    ///
    /// Breakpoints must be sorted; those outside `(a, b)` are ignored.
    /// `make_integrand` receives the bounds of each sub-interval and returns
    /// the integrand for it.
    pub fn integrate_piecewise<T, E, F, G>(
        &self,
        mut make_integrand: F,
        a: T,
        b: T,
        breakpoints: &[T],
    ) -> Result<T, E>
    where
        T: Float,
        F: FnMut(T, T) -> Result<G, E>,
        G: FnMut(T) -> Result<T, E>,
    {
        let mut total = T::zero();
        let mut left = a;
        for &knot in breakpoints.iter().filter(|&&k| k > a && k < b) {
            if knot > left {
                total = total + self.integrate(make_integrand(left, knot)?, left, knot)?;
                left = knot;
            }
        }
        total = total + self.integrate(make_integrand(left, b)?, left, b)?;
        Ok(total)
    }
}

#[inline]
fn round_up_even(n: usize) -> usize {
    n + (n % 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    type Never = std::convert::Infallible;

    // ========================================
    // Grid Tests
    // ========================================

    #[test]
    fn test_default_grid() {
        let quad = FixedGridQuadrature::default();
        assert_eq!(quad.min_steps(), MIN_QUADRATURE_STEPS);
        assert_eq!(quad.steps_per_year(), DEFAULT_STEPS_PER_YEAR);
    }

    #[test]
    fn test_steps_respect_minimum() {
        let quad = FixedGridQuadrature::default();
        assert_eq!(quad.steps_for(0.01_f64), 32);
        assert_eq!(quad.steps_for(0.25_f64), 32);
        assert_eq!(quad.steps_for(1.0_f64), 128);
    }

    #[test]
    fn test_steps_are_even() {
        let quad = FixedGridQuadrature::new(3, 5);
        assert_eq!(quad.min_steps(), 4);
        assert_eq!(quad.steps_for(1.1_f64), 6);
        assert_eq!(quad.steps_for(1.0_f64) % 2, 0);
    }

    // ========================================
    // Integration Tests
    // ========================================

    #[test]
    fn test_simpson_exact_for_cubic() {
        let quad = FixedGridQuadrature::new(2, 0);
        let result = quad
            .integrate(|x: f64| Ok::<_, Never>(x * x * x - 2.0 * x), 0.0, 2.0)
            .unwrap();
        assert_relative_eq!(result, 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_exponential_integral() {
        let quad = FixedGridQuadrature::default();
        let result = quad
            .integrate(|x: f64| Ok::<_, Never>((-0.05 * x).exp()), 0.0, 5.0)
            .unwrap();
        let exact = (1.0 - (-0.25_f64).exp()) / 0.05;
        assert_relative_eq!(result, exact, max_relative = 1e-12);
    }

    #[test]
    fn test_empty_interval_is_zero() {
        let quad = FixedGridQuadrature::default();
        let result = quad.integrate(|_: f64| Ok::<_, Never>(1.0), 1.0, 1.0).unwrap();
        assert_eq!(result, 0.0);
    }

    #[test]
    fn test_integrand_error_propagates() {
        let quad = FixedGridQuadrature::default();
        let result = quad.integrate(
            |x: f64| if x > 0.5 { Err("boom") } else { Ok(x) },
            0.0,
            1.0,
        );
        assert_eq!(result.unwrap_err(), "boom");
    }

    #[test]
    fn test_piecewise_step_function_is_exact() {
        // f = 1 on [0, 1], 3 on (1, 2]
        let quad = FixedGridQuadrature::default();
        let result = quad
            .integrate_piecewise(
                |left: f64, _right: f64| {
                    let level = if left < 1.0 { 1.0 } else { 3.0 };
                    Ok::<_, Never>(move |_: f64| Ok(level))
                },
                0.0,
                2.0,
                &[-1.0, 1.0, 5.0],
            )
            .unwrap();
        assert_relative_eq!(result, 4.0, max_relative = 1e-14);
    }
}
