//! Integration tests for module exports.
//!
//! Verify that public types are reachable via absolute paths and compose
//! across modules.

use approx::assert_relative_eq;

/// Curves are re-exported at `market_data` level.
#[test]
fn test_market_data_exports() {
    use cds_core::market_data::{
        CreditCurve, CurveError, CurveInterpolation, DiscountCurve, HazardCurve, YieldCurve,
    };

    let discount = DiscountCurve::pillars(
        &[0.5_f64, 2.0, 10.0],
        &[0.01, 0.015, 0.02],
        CurveInterpolation::Linear,
    )
    .unwrap();
    assert_eq!(discount.discount_factor(0.0).unwrap(), 1.0);

    let hazard = HazardCurve::from_pillars(&[1.0_f64, 5.0], &[0.01, 0.02]).unwrap();
    assert_relative_eq!(
        hazard.survival_probability(5.0).unwrap(),
        (-0.09_f64).exp(),
        max_relative = 1e-15
    );

    let err: CurveError = hazard.extended(5.0, 0.03).unwrap_err();
    assert!(err.is_non_increasing_boundary());
}

/// Solvers, quadrature and errors are reachable from `math` and `types`.
#[test]
fn test_math_exports() {
    use cds_core::math::quadrature::{FixedGridQuadrature, MIN_QUADRATURE_STEPS};
    use cds_core::math::solvers::{BisectionSolver, BracketedRootFinder, SolverConfig};
    use cds_core::types::SolverError;

    let quad = FixedGridQuadrature::default();
    assert!(quad.steps_for(0.0_f64) >= MIN_QUADRATURE_STEPS);

    // Invert ∫₀ˣ e^{-s} ds = 0.5 through the quadrature
    let solver = BisectionSolver::new(SolverConfig::new(1e-12, 100));
    let x = solver
        .find_root(
            |x: f64| {
                quad.integrate(|s: f64| Ok::<_, SolverError>((-s).exp()), 0.0, x)
                    .unwrap_or(f64::NAN)
                    - 0.5
            },
            0.0,
            2.0,
        )
        .unwrap();
    assert_relative_eq!(x, 2.0_f64.ln(), max_relative = 1e-9);
}

/// `ConfigError` wraps curve construction failures.
#[test]
fn test_config_error_exports() {
    use cds_core::market_data::{CurveInterpolation, DiscountCurve};
    use cds_core::types::ConfigError;

    let err = DiscountCurve::<f64>::pillars(&[], &[], CurveInterpolation::LogLinear).unwrap_err();
    assert!(matches!(err, ConfigError::MalformedCurve(_)));
}
