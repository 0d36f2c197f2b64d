//! Benchmarks for cds_optimiser.

use cds_core::market_data::curves::{CurveInterpolation, DiscountCurve, HazardCurve};
use cds_models::instruments::credit::{CdsQuote, ContractTerms, ValuationEngine};
use cds_optimiser::calibration::{
    CalibrationConfig, HazardBootstrapper, SolverKind, SpreadScenarioEngine, SpreadShift,
    STANDARD_PARALLEL_BUMPS_BPS,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Generate an upward-sloping quote strip.
fn generate_quotes(count: usize) -> Vec<CdsQuote<f64>> {
    (1..=count)
        .map(|i| {
            let maturity = i as f64; // 1Y, 2Y, 3Y, ...
            let spread_bps = 100.0 + (i as f64) * 10.0;
            CdsQuote::from_bps(maturity, spread_bps)
        })
        .collect()
}

fn benchmark_par_spread(c: &mut Criterion) {
    let discount = DiscountCurve::flat(0.015).unwrap();
    let hazard =
        HazardCurve::from_pillars(&[1.0, 3.0, 5.0, 7.0], &[0.02, 0.025, 0.03, 0.04]).unwrap();
    let terms = ContractTerms::default();
    let engine = ValuationEngine::new(&discount, &hazard, &terms).unwrap();

    c.bench_function("par_spread_7y", |b| {
        b.iter(|| engine.par_spread(black_box(7.0)))
    });
}

fn benchmark_calibrate_strip(c: &mut Criterion) {
    let mut group = c.benchmark_group("calibrate_strip");
    let discount = DiscountCurve::flat(0.015).unwrap();
    let terms = ContractTerms::default();
    let bootstrapper = HazardBootstrapper::<f64>::with_defaults();

    for size in [1, 5, 10] {
        let quotes = generate_quotes(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &quotes, |b, q| {
            b.iter(|| bootstrapper.calibrate(black_box(q), &discount, &terms))
        });
    }

    group.finish();
}

fn benchmark_solver_kinds(c: &mut Criterion) {
    let mut group = c.benchmark_group("calibrate_solver");
    let discount = DiscountCurve::pillars(
        &[0.5, 1.0, 5.0, 10.0],
        &[0.012, 0.014, 0.018, 0.021],
        CurveInterpolation::LogLinear,
    )
    .unwrap();
    let terms = ContractTerms::default();
    let quotes = generate_quotes(5);

    for kind in [SolverKind::Brent, SolverKind::Bisection] {
        let bootstrapper =
            HazardBootstrapper::new(CalibrationConfig::builder().solver(kind).build());
        group.bench_with_input(BenchmarkId::from_parameter(kind), &quotes, |b, q| {
            b.iter(|| bootstrapper.calibrate(black_box(q), &discount, &terms))
        });
    }

    group.finish();
}

fn benchmark_spread_ladder(c: &mut Criterion) {
    let discount = DiscountCurve::flat(0.015).unwrap();
    let terms = ContractTerms::default();
    let bootstrapper = HazardBootstrapper::<f64>::with_defaults();
    let engine = SpreadScenarioEngine::new(&bootstrapper, &discount, &terms);
    let quotes = generate_quotes(5);
    let shifts = SpreadShift::parallel_ladder(&STANDARD_PARALLEL_BUMPS_BPS);

    c.bench_function("spread_ladder_5y", |b| {
        b.iter(|| engine.run(black_box(&quotes), &shifts, 5.0))
    });
}

criterion_group!(
    benches,
    benchmark_par_spread,
    benchmark_calibrate_strip,
    benchmark_solver_kinds,
    benchmark_spread_ladder,
);
criterion_main!(benches);
