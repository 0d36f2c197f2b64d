//! Price command implementation
//!
//! Values the configured quotes on a hazard curve given on the command line
//! or in the configuration, without calibrating.

use std::path::Path;

use cds_core::market_data::curves::HazardCurve;
use cds_models::instruments::credit::{ValuationEngine, BASIS_POINTS};
use cds_optimiser::calibration::ParReconciliation;
use tracing::info;

use super::{load_config, write_report};
use crate::config::RunConfig;
use crate::report::{InputSummary, OutputFormat, Report};
use crate::{CliError, Result};

/// Run the price command
pub fn run(
    config_path: &Path,
    hazard: &[String],
    format: Option<OutputFormat>,
    output: Option<&str>,
) -> Result<()> {
    info!("Starting pricing...");
    let config = load_config(config_path)?;
    let format = format.unwrap_or(config.output_format);

    let curve = match parse_hazard_pillars(hazard)? {
        Some(curve) => curve,
        None => config.hazard_curve()?.ok_or_else(|| {
            CliError::InvalidArgument(
                "no hazard curve: pass --hazard END:RATE or set hazard_curve in the config"
                    .to_string(),
            )
        })?,
    };
    info!("  Hazard segments: {}", curve.len());

    let report = price(&config, &curve)?;
    write_report(&report, format, output)?;
    info!("Pricing complete");
    Ok(())
}

/// Value every configured quote on `curve`.
pub(crate) fn price(config: &RunConfig, curve: &HazardCurve<f64>) -> Result<Report> {
    let discount = config.discount_curve()?;
    let terms = config.terms();
    let engine = ValuationEngine::new(&discount, curve, &terms)?
        .with_quadrature(config.calibration_config().quadrature);

    let quotes = config.quotes();
    let valuations = quotes
        .iter()
        .map(|q| engine.value_quote(q))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let reconciliation = quotes
        .iter()
        .zip(&valuations)
        .map(|(quote, valuation)| {
            let market_bps = quote.spread_bps();
            let model_bps = valuation.par_spread * BASIS_POINTS;
            ParReconciliation {
                maturity: quote.maturity,
                market_bps,
                model_bps,
                error_bps: model_bps - market_bps,
            }
        })
        .collect();

    Ok(Report::new(
        InputSummary::from(config),
        curve,
        &valuations,
        reconciliation,
    )?)
}

/// Parse `END:RATE` arguments into a hazard curve; `None` when empty.
fn parse_hazard_pillars(args: &[String]) -> Result<Option<HazardCurve<f64>>> {
    if args.is_empty() {
        return Ok(None);
    }
    let (times, rates): (Vec<f64>, Vec<f64>) = args
        .iter()
        .map(|arg| parse_pillar(arg))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .unzip();
    Ok(Some(HazardCurve::from_pillars(&times, &rates)?))
}

fn parse_pillar(arg: &str) -> Result<(f64, f64)> {
    let invalid = || CliError::InvalidArgument(format!("expected END:RATE, got '{}'", arg));
    let (end, rate) = arg.split_once(':').ok_or_else(invalid)?;
    let end = end.trim().parse::<f64>().map_err(|_| invalid())?;
    let rate = rate.trim().parse::<f64>().map_err(|_| invalid())?;
    Ok((end, rate))
}
