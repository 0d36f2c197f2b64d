//! Scenario command implementation
//!
//! Recalibrates the configured strip under parallel and relative spread
//! shifts and reports how the hazard curve, a reference-tenor par spread
//! and the total net price respond.

use std::path::Path;

use cds_optimiser::calibration::{
    HazardBootstrapper, ScenarioAnalysis, SpreadScenarioEngine, SpreadShift,
    STANDARD_PARALLEL_BUMPS_BPS,
};
use tracing::info;

use super::{load_config, write_report};
use crate::config::RunConfig;
use crate::report::{OutputFormat, ScenarioReport};
use crate::{CliError, Result};

/// Run the scenario command
pub fn run(
    config_path: &Path,
    bumps_bps: &[f64],
    scales: &[f64],
    reference_maturity: f64,
    format: Option<OutputFormat>,
    output: Option<&str>,
) -> Result<()> {
    info!("Starting spread scenarios...");
    let config = load_config(config_path)?;
    let format = format.unwrap_or(config.output_format);

    let shifts = shifts(bumps_bps, scales)?;
    info!("  Scenarios: {}", shifts.len());
    info!("  Reference tenor: {}y", reference_maturity);

    let analysis = analyse(&config, &shifts, reference_maturity)?;
    write_report(&ScenarioReport::from(&analysis), format, output)?;
    info!("Scenarios complete");
    Ok(())
}

/// Shifts requested on the command line; the standard parallel ladder when none are.
fn shifts(bumps_bps: &[f64], scales: &[f64]) -> Result<Vec<SpreadShift<f64>>> {
    if let Some(bad) = bumps_bps.iter().find(|b| !b.is_finite()) {
        return Err(CliError::InvalidArgument(format!("bump must be finite, got {}", bad)));
    }
    if let Some(bad) = scales.iter().find(|s| !(**s >= 0.0 && s.is_finite())) {
        return Err(CliError::InvalidArgument(format!(
            "scale must be non-negative and finite, got {}",
            bad
        )));
    }
    if bumps_bps.is_empty() && scales.is_empty() {
        return Ok(SpreadShift::parallel_ladder(&STANDARD_PARALLEL_BUMPS_BPS));
    }
    Ok(bumps_bps
        .iter()
        .map(|&bps| SpreadShift::Parallel(bps))
        .chain(scales.iter().map(|&factor| SpreadShift::Relative(factor)))
        .collect())
}

/// Run every shift against the configured market.
pub(crate) fn analyse(
    config: &RunConfig,
    shifts: &[SpreadShift<f64>],
    reference_maturity: f64,
) -> Result<ScenarioAnalysis<f64>> {
    let discount = config.discount_curve()?;
    let terms = config.terms();
    let bootstrapper = HazardBootstrapper::new(config.calibration_config());
    let engine = SpreadScenarioEngine::new(&bootstrapper, &discount, &terms);
    Ok(engine.run(&config.quotes(), shifts, reference_maturity)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CONFIG: &str = r#"
[[quotes]]
maturity = 1.0
spread_bps = 120.0

[[quotes]]
maturity = 3.0
spread_bps = 145.0

[[quotes]]
maturity = 5.0
spread_bps = 170.0
"#;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_shifts_are_standard_ladder() {
        let shifts = shifts(&[], &[]).unwrap();
        assert_eq!(shifts.len(), STANDARD_PARALLEL_BUMPS_BPS.len());
        assert_eq!(shifts[3], SpreadShift::Parallel(0.0));
    }

    #[test]
    fn test_explicit_shifts() {
        let shifts = shifts(&[25.0], &[0.5]).unwrap();
        assert_eq!(
            shifts,
            vec![SpreadShift::Parallel(25.0), SpreadShift::Relative(0.5)]
        );
        assert!(matches!(
            super::shifts(&[f64::NAN], &[]),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            super::shifts(&[], &[-1.0]),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_analyse_ladder() {
        let file = write_config(CONFIG);
        let config = RunConfig::load(file.path()).unwrap();
        let shifts = SpreadShift::parallel_ladder(&STANDARD_PARALLEL_BUMPS_BPS);
        let analysis = analyse(&config, &shifts, 5.0).unwrap();

        let zero = &analysis.scenarios[3];
        assert_eq!(zero.result.curve, analysis.base.result.curve);
        let rows = analysis.sensitivities();
        assert!((rows[6].reference_par_change_bps - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_run_writes_json() {
        let file = write_config(CONFIG);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("scenarios.json");

        run(file.path(), &[10.0], &[], 3.0, Some(OutputFormat::Json), out.to_str()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value["reference_maturity"], 3.0);
        assert_eq!(value["rows"][0]["scenario"], "+10bp");
    }
}
