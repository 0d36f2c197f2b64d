//! Calibrate command implementation
//!
//! Bootstraps a piecewise-constant hazard curve from the configured quotes
//! and reports the curve, the PVs at each quote's running coupon, and the
//! par-spread reconciliation.

use std::path::Path;

use cds_optimiser::calibration::{CalibrationResult, HazardBootstrapper};
use tracing::info;

use super::{load_config, write_report};
use crate::config::RunConfig;
use crate::report::{InputSummary, OutputFormat, Report};
use crate::Result;

/// Run the calibrate command
pub fn run(config_path: &Path, format: Option<OutputFormat>, output: Option<&str>) -> Result<()> {
    info!("Starting calibration...");
    let config = load_config(config_path)?;
    let format = format.unwrap_or(config.output_format);

    let (result, report) = calibrate(&config)?;
    info!(
        "Calibrated {} segments in {} objective evaluations",
        result.curve.len(),
        result.total_evaluations()
    );

    write_report(&report, format, output)?;
    info!("Calibration complete");
    Ok(())
}

/// Calibrate the configured quotes and assemble the report.
pub(crate) fn calibrate(config: &RunConfig) -> Result<(CalibrationResult<f64>, Report)> {
    let discount = config.discount_curve()?;
    let terms = config.terms();
    let quotes = config.quotes();
    let settings = config.calibration_config();
    info!("  Discount curve: {}", config.discount_curve);
    info!("  Quotes: {}", quotes.len());
    info!("  Solver: {}", settings.solver);

    let result = HazardBootstrapper::new(settings).calibrate(&quotes, &discount, &terms)?;
    let report = Report::new(
        InputSummary::from(config),
        &result.curve,
        &result.valuations,
        result.par_reconciliation(),
    )?;
    Ok((result, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use std::io::Write;

    const CONFIG: &str = r#"
recovery_rate = 0.4
coupon_frequency = 4
notional = 10000000.0

[discount_curve]
type = "flat"
rate = 0.015

[[quotes]]
maturity = 1.0
spread_bps = 120.0

[[quotes]]
maturity = 3.0
spread_bps = 145.0

[[quotes]]
maturity = 5.0
spread_bps = 170.0
coupon_bps = 100.0
"#;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_calibrate_round_trips_quotes() {
        let file = write_config(CONFIG);
        let config = RunConfig::load(file.path()).unwrap();
        let (result, report) = calibrate(&config).unwrap();

        assert_eq!(result.curve.len(), 3);
        assert!(result.max_abs_residual() < 1e-12);
        for row in &report.reconciliation {
            assert!(row.error_bps.abs() < 1e-8);
        }
        assert!(report.scaled_pricing.is_some());
        assert!(report.pricing[2].net > 0.0);
    }

    #[test]
    fn test_run_writes_csv_file() {
        let file = write_config(CONFIG);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("curve.csv");

        run(file.path(), Some(OutputFormat::Csv), out.to_str()).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("maturity,"));
    }

    #[test]
    fn test_shipped_configs_calibrate() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../configs");
        for name in ["sample.toml", "pillars.json"] {
            let config = RunConfig::load(&root.join(name)).unwrap();
            config.validate().unwrap();
            let (result, _) = calibrate(&config).unwrap();
            assert!(result.max_abs_residual() < 1e-12, "{}", name);
        }
    }

    #[test]
    fn test_missing_config() {
        let err = run(Path::new("/nonexistent/cds.toml"), None, None).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_unreachable_spread_surfaces_calibration_error() {
        let file = write_config(
            r#"
[[quotes]]
maturity = 1.0
spread_bps = 100000.0
"#,
        );
        let config = RunConfig::load(file.path()).unwrap();
        let err = calibrate(&config).unwrap_err();
        match err {
            CliError::Calibration(e) => assert!(e.is_bracket_not_found()),
            other => panic!("expected calibration error, got {:?}", other),
        }
    }
}
