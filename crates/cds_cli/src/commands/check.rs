//! Check command implementation
//!
//! Validates the run configuration and builds every market object it
//! describes, without solving.

use std::path::Path;

use tracing::info;

use super::load_config;
use crate::config::RunConfig;
use crate::Result;

/// Run the check command
pub fn run(config_path: &Path) -> Result<()> {
    info!("Checking configuration...");
    let config = load_config(config_path)?;
    let lines = summary(&config)?;

    println!("\ncds-calibrate configuration check");
    println!("==================================\n");
    for line in &lines {
        println!("  {}", line);
    }
    println!("\nConfiguration OK.");

    info!("Check complete");
    Ok(())
}

/// Build the configured objects and describe them.
pub(crate) fn summary(config: &RunConfig) -> Result<Vec<String>> {
    config.discount_curve()?;
    let terms = config.terms();
    terms.validate()?;
    let settings = config.calibration_config();
    settings.validate()?;
    let hazard = config.hazard_curve()?;

    let mut lines = vec![
        format!("Recovery rate:      {:.2}%", config.recovery_rate * 100.0),
        format!("Coupon frequency:   {}x per year", config.coupon_frequency),
        format!("Notional:           {:.2}", config.notional),
        format!("Day count:          ACT/{}", config.isda.day_count_denominator),
        format!("Discount curve:     {}", config.discount_curve),
        format!("Solver:             {}", settings.solver),
        format!("Output format:      {:?}", config.output_format),
    ];
    lines.push(format!("Quotes:             {}", config.quotes.len()));
    for quote in &config.quotes {
        lines.push(format!(
            "  {:>7.3}y  {:>9.2} bps",
            quote.maturity, quote.spread_bps
        ));
    }
    if let Some(curve) = hazard {
        lines.push(format!("Hazard curve:       {} segments", curve.len()));
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::CliError;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_summary_lists_quotes() {
        let file = write_config(
            r#"
[[quotes]]
maturity = 1.0
spread_bps = 120.0

[[quotes]]
maturity = 3.0
spread_bps = 145.0
"#,
        );
        let config = RunConfig::load(file.path()).unwrap();
        let lines = summary(&config).unwrap();
        assert!(lines.iter().any(|l| l.contains("Quotes:") && l.ends_with('2')));
        assert!(lines.iter().any(|l| l.contains("145.00 bps")));
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let file = write_config(
            r#"
recovery_rate = 1.5
quotes = []
"#,
        );
        let err = run(file.path()).unwrap_err();
        match err {
            CliError::Config(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
