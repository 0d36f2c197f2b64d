//! Run configuration.
//!
//! A run file holds contract terms, the discount curve, the quote strip and
//! solver settings. TOML and JSON are both accepted, chosen by extension.
//!
//! ```toml
//! recovery_rate = 0.4
//! coupon_frequency = 4
//! notional = 10000000.0
//!
//! [isda]
//! step_in_days = 1
//! cash_settle_days = 3
//! day_count_denominator = 365.0
//! accrual_on_default = true
//!
//! [discount_curve]
//! type = "flat"
//! rate = 0.015
//!
//! [[quotes]]
//! maturity = 1.0
//! spread_bps = 120.0
//!
//! [solver]
//! method = "brent"
//! ```

use std::path::Path;

use cds_core::market_data::curves::{CurveInterpolation, DiscountCurve, HazardCurve};
use cds_core::market_data::CurveError;
use cds_models::instruments::credit::{CdsQuote, ContractTerms, IsdaConventions};
use cds_optimiser::calibration::{CalibrationConfig, SolverKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::report::OutputFormat;

/// Environment variable overriding the output format.
pub const OUTPUT_FORMAT_ENV: &str = "CDS_OUTPUT_FORMAT";

/// Complete run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Recovery rate in [0, 1]
    #[serde(default = "default_recovery_rate")]
    pub recovery_rate: f64,

    /// Coupons per year
    #[serde(default = "default_coupon_frequency", alias = "frequency")]
    pub coupon_frequency: u32,

    /// Notional for scaled PV rows
    #[serde(default = "default_notional")]
    pub notional: f64,

    /// Report format
    #[serde(default)]
    pub output_format: OutputFormat,

    /// (end time, hazard rate) pillars for the `price` command
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hazard_curve: Vec<[f64; 2]>,

    /// ISDA conventions
    #[serde(default, alias = "isda_v")]
    pub isda: IsdaSection,

    /// Discount curve
    #[serde(default)]
    pub discount_curve: DiscountCurveSection,

    /// Quote strip, increasing in maturity
    #[serde(default)]
    pub quotes: Vec<QuoteSection>,

    /// Root-finder settings
    #[serde(default)]
    pub solver: SolverSection,
}

/// ISDA convention section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IsdaSection {
    /// Days from valuation to protection start
    #[serde(default = "default_step_in_days")]
    pub step_in_days: u32,
    /// Days from valuation to cash settlement
    #[serde(default = "default_cash_settle_days")]
    pub cash_settle_days: u32,
    /// Day-count denominator (365 or 360)
    #[serde(default = "default_day_count", alias = "day_count")]
    pub day_count_denominator: f64,
    /// Pay accrued coupon on default
    #[serde(default = "default_true")]
    pub accrual_on_default: bool,
}

impl Default for IsdaSection {
    fn default() -> Self {
        Self {
            step_in_days: default_step_in_days(),
            cash_settle_days: default_cash_settle_days(),
            day_count_denominator: default_day_count(),
            accrual_on_default: true,
        }
    }
}

/// Discount curve section, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountCurveSection {
    /// Constant continuously-compounded zero rate
    Flat {
        /// Zero rate
        rate: f64,
    },
    /// Interpolated (time, zero rate) pillars
    Pillars {
        /// (time, zero rate) pairs
        pillars: Vec<[f64; 2]>,
        /// Interpolation between pillars
        #[serde(default)]
        interpolation: CurveInterpolation,
    },
}

impl Default for DiscountCurveSection {
    fn default() -> Self {
        Self::Flat { rate: 0.01 }
    }
}

impl std::fmt::Display for DiscountCurveSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flat { rate } => write!(f, "flat, rate={:.4}%", rate * 100.0),
            Self::Pillars {
                pillars,
                interpolation,
            } => write!(f, "pillars ({} nodes, {:?})", pillars.len(), interpolation),
        }
    }
}

/// One quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuoteSection {
    /// Maturity in years
    #[serde(alias = "maturity_time")]
    pub maturity: f64,
    /// Par spread in basis points
    pub spread_bps: f64,
    /// Running coupon in basis points, defaults to the par spread
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_bps: Option<f64>,
}

/// Solver section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverSection {
    /// Residual tolerance on the par spread
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Iteration budget per tenor
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Root finder
    #[serde(default)]
    pub method: SolverKind,
    /// Keep negative solved hazard rates
    #[serde(default)]
    pub allow_negative_hazard: bool,
}

impl Default for SolverSection {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            method: SolverKind::default(),
            allow_negative_hazard: false,
        }
    }
}

fn default_recovery_rate() -> f64 {
    0.4
}

fn default_coupon_frequency() -> u32 {
    4
}

fn default_notional() -> f64 {
    1.0
}

fn default_step_in_days() -> u32 {
    1
}

fn default_cash_settle_days() -> u32 {
    3
}

fn default_day_count() -> f64 {
    365.0
}

fn default_true() -> bool {
    true
}

fn default_tolerance() -> f64 {
    1e-12
}

fn default_max_iterations() -> usize {
    100
}

impl RunConfig {
    /// Load a configuration from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    /// Apply overrides from environment variables.
    pub fn with_env_override(self) -> Self {
        let format = std::env::var(OUTPUT_FORMAT_ENV).ok();
        self.with_output_format_override(format.as_deref())
    }

    /// Replace the output format when `value` names a known one.
    pub fn with_output_format_override(mut self, value: Option<&str>) -> Self {
        if let Some(value) = value {
            match value.parse() {
                Ok(format) => self.output_format = format,
                Err(e) => warn!("Ignoring {}: {}", OUTPUT_FORMAT_ENV, e),
            }
        }
        self
    }

    /// Validate every field, collecting all violations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !(0.0..=1.0).contains(&self.recovery_rate) {
            errors.push(format!(
                "recovery_rate must be in [0, 1], got {}",
                self.recovery_rate
            ));
        }
        if self.coupon_frequency == 0 {
            errors.push("coupon_frequency must be positive".to_string());
        }
        if !(self.notional > 0.0 && self.notional.is_finite()) {
            errors.push(format!(
                "notional must be positive and finite, got {}",
                self.notional
            ));
        }
        let denominator = self.isda.day_count_denominator;
        if !(denominator > 0.0 && denominator.is_finite()) {
            errors.push(format!(
                "isda.day_count_denominator must be positive, got {}",
                denominator
            ));
        }

        match &self.discount_curve {
            DiscountCurveSection::Flat { rate } => {
                if !rate.is_finite() {
                    errors.push(format!("discount_curve.rate must be finite, got {}", rate));
                }
            }
            DiscountCurveSection::Pillars { pillars, .. } => {
                if pillars.is_empty() {
                    errors.push("discount_curve.pillars must not be empty".to_string());
                }
                check_pillars("discount_curve.pillars", pillars, 0.0, &mut errors);
            }
        }

        if self.quotes.is_empty() {
            errors.push("quotes must not be empty".to_string());
        }
        let mut previous: Option<f64> = None;
        for (i, quote) in self.quotes.iter().enumerate() {
            if !(quote.maturity > 0.0 && quote.maturity.is_finite()) {
                errors.push(format!(
                    "quotes[{}].maturity must be positive, got {}",
                    i, quote.maturity
                ));
            }
            if !quote.spread_bps.is_finite() {
                errors.push(format!("quotes[{}].spread_bps must be finite", i));
            }
            if quote.coupon_bps.map_or(false, |c| !c.is_finite()) {
                errors.push(format!("quotes[{}].coupon_bps must be finite", i));
            }
            if let Some(prev) = previous {
                if !(quote.maturity > prev) {
                    errors.push(format!(
                        "quotes[{}].maturity {} must exceed previous maturity {}",
                        i, quote.maturity, prev
                    ));
                }
            }
            previous = Some(quote.maturity);
        }

        if !(self.solver.tolerance > 0.0 && self.solver.tolerance.is_finite()) {
            errors.push(format!(
                "solver.tolerance must be positive, got {}",
                self.solver.tolerance
            ));
        }
        if self.solver.max_iterations == 0 {
            errors.push("solver.max_iterations must be positive".to_string());
        }

        check_pillars("hazard_curve", &self.hazard_curve, f64::MIN_POSITIVE, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load, apply environment overrides and validate.
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }

    /// Contract terms, per unit notional conventions included.
    pub fn terms(&self) -> ContractTerms<f64> {
        ContractTerms::new(self.recovery_rate, self.coupon_frequency)
            .with_notional(self.notional)
            .with_conventions(IsdaConventions {
                step_in_days: self.isda.step_in_days,
                cash_settle_days: self.isda.cash_settle_days,
                day_count_denominator: self.isda.day_count_denominator,
                accrual_on_default: self.isda.accrual_on_default,
            })
    }

    /// Build the discount curve.
    pub fn discount_curve(&self) -> Result<DiscountCurve<f64>, cds_core::types::ConfigError> {
        match &self.discount_curve {
            DiscountCurveSection::Flat { rate } => DiscountCurve::flat(*rate),
            DiscountCurveSection::Pillars {
                pillars,
                interpolation,
            } => {
                let (times, rates): (Vec<f64>, Vec<f64>) =
                    pillars.iter().map(|p| (p[0], p[1])).unzip();
                DiscountCurve::pillars(&times, &rates, *interpolation)
            }
        }
    }

    /// Quotes as decimal spreads.
    pub fn quotes(&self) -> Vec<CdsQuote<f64>> {
        self.quotes
            .iter()
            .map(|q| {
                let quote = CdsQuote::from_bps(q.maturity, q.spread_bps);
                match q.coupon_bps {
                    Some(coupon) => quote.with_coupon_bps(coupon),
                    None => quote,
                }
            })
            .collect()
    }

    /// Calibration settings.
    pub fn calibration_config(&self) -> CalibrationConfig<f64> {
        CalibrationConfig::builder()
            .tolerance(self.solver.tolerance)
            .max_iterations(self.solver.max_iterations)
            .solver(self.solver.method)
            .allow_negative_hazard(self.solver.allow_negative_hazard)
            .build()
    }

    /// Hazard curve from the `hazard_curve` pillars, if any.
    pub fn hazard_curve(&self) -> Result<Option<HazardCurve<f64>>, CurveError> {
        if self.hazard_curve.is_empty() {
            return Ok(None);
        }
        let (times, rates): (Vec<f64>, Vec<f64>) =
            self.hazard_curve.iter().map(|p| (p[0], p[1])).unzip();
        HazardCurve::from_pillars(&times, &rates).map(Some)
    }
}

/// Pillar times must be at least `min_time` and strictly increasing, values finite.
fn check_pillars(name: &str, pillars: &[[f64; 2]], min_time: f64, errors: &mut Vec<String>) {
    let mut previous: Option<f64> = None;
    for (i, [time, value]) in pillars.iter().enumerate() {
        if !(*time >= min_time && time.is_finite()) {
            errors.push(format!("{}[{}] has invalid time {}", name, i, time));
        }
        if !value.is_finite() {
            errors.push(format!("{}[{}] has non-finite value", name, i));
        }
        if previous.map_or(false, |prev| !(*time > prev)) {
            errors.push(format!("{}[{}] time {} is not increasing", name, i, time));
        }
        previous = Some(*time);
    }
}

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Unknown file extension
    #[error("Unsupported config format '{0}' (expected .toml or .json)")]
    UnsupportedFormat(String),
    /// One or more fields failed validation
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
