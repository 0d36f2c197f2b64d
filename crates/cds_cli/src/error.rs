//! CLI error types.

use cds_core::market_data::CurveError;
use cds_models::ValuationError;
use cds_optimiser::calibration::CalibrationError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Malformed command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Run configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Market data or contract terms rejected by the core types.
    #[error("Invalid market data: {0}")]
    MarketData(#[from] cds_core::types::ConfigError),

    /// Hazard curve construction failed.
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// Valuation failed.
    #[error("Valuation error: {0}")]
    Valuation(#[from] ValuationError),

    /// Calibration failed.
    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    /// Reading or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV encoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
