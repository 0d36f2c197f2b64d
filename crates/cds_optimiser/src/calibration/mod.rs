//! Hazard-curve calibration to CDS par spreads.
//!
//! This module provides:
//! - [`HazardBootstrapper`]: Sequential tenor-by-tenor stripping
//! - [`CalibrationConfig`]: Tolerance, root finder and bracket search settings
//! - [`CalibrationResult`]: Calibrated curve with per-tenor diagnostics
//! - [`CalibrationError`]: Failure modes, each naming its tenor
//! - [`SpreadScenarioEngine`]: Recalibration under parallel or relative spread shifts
//!
//! # Algorithm
//!
//! For quote k with maturity Tₖ and par spread sₖ, the segment
//! (Tₖ₋₁, Tₖ] is solved from
//!
//! ```text
//! f(λ) = par_spread(H ⊕ (Tₖ, λ), Tₖ) - sₖ = 0
//! ```
//!
//! where H holds the segments already solved. Segments past Tₖ do not
//! affect the quote, so a solved segment is never revisited.

mod config;
mod engine;
mod error;
mod result;
mod scenario;

pub use config::{CalibrationConfig, CalibrationConfigBuilder, SolverKind};
pub use engine::HazardBootstrapper;
pub use error::CalibrationError;
pub use result::{CalibrationResult, ParReconciliation};
pub use scenario::{
    ScenarioAnalysis, SpreadScenario, SpreadScenarioEngine, SpreadSensitivity, SpreadShift,
    STANDARD_PARALLEL_BUMPS_BPS,
};
