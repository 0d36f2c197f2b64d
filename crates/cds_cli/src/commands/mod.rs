//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::config::RunConfig;
use crate::report::{OutputFormat, Render};
use crate::{CliError, Result};

pub mod calibrate;
pub mod check;
pub mod price;
pub mod scenario;

/// Load and validate the run configuration at `path`.
pub(crate) fn load_config(path: &Path) -> Result<RunConfig> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    info!("  Config: {}", path.display());
    Ok(RunConfig::load_with_env_and_validate(path)?)
}

/// Render `report` to `output`, or to stdout when none is given.
pub(crate) fn write_report<R: Render>(
    report: &R,
    format: OutputFormat,
    output: Option<&str>,
) -> Result<()> {
    match output {
        Some(path) => {
            info!("Writing {:?} report to: {}", format, path);
            let mut writer = BufWriter::new(File::create(path)?);
            report.render(format, &mut writer)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            report.render(format, &mut handle)?;
        }
    }
    Ok(())
}
