//! cds-calibrate - hazard-curve calibration from the command line
//!
//! # Commands
//!
//! - `cds-calibrate calibrate` - Bootstrap a hazard curve from the configured quotes
//! - `cds-calibrate price --hazard 1:0.02 --hazard 5:0.025` - Value the quotes on a given curve
//! - `cds-calibrate scenario --bump -25 --bump 25 --scale 0.5` - Recalibrate under spread shifts
//! - `cds-calibrate check` - Validate the run configuration
//!
//! # Logging
//!
//! Log filtering is read from `CDS_LOG_LEVEL`, then `RUST_LOG`. Without
//! either, `--verbose` selects `debug` and the default is `info`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod report;

pub use error::{CliError, Result};

use report::OutputFormat;

/// Environment variable holding the log filter.
const LOG_LEVEL_ENV: &str = "CDS_LOG_LEVEL";

/// CDS hazard-curve calibration CLI
#[derive(Parser)]
#[command(name = "cds-calibrate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML or JSON)
    #[arg(short, long, global = true, default_value = "cds.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calibrate a piecewise-constant hazard curve to the configured quotes
    Calibrate {
        /// Output format, overriding the configuration
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Value the configured quotes on a given hazard curve
    Price {
        /// Hazard pillar as END:RATE, repeatable; falls back to `hazard_curve` in the config
        #[arg(long = "hazard", value_name = "END:RATE")]
        hazard: Vec<String>,

        /// Output format, overriding the configuration
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Recalibrate under parallel and relative spread shifts
    Scenario {
        /// Parallel bump in basis points, repeatable; the -50..+50bp ladder when no shift is given
        #[arg(long = "bump", value_name = "BPS", allow_hyphen_values = true)]
        bump: Vec<f64>,

        /// Spread scale factor, repeatable
        #[arg(long = "scale", value_name = "FACTOR")]
        scale: Vec<f64>,

        /// Tenor whose par spread is reported
        #[arg(long, default_value = "5.0")]
        reference: f64,

        /// Output format, overriding the configuration
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate the configuration and print a summary
    Check,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config_path = std::path::Path::new(&cli.config);
    match cli.command {
        Commands::Calibrate { format, output } => {
            commands::calibrate::run(config_path, format, output.as_deref())
                .with_context(|| format!("calibration from {} failed", cli.config))
        }
        Commands::Price {
            hazard,
            format,
            output,
        } => commands::price::run(config_path, &hazard, format, output.as_deref())
            .with_context(|| format!("pricing from {} failed", cli.config)),
        Commands::Scenario {
            bump,
            scale,
            reference,
            format,
            output,
        } => commands::scenario::run(
            config_path,
            &bump,
            &scale,
            reference,
            format,
            output.as_deref(),
        )
        .with_context(|| format!("spread scenarios from {} failed", cli.config)),
        Commands::Check => commands::check::run(config_path)
            .with_context(|| format!("configuration check of {} failed", cli.config)),
    }
}
