//! Vanilla CLI - Command Line Pricing for European and American Options
//!
//! This is the operational entry point for the vanilla option pricing engine.
//!
//! # Commands
//!
//! - `vanilla price --spot 100 --strike 100 --maturity 1 --rate 5 --volatility 20 --style american`
//! - `vanilla compare --params inputs.toml` - European and American side by side
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate only parses input, resolves
//! configuration and formats output; all numerics live in `pricer_models`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::MarketArgs;
use config::{build_config, CliArgs, LogLevel};

/// Vanilla option pricing CLI
#[derive(Parser, Debug)]
#[command(name = "vanilla")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format) [default: vanilla.toml if present]
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of lattice steps for American pricing
    #[arg(short = 'n', long, global = true)]
    steps: Option<usize>,

    /// Rounding of reported prices (half-away-from-zero, half-even, none)
    #[arg(long, global = true)]
    rounding: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Price a call/put pair for one exercise style
    Price {
        #[command(flatten)]
        market: MarketArgs,

        /// Exercise style (european, american)
        #[arg(short, long, default_value = "european")]
        style: String,
    },

    /// Price both exercise styles and show the early-exercise premium
    Compare {
        #[command(flatten)]
        market: MarketArgs,
    },
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        CliArgs {
            config_file: cli.config.clone(),
            steps: cli.steps,
            rounding: cli.rounding.clone(),
            format: cli.format.clone(),
            log_level: cli.log_level.clone(),
        }
    }
}

/// Filter for the resolved log level. `RUST_LOG` is not consulted, so the
/// `--log-level` / `VANILLA_LOG_LEVEL` / config-file priority holds.
fn log_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::new(level.as_filter_str())
}

fn init_tracing(level: LogLevel) {
    tracing_subscriber::registry()
        .with(log_filter(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = build_config(&CliArgs::from(&cli))?;

    init_tracing(config.log_level);
    debug!(
        steps = config.steps,
        rounding = %config.rounding,
        format = %config.format,
        log_level = %config.log_level,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Price { market, style } => {
            let params = market.resolve()?;
            commands::price::run(&params, &style, &config)
        }
        Commands::Compare { market } => {
            let params = market.resolve()?;
            commands::compare::run(&params, &config)
        }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Command failed");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
