//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Shared input handling
//! and table rendering live here.

pub mod compare;
pub mod price;

use std::path::{Path, PathBuf};

use clap::Args;
use pricer_core::math::rounding::RoundingMode;
use pricer_core::types::{ParameterSet, PriceQuote};
use pricer_models::PricingFacade;
use tracing::debug;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Market and contract inputs shared by every pricing command
#[derive(Args, Debug, Clone, Default)]
pub struct MarketArgs {
    /// TOML file with spot, strike, maturity, rate, dividend_yield, volatility
    /// (rates as decimal fractions)
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with_all = ["spot", "strike", "maturity", "rate", "dividend", "volatility"]
    )]
    pub params: Option<PathBuf>,

    /// Underlying spot price
    #[arg(short = 'S', long)]
    pub spot: Option<f64>,

    /// Strike price
    #[arg(short = 'K', long)]
    pub strike: Option<f64>,

    /// Time to expiry in years
    #[arg(short = 'T', long)]
    pub maturity: Option<f64>,

    /// Risk-free rate in percent (5 means 5%)
    #[arg(short = 'r', long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Continuous dividend yield in percent [default: 0]
    #[arg(short = 'q', long, allow_negative_numbers = true)]
    pub dividend: Option<f64>,

    /// Annualised volatility in percent (20 means 20%)
    #[arg(short = 'v', long)]
    pub volatility: Option<f64>,
}

impl MarketArgs {
    /// Builds the validated parameter set from a file or the individual flags.
    pub fn resolve(&self) -> Result<ParameterSet> {
        if let Some(path) = &self.params {
            return load_params_file(path);
        }

        let spot = self.spot.ok_or(CliError::MissingArgument("spot"))?;
        let strike = self.strike.ok_or(CliError::MissingArgument("strike"))?;
        let maturity = self.maturity.ok_or(CliError::MissingArgument("maturity"))?;
        let rate = self.rate.ok_or(CliError::MissingArgument("rate"))?;
        let volatility = self
            .volatility
            .ok_or(CliError::MissingArgument("volatility"))?;
        let dividend = self.dividend.unwrap_or(0.0);

        Ok(ParameterSet::from_percent(
            spot, strike, maturity, rate, dividend, volatility,
        )?)
    }
}

/// Reads a [`ParameterSet`] from a TOML file, validating it on the way in.
fn load_params_file(path: &Path) -> Result<ParameterSet> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let params: ParameterSet = toml::from_str(&content).map_err(|e| CliError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), "Loaded parameters from file");
    Ok(params)
}

/// Facade configured with the resolved step count and rounding.
pub fn facade_for(config: &CliConfig) -> PricingFacade {
    PricingFacade::new()
        .with_steps(config.steps)
        .with_rounding(config.rounding)
}

/// One line of a quote table.
pub struct QuoteRow<'a> {
    pub label: &'a str,
    pub method: &'a str,
    pub quote: PriceQuote,
}

const LABEL_WIDTH: usize = 14;
const METHOD_WIDTH: usize = 13;
const PRICE_WIDTH: usize = 10;

/// Renders quote rows as a box-drawn table.
///
/// Prices show two decimals, or six when rounding is disabled.
pub fn render_table(rows: &[QuoteRow<'_>], rounding: RoundingMode) -> String {
    let decimals = match rounding {
        RoundingMode::None => 6,
        _ => 2,
    };
    let width = PRICE_WIDTH.max(decimals + 6);
    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{left}{}{mid}{}{mid}{}{mid}{}{right}",
            "─".repeat(LABEL_WIDTH + 2),
            "─".repeat(METHOD_WIDTH + 2),
            "─".repeat(width + 2),
            "─".repeat(width + 2),
        )
    };

    let mut lines = vec![
        rule("┌", "┬", "┐"),
        format!(
            "│ {:<LABEL_WIDTH$} │ {:<METHOD_WIDTH$} │ {:>width$} │ {:>width$} │",
            "Style", "Method", "Call", "Put"
        ),
        rule("├", "┼", "┤"),
    ];
    for row in rows {
        lines.push(format!(
            "│ {:<LABEL_WIDTH$} │ {:<METHOD_WIDTH$} │ {:>width$.decimals$} │ {:>width$.decimals$} │",
            row.label,
            row.method,
            row.quote.call(),
            row.quote.put()
        ));
    }
    lines.push(rule("└", "┴", "┘"));
    lines.join("\n")
}
