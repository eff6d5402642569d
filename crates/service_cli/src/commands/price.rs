//! Price command implementation
//!
//! Prices a call/put pair for one exercise style.

use pricer_core::types::{ParameterSet, PriceQuote};
use pricer_models::instruments::ExerciseStyle;
use serde::Serialize;
use tracing::info;

use super::{facade_for, render_table, QuoteRow};
use crate::config::{CliConfig, OutputFormat};
use crate::Result;

/// JSON shape of a single priced request
#[derive(Debug, Serialize)]
struct PriceReport<'a> {
    style: &'a ExerciseStyle,
    method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<usize>,
    params: &'a ParameterSet,
    quote: PriceQuote,
}

/// Run the price command
pub fn run(params: &ParameterSet, style: &str, config: &CliConfig) -> Result<()> {
    let style: ExerciseStyle = style.parse()?;
    let quote = facade_for(config).price(params, &style)?;

    info!(
        style = %style,
        method = style.method_name(),
        call = quote.call(),
        put = quote.put(),
        "Priced option pair"
    );

    println!("{}", render(params, &style, quote, config)?);
    Ok(())
}

/// Formats a priced quote according to the configured output format.
pub fn render(
    params: &ParameterSet,
    style: &ExerciseStyle,
    quote: PriceQuote,
    config: &CliConfig,
) -> Result<String> {
    match config.format {
        OutputFormat::Table => {
            let rows = [QuoteRow {
                label: style.name(),
                method: style.method_name(),
                quote,
            }];
            Ok(render_table(&rows, config.rounding))
        }
        OutputFormat::Json => {
            let report = PriceReport {
                style,
                method: style.method_name(),
                steps: style.is_american().then_some(config.steps),
                params,
                quote,
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}
