//! Compare command implementation
//!
//! Prices European and American pairs side by side and reports the
//! early-exercise premium.

use pricer_core::types::{ParameterSet, PriceQuote};
use pricer_models::instruments::ExerciseStyle;
use serde::Serialize;
use tracing::info;

use super::{facade_for, render_table, QuoteRow};
use crate::config::{CliConfig, OutputFormat};
use crate::Result;

/// European and American quotes for one parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub european: PriceQuote,
    pub american: PriceQuote,
    /// American minus European on the same lattice, so discretisation
    /// error does not leak into the premium.
    pub early_exercise_premium: PriceQuote,
}

#[derive(Debug, Serialize)]
struct CompareReport<'a> {
    steps: usize,
    params: &'a ParameterSet,
    #[serde(flatten)]
    comparison: Comparison,
}

/// Prices both styles with the configured facade.
pub fn compare(params: &ParameterSet, config: &CliConfig) -> Result<Comparison> {
    let facade = facade_for(config);
    let european = facade.price(params, &ExerciseStyle::European)?;
    let american = facade.price(params, &ExerciseStyle::American)?;
    let early_exercise_premium = facade
        .american()
        .early_exercise_premium(params)?
        .rounded(config.rounding);

    Ok(Comparison {
        european,
        american,
        early_exercise_premium,
    })
}

/// Run the compare command
pub fn run(params: &ParameterSet, config: &CliConfig) -> Result<()> {
    let comparison = compare(params, config)?;

    info!(
        steps = config.steps,
        premium_call = comparison.early_exercise_premium.call(),
        premium_put = comparison.early_exercise_premium.put(),
        "Compared exercise styles"
    );

    println!("{}", render(params, &comparison, config)?);
    Ok(())
}

/// Formats a comparison according to the configured output format.
pub fn render(params: &ParameterSet, comparison: &Comparison, config: &CliConfig) -> Result<String> {
    match config.format {
        OutputFormat::Table => {
            let rows = [
                QuoteRow {
                    label: ExerciseStyle::European.name(),
                    method: ExerciseStyle::European.method_name(),
                    quote: comparison.european,
                },
                QuoteRow {
                    label: ExerciseStyle::American.name(),
                    method: ExerciseStyle::American.method_name(),
                    quote: comparison.american,
                },
                QuoteRow {
                    label: "Early exercise",
                    method: "lattice",
                    quote: comparison.early_exercise_premium,
                },
            ];
            Ok(render_table(&rows, config.rounding))
        }
        OutputFormat::Json => {
            let report = CompareReport {
                steps: config.steps,
                params,
                comparison: *comparison,
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}
