//! Trait for pricers that value a call/put pair.

use crate::types::{ParameterSet, PriceQuote, PricingError};

/// Trait for entities that price a vanilla call and put.
///
/// # Invariants
/// - The method must be pure (no side effects, deterministic)
/// - Implementations re-validate `params` and surface `PricingError::Domain`
///   instead of returning a number for invalid input
/// - Returned prices are non-negative
///
/// # Examples
/// ```
/// use pricer_core::traits::OptionPricer;
/// use pricer_core::types::{ParameterSet, PriceQuote, PricingError};
///
/// struct IntrinsicPricer;
///
/// impl OptionPricer for IntrinsicPricer {
///     fn price(&self, params: &ParameterSet) -> Result<PriceQuote, PricingError> {
///         params.validate()?;
///         let (s, k) = (params.spot(), params.strike());
///         Ok(PriceQuote::new((s - k).max(0.0), (k - s).max(0.0)))
///     }
/// }
///
/// let params = ParameterSet::new(110.0, 100.0, 1.0, 0.0, 0.0, 0.2).unwrap();
/// let quote = IntrinsicPricer.price(&params).unwrap();
/// assert_eq!(quote.call(), 10.0);
/// assert_eq!(quote.put(), 0.0);
/// ```
pub trait OptionPricer {
    /// Price the call and put for `params`.
    fn price(&self, params: &ParameterSet) -> Result<PriceQuote, PricingError>;

    /// Short model name used in logs and reports.
    fn method_name(&self) -> &'static str {
        "unnamed"
    }
}
