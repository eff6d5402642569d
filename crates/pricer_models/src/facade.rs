//! Style-based dispatch between the analytical and lattice pricers.

use pricer_core::math::rounding::RoundingMode;
use pricer_core::traits::OptionPricer;
use pricer_core::types::{ParameterSet, PriceQuote, PricingError};

use crate::analytical::EuropeanPricer;
use crate::instruments::ExerciseStyle;
use crate::lattice::AmericanPricer;

/// Entry point for pricing a vanilla call/put pair by exercise style.
///
/// European requests go to Black-Scholes, American requests to the CRR
/// lattice. The facade holds no mutable state and can be shared freely.
///
/// # Examples
/// ```
/// use pricer_core::types::ParameterSet;
/// use pricer_models::facade::PricingFacade;
/// use pricer_models::instruments::ExerciseStyle;
///
/// let params = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
/// let facade = PricingFacade::new();
///
/// let european = facade.price(&params, &ExerciseStyle::European).unwrap();
/// assert_eq!((european.call(), european.put()), (10.45, 5.57));
///
/// let american = facade.price_named(&params, "american").unwrap();
/// assert!(american.put() > european.put());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingFacade {
    european: EuropeanPricer,
    american: AmericanPricer,
}

impl PricingFacade {
    /// Creates a facade with default rounding and lattice depth.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lattice step count used for American requests.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.american = AmericanPricer::new(steps, self.american.rounding());
        self
    }

    /// Sets the rounding convention for both pricers.
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.european = EuropeanPricer::new(rounding);
        self.american = AmericanPricer::new(self.american.steps(), rounding);
        self
    }

    /// The Black-Scholes pricer behind European requests.
    pub fn european(&self) -> &EuropeanPricer {
        &self.european
    }

    /// The lattice pricer behind American requests.
    pub fn american(&self) -> &AmericanPricer {
        &self.american
    }

    /// The pricer that handles `style`.
    ///
    /// # Errors
    /// `PricingError::UnsupportedStyle` for any style other than European or American.
    pub fn pricer_for(&self, style: &ExerciseStyle) -> Result<&dyn OptionPricer, PricingError> {
        match style {
            ExerciseStyle::European => Ok(&self.european),
            ExerciseStyle::American => Ok(&self.american),
            other => Err(PricingError::unsupported_style(other.name())),
        }
    }

    /// Prices a call/put pair with the pricer selected by `style`.
    ///
    /// # Errors
    /// - `PricingError::UnsupportedStyle` for a Bermudan request
    /// - Any error raised by the selected pricer
    pub fn price(
        &self,
        params: &ParameterSet,
        style: &ExerciseStyle,
    ) -> Result<PriceQuote, PricingError> {
        self.pricer_for(style)?.price(params)
    }

    /// Parses `style` and prices the pair.
    ///
    /// # Errors
    /// `PricingError::UnsupportedStyle` if `style` is not a recognised name.
    pub fn price_named(&self, params: &ParameterSet, style: &str) -> Result<PriceQuote, PricingError> {
        let style: ExerciseStyle = style.parse()?;
        self.price(params, &style)
    }
}
