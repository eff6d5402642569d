//! American option pricer on the CRR lattice.

use std::sync::atomic::AtomicBool;

use pricer_core::math::rounding::RoundingMode;
use pricer_core::traits::OptionPricer;
use pricer_core::types::{ParameterSet, PriceQuote, PricingError};

use super::binomial::{BinomialLattice, LatticeExercise};

/// Default number of lattice steps.
pub const DEFAULT_STEPS: usize = 100;

/// Binomial-lattice pricer for American calls and puts.
///
/// Every call allocates its own lattice, so a single pricer can be used from
/// many threads at once.
///
/// # Examples
/// ```
/// use pricer_core::traits::OptionPricer;
/// use pricer_core::types::ParameterSet;
/// use pricer_models::lattice::AmericanPricer;
///
/// let params = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.03, 0.2).unwrap();
/// let american = AmericanPricer::default().price(&params).unwrap();
/// assert_eq!(american.put(), 6.96);
///
/// // Zero steps is rejected at valuation time
/// assert!(AmericanPricer::with_steps(0).price(&params).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmericanPricer {
    steps: usize,
    rounding: RoundingMode,
}

impl Default for AmericanPricer {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            rounding: RoundingMode::default(),
        }
    }
}

impl AmericanPricer {
    /// Creates a pricer with an explicit step count and rounding convention.
    ///
    /// The step count is checked when pricing, not here.
    pub fn new(steps: usize, rounding: RoundingMode) -> Self {
        Self { steps, rounding }
    }

    /// Creates a pricer with `steps` lattice steps and default rounding.
    pub fn with_steps(steps: usize) -> Self {
        Self {
            steps,
            ..Self::default()
        }
    }

    /// Number of lattice steps N.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Rounding convention applied to reported quotes.
    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Unrounded American call and put.
    ///
    /// # Errors
    /// - `PricingError::InvalidStepCount` if the pricer has zero steps or more
    ///   than can be allocated
    /// - `PricingError::Domain` if `params` violates any input invariant
    /// - `PricingError::NonArbitrageFreeLattice` if the step count is too
    ///   coarse for the drift and volatility
    pub fn price_exact(&self, params: &ParameterSet) -> Result<PriceQuote, PricingError> {
        self.value(params, LatticeExercise::Early, None)
    }

    /// European call and put on the same lattice, rounded.
    ///
    /// Differencing against [`OptionPricer::price`] isolates the
    /// early-exercise premium from the lattice discretisation error.
    pub fn price_european_equivalent(
        &self,
        params: &ParameterSet,
    ) -> Result<PriceQuote, PricingError> {
        Ok(self
            .value(params, LatticeExercise::AtExpiry, None)?
            .rounded(self.rounding))
    }

    /// Unrounded early-exercise premium (American minus lattice European).
    pub fn early_exercise_premium(
        &self,
        params: &ParameterSet,
    ) -> Result<PriceQuote, PricingError> {
        let american = self.value(params, LatticeExercise::Early, None)?;
        let european = self.value(params, LatticeExercise::AtExpiry, None)?;
        Ok(american.premium_over(&european))
    }

    /// Rounded American quote, abandoning the rollback once `cancel` is set.
    ///
    /// # Errors
    /// `PricingError::Cancelled` carrying the step that was about to run.
    pub fn price_cancellable(
        &self,
        params: &ParameterSet,
        cancel: &AtomicBool,
    ) -> Result<PriceQuote, PricingError> {
        Ok(self
            .value(params, LatticeExercise::Early, Some(cancel))?
            .rounded(self.rounding))
    }

    fn value(
        &self,
        params: &ParameterSet,
        exercise: LatticeExercise,
        cancel: Option<&AtomicBool>,
    ) -> Result<PriceQuote, PricingError> {
        let mut lattice = BinomialLattice::new(params, self.steps)?;
        lattice.rollback(exercise, cancel)
    }
}

impl OptionPricer for AmericanPricer {
    fn price(&self, params: &ParameterSet) -> Result<PriceQuote, PricingError> {
        Ok(self.price_exact(params)?.rounded(self.rounding))
    }

    fn method_name(&self) -> &'static str {
        "Binomial Tree"
    }
}
