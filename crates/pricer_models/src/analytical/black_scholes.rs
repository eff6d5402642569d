//! Black-Scholes pricing model for European options.
//!
//! This module provides the Black-Scholes model with a continuous dividend
//! yield and the [`EuropeanPricer`] built on it.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use pricer_core::math::rounding::RoundingMode;
use pricer_core::traits::OptionPricer;
use pricer_core::types::{DomainError, ParameterSet, PriceQuote, PricingError};

use super::distributions::norm_cdf;

/// Black-Scholes model for European option pricing.
///
/// Holds the market state (spot, rate, dividend yield, volatility); strike
/// and expiry are supplied per valuation.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S·e^(-qT) - K·e^(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    /// Spot price (S)
    spot: f64,
    /// Risk-free interest rate (r)
    rate: f64,
    /// Continuous dividend yield (q)
    dividend_yield: f64,
    /// Volatility (σ)
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised, may be negative)
    /// * `dividend_yield` - Continuous dividend yield (may be negative)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// `DomainError` if spot or volatility is non-positive, or any input is
    /// non-finite.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0, 0.05, 0.0, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0, 0.05, 0.0, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0, 0.05, 0.0, 0.0).is_err());
    /// ```
    pub fn new(
        spot: f64,
        rate: f64,
        dividend_yield: f64,
        volatility: f64,
    ) -> Result<Self, DomainError> {
        for (parameter, value) in [
            ("spot", spot),
            ("rate", rate),
            ("dividend_yield", dividend_yield),
            ("volatility", volatility),
        ] {
            if !value.is_finite() {
                return Err(DomainError::NonFinite { parameter, value });
            }
        }

        if spot <= 0.0 {
            return Err(DomainError::NonPositive {
                parameter: "spot",
                value: spot,
            });
        }

        if volatility <= 0.0 {
            return Err(DomainError::NonPositive {
                parameter: "volatility",
                value: volatility,
            });
        }

        Ok(Self {
            spot,
            rate,
            dividend_yield,
            volatility,
        })
    }

    /// Builds the model from the market half of a parameter set.
    pub fn from_params(params: &ParameterSet) -> Result<Self, DomainError> {
        Self::new(
            params.spot(),
            params.rate(),
            params.dividend_yield(),
            params.volatility(),
        )
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Computes the d1 term of the Black-Scholes formula.
    ///
    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    ///
    /// `strike` and `expiry` must be strictly positive.
    #[inline]
    pub fn d1(&self, strike: f64, expiry: f64) -> f64 {
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift =
            (self.rate - self.dividend_yield + 0.5 * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes the d2 term of the Black-Scholes formula.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: f64, expiry: f64) -> f64 {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Computes the European call price.
    ///
    /// C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
    #[inline]
    pub fn price_call(&self, strike: f64, expiry: f64) -> f64 {
        let (d1, d2) = self.d1_d2(strike, expiry);
        let (spot_df, strike_df) = self.discounts(expiry);

        self.spot * spot_df * norm_cdf(d1) - strike * strike_df * norm_cdf(d2)
    }

    /// Computes the European put price.
    ///
    /// P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
    #[inline]
    pub fn price_put(&self, strike: f64, expiry: f64) -> f64 {
        let (d1, d2) = self.d1_d2(strike, expiry);
        let (spot_df, strike_df) = self.discounts(expiry);

        strike * strike_df * norm_cdf(-d2) - self.spot * spot_df * norm_cdf(-d1)
    }

    /// Prices call and put together, sharing d1/d2 and the discount factors.
    pub fn price_pair(&self, strike: f64, expiry: f64) -> PriceQuote {
        let (d1, d2) = self.d1_d2(strike, expiry);
        let (spot_df, strike_df) = self.discounts(expiry);
        let forward_leg = self.spot * spot_df;
        let strike_leg = strike * strike_df;

        PriceQuote::new(
            forward_leg * norm_cdf(d1) - strike_leg * norm_cdf(d2),
            strike_leg * norm_cdf(-d2) - forward_leg * norm_cdf(-d1),
        )
    }

    #[inline]
    fn d1_d2(&self, strike: f64, expiry: f64) -> (f64, f64) {
        let d1 = self.d1(strike, expiry);
        (d1, d1 - self.volatility * expiry.sqrt())
    }

    #[inline]
    fn discounts(&self, expiry: f64) -> (f64, f64) {
        (
            (-self.dividend_yield * expiry).exp(),
            (-self.rate * expiry).exp(),
        )
    }
}

/// Closed-form pricer for European calls and puts.
///
/// Pure and stateless apart from its rounding convention, so one instance
/// can be shared freely across threads.
///
/// # Examples
/// ```
/// use pricer_core::traits::OptionPricer;
/// use pricer_core::types::ParameterSet;
/// use pricer_models::analytical::EuropeanPricer;
///
/// let params = ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
/// let quote = EuropeanPricer::default().price(&params).unwrap();
/// assert_eq!(quote.call(), 10.45);
/// assert_eq!(quote.put(), 5.57);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EuropeanPricer {
    rounding: RoundingMode,
}

impl EuropeanPricer {
    /// Creates a pricer with the given rounding convention.
    pub fn new(rounding: RoundingMode) -> Self {
        Self { rounding }
    }

    /// Returns the rounding convention applied by [`OptionPricer::price`].
    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Unrounded Black-Scholes call and put.
    ///
    /// # Errors
    /// `PricingError::Domain` if `params` violates any input invariant.
    pub fn price_exact(&self, params: &ParameterSet) -> Result<PriceQuote, PricingError> {
        params.validate()?;
        let model = BlackScholes::from_params(params)?;
        Ok(model.price_pair(params.strike(), params.maturity()))
    }
}

impl OptionPricer for EuropeanPricer {
    fn price(&self, params: &ParameterSet) -> Result<PriceQuote, PricingError> {
        Ok(self.price_exact(params)?.rounded(self.rounding))
    }

    fn method_name(&self) -> &'static str {
        "Black-Scholes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn textbook() -> ParameterSet {
        ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.2).unwrap()
    }

    // ==========================================================
    // Constructor Tests
    // ==========================================================

    #[test]
    fn test_new_valid_parameters() {
        let bs = BlackScholes::new(100.0, 0.05, 0.01, 0.2).unwrap();
        assert_eq!(bs.spot(), 100.0);
        assert_eq!(bs.rate(), 0.05);
        assert_eq!(bs.dividend_yield(), 0.01);
        assert_eq!(bs.volatility(), 0.2);
    }

    #[test]
    fn test_new_invalid_spot_negative() {
        match BlackScholes::new(-100.0, 0.05, 0.0, 0.2) {
            Err(DomainError::NonPositive { parameter, value }) => {
                assert_eq!(parameter, "spot");
                assert_eq!(value, -100.0);
            }
            other => panic!("Expected NonPositive spot error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_invalid_volatility_zero() {
        let result = BlackScholes::new(100.0, 0.05, 0.0, 0.0);
        assert!(matches!(
            result,
            Err(DomainError::NonPositive {
                parameter: "volatility",
                ..
            })
        ));
    }

    #[test]
    fn test_new_non_finite_rate() {
        let result = BlackScholes::new(100.0, f64::NAN, 0.0, 0.2);
        assert!(matches!(
            result,
            Err(DomainError::NonFinite {
                parameter: "rate",
                ..
            })
        ));
    }

    #[test]
    fn test_new_negative_rate_allowed() {
        assert!(BlackScholes::new(100.0, -0.02, -0.01, 0.2).is_ok());
    }

    // ==========================================================
    // d1/d2 Tests
    // ==========================================================

    #[test]
    fn test_d1_atm() {
        // ATM with r = q: d1 = σ√T / 2
        let bs = BlackScholes::new(100.0, 0.03, 0.03, 0.2).unwrap();
        assert_relative_eq!(bs.d1(100.0, 1.0), 0.1, epsilon = 1e-12);
        assert_relative_eq!(bs.d2(100.0, 1.0), -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_d1_d2_relationship() {
        let bs = BlackScholes::new(100.0, 0.05, 0.02, 0.25).unwrap();
        for (strike, expiry) in [(80.0, 0.5), (100.0, 1.0), (120.0, 2.0)] {
            let diff = bs.d1(strike, expiry) - bs.d2(strike, expiry);
            assert_relative_eq!(diff, 0.25 * f64::sqrt(expiry), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_dividend_yield_lowers_d1() {
        let no_div = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap();
        let with_div = BlackScholes::new(100.0, 0.05, 0.03, 0.2).unwrap();
        assert!(with_div.d1(100.0, 1.0) < no_div.d1(100.0, 1.0));
    }

    // ==========================================================
    // Price Tests
    // ==========================================================

    #[test]
    fn test_call_price_reference_value() {
        // Hull: S=100, K=100, T=1, r=5%, σ=20% → C ≈ 10.4506
        let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap();
        assert_relative_eq!(bs.price_call(100.0, 1.0), 10.450583572185565, epsilon = 1e-8);
    }

    #[test]
    fn test_put_price_reference_value() {
        let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap();
        assert_relative_eq!(bs.price_put(100.0, 1.0), 5.573526022256971, epsilon = 1e-8);
    }

    #[test]
    fn test_hull_short_dated_example() {
        // Hull Example 15.6: S=42, K=40, T=0.5, r=10%, σ=20%
        let bs = BlackScholes::new(42.0, 0.10, 0.0, 0.2).unwrap();
        assert_relative_eq!(bs.price_call(40.0, 0.5), 4.759422392871535, epsilon = 1e-8);
        assert_relative_eq!(bs.price_put(40.0, 0.5), 0.8085993729000958, epsilon = 1e-8);
    }

    #[test]
    fn test_dividend_reference_value() {
        let bs = BlackScholes::new(100.0, 0.05, 0.03, 0.2).unwrap();
        assert_relative_eq!(bs.price_call(100.0, 1.0), 8.652528553942709, epsilon = 1e-8);
        assert_relative_eq!(bs.price_put(100.0, 1.0), 6.7309176491633025, epsilon = 1e-8);
    }

    #[test]
    fn test_price_pair_matches_single_legs() {
        let bs = BlackScholes::new(100.0, 0.03, 0.01, 0.25).unwrap();
        let pair = bs.price_pair(90.0, 0.5);
        assert_relative_eq!(pair.call(), bs.price_call(90.0, 0.5), epsilon = 1e-12);
        assert_relative_eq!(pair.put(), bs.price_put(90.0, 0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_deep_itm_call() {
        // Deep ITM call ≈ S·e^(-qT) - K·e^(-rT)
        let bs = BlackScholes::new(200.0, 0.05, 0.0, 0.2).unwrap();
        let intrinsic = 200.0 - 100.0 * (-0.05_f64).exp();
        assert_relative_eq!(bs.price_call(100.0, 1.0), intrinsic, epsilon = 0.01);
    }

    #[test]
    fn test_deep_otm_call() {
        let bs = BlackScholes::new(50.0, 0.05, 0.0, 0.2).unwrap();
        assert!(bs.price_call(100.0, 1.0) < 0.01);
    }

    #[test]
    fn test_put_call_parity_various_strikes() {
        let bs = BlackScholes::new(100.0, 0.05, 0.02, 0.2).unwrap();
        let expiry = 1.5;
        for strike in [60.0, 80.0, 100.0, 120.0, 150.0] {
            let call = bs.price_call(strike, expiry);
            let put = bs.price_put(strike, expiry);
            let expected =
                100.0 * (-0.02_f64 * expiry).exp() - strike * (-0.05_f64 * expiry).exp();
            assert_relative_eq!(call - put, expected, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_put_call_parity_negative_rate() {
        let bs = BlackScholes::new(100.0, -0.01, 0.0, 0.2).unwrap();
        let call = bs.price_call(100.0, 1.0);
        let put = bs.price_put(100.0, 1.0);
        let expected = 100.0 - 100.0 * (0.01_f64).exp();
        assert_relative_eq!(call - put, expected, epsilon = 1e-8);
    }

    // ==========================================================
    // EuropeanPricer Tests
    // ==========================================================

    #[test]
    fn test_european_pricer_textbook_quote() {
        let quote = EuropeanPricer::default().price(&textbook()).unwrap();
        assert_eq!(quote.call(), 10.45);
        assert_eq!(quote.put(), 5.57);
    }

    #[test]
    fn test_european_pricer_exact_is_unrounded() {
        let quote = EuropeanPricer::default().price_exact(&textbook()).unwrap();
        assert_relative_eq!(quote.call(), 10.450583572185565, epsilon = 1e-8);
        assert_relative_eq!(quote.put(), 5.573526022256971, epsilon = 1e-8);
    }

    #[test]
    fn test_european_pricer_rounding_none() {
        let pricer = EuropeanPricer::new(RoundingMode::None);
        let rounded = pricer.price(&textbook()).unwrap();
        let exact = pricer.price_exact(&textbook()).unwrap();
        assert_eq!(rounded, exact);
    }

    #[test]
    fn test_european_pricer_method_name() {
        assert_eq!(EuropeanPricer::default().method_name(), "Black-Scholes");
    }

    #[test]
    fn test_european_pricer_clone_and_debug() {
        let pricer = EuropeanPricer::new(RoundingMode::HalfEven);
        let cloned = pricer;
        assert_eq!(cloned.rounding(), RoundingMode::HalfEven);
        assert!(format!("{:?}", pricer).contains("HalfEven"));
    }
}
