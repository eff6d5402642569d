//! Validated market and model inputs.
//!
//! This module provides [`ParameterSet`], the single data contract shared by
//! every pricer. Rate, dividend yield and volatility are stored as decimal
//! fractions; [`ParameterSet::from_percent`] performs the percentage
//! normalisation once, at construction.

use super::error::DomainError;

const PERCENT: f64 = 100.0;

/// Immutable, validated tuple of pricing inputs.
///
/// # Invariants
/// - All six fields are finite
/// - `spot`, `strike`, `maturity` and `volatility` are strictly positive
/// - `rate` and `dividend_yield` may be zero or negative
///
/// # Examples
/// ```
/// use pricer_core::types::ParameterSet;
///
/// let params = ParameterSet::from_percent(100.0, 100.0, 1.0, 5.0, 0.0, 20.0).unwrap();
/// assert_eq!(params.rate(), 0.05);
/// assert_eq!(params.volatility(), 0.2);
///
/// assert!(ParameterSet::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawParameterSet"))]
pub struct ParameterSet {
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
}

impl ParameterSet {
    /// Creates a parameter set from decimal-fraction inputs.
    ///
    /// # Arguments
    /// * `spot` - Current underlying price (S > 0)
    /// * `strike` - Strike price (K > 0)
    /// * `maturity` - Time to expiry in years (T > 0)
    /// * `rate` - Continuously-compounded risk-free rate, e.g. `0.05`
    /// * `dividend_yield` - Continuous dividend yield, e.g. `0.03`
    /// * `volatility` - Annualised volatility, e.g. `0.2` (σ > 0)
    ///
    /// # Errors
    /// `DomainError` naming the first invalid field, checked in argument order.
    pub fn new(
        spot: f64,
        strike: f64,
        maturity: f64,
        rate: f64,
        dividend_yield: f64,
        volatility: f64,
    ) -> Result<Self, DomainError> {
        let params = Self {
            spot,
            strike,
            maturity,
            rate,
            dividend_yield,
            volatility,
        };
        params.validate()?;
        Ok(params)
    }

    /// Creates a parameter set where rate, yield and volatility are percentages.
    ///
    /// `5.0` means 5%. The division by 100 happens here and nowhere else.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::ParameterSet;
    ///
    /// let params = ParameterSet::from_percent(100.0, 95.0, 0.5, 4.0, 1.5, 25.0).unwrap();
    /// assert!((params.dividend_yield() - 0.015).abs() < 1e-15);
    /// ```
    pub fn from_percent(
        spot: f64,
        strike: f64,
        maturity: f64,
        rate_pct: f64,
        dividend_pct: f64,
        volatility_pct: f64,
    ) -> Result<Self, DomainError> {
        Self::new(
            spot,
            strike,
            maturity,
            rate_pct / PERCENT,
            dividend_pct / PERCENT,
            volatility_pct / PERCENT,
        )
    }

    /// Re-checks every invariant.
    ///
    /// Pricers call this before any arithmetic so that a set obtained by any
    /// route is still rejected when invalid.
    pub fn validate(&self) -> Result<(), DomainError> {
        check_positive("spot", self.spot)?;
        check_positive("strike", self.strike)?;
        check_positive("maturity", self.maturity)?;
        check_finite("rate", self.rate)?;
        check_finite("dividend_yield", self.dividend_yield)?;
        check_positive("volatility", self.volatility)?;
        Ok(())
    }

    /// Returns the spot price (S).
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike price (K).
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the time to expiry in years (T).
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Returns the risk-free rate as a decimal fraction (r).
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the dividend yield as a decimal fraction (q).
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Returns the volatility as a decimal fraction (σ).
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Risk-free discount factor e^(−rT).
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Dividend discount factor e^(−qT).
    #[inline]
    pub fn dividend_discount_factor(&self) -> f64 {
        (-self.dividend_yield * self.maturity).exp()
    }
}

fn check_finite(parameter: &'static str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::NonFinite { parameter, value })
    }
}

fn check_positive(parameter: &'static str, value: f64) -> Result<(), DomainError> {
    check_finite(parameter, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(DomainError::NonPositive { parameter, value })
    }
}

/// Unvalidated mirror of [`ParameterSet`] used as the deserialisation source.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawParameterSet {
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    #[serde(default)]
    dividend_yield: f64,
    volatility: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawParameterSet> for ParameterSet {
    type Error = DomainError;

    fn try_from(raw: RawParameterSet) -> Result<Self, Self::Error> {
        ParameterSet::new(
            raw.spot,
            raw.strike,
            raw.maturity,
            raw.rate,
            raw.dividend_yield,
            raw.volatility,
        )
    }
}
