//! Option exercise style definitions.
//!
//! This module provides the exercise style selector passed to the pricing
//! facade. European and American styles are priced; Bermudan is
//! representable so that callers carrying one get a typed rejection.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;

/// Option exercise style.
///
/// Defines when an option can be exercised during its lifetime.
///
/// # Variants
/// - `European`: Exercise only at expiry
/// - `American`: Exercise at any time up to expiry
/// - `Bermudan`: Exercise on specified dates (not supported by the engine)
///
/// # Examples
/// ```
/// use pricer_models::instruments::ExerciseStyle;
///
/// let american: ExerciseStyle = "American".parse().unwrap();
/// assert!(american.is_american());
/// assert!("asian".parse::<ExerciseStyle>().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseStyle {
    /// European style: exercise only at expiry.
    #[default]
    European,

    /// American style: exercise at any time up to expiry.
    American,

    /// Bermudan style: exercise on specific dates.
    Bermudan {
        /// Vector of exercise dates (times in years from now)
        exercise_dates: Vec<f64>,
    },
}

impl ExerciseStyle {
    /// Creates a new Bermudan exercise style with specified exercise dates.
    #[inline]
    pub fn bermudan(exercise_dates: Vec<f64>) -> Self {
        ExerciseStyle::Bermudan { exercise_dates }
    }

    /// Returns whether this is an American exercise style.
    #[inline]
    pub fn is_american(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }

    /// Display name of the style.
    pub fn name(&self) -> &'static str {
        match self {
            ExerciseStyle::European => "European",
            ExerciseStyle::American => "American",
            ExerciseStyle::Bermudan { .. } => "Bermudan",
        }
    }

    /// Valuation method used for this style, as shown to users.
    pub fn method_name(&self) -> &'static str {
        match self {
            ExerciseStyle::European => "Black-Scholes",
            ExerciseStyle::American => "Binomial Tree",
            ExerciseStyle::Bermudan { .. } => "unsupported",
        }
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExerciseStyle {
    type Err = PricingError;

    /// Parses `european` or `american`, ignoring case and surrounding whitespace.
    ///
    /// Any other name, including `bermudan` (which needs exercise dates),
    /// fails with `PricingError::UnsupportedStyle`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "european" | "eu" => Ok(ExerciseStyle::European),
            "american" | "am" => Ok(ExerciseStyle::American),
            _ => Err(PricingError::unsupported_style(s.trim())),
        }
    }
}
