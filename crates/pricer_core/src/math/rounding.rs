//! Rounding of monetary values to cents.
//!
//! Quotes are reported to two decimal places. Tie-breaking is explicit
//! because the two common conventions disagree exactly on the boundary
//! cases that matter for reported prices.
//!
//! Rounding is applied to the `f64` value scaled by 100. The scaling itself
//! rounds, so a literal such as `2.675` (stored as 2.67499999...) becomes the
//! exact tie 267.5 before the tie-breaking rule is applied.

use std::fmt;
use std::str::FromStr;

const CENTS: f64 = 100.0;

/// Tie-breaking rule applied when rounding to cents.
///
/// # Examples
/// ```
/// use pricer_core::math::rounding::{round_to_cents, RoundingMode};
///
/// assert_eq!(round_to_cents(0.125, RoundingMode::HalfAwayFromZero), 0.13);
/// assert_eq!(round_to_cents(0.125, RoundingMode::HalfEven), 0.12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RoundingMode {
    /// Ties move away from zero (0.125 -> 0.13, -0.125 -> -0.13).
    #[default]
    HalfAwayFromZero,
    /// Banker's rounding: ties move to the even cent (0.125 -> 0.12).
    HalfEven,
    /// No rounding; the raw model value is returned.
    None,
}

impl RoundingMode {
    /// Configuration name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundingMode::HalfAwayFromZero => "half-away-from-zero",
            RoundingMode::HalfEven => "half-even",
            RoundingMode::None => "none",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown rounding mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid rounding mode: {0}. Must be one of: half-away-from-zero, half-even, none")]
pub struct ParseRoundingModeError(pub String);

impl FromStr for RoundingMode {
    type Err = ParseRoundingModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "half-away-from-zero" | "half-up" | "away" => Ok(RoundingMode::HalfAwayFromZero),
            "half-even" | "bankers" | "even" => Ok(RoundingMode::HalfEven),
            "none" | "raw" => Ok(RoundingMode::None),
            _ => Err(ParseRoundingModeError(s.to_string())),
        }
    }
}

/// Rounds a monetary value to two decimal places.
///
/// Non-finite inputs are returned unchanged.
#[inline]
pub fn round_to_cents(value: f64, mode: RoundingMode) -> f64 {
    if !value.is_finite() {
        return value;
    }
    match mode {
        RoundingMode::HalfAwayFromZero => (value * CENTS).round() / CENTS,
        RoundingMode::HalfEven => (value * CENTS).round_ties_even() / CENTS,
        RoundingMode::None => value,
    }
}
