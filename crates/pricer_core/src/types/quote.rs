//! Call/put price pair returned by every pricer.

use std::fmt;

use crate::math::rounding::{round_to_cents, RoundingMode};

/// A (call, put) price pair for one parameter set.
///
/// # Examples
/// ```
/// use pricer_core::math::rounding::RoundingMode;
/// use pricer_core::types::PriceQuote;
///
/// let quote = PriceQuote::new(10.450583, 5.573526).rounded(RoundingMode::HalfAwayFromZero);
/// assert_eq!(quote.call(), 10.45);
/// assert_eq!(quote.put(), 5.57);
/// assert_eq!(quote.to_string(), "call=10.45 put=5.57");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceQuote {
    call: f64,
    put: f64,
}

impl PriceQuote {
    /// Creates a quote from raw model values.
    #[inline]
    pub fn new(call: f64, put: f64) -> Self {
        Self { call, put }
    }

    /// Returns a copy with both legs rounded to cents.
    #[inline]
    pub fn rounded(&self, mode: RoundingMode) -> Self {
        Self {
            call: round_to_cents(self.call, mode),
            put: round_to_cents(self.put, mode),
        }
    }

    /// Call price.
    #[inline]
    pub fn call(&self) -> f64 {
        self.call
    }

    /// Put price.
    #[inline]
    pub fn put(&self) -> f64 {
        self.put
    }

    /// Leg-wise difference `self - other`, e.g. an early-exercise premium.
    pub fn premium_over(&self, other: &PriceQuote) -> PriceQuote {
        PriceQuote::new(self.call - other.call, self.put - other.put)
    }
}

impl fmt::Display for PriceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "call={:.2} put={:.2}", self.call, self.put)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rounded_keeps_original() {
        let raw = PriceQuote::new(6.082354409142486, 5.573526022256971);
        let rounded = raw.rounded(RoundingMode::HalfAwayFromZero);
        assert_eq!(rounded.call(), 6.08);
        assert_eq!(rounded.put(), 5.57);
        assert_eq!(raw.call(), 6.082354409142486);
    }

    #[test]
    fn test_rounded_none_is_identity() {
        let raw = PriceQuote::new(1.23456, 7.891011);
        assert_eq!(raw.rounded(RoundingMode::None), raw);
    }

    #[test]
    fn test_premium_over() {
        let american = PriceQuote::new(8.63, 6.96);
        let european = PriceQuote::new(8.63, 6.71);
        let premium = american.premium_over(&european);
        assert_relative_eq!(premium.call(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(premium.put(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_display() {
        let quote = PriceQuote::new(0.5, 12.0);
        assert_eq!(format!("{}", quote), "call=0.50 put=12.00");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_serialisation() {
        let quote = PriceQuote::new(10.45, 5.57);
        let json = serde_json::to_string(&quote).unwrap();
        assert_eq!(json, r#"{"call":10.45,"put":5.57}"#);
    }
}
