//! Standard normal cumulative distribution function.
//!
//! Built on the complementary error function from `statrs`. Its absolute
//! error is of order 1e-11, so on a price of a few hundred the error stays
//! below 1e-8, well inside a cent.

use statrs::function::erf::erfc;

/// 1 / sqrt(2)
const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1).
///
/// # Mathematical Definition
/// Φ(x) = (1/2) * erfc(-x / sqrt(2))
///
/// Using erfc rather than `1 + erf` keeps relative precision in the left
/// tail, where Φ(x) is tiny.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
/// assert!((norm_cdf(1.0) - 0.8413447460685429).abs() < 1e-10);
/// assert!(norm_cdf(-3.0) < 0.01);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}
