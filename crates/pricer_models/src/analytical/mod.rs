//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions for option pricing:
//! - Black-Scholes model with a continuous dividend yield
//! - Standard normal CDF
//!
//! ## Design Principles
//!
//! - **Numerical Stability**: Uses an erfc-based CDF that keeps relative precision in the tails
//! - **Pure functions**: No state beyond the rounding convention

pub mod black_scholes;
pub mod distributions;

// Re-export main types at module level
pub use black_scholes::{BlackScholes, EuropeanPricer};
pub use distributions::norm_cdf;
