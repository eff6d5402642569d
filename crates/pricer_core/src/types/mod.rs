//! Core value and error types.
//!
//! This module provides:
//! - `params`: The validated [`ParameterSet`] consumed by every pricer
//! - `quote`: The [`PriceQuote`] (call, put) output pair
//! - `error`: Structured error types for input validation and pricing
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`ParameterSet`] from `params`
//! - [`PriceQuote`] from `quote`
//! - [`DomainError`], [`PricingError`] from `error`

pub mod error;
pub mod params;
pub mod quote;

// Re-export commonly used types at module level
pub use error::{DomainError, PricingError};
pub use params::ParameterSet;
pub use quote::PriceQuote;
