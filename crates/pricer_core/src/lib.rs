//! # pricer_core: Foundation Types for Vanilla Option Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Validated market/model inputs: `ParameterSet` (`types::params`)
//! - The call/put output pair: `PriceQuote` (`types::quote`)
//! - Cent rounding with explicit tie-breaking (`math::rounding`)
//! - Error types: `DomainError`, `PricingError` (`types::error`)
//! - The `OptionPricer` trait (`traits`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::rounding::RoundingMode;
//! use pricer_core::types::{ParameterSet, PriceQuote};
//!
//! // Percent inputs are normalised once, at construction
//! let params = ParameterSet::from_percent(100.0, 100.0, 1.0, 5.0, 0.0, 20.0).unwrap();
//! assert_eq!(params.volatility(), 0.2);
//!
//! let quote = PriceQuote::new(10.4506, 5.5735).rounded(RoundingMode::default());
//! assert_eq!(quote.call(), 10.45);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for ParameterSet, PriceQuote, RoundingMode

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
