//! Numerical helpers shared across pricers.
//!
//! - `rounding`: Cent rounding with explicit tie-breaking

pub mod rounding;

pub use rounding::{round_to_cents, RoundingMode};
