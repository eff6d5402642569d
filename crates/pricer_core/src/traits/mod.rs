//! Core traits for option pricers.
//!
//! This module defines the `OptionPricer` abstraction implemented by the
//! closed-form and lattice pricers in `pricer_models`.
//!
//! ## Important
//! Implementations must be pure: the same `ParameterSet` always yields the
//! same quote, so one pricer can serve many threads.

pub mod priceable;

pub use priceable::OptionPricer;
