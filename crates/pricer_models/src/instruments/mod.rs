//! Instrument-level descriptors.
//!
//! - `exercise`: [`ExerciseStyle`] selecting the valuation method

pub mod exercise;

pub use exercise::ExerciseStyle;
