//! # Pricer Models (L2: Business Logic)
//!
//! Vanilla option pricers built on the [`pricer_core`] foundation.
//!
//! This crate provides:
//! - Black-Scholes pricing for European calls and puts with a continuous dividend yield
//! - Cox-Ross-Rubinstein binomial pricing for American calls and puts
//! - [`ExerciseStyle`](instruments::ExerciseStyle) selection and the
//!   [`PricingFacade`](facade::PricingFacade) that dispatches on it
//!
//! ## Design Principles
//!
//! - **Stateless pricers**: every call is a pure function of its inputs
//! - **Validation at the boundary**: pricers reject invalid parameter sets before any arithmetic
//! - **Optional parallelism**: enable the `parallel` feature to split wide lattice steps across rayon
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::ParameterSet;
//! use pricer_models::facade::PricingFacade;
//! use pricer_models::instruments::ExerciseStyle;
//!
//! let params = ParameterSet::from_percent(100.0, 100.0, 1.0, 5.0, 0.0, 20.0).unwrap();
//! let quote = PricingFacade::new()
//!     .price(&params, &ExerciseStyle::European)
//!     .unwrap();
//! assert_eq!(quote.to_string(), "call=10.45 put=5.57");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod facade;
pub mod instruments;
pub mod lattice;

pub use facade::PricingFacade;
