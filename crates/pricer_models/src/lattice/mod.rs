//! Binomial lattice pricing for early-exercise options.
//!
//! This module provides:
//! - `binomial`: The Cox-Ross-Rubinstein lattice and its backward induction
//! - `american`: [`AmericanPricer`], the lattice pricer for American calls and puts
//!
//! ## Concurrency
//!
//! Steps are strictly sequential (step `i` depends on step `i + 1`). Within a
//! step, nodes are independent; with the `parallel` feature wide steps are
//! split across the rayon pool.

pub mod american;
pub mod binomial;

pub use american::{AmericanPricer, DEFAULT_STEPS};
pub use binomial::{BinomialLattice, CrrParameters, LatticeExercise, LatticeNode};
