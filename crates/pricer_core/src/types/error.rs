//! Error types for structured error handling.
//!
//! This module provides:
//! - `DomainError`: A pricing input outside its valid domain
//! - `PricingError`: Every failure surfaced by the pricing engine
//!
//! The engine never clamps or repairs an input. Every failure is returned
//! to the caller, and translating it into a user-facing message is the job
//! of the presentation layer.

use thiserror::Error;

/// A pricing input outside its valid domain.
///
/// # Variants
/// - `NonPositive`: spot, strike, maturity or volatility is zero or negative
/// - `NonFinite`: any input is NaN or infinite
///
/// # Examples
/// ```
/// use pricer_core::types::DomainError;
///
/// let err = DomainError::NonPositive { parameter: "volatility", value: 0.0 };
/// assert_eq!(format!("{}", err), "volatility must be strictly positive, got 0");
/// ```
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum DomainError {
    /// A field that must be strictly positive is not.
    #[error("{parameter} must be strictly positive, got {value}")]
    NonPositive {
        /// Name of the offending parameter
        parameter: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A field is NaN or infinite.
    #[error("{parameter} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending parameter
        parameter: &'static str,
        /// The rejected value
        value: f64,
    },
}

impl DomainError {
    /// Returns the name of the parameter that failed validation.
    pub fn parameter(&self) -> &'static str {
        match self {
            DomainError::NonPositive { parameter, .. } | DomainError::NonFinite { parameter, .. } => {
                parameter
            }
        }
    }
}

/// Categorised pricing errors.
///
/// # Variants
/// - `Domain`: Invalid market or model input
/// - `InvalidStepCount`: Lattice step count of zero or too large to allocate
/// - `NonArbitrageFreeLattice`: Up probability outside [0, 1]
/// - `UnsupportedStyle`: Exercise style the engine cannot value
/// - `Cancelled`: Lattice rollback stopped by the caller
///
/// # Examples
/// ```
/// use pricer_core::types::{DomainError, PricingError};
///
/// let err: PricingError = DomainError::NonPositive { parameter: "spot", value: -5.0 }.into();
/// assert_eq!(format!("{}", err), "Domain error: spot must be strictly positive, got -5");
/// assert!(err.is_domain());
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    /// Input outside its valid domain.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Binomial lattice requested with no time steps, or with more nodes
    /// than can be allocated.
    #[error("Invalid step count: {steps}. The lattice needs at least one step and a node buffer that fits in memory")]
    InvalidStepCount {
        /// The rejected step count
        steps: usize,
    },

    /// Risk-neutral up probability of the lattice falls outside [0, 1].
    ///
    /// Happens when `|r - q| * sqrt(dt)` exceeds the volatility, typically
    /// with very low volatility or too few steps.
    #[error("Lattice is not arbitrage-free: up probability {probability} with {steps} steps")]
    NonArbitrageFreeLattice {
        /// The computed up probability
        probability: f64,
        /// Step count that produced it
        steps: usize,
    },

    /// Exercise style not in {European, American}.
    #[error("Unsupported exercise style: {style}")]
    UnsupportedStyle {
        /// Name of the rejected style
        style: String,
    },

    /// Backward induction was cancelled before reaching the root.
    #[error("Pricing cancelled at lattice step {step}")]
    Cancelled {
        /// Step index that was about to be processed
        step: usize,
    },
}

impl PricingError {
    /// Create an unsupported style error.
    pub fn unsupported_style(style: impl Into<String>) -> Self {
        Self::UnsupportedStyle {
            style: style.into(),
        }
    }

    /// Returns true for input-domain failures.
    pub fn is_domain(&self) -> bool {
        matches!(self, PricingError::Domain(_))
    }
}
