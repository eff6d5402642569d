//! CLI error types.

use std::path::PathBuf;

use pricer_core::types::{DomainError, PricingError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced to the user by the `vanilla` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    Domain(#[from] DomainError),

    #[error("Pricing failed: {0}")]
    Pricing(#[from] PricingError),

    #[error("Missing argument: --{0} (or supply --params FILE)")]
    MissingArgument(&'static str),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
