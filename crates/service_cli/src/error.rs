//! Error types for the lattice CLI.

use lattice_core::types::{ConfigError as ModelError, ContractError, PricingError};
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be read, parsed or validated
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Lattice parameters rejected by the model
    #[error("Lattice error: {0}")]
    Model(#[from] ModelError),

    /// Contract terms rejected before pricing
    #[error("Contract error: {0}")]
    Contract(#[from] ContractError),

    /// Engine rejected the contract on this lattice
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Result could not be serialised
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
