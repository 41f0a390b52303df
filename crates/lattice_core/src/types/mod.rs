//! Core types for the lattice pricer.
//!
//! Currently this is the error taxonomy shared by every layer:
//! - [`ConfigError`]: invalid lattice parameters
//! - [`ContractError`]: invalid or inconsistent contract terms
//! - [`PricingError`]: umbrella error returned by the pricing engines

pub mod error;

pub use error::{ConfigError, ContractError, PricingError};
