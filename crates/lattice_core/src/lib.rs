//! # lattice_core: Foundation for the Binomial Lattice Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! lattice_core is the bottom layer of the workspace, providing:
//! - Error types: `ConfigError`, `ContractError`, `PricingError` (`types::error`)
//! - Generic float helpers shared by the model and engine layers (`math`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other lattice_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derives
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use lattice_core::types::{ConfigError, PricingError};
//!
//! let err: PricingError = ConfigError::InvalidUpFactor { up: 0.9 }.into();
//! assert!(err.to_string().contains("u = 0.9"));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for the error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
