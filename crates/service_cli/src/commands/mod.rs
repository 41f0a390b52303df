//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod parity;
pub mod price;
