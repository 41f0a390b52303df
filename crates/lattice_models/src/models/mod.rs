//! Lattice models.
//!
//! - [`LatticeModel`]: recombining binomial lattice with `d = 1/u`

pub mod lattice;

pub use lattice::{LatticeModel, MAX_STEPS};
