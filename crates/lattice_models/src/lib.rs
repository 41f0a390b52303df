//! # Lattice Models (L2: Business Logic)
//!
//! The recombining binomial lattice and the contracts priced on it.
//!
//! This crate provides:
//! - [`models::LatticeModel`]: per-step factors, risk-neutral probability and discounting
//! - Contract definitions (vanilla and barrier options) with validated terms
//! - Intrinsic payoff and barrier-breach predicates shared by the engines
//!
//! ## Design Principles
//!
//! - **Immutable values**: models and contracts are validated once and never mutated
//! - **Generic scalars**: everything is generic over `T: Float`
//! - **Enum-based contract flags** for static dispatch

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod instruments;
pub mod models;
