//! # Lattice Pricing (Layer 3: Engines)
//!
//! Backward-induction pricing on a recombining binomial lattice.
//!
//! ## Engines
//!
//! All engines share one skeleton ([`induction::backward_induction`]) and
//! differ only in their per-node rule:
//!
//! - [`european`]: discounted continuation only
//! - [`american`]: `max(intrinsic, continuation)` at every node
//! - [`barrier`]: discrete knock-in / knock-out monitoring, carrying the
//!   vanilla value alongside the barrier value
//!
//! Every engine is a stateless function of `(model, contract)`; a model can
//! be shared across threads and contracts ([`batch::price_batch`]).
//!
//! ## Usage Example
//!
//! ```rust
//! use lattice_models::instruments::{BarrierContract, BarrierType, OptionContract};
//! use lattice_models::models::LatticeModel;
//! use lattice_pricing::{american_price, barrier_price, european_price};
//!
//! let model = LatticeModel::new(1.1_f64, 0.06, 1.0, 3).unwrap();
//!
//! let put = OptionContract::put(100.0, 100.0, 1.0).unwrap();
//! assert!(american_price(&model, &put).unwrap() >= european_price(&model, &put).unwrap());
//!
//! let call = OptionContract::call(100.0, 100.0, 1.0).unwrap();
//! let up_in = BarrierContract::new(call, 125.0, BarrierType::UpAndIn).unwrap();
//! let up_out = up_in.complement();
//! let sum = barrier_price(&model, &up_in).unwrap() + barrier_price(&model, &up_out).unwrap();
//! assert!((sum - european_price(&model, &call).unwrap()).abs() < 1e-9);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod american;
pub mod barrier;
pub mod batch;
pub mod european;
pub mod induction;
pub mod instrument;
pub mod value_lattice;

// Re-export commonly used items for convenience
pub use american::{american_exercise_boundary, american_lattice, american_price, AmericanRule};
pub use barrier::{barrier_lattice, barrier_node, barrier_price, BarrierNode, BarrierRule};
pub use batch::price_batch;
pub use european::{european_lattice, european_price, EuropeanRule};
pub use induction::{backward_induction, NodeRule};
pub use instrument::LatticeInstrument;
pub use value_lattice::ValueLattice;
