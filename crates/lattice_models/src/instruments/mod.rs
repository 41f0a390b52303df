//! Option contract definitions.
//!
//! # Types
//!
//! - [`OptionType`]: call/put flag with intrinsic payoff
//! - [`BarrierType`]: up/down × in/out with the discrete knock condition
//! - [`OptionContract`]: spot, strike, maturity and option type
//! - [`BarrierContract`]: an [`OptionContract`] plus barrier level and type
//!
//! # Examples
//!
//! ```
//! use lattice_models::instruments::{BarrierContract, BarrierType, OptionContract};
//!
//! let call = OptionContract::call(100.0_f64, 100.0, 1.0).unwrap();
//! let knock_out = BarrierContract::new(call, 125.0, "up-and-out".parse().unwrap()).unwrap();
//! assert_eq!(knock_out.barrier_type(), BarrierType::UpAndOut);
//! ```

mod barrier;
mod contract;
mod option_type;

pub use barrier::BarrierType;
pub use contract::{BarrierContract, OptionContract, MATURITY_TOLERANCE};
pub use option_type::OptionType;
