//! Barrier engine: discretely monitored knock-in and knock-out options.
//!
//! Whether a barrier option is alive depends on the price path, not only on
//! the node. On a recombining lattice the engine checks the barrier once per
//! step, at every node the induction visits, and carries two values per node:
//!
//! - `vanilla`: the plain European value
//! - `knocked`: the barrier-adjusted value
//!
//! | barrier type | knock condition | treatment at a breached node |
//! |---|---|---|
//! | up-and-out   | S ≥ H | `knocked = 0` |
//! | up-and-in    | S ≥ H | `knocked = vanilla` |
//! | down-and-out | S ≤ H | `knocked = 0` |
//! | down-and-in  | S ≤ H | `knocked = vanilla` |
//!
//! At unbreached nodes `knocked` is its own discounted continuation; at
//! maturity an unbreached knock-in pays nothing. With both legs on the same
//! lattice, in + out equals vanilla at every node.

use lattice_core::math::to_f64;
use lattice_core::types::PricingError;
use lattice_models::instruments::{BarrierContract, BarrierType, OptionType};
use lattice_models::models::LatticeModel;
use num_traits::Float;
use tracing::debug;

use crate::induction::{backward_induction, NodeRule};
use crate::value_lattice::ValueLattice;

/// Node value carried by the barrier engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarrierNode<T> {
    /// European value without the barrier.
    pub vanilla: T,
    /// Value with the barrier applied.
    pub knocked: T,
}

/// Node rule for a discretely monitored barrier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarrierRule<T: Float> {
    option_type: OptionType,
    strike: T,
    barrier: T,
    barrier_type: BarrierType,
}

impl<T: Float> BarrierRule<T> {
    /// Creates the rule for a payoff, strike and barrier.
    #[inline]
    pub fn new(option_type: OptionType, strike: T, barrier: T, barrier_type: BarrierType) -> Self {
        Self {
            option_type,
            strike,
            barrier,
            barrier_type,
        }
    }

    /// Creates the rule from a barrier contract.
    #[inline]
    pub fn from_contract(contract: &BarrierContract<T>) -> Self {
        let underlying = contract.underlying();
        Self::new(
            underlying.option_type(),
            underlying.strike(),
            contract.barrier(),
            contract.barrier_type(),
        )
    }

    #[inline]
    fn breached(&self, spot: T) -> bool {
        self.barrier_type.is_breached(spot, self.barrier)
    }
}

impl<T: Float> NodeRule<T> for BarrierRule<T> {
    type Value = BarrierNode<T>;

    fn terminal(&self, spot: T) -> BarrierNode<T> {
        let vanilla = self.option_type.intrinsic(spot, self.strike);
        let knocked = match (self.barrier_type.is_in(), self.breached(spot)) {
            (true, true) | (false, false) => vanilla,
            (true, false) | (false, true) => T::zero(),
        };
        BarrierNode { vanilla, knocked }
    }

    #[inline]
    fn continuation(
        &self,
        model: &LatticeModel<T>,
        up: BarrierNode<T>,
        down: BarrierNode<T>,
    ) -> BarrierNode<T> {
        BarrierNode {
            vanilla: model.continuation(up.vanilla, down.vanilla),
            knocked: model.continuation(up.knocked, down.knocked),
        }
    }

    fn node(&self, spot: T, continuation: BarrierNode<T>) -> BarrierNode<T> {
        if !self.breached(spot) {
            return continuation;
        }

        let knocked = if self.barrier_type.is_in() {
            continuation.vanilla
        } else {
            T::zero()
        };

        BarrierNode {
            vanilla: continuation.vanilla,
            knocked,
        }
    }
}

/// Prices a barrier option.
///
/// A knock-in whose spot already sits at or beyond the barrier is active
/// from the start and prices to the European value.
///
/// # Errors
/// - `PricingError::Contract` on a maturity mismatch
/// - `PricingError::Contract` for a knock-out already breached at inception
///
/// # Examples
/// ```
/// use lattice_models::instruments::{BarrierContract, BarrierType, OptionContract};
/// use lattice_models::models::LatticeModel;
/// use lattice_pricing::barrier_price;
///
/// let model = LatticeModel::new(1.1_f64, 0.06, 1.0, 3).unwrap();
/// let call = OptionContract::call(100.0, 100.0, 1.0).unwrap();
/// let up_out = BarrierContract::new(call, 125.0, BarrierType::UpAndOut).unwrap();
///
/// let price = barrier_price(&model, &up_out).unwrap();
/// assert!((price - 4.00027).abs() < 1e-5);
/// ```
pub fn barrier_price<T: Float>(
    model: &LatticeModel<T>,
    contract: &BarrierContract<T>,
) -> Result<T, PricingError> {
    Ok(barrier_node(model, contract)?.knocked)
}

/// Prices a barrier option together with its vanilla European counterpart.
///
/// Both values come out of the same induction, so
/// `price(in) + price(out) == vanilla` can be checked without a second pass.
///
/// # Errors
/// Same as [`barrier_price`].
pub fn barrier_node<T: Float>(
    model: &LatticeModel<T>,
    contract: &BarrierContract<T>,
) -> Result<BarrierNode<T>, PricingError> {
    contract.validate_against(model)?;

    let underlying = contract.underlying();
    debug!(
        option_type = %underlying.option_type(),
        barrier_type = %contract.barrier_type(),
        spot = to_f64(underlying.spot()),
        strike = to_f64(underlying.strike()),
        barrier = to_f64(contract.barrier()),
        steps = model.steps(),
        "pricing barrier option"
    );

    if contract.breached_at_inception() {
        debug!(
            barrier_type = %contract.barrier_type(),
            "knock-in barrier breached at inception, option already active"
        );
    }

    let rule = BarrierRule::from_contract(contract);
    Ok(backward_induction(model, underlying.spot(), &rule))
}

/// Barrier value lattice with every node kept.
///
/// # Errors
/// Same as [`barrier_price`].
pub fn barrier_lattice<T: Float>(
    model: &LatticeModel<T>,
    contract: &BarrierContract<T>,
) -> Result<ValueLattice<BarrierNode<T>>, PricingError> {
    contract.validate_against(model)?;
    let rule = BarrierRule::from_contract(contract);
    Ok(ValueLattice::build(model, contract.underlying().spot(), &rule))
}
