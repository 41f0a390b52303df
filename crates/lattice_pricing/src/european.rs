//! European engine: no early exercise.
//!
//! V(i,j) = e^(−rΔt)·[q·V(i+1,j+1) + (1−q)·V(i+1,j)], terminal payoff
//! max(S − K, 0) or max(K − S, 0).

use lattice_core::math::to_f64;
use lattice_core::types::PricingError;
use lattice_models::instruments::{OptionContract, OptionType};
use lattice_models::models::LatticeModel;
use num_traits::Float;
use tracing::debug;

use crate::induction::{backward_induction, NodeRule};
use crate::value_lattice::ValueLattice;

/// Node rule for European exercise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EuropeanRule<T: Float> {
    option_type: OptionType,
    strike: T,
}

impl<T: Float> EuropeanRule<T> {
    /// Creates the rule for a payoff type and strike.
    #[inline]
    pub fn new(option_type: OptionType, strike: T) -> Self {
        Self {
            option_type,
            strike,
        }
    }
}

impl<T: Float> NodeRule<T> for EuropeanRule<T> {
    type Value = T;

    #[inline]
    fn terminal(&self, spot: T) -> T {
        self.option_type.intrinsic(spot, self.strike)
    }

    #[inline]
    fn continuation(&self, model: &LatticeModel<T>, up: T, down: T) -> T {
        model.continuation(up, down)
    }

    #[inline]
    fn node(&self, _spot: T, continuation: T) -> T {
        continuation
    }
}

/// Prices a European option.
///
/// # Errors
/// `PricingError::Contract` if the contract maturity does not match the lattice horizon.
///
/// # Examples
/// ```
/// use lattice_models::instruments::OptionContract;
/// use lattice_models::models::LatticeModel;
/// use lattice_pricing::european_price;
///
/// let model = LatticeModel::new(1.1_f64, 0.06, 1.0, 3).unwrap();
/// let call = OptionContract::call(100.0, 100.0, 1.0).unwrap();
/// let price = european_price(&model, &call).unwrap();
/// assert!((price - 10.14574).abs() < 1e-5);
/// ```
pub fn european_price<T: Float>(
    model: &LatticeModel<T>,
    contract: &OptionContract<T>,
) -> Result<T, PricingError> {
    contract.validate_against(model)?;

    debug!(
        option_type = %contract.option_type(),
        spot = to_f64(contract.spot()),
        strike = to_f64(contract.strike()),
        steps = model.steps(),
        "pricing european option"
    );

    let rule = EuropeanRule::new(contract.option_type(), contract.strike());
    Ok(backward_induction(model, contract.spot(), &rule))
}

/// European value lattice with every node kept.
///
/// # Errors
/// Same as [`european_price`].
pub fn european_lattice<T: Float>(
    model: &LatticeModel<T>,
    contract: &OptionContract<T>,
) -> Result<ValueLattice<T>, PricingError> {
    contract.validate_against(model)?;
    let rule = EuropeanRule::new(contract.option_type(), contract.strike());
    Ok(ValueLattice::build(model, contract.spot(), &rule))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lattice_core::types::ContractError;

    fn model() -> LatticeModel<f64> {
        LatticeModel::new(1.1, 0.06, 1.0, 3).unwrap()
    }

    #[test]
    fn test_reference_call() {
        let call = OptionContract::call(100.0, 100.0, 1.0).unwrap();
        let price = european_price(&model(), &call).unwrap();
        assert_relative_eq!(price, 10.145735799928826, epsilon = 1e-9);
    }

    #[test]
    fn test_reference_put() {
        let put = OptionContract::put(100.0, 100.0, 1.0).unwrap();
        let price = european_price(&model(), &put).unwrap();
        assert_relative_eq!(price, 4.322189158353709, epsilon = 1e-9);
    }

    #[test]
    fn test_put_call_parity() {
        let m = model();
        let call = european_price(&m, &OptionContract::call(100.0, 105.0, 1.0).unwrap()).unwrap();
        let put = european_price(&m, &OptionContract::put(100.0, 105.0, 1.0).unwrap()).unwrap();
        let forward = 100.0 - 105.0 * (-0.06_f64).exp();
        assert_relative_eq!(call - put, forward, epsilon = 1e-10);
    }

    #[test]
    fn test_one_step_by_hand() {
        let m = LatticeModel::new(1.2, 0.05, 1.0, 1).unwrap();
        let call = OptionContract::call(100.0, 100.0, 1.0).unwrap();
        let q = m.probability();
        let expected = (-0.05_f64).exp() * q * 20.0;
        assert_relative_eq!(european_price(&m, &call).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_deep_out_of_the_money_is_zero() {
        // Highest terminal price 133.1 stays below the strike.
        let call = OptionContract::call(100.0, 200.0, 1.0).unwrap();
        assert_eq!(european_price(&model(), &call).unwrap(), 0.0);
    }

    #[test]
    fn test_maturity_mismatch() {
        let call = OptionContract::call(100.0, 100.0, 2.0).unwrap();
        assert_eq!(
            european_price(&model(), &call),
            Err(PricingError::Contract(ContractError::MaturityMismatch {
                contract: 2.0,
                model: 1.0
            }))
        );
    }

    #[test]
    fn test_lattice_root_matches_price() {
        let m = model();
        let put = OptionContract::put(100.0, 100.0, 1.0).unwrap();
        let lattice = european_lattice(&m, &put).unwrap();
        assert_eq!(lattice.root(), european_price(&m, &put).unwrap());
    }
}
