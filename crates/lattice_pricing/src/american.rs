//! American engine: early exercise at every node.
//!
//! At each interior node, including the root, the holder compares immediate
//! exercise against the discounted value of holding one more step:
//!
//! V(i,j) = max(intrinsic(i,j), C_cont(i,j))

use lattice_core::math::to_f64;
use lattice_core::types::PricingError;
use lattice_models::instruments::{OptionContract, OptionType};
use lattice_models::models::LatticeModel;
use num_traits::Float;
use tracing::debug;

use crate::induction::{backward_induction, NodeRule};
use crate::value_lattice::ValueLattice;

/// Node rule for American exercise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmericanRule<T: Float> {
    option_type: OptionType,
    strike: T,
}

impl<T: Float> AmericanRule<T> {
    /// Creates the rule for a payoff type and strike.
    #[inline]
    pub fn new(option_type: OptionType, strike: T) -> Self {
        Self {
            option_type,
            strike,
        }
    }
}

impl<T: Float> NodeRule<T> for AmericanRule<T> {
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
    fn node(&self, spot: T, continuation: T) -> T {
        self.option_type.intrinsic(spot, self.strike).max(continuation)
    }
}

/// Prices an American option.
///
/// # Errors
/// `PricingError::Contract` if the contract maturity does not match the lattice horizon.
///
/// # Examples
/// ```
/// use lattice_models::instruments::OptionContract;
/// use lattice_models::models::LatticeModel;
/// use lattice_pricing::american_price;
///
/// let model = LatticeModel::new(1.1_f64, 0.06, 1.0, 3).unwrap();
/// let put = OptionContract::put(100.0, 100.0, 1.0).unwrap();
/// let price = american_price(&model, &put).unwrap();
/// assert!((price - 4.65459).abs() < 1e-5);
/// ```
pub fn american_price<T: Float>(
    model: &LatticeModel<T>,
    contract: &OptionContract<T>,
) -> Result<T, PricingError> {
    contract.validate_against(model)?;

    debug!(
        option_type = %contract.option_type(),
        spot = to_f64(contract.spot()),
        strike = to_f64(contract.strike()),
        steps = model.steps(),
        "pricing american option"
    );

    let rule = AmericanRule::new(contract.option_type(), contract.strike());
    Ok(backward_induction(model, contract.spot(), &rule))
}

/// American value lattice with every node kept.
///
/// # Errors
/// Same as [`american_price`].
pub fn american_lattice<T: Float>(
    model: &LatticeModel<T>,
    contract: &OptionContract<T>,
) -> Result<ValueLattice<T>, PricingError> {
    contract.validate_against(model)?;
    let rule = AmericanRule::new(contract.option_type(), contract.strike());
    Ok(ValueLattice::build(model, contract.spot(), &rule))
}

/// Early-exercise region of an American option.
///
/// Returns one entry per rank `i = 0 … N−1`, listing the up-move counts `j`
/// of the nodes where immediate exercise is strictly worth more than
/// continuing. Maturity is left out since every in-the-money terminal node
/// is exercised.
///
/// # Errors
/// Same as [`american_price`].
///
/// # Examples
/// ```
/// use lattice_models::instruments::OptionContract;
/// use lattice_models::models::LatticeModel;
/// use lattice_pricing::american_exercise_boundary;
///
/// let model = LatticeModel::new(1.1_f64, 0.06, 1.0, 3).unwrap();
/// let put = OptionContract::put(100.0, 100.0, 1.0).unwrap();
/// let boundary = american_exercise_boundary(&model, &put).unwrap();
///
/// assert_eq!(boundary.len(), 3);
/// // Two down-moves: exercising the put beats holding it
/// assert_eq!(boundary[2], vec![0]);
/// ```
pub fn american_exercise_boundary<T: Float>(
    model: &LatticeModel<T>,
    contract: &OptionContract<T>,
) -> Result<Vec<Vec<usize>>, PricingError> {
    let lattice = american_lattice(model, contract)?;

    let boundary = (0..model.steps())
        .map(|i| {
            let next = lattice.rank(i + 1);
            (0..=i)
                .filter(|&j| {
                    let continuation = model.continuation(next[j + 1], next[j]);
                    contract.intrinsic(model.node_price(contract.spot(), i, j)) > continuation
                })
                .collect()
        })
        .collect();

    Ok(boundary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::european::european_price;
    use approx::assert_relative_eq;

    fn model() -> LatticeModel<f64> {
        LatticeModel::new(1.1, 0.06, 1.0, 3).unwrap()
    }

    #[test]
    fn test_reference_put() {
        let put = OptionContract::put(100.0, 100.0, 1.0).unwrap();
        let price = american_price(&model(), &put).unwrap();
        assert_relative_eq!(price, 4.654588754602527, epsilon = 1e-9);
    }

    #[test]
    fn test_put_premium_over_european() {
        let m = model();
        let put = OptionContract::put(100.0, 100.0, 1.0).unwrap();
        let american = american_price(&m, &put).unwrap();
        let european = european_price(&m, &put).unwrap();
        assert!(american > european);
    }

    #[test]
    fn test_call_equals_european_with_positive_rate() {
        let m = LatticeModel::new(1.05, 0.04, 2.0, 200).unwrap();
        let call = OptionContract::call(100.0, 90.0, 2.0).unwrap();
        assert_relative_eq!(
            american_price(&m, &call).unwrap(),
            european_price(&m, &call).unwrap(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_deep_in_the_money_put_exercised_at_root() {
        let put = OptionContract::put(100.0, 300.0, 1.0).unwrap();
        let price = american_price(&model(), &put).unwrap();
        assert_relative_eq!(price, 200.0, epsilon = 1e-12);
        let boundary = american_exercise_boundary(&model(), &put).unwrap();
        assert_eq!(boundary[0], vec![0]);
    }

    #[test]
    fn test_call_has_empty_exercise_boundary() {
        let call = OptionContract::call(100.0, 100.0, 1.0).unwrap();
        let boundary = american_exercise_boundary(&model(), &call).unwrap();
        assert!(boundary.iter().all(Vec::is_empty));
    }

    #[test]
    fn test_lattice_nodes_dominate_intrinsic() {
        let m = model();
        let put = OptionContract::put(100.0, 100.0, 1.0).unwrap();
        let lattice = american_lattice(&m, &put).unwrap();
        for i in 0..=3 {
            for (j, value) in lattice.rank(i).iter().enumerate() {
                assert!(*value >= put.intrinsic(m.node_price(100.0, i, j)));
            }
        }
    }
}
