//! Shared backward-induction skeleton.
//!
//! Every engine runs the same recursion over the lattice:
//!
//! 1. Terminal values at `i = N` from the rule's terminal condition.
//! 2. For `i = N−1 … 0` and `j ∈ [0, i]`: the discounted risk-neutral
//!    continuation of `(i+1, j+1)` and `(i+1, j)`, combined with the rule's
//!    node adjustment.
//! 3. The single value left at `(0, 0)`.
//!
//! Engines differ only in their [`NodeRule`]. Values live in one buffer of
//! `N + 1` slots that is overwritten rank by rank: slot `j` of rank `i` only
//! reads slots `j` and `j + 1` of rank `i + 1`, which are still intact when
//! slots are visited in increasing `j`.

use lattice_models::models::LatticeModel;
use num_traits::Float;

/// Per-node valuation rule plugged into [`backward_induction`].
///
/// `Value` is whatever a node needs to carry: a single price for vanilla
/// rules, or several coupled prices for path-dependent ones.
pub trait NodeRule<T: Float> {
    /// Value stored at each node.
    type Value: Copy;

    /// Value at a terminal node with underlying price `spot`.
    fn terminal(&self, spot: T) -> Self::Value;

    /// Discounted risk-neutral expectation of the two successor values.
    fn continuation(
        &self,
        model: &LatticeModel<T>,
        up: Self::Value,
        down: Self::Value,
    ) -> Self::Value;

    /// Value at an interior node with underlying price `spot`, given its continuation value.
    fn node(&self, spot: T, continuation: Self::Value) -> Self::Value;
}

/// Runs backward induction and returns the root value `V(0, 0)`.
///
/// O(N²) node evaluations, O(N) memory.
pub fn backward_induction<T, R>(model: &LatticeModel<T>, spot: T, rule: &R) -> R::Value
where
    T: Float,
    R: NodeRule<T>,
{
    induct(model, spot, rule, |_, _| {})
}

/// Backward induction with a callback observing each completed rank.
///
/// `on_rank(i, values)` is called once per rank, from `i = N` down to `i = 0`,
/// with `values.len() == i + 1`.
pub(crate) fn induct<T, R, F>(model: &LatticeModel<T>, spot: T, rule: &R, mut on_rank: F) -> R::Value
where
    T: Float,
    R: NodeRule<T>,
    F: FnMut(usize, &[R::Value]),
{
    let steps = model.steps();

    let mut values: Vec<R::Value> = (0..=steps)
        .map(|j| rule.terminal(model.node_price(spot, steps, j)))
        .collect();
    on_rank(steps, &values);

    for i in (0..steps).rev() {
        for j in 0..=i {
            let continuation = rule.continuation(model, values[j + 1], values[j]);
            values[j] = rule.node(model.node_price(spot, i, j), continuation);
        }
        values.truncate(i + 1);
        on_rank(i, &values);
    }

    values[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Pays the underlying price at maturity.
    struct StockRule;

    impl NodeRule<f64> for StockRule {
        type Value = f64;

        fn terminal(&self, spot: f64) -> f64 {
            spot
        }

        fn continuation(&self, model: &LatticeModel<f64>, up: f64, down: f64) -> f64 {
            model.continuation(up, down)
        }

        fn node(&self, _spot: f64, continuation: f64) -> f64 {
            continuation
        }
    }

    /// Sums successors, so each node holds its number of paths to maturity.
    struct CountingRule;

    impl NodeRule<f64> for CountingRule {
        type Value = f64;

        fn terminal(&self, _spot: f64) -> f64 {
            1.0
        }

        fn continuation(&self, _model: &LatticeModel<f64>, up: f64, down: f64) -> f64 {
            up + down
        }

        fn node(&self, _spot: f64, continuation: f64) -> f64 {
            continuation
        }
    }

    #[test]
    fn test_stock_claim_prices_to_spot() {
        let model = LatticeModel::new(1.1, 0.06, 1.0, 25).unwrap();
        let value = backward_induction(&model, 100.0, &StockRule);
        assert_relative_eq!(value, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_path_count_is_two_to_the_n() {
        // Summing successors counts paths from the root: 2^N.
        let model = LatticeModel::new(1.1, 0.0, 1.0, 10).unwrap();
        let value = backward_induction(&model, 100.0, &CountingRule);
        assert_eq!(value, 1024.0);
    }

    #[test]
    fn test_rank_callback_order_and_sizes() {
        let model = LatticeModel::new(1.1, 0.06, 1.0, 4).unwrap();
        let mut seen = Vec::new();
        induct(&model, 100.0, &StockRule, |i, values| {
            seen.push((i, values.len()))
        });
        assert_eq!(seen, vec![(4, 5), (3, 4), (2, 3), (1, 2), (0, 1)]);
    }

    #[test]
    fn test_single_step() {
        let model = LatticeModel::new(1.2, 0.05, 0.5, 1).unwrap();
        let value = backward_induction(&model, 50.0, &StockRule);
        assert_relative_eq!(value, 50.0, epsilon = 1e-12);
    }
}
