//! Materialised triangular value lattice.
//!
//! Pricing only ever keeps the current rank. For diagnostics and tests the
//! whole triangle can be kept in one flat rank-major array: node `(i, j)`
//! lives at `i(i+1)/2 + j`.

use lattice_models::models::LatticeModel;
use num_traits::Float;

use crate::induction::{induct, NodeRule};

/// Full triangular lattice of node values, rank-major.
///
/// # Examples
/// ```
/// use lattice_models::instruments::OptionContract;
/// use lattice_models::models::LatticeModel;
/// use lattice_pricing::european_lattice;
///
/// let model = LatticeModel::new(1.1_f64, 0.06, 1.0, 3).unwrap();
/// let call = OptionContract::call(100.0, 100.0, 1.0).unwrap();
/// let lattice = european_lattice(&model, &call).unwrap();
///
/// assert_eq!(lattice.steps(), 3);
/// assert_eq!(lattice.rank(3).len(), 4);
/// assert!((lattice.root() - 10.14574).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValueLattice<V> {
    steps: usize,
    values: Vec<V>,
}

impl<V: Copy> ValueLattice<V> {
    /// Runs backward induction with `rule`, keeping every rank.
    pub fn build<T, R>(model: &LatticeModel<T>, spot: T, rule: &R) -> Self
    where
        T: Float,
        R: NodeRule<T, Value = V>,
    {
        let steps = model.steps();
        let mut ranks: Vec<Vec<V>> = Vec::with_capacity(steps + 1);
        induct(model, spot, rule, |_, rank| ranks.push(rank.to_vec()));

        // Ranks arrive from N down to 0.
        ranks.reverse();
        let values = ranks.into_iter().flatten().collect();

        Self { steps, values }
    }

    /// Flat index of node `(i, j)`.
    #[inline]
    pub fn offset(step: usize, ups: usize) -> usize {
        step * (step + 1) / 2 + ups
    }

    /// Number of steps (N).
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Total number of nodes, (N+1)(N+2)/2.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a lattice has at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at node `(i, j)`, or `None` outside the triangle.
    #[inline]
    pub fn get(&self, step: usize, ups: usize) -> Option<V> {
        if step > self.steps || ups > step {
            return None;
        }
        self.values.get(Self::offset(step, ups)).copied()
    }

    /// All values of rank `i`, ordered by number of up-moves.
    ///
    /// # Panics
    /// Panics if `step > N`.
    #[inline]
    pub fn rank(&self, step: usize) -> &[V] {
        assert!(step <= self.steps, "rank {step} beyond lattice depth {}", self.steps);
        let start = Self::offset(step, 0);
        &self.values[start..start + step + 1]
    }

    /// Root value `V(0, 0)`.
    #[inline]
    pub fn root(&self) -> V {
        self.values[0]
    }

    /// Iterates ranks from `i = 0` to `i = N`.
    pub fn ranks(&self) -> impl Iterator<Item = &[V]> + '_ {
        (0..=self.steps).map(move |i| self.rank(i))
    }
}
