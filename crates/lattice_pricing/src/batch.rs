//! Parallel pricing of independent instruments on one lattice.
//!
//! Engines are pure functions of `(model, contract)`, so a batch fans out
//! over the rayon pool with the model shared read-only.

use lattice_core::types::PricingError;
use lattice_models::models::LatticeModel;
use num_traits::Float;
use rayon::prelude::*;
use tracing::debug;

use crate::instrument::LatticeInstrument;

/// Prices every instrument on `model` in parallel.
///
/// Results keep the input order; one failing instrument does not affect the others.
///
/// # Examples
/// ```
/// use lattice_models::instruments::OptionContract;
/// use lattice_models::models::LatticeModel;
/// use lattice_pricing::{price_batch, LatticeInstrument};
///
/// let model = LatticeModel::new(1.1_f64, 0.06, 1.0, 3).unwrap();
/// let book = vec![
///     LatticeInstrument::European(OptionContract::call(100.0, 100.0, 1.0).unwrap()),
///     LatticeInstrument::American(OptionContract::put(100.0, 100.0, 2.0).unwrap()),
/// ];
///
/// let prices = price_batch(&model, &book);
/// assert!(prices[0].is_ok());
/// assert!(prices[1].is_err()); // maturity mismatch
/// ```
pub fn price_batch<T>(
    model: &LatticeModel<T>,
    instruments: &[LatticeInstrument<T>],
) -> Vec<Result<T, PricingError>>
where
    T: Float + Send + Sync,
{
    debug!(
        instruments = instruments.len(),
        steps = model.steps(),
        "pricing batch"
    );

    instruments
        .par_iter()
        .map(|instrument| instrument.price(model))
        .collect()
}
