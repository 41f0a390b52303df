//! Instrument enum for static dispatch over the three engines.

use lattice_core::types::PricingError;
use lattice_models::instruments::{BarrierContract, OptionContract};
use lattice_models::models::LatticeModel;
use num_traits::Float;

use crate::american::american_price;
use crate::barrier::barrier_price;
use crate::european::european_price;

/// A contract together with the engine that prices it.
///
/// # Examples
/// ```
/// use lattice_models::instruments::OptionContract;
/// use lattice_models::models::LatticeModel;
/// use lattice_pricing::LatticeInstrument;
///
/// let model = LatticeModel::new(1.1_f64, 0.06, 1.0, 3).unwrap();
/// let put = OptionContract::put(100.0, 100.0, 1.0).unwrap();
///
/// let european = LatticeInstrument::European(put).price(&model).unwrap();
/// let american = LatticeInstrument::American(put).price(&model).unwrap();
/// assert!(american >= european);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "style", content = "contract", rename_all = "lowercase"))]
pub enum LatticeInstrument<T: Float> {
    /// Exercise at maturity only.
    European(OptionContract<T>),
    /// Exercise at any lattice step.
    American(OptionContract<T>),
    /// European exercise with a discretely monitored barrier.
    Barrier(BarrierContract<T>),
}

impl<T: Float> LatticeInstrument<T> {
    /// Prices the instrument on `model` with the matching engine.
    ///
    /// # Errors
    /// Whatever the underlying engine reports.
    pub fn price(&self, model: &LatticeModel<T>) -> Result<T, PricingError> {
        match self {
            LatticeInstrument::European(contract) => european_price(model, contract),
            LatticeInstrument::American(contract) => american_price(model, contract),
            LatticeInstrument::Barrier(contract) => barrier_price(model, contract),
        }
    }

    /// Short engine label.
    pub fn style(&self) -> &'static str {
        match self {
            LatticeInstrument::European(_) => "european",
            LatticeInstrument::American(_) => "american",
            LatticeInstrument::Barrier(_) => "barrier",
        }
    }

    /// Vanilla terms of the instrument.
    pub fn underlying(&self) -> &OptionContract<T> {
        match self {
            LatticeInstrument::European(contract) | LatticeInstrument::American(contract) => {
                contract
            }
            LatticeInstrument::Barrier(contract) => contract.underlying(),
        }
    }
}

impl<T: Float> From<BarrierContract<T>> for LatticeInstrument<T> {
    fn from(contract: BarrierContract<T>) -> Self {
        LatticeInstrument::Barrier(contract)
    }
}
