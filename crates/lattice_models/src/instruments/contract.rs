//! Option contract definitions.
//!
//! Contracts are plain validated values. They know their own terms and how to
//! check themselves against a lattice; pricing lives in the engine layer.

use lattice_core::math::{is_positive_finite, relative_eq, to_f64};
use lattice_core::types::ContractError;
use num_traits::Float;

use super::barrier::BarrierType;
use super::option_type::OptionType;
use crate::models::LatticeModel;

/// Relative tolerance when matching contract maturity to the lattice horizon.
pub const MATURITY_TOLERANCE: f64 = 1e-12;

/// Vanilla option contract.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`)
///
/// # Examples
/// ```
/// use lattice_models::instruments::{OptionContract, OptionType};
///
/// let put = OptionContract::new(100.0_f64, 100.0, 1.0, OptionType::Put).unwrap();
/// assert_eq!(put.intrinsic(90.0), 10.0);
///
/// // Invalid strike
/// assert!(OptionContract::new(100.0_f64, 0.0, 1.0, OptionType::Put).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptionContract<T: Float> {
    spot: T,
    strike: T,
    maturity: T,
    option_type: OptionType,
}

impl<T: Float> OptionContract<T> {
    /// Creates a new contract with validation.
    ///
    /// # Errors
    /// - `ContractError::InvalidSpot` if `S0 <= 0` or not finite
    /// - `ContractError::InvalidStrike` if `K <= 0` or not finite
    /// - `ContractError::InvalidMaturity` if `T <= 0` or not finite
    pub fn new(
        spot: T,
        strike: T,
        maturity: T,
        option_type: OptionType,
    ) -> Result<Self, ContractError> {
        if !is_positive_finite(spot) {
            return Err(ContractError::InvalidSpot { spot: to_f64(spot) });
        }

        if !is_positive_finite(strike) {
            return Err(ContractError::InvalidStrike {
                strike: to_f64(strike),
            });
        }

        if !is_positive_finite(maturity) {
            return Err(ContractError::InvalidMaturity {
                maturity: to_f64(maturity),
            });
        }

        Ok(Self {
            spot,
            strike,
            maturity,
            option_type,
        })
    }

    /// Creates a call.
    #[inline]
    pub fn call(spot: T, strike: T, maturity: T) -> Result<Self, ContractError> {
        Self::new(spot, strike, maturity, OptionType::Call)
    }

    /// Creates a put.
    #[inline]
    pub fn put(spot: T, strike: T, maturity: T) -> Result<Self, ContractError> {
        Self::new(spot, strike, maturity, OptionType::Put)
    }

    /// Returns the spot price of the underlying (S0).
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the strike (K).
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Returns the maturity in years (T).
    #[inline]
    pub fn maturity(&self) -> T {
        self.maturity
    }

    /// Returns the option type.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        self.option_type.is_call()
    }

    /// Immediate exercise value at `spot`.
    #[inline]
    pub fn intrinsic(&self, spot: T) -> T {
        self.option_type.intrinsic(spot, self.strike)
    }

    /// Checks that the contract can be priced on `model`.
    ///
    /// # Errors
    /// `ContractError::MaturityMismatch` if the maturity differs from the
    /// lattice horizon beyond [`MATURITY_TOLERANCE`].
    ///
    /// # Examples
    /// ```
    /// use lattice_models::instruments::OptionContract;
    /// use lattice_models::models::LatticeModel;
    ///
    /// let model = LatticeModel::new(1.1_f64, 0.06, 1.0, 3).unwrap();
    /// let call = OptionContract::call(100.0, 100.0, 2.0).unwrap();
    /// assert!(call.validate_against(&model).is_err());
    /// ```
    pub fn validate_against(&self, model: &LatticeModel<T>) -> Result<(), ContractError> {
        let tol = T::from(MATURITY_TOLERANCE).unwrap_or_else(T::epsilon);
        if !relative_eq(self.maturity, model.horizon(), tol) {
            return Err(ContractError::MaturityMismatch {
                contract: to_f64(self.maturity),
                model: to_f64(model.horizon()),
            });
        }
        Ok(())
    }
}

/// Barrier option contract: a vanilla contract plus a discretely monitored barrier.
///
/// # Examples
/// ```
/// use lattice_models::instruments::{BarrierContract, BarrierType, OptionContract};
///
/// let call = OptionContract::call(100.0_f64, 100.0, 1.0).unwrap();
/// let up_out = BarrierContract::new(call, 125.0, BarrierType::UpAndOut).unwrap();
/// assert!(!up_out.breached_at_inception());
/// assert_eq!(up_out.complement().barrier_type(), BarrierType::UpAndIn);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BarrierContract<T: Float> {
    underlying: OptionContract<T>,
    barrier: T,
    barrier_type: BarrierType,
}

impl<T: Float> BarrierContract<T> {
    /// Creates a new barrier contract.
    ///
    /// The barrier side relative to spot is not checked here; whether a
    /// breached-at-inception barrier is an error depends on the action and is
    /// decided by the pricing engine.
    ///
    /// # Errors
    /// `ContractError::InvalidBarrier` if `H <= 0` or not finite.
    pub fn new(
        underlying: OptionContract<T>,
        barrier: T,
        barrier_type: BarrierType,
    ) -> Result<Self, ContractError> {
        if !is_positive_finite(barrier) {
            return Err(ContractError::InvalidBarrier {
                barrier: to_f64(barrier),
            });
        }

        Ok(Self {
            underlying,
            barrier,
            barrier_type,
        })
    }

    /// Returns the vanilla terms.
    #[inline]
    pub fn underlying(&self) -> &OptionContract<T> {
        &self.underlying
    }

    /// Returns the barrier level (H).
    #[inline]
    pub fn barrier(&self) -> T {
        self.barrier
    }

    /// Returns the barrier type.
    #[inline]
    pub fn barrier_type(&self) -> BarrierType {
        self.barrier_type
    }

    /// Knock condition at node price `spot`.
    #[inline]
    pub fn is_breached(&self, spot: T) -> bool {
        self.barrier_type.is_breached(spot, self.barrier)
    }

    /// Returns true if spot already sits at or beyond the barrier.
    #[inline]
    pub fn breached_at_inception(&self) -> bool {
        self.is_breached(self.underlying.spot())
    }

    /// Same contract with the opposite barrier action.
    #[inline]
    pub fn complement(&self) -> Self {
        Self {
            barrier_type: self.barrier_type.complement(),
            ..*self
        }
    }

    /// Checks that the contract can be priced on `model`.
    ///
    /// # Errors
    /// - `ContractError::MaturityMismatch` (see [`OptionContract::validate_against`])
    /// - `ContractError::BarrierBreachedAtInception` for knock-out contracts
    ///   whose spot is already at or beyond the barrier
    pub fn validate_against(&self, model: &LatticeModel<T>) -> Result<(), ContractError> {
        self.underlying.validate_against(model)?;

        if self.barrier_type.is_out() && self.breached_at_inception() {
            return Err(ContractError::BarrierBreachedAtInception {
                spot: to_f64(self.underlying.spot()),
                barrier: to_f64(self.barrier),
                barrier_type: self.barrier_type.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LatticeModel<f64> {
        LatticeModel::new(1.1, 0.06, 1.0, 3).unwrap()
    }

    #[test]
    fn test_new_valid() {
        let c = OptionContract::new(100.0_f64, 95.0, 1.0, OptionType::Call).unwrap();
        assert_eq!(c.spot(), 100.0);
        assert_eq!(c.strike(), 95.0);
        assert_eq!(c.maturity(), 1.0);
        assert!(c.is_call());
        assert_eq!(c.intrinsic(100.0), 5.0);
    }

    #[test]
    fn test_new_invalid_spot() {
        match OptionContract::call(-1.0_f64, 100.0, 1.0) {
            Err(ContractError::InvalidSpot { spot }) => assert_eq!(spot, -1.0),
            other => panic!("Expected InvalidSpot, got {other:?}"),
        }
        assert!(OptionContract::call(f64::NAN, 100.0, 1.0).is_err());
    }

    #[test]
    fn test_new_invalid_strike() {
        assert!(matches!(
            OptionContract::put(100.0_f64, 0.0, 1.0),
            Err(ContractError::InvalidStrike { .. })
        ));
    }

    #[test]
    fn test_new_invalid_maturity() {
        assert!(matches!(
            OptionContract::put(100.0_f64, 100.0, 0.0),
            Err(ContractError::InvalidMaturity { .. })
        ));
    }

    #[test]
    fn test_maturity_matches_model() {
        let c = OptionContract::call(100.0_f64, 100.0, 1.0).unwrap();
        assert!(c.validate_against(&model()).is_ok());
    }

    #[test]
    fn test_maturity_tolerates_rounding() {
        let c = OptionContract::call(100.0_f64, 100.0, 3.0 * (1.0 / 3.0)).unwrap();
        assert!(c.validate_against(&model()).is_ok());
    }

    #[test]
    fn test_maturity_mismatch() {
        let c = OptionContract::call(100.0_f64, 100.0, 0.5).unwrap();
        assert_eq!(
            c.validate_against(&model()),
            Err(ContractError::MaturityMismatch {
                contract: 0.5,
                model: 1.0
            })
        );
    }

    #[test]
    fn test_barrier_invalid_level() {
        let c = OptionContract::call(100.0_f64, 100.0, 1.0).unwrap();
        assert!(matches!(
            BarrierContract::new(c, 0.0, BarrierType::UpAndOut),
            Err(ContractError::InvalidBarrier { .. })
        ));
    }

    #[test]
    fn test_barrier_breached_at_inception_out() {
        let c = OptionContract::call(100.0_f64, 100.0, 1.0).unwrap();
        let b = BarrierContract::new(c, 90.0, BarrierType::UpAndOut).unwrap();
        assert!(b.breached_at_inception());
        assert!(matches!(
            b.validate_against(&model()),
            Err(ContractError::BarrierBreachedAtInception { .. })
        ));
    }

    #[test]
    fn test_barrier_at_spot_counts_as_breached() {
        let c = OptionContract::put(100.0_f64, 100.0, 1.0).unwrap();
        let b = BarrierContract::new(c, 100.0, BarrierType::DownAndOut).unwrap();
        assert!(b.breached_at_inception());
        assert!(b.validate_against(&model()).is_err());
    }

    #[test]
    fn test_barrier_breached_at_inception_in_is_valid() {
        let c = OptionContract::call(100.0_f64, 100.0, 1.0).unwrap();
        let b = BarrierContract::new(c, 90.0, BarrierType::UpAndIn).unwrap();
        assert!(b.breached_at_inception());
        assert!(b.validate_against(&model()).is_ok());
    }

    #[test]
    fn test_complement_keeps_terms() {
        let c = OptionContract::put(100.0_f64, 100.0, 1.0).unwrap();
        let b = BarrierContract::new(c, 85.0, BarrierType::DownAndIn).unwrap();
        let k = b.complement();
        assert_eq!(k.barrier_type(), BarrierType::DownAndOut);
        assert_eq!(k.barrier(), 85.0);
        assert_eq!(k.underlying(), b.underlying());
    }
}
