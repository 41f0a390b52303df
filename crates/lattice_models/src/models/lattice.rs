//! Recombining binomial lattice.
//!
//! ## Parameterisation
//!
//! Given an up factor `u`, rate `r`, horizon `T` and step count `N`:
//!
//! - d = 1/u (recombination: an up-move followed by a down-move returns to the same price)
//! - Δt = T/N
//! - q = (e^(rΔt) − d) / (u − d)
//! - df = e^(−rΔt)
//!
//! The node `(i, j)` (step `i`, `j` up-moves) carries the price
//! S(i,j) = S0·u^j·d^(i−j).

use lattice_core::math::{from_usize, is_positive_finite, to_f64};
use lattice_core::types::ConfigError;
use num_traits::Float;
use tracing::debug;

/// Maximum number of lattice steps allowed.
pub const MAX_STEPS: usize = 10_000;

/// Recombining binomial lattice model.
///
/// Immutable once built; engines share it read-only, so a single model can
/// price any number of contracts with the same horizon.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`)
///
/// # Examples
/// ```
/// use lattice_models::models::LatticeModel;
///
/// let model = LatticeModel::new(1.1_f64, 0.06, 1.0, 3).unwrap();
/// assert!((model.up() * model.down() - 1.0).abs() < 1e-15);
/// assert!(model.probability() > 0.0 && model.probability() < 1.0);
///
/// // No effective up-move
/// assert!(LatticeModel::new(1.0_f64, 0.06, 1.0, 3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LatticeModel<T: Float> {
    /// Up factor (u)
    up: T,
    /// Down factor (d = 1/u)
    down: T,
    /// Annualised continuously compounded risk-free rate (r)
    rate: T,
    /// Horizon in years (T)
    horizon: T,
    /// Number of steps (N)
    steps: usize,
    /// Step size (Δt)
    dt: T,
    /// Risk-neutral up probability (q)
    probability: T,
    /// One-step discount factor (e^(−rΔt))
    discount: T,
}

impl<T: Float> LatticeModel<T> {
    /// Creates a new lattice model with validation.
    ///
    /// # Arguments
    /// * `up` - Up factor (must be finite and > 1)
    /// * `rate` - Annualised risk-free rate (must be finite)
    /// * `horizon` - Time horizon in years (must be finite and > 0)
    /// * `steps` - Number of steps in `[1, MAX_STEPS]`
    ///
    /// # Errors
    /// - `ConfigError::InvalidUpFactor` if `u <= 1`
    /// - `ConfigError::InvalidStepCount` if `N == 0` or `N > MAX_STEPS`
    /// - `ConfigError::InvalidHorizon` if `T <= 0`
    /// - `ConfigError::InvalidRate` if `r` is not finite
    /// - `ConfigError::ArbitrageViolation` if `q` falls outside `[0, 1]`
    ///
    /// # Examples
    /// ```
    /// use lattice_core::types::ConfigError;
    /// use lattice_models::models::LatticeModel;
    ///
    /// // Growth e^(rΔt) above u admits arbitrage
    /// let err = LatticeModel::new(1.01_f64, 0.5, 1.0, 1).unwrap_err();
    /// assert!(matches!(err, ConfigError::ArbitrageViolation { .. }));
    /// ```
    pub fn new(up: T, rate: T, horizon: T, steps: usize) -> Result<Self, ConfigError> {
        if !up.is_finite() || up <= T::one() {
            return Err(ConfigError::InvalidUpFactor { up: to_f64(up) });
        }

        if steps == 0 || steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount {
                steps,
                max: MAX_STEPS,
            });
        }

        if !is_positive_finite(horizon) {
            return Err(ConfigError::InvalidHorizon {
                horizon: to_f64(horizon),
            });
        }

        if !rate.is_finite() {
            return Err(ConfigError::InvalidRate {
                rate: to_f64(rate),
            });
        }

        let down = T::one() / up;
        let dt = horizon / from_usize(steps);
        let probability = ((rate * dt).exp() - down) / (up - down);

        // NaN fails both comparisons and is rejected here too.
        if !(probability >= T::zero() && probability <= T::one()) {
            return Err(ConfigError::ArbitrageViolation {
                probability: to_f64(probability),
            });
        }

        let discount = (-rate * dt).exp();

        debug!(
            up = to_f64(up),
            rate = to_f64(rate),
            horizon = to_f64(horizon),
            steps,
            probability = to_f64(probability),
            "lattice model built"
        );

        Ok(Self {
            up,
            down,
            rate,
            horizon,
            steps,
            dt,
            probability,
            discount,
        })
    }

    /// Creates a lattice with the Cox-Ross-Rubinstein up factor `u = e^(σ√Δt)`.
    ///
    /// Only a way of choosing `u` from a volatility; the resulting model is
    /// validated exactly like [`LatticeModel::new`].
    ///
    /// # Errors
    /// - `ConfigError::InvalidVolatility` if `σ <= 0` or not finite
    /// - any error of [`LatticeModel::new`]
    ///
    /// # Examples
    /// ```
    /// use lattice_models::models::LatticeModel;
    ///
    /// let model = LatticeModel::from_volatility(0.2_f64, 0.05, 1.0, 100).unwrap();
    /// let expected_up = (0.2_f64 * (0.01_f64).sqrt()).exp();
    /// assert!((model.up() - expected_up).abs() < 1e-12);
    /// ```
    pub fn from_volatility(
        volatility: T,
        rate: T,
        horizon: T,
        steps: usize,
    ) -> Result<Self, ConfigError> {
        if !is_positive_finite(volatility) {
            return Err(ConfigError::InvalidVolatility {
                volatility: to_f64(volatility),
            });
        }

        if steps == 0 || steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount {
                steps,
                max: MAX_STEPS,
            });
        }

        if !is_positive_finite(horizon) {
            return Err(ConfigError::InvalidHorizon {
                horizon: to_f64(horizon),
            });
        }

        let dt = horizon / from_usize(steps);
        Self::new((volatility * dt.sqrt()).exp(), rate, horizon, steps)
    }

    /// Returns the up factor (u).
    #[inline]
    pub fn up(&self) -> T {
        self.up
    }

    /// Returns the down factor (d = 1/u).
    #[inline]
    pub fn down(&self) -> T {
        self.down
    }

    /// Returns the risk-free rate (r).
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the horizon in years (T).
    #[inline]
    pub fn horizon(&self) -> T {
        self.horizon
    }

    /// Returns the number of steps (N).
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the step size (Δt = T/N).
    #[inline]
    pub fn dt(&self) -> T {
        self.dt
    }

    /// Returns the risk-neutral up probability (q).
    #[inline]
    pub fn probability(&self) -> T {
        self.probability
    }

    /// Returns the one-step discount factor (e^(−rΔt)).
    #[inline]
    pub fn discount(&self) -> T {
        self.discount
    }

    /// Price of the underlying at node `(i, j)`.
    ///
    /// S(i,j) = S0·u^j·d^(i−j). Callers keep `j <= i <= N`.
    ///
    /// # Examples
    /// ```
    /// use lattice_models::models::LatticeModel;
    ///
    /// let model = LatticeModel::new(1.1_f64, 0.06, 1.0, 3).unwrap();
    /// assert_eq!(model.node_price(100.0, 0, 0), 100.0);
    /// assert!((model.node_price(100.0, 3, 3) - 133.1).abs() < 1e-10);
    /// ```
    #[inline]
    pub fn node_price(&self, spot: T, step: usize, ups: usize) -> T {
        debug_assert!(ups <= step && step <= self.steps);
        spot * self.up.powi(ups as i32) * self.down.powi((step - ups) as i32)
    }

    /// Discounted risk-neutral expectation of two successor values.
    ///
    /// C = e^(−rΔt)·[q·V_up + (1−q)·V_down]
    #[inline]
    pub fn continuation(&self, up_value: T, down_value: T) -> T {
        self.discount
            * (self.probability * up_value + (T::one() - self.probability) * down_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn reference() -> LatticeModel<f64> {
        LatticeModel::new(1.1, 0.06, 1.0, 3).unwrap()
    }

    #[test]
    fn test_derived_values() {
        let model = reference();
        let dt = 1.0 / 3.0;
        let d = 1.0 / 1.1;
        let q = ((0.06_f64 * dt).exp() - d) / (1.1 - d);

        assert_relative_eq!(model.down(), d, epsilon = 1e-15);
        assert_relative_eq!(model.dt(), dt, epsilon = 1e-15);
        assert_relative_eq!(model.probability(), q, epsilon = 1e-15);
        assert_relative_eq!(model.discount(), (-0.06_f64 * dt).exp(), epsilon = 1e-15);
        assert_eq!(model.steps(), 3);
        assert_eq!(model.horizon(), 1.0);
        assert_eq!(model.rate(), 0.06);
    }

    #[test]
    fn test_recombination() {
        let model = reference();
        assert_relative_eq!(model.up() * model.down(), 1.0, epsilon = 1e-15);
        // up then down lands on the starting price
        assert_relative_eq!(model.node_price(100.0, 2, 1), 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_up_factor() {
        for up in [1.0, 0.9, -1.1, f64::NAN, f64::INFINITY] {
            let result = LatticeModel::new(up, 0.06, 1.0, 3);
            assert!(
                matches!(result, Err(ConfigError::InvalidUpFactor { .. })),
                "u = {up} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_step_count() {
        assert_eq!(
            LatticeModel::new(1.1_f64, 0.06, 1.0, 0),
            Err(ConfigError::InvalidStepCount {
                steps: 0,
                max: MAX_STEPS
            })
        );
        assert!(matches!(
            LatticeModel::new(1.1_f64, 0.06, 1.0, MAX_STEPS + 1),
            Err(ConfigError::InvalidStepCount { .. })
        ));
    }

    #[test]
    fn test_invalid_horizon() {
        for horizon in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                LatticeModel::new(1.1_f64, 0.06, horizon, 3),
                Err(ConfigError::InvalidHorizon { .. })
            ));
        }
    }

    #[test]
    fn test_invalid_rate() {
        assert!(matches!(
            LatticeModel::new(1.1_f64, f64::INFINITY, 1.0, 3),
            Err(ConfigError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_arbitrage_rate_too_high() {
        // e^(rΔt) = e^0.5 > u
        match LatticeModel::new(1.1_f64, 0.5, 1.0, 1) {
            Err(ConfigError::ArbitrageViolation { probability }) => assert!(probability > 1.0),
            other => panic!("Expected ArbitrageViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_arbitrage_small_up_factor() {
        // ln(1.01) < 0.04, so a single yearly step cannot outgrow the bank account
        match LatticeModel::new(1.01_f64, 0.04, 1.0, 1) {
            Err(ConfigError::ArbitrageViolation { probability }) => assert!(probability > 1.0),
            other => panic!("Expected ArbitrageViolation, got {other:?}"),
        }
        assert!(LatticeModel::new(1.01_f64, 0.04, 1.0, 10).is_ok());
    }

    #[test]
    fn test_arbitrage_rate_too_low() {
        // e^(rΔt) = e^-0.5 < d
        match LatticeModel::new(1.1_f64, -0.5, 1.0, 1) {
            Err(ConfigError::ArbitrageViolation { probability }) => assert!(probability < 0.0),
            other => panic!("Expected ArbitrageViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_rate_probability() {
        // q = (1 - d)/(u - d) = 1/(1 + u)
        let model = LatticeModel::new(1.25_f64, 0.0, 2.0, 4).unwrap();
        assert_relative_eq!(model.probability(), 1.0 / 2.25, epsilon = 1e-15);
        assert_eq!(model.discount(), 1.0);
    }

    #[test]
    fn test_from_volatility() {
        let model = LatticeModel::from_volatility(0.3_f64, 0.05, 2.0, 50).unwrap();
        assert_relative_eq!(model.up(), (0.3 * 0.04_f64.sqrt()).exp(), epsilon = 1e-14);
        assert_relative_eq!(model.dt(), 0.04, epsilon = 1e-15);
    }

    #[test]
    fn test_from_volatility_invalid() {
        assert!(matches!(
            LatticeModel::from_volatility(0.0_f64, 0.05, 1.0, 10),
            Err(ConfigError::InvalidVolatility { .. })
        ));
        assert!(matches!(
            LatticeModel::from_volatility(0.2_f64, 0.05, 1.0, 0),
            Err(ConfigError::InvalidStepCount { .. })
        ));
        assert!(matches!(
            LatticeModel::from_volatility(0.2_f64, 0.05, -1.0, 10),
            Err(ConfigError::InvalidHorizon { .. })
        ));
    }

    #[test]
    fn test_node_prices_reference() {
        let model = reference();
        let terminal: Vec<f64> = (0..=3).map(|j| model.node_price(100.0, 3, j)).collect();
        assert_relative_eq!(terminal[0], 100.0 / 1.331, epsilon = 1e-10);
        assert_relative_eq!(terminal[1], 100.0 / 1.1, epsilon = 1e-10);
        assert_relative_eq!(terminal[2], 110.0, epsilon = 1e-10);
        assert_relative_eq!(terminal[3], 133.1, epsilon = 1e-10);
    }

    #[test]
    fn test_continuation_of_constant_is_discounted_constant() {
        let model = reference();
        assert_relative_eq!(
            model.continuation(5.0, 5.0),
            5.0 * model.discount(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_f32_model() {
        let model = LatticeModel::new(1.1_f32, 0.06, 1.0, 3).unwrap();
        assert!(model.probability() > 0.5 && model.probability() < 0.6);
    }

    proptest! {
        #[test]
        fn prop_probability_in_unit_interval(
            up in 1.0001_f64..2.0,
            rate in -0.2_f64..0.2,
            horizon in 0.01_f64..10.0,
            steps in 1_usize..500,
        ) {
            match LatticeModel::new(up, rate, horizon, steps) {
                Ok(model) => {
                    prop_assert!(model.probability() >= 0.0);
                    prop_assert!(model.probability() <= 1.0);
                }
                Err(ConfigError::ArbitrageViolation { probability }) => {
                    prop_assert!(!(0.0..=1.0).contains(&probability));
                }
                Err(other) => prop_assert!(false, "unexpected error {:?}", other),
            }
        }

        #[test]
        fn prop_discounted_expectation_of_stock_is_spot(
            up in 1.01_f64..1.5,
            rate in 0.0_f64..0.05,
            steps in 1_usize..50,
        ) {
            // Martingale property under q; draws with e^(rΔt) > u admit arbitrage
            let model = LatticeModel::new(up, rate, 1.0, steps);
            prop_assume!(model.is_ok());
            let model = model.unwrap();
            let spot = 100.0;
            let expected = model.continuation(
                model.node_price(spot, 1, 1),
                model.node_price(spot, 1, 0),
            );
            prop_assert!((expected - spot).abs() < 1e-9);
        }
    }
}
