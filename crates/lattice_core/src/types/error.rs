//! Error types for structured error handling.
//!
//! This module provides:
//! - `ConfigError`: Invalid lattice parameters (fatal, no partial result)
//! - `ContractError`: Invalid contract terms or contract/lattice mismatch
//! - `PricingError`: Umbrella error returned by the pricing engines

use thiserror::Error;

/// Lattice configuration errors.
///
/// Raised when a `LatticeModel` cannot be built from the supplied scalars.
/// Every failure mode has its own variant; no input is ever clamped.
///
/// # Variants
/// - `InvalidUpFactor`: `u <= 1` or non-finite
/// - `InvalidStepCount`: `N == 0` or above the supported maximum
/// - `InvalidHorizon`: `T <= 0` or non-finite
/// - `InvalidRate`: non-finite rate
/// - `InvalidVolatility`: `sigma <= 0` or non-finite (CRR construction only)
/// - `ArbitrageViolation`: risk-neutral probability outside `[0, 1]`
///
/// # Examples
/// ```
/// use lattice_core::types::ConfigError;
///
/// let err = ConfigError::ArbitrageViolation { probability: 1.5 };
/// assert!(format!("{}", err).contains("q = 1.5"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    /// Up factor does not describe an up-move.
    #[error("Invalid up factor: u = {up} (must be finite and greater than 1)")]
    InvalidUpFactor {
        /// The invalid up factor
        up: f64,
    },

    /// Step count outside `[1, max]`.
    #[error("Invalid step count {steps}: must be in range [1, {max}]")]
    InvalidStepCount {
        /// The invalid step count
        steps: usize,
        /// Largest supported step count
        max: usize,
    },

    /// Horizon is not a positive finite time.
    #[error("Invalid horizon: T = {horizon} (must be finite and positive)")]
    InvalidHorizon {
        /// The invalid horizon in years
        horizon: f64,
    },

    /// Risk-free rate is not finite.
    #[error("Invalid rate: r = {rate} (must be finite)")]
    InvalidRate {
        /// The invalid rate
        rate: f64,
    },

    /// Volatility is not a positive finite number.
    #[error("Invalid volatility: sigma = {volatility} (must be finite and positive)")]
    InvalidVolatility {
        /// The invalid volatility
        volatility: f64,
    },

    /// Derived risk-neutral probability admits arbitrage.
    #[error("Arbitrage violation: risk-neutral probability q = {probability} outside [0, 1]")]
    ArbitrageViolation {
        /// The derived probability
        probability: f64,
    },
}

/// Contract errors.
///
/// Raised when contract terms are invalid on their own, or inconsistent with
/// the lattice they are priced on.
///
/// # Examples
/// ```
/// use lattice_core::types::ContractError;
///
/// let err = ContractError::InvalidStrike { strike: -100.0 };
/// assert_eq!(format!("{}", err), "Invalid strike: K = -100");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContractError {
    /// Spot price is non-positive or non-finite.
    #[error("Invalid spot: S0 = {spot}")]
    InvalidSpot {
        /// The invalid spot
        spot: f64,
    },

    /// Strike price is non-positive or non-finite.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike
        strike: f64,
    },

    /// Maturity is non-positive or non-finite.
    #[error("Invalid maturity: T = {maturity}")]
    InvalidMaturity {
        /// The invalid maturity
        maturity: f64,
    },

    /// Barrier level is non-positive or non-finite.
    #[error("Invalid barrier: H = {barrier}")]
    InvalidBarrier {
        /// The invalid barrier level
        barrier: f64,
    },

    /// Option type string not recognised.
    #[error("Unknown option type '{0}': expected 'call' or 'put'")]
    UnknownOptionType(String),

    /// Barrier type string not recognised.
    #[error("Unknown barrier type '{0}': expected up-and-in, up-and-out, down-and-in or down-and-out")]
    UnknownBarrierType(String),

    /// Contract maturity differs from the lattice horizon.
    #[error("Option maturity T = {contract} does not match model maturity T = {model}")]
    MaturityMismatch {
        /// Contract maturity
        contract: f64,
        /// Lattice horizon
        model: f64,
    },

    /// Knock-out barrier already touched at the valuation date.
    #[error("Barrier already breached at inception: S0 = {spot}, H = {barrier} ({barrier_type})")]
    BarrierBreachedAtInception {
        /// Spot price
        spot: f64,
        /// Barrier level
        barrier: f64,
        /// Barrier type label, e.g. "up-and-out"
        barrier_type: String,
    },
}

/// Umbrella error returned by the pricing engines.
///
/// # Examples
/// ```
/// use lattice_core::types::{ContractError, PricingError};
///
/// let err: PricingError = ContractError::InvalidSpot { spot: 0.0 }.into();
/// assert!(matches!(err, PricingError::Contract(_)));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingError {
    /// Lattice configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Contract error.
    #[error("Contract error: {0}")]
    Contract(#[from] ContractError),
}

impl PricingError {
    /// Returns true if the error stems from lattice configuration.
    #[inline]
    pub fn is_config(&self) -> bool {
        matches!(self, PricingError::Config(_))
    }

    /// Returns true if the error stems from contract terms.
    #[inline]
    pub fn is_contract(&self) -> bool {
        matches!(self, PricingError::Contract(_))
    }
}
