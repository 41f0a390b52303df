//! Call/put flag and intrinsic payoff.

use std::fmt;
use std::str::FromStr;

use lattice_core::types::ContractError;
use num_traits::Float;

/// Option type.
///
/// # Variants
/// - `Call`: max(S − K, 0)
/// - `Put`: max(K − S, 0)
///
/// # Examples
/// ```
/// use lattice_models::instruments::OptionType;
///
/// assert_eq!(OptionType::Call.intrinsic(110.0_f64, 100.0), 10.0);
/// assert_eq!(OptionType::Put.intrinsic(110.0_f64, 100.0), 0.0);
/// assert_eq!("PUT".parse::<OptionType>().unwrap(), OptionType::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Call option: max(S − K, 0)
    Call,
    /// Put option: max(K − S, 0)
    Put,
}

impl OptionType {
    /// Maps an `is_call` flag to the option type.
    #[inline]
    pub fn from_is_call(is_call: bool) -> Self {
        if is_call {
            OptionType::Call
        } else {
            OptionType::Put
        }
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Immediate exercise value at spot `spot` for strike `strike`.
    #[inline]
    pub fn intrinsic<T: Float>(&self, spot: T, strike: T) -> T {
        match self {
            OptionType::Call => (spot - strike).max(T::zero()),
            OptionType::Put => (strike - spot).max(T::zero()),
        }
    }

    /// Lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(ContractError::UnknownOptionType(s.to_string())),
        }
    }
}
