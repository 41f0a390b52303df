//! Barrier type definitions.
//!
//! - **Up-and-In**: activates once the monitored price is at or above the barrier
//! - **Up-and-Out**: dies once the monitored price is at or above the barrier
//! - **Down-and-In**: activates once the monitored price is at or below the barrier
//! - **Down-and-Out**: dies once the monitored price is at or below the barrier
//!
//! Monitoring is discrete: the price is checked once per lattice step.

use std::fmt;
use std::str::FromStr;

use lattice_core::types::ContractError;
use num_traits::Float;

/// Barrier type enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BarrierType {
    /// Up-and-In: activates when price reaches the barrier from below
    UpAndIn,
    /// Up-and-Out: deactivates when price reaches the barrier from below
    UpAndOut,
    /// Down-and-In: activates when price reaches the barrier from above
    DownAndIn,
    /// Down-and-Out: deactivates when price reaches the barrier from above
    DownAndOut,
}

impl BarrierType {
    /// Builds a barrier type from direction and action flags.
    #[inline]
    pub fn from_flags(is_up: bool, is_in: bool) -> Self {
        match (is_up, is_in) {
            (true, true) => BarrierType::UpAndIn,
            (true, false) => BarrierType::UpAndOut,
            (false, true) => BarrierType::DownAndIn,
            (false, false) => BarrierType::DownAndOut,
        }
    }

    /// Returns true if this is an "up" barrier.
    #[inline]
    pub fn is_up(&self) -> bool {
        matches!(self, BarrierType::UpAndIn | BarrierType::UpAndOut)
    }

    /// Returns true if this is a knock-in barrier.
    #[inline]
    pub fn is_in(&self) -> bool {
        matches!(self, BarrierType::UpAndIn | BarrierType::DownAndIn)
    }

    /// Returns true if this is a knock-out barrier.
    #[inline]
    pub fn is_out(&self) -> bool {
        !self.is_in()
    }

    /// The barrier with the same direction and the opposite action.
    ///
    /// A knock-in and its complementary knock-out sum to the vanilla option.
    #[inline]
    pub fn complement(&self) -> Self {
        BarrierType::from_flags(self.is_up(), !self.is_in())
    }

    /// Knock condition: price at or beyond the barrier in the barrier's direction.
    ///
    /// # Examples
    /// ```
    /// use lattice_models::instruments::BarrierType;
    ///
    /// assert!(BarrierType::UpAndOut.is_breached(125.0_f64, 125.0));
    /// assert!(!BarrierType::UpAndOut.is_breached(121.0_f64, 125.0));
    /// assert!(BarrierType::DownAndIn.is_breached(80.0_f64, 85.0));
    /// ```
    #[inline]
    pub fn is_breached<T: Float>(&self, spot: T, barrier: T) -> bool {
        if self.is_up() {
            spot >= barrier
        } else {
            spot <= barrier
        }
    }

    /// Kebab-case label, e.g. `"up-and-out"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BarrierType::UpAndIn => "up-and-in",
            BarrierType::UpAndOut => "up-and-out",
            BarrierType::DownAndIn => "down-and-in",
            BarrierType::DownAndOut => "down-and-out",
        }
    }
}

impl fmt::Display for BarrierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BarrierType {
    type Err = ContractError;

    /// Accepts `up-and-out`, `up_and_out`, `UpAndOut`, `up-out` and `uo` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "upandin" | "upin" | "ui" => Ok(BarrierType::UpAndIn),
            "upandout" | "upout" | "uo" => Ok(BarrierType::UpAndOut),
            "downandin" | "downin" | "di" => Ok(BarrierType::DownAndIn),
            "downandout" | "downout" | "do" => Ok(BarrierType::DownAndOut),
            _ => Err(ContractError::UnknownBarrierType(s.to_string())),
        }
    }
}
