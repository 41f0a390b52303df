//! Parity command implementation
//!
//! Prices a knock-in and its complementary knock-out on the same lattice and
//! reports how far their sum is from the vanilla European price.

use approx::relative_eq;
use clap::{Args, ValueEnum};
use lattice_models::instruments::{BarrierContract, BarrierType, OptionType};
use lattice_models::models::LatticeModel;
use lattice_pricing::{barrier_node, barrier_price};
use serde::Serialize;
use tracing::{info, warn};

use super::price::VanillaArgs;
use crate::config::OutputFormat;
use crate::output::{number, render, Tabular};
use crate::Result;

const PARITY_TOLERANCE: f64 = 1e-9;

/// Barrier direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Knock condition `S >= H`
    Up,
    /// Knock condition `S <= H`
    Down,
}

/// Parity check arguments
#[derive(Debug, Clone, Args)]
pub struct ParityArgs {
    #[command(flatten)]
    pub vanilla: VanillaArgs,

    /// Barrier level H
    #[arg(long)]
    pub barrier: f64,

    /// Barrier direction
    #[arg(long, value_enum)]
    pub direction: Direction,
}

/// In/out decomposition of a vanilla option
#[derive(Debug, Clone, Serialize)]
pub struct ParityReport {
    pub option_type: OptionType,
    pub spot: f64,
    pub strike: f64,
    pub barrier: f64,
    pub direction: Direction,
    pub knock_in: f64,
    pub knock_out: f64,
    pub vanilla: f64,
    pub residual: f64,
}

impl ParityReport {
    /// Whether `knock_in + knock_out` matches the vanilla price to a relative 1e-9.
    pub fn identity_holds(&self) -> bool {
        relative_eq!(
            self.knock_in + self.knock_out,
            self.vanilla,
            max_relative = PARITY_TOLERANCE
        )
    }
}

impl Tabular for ParityReport {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Type", self.option_type.to_string()),
            ("Spot", number(self.spot)),
            ("Strike", number(self.strike)),
            ("Barrier", number(self.barrier)),
            ("Knock-in", number(self.knock_in)),
            ("Knock-out", number(self.knock_out)),
            ("Vanilla", number(self.vanilla)),
            ("In + out - vanilla", format!("{:.3e}", self.residual)),
        ]
    }
}

/// Price both barrier legs and the vanilla option on `model`.
pub fn evaluate(args: &ParityArgs, model: &LatticeModel<f64>) -> Result<ParityReport> {
    let underlying = args.vanilla.contract(model.horizon())?;
    let barrier_type = BarrierType::from_flags(args.direction == Direction::Up, true);
    let knock_in = BarrierContract::new(underlying, args.barrier, barrier_type)?;

    let in_node = barrier_node(model, &knock_in)?;
    let knock_out = barrier_price(model, &knock_in.complement())?;
    let residual = in_node.knocked + knock_out - in_node.vanilla;

    let report = ParityReport {
        option_type: underlying.option_type(),
        spot: underlying.spot(),
        strike: underlying.strike(),
        barrier: args.barrier,
        direction: args.direction,
        knock_in: in_node.knocked,
        knock_out,
        vanilla: in_node.vanilla,
        residual,
    };

    if !report.identity_holds() {
        warn!(residual, "in + out differs from vanilla beyond tolerance");
    }

    Ok(report)
}

/// Run the parity command
pub fn run(args: &ParityArgs, model: &LatticeModel<f64>, format: OutputFormat) -> Result<()> {
    let report = evaluate(args, model)?;
    info!(residual = report.residual, "parity checked");

    println!("{}", render(&report, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use approx::assert_relative_eq;

    fn model() -> LatticeModel<f64> {
        LatticeModel::new(1.1, 0.06, 1.0, 3).unwrap()
    }

    fn args(put: bool, barrier: f64, direction: Direction) -> ParityArgs {
        ParityArgs {
            vanilla: VanillaArgs {
                spot: 100.0,
                strike: 100.0,
                put,
            },
            barrier,
            direction,
        }
    }

    #[test]
    fn test_up_call_decomposition() {
        let report = evaluate(&args(false, 125.0, Direction::Up), &model()).unwrap();
        assert_relative_eq!(report.knock_in, 6.145468431385595, epsilon = 1e-9);
        assert_relative_eq!(report.knock_out, 4.00026736854323, epsilon = 1e-9);
        assert_relative_eq!(report.vanilla, 10.145735799928826, epsilon = 1e-9);
        assert!(report.residual.abs() < 1e-9);
    }

    #[test]
    fn test_down_put_decomposition() {
        let report = evaluate(&args(true, 85.0, Direction::Down), &model()).unwrap();
        assert_relative_eq!(report.knock_in, 2.5810004511080553, epsilon = 1e-9);
        assert_relative_eq!(report.knock_out, 1.7411887072456533, epsilon = 1e-9);
        assert!(report.residual.abs() < 1e-9);
    }

    #[test]
    fn test_identity_below_unit_price() {
        let mut parity = args(false, 120.0, Direction::Up);
        parity.vanilla.strike = 130.0;
        let report = evaluate(&parity, &model()).unwrap();

        assert!(report.vanilla > 0.0 && report.vanilla < 1.0);
        assert!(report.identity_holds());
    }

    #[test]
    fn test_identity_tolerance_is_relative() {
        let mut report = evaluate(&args(true, 85.0, Direction::Down), &model()).unwrap();
        report.vanilla = 0.01;
        report.knock_in = 0.006;
        // Absolute gap of 5e-10 is 5e-8 relative to a 0.01 price
        report.knock_out = 0.004 + 5e-10;
        assert!(!report.identity_holds());

        report.knock_out = 0.004;
        assert!(report.identity_holds());
    }

    #[test]
    fn test_breached_barrier_has_no_out_leg() {
        let result = evaluate(&args(false, 95.0, Direction::Up), &model());
        assert!(matches!(result, Err(CliError::Pricing(_))));
    }

    #[test]
    fn test_json_direction_label() {
        let report = evaluate(&args(true, 85.0, Direction::Down), &model()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["direction"], "down");
        assert_eq!(json["option_type"], "put");
    }
}
