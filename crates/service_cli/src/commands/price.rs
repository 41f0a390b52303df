//! Price command implementation
//!
//! Prices a single European, American or barrier option on the configured lattice.

use clap::{Args, Subcommand};
use lattice_core::types::ContractError;
use lattice_models::instruments::{BarrierContract, BarrierType, OptionContract, OptionType};
use lattice_models::models::LatticeModel;
use lattice_pricing::{american_exercise_boundary, LatticeInstrument};
use serde::Serialize;
use tracing::info;

use crate::config::OutputFormat;
use crate::output::{number, render, Tabular};
use crate::Result;

/// Vanilla contract terms
#[derive(Debug, Clone, Args)]
pub struct VanillaArgs {
    /// Spot price S0
    #[arg(long)]
    pub spot: f64,

    /// Strike price K
    #[arg(long)]
    pub strike: f64,

    /// Price a put instead of a call
    #[arg(long)]
    pub put: bool,
}

impl VanillaArgs {
    /// Contract maturing at the lattice horizon.
    pub fn contract(&self, maturity: f64) -> std::result::Result<OptionContract<f64>, ContractError> {
        OptionContract::new(
            self.spot,
            self.strike,
            maturity,
            OptionType::from_is_call(!self.put),
        )
    }
}

/// Barrier contract terms
#[derive(Debug, Clone, Args)]
pub struct BarrierArgs {
    #[command(flatten)]
    pub vanilla: VanillaArgs,

    /// Barrier level H
    #[arg(long)]
    pub barrier: f64,

    /// Barrier type (up-and-in, up-and-out, down-and-in, down-and-out)
    #[arg(long)]
    pub barrier_type: BarrierType,
}

/// Exercise style to price
#[derive(Debug, Clone, Subcommand)]
pub enum PriceStyle {
    /// Exercise at maturity only
    European(VanillaArgs),

    /// Exercise at any step
    American {
        #[command(flatten)]
        vanilla: VanillaArgs,

        /// Also report the nodes where early exercise is optimal
        #[arg(long)]
        boundary: bool,
    },

    /// European exercise with a discretely monitored barrier
    Barrier(BarrierArgs),
}

impl PriceStyle {
    fn instrument(&self, maturity: f64) -> Result<LatticeInstrument<f64>> {
        let instrument = match self {
            PriceStyle::European(vanilla) => LatticeInstrument::European(vanilla.contract(maturity)?),
            PriceStyle::American { vanilla, .. } => {
                LatticeInstrument::American(vanilla.contract(maturity)?)
            }
            PriceStyle::Barrier(args) => {
                let underlying = args.vanilla.contract(maturity)?;
                BarrierContract::new(underlying, args.barrier, args.barrier_type)?.into()
            }
        };
        Ok(instrument)
    }
}

/// Pricing result
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub style: &'static str,
    pub option_type: OptionType,
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barrier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barrier_type: Option<BarrierType>,
    pub steps: usize,
    pub up: f64,
    pub probability: f64,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_boundary: Option<Vec<Vec<usize>>>,
}

impl Tabular for PriceReport {
    fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Style", self.style.to_string()),
            ("Type", self.option_type.to_string()),
            ("Spot", number(self.spot)),
            ("Strike", number(self.strike)),
            ("Maturity", number(self.maturity)),
        ];
        if let (Some(barrier), Some(barrier_type)) = (self.barrier, self.barrier_type) {
            rows.push(("Barrier", number(barrier)));
            rows.push(("Barrier type", barrier_type.to_string()));
        }
        rows.push(("Steps", self.steps.to_string()));
        rows.push(("Up factor", number(self.up)));
        rows.push(("q", number(self.probability)));
        rows.push(("Price", number(self.price)));
        if let Some(ranks) = &self.exercise_boundary {
            let exercised = ranks.iter().enumerate().filter(|(_, n)| !n.is_empty());
            for (i, (step, nodes)) in exercised.enumerate() {
                let key = if i == 0 { "Exercise" } else { "" };
                rows.push((key, format!("step {}: {:?}", step, nodes)));
            }
        }
        rows
    }
}

/// Price one option on `model`.
pub fn evaluate(style: &PriceStyle, model: &LatticeModel<f64>) -> Result<PriceReport> {
    let instrument = style.instrument(model.horizon())?;
    let price = instrument.price(model)?;

    let exercise_boundary = match (style, &instrument) {
        (PriceStyle::American { boundary: true, .. }, LatticeInstrument::American(contract)) => {
            Some(american_exercise_boundary(model, contract)?)
        }
        _ => None,
    };

    let (barrier, barrier_type) = match &instrument {
        LatticeInstrument::Barrier(contract) => {
            (Some(contract.barrier()), Some(contract.barrier_type()))
        }
        _ => (None, None),
    };

    let underlying = instrument.underlying();
    Ok(PriceReport {
        style: instrument.style(),
        option_type: underlying.option_type(),
        spot: underlying.spot(),
        strike: underlying.strike(),
        maturity: underlying.maturity(),
        barrier,
        barrier_type,
        steps: model.steps(),
        up: model.up(),
        probability: model.probability(),
        price,
        exercise_boundary,
    })
}

/// Run the price command
pub fn run(style: &PriceStyle, model: &LatticeModel<f64>, format: OutputFormat) -> Result<()> {
    let report = evaluate(style, model)?;
    info!(
        style = report.style,
        option_type = %report.option_type,
        price = report.price,
        "priced"
    );

    println!("{}", render(&report, format)?);
    Ok(())
}
