//! Lattice CLI - Command Line Pricing on a Binomial Lattice
//!
//! Operational entry point for the lattice pricing crates.
//!
//! # Commands
//!
//! - `lattice price european --spot 100 --strike 100` - European option
//! - `lattice price american --spot 100 --strike 100 --put --boundary` - American option
//! - `lattice price barrier --spot 100 --strike 100 --barrier 125 --barrier-type up-and-out`
//! - `lattice parity --spot 100 --strike 100 --barrier 125 --direction up` - in/out decomposition
//!
//! # Architecture
//!
//! As the **S**ervice layer, this crate turns scalar inputs into a
//! `LatticeModel` and contract, calls the pricing layer and formats the result.

use std::path::Path;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::parity::ParityArgs;
use commands::price::PriceStyle;
use config::{CliConfig, OutputFormat};

/// Binomial lattice option pricer
#[derive(Parser)]
#[command(name = "lattice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "lattice.toml")]
    config: String,

    /// Output format (overrides the configuration file)
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(flatten)]
    lattice: LatticeArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Lattice flags overriding the configuration file
#[derive(Debug, Clone, Default, Args)]
pub struct LatticeArgs {
    /// Up factor u (d = 1/u)
    #[arg(long, global = true)]
    pub up: Option<f64>,

    /// Volatility for the CRR up factor u = exp(sigma * sqrt(dt))
    #[arg(long, global = true, conflicts_with = "up")]
    pub volatility: Option<f64>,

    /// Continuously compounded annual rate
    #[arg(long, global = true)]
    pub rate: Option<f64>,

    /// Lattice horizon and option maturity in years
    #[arg(long, global = true)]
    pub maturity: Option<f64>,

    /// Number of time steps
    #[arg(long, global = true)]
    pub steps: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a single option
    Price {
        #[command(subcommand)]
        style: PriceStyle,
    },

    /// Check that knock-in plus knock-out equals the vanilla price
    Parity(ParityArgs),
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load_or_default(Path::new(&cli.config))
        .and_then(CliConfig::with_env_override)
        .with_context(|| format!("loading configuration from {}", cli.config))?
        .with_cli_override(&cli.lattice);
    config.validate()?;

    init_tracing(if cli.verbose { "debug" } else { config.log_level.as_str() });

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let model = config.lattice.build_model().map_err(CliError::from)?;
    let format = cli.format.unwrap_or(config.format);

    match &cli.command {
        Commands::Price { style } => commands::price::run(style, &model, format)?,
        Commands::Parity(args) => commands::parity::run(args, &model, format)?,
    }

    Ok(())
}
