//! CLI configuration management.
//!
//! Settings are layered, later layers winning:
//!
//! 1. built-in defaults (the `u = 1.1, r = 0.06, T = 1, N = 3` reference lattice)
//! 2. a TOML file (`lattice.toml` unless `--config` says otherwise), if present
//! 3. `LATTICE_*` environment variables
//! 4. command-line flags
//!
//! ```toml
//! log_level = "info"
//! format = "table"
//!
//! [lattice]
//! up = 1.1
//! rate = 0.06
//! maturity = 1.0
//! steps = 3
//! # volatility = 0.2   # CRR up factor, replaces `up`
//! ```

use std::path::Path;

use lattice_core::types::ConfigError as ModelError;
use lattice_models::models::{LatticeModel, MAX_STEPS};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::LatticeArgs;

/// Output format for pricing results
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Boxed key/value table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Lattice parameters shared by every command
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LatticeSettings {
    /// Up factor `u`
    pub up: f64,
    /// Continuously compounded annual rate
    pub rate: f64,
    /// Lattice horizon in years, also the contract maturity
    pub maturity: f64,
    /// Number of time steps
    pub steps: usize,
    /// Volatility for the CRR up factor; overrides `up` when set
    pub volatility: Option<f64>,
}

impl Default for LatticeSettings {
    fn default() -> Self {
        Self {
            up: 1.1,
            rate: 0.06,
            maturity: 1.0,
            steps: 3,
            volatility: None,
        }
    }
}

impl LatticeSettings {
    /// Builds the lattice these settings describe.
    pub fn build_model(&self) -> Result<LatticeModel<f64>, ModelError> {
        let model = match self.volatility {
            Some(volatility) => {
                LatticeModel::from_volatility(volatility, self.rate, self.maturity, self.steps)?
            }
            None => LatticeModel::new(self.up, self.rate, self.maturity, self.steps)?,
        };
        debug!(
            up = model.up(),
            probability = model.probability(),
            steps = model.steps(),
            "lattice built"
        );
        Ok(model)
    }
}

/// CLI configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CliConfig {
    /// Lattice parameters
    #[serde(default)]
    pub lattice: LatticeSettings,

    /// Log level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            lattice: LatticeSettings::default(),
            log_level: default_log_level(),
            format: OutputFormat::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply `LATTICE_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Recognised keys: `LATTICE_UP`, `LATTICE_RATE`, `LATTICE_MATURITY`,
    /// `LATTICE_STEPS`, `LATTICE_VOLATILITY`, `LATTICE_LOG_LEVEL`, `LATTICE_FORMAT`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(up) = lookup("LATTICE_UP") {
            self.lattice.up = parse_var("LATTICE_UP", &up)?;
        }

        if let Some(rate) = lookup("LATTICE_RATE") {
            self.lattice.rate = parse_var("LATTICE_RATE", &rate)?;
        }

        if let Some(maturity) = lookup("LATTICE_MATURITY") {
            self.lattice.maturity = parse_var("LATTICE_MATURITY", &maturity)?;
        }

        if let Some(steps) = lookup("LATTICE_STEPS") {
            self.lattice.steps = parse_var("LATTICE_STEPS", &steps)?;
        }

        if let Some(volatility) = lookup("LATTICE_VOLATILITY") {
            self.lattice.volatility = Some(parse_var("LATTICE_VOLATILITY", &volatility)?);
        }

        if let Some(log_level) = lookup("LATTICE_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(format) = lookup("LATTICE_FORMAT") {
            self.format = match format.to_lowercase().as_str() {
                "table" => OutputFormat::Table,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::Parse(format!(
                        "LATTICE_FORMAT '{}' is not one of: table, json",
                        format
                    )))
                }
            };
        }

        Ok(self)
    }

    /// Apply command-line lattice flags
    pub fn with_cli_override(mut self, args: &LatticeArgs) -> Self {
        if let Some(up) = args.up {
            self.lattice.up = up;
            // An explicit up factor beats a CRR volatility from lower layers
            self.lattice.volatility = None;
        }
        if let Some(volatility) = args.volatility {
            self.lattice.volatility = Some(volatility);
        }
        if let Some(rate) = args.rate {
            self.lattice.rate = rate;
        }
        if let Some(maturity) = args.maturity {
            self.lattice.maturity = maturity;
        }
        if let Some(steps) = args.steps {
            self.lattice.steps = steps;
        }
        self
    }

    /// Validate the configuration, reporting every problem at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        let lattice = &self.lattice;
        match lattice.volatility {
            Some(volatility) if !(volatility.is_finite() && volatility > 0.0) => {
                errors.push(format!("volatility {} must be finite and positive", volatility));
            }
            Some(_) => {}
            None if !(lattice.up.is_finite() && lattice.up > 1.0) => {
                errors.push(format!("up factor {} must be finite and greater than 1", lattice.up));
            }
            None => {}
        }

        if !lattice.rate.is_finite() {
            errors.push(format!("rate {} must be finite", lattice.rate));
        }

        if !(lattice.maturity.is_finite() && lattice.maturity > 0.0) {
            errors.push(format!("maturity {} must be finite and positive", lattice.maturity));
        }

        if lattice.steps == 0 {
            errors.push("steps must be greater than 0".to_string());
        }
        if lattice.steps > MAX_STEPS {
            errors.push(format!(
                "steps {} exceeds maximum allowed ({})",
                lattice.steps, MAX_STEPS
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Parse(format!("{} has unparsable value '{}'", key, value)))
}

/// Configuration error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file or environment
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
