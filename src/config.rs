// src/config.rs
//! Option and simulation configuration
//!
//! `OptionParams` is the raw, deserializable form of a position. It becomes an
//! immutable [`OptionSpec`] only through [`OptionParams::validate`], so an
//! unknown option type or a non-positive count is rejected before any path is
//! simulated.

use crate::error::{validation::*, RiskError, RiskResult};
use crate::mc::payoffs::OptionType;
use serde::Deserialize;
use std::path::Path;

/// Default confidence level for VaR/CVaR
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Default number of simulated paths
pub const DEFAULT_SIMULATION_COUNT: usize = 10_000;

fn default_option_type() -> String {
    OptionType::Call.to_string()
}

fn default_simulation_count() -> usize {
    DEFAULT_SIMULATION_COUNT
}

/// Raw option parameters as supplied by a caller or a configuration file
///
/// The market terms are required; only `option_type` (call) and
/// `simulation_count` fall back to defaults when a table omits them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OptionParams {
    pub strike_price: f64,
    pub spot_price: f64,
    pub volatility: f64,
    pub interest_rate: f64,
    pub days_to_expiration: u32,
    #[serde(default = "default_option_type")]
    pub option_type: String,
    #[serde(default = "default_simulation_count")]
    pub simulation_count: usize,
}

impl OptionParams {
    /// One-year call struck at 50 on a 55 spot, 20% vol, 3% rate
    pub fn example() -> Self {
        OptionParams {
            strike_price: 50.0,
            spot_price: 55.0,
            volatility: 0.2,
            interest_rate: 0.03,
            days_to_expiration: 365,
            option_type: default_option_type(),
            simulation_count: DEFAULT_SIMULATION_COUNT,
        }
    }

    /// Validate the parameters and freeze them into an [`OptionSpec`]
    pub fn validate(&self) -> RiskResult<OptionSpec> {
        let option_type: OptionType = self.option_type.parse()?;

        validate_positive("strike_price", self.strike_price)?;
        validate_finite("strike_price", self.strike_price)?;
        validate_positive("spot_price", self.spot_price)?;
        validate_finite("spot_price", self.spot_price)?;
        validate_non_negative("volatility", self.volatility)?;
        validate_finite("volatility", self.volatility)?;
        validate_finite("interest_rate", self.interest_rate)?;
        validate_steps(self.days_to_expiration)?;
        validate_paths(self.simulation_count)?;

        Ok(OptionSpec {
            strike_price: self.strike_price,
            spot_price: self.spot_price,
            volatility: self.volatility,
            interest_rate: self.interest_rate,
            days_to_expiration: self.days_to_expiration,
            option_type,
            simulation_count: self.simulation_count,
        })
    }
}

/// Validated, immutable option terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionSpec {
    strike_price: f64,
    spot_price: f64,
    volatility: f64,
    interest_rate: f64,
    days_to_expiration: u32,
    option_type: OptionType,
    simulation_count: usize,
}

impl OptionSpec {
    pub fn strike_price(&self) -> f64 {
        self.strike_price
    }

    pub fn spot_price(&self) -> f64 {
        self.spot_price
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    pub fn days_to_expiration(&self) -> u32 {
        self.days_to_expiration
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    pub fn simulation_count(&self) -> usize {
        self.simulation_count
    }
}

impl TryFrom<OptionParams> for OptionSpec {
    type Error = RiskError;

    fn try_from(params: OptionParams) -> Result<Self, Self::Error> {
        params.validate()
    }
}

impl TryFrom<&OptionParams> for OptionSpec {
    type Error = RiskError;

    fn try_from(params: &OptionParams) -> Result<Self, Self::Error> {
        params.validate()
    }
}

/// How paths are generated and reduced
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub confidence_level: f64,
    /// Pin the random source; `None` seeds from entropy
    pub seed: Option<u64>,
    pub parallel: bool,
    /// Worker threads for parallel runs; `None` uses every core
    pub threads: Option<usize>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            seed: None,
            parallel: false,
            threads: None,
        }
    }
}

impl SimulationSettings {
    pub fn validate(&self) -> RiskResult<()> {
        validate_confidence_level(self.confidence_level)?;
        if self.threads == Some(0) {
            return Err(RiskError::InvalidConfiguration {
                field: "threads".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Top-level TOML configuration
///
/// ```toml
/// [option]
/// strike_price = 50.0
/// spot_price = 55.0
/// volatility = 0.2
/// interest_rate = 0.03
/// days_to_expiration = 365
/// option_type = "put"
///
/// [simulation]
/// confidence_level = 0.99
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RiskConfig {
    pub option: OptionParams,
    #[serde(default)]
    pub simulation: SimulationSettings,
}

impl RiskConfig {
    /// The example option under default simulation settings
    pub fn example() -> Self {
        RiskConfig {
            option: OptionParams::example(),
            simulation: SimulationSettings::default(),
        }
    }

    pub fn from_toml_str(s: &str) -> RiskResult<Self> {
        toml::from_str(s).map_err(|e| RiskError::ConfigFile {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> RiskResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| RiskError::ConfigFile {
            path: display.clone(),
            reason: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| RiskError::ConfigFile {
            path: display,
            reason: e.to_string(),
        })
    }

    /// Validate both tables, returning the frozen option terms
    pub fn validate(&self) -> RiskResult<OptionSpec> {
        let spec = self.option.validate()?;
        self.simulation.validate()?;
        Ok(spec)
    }
}
