//! Option Payoff Functions
//!
//! # Mathematical Definitions
//!
//! - **Call**: max(S_T - K, 0) - right to buy at strike K
//! - **Put**: max(K - S_T, 0) - right to sell at strike K
//!
//! Payoffs only see the terminal price of each path, and payoff\[i\] depends on
//! price\[i\] alone.

use crate::error::{RiskError, RiskResult};
use std::fmt;
use std::str::FromStr;

/// Contract side of a European option
///
/// The only way to obtain an `OptionType` from untrusted input is `FromStr`,
/// which rejects anything but `call` and `put`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OptionType {
    #[default]
    Call,
    Put,
}

impl OptionType {
    /// Intrinsic value at expiry for a terminal price `s_t`
    pub fn payoff(&self, s_t: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (s_t - strike).max(0.0),
            OptionType::Put => (strike - s_t).max(0.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl FromStr for OptionType {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(RiskError::InvalidOptionType {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a terminal price ensemble to a payoff ensemble
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoffEvaluator {
    strike: f64,
    option_type: OptionType,
}

impl PayoffEvaluator {
    pub fn new(strike: f64, option_type: OptionType) -> Self {
        Self {
            strike,
            option_type,
        }
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Allocate a new payoff ensemble, index-aligned with `prices`
    pub fn evaluate(&self, prices: &[f64]) -> Vec<f64> {
        prices
            .iter()
            .map(|&s_t| self.option_type.payoff(s_t, self.strike))
            .collect()
    }
}
