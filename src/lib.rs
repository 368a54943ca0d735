//! # energy-risk: Monte Carlo VaR and CVaR for energy options
//!
//! Estimates the downside risk of a single European option on an energy
//! underlying by simulating terminal prices under geometric Brownian motion,
//! mapping them to payoffs and reducing the payoff distribution to
//! Value-at-Risk and Conditional VaR.
//!
//! ## Pipeline
//!
//! - **PathSimulator** ([`mc::simulator`]): daily-stepped GBM, `dt = 1/252`
//! - **PayoffEvaluator** ([`mc::payoffs`]): `max(S_T - K, 0)` / `max(K - S_T, 0)`
//! - **RiskReducer** ([`risk`]): percentile VaR and tail-mean CVaR
//! - **RiskCalculator** ([`calculator`]): owns the option terms and wires the stages
//!
//! ## Quick Start
//!
//! ```rust
//! use energy_risk::config::OptionParams;
//! use energy_risk::RiskCalculator;
//!
//! let params = OptionParams {
//!     strike_price: 50.0,
//!     spot_price: 55.0,
//!     volatility: 0.2,
//!     interest_rate: 0.03,
//!     days_to_expiration: 365,
//!     option_type: "call".to_string(),
//!     simulation_count: 10_000,
//! };
//!
//! let calculator = RiskCalculator::from_params(&params)
//!     .expect("Valid parameters")
//!     .with_seed(42);
//! let metrics = calculator.compute().expect("Valid confidence level");
//! assert!(metrics.cvar >= metrics.var);
//! ```

// Module declarations
pub mod analytics;
pub mod calculator;
pub mod config;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod output;
pub mod rng;
pub mod risk;

// Re-export commonly used types for convenience
pub use calculator::{RiskCalculator, SimulationRun};
pub use config::{OptionParams, OptionSpec, RiskConfig};
pub use error::{RiskError, RiskResult};
pub use mc::payoffs::OptionType;
pub use risk::RiskMetrics;
