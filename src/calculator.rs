// src/calculator.rs
//! Risk calculator facade
//!
//! Owns one validated [`OptionSpec`] and runs the pipeline
//! ```text
//! PathSimulator → PayoffEvaluator → RiskReducer
//! ```
//! synchronously on every call. Each call draws fresh ensembles; nothing is
//! cached between calls, and any stage error is returned unchanged.

use crate::analytics::bs_analytic;
use crate::config::{OptionParams, OptionSpec, RiskConfig, DEFAULT_CONFIDENCE_LEVEL};
use crate::error::{validation::validate_confidence_level, RiskResult};
use crate::math_utils::Timer;
use crate::mc::payoffs::PayoffEvaluator;
use crate::mc::simulator::PathSimulator;
use crate::models::gbm::TRADING_DAYS_PER_YEAR;
use crate::rng::{self, RngFactory};
use crate::risk::{RiskMetrics, RiskReducer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// Ensembles and metrics of one pipeline run, for callers that keep them
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRun {
    pub prices: Vec<f64>,
    pub payoffs: Vec<f64>,
    pub metrics: RiskMetrics,
    pub confidence_level: f64,
    strike: f64,
}

impl SimulationRun {
    /// Loss series the metrics were reduced from
    pub fn losses(&self) -> Vec<f64> {
        RiskReducer::new(self.strike).losses(&self.payoffs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskCalculator {
    spec: OptionSpec,
    seed: Option<u64>,
    parallel: bool,
}

impl RiskCalculator {
    pub fn new(spec: OptionSpec) -> Self {
        RiskCalculator {
            spec,
            seed: None,
            parallel: false,
        }
    }

    pub fn from_params(params: &OptionParams) -> RiskResult<Self> {
        Ok(Self::new(params.validate()?))
    }

    /// Build from a file configuration, applying its seed and parallel flag
    pub fn from_config(config: &RiskConfig) -> RiskResult<Self> {
        let spec = config.validate()?;
        let calculator = Self::new(spec).parallel(config.simulation.parallel);
        Ok(match config.simulation.seed {
            Some(seed) => calculator.with_seed(seed),
            None => calculator,
        })
    }

    /// Pin the random source so every call reproduces the same ensembles
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Generate paths on the rayon pool instead of the calling thread
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn spec(&self) -> &OptionSpec {
        &self.spec
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn simulator(&self) -> PathSimulator {
        PathSimulator::new(&self.spec)
    }

    pub fn payoff_evaluator(&self) -> PayoffEvaluator {
        PayoffEvaluator::new(self.spec.strike_price(), self.spec.option_type())
    }

    pub fn reducer(&self) -> RiskReducer {
        RiskReducer::new(self.spec.strike_price())
    }

    /// Fresh terminal price ensemble
    pub fn simulate_prices(&self) -> Vec<f64> {
        let simulator = self.simulator();
        match (self.parallel, self.seed) {
            (true, Some(seed)) => simulator.simulate_parallel(&RngFactory::new(seed)),
            (true, None) => simulator.simulate_parallel(&RngFactory::from_entropy()),
            (false, Some(seed)) => simulator.simulate_with(&mut rng::seed_rng_from_u64(seed)),
            (false, None) => simulator.simulate_with(&mut StdRng::from_entropy()),
        }
    }

    /// Run the full pipeline and keep the intermediate ensembles
    pub fn run(&self, confidence_level: f64) -> RiskResult<SimulationRun> {
        validate_confidence_level(confidence_level)?;
        let timer = Timer::new();

        let prices = self.simulate_prices();
        let payoffs = self.payoff_evaluator().evaluate(&prices);
        let metrics = self.reducer().reduce(&payoffs, confidence_level)?;

        info!(
            option_type = %self.spec.option_type(),
            paths = prices.len(),
            confidence_level,
            var = metrics.var,
            cvar = metrics.cvar,
            elapsed_ms = timer.elapsed_ms(),
            "computed risk metrics"
        );

        Ok(SimulationRun {
            prices,
            payoffs,
            metrics,
            confidence_level,
            strike: self.spec.strike_price(),
        })
    }

    pub fn compute_risk_metrics(&self, confidence_level: f64) -> RiskResult<RiskMetrics> {
        Ok(self.run(confidence_level)?.metrics)
    }

    /// VaR/CVaR at the default 95% confidence level
    pub fn compute(&self) -> RiskResult<RiskMetrics> {
        self.compute_risk_metrics(DEFAULT_CONFIDENCE_LEVEL)
    }

    /// Black-Scholes fair value over the same horizon, `days / 252` years
    pub fn analytic_premium(&self) -> f64 {
        let t = self.spec.days_to_expiration() as f64 / TRADING_DAYS_PER_YEAR;
        bs_analytic::bs_price(
            self.spec.option_type(),
            self.spec.spot_price(),
            self.spec.strike_price(),
            self.spec.interest_rate(),
            self.spec.volatility(),
            t,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RiskError;
    use approx::assert_relative_eq;

    fn calculator(params: OptionParams) -> RiskCalculator {
        RiskCalculator::from_params(&params).unwrap()
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let calc = calculator(OptionParams {
            simulation_count: 2_000,
            ..OptionParams::example()
        })
        .with_seed(11);

        let a = calc.run(0.95).unwrap();
        let b = calc.run(0.95).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeded_parallel_runs_are_identical() {
        let calc = calculator(OptionParams {
            simulation_count: 2_000,
            ..OptionParams::example()
        })
        .with_seed(11)
        .parallel(true);

        assert_eq!(calc.compute().unwrap(), calc.compute().unwrap());
    }

    #[test]
    fn test_invalid_confidence_level_fails_before_simulating() {
        let calc = calculator(OptionParams::example()).with_seed(1);
        assert!(matches!(
            calc.compute_risk_metrics(1.0),
            Err(RiskError::InvalidConfidenceLevel { .. })
        ));
    }

    #[test]
    fn test_run_ensembles_are_aligned() {
        let calc = calculator(OptionParams {
            simulation_count: 300,
            option_type: "put".to_string(),
            ..OptionParams::example()
        })
        .with_seed(5);

        let run = calc.run(0.9).unwrap();
        assert_eq!(run.prices.len(), 300);
        assert_eq!(run.payoffs.len(), 300);
        assert_eq!(run.losses().len(), 300);
        for (s_t, payoff) in run.prices.iter().zip(&run.payoffs) {
            assert_eq!(*payoff, (50.0 - s_t).max(0.0));
        }
    }

    #[test]
    fn test_from_config_applies_simulation_table() {
        let mut cfg = RiskConfig::example();
        cfg.simulation.seed = Some(3);
        cfg.simulation.parallel = true;
        let calc = RiskCalculator::from_config(&cfg).unwrap();
        assert_eq!(calc.seed(), Some(3));
        assert!(calc.is_parallel());
    }

    #[test]
    fn test_analytic_premium_call() {
        let calc = calculator(OptionParams::example());
        let t = 365.0 / 252.0;
        assert_relative_eq!(
            calc.analytic_premium(),
            bs_analytic::bs_call_price(55.0, 50.0, 0.03, 0.2, t),
            max_relative = 1e-12
        );
    }
}
