//! Reduction of payoff ensembles to tail-risk metrics

pub mod reducer;

pub use reducer::{percentile, RiskMetrics, RiskReducer};
