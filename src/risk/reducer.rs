// src/risk/reducer.rs
//! Value-at-Risk and Conditional VaR over a payoff ensemble
//!
//! # Loss Series
//!
//! ```text
//! loss_i = max(K - payoff_i, 0)
//! ```
//! This is the shortfall of each path's payoff against the strike, not a
//! premium-adjusted P&L. An in-the-money call whose payoff reaches K has zero
//! loss under this definition.
//!
//! # Metrics
//!
//! - **VaR**: the `(1 - c)·100`-th percentile of the loss series, linearly
//!   interpolated between the two nearest order statistics.
//! - **CVaR**: the mean of every loss `≥ VaR`.
//!
//! The percentile is read from the lower end of the loss series, so for a
//! fixed series a higher confidence level selects a lower order statistic:
//! VaR is non-increasing in `c` and CVaR averages everything above it.

use crate::error::{validation::validate_confidence_level, RiskError, RiskResult};
use tracing::{debug, warn};

/// VaR and CVaR of one position, in price units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskMetrics {
    pub var: f64,
    pub cvar: f64,
}

/// Percentile of an ascending-sorted slice with linear interpolation
///
/// `q` is in percent and is clamped to `[0, 100]`. The interpolated value is
/// kept within its two bracketing order statistics. `None` for an empty slice.
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = (q.clamp(0.0, 100.0) / 100.0) * last as f64;
    let lo = (rank.floor() as usize).min(last);
    let hi = (rank.ceil() as usize).min(last);
    let (a, b) = (sorted[lo], sorted[hi]);
    if lo == hi {
        return Some(a);
    }
    Some((a + (b - a) * (rank - lo as f64)).clamp(a, b))
}

/// Reduces payoffs to VaR/CVaR for a fixed strike
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskReducer {
    strike: f64,
}

impl RiskReducer {
    pub fn new(strike: f64) -> Self {
        Self { strike }
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Loss series `max(K - payoff, 0)`, index-aligned with `payoffs`
    pub fn losses(&self, payoffs: &[f64]) -> Vec<f64> {
        payoffs.iter().map(|p| (self.strike - p).max(0.0)).collect()
    }

    pub fn value_at_risk(&self, payoffs: &[f64], confidence_level: f64) -> RiskResult<f64> {
        Ok(self.reduce(payoffs, confidence_level)?.var)
    }

    pub fn conditional_value_at_risk(
        &self,
        payoffs: &[f64],
        confidence_level: f64,
    ) -> RiskResult<f64> {
        Ok(self.reduce(payoffs, confidence_level)?.cvar)
    }

    /// Compute VaR and CVaR from a single sort of the loss series
    pub fn reduce(&self, payoffs: &[f64], confidence_level: f64) -> RiskResult<RiskMetrics> {
        validate_confidence_level(confidence_level)?;
        if payoffs.is_empty() {
            return Err(RiskError::MonteCarloError {
                paths: 0,
                reason: "payoff ensemble is empty".to_string(),
            });
        }
        if payoffs.iter().any(|p| p.is_nan()) {
            return Err(RiskError::NumericalInstability {
                method: "loss series".to_string(),
                reason: "payoff ensemble contains NaN".to_string(),
            });
        }

        let mut losses = self.losses(payoffs);
        losses.sort_by(|a, b| a.total_cmp(b));

        let var = percentile(&losses, (1.0 - confidence_level) * 100.0).ok_or_else(|| {
            RiskError::MonteCarloError {
                paths: 0,
                reason: "loss series is empty".to_string(),
            }
        })?;
        // never empty: var <= the largest loss
        let tail = &losses[losses.partition_point(|&l| l < var)..];
        let tail_max = tail[tail.len() - 1];
        // summation rounding must not push the mean outside [var, tail_max]
        let cvar = (tail.iter().sum::<f64>() / tail.len() as f64).clamp(var, tail_max);

        if losses[0] == losses[losses.len() - 1] {
            warn!(loss = losses[0], "degenerate loss series: every path has the same loss");
        }
        if !var.is_finite() || !cvar.is_finite() {
            return Err(RiskError::NumericalInstability {
                method: "VaR/CVaR".to_string(),
                reason: format!("non-finite result (VaR = {}, CVaR = {})", var, cvar),
            });
        }
        debug!(
            paths = losses.len(),
            tail = tail.len(),
            confidence_level,
            var,
            cvar,
            "reduced loss series"
        );

        Ok(RiskMetrics { var, cvar })
    }
}
