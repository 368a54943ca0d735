// src/models/gbm.rs
//! Geometric Brownian Motion
//!
//! ```text
//! dS_t = μ S_t dt + σ S_t dW_t
//! S_{t+dt} = S_t * exp((μ - σ²/2)dt + σ√dt * Z),   Z ~ N(0,1)
//! ```

/// Trading days per year; one simulated step is one trading day
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gbm {
    pub s0: f64,
    pub mu: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(s0: f64, mu: f64, sigma: f64) -> Self {
        Gbm { s0, mu, sigma }
    }

    pub fn exact_step(&self, s_t: f64, dt: f64, normal_draw: f64) -> f64 {
        s_t * ((self.mu - 0.5 * self.sigma * self.sigma) * dt
            + self.sigma * dt.sqrt() * normal_draw)
            .exp()
    }

    /// Deterministic terminal price after `steps` steps of size `dt` when σ = 0
    pub fn riskless_terminal(&self, dt: f64, steps: u32) -> f64 {
        self.s0 * (self.mu * dt * steps as f64).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_draw_step_is_drift_only() {
        let gbm = Gbm::new(55.0, 0.03, 0.2);
        let dt = 1.0 / TRADING_DAYS_PER_YEAR;
        let next = gbm.exact_step(55.0, dt, 0.0);
        assert_relative_eq!(next, 55.0 * ((0.03 - 0.02) * dt).exp(), max_relative = 1e-15);
    }

    #[test]
    fn test_zero_volatility_steps_compound_to_riskless() {
        let gbm = Gbm::new(100.0, 0.05, 0.0);
        let dt = 1.0 / TRADING_DAYS_PER_YEAR;
        let s = (0..252).fold(gbm.s0, |s, _| gbm.exact_step(s, dt, 1.7));
        assert_relative_eq!(s, gbm.riskless_terminal(dt, 252), max_relative = 1e-12);
        assert_relative_eq!(s, 100.0 * 0.05f64.exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_step_stays_positive() {
        let gbm = Gbm::new(1.0, 0.0, 3.0);
        let dt = 1.0 / TRADING_DAYS_PER_YEAR;
        assert!(gbm.exact_step(1.0, dt, -8.0) > 0.0);
    }
}
