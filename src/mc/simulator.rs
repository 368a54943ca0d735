// src/mc/simulator.rs
//! Terminal price ensembles under daily-stepped GBM
//!
//! # Algorithm
//!
//! With `dt = 1/252` and `n = days_to_expiration`:
//! ```text
//! S_0 = spot
//! S_{k+1} = S_k * exp((r - σ²/2)dt + σ√dt * Z_k),   Z_k ~ N(0,1) i.i.d.
//! ```
//! Only `S_n` is kept per path. The update is evaluated for every step even
//! when σ = 0, in which case every path lands on `spot * exp(r * n/252)`.
//!
//! # Random Sources
//!
//! - [`PathSimulator::simulate_with`] draws every variate from one injected
//!   generator, path after path.
//! - [`PathSimulator::simulate_parallel`] gives each path its own stream from an
//!   [`RngFactory`], so the ensemble is the same for any rayon thread count.

use crate::config::OptionSpec;
use crate::models::gbm::{Gbm, TRADING_DAYS_PER_YEAR};
use crate::rng::{self, RngFactory};
use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

/// Generates independent terminal prices for one option position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSimulator {
    model: Gbm,
    steps: u32,
    paths: usize,
    dt: f64,
}

impl PathSimulator {
    pub fn new(spec: &OptionSpec) -> Self {
        PathSimulator {
            model: Gbm::new(spec.spot_price(), spec.interest_rate(), spec.volatility()),
            steps: spec.days_to_expiration(),
            paths: spec.simulation_count(),
            dt: 1.0 / TRADING_DAYS_PER_YEAR,
        }
    }

    pub fn model(&self) -> &Gbm {
        &self.model
    }

    pub fn paths(&self) -> usize {
        self.paths
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Terminal price that every path reaches when volatility is zero
    pub fn riskless_terminal(&self) -> f64 {
        self.model.riskless_terminal(self.dt, self.steps)
    }

    /// Simulate a single path to expiry, consuming `steps` normal draws
    pub fn simulate_path<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let mut s = self.model.s0;
        for _ in 0..self.steps {
            let z = rng::get_normal_draw(rng);
            s = self.model.exact_step(s, self.dt, z);
        }
        s
    }

    /// Lazy, finite sequence of terminal prices drawn from `rng`
    ///
    /// Each call starts a fresh sequence of `paths` prices.
    pub fn terminal_prices<'a, R: Rng + ?Sized>(
        &'a self,
        rng: &'a mut R,
    ) -> TerminalPrices<'a, R> {
        TerminalPrices {
            simulator: self,
            rng,
            remaining: self.paths,
        }
    }

    /// Price ensemble drawn sequentially from an injected generator
    pub fn simulate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        debug!(paths = self.paths, steps = self.steps, "simulating paths sequentially");
        self.terminal_prices(rng).collect()
    }

    /// Price ensemble generated with rayon, one independent stream per path
    pub fn simulate_parallel(&self, factory: &RngFactory) -> Vec<f64> {
        debug!(
            paths = self.paths,
            steps = self.steps,
            threads = rayon::current_num_threads(),
            "simulating paths in parallel"
        );
        (0..self.paths)
            .into_par_iter()
            .map(|i| {
                let mut rng = factory.create_path_rng(i as u64);
                self.simulate_path(&mut rng)
            })
            .collect()
    }
}

/// Iterator returned by [`PathSimulator::terminal_prices`]
pub struct TerminalPrices<'a, R: Rng + ?Sized> {
    simulator: &'a PathSimulator,
    rng: &'a mut R,
    remaining: usize,
}

impl<R: Rng + ?Sized> Iterator for TerminalPrices<'_, R> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.simulator.simulate_path(&mut *self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: Rng + ?Sized> ExactSizeIterator for TerminalPrices<'_, R> {}
