// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes reference prices for European options
//!
//! # Mathematical Foundation
//!
//! Under the same GBM dynamics the simulator uses, the risk-neutral price is
//! ```text
//! V(S,t) = e^(-rT) * E^Q[payoff(S_T)]
//! ```
//! which has a closed form in terms of the cumulative normal Φ(x). It serves
//! as a fair-value figure next to the simulated tail metrics.

use crate::math_utils::norm_cdf;
use crate::mc::payoffs::OptionType;

fn d1_d2(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> (f64, f64) {
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / (sigma * t.sqrt());
    (d1, d1 - sigma * t.sqrt())
}

/// Black-Scholes European call option price
///
/// # Formula
/// ```text
/// C(S,K,r,σ,T) = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T),   d₂ = d₁ - σ√T
/// ```
pub fn bs_call_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    s * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2)
}

/// Black-Scholes European put option price
///
/// ```text
/// P(S,K,r,σ,T) = K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)
/// ```
pub fn bs_put_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    k * (-r * t).exp() * norm_cdf(-d2) - s * norm_cdf(-d1)
}

/// Price for either side of the contract
///
/// With σ = 0 the terminal price is the forward `S e^(rT)` and the price
/// collapses to the discounted intrinsic value of that forward.
pub fn bs_price(option_type: OptionType, s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    if sigma * t.sqrt() <= f64::EPSILON {
        let forward = s * (r * t).exp();
        return (-r * t).exp() * option_type.payoff(forward, k);
    }
    match option_type {
        OptionType::Call => bs_call_price(s, k, r, sigma, t),
        OptionType::Put => bs_put_price(s, k, r, sigma, t),
    }
}
