// src/error.rs
use thiserror::Error;

/// Error types for the energy-risk library
#[derive(Debug, Clone, Error)]
pub enum RiskError {
    /// Option type outside {call, put}
    #[error("Invalid option type '{value}': must be 'call' or 'put'")]
    InvalidOptionType { value: String },

    /// Confidence level outside the open interval (0, 1)
    #[error("Invalid confidence level {value}: must lie strictly between 0 and 1")]
    InvalidConfidenceLevel { value: f64 },

    /// Invalid parameter values
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// Monte Carlo simulation error
    #[error("Monte Carlo simulation error with {paths} paths: {reason}")]
    MonteCarloError { paths: usize, reason: String },

    /// Numerical instability in a reduction
    #[error("Numerical instability in {method}: {reason}")]
    NumericalInstability { method: String, reason: String },

    /// Configuration file could not be read or parsed
    #[error("Configuration file '{path}': {reason}")]
    ConfigFile { path: String, reason: String },
}

/// Result type alias for energy-risk operations
pub type RiskResult<T> = Result<T, RiskError>;

/// Validation utilities
pub mod validation {
    use super::{RiskError, RiskResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> RiskResult<()> {
        if value.is_nan() || value <= 0.0 {
            Err(RiskError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> RiskResult<()> {
        if value.is_nan() || value < 0.0 {
            Err(RiskError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> RiskResult<()> {
        if !value.is_finite() {
            Err(RiskError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate paths count
    pub fn validate_paths(paths: usize) -> RiskResult<()> {
        if paths == 0 {
            Err(RiskError::InvalidConfiguration {
                field: "simulation_count".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if paths > 1_000_000_000 {
            Err(RiskError::InvalidConfiguration {
                field: "simulation_count".to_string(),
                reason: "exceeds maximum allowed (1 billion)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate steps count (one step per trading day)
    pub fn validate_steps(steps: u32) -> RiskResult<()> {
        if steps == 0 {
            Err(RiskError::InvalidConfiguration {
                field: "days_to_expiration".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if steps > 100_000 {
            Err(RiskError::InvalidConfiguration {
                field: "days_to_expiration".to_string(),
                reason: "exceeds maximum allowed (100,000)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a confidence level lies in the open interval (0, 1)
    pub fn validate_confidence_level(value: f64) -> RiskResult<()> {
        if value > 0.0 && value < 1.0 {
            Ok(())
        } else {
            Err(RiskError::InvalidConfidenceLevel { value })
        }
    }
}
