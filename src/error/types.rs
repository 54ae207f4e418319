use serde_json::Value;
use thiserror::Error;

use crate::models::RiskFactor;

/// Validation failures raised while scoring a factor set.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    #[error("Risk factors cannot be empty")]
    EmptyRiskFactors,

    #[error("Missing required risk factors: {}", join_factors(.missing))]
    MissingRiskFactors { missing: Vec<RiskFactor> },

    #[error(
        "Invalid risk factor values: {{{}}}. Values must be between 1 and 10",
        join_values(.invalid)
    )]
    InvalidRiskFactorValue { invalid: Vec<(String, Value)> },
}

fn join_factors(factors: &[RiskFactor]) -> String {
    factors
        .iter()
        .map(RiskFactor::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_values(values: &[(String, Value)]) -> String {
    values
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Risk(#[from] RiskError),

    #[error("{0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    /// HTTP-style status a request layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Risk(_) | AppError::ValidationError(_) => 400,
            AppError::NotFound(_) => 404,
            _ => 500,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.status_code() == 400
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}
