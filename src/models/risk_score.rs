use std::fmt;
use std::str::FromStr;

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::risk_factor::RiskFactor;

/// Scores below this are `low`.
pub const MEDIUM_RISK_THRESHOLD: i64 = 30;
/// Scores at or above this are `high`.
pub const HIGH_RISK_THRESHOLD: i64 = 70;

/// Weighted project risk on a 0-100 scale, kept to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskScore(Decimal);

impl RiskScore {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

impl From<Decimal> for RiskScore {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Buckets a score against the 30/70 breakpoints.
    ///
    /// Scores outside 0-100 are not clamped: anything below 30 is `Low`
    /// and anything from 70 upwards is `High`.
    pub fn from_score(score: RiskScore) -> Self {
        let value = score.value();
        if value < Decimal::from(MEDIUM_RISK_THRESHOLD) {
            RiskLevel::Low
        } else if value < Decimal::from(HIGH_RISK_THRESHOLD) {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Level-wide advice, if the level calls for any.
    pub fn recommendation(&self) -> Option<&'static str> {
        match self {
            RiskLevel::Low => None,
            RiskLevel::Medium => Some("Implement detailed risk management plan"),
            RiskLevel::High => Some("Consider project restructuring or phased approach"),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order in which factor-specific recommendations are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationOrder {
    /// Weight-table order, independent of how the input was written.
    #[default]
    Canonical,
    /// The order the factors appear in the submitted document.
    Input,
}

impl FromStr for RecommendationOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "canonical" => Ok(RecommendationOrder::Canonical),
            "input" => Ok(RecommendationOrder::Input),
            other => Err(format!(
                "Unknown recommendation order '{}', expected 'canonical' or 'input'",
                other
            )),
        }
    }
}

/// Result of a full analysis: score, level and mitigation advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub risk_score: RiskScore,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
}

/// One row of the weight table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeight {
    pub factor: RiskFactor,
    pub weight: Decimal,
}
