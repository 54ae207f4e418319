use std::fmt;
use std::str::FromStr;

use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ratings at or above this value trigger a factor-specific recommendation.
pub const HIGH_FACTOR_RATING: f64 = 7.0;

pub const MIN_FACTOR_RATING: Decimal = Decimal::ONE;
pub const MAX_FACTOR_RATING: Decimal = Decimal::TEN;

/// The six dimensions a project is rated on.
///
/// Variant order is the canonical order used for scoring, error messages
/// and recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    TechnicalComplexity,
    ResourceAvailability,
    TimelineConstraints,
    BudgetConstraints,
    StakeholderInvolvement,
    RegulatoryCompliance,
}

impl RiskFactor {
    pub const ALL: [RiskFactor; 6] = [
        RiskFactor::TechnicalComplexity,
        RiskFactor::ResourceAvailability,
        RiskFactor::TimelineConstraints,
        RiskFactor::BudgetConstraints,
        RiskFactor::StakeholderInvolvement,
        RiskFactor::RegulatoryCompliance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFactor::TechnicalComplexity => "technical_complexity",
            RiskFactor::ResourceAvailability => "resource_availability",
            RiskFactor::TimelineConstraints => "timeline_constraints",
            RiskFactor::BudgetConstraints => "budget_constraints",
            RiskFactor::StakeholderInvolvement => "stakeholder_involvement",
            RiskFactor::RegulatoryCompliance => "regulatory_compliance",
        }
    }

    /// Weight of this factor in the overall score. The six weights sum to 1.
    pub fn weight(&self) -> Decimal {
        match self {
            RiskFactor::TechnicalComplexity => Decimal::new(25, 2),
            RiskFactor::ResourceAvailability => Decimal::new(20, 2),
            RiskFactor::TimelineConstraints => Decimal::new(15, 2),
            RiskFactor::BudgetConstraints => Decimal::new(15, 2),
            RiskFactor::StakeholderInvolvement => Decimal::new(10, 2),
            RiskFactor::RegulatoryCompliance => Decimal::new(15, 2),
        }
    }

    /// Mitigation advice emitted when this factor is rated high.
    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskFactor::TechnicalComplexity => {
                "Consider technical proof of concept before full implementation"
            }
            RiskFactor::ResourceAvailability => {
                "Secure additional resources or adjust project scope"
            }
            RiskFactor::TimelineConstraints => {
                "Re-evaluate timeline and consider extensions or phased delivery"
            }
            RiskFactor::BudgetConstraints => {
                "Review budget allocation or seek additional funding sources"
            }
            RiskFactor::StakeholderInvolvement => {
                "Implement stakeholder engagement plan with regular touchpoints"
            }
            RiskFactor::RegulatoryCompliance => {
                "Conduct compliance review with legal/regulatory experts"
            }
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskFactor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RiskFactor::ALL
            .into_iter()
            .find(|factor| factor.as_str() == s)
            .ok_or_else(|| format!("Unknown risk factor: {}", s))
    }
}

/// Raw factor ratings as submitted by a caller.
///
/// Values are kept as JSON so that non-numeric entries survive until
/// validation can report them. Keys keep their submission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskFactorSet(Map<String, Value>);

impl RiskFactorSet {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert, handy for assembling a set from form values.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, factor: RiskFactor) -> bool {
        self.0.contains_key(factor.as_str())
    }

    /// Numeric rating of a factor, if present and numeric.
    pub fn rating(&self, factor: RiskFactor) -> Option<f64> {
        self.0.get(factor.as_str()).and_then(Value::as_f64)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for RiskFactorSet {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for RiskFactorSet {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(format!("risk_factors must be a JSON object, got {}", other)),
        }
    }
}

impl FromIterator<(RiskFactor, f64)> for RiskFactorSet {
    fn from_iter<I: IntoIterator<Item = (RiskFactor, f64)>>(iter: I) -> Self {
        let mut set = RiskFactorSet::new();
        for (factor, rating) in iter {
            set.insert(factor.as_str(), rating);
        }
        set
    }
}

/// Exact decimal form of a rating, or `None` when the value is not a number
/// inside the accepted range.
pub fn rating_in_range(value: &Value) -> Option<Decimal> {
    let number = match value {
        Value::Number(number) => number,
        _ => return None,
    };
    let rating = match number.as_i64() {
        Some(whole) => Decimal::from(whole),
        None => number.as_f64().and_then(Decimal::from_f64)?,
    };
    (MIN_FACTOR_RATING..=MAX_FACTOR_RATING)
        .contains(&rating)
        .then_some(rating)
}
