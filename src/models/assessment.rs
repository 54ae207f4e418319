use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{RiskFactorSet, RiskLevel, RiskScore};

/// A stored project risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: u64,
    pub project_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub risk_factors: RiskFactorSet,
    pub risk_score: RiskScore,
    pub risk_level: RiskLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssessment {
    pub project_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub risk_factors: RiskFactorSet,
}

/// Partial update. Absent fields are left alone.
///
/// `description` has three states: absent keeps the current text,
/// `null` clears it, and a string replaces it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAssessment {
    pub project_name: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub description: Option<Option<String>>,
    pub risk_factors: Option<RiskFactorSet>,
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl Assessment {
    pub fn new(id: u64, create: CreateAssessment, risk_score: RiskScore) -> Self {
        let now = Utc::now();
        Self {
            id,
            project_name: create.project_name,
            description: create.description,
            risk_factors: create.risk_factors,
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an update whose factors (if any) have already been scored.
    pub fn apply(&mut self, update: UpdateAssessment, rescored: Option<RiskScore>) {
        if let Some(project_name) = update.project_name {
            self.project_name = project_name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let (Some(risk_factors), Some(score)) = (update.risk_factors, rescored) {
            self.risk_factors = risk_factors;
            self.risk_score = score;
            self.risk_level = RiskLevel::from_score(score);
        }
        self.updated_at = Utc::now();
    }
}

/// Aggregate view over a collection of assessments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub total: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<RiskScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_score: Option<RiskScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowest_score: Option<RiskScore>,
}
