use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::AppError;
use crate::handlers::risk::extract_risk_factors;
use crate::models::{Assessment, CreateAssessment, RiskSummary};
use crate::services::AssessmentService;

const REQUIRED_FIELDS: [&str; 2] = ["project_name", "risk_factors"];

/// Handle a record-creation request and return the new id.
///
/// Expects `{"project_name": "...", "risk_factors": {...}}` with an
/// optional `description`.
pub fn create_assessment_request(
    service: &mut AssessmentService,
    body: &Value,
) -> Result<u64, AppError> {
    let object = body.as_object().ok_or_else(|| {
        AppError::ValidationError("Request body must be a JSON object".to_string())
    })?;
    if let Some(field) = REQUIRED_FIELDS.iter().find(|field| !object.contains_key(**field)) {
        return Err(AppError::ValidationError(format!(
            "Missing required field: {}",
            field
        )));
    }

    let project_name = match object.get("project_name") {
        Some(Value::String(name)) => name.clone(),
        _ => {
            return Err(AppError::ValidationError(
                "project_name must be a string".to_string(),
            ))
        }
    };
    let description = match object.get("description") {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => {
            return Err(AppError::ValidationError(
                "description must be a string".to_string(),
            ))
        }
    };
    let risk_factors = extract_risk_factors(body)?
        .ok_or_else(|| AppError::ValidationError("Missing required field: risk_factors".to_string()))?;

    service.create(CreateAssessment {
        project_name,
        description,
        risk_factors,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedAssessment {
    pub index: usize,
    pub message: String,
}

/// Outcome of loading a batch of assessment requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub assessments: Vec<Assessment>,
    pub rejected: Vec<RejectedAssessment>,
    pub summary: RiskSummary,
}

/// Store every request in a JSON array, skipping the ones that fail.
pub fn assess_batch(
    service: &mut AssessmentService,
    body: &Value,
) -> Result<AssessmentReport, AppError> {
    let requests = body.as_array().ok_or_else(|| {
        AppError::ValidationError("Expected a JSON array of assessment requests".to_string())
    })?;

    let mut rejected = Vec::new();
    for (index, request) in requests.iter().enumerate() {
        if let Err(err) = create_assessment_request(service, request) {
            if !err.is_validation() {
                return Err(err);
            }
            warn!("Skipping assessment request {}: {}", index, err);
            rejected.push(RejectedAssessment {
                index,
                message: err.to_string(),
            });
        }
    }

    info!(
        "Stored {} assessments, rejected {}",
        service.len(),
        rejected.len()
    );
    Ok(AssessmentReport {
        assessments: service.list().to_vec(),
        rejected,
        summary: service.summary(),
    })
}
