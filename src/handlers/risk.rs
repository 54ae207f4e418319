use serde_json::Value;
use tracing::debug;

use crate::error::AppError;
use crate::models::{RiskAnalysis, RiskFactorSet};
use crate::services::RiskScorer;

/// Handle an analysis request: `{"risk_factors": {...}}`.
pub fn analyze_request(scorer: &RiskScorer, body: &Value) -> Result<RiskAnalysis, AppError> {
    let factors = extract_risk_factors(body)?
        .ok_or_else(|| AppError::ValidationError("Missing risk_factors".to_string()))?;

    let analysis = scorer.analyze(&factors)?;
    debug!(
        "Analyzed risk factors: score {}, level {}",
        analysis.risk_score, analysis.risk_level
    );
    Ok(analysis)
}

/// Pull the `risk_factors` object out of a request body, if present.
pub(crate) fn extract_risk_factors(body: &Value) -> Result<Option<RiskFactorSet>, AppError> {
    let object = body.as_object().ok_or_else(|| {
        AppError::ValidationError("Request body must be a JSON object".to_string())
    })?;

    object
        .get("risk_factors")
        .map(|factors| RiskFactorSet::try_from(factors.clone()).map_err(AppError::ValidationError))
        .transpose()
}
