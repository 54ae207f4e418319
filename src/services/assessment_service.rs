use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::models::{
    Assessment, CreateAssessment, RiskLevel, RiskScore, RiskSummary, UpdateAssessment,
};
use crate::services::risk_scorer::RiskScorer;
use crate::utils::math::{mean, round_half_even, SCORE_DECIMAL_PLACES};

/// In-memory assessment records with sequential ids.
///
/// Records live only as long as the service; ids start at 1 and are never
/// handed out twice, even after a delete.
#[derive(Debug)]
pub struct AssessmentService {
    scorer: RiskScorer,
    assessments: Vec<Assessment>,
    next_id: u64,
}

impl Default for AssessmentService {
    fn default() -> Self {
        Self::new(RiskScorer::default())
    }
}

impl AssessmentService {
    pub fn new(scorer: RiskScorer) -> Self {
        Self {
            scorer,
            assessments: Vec::new(),
            next_id: 1,
        }
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    /// Score and store a new assessment, returning its id.
    pub fn create(&mut self, request: CreateAssessment) -> Result<u64, AppError> {
        let score = self.scorer.compute_score(&request.risk_factors).map_err(|e| {
            warn!("Rejected assessment for '{}': {}", request.project_name, e);
            e
        })?;

        let id = self.next_id;
        self.next_id += 1;

        info!(
            "Created assessment {} for '{}' with score {}",
            id, request.project_name, score
        );
        self.assessments.push(Assessment::new(id, request, score));
        Ok(id)
    }

    pub fn get(&self, id: u64) -> Option<&Assessment> {
        self.assessments.iter().find(|assessment| assessment.id == id)
    }

    /// All assessments in creation order.
    pub fn list(&self) -> &[Assessment] {
        &self.assessments
    }

    /// Update an assessment. New factors are scored before anything is
    /// changed, so a rejected update leaves the record as it was.
    pub fn update(&mut self, id: u64, update: UpdateAssessment) -> Result<&Assessment, AppError> {
        let index = self.index_of(id)?;

        let rescored = match &update.risk_factors {
            Some(factors) => Some(self.scorer.compute_score(factors)?),
            None => None,
        };

        let assessment = &mut self.assessments[index];
        assessment.apply(update, rescored);
        debug!("Updated assessment {}", id);
        Ok(assessment)
    }

    pub fn delete(&mut self, id: u64) -> Result<Assessment, AppError> {
        let index = self.index_of(id)?;
        let removed = self.assessments.remove(index);
        info!("Deleted assessment {}", id);
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }

    pub fn summary(&self) -> RiskSummary {
        let scores: Vec<_> = self
            .assessments
            .iter()
            .map(|assessment| assessment.risk_score.value())
            .collect();
        let count_level = |level: RiskLevel| {
            self.assessments
                .iter()
                .filter(|assessment| assessment.risk_level == level)
                .count()
        };

        RiskSummary {
            total: self.assessments.len(),
            low: count_level(RiskLevel::Low),
            medium: count_level(RiskLevel::Medium),
            high: count_level(RiskLevel::High),
            average_score: mean(&scores)
                .map(|avg| RiskScore::new(round_half_even(avg, SCORE_DECIMAL_PLACES))),
            highest_score: self.assessments.iter().map(|a| a.risk_score).max(),
            lowest_score: self.assessments.iter().map(|a| a.risk_score).min(),
        }
    }

    fn index_of(&self, id: u64) -> Result<usize, AppError> {
        self.assessments
            .iter()
            .position(|assessment| assessment.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Assessment {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RiskFactor, RiskFactorSet};

    fn request(name: &str, rating: f64) -> CreateAssessment {
        CreateAssessment {
            project_name: name.to_string(),
            description: None,
            risk_factors: RiskFactor::ALL.into_iter().map(|f| (f, rating)).collect(),
        }
    }

    #[test]
    fn test_ids_are_sequential_and_not_reused() {
        let mut service = AssessmentService::default();
        assert_eq!(service.create(request("alpha", 2.0)).unwrap(), 1);
        assert_eq!(service.create(request("beta", 5.0)).unwrap(), 2);
        service.delete(2).unwrap();
        assert_eq!(service.create(request("gamma", 9.0)).unwrap(), 3);
        assert_eq!(service.len(), 2);
    }

    #[test]
    fn test_invalid_create_stores_nothing() {
        let mut service = AssessmentService::default();
        let mut bad = request("alpha", 5.0);
        bad.risk_factors = RiskFactorSet::new();
        assert!(service.create(bad).is_err());
        assert!(service.is_empty());
        assert_eq!(service.create(request("beta", 5.0)).unwrap(), 1);
    }

    #[test]
    fn test_update_missing_record() {
        let mut service = AssessmentService::default();
        let err = service.update(7, UpdateAssessment::default()).unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
