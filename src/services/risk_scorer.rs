use rust_decimal::Decimal;

use crate::error::RiskError;
use crate::models::{
    rating_in_range, FactorWeight, RecommendationOrder, RiskAnalysis, RiskFactor, RiskFactorSet,
    RiskLevel, RiskScore, HIGH_FACTOR_RATING,
};
use crate::utils::math::{normalize_rating, round_half_even, SCORE_DECIMAL_PLACES};

/// Stateless weighted risk scorer.
///
/// Holds only the recommendation ordering policy; the weight table and
/// level breakpoints are constants, so a scorer can be shared freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskScorer {
    order: RecommendationOrder,
}

impl RiskScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(order: RecommendationOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> RecommendationOrder {
        self.order
    }

    /// The weight table in canonical order.
    pub fn weights(&self) -> Vec<FactorWeight> {
        RiskFactor::ALL
            .into_iter()
            .map(|factor| FactorWeight {
                factor,
                weight: factor.weight(),
            })
            .collect()
    }

    /// Weighted 0-100 score of a complete, valid factor set.
    ///
    /// Fails without computing anything if the set is empty, lacks any of
    /// the six factors, or holds a value that is not a number in 1-10.
    pub fn compute_score(&self, factors: &RiskFactorSet) -> Result<RiskScore, RiskError> {
        let ratings = validate_risk_factors(factors)?;

        let weighted: Decimal = RiskFactor::ALL
            .iter()
            .zip(ratings.iter())
            .map(|(factor, rating)| normalize_rating(*rating) * factor.weight())
            .sum();

        Ok(RiskScore::new(round_half_even(weighted, SCORE_DECIMAL_PLACES)))
    }

    pub fn classify(&self, score: RiskScore) -> RiskLevel {
        RiskLevel::from_score(score)
    }

    /// Mitigation advice for a factor set and its score.
    ///
    /// The level-wide entry, if any, comes first, followed by one entry per
    /// factor rated 7 or more. Factors that are absent or non-numeric are
    /// skipped rather than reported.
    pub fn recommend(&self, factors: &RiskFactorSet, score: RiskScore) -> Vec<&'static str> {
        let mut recommendations: Vec<&'static str> =
            self.classify(score).recommendation().into_iter().collect();

        let rated_high = |factor: &RiskFactor| {
            factors
                .rating(*factor)
                .map_or(false, |rating| rating >= HIGH_FACTOR_RATING)
        };

        match self.order {
            RecommendationOrder::Canonical => recommendations.extend(
                RiskFactor::ALL
                    .iter()
                    .filter(|factor| rated_high(factor))
                    .map(RiskFactor::recommendation),
            ),
            RecommendationOrder::Input => recommendations.extend(
                factors
                    .iter()
                    .filter_map(|(key, _)| key.parse::<RiskFactor>().ok())
                    .filter(|factor| rated_high(factor))
                    .map(|factor| factor.recommendation()),
            ),
        }

        recommendations
    }

    /// Score, classify and recommend in one pass.
    pub fn analyze(&self, factors: &RiskFactorSet) -> Result<RiskAnalysis, RiskError> {
        let risk_score = self.compute_score(factors)?;
        let recommendations = self
            .recommend(factors, risk_score)
            .into_iter()
            .map(str::to_string)
            .collect();

        Ok(RiskAnalysis {
            risk_score,
            risk_level: self.classify(risk_score),
            recommendations,
        })
    }
}

/// Checks a factor set and returns the six ratings in canonical order.
///
/// Emptiness is reported before missing keys, and missing keys before bad
/// values. Every present value is checked, including keys that carry no
/// weight.
pub fn validate_risk_factors(factors: &RiskFactorSet) -> Result<[Decimal; 6], RiskError> {
    if factors.is_empty() {
        return Err(RiskError::EmptyRiskFactors);
    }

    let missing: Vec<RiskFactor> = RiskFactor::ALL
        .into_iter()
        .filter(|factor| !factors.contains(*factor))
        .collect();
    if !missing.is_empty() {
        return Err(RiskError::MissingRiskFactors { missing });
    }

    let invalid: Vec<(String, serde_json::Value)> = factors
        .iter()
        .filter(|(_, value)| rating_in_range(value).is_none())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    if !invalid.is_empty() {
        return Err(RiskError::InvalidRiskFactorValue { invalid });
    }

    let mut ratings = [Decimal::ZERO; 6];
    for (slot, factor) in ratings.iter_mut().zip(RiskFactor::ALL) {
        *slot = factors
            .get(factor.as_str())
            .and_then(rating_in_range)
            .ok_or_else(|| RiskError::MissingRiskFactors {
                missing: vec![factor],
            })?;
    }
    Ok(ratings)
}
