use serde::{Deserialize, Serialize};

use super::super::domain::Urgency;

pub const DEFAULT_RESULT_LIMIT: usize = 50;

/// Relative importance of each matching factor. Normalized before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchingWeights {
    pub practice_area: f32,
    pub location: f32,
    pub language: f32,
    pub plan: f32,
    pub experience: f32,
    pub rating: f32,
}

impl Default for MatchingWeights {
    fn default() -> Self {
        Self {
            practice_area: 0.40,
            location: 0.20,
            language: 0.10,
            plan: 0.05,
            experience: 0.10,
            rating: 0.15,
        }
    }
}

impl MatchingWeights {
    pub fn sum(&self) -> f32 {
        self.practice_area + self.location + self.language + self.plan + self.experience + self.rating
    }

    /// Weights scaled to sum to one.
    ///
    /// Negative or non-finite entries count as zero, an all-zero set falls back to the
    /// defaults, and the plan tier can never outweigh half of the practice-area weight.
    /// Urgent cases lean harder on location.
    pub fn normalized(&self, urgency: Urgency, urgent_location_boost: f32) -> MatchingWeights {
        let sanitize = |value: f32| if value.is_finite() { value.max(0.0) } else { 0.0 };

        let mut weights = MatchingWeights {
            practice_area: sanitize(self.practice_area),
            location: sanitize(self.location),
            language: sanitize(self.language),
            plan: sanitize(self.plan),
            experience: sanitize(self.experience),
            rating: sanitize(self.rating),
        };

        if weights.sum() <= f32::EPSILON {
            weights = MatchingWeights::default();
        }

        weights.plan = weights.plan.min(weights.practice_area / 2.0);

        if urgency.is_urgent() {
            weights.location *= sanitize(urgent_location_boost).max(1.0);
        }

        let total = weights.sum();
        if total <= f32::EPSILON {
            return MatchingWeights::default();
        }

        MatchingWeights {
            practice_area: weights.practice_area / total,
            location: weights.location / total,
            language: weights.language / total,
            plan: weights.plan / total,
            experience: weights.experience / total,
            rating: weights.rating / total,
        }
    }
}

/// Tunable parameters for the matching engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub weights: MatchingWeights,
    /// Years of experience at which the experience factor reaches one half.
    pub experience_half_life: f32,
    pub rating_prior_mean: f32,
    /// Number of phantom reviews at the prior mean blended into every rating.
    pub rating_prior_weight: f32,
    pub top_rated_threshold: f32,
    pub top_rated_min_reviews: u32,
    pub urgent_location_boost: f32,
    pub success_floor: f32,
    pub success_ceiling: f32,
    /// Share of the success estimate driven by the match score; the rest comes from rating.
    pub success_score_share: f32,
    pub critical_fee_multiplier: f32,
    pub result_limit: usize,
    /// Only fetch lawyers licensed in the client's state.
    pub restrict_to_state: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: MatchingWeights::default(),
            experience_half_life: 5.0,
            rating_prior_mean: 3.5,
            rating_prior_weight: 5.0,
            top_rated_threshold: 4.5,
            top_rated_min_reviews: 5,
            urgent_location_boost: 1.5,
            success_floor: 0.05,
            success_ceiling: 0.95,
            success_score_share: 0.6,
            critical_fee_multiplier: 1.2,
            result_limit: DEFAULT_RESULT_LIMIT,
            restrict_to_state: false,
        }
    }
}
