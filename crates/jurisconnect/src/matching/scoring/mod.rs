mod config;
mod rules;
mod success;

pub use config::{MatchingConfig, MatchingWeights, DEFAULT_RESULT_LIMIT};

use std::cmp::Ordering;

use super::domain::{CaseDescriptor, LawyerRecord, Urgency};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless engine ranking a lawyer pool snapshot against a case descriptor.
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    config: MatchingConfig,
}

impl MatchingEngine {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Rank eligible lawyers for the case, best first, keeping at most `limit` entries.
    ///
    /// Inactive and unverified profiles are dropped before scoring. When the case names a
    /// specific practice area only lawyers practicing it are considered; otherwise every
    /// eligible lawyer is scored. `urgency_hint` overrides the descriptor's urgency.
    pub fn find_best_lawyers(
        &self,
        case: &CaseDescriptor,
        pool: &[LawyerRecord],
        urgency_hint: Option<Urgency>,
        limit: usize,
    ) -> Vec<MatchResult> {
        let urgency = urgency_hint.unwrap_or(case.urgency);
        let area = case.practice_area;
        let area_filtered = area.is_specific();

        let mut matches: Vec<MatchResult> = pool
            .iter()
            .filter(|lawyer| lawyer.is_eligible())
            .filter(|lawyer| !area_filtered || lawyer.practices(area))
            .map(|lawyer| self.evaluate(case, lawyer, urgency))
            .collect();

        debug!(
            practice_area = area.slug(),
            area_filtered,
            pool = pool.len(),
            candidates = matches.len(),
            "scored lawyer candidates"
        );

        matches.sort_by(rank_order);
        matches.truncate(limit);
        matches
    }

    /// Score a single lawyer without any eligibility or area filtering.
    pub fn evaluate(
        &self,
        case: &CaseDescriptor,
        lawyer: &LawyerRecord,
        urgency: Urgency,
    ) -> MatchResult {
        let weights = self
            .config
            .weights
            .normalized(urgency, self.config.urgent_location_boost);
        let (components, score, signals) =
            rules::score_lawyer(case, lawyer, &weights, &self.config);

        let match_reasons = components
            .iter()
            .filter(|component| rules::is_reason(component, &self.config))
            .map(|component| component.note.clone())
            .collect();

        MatchResult {
            lawyer: lawyer.clone(),
            score,
            match_reasons,
            estimated_success: success::estimate_success(
                score,
                signals.rating_factor,
                &self.config,
            ),
            consultation_fee: success::consultation_fee(lawyer, urgency, &self.config),
            origin: MatchOrigin::Algorithm,
            components,
        }
    }
}

/// Score descending, then rating, then experience, then lawyer id for determinism.
pub(crate) fn rank_order(left: &MatchResult, right: &MatchResult) -> Ordering {
    right
        .score
        .total_cmp(&left.score)
        .then_with(|| {
            right
                .lawyer
                .bounded_rating()
                .total_cmp(&left.lawyer.bounded_rating())
        })
        .then_with(|| {
            right
                .lawyer
                .years_experience
                .cmp(&left.lawyer.years_experience)
        })
        .then_with(|| left.lawyer.id.cmp(&right.lawyer.id))
}

/// Factors combined into a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactor {
    PracticeArea,
    Location,
    Language,
    Plan,
    Experience,
    Rating,
}

/// Discrete contribution to a match score, kept for audits and explanations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: MatchFactor,
    pub weight: f32,
    pub value: f32,
    pub contribution: f32,
    pub note: String,
}

/// Whether a match came from a pre-existing assignment or from the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOrigin {
    Direct,
    Algorithm,
}

/// One ranked lawyer for a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub lawyer: LawyerRecord,
    pub score: f32,
    pub match_reasons: Vec<String>,
    pub estimated_success: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consultation_fee: Option<u32>,
    pub origin: MatchOrigin,
    pub components: Vec<ScoreComponent>,
}
