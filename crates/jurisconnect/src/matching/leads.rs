use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::{CaseId, CaseSubmission, PracticeArea, Urgency};
use super::quality::{QualityScore, QualityTier};

/// Open lead offered to a lawyer in the leads listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub case_id: CaseId,
    pub case: CaseSubmission,
}

/// Lead annotated with its quality score and fit for one lawyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadView {
    pub case_id: CaseId,
    pub practice_area: PracticeArea,
    pub urgency: Urgency,
    pub quality_score: QualityScore,
    pub quality_tier: QualityTier,
    pub match_score: f32,
    pub match_reasons: Vec<String>,
}

/// Most urgent first, then best fit, then most complete, then case id.
pub(crate) fn lead_order(left: &LeadView, right: &LeadView) -> Ordering {
    right
        .urgency
        .cmp(&left.urgency)
        .then_with(|| right.match_score.total_cmp(&left.match_score))
        .then_with(|| right.quality_score.cmp(&left.quality_score))
        .then_with(|| left.case_id.cmp(&right.case_id))
}
