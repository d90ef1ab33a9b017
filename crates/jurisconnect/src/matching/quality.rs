use serde::{Deserialize, Serialize};

use super::domain::CaseDescriptor;

const BASE_SCORE: i32 = 50;
const DETAILED_DESCRIPTION_CHARS: usize = 100;
const DETAIL_BONUS: i32 = 20;
const LOCATION_BONUS: i32 = 15;
const AREA_BONUS: i32 = 15;

/// Completeness score attached to a case, always within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualityScore(u8);

impl QualityScore {
    pub const MAX: QualityScore = QualityScore(100);

    pub fn new(value: i32) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub fn tier(self) -> QualityTier {
        match self.0 {
            85.. => QualityTier::High,
            65..=84 => QualityTier::Medium,
            _ => QualityTier::Low,
        }
    }
}

/// Coarse bucket surfaced in leads listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Low,
    Medium,
    High,
}

impl QualityTier {
    pub const fn label(self) -> &'static str {
        match self {
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
        }
    }
}

/// Additive completeness rubric for case submissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityScorer;

impl QualityScorer {
    pub fn score(&self, case: &CaseDescriptor) -> QualityScore {
        let mut total = BASE_SCORE;

        if case.description.chars().count() > DETAILED_DESCRIPTION_CHARS {
            total += DETAIL_BONUS;
        }

        if case.has_location() {
            total += LOCATION_BONUS;
        }

        if case.practice_area.is_specific() {
            total += AREA_BONUS;
        }

        QualityScore::new(total)
    }
}
