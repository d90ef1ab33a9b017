use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::intake::normalize_language;

/// Identifier wrapper for client cases (leads).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CaseId(pub String);

/// Identifier wrapper for lawyer profiles owned by the profile store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LawyerId(pub String);

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for LawyerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Legal specialties offered on the marketplace, tagged by their Portuguese slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeArea {
    Imigracao,
    Familia,
    Criminal,
    Trabalhista,
    Empresarial,
    Imobiliario,
    Civil,
    Tributario,
    Previdenciario,
    Consumidor,
    Outros,
}

impl PracticeArea {
    pub const ALL: [PracticeArea; 11] = [
        PracticeArea::Imigracao,
        PracticeArea::Familia,
        PracticeArea::Criminal,
        PracticeArea::Trabalhista,
        PracticeArea::Empresarial,
        PracticeArea::Imobiliario,
        PracticeArea::Civil,
        PracticeArea::Tributario,
        PracticeArea::Previdenciario,
        PracticeArea::Consumidor,
        PracticeArea::Outros,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            PracticeArea::Imigracao => "imigracao",
            PracticeArea::Familia => "familia",
            PracticeArea::Criminal => "criminal",
            PracticeArea::Trabalhista => "trabalhista",
            PracticeArea::Empresarial => "empresarial",
            PracticeArea::Imobiliario => "imobiliario",
            PracticeArea::Civil => "civil",
            PracticeArea::Tributario => "tributario",
            PracticeArea::Previdenciario => "previdenciario",
            PracticeArea::Consumidor => "consumidor",
            PracticeArea::Outros => "outros",
        }
    }

    /// `Outros` is the catch-all bucket and never counts as an identified area.
    pub const fn is_specific(self) -> bool {
        !matches!(self, PracticeArea::Outros)
    }

    /// Resolve an exact slug. Alias and free-text handling lives in the intake builder.
    pub fn from_slug(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|area| area.slug() == value)
    }
}

/// How quickly the client needs a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub const fn label(self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        }
    }

    pub const fn is_urgent(self) -> bool {
        matches!(self, Urgency::High | Urgency::Critical)
    }
}

/// Subscription tier purchased by the lawyer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlanTier {
    #[default]
    Free,
    Premium,
    Featured,
}

impl PlanTier {
    pub const fn label(self) -> &'static str {
        match self {
            PlanTier::Free => "FREE",
            PlanTier::Premium => "PREMIUM",
            PlanTier::Featured => "FEATURED",
        }
    }
}

/// Where the descriptor's practice area came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaSource {
    Declared,
    Inferred,
    Unspecified,
}

/// Raw case payload as submitted by the client-facing intake form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSubmission {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub practice_area: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Normalized, immutable view of a case used for scoring and matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDescriptor {
    pub description: String,
    pub practice_area: PracticeArea,
    pub area_source: AreaSource,
    pub urgency: Urgency,
    pub city: String,
    pub state: String,
    pub language: String,
}

impl CaseDescriptor {
    pub fn has_location(&self) -> bool {
        !self.city.is_empty() && !self.state.is_empty()
    }
}

/// Snapshot of a lawyer profile as read from the profile store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LawyerRecord {
    pub id: LawyerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub practice_areas: BTreeSet<PracticeArea>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub languages: BTreeSet<String>,
    #[serde(default)]
    pub plan: PlanTier,
    #[serde(default)]
    pub years_experience: u16,
    pub verified: bool,
    pub active: bool,
    #[serde(default)]
    pub rating_average: f32,
    #[serde(default)]
    pub rating_count: u32,
    /// Declared consultation fee in whole US dollars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation_fee: Option<u32>,
}

impl LawyerRecord {
    /// Only active, verified profiles may ever be ranked.
    pub fn is_eligible(&self) -> bool {
        self.active && self.verified
    }

    pub fn practices(&self, area: PracticeArea) -> bool {
        self.practice_areas.contains(&area)
    }

    pub fn in_state(&self, state: &str) -> bool {
        !state.is_empty() && self.state.eq_ignore_ascii_case(state)
    }

    pub fn in_city(&self, city: &str) -> bool {
        !city.is_empty() && self.city.trim().eq_ignore_ascii_case(city.trim())
    }

    /// Language tags are compared after normalization, so `PT` and `Portuguese` both match `pt`.
    pub fn speaks(&self, language: &str) -> bool {
        let wanted = normalize_language(language);
        !wanted.is_empty()
            && self
                .languages
                .iter()
                .any(|tag| normalize_language(tag) == wanted)
    }

    /// Rating clamped to the documented 0..=5 range.
    pub fn bounded_rating(&self) -> f32 {
        if self.rating_average.is_finite() {
            self.rating_average.clamp(0.0, 5.0)
        } else {
            0.0
        }
    }
}
