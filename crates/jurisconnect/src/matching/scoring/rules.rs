use super::super::domain::{CaseDescriptor, LawyerRecord, PlanTier};
use super::config::{MatchingConfig, MatchingWeights};
use super::{MatchFactor, ScoreComponent};

const SAME_STATE_VALUE: f32 = 0.7;
const SAME_CITY_VALUE: f32 = 1.0;

pub(crate) struct ScoreSignals {
    pub rating_factor: f32,
}

pub(crate) fn score_lawyer(
    case: &CaseDescriptor,
    lawyer: &LawyerRecord,
    weights: &MatchingWeights,
    config: &MatchingConfig,
) -> (Vec<ScoreComponent>, f32, ScoreSignals) {
    let mut components = Vec::with_capacity(6);

    let area = case.practice_area;
    let (area_value, area_note) = if area.is_specific() && lawyer.practices(area) {
        (1.0, format!("matches practice area {}", area.slug()))
    } else if area.is_specific() {
        (0.0, format!("does not list practice area {}", area.slug()))
    } else {
        (0.0, "no specific practice area identified".to_string())
    };
    components.push(component(
        MatchFactor::PracticeArea,
        weights.practice_area,
        area_value,
        area_note,
    ));

    let (location_value, location_note) = if lawyer.in_state(&case.state) {
        if lawyer.in_city(&case.city) {
            (
                SAME_CITY_VALUE,
                format!("located in same city ({}, {})", lawyer.city.trim(), case.state),
            )
        } else {
            (
                SAME_STATE_VALUE,
                format!("located in same state ({})", case.state),
            )
        }
    } else if case.state.is_empty() {
        (0.0, "client location not provided".to_string())
    } else {
        (0.0, format!("outside client state {}", case.state))
    };
    components.push(component(
        MatchFactor::Location,
        weights.location,
        location_value,
        location_note,
    ));

    let language = language_name(&case.language);
    let (language_value, language_note) = if lawyer.speaks(&case.language) {
        (1.0, format!("speaks {language}"))
    } else {
        (0.0, format!("does not list {language}"))
    };
    components.push(component(
        MatchFactor::Language,
        weights.language,
        language_value,
        language_note,
    ));

    let (plan_value, plan_note) = match lawyer.plan {
        PlanTier::Featured => (1.0, "featured lawyer".to_string()),
        PlanTier::Premium => (0.5, "premium member".to_string()),
        PlanTier::Free => (0.0, "free plan".to_string()),
    };
    components.push(component(
        MatchFactor::Plan,
        weights.plan,
        plan_value,
        plan_note,
    ));

    let years = f32::from(lawyer.years_experience);
    let half_life = Some(config.experience_half_life)
        .filter(|value| value.is_finite() && *value > 0.0)
        .unwrap_or_else(|| MatchingConfig::default().experience_half_life);
    let experience_value = years / (years + half_life);
    let experience_note = match lawyer.years_experience {
        0 => "no declared experience".to_string(),
        1 => "1 year of experience".to_string(),
        count => format!("{count} years of experience"),
    };
    components.push(component(
        MatchFactor::Experience,
        weights.experience,
        experience_value,
        experience_note,
    ));

    let rating_factor = rating_factor(lawyer, config);
    let rating_note = if lawyer.rating_count == 0 {
        "new on the platform (neutral rating prior)".to_string()
    } else if lawyer.bounded_rating() >= config.top_rated_threshold
        && lawyer.rating_count >= config.top_rated_min_reviews
    {
        format!(
            "top-rated ({:.1} from {} reviews)",
            lawyer.bounded_rating(),
            lawyer.rating_count
        )
    } else {
        format!(
            "rated {:.1} from {} review(s)",
            lawyer.bounded_rating(),
            lawyer.rating_count
        )
    };
    components.push(component(
        MatchFactor::Rating,
        weights.rating,
        rating_factor,
        rating_note,
    ));

    let total: f32 = components
        .iter()
        .map(|component| component.contribution)
        .sum();
    let score = if total.is_finite() {
        total.clamp(0.0, 1.0)
    } else {
        0.0
    };

    (components, score, ScoreSignals { rating_factor })
}

/// Rating average shrunk towards the prior by review count, scaled to 0..=1.
pub(crate) fn rating_factor(lawyer: &LawyerRecord, config: &MatchingConfig) -> f32 {
    let prior_mean = prior_mean(config);
    let prior_weight = if config.rating_prior_weight.is_finite() {
        config.rating_prior_weight.max(0.0)
    } else {
        0.0
    };
    let count = lawyer.rating_count as f32;

    let denominator = prior_weight + count;
    let blended = if denominator <= f32::EPSILON {
        prior_mean
    } else {
        (prior_mean * prior_weight + lawyer.bounded_rating() * count) / denominator
    };

    (blended / 5.0).clamp(0.0, 1.0)
}

/// Whether a component is worth citing as a match reason.
///
/// Ratings below the prior still add to the score through shrinkage but are not cited.
pub(crate) fn is_reason(component: &ScoreComponent, config: &MatchingConfig) -> bool {
    if component.contribution <= 0.0 {
        return false;
    }
    match component.factor {
        MatchFactor::Rating => component.value >= (prior_mean(config) / 5.0).clamp(0.0, 1.0),
        _ => true,
    }
}

fn prior_mean(config: &MatchingConfig) -> f32 {
    if config.rating_prior_mean.is_finite() {
        config.rating_prior_mean.clamp(0.0, 5.0)
    } else {
        0.0
    }
}

fn component(factor: MatchFactor, weight: f32, value: f32, note: String) -> ScoreComponent {
    let value = if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    };

    ScoreComponent {
        factor,
        weight,
        value,
        contribution: weight * value,
        note,
    }
}

fn language_name(tag: &str) -> &str {
    match tag {
        "pt" => "Portuguese",
        "en" => "English",
        "es" => "Spanish",
        other => other,
    }
}
