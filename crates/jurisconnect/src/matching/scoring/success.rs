use super::super::domain::{LawyerRecord, Urgency};
use super::config::MatchingConfig;

/// Bounded success estimate blending match score with rating.
///
/// The ceiling stays below one: this is an estimate and is never shown as a guarantee.
pub(crate) fn estimate_success(score: f32, rating_factor: f32, config: &MatchingConfig) -> f32 {
    let floor = finite_or(config.success_floor, 0.0).clamp(0.0, 1.0);
    let ceiling = finite_or(config.success_ceiling, 1.0).clamp(floor, 1.0);
    let share = finite_or(config.success_score_share, 0.5).clamp(0.0, 1.0);

    let blend = share * score.clamp(0.0, 1.0) + (1.0 - share) * rating_factor.clamp(0.0, 1.0);
    let estimate = floor + (ceiling - floor) * blend;

    finite_or(estimate, floor).clamp(0.0, 1.0)
}

/// Declared fee with the surcharge for critical cases, rounded up to whole dollars.
pub(crate) fn consultation_fee(
    lawyer: &LawyerRecord,
    urgency: Urgency,
    config: &MatchingConfig,
) -> Option<u32> {
    let base = lawyer.consultation_fee?;
    if urgency != Urgency::Critical {
        return Some(base);
    }

    let multiplier = finite_or(config.critical_fee_multiplier, 1.0).max(1.0);
    // round to cents before ceil; f32 noise in the multiplier must not add a dollar
    let cents = (f64::from(base) * f64::from(multiplier) * 100.0).round();
    let adjusted = (cents / 100.0).ceil();
    Some(adjusted.min(f64::from(u32::MAX)) as u32)
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
