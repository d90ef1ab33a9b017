//! Case intake, lead quality scoring, and lawyer matching.
//!
//! The engine is pure: it reads an immutable lawyer pool snapshot and a case descriptor
//! and returns ranked, explained matches. Storage sits behind [`LawyerPool`].

pub mod assembler;
pub mod domain;
pub mod intake;
pub mod leads;
pub mod pool;
pub mod quality;
pub mod roster;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use assembler::{MatchMetadata, MatchReport, ResultAssembler, ALGORITHM_VERSION};
pub use domain::{
    AreaSource, CaseDescriptor, CaseId, CaseSubmission, LawyerId, LawyerRecord, PlanTier,
    PracticeArea, Urgency,
};
pub use intake::{DescriptorBuilder, DescriptorError};
pub use leads::{LeadSubmission, LeadView};
pub use pool::{LawyerPool, PoolError, PoolFilter};
pub use quality::{QualityScore, QualityScorer, QualityTier};
pub use roster::{LawyerRoster, RosterError};
pub use router::matching_router;
pub use scoring::{
    MatchFactor, MatchOrigin, MatchResult, MatchingConfig, MatchingEngine, MatchingWeights,
    ScoreComponent, DEFAULT_RESULT_LIMIT,
};
pub use service::{CaseMatchOutcome, CaseMatchingService, MatchRequest, MatchingServiceError};
