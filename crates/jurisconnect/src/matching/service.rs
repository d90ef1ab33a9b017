use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::assembler::{MatchReport, ResultAssembler};
use super::domain::{CaseDescriptor, CaseSubmission, LawyerId, LawyerRecord};
use super::intake::{DescriptorBuilder, DescriptorError};
use super::leads::{lead_order, LeadSubmission, LeadView};
use super::pool::{LawyerPool, PoolError, PoolFilter};
use super::quality::{QualityScore, QualityScorer};
use super::scoring::{MatchOrigin, MatchResult, MatchingConfig, MatchingEngine};

const DIRECT_ASSIGNMENT_REASON: &str = "directly assigned to this case";

/// Matching request as received from the API layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub case: CaseSubmission,
    /// Lawyers already assigned to the case, in display order.
    #[serde(default)]
    pub direct_lawyer_ids: Vec<LawyerId>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Descriptor, quality score and ranked matches for one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseMatchOutcome {
    pub descriptor: CaseDescriptor,
    pub quality_score: QualityScore,
    pub report: MatchReport,
}

/// Service composing the descriptor builder, quality scorer, matching engine and assembler.
pub struct CaseMatchingService<P> {
    builder: DescriptorBuilder,
    scorer: QualityScorer,
    engine: Arc<MatchingEngine>,
    assembler: ResultAssembler,
    pool: Arc<P>,
}

impl<P> CaseMatchingService<P>
where
    P: LawyerPool + 'static,
{
    pub fn new(pool: Arc<P>, config: MatchingConfig) -> Self {
        Self::with_builder(DescriptorBuilder::default(), pool, config)
    }

    pub fn with_builder(builder: DescriptorBuilder, pool: Arc<P>, config: MatchingConfig) -> Self {
        let assembler = ResultAssembler::new(config.result_limit);
        Self {
            builder,
            scorer: QualityScorer,
            engine: Arc::new(MatchingEngine::new(config)),
            assembler,
            pool,
        }
    }

    pub fn describe(&self, submission: CaseSubmission) -> Result<CaseDescriptor, DescriptorError> {
        self.builder.build(submission)
    }

    pub fn score_case(&self, descriptor: &CaseDescriptor) -> QualityScore {
        self.scorer.score(descriptor)
    }

    /// Rank an explicit pool snapshot. Performs no I/O.
    pub fn match_lawyers(
        &self,
        descriptor: &CaseDescriptor,
        pool: &[LawyerRecord],
        limit: Option<usize>,
    ) -> MatchReport {
        let limit = limit.unwrap_or(self.assembler.default_limit());
        let ranked = self.engine.find_best_lawyers(descriptor, pool, None, limit);
        self.assembler.assemble(Vec::new(), ranked, Some(limit))
    }

    /// Build, score and match a submitted case against a single pool snapshot.
    pub fn match_case(
        &self,
        request: MatchRequest,
    ) -> Result<CaseMatchOutcome, MatchingServiceError> {
        let MatchRequest {
            case,
            direct_lawyer_ids,
            limit,
        } = request;

        let descriptor = self.builder.build(case)?;
        let quality_score = self.scorer.score(&descriptor);
        let limit = limit.unwrap_or(self.assembler.default_limit());

        let filter = self.pool_filter(&descriptor);
        let snapshot = self.pool.fetch(&filter)?;
        if snapshot.is_empty() {
            warn!(
                practice_area = descriptor.practice_area.slug(),
                state = %descriptor.state,
                "lawyer pool empty for case; returning no algorithmic matches"
            );
        }

        let direct = self.direct_matches(&descriptor, &direct_lawyer_ids)?;
        let ranked = self
            .engine
            .find_best_lawyers(&descriptor, &snapshot, None, limit);
        let report = self.assembler.assemble(direct, ranked, Some(limit));

        info!(
            practice_area = descriptor.practice_area.slug(),
            urgency = descriptor.urgency.label(),
            quality = quality_score.value(),
            pool = snapshot.len(),
            direct = report.metadata.direct_count,
            algorithm = report.metadata.algorithm_count,
            "case matched"
        );

        Ok(CaseMatchOutcome {
            descriptor,
            quality_score,
            report,
        })
    }

    /// Order open leads for one lawyer's listing. Leads that fail validation are skipped.
    pub fn rank_leads(
        &self,
        lawyer_id: &LawyerId,
        leads: Vec<LeadSubmission>,
    ) -> Result<Vec<LeadView>, MatchingServiceError> {
        let lawyer = self
            .pool
            .lookup(lawyer_id)?
            .filter(LawyerRecord::is_eligible)
            .ok_or_else(|| MatchingServiceError::LawyerNotFound(lawyer_id.clone()))?;

        let mut views = Vec::with_capacity(leads.len());
        for lead in leads {
            let descriptor = match self.builder.build(lead.case) {
                Ok(descriptor) => descriptor,
                Err(error) => {
                    warn!(case_id = %lead.case_id, %error, "skipping invalid lead");
                    continue;
                }
            };

            let quality_score = self.scorer.score(&descriptor);
            let result = self
                .engine
                .evaluate(&descriptor, &lawyer, descriptor.urgency);

            views.push(LeadView {
                case_id: lead.case_id,
                practice_area: descriptor.practice_area,
                urgency: descriptor.urgency,
                quality_score,
                quality_tier: quality_score.tier(),
                match_score: result.score,
                match_reasons: result.match_reasons,
            });
        }

        views.sort_by(lead_order);
        Ok(views)
    }

    fn pool_filter(&self, descriptor: &CaseDescriptor) -> PoolFilter {
        let restrict_to_state =
            self.engine.config().restrict_to_state && !descriptor.state.is_empty();

        PoolFilter {
            practice_area: Some(descriptor.practice_area).filter(|area| area.is_specific()),
            state: restrict_to_state.then(|| descriptor.state.clone()),
            city: None,
            active_only: true,
            verified_only: true,
        }
    }

    fn direct_matches(
        &self,
        descriptor: &CaseDescriptor,
        lawyer_ids: &[LawyerId],
    ) -> Result<Vec<MatchResult>, MatchingServiceError> {
        let mut direct = Vec::with_capacity(lawyer_ids.len());

        for id in lawyer_ids {
            let Some(lawyer) = self.pool.lookup(id)? else {
                warn!(lawyer_id = %id, "direct assignment references unknown lawyer");
                continue;
            };

            if !lawyer.is_eligible() {
                warn!(
                    lawyer_id = %id,
                    "direct assignment skipped for inactive or unverified lawyer"
                );
                continue;
            }

            let mut result = self.engine.evaluate(descriptor, &lawyer, descriptor.urgency);
            result.origin = MatchOrigin::Direct;
            result
                .match_reasons
                .insert(0, DIRECT_ASSIGNMENT_REASON.to_string());
            direct.push(result);
        }

        Ok(direct)
    }
}

/// Error raised by the case matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchingServiceError {
    #[error(transparent)]
    InvalidDescriptor(#[from] DescriptorError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("lawyer {0} not found")]
    LawyerNotFound(LawyerId),
}
