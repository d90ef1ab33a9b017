use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::matching::domain::{
    AreaSource, CaseDescriptor, CaseSubmission, LawyerId, LawyerRecord, PlanTier, PracticeArea,
    Urgency,
};
use crate::matching::pool::{LawyerPool, PoolError, PoolFilter};
use crate::matching::scoring::{MatchResult, MatchingConfig, MatchingEngine};
use crate::matching::{matching_router, CaseMatchingService};

pub(super) const LONG_DESCRIPTION: &str = "Entrei nos Estados Unidos com visto de turista e \
preciso entender como ajustar meu status para green card por meio do meu casamento recente.";

pub(super) fn lawyer(id: &str, areas: &[PracticeArea]) -> LawyerRecord {
    LawyerRecord {
        id: LawyerId(id.to_string()),
        name: Some(format!("Dr. {id}")),
        practice_areas: areas.iter().copied().collect(),
        city: "Miami".to_string(),
        state: "FL".to_string(),
        languages: ["pt".to_string(), "en".to_string()].into_iter().collect(),
        plan: PlanTier::Free,
        years_experience: 5,
        verified: true,
        active: true,
        rating_average: 4.0,
        rating_count: 10,
        consultation_fee: Some(150),
    }
}

pub(super) fn descriptor(area: PracticeArea) -> CaseDescriptor {
    CaseDescriptor {
        description: LONG_DESCRIPTION.to_string(),
        practice_area: area,
        area_source: if area.is_specific() {
            AreaSource::Declared
        } else {
            AreaSource::Unspecified
        },
        urgency: Urgency::Medium,
        city: "Miami".to_string(),
        state: "FL".to_string(),
        language: "pt".to_string(),
    }
}

pub(super) fn submission() -> CaseSubmission {
    CaseSubmission {
        description: LONG_DESCRIPTION.to_string(),
        practice_area: Some("imigracao".to_string()),
        urgency: Some("high".to_string()),
        city: Some("Miami".to_string()),
        state: Some("fl".to_string()),
        language: None,
    }
}

pub(super) fn engine() -> MatchingEngine {
    MatchingEngine::new(MatchingConfig::default())
}

pub(super) fn result_for(id: &str) -> MatchResult {
    engine().evaluate(
        &descriptor(PracticeArea::Imigracao),
        &lawyer(id, &[PracticeArea::Imigracao]),
        Urgency::Medium,
    )
}

pub(super) fn ids(results: &[MatchResult]) -> Vec<&str> {
    results
        .iter()
        .map(|result| result.lawyer.id.0.as_str())
        .collect()
}

/// Mixed roster covering every eligibility state.
pub(super) fn roster() -> Vec<LawyerRecord> {
    let mut featured = lawyer("law-featured", &[PracticeArea::Imigracao]);
    featured.plan = PlanTier::Featured;
    featured.years_experience = 15;
    featured.rating_average = 4.9;
    featured.rating_count = 42;

    let mut orlando = lawyer("law-orlando", &[PracticeArea::Imigracao, PracticeArea::Familia]);
    orlando.city = "Orlando".to_string();

    let mut boston = lawyer("law-boston", &[PracticeArea::Imigracao]);
    boston.city = "Boston".to_string();
    boston.state = "MA".to_string();
    boston.languages = BTreeSet::from(["en".to_string()]);

    let mut rookie = lawyer("law-rookie", &[PracticeArea::Imigracao]);
    rookie.years_experience = 0;
    rookie.rating_count = 0;
    rookie.rating_average = 0.0;

    let mut inactive = lawyer("law-inactive", &[PracticeArea::Imigracao]);
    inactive.active = false;

    let mut unverified = lawyer("law-unverified", &[PracticeArea::Imigracao]);
    unverified.verified = false;

    let family = lawyer("law-family", &[PracticeArea::Familia]);

    vec![
        featured, orlando, boston, rookie, inactive, unverified, family,
    ]
}

pub(super) fn build_service(
    lawyers: Vec<LawyerRecord>,
) -> (CaseMatchingService<MemoryPool>, Arc<MemoryPool>) {
    let pool = Arc::new(MemoryPool::new(lawyers));
    let service = CaseMatchingService::new(pool.clone(), MatchingConfig::default());
    (service, pool)
}

pub(super) fn router_with_pool<P: LawyerPool + 'static>(pool: P) -> axum::Router {
    let service = CaseMatchingService::new(Arc::new(pool), MatchingConfig::default());
    matching_router(Arc::new(service))
}

#[derive(Default)]
pub(super) struct MemoryPool {
    lawyers: Vec<LawyerRecord>,
    filters: Mutex<Vec<PoolFilter>>,
}

impl MemoryPool {
    pub(super) fn new(lawyers: Vec<LawyerRecord>) -> Self {
        Self {
            lawyers,
            filters: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn filters(&self) -> Vec<PoolFilter> {
        self.filters.lock().expect("filter mutex poisoned").clone()
    }
}

impl LawyerPool for MemoryPool {
    fn fetch(&self, filter: &PoolFilter) -> Result<Vec<LawyerRecord>, PoolError> {
        self.filters
            .lock()
            .expect("filter mutex poisoned")
            .push(filter.clone());
        Ok(self
            .lawyers
            .iter()
            .filter(|lawyer| filter.accepts(lawyer))
            .cloned()
            .collect())
    }

    fn lookup(&self, id: &LawyerId) -> Result<Option<LawyerRecord>, PoolError> {
        Ok(self.lawyers.iter().find(|lawyer| &lawyer.id == id).cloned())
    }
}

/// Ignores every filter, as a misbehaving store would.
pub(super) struct LeakyPool(pub(super) Vec<LawyerRecord>);

impl LawyerPool for LeakyPool {
    fn fetch(&self, _filter: &PoolFilter) -> Result<Vec<LawyerRecord>, PoolError> {
        Ok(self.0.clone())
    }

    fn lookup(&self, id: &LawyerId) -> Result<Option<LawyerRecord>, PoolError> {
        Ok(self.0.iter().find(|lawyer| &lawyer.id == id).cloned())
    }
}

pub(super) struct UnavailablePool;

impl LawyerPool for UnavailablePool {
    fn fetch(&self, _filter: &PoolFilter) -> Result<Vec<LawyerRecord>, PoolError> {
        Err(PoolError::Unavailable("database offline".to_string()))
    }

    fn lookup(&self, _id: &LawyerId) -> Result<Option<LawyerRecord>, PoolError> {
        Err(PoolError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
