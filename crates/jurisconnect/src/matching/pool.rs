use serde::{Deserialize, Serialize};

use super::domain::{LawyerId, LawyerRecord, PracticeArea};

/// Query contract the matching service needs from the lawyer profile store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolFilter {
    pub practice_area: Option<PracticeArea>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub active_only: bool,
    pub verified_only: bool,
}

impl Default for PoolFilter {
    fn default() -> Self {
        Self {
            practice_area: None,
            state: None,
            city: None,
            active_only: true,
            verified_only: true,
        }
    }
}

impl PoolFilter {
    /// Reference predicate for in-memory pools.
    pub fn accepts(&self, lawyer: &LawyerRecord) -> bool {
        if self.active_only && !lawyer.active {
            return false;
        }
        if self.verified_only && !lawyer.verified {
            return false;
        }
        if let Some(area) = self.practice_area {
            if !lawyer.practices(area) {
                return false;
            }
        }
        if let Some(state) = self.state.as_deref() {
            if !lawyer.in_state(state) {
                return false;
            }
        }
        if let Some(city) = self.city.as_deref() {
            if !lawyer.in_city(city) {
                return false;
            }
        }
        true
    }
}

/// Storage abstraction over lawyer profiles so matching can run without a database.
pub trait LawyerPool: Send + Sync {
    fn fetch(&self, filter: &PoolFilter) -> Result<Vec<LawyerRecord>, PoolError>;
    fn lookup(&self, id: &LawyerId) -> Result<Option<LawyerRecord>, PoolError>;
}

/// Error enumeration for pool fetch failures.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("lawyer pool unavailable: {0}")]
    Unavailable(String),
    #[error("lawyer pool query failed: {0}")]
    Query(String),
}
