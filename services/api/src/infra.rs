use jurisconnect::error::AppError;
use jurisconnect::matching::{
    LawyerId, LawyerPool, LawyerRecord, LawyerRoster, PoolError, PoolFilter,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

const SAMPLE_ROSTER: &[u8] = include_bytes!("../../../crates/jurisconnect/data/sample_roster.csv");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read-only lawyer pool backed by a roster snapshot loaded at startup.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLawyerPool {
    lawyers: Arc<Vec<LawyerRecord>>,
}

impl InMemoryLawyerPool {
    pub(crate) fn new(lawyers: Vec<LawyerRecord>) -> Self {
        Self {
            lawyers: Arc::new(lawyers),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.lawyers.len()
    }

    pub(crate) fn snapshot(&self) -> &[LawyerRecord] {
        &self.lawyers
    }
}

impl LawyerPool for InMemoryLawyerPool {
    fn fetch(&self, filter: &PoolFilter) -> Result<Vec<LawyerRecord>, PoolError> {
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

/// Load the roster at `path`, or the bundled sample roster when no path is configured.
pub(crate) fn load_pool(path: Option<&Path>) -> Result<InMemoryLawyerPool, AppError> {
    let lawyers = match path {
        Some(path) => {
            let lawyers = LawyerRoster::from_path(path)?;
            info!(path = %path.display(), lawyers = lawyers.len(), "loaded lawyer roster");
            lawyers
        }
        None => {
            let lawyers = sample_roster()?;
            info!(lawyers = lawyers.len(), "no roster configured; using bundled sample roster");
            lawyers
        }
    };

    Ok(InMemoryLawyerPool::new(lawyers))
}

pub(crate) fn sample_roster() -> Result<Vec<LawyerRecord>, AppError> {
    Ok(LawyerRoster::from_reader(SAMPLE_ROSTER)?)
}
