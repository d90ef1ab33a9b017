use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scoring::{MatchResult, DEFAULT_RESULT_LIMIT};

pub const ALGORITHM_VERSION: &str = "case-matching/1.0";

/// Observational metadata for one matching run. Never affects ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchMetadata {
    pub direct_count: usize,
    pub algorithm_count: usize,
    pub algorithm_version: String,
    pub generated_at: DateTime<Utc>,
}

/// Final ranked list handed back to the API layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub matches: Vec<MatchResult>,
    pub metadata: MatchMetadata,
}

impl MatchReport {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Merges direct assignments with ranked matches.
#[derive(Debug, Clone, Copy)]
pub struct ResultAssembler {
    default_limit: usize,
}

impl Default for ResultAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_RESULT_LIMIT)
    }
}

impl ResultAssembler {
    pub fn new(default_limit: usize) -> Self {
        Self { default_limit }
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    pub fn assemble(
        &self,
        direct: Vec<MatchResult>,
        algorithm: Vec<MatchResult>,
        limit: Option<usize>,
    ) -> MatchReport {
        self.assemble_at(direct, algorithm, limit, Utc::now())
    }

    /// Direct matches keep their order; ranked matches follow, skipping lawyers already
    /// present. The combined list is cut to `limit`.
    pub fn assemble_at(
        &self,
        direct: Vec<MatchResult>,
        algorithm: Vec<MatchResult>,
        limit: Option<usize>,
        generated_at: DateTime<Utc>,
    ) -> MatchReport {
        let limit = limit.unwrap_or(self.default_limit);
        let mut seen = HashSet::new();
        let mut matches = Vec::with_capacity(limit.min(direct.len() + algorithm.len()));
        let mut direct_count = 0;
        let mut algorithm_count = 0;

        for result in direct {
            if matches.len() >= limit {
                break;
            }
            if seen.insert(result.lawyer.id.clone()) {
                direct_count += 1;
                matches.push(result);
            }
        }

        for result in algorithm {
            if matches.len() >= limit {
                break;
            }
            if seen.insert(result.lawyer.id.clone()) {
                algorithm_count += 1;
                matches.push(result);
            }
        }

        MatchReport {
            matches,
            metadata: MatchMetadata {
                direct_count,
                algorithm_count,
                algorithm_version: ALGORITHM_VERSION.to_string(),
                generated_at,
            },
        }
    }
}
