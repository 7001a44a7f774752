use stigguard_types::{TargetDescriptor, ids};
use thiserror::Error;

/// Resolution failures. Both kinds are fatal: remediation must not run without a
/// pinned benchmark.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("benchmark catalog unavailable: {reason}")]
    CatalogUnavailable { reason: String },

    #[error("no benchmark in the catalog matches {target} ({considered} selectable entries considered)")]
    NoMatchingBenchmark {
        target: TargetDescriptor,
        considered: usize,
    },
}

impl ResolveError {
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::CatalogUnavailable { .. } => ids::CODE_CATALOG_UNAVAILABLE,
            ResolveError::NoMatchingBenchmark { .. } => ids::CODE_NO_MATCHING_BENCHMARK,
        }
    }
}
