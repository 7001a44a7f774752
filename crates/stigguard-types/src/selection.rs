use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Schema id for the selection cache record.
pub const SCHEMA_SELECTION_V1: &str = "stigguard.selection.v1";

/// Which resolver strategy produced a selection, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    Exact,
    RoleRelaxed,
    VersionPattern,
    GenericFallback,
}

impl MatchStrategy {
    pub const ORDERED: [MatchStrategy; 4] = [
        MatchStrategy::Exact,
        MatchStrategy::RoleRelaxed,
        MatchStrategy::VersionPattern,
        MatchStrategy::GenericFallback,
    ];

    /// A degraded match ignored the target's version entirely.
    pub fn is_degraded(self) -> bool {
        self == MatchStrategy::GenericFallback
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchStrategy::Exact => "exact",
            MatchStrategy::RoleRelaxed => "role_relaxed",
            MatchStrategy::VersionPattern => "version_pattern",
            MatchStrategy::GenericFallback => "generic_fallback",
        }
    }
}

/// The benchmark pinned for one pipeline run, in the driver's cache record spelling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BenchmarkSelection {
    #[serde(rename = "technology")]
    pub technology_role: String,

    #[serde(rename = "version")]
    pub technology_version: String,

    #[serde(rename = "stigVersion")]
    pub benchmark_version: String,

    #[serde(rename = "stigId")]
    pub benchmark_id: String,

    #[schemars(with = "String")]
    #[serde(rename = "selectedDate", with = "time::serde::rfc3339")]
    pub selected_at: OffsetDateTime,

    /// Absent in records written by other tools.
    #[serde(
        rename = "matchStrategy",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub match_strategy: Option<MatchStrategy>,

    /// SHA-256 of the catalog snapshot the selection was resolved from.
    #[serde(
        rename = "catalogDigest",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub catalog_digest: Option<String>,
}

impl BenchmarkSelection {
    pub fn is_degraded(&self) -> bool {
        self.match_strategy.is_some_and(MatchStrategy::is_degraded)
    }
}
