use crate::BenchmarkVersion;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Publication state of a catalog entry. Only `Benchmark` is ever auto-selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ReleaseType {
    #[serde(alias = "benchmark", alias = "BENCHMARK")]
    Benchmark,
    #[serde(alias = "draft", alias = "DRAFT")]
    Draft,
    #[serde(other)]
    Other,
}

/// One entry of the benchmark catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkDescriptor {
    pub id: String,

    /// Broad OS family the benchmark targets (e.g. `WindowsServer`); may be empty.
    #[serde(default)]
    pub technology: String,

    pub technology_role: String,
    pub technology_version: String,
    pub benchmark_version: BenchmarkVersion,
    pub release_type: ReleaseType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl BenchmarkDescriptor {
    pub fn is_selectable(&self) -> bool {
        self.release_type == ReleaseType::Benchmark
    }
}
