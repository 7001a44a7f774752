use crate::BenchmarkSelection;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Stable schema identifier for gate reports.
pub const SCHEMA_GATE_REPORT_V1: &str = "stigguard.gate.v1";

/// Exemption that neutralized a failing CAT I finding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppliedExemption {
    pub rule_id: String,
    pub approver: String,
    pub justification: String,
    #[schemars(with = "String")]
    #[serde(with = "crate::date")]
    pub expiry_date: Date,
}

/// Outcome of one gate evaluation. Pure output; never persisted by the engine itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GateDecision {
    pub passed: bool,

    #[serde(rename = "rawCatI")]
    pub raw_cat_i: u32,
    #[serde(rename = "rawCatII")]
    pub raw_cat_ii: u32,
    #[serde(rename = "rawCatIII")]
    pub raw_cat_iii: u32,
    pub not_tested: u32,

    /// Sorted, de-duplicated ids of failing CAT I rules neutralized by an active exemption.
    pub exempted_rule_ids: Vec<String>,
    #[serde(rename = "effectiveCatI")]
    pub effective_cat_i: u32,
    #[serde(rename = "effectiveCatII")]
    pub effective_cat_ii: u32,

    /// One explanation per failing condition, CAT I before CAT II.
    pub reasons: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applied_exemptions: Vec<AppliedExemption>,

    /// Recoverable input problems and exemption hygiene notices. Never affect `passed`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl GateDecision {
    /// Fail-closed decision used when the findings could not be read at all.
    pub fn input_error(reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            reasons: vec![reason.into()],
            ..Self::default()
        }
    }
}

/// How the driver treats a failed decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GateMode {
    /// Failed decision halts the pipeline (non-zero exit).
    #[default]
    Standard,
    /// Decision is recorded but never halts (baseline scan before remediation).
    Informational,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Envelope the gate CLI writes for the driver and the renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GateReport {
    pub schema: String,
    pub tool: ToolMeta,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    pub mode: GateMode,

    /// Calendar day exemption expiry was checked against.
    #[schemars(with = "String")]
    #[serde(with = "crate::date")]
    pub evaluated_on: Date,

    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,

    /// The benchmark pinned for this run, when the gate was pointed at the run's cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<BenchmarkSelection>,

    pub decision: GateDecision,
}
