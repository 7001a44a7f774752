use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `stigguard.toml` schema v1. Unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StigguardConfigV1 {
    /// Optional schema string for tooling (`stigguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Preset to start from: `default` or `strict`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    #[serde(default)]
    pub resolver: ResolverSection,

    #[serde(default)]
    pub gate: GateSection,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResolverSection {
    /// Roles the role-relaxed strategy accepts for any target (e.g. `["MS"]`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic_roles: Option<Vec<String>>,

    /// Allow the version-agnostic, degraded last-resort match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_generic_fallback: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GateSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on_cat_i: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on_cat_ii: Option<bool>,

    /// CAT II failures tolerated before the gate fails (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cat_ii_threshold: Option<u32>,
}
