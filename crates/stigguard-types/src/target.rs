use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the run is evaluating: built once by the caller, never read from the environment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TargetDescriptor {
    /// Broad OS family, e.g. `WindowsServer` or `RHEL`.
    pub os_family: String,
    /// Major OS version as the catalog spells it, e.g. `2022` or `9`.
    pub os_version_major: String,
    /// Optional technology role, e.g. `MS` (member server) or `DC`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl TargetDescriptor {
    pub fn new<F, V>(os_family: F, os_version_major: V, role: Option<&str>) -> Self
    where
        F: AsRef<str>,
        V: AsRef<str>,
    {
        Self {
            os_family: os_family.as_ref().trim().to_string(),
            os_version_major: os_version_major.as_ref().trim().to_string(),
            role: role
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
        }
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }
}

impl fmt::Display for TargetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.os_family, self.os_version_major)?;
        if let Some(role) = &self.role {
            write!(f, " (role {role})")?;
        }
        Ok(())
    }
}
