use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// DISA severity category. Assigned once when a finding is read and never recomputed.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum SeverityCategory {
    #[serde(rename = "CAT I", alias = "CAT_I", alias = "high")]
    CatI,
    #[serde(rename = "CAT II", alias = "CAT_II", alias = "medium")]
    CatII,
    #[serde(rename = "CAT III", alias = "CAT_III", alias = "low")]
    CatIII,
}

impl SeverityCategory {
    pub fn label(self) -> &'static str {
        match self {
            SeverityCategory::CatI => "CAT I",
            SeverityCategory::CatII => "CAT II",
            SeverityCategory::CatIII => "CAT III",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum FindingStatus {
    Pass,
    Fail,
    #[serde(rename = "Not Tested", alias = "NotTested", alias = "Not_Tested")]
    NotTested,
}

/// One rule result from a scan phase, as emitted by the scan engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Finding {
    pub rule_id: String,
    pub severity: SeverityCategory,
    pub status: FindingStatus,
    #[serde(default)]
    pub title: String,
}

impl Finding {
    pub fn is_failing(&self) -> bool {
        self.status == FindingStatus::Fail
    }

    pub fn is_failing_at(&self, severity: SeverityCategory) -> bool {
        self.is_failing() && self.severity == severity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scan_engine_spelling() {
        let f: Finding = serde_json::from_str(
            r#"{"RuleId": "V-254239", "Severity": "CAT I", "Status": "Not Tested", "Title": "t"}"#,
        )
        .expect("parse finding");
        assert_eq!(f.severity, SeverityCategory::CatI);
        assert_eq!(f.status, FindingStatus::NotTested);
        assert!(!f.is_failing());
    }

    #[test]
    fn unknown_severity_is_rejected() {
        let parsed = serde_json::from_str::<Finding>(
            r#"{"RuleId": "V-1", "Severity": "CAT IV", "Status": "Fail"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn title_is_optional() {
        let f: Finding =
            serde_json::from_str(r#"{"RuleId": "V-1", "Severity": "CAT_II", "Status": "Fail"}"#)
                .expect("parse finding");
        assert!(f.is_failing_at(SeverityCategory::CatII));
        assert_eq!(f.title, "");
    }
}
