use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use time::Date;

/// Operator-approved, time-bounded override; one justification and expiry cover all `ruleIds`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExemptionEntry {
    pub rule_ids: Vec<String>,
    #[serde(default)]
    pub justification: String,
    #[serde(default)]
    pub approver: String,
    /// Last day (inclusive) on which the exemption applies, `YYYY-MM-DD`.
    #[schemars(with = "String")]
    #[serde(with = "crate::date")]
    pub expiry_date: Date,
}

impl ExemptionEntry {
    pub fn covers(&self, rule_id: &str) -> bool {
        self.rule_ids.iter().any(|r| r.trim() == rule_id)
    }

    pub fn is_active_on(&self, today: Date) -> bool {
        self.expiry_date >= today
    }
}

/// The exemption file. `exemptions` may be a single object or a list of them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExemptionPolicy {
    #[schemars(with = "Vec<ExemptionEntry>")]
    #[serde(default, deserialize_with = "one_or_many")]
    pub exemptions: Vec<ExemptionEntry>,
}

impl ExemptionPolicy {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.exemptions.is_empty()
    }

    /// First entry (in file order) listing `rule_id` that has not expired on `today`.
    pub fn active_for(&self, rule_id: &str, today: Date) -> Option<&ExemptionEntry> {
        self.exemptions
            .iter()
            .find(|e| e.covers(rule_id) && e.is_active_on(today))
    }

    /// Whether any entry lists `rule_id`, regardless of expiry.
    pub fn lists(&self, rule_id: &str) -> bool {
        self.exemptions.iter().any(|e| e.covers(rule_id))
    }

    /// Latest expiry among the entries listing `rule_id`.
    pub fn latest_expiry_for(&self, rule_id: &str) -> Option<Date> {
        self.exemptions
            .iter()
            .filter(|e| e.covers(rule_id))
            .map(|e| e.expiry_date)
            .max()
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<ExemptionEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(Vec::new()),
        serde_json::Value::Array(_) => serde_json::from_value(value).map_err(D::Error::custom),
        other => serde_json::from_value::<ExemptionEntry>(other)
            .map(|entry| vec![entry])
            .map_err(D::Error::custom),
    }
}
