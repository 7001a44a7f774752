use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// Benchmark release version, compared numerically rather than lexically.
///
/// Catalogs spell versions loosely (`2`, `2.1`, `"1.10"`, `"V2R1"`). Every run of
/// decimal digits becomes one component and components compare as integers, so
/// `1.10 > 1.9` and `V2R1 > V1R12`. Trailing zero components are insignificant:
/// `2` and `2.0` are the same release.
#[derive(Clone, Debug)]
pub struct BenchmarkVersion {
    raw: String,
    parts: Vec<u64>,
}

impl BenchmarkVersion {
    pub fn parse<S: AsRef<str>>(raw: S) -> Self {
        let raw = raw.as_ref().trim().to_string();
        let mut parts = Vec::new();
        let mut current: Option<u64> = None;
        for c in raw.chars() {
            match c.to_digit(10) {
                Some(d) => {
                    let acc = current.unwrap_or(0);
                    current = Some(acc.saturating_mul(10).saturating_add(u64::from(d)));
                }
                None => {
                    if let Some(n) = current.take() {
                        parts.push(n);
                    }
                }
            }
        }
        if let Some(n) = current {
            parts.push(n);
        }
        Self { raw, parts }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn parts(&self) -> &[u64] {
        &self.parts
    }

    fn significant(&self) -> &[u64] {
        let end = self
            .parts
            .iter()
            .rposition(|p| *p != 0)
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.parts[..end]
    }
}

impl PartialEq for BenchmarkVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BenchmarkVersion {}

impl PartialOrd for BenchmarkVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BenchmarkVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.significant().cmp(other.significant())
    }
}

impl fmt::Display for BenchmarkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for BenchmarkVersion {
    fn from(value: &str) -> Self {
        BenchmarkVersion::parse(value)
    }
}

impl Serialize for BenchmarkVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVersion {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for BenchmarkVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = match RawVersion::deserialize(deserializer)? {
            RawVersion::Text(s) => s,
            RawVersion::Number(n) => n.to_string(),
        };
        Ok(BenchmarkVersion::parse(raw))
    }
}

impl JsonSchema for BenchmarkVersion {
    fn schema_name() -> Cow<'static, str> {
        "BenchmarkVersion".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": ["string", "number"],
            "description": "Benchmark release version; digit runs compare numerically."
        })
    }
}
