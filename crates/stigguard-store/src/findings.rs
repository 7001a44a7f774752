use camino::{Utf8Path, Utf8PathBuf};
use serde::de::Error as _;
use stigguard_types::Finding;
use stigguard_types::ids::CODE_REPORT_PARSE_ERROR;
use thiserror::Error;

/// The findings artifact could not be read. Fatal at the gate.
#[derive(Debug, Error)]
pub enum ReportParseError {
    #[error("failed to read findings report {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("findings report {path} is not a valid findings document")]
    Invalid {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ReportParseError {
    pub fn code(&self) -> &'static str {
        CODE_REPORT_PARSE_ERROR
    }
}

/// Parse a scan engine findings document: a JSON array of findings or one finding object.
///
/// Empty input is an error, not an empty result; an absent report must not look like a
/// clean scan.
pub fn parse_findings(text: &str) -> Result<Vec<Finding>, serde_json::Error> {
    let text = crate::strip_bom(text);
    if text.trim().is_empty() {
        return Err(serde_json::Error::custom("findings report is empty"));
    }
    let value: serde_json::Value = serde_json::from_str(text)?;
    match value {
        serde_json::Value::Array(_) => serde_json::from_value(value),
        serde_json::Value::Object(_) => serde_json::from_value::<Finding>(value).map(|f| vec![f]),
        _ => Err(serde_json::Error::custom(
            "expected an array of findings or a single finding object",
        )),
    }
}

pub fn read_findings(path: &Utf8Path) -> Result<Vec<Finding>, ReportParseError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReportParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_findings(&text).map_err(|source| ReportParseError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}
