use camino::{Utf8Path, Utf8PathBuf};
use stigguard_types::ExemptionPolicy;
use stigguard_types::ids::CODE_EXEMPTION_FILE_INVALID;
use thiserror::Error;

/// The exemption file could not be used. Recoverable: callers substitute an empty policy.
#[derive(Debug, Error)]
pub enum ExemptionFileInvalid {
    #[error("failed to read exemption file {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("exemption file {path} is not valid")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ExemptionFileInvalid {
    pub fn code(&self) -> &'static str {
        CODE_EXEMPTION_FILE_INVALID
    }
}

/// Parse an exemption document. A blank file is an empty policy.
pub fn parse_exemptions(text: &str) -> Result<ExemptionPolicy, serde_json::Error> {
    let text = crate::strip_bom(text);
    if text.trim().is_empty() {
        return Ok(ExemptionPolicy::empty());
    }
    serde_json::from_str(text)
}

pub fn read_exemptions(path: &Utf8Path) -> Result<ExemptionPolicy, ExemptionFileInvalid> {
    let text = std::fs::read_to_string(path).map_err(|source| ExemptionFileInvalid::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_exemptions(&text).map_err(|source| ExemptionFileInvalid::Parse {
        path: path.to_path_buf(),
        source,
    })
}
