use camino::{Utf8Path, Utf8PathBuf};
use serde::de::Error as _;
use stigguard_types::BenchmarkDescriptor;
use stigguard_types::ids::CODE_CATALOG_UNAVAILABLE;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read benchmark catalog {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("benchmark catalog {path} is not valid")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    pub fn code(&self) -> &'static str {
        CODE_CATALOG_UNAVAILABLE
    }
}

/// A queryable set of benchmark descriptors.
///
/// Each call returns a full snapshot; the resolver never sees a partially updated catalog.
pub trait Catalog {
    fn snapshot(&self) -> Result<Vec<BenchmarkDescriptor>, CatalogError>;
}

/// Catalog exported to a JSON file (a bare array or `{"benchmarks": [...]}`).
#[derive(Clone, Debug)]
pub struct FileCatalog {
    path: Utf8PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl Catalog for FileCatalog {
    fn snapshot(&self) -> Result<Vec<BenchmarkDescriptor>, CatalogError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.clone(),
            source,
        })?;
        parse_catalog(&text).map_err(|source| CatalogError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory catalog.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    entries: Vec<BenchmarkDescriptor>,
}

impl StaticCatalog {
    pub fn new(entries: Vec<BenchmarkDescriptor>) -> Self {
        Self { entries }
    }
}

impl Catalog for StaticCatalog {
    fn snapshot(&self) -> Result<Vec<BenchmarkDescriptor>, CatalogError> {
        Ok(self.entries.clone())
    }
}

pub fn parse_catalog(text: &str) -> Result<Vec<BenchmarkDescriptor>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(crate::strip_bom(text))?;
    match value {
        serde_json::Value::Array(_) => serde_json::from_value(value),
        serde_json::Value::Object(mut map) => match map.remove("benchmarks") {
            Some(list) => serde_json::from_value(list),
            None => Err(serde_json::Error::custom(
                "expected an array of benchmarks or an object with a `benchmarks` array",
            )),
        },
        _ => Err(serde_json::Error::custom(
            "expected an array of benchmarks or an object with a `benchmarks` array",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stigguard_types::ReleaseType;

    const ENTRY: &str = r#"{"id": "ms_2022", "technology": "WindowsServer",
        "technologyRole": "MS", "technologyVersion": "2022",
        "benchmarkVersion": "2.1", "releaseType": "Benchmark"}"#;

    #[test]
    fn parses_bare_array() {
        let entries = parse_catalog(&format!("[{ENTRY}]")).expect("parse");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].release_type, ReleaseType::Benchmark);
    }

    #[test]
    fn parses_wrapped_object_with_bom() {
        let entries = parse_catalog(&format!("\u{feff}{{\"benchmarks\": [{ENTRY}]}}")).expect("parse");
        assert_eq!(entries[0].benchmark_version.as_str(), "2.1");
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(parse_catalog("{\"entries\": []}").is_err());
        assert!(parse_catalog("42").is_err());
        assert!(parse_catalog("").is_err());
    }

    #[test]
    fn missing_file_is_catalog_unavailable() {
        let err = FileCatalog::new("does/not/exist.json")
            .snapshot()
            .expect_err("missing");
        assert_eq!(err.code(), "catalog_unavailable");
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
