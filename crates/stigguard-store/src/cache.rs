//! Run-scoped selection cache.
//!
//! Layout: `<cache-dir>/<run-id>/benchmark-selection.json`. The first resolution of a run
//! writes the record; every later phase of the same run reads it back unchanged.

use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;
use stigguard_types::BenchmarkSelection;
use stigguard_types::ids::CODE_CACHE_CORRUPT;
use thiserror::Error;

pub const SELECTION_FILE_NAME: &str = "benchmark-selection.json";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("invalid run id {run_id:?} (allowed: letters, digits, '.', '_', '-')")]
    InvalidRunId { run_id: String },
    #[error("selection cache {step} failed for {path}")]
    Io {
        step: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cached selection {path} is corrupt")]
    Corrupt {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize benchmark selection")]
    Serialize(#[source] serde_json::Error),
}

/// Reject run ids that could escape the cache directory.
pub fn validate_run_id(run_id: &str) -> Result<(), CacheError> {
    let ok = !run_id.is_empty()
        && run_id != "."
        && run_id != ".."
        && run_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if ok {
        Ok(())
    } else {
        Err(CacheError::InvalidRunId {
            run_id: run_id.to_string(),
        })
    }
}

#[derive(Clone, Debug)]
pub struct SelectionCache {
    path: Utf8PathBuf,
}

impl SelectionCache {
    pub fn for_run(cache_dir: &Utf8Path, run_id: &str) -> Result<Self, CacheError> {
        validate_run_id(run_id)?;
        Ok(Self {
            path: cache_dir.join(run_id).join(SELECTION_FILE_NAME),
        })
    }

    /// Cache backed by an explicit file path.
    pub fn at(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// `Ok(None)` on a miss; `Err(CacheError::Corrupt)` when the record cannot be parsed.
    pub fn try_load(&self) -> Result<Option<BenchmarkSelection>, CacheError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CacheError::Io {
                    step: "read",
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let text = crate::strip_bom(&text);
        serde_json::from_str(text)
            .map(Some)
            .map_err(|source| CacheError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    /// Like `try_load`, but a corrupt record is treated as absent and logged.
    pub fn load(&self) -> Result<Option<BenchmarkSelection>, CacheError> {
        match self.try_load() {
            Err(CacheError::Corrupt { path, source }) => {
                tracing::warn!(
                    code = CODE_CACHE_CORRUPT,
                    path = %path,
                    error = %source,
                    "ignoring unreadable cached selection"
                );
                Ok(None)
            }
            other => other,
        }
    }

    /// Write the record atomically: temp file in the same directory, fsync, rename.
    pub fn store(&self, selection: &BenchmarkSelection) -> Result<(), CacheError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_str().is_empty())
            .unwrap_or(Utf8Path::new("."));
        std::fs::create_dir_all(dir).map_err(|source| self.io("create_dir", dir, source))?;

        let mut json = serde_json::to_vec_pretty(selection).map_err(CacheError::Serialize)?;
        json.push(b'\n');

        let mut tmp = tempfile::Builder::new()
            .prefix(".benchmark-selection")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|source| self.io("create_temp", dir, source))?;
        tmp.write_all(&json)
            .map_err(|source| self.io("write_temp", tmp.path(), source))?;
        tmp.as_file()
            .sync_all()
            .map_err(|source| self.io("fsync_temp", &self.path, source))?;
        tmp.persist(&self.path)
            .map_err(|e| self.io("rename", &self.path, e.error))?;

        tracing::debug!(path = %self.path, "stored benchmark selection");
        Ok(())
    }

    fn io(
        &self,
        step: &'static str,
        path: impl AsRef<std::path::Path>,
        source: std::io::Error,
    ) -> CacheError {
        let path = Utf8Path::from_path(path.as_ref())
            .map(Utf8Path::to_path_buf)
            .unwrap_or_else(|| self.path.clone());
        CacheError::Io { step, path, source }
    }
}
