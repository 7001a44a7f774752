//! Filesystem adapters: the benchmark catalog, the run-scoped selection cache, and the
//! findings and exemption artifacts the gate consumes.
//!
//! This crate is allowed to do filesystem IO. It performs no policy decisions; those live
//! in `stigguard-domain`.

#![forbid(unsafe_code)]

pub mod cache;
pub mod catalog;
pub mod exemptions;
pub mod findings;

pub use cache::{CacheError, SELECTION_FILE_NAME, SelectionCache, validate_run_id};
pub use catalog::{Catalog, CatalogError, FileCatalog, StaticCatalog, parse_catalog};
pub use exemptions::{ExemptionFileInvalid, parse_exemptions, read_exemptions};
pub use findings::{ReportParseError, parse_findings, read_findings};

/// Scan tools on Windows commonly emit a UTF-8 byte order mark.
pub(crate) fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}
