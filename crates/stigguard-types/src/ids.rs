//! Stable identifiers for error kinds and tool metadata.
//!
//! Codes are short snake_case discriminators; they appear in log events and in
//! fail-closed artifacts so the pipeline driver can branch on them.

pub const TOOL_NAME: &str = "stigguard";

// Resolution (fatal: no scan may run without a pinned benchmark)
pub const CODE_CATALOG_UNAVAILABLE: &str = "catalog_unavailable";
pub const CODE_NO_MATCHING_BENCHMARK: &str = "no_matching_benchmark";

// Selection cache (recoverable: treated as a miss)
pub const CODE_CACHE_CORRUPT: &str = "cache_corrupt";

// Gate inputs
pub const CODE_REPORT_PARSE_ERROR: &str = "report_parse_error";
pub const CODE_EXEMPTION_FILE_INVALID: &str = "exemption_file_invalid";

// Gate diagnostics
pub const CODE_EXEMPTION_EXPIRED: &str = "exemption_expired";
pub const CODE_EXEMPTION_NOT_APPLICABLE: &str = "exemption_not_applicable";

// Resolver
pub const CODE_DEGRADED_MATCH: &str = "degraded_match";
