use stigguard_domain::ResolveError;
use stigguard_store::{CacheError, CatalogError, ExemptionFileInvalid, ReportParseError};
use stigguard_types::ids;

/// Stable error code for the first typed error in an `anyhow` chain.
pub fn error_code(err: &anyhow::Error) -> Option<&'static str> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<ResolveError>() {
            Some(e.code())
        } else if let Some(e) = cause.downcast_ref::<CatalogError>() {
            Some(e.code())
        } else if let Some(e) = cause.downcast_ref::<ReportParseError>() {
            Some(e.code())
        } else if let Some(e) = cause.downcast_ref::<ExemptionFileInvalid>() {
            Some(e.code())
        } else if let Some(CacheError::Corrupt { .. }) = cause.downcast_ref::<CacheError>() {
            Some(ids::CODE_CACHE_CORRUPT)
        } else {
            None
        }
    })
}
