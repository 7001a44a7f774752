//! The `resolve` use case: pin one benchmark per run.

use anyhow::Context;
use stigguard_domain::ResolveError;
use stigguard_settings::{Overrides, ResolvedConfig};
use stigguard_store::{Catalog, SelectionCache};
use stigguard_types::ids::CODE_DEGRADED_MATCH;
use stigguard_types::{BenchmarkSelection, MatchStrategy, TargetDescriptor};
use time::OffsetDateTime;

use crate::config::load_config;

/// Input for the resolve use case.
pub struct ResolveInput<'a> {
    pub target: TargetDescriptor,
    pub catalog: &'a dyn Catalog,
    pub cache: &'a SelectionCache,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    pub overrides: Overrides,
    /// Recorded as `selectedDate` when a fresh resolution happens.
    pub now: OffsetDateTime,
}

#[derive(Clone, Debug)]
pub struct ResolveOutput {
    pub selection: BenchmarkSelection,
    /// The selection was read back from the run's cache; the catalog was not queried.
    pub from_cache: bool,
    /// Strategy that won a fresh resolution. `None` on a cache hit.
    pub strategy: Option<MatchStrategy>,
    pub resolved_config: ResolvedConfig,
}

/// Return the run's pinned selection, resolving and persisting it on first use.
pub fn run_resolve(input: ResolveInput<'_>) -> anyhow::Result<ResolveOutput> {
    let resolved = load_config(input.config_text, input.overrides.clone())?;

    if let Some(selection) = input.cache.load().context("read selection cache")? {
        tracing::info!(
            benchmark_id = %selection.benchmark_id,
            benchmark_version = %selection.benchmark_version,
            cache = %input.cache.path(),
            "using pinned benchmark selection"
        );
        return Ok(ResolveOutput {
            selection,
            from_cache: true,
            strategy: None,
            resolved_config: resolved,
        });
    }

    let snapshot = input
        .catalog
        .snapshot()
        .map_err(|e| ResolveError::CatalogUnavailable {
            reason: format!("{:#}", anyhow::Error::new(e)),
        })
        .context("query benchmark catalog")?;
    tracing::debug!(entries = snapshot.len(), target = %input.target, "catalog snapshot taken");

    let resolution = stigguard_domain::resolve(
        &input.target,
        &snapshot,
        &resolved.effective.resolver,
        input.now,
    )
    .context("resolve benchmark")?;

    if resolution.is_degraded() {
        tracing::warn!(
            code = CODE_DEGRADED_MATCH,
            benchmark_id = %resolution.selection.benchmark_id,
            target = %input.target,
            "no version-specific benchmark matched; using generic fallback"
        );
    }
    tracing::info!(
        benchmark_id = %resolution.selection.benchmark_id,
        benchmark_version = %resolution.selection.benchmark_version,
        strategy = resolution.strategy.as_str(),
        candidates = resolution.candidates,
        "resolved benchmark"
    );

    input
        .cache
        .store(&resolution.selection)
        .context("persist benchmark selection")?;

    Ok(ResolveOutput {
        selection: resolution.selection,
        from_cache: false,
        strategy: Some(resolution.strategy),
        resolved_config: resolved,
    })
}

/// Read the run's pinned selection without resolving.
pub fn run_selection(cache: &SelectionCache) -> anyhow::Result<Option<BenchmarkSelection>> {
    cache.load().context("read selection cache")
}
