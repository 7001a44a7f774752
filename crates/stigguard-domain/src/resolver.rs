use crate::error::ResolveError;
use crate::fingerprint::catalog_digest;
use crate::policy::ResolverConfig;
use crate::strategies::predicate_for;
use stigguard_types::{BenchmarkDescriptor, BenchmarkSelection, MatchStrategy, TargetDescriptor};
use time::OffsetDateTime;

/// A fresh resolution plus the evidence of how it was reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub selection: BenchmarkSelection,
    pub strategy: MatchStrategy,
    /// Size of the winning strategy's match set.
    pub candidates: usize,
}

impl Resolution {
    pub fn is_degraded(&self) -> bool {
        self.strategy.is_degraded()
    }
}

/// Resolve the benchmark that governs a run.
///
/// Pure over `(target, catalog, cfg, selected_at)`: the same snapshot always yields the
/// same selection. Draft and other non-`Benchmark` entries are never considered.
pub fn resolve(
    target: &TargetDescriptor,
    catalog: &[BenchmarkDescriptor],
    cfg: &ResolverConfig,
    selected_at: OffsetDateTime,
) -> Result<Resolution, ResolveError> {
    let selectable: Vec<&BenchmarkDescriptor> =
        catalog.iter().filter(|e| e.is_selectable()).collect();

    for strategy in MatchStrategy::ORDERED {
        if !cfg.strategy_enabled(strategy) {
            continue;
        }
        let matches = match_set(strategy, target, &selectable, cfg);
        let Some(best) = highest_version(&matches) else {
            continue;
        };

        let selection = BenchmarkSelection {
            technology_role: best.technology_role.clone(),
            technology_version: best.technology_version.clone(),
            benchmark_version: best.benchmark_version.as_str().to_string(),
            benchmark_id: best.id.clone(),
            selected_at,
            match_strategy: Some(strategy),
            catalog_digest: Some(catalog_digest(catalog)),
        };
        return Ok(Resolution {
            selection,
            strategy,
            candidates: matches.len(),
        });
    }

    Err(ResolveError::NoMatchingBenchmark {
        target: target.clone(),
        considered: selectable.len(),
    })
}

/// Entries accepted by one strategy, in catalog order.
pub fn match_set<'a>(
    strategy: MatchStrategy,
    target: &TargetDescriptor,
    entries: &[&'a BenchmarkDescriptor],
    cfg: &ResolverConfig,
) -> Vec<&'a BenchmarkDescriptor> {
    let predicate = predicate_for(strategy);
    entries
        .iter()
        .copied()
        .filter(|e| predicate(e, target, cfg))
        .collect()
}

/// Highest benchmark version; equal versions keep catalog order.
pub fn highest_version<'a>(
    matches: &[&'a BenchmarkDescriptor],
) -> Option<&'a BenchmarkDescriptor> {
    let mut ordered = matches.to_vec();
    // `sort_by` is stable, so ties resolve to the earliest catalog entry.
    ordered.sort_by(|a, b| b.benchmark_version.cmp(&a.benchmark_version));
    ordered.first().copied()
}
