//! Match strategies, tried in `MatchStrategy::ORDERED` until one yields a non-empty set.
//!
//! Every strategy is a pure predicate over one catalog entry. Comparisons are ASCII
//! case-insensitive and an empty needle never substring-matches.

use crate::policy::ResolverConfig;
use stigguard_types::{BenchmarkDescriptor, MatchStrategy, TargetDescriptor};

pub type MatchPredicate = fn(&BenchmarkDescriptor, &TargetDescriptor, &ResolverConfig) -> bool;

pub fn predicate_for(strategy: MatchStrategy) -> MatchPredicate {
    match strategy {
        MatchStrategy::Exact => exact,
        MatchStrategy::RoleRelaxed => role_relaxed,
        MatchStrategy::VersionPattern => version_pattern,
        MatchStrategy::GenericFallback => generic_fallback,
    }
}

/// Role equals the target's role (when it has one) and version equals its major version.
pub fn exact(entry: &BenchmarkDescriptor, target: &TargetDescriptor, _: &ResolverConfig) -> bool {
    let role_ok = target
        .role()
        .is_none_or(|role| eq_ci(&entry.technology_role, role));
    role_ok
        && family_compatible(entry, target)
        && !target.os_version_major.trim().is_empty()
        && eq_ci(&entry.technology_version, &target.os_version_major)
}

/// Role is the target's own or a generic server role; version equal or a substring either way.
pub fn role_relaxed(
    entry: &BenchmarkDescriptor,
    target: &TargetDescriptor,
    cfg: &ResolverConfig,
) -> bool {
    let role_ok = target
        .role()
        .is_some_and(|role| eq_ci(&entry.technology_role, role))
        || cfg.is_generic_role(&entry.technology_role);
    role_ok
        && family_compatible(entry, target)
        && version_matches(&entry.technology_version, &target.os_version_major)
}

/// Major version appears anywhere in the entry's version, id, or title (e.g. `Server2022`).
pub fn version_pattern(
    entry: &BenchmarkDescriptor,
    target: &TargetDescriptor,
    _: &ResolverConfig,
) -> bool {
    let major = target.os_version_major.as_str();
    family_compatible(entry, target)
        && (contains_ci(&entry.technology_version, major)
            || contains_ci(&entry.id, major)
            || entry.title.as_deref().is_some_and(|t| contains_ci(t, major)))
}

/// Any entry of the same broad OS family, version ignored. Degraded.
pub fn generic_fallback(
    entry: &BenchmarkDescriptor,
    target: &TargetDescriptor,
    _: &ResolverConfig,
) -> bool {
    family_matches(entry, target)
}

/// The entry positively names the target's OS family (technology, id, or title).
pub fn family_matches(entry: &BenchmarkDescriptor, target: &TargetDescriptor) -> bool {
    let family = target.os_family.as_str();
    contains_ci(&entry.technology, family)
        || contains_ci(family, &entry.technology)
        || contains_ci(&entry.id, family)
        || entry.title.as_deref().is_some_and(|t| contains_ci(t, family))
}

/// Entries that declare no technology are compatible with every family.
fn family_compatible(entry: &BenchmarkDescriptor, target: &TargetDescriptor) -> bool {
    entry.technology.trim().is_empty() || family_matches(entry, target)
}

/// The entry's version equals the major version, contains it (`Server2022`), or is one
/// whole token of it (`2022` in `2022R2`). A lone digit never matches inside `2016`.
fn version_matches(entry_version: &str, major: &str) -> bool {
    (!major.trim().is_empty() && eq_ci(entry_version, major))
        || contains_ci(entry_version, major)
        || version_tokens(major)
            .iter()
            .any(|token| eq_ci(token, entry_version))
}

/// Split on non-alphanumerics and on digit/letter boundaries: `2022R2` -> `2022`, `R`, `2`.
fn version_tokens(version: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut prev_digit = false;
    for (i, c) in version.char_indices() {
        if !c.is_ascii_alphanumeric() {
            if let Some(s) = start.take() {
                tokens.push(&version[s..i]);
            }
            continue;
        }
        let digit = c.is_ascii_digit();
        match start {
            Some(s) if digit != prev_digit => {
                tokens.push(&version[s..i]);
                start = Some(i);
            }
            Some(_) => {}
            None => start = Some(i),
        }
        prev_digit = digit;
    }
    if let Some(s) = start {
        tokens.push(&version[s..]);
    }
    tokens
}

fn eq_ci(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    !needle.is_empty()
        && haystack
            .to_ascii_lowercase()
            .contains(&needle.to_ascii_lowercase())
}
