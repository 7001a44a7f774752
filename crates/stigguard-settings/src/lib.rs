//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{GateSection, ResolverSection, StigguardConfigV1};
pub use resolve::{Overrides, ResolvedConfig};

/// Schema id tooling may put in `stigguard.toml`.
pub const SCHEMA_CONFIG_V1: &str = "stigguard.config.v1";

/// Parse `stigguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<StigguardConfigV1> {
    let cfg: StigguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (preset + file + overrides).
pub fn resolve_config(
    cfg: StigguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
