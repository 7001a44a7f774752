use anyhow::Context;
use stigguard_settings::{Overrides, ResolvedConfig, StigguardConfigV1};

/// Parse config text (empty is allowed, the preset applies) and resolve it with overrides.
pub fn load_config(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        StigguardConfigV1::default()
    } else {
        stigguard_settings::parse_config_toml(config_text).context("parse config")?
    };
    stigguard_settings::resolve_config(cfg, overrides).context("resolve config")
}
