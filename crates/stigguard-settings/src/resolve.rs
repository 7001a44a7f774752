use crate::{model::StigguardConfigV1, presets};
use stigguard_domain::policy::EffectiveConfig;

/// Values set on the command line. They win over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub fail_on_cat_i: Option<bool>,
    pub fail_on_cat_ii: Option<bool>,
    pub cat_ii_threshold: Option<u32>,
    pub allow_generic_fallback: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: StigguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "default".to_string());

    let Some(mut effective) = presets::preset(&profile) else {
        anyhow::bail!(
            "unknown profile: {profile} (expected {})",
            presets::PRESETS.join("|")
        );
    };

    // resolver
    if let Some(roles) = cfg.resolver.generic_roles {
        let roles: Vec<String> = roles
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        effective.resolver.generic_roles = roles;
    }
    if let Some(allow) = overrides
        .allow_generic_fallback
        .or(cfg.resolver.allow_generic_fallback)
    {
        effective.resolver.allow_generic_fallback = allow;
    }

    // gate
    if let Some(v) = overrides.fail_on_cat_i.or(cfg.gate.fail_on_cat_i) {
        effective.gate.fail_on_cat_i = v;
    }
    if let Some(v) = overrides.fail_on_cat_ii.or(cfg.gate.fail_on_cat_ii) {
        effective.gate.fail_on_cat_ii = v;
    }
    if let Some(v) = overrides.cat_ii_threshold.or(cfg.gate.cat_ii_threshold) {
        effective.gate.cat_ii_threshold = v;
    }

    Ok(ResolvedConfig { effective })
}
