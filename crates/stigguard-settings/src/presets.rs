use stigguard_domain::policy::{
    DEFAULT_CAT_II_THRESHOLD, EffectiveConfig, GateConfig, ResolverConfig,
};

pub const PRESETS: [&str; 2] = ["default", "strict"];

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything site-specific belongs in `stigguard.toml`.
pub fn preset(profile: &str) -> Option<EffectiveConfig> {
    match profile {
        "default" => Some(default_profile()),
        "strict" => Some(strict_profile()),
        _ => None,
    }
}

fn default_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "default".to_string(),
        resolver: ResolverConfig::default(),
        gate: GateConfig {
            fail_on_cat_i: true,
            fail_on_cat_ii: false,
            cat_ii_threshold: DEFAULT_CAT_II_THRESHOLD,
        },
    }
}

fn strict_profile() -> EffectiveConfig {
    // No degraded matches, and any CAT II failure stops the pipeline.
    EffectiveConfig {
        profile: "strict".to_string(),
        resolver: ResolverConfig {
            allow_generic_fallback: false,
            ..ResolverConfig::default()
        },
        gate: GateConfig {
            fail_on_cat_i: true,
            fail_on_cat_ii: true,
            cat_ii_threshold: 0,
        },
    }
}
