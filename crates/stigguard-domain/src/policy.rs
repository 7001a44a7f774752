use stigguard_types::MatchStrategy;

pub const DEFAULT_CAT_II_THRESHOLD: u32 = 10;

/// Severity policy applied by the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateConfig {
    pub fail_on_cat_i: bool,
    pub fail_on_cat_ii: bool,
    /// CAT II failures are tolerated up to and including this count.
    pub cat_ii_threshold: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            fail_on_cat_i: true,
            fail_on_cat_ii: false,
            cat_ii_threshold: DEFAULT_CAT_II_THRESHOLD,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Roles accepted by the role-relaxed strategy regardless of the target's own role.
    pub generic_roles: Vec<String>,
    /// Whether the version-agnostic last-resort strategy may run at all.
    pub allow_generic_fallback: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            generic_roles: vec!["MS".to_string()],
            allow_generic_fallback: true,
        }
    }
}

impl ResolverConfig {
    pub fn is_generic_role(&self, role: &str) -> bool {
        let role = role.trim();
        !role.is_empty()
            && self
                .generic_roles
                .iter()
                .any(|g| g.trim().eq_ignore_ascii_case(role))
    }

    pub fn strategy_enabled(&self, strategy: MatchStrategy) -> bool {
        match strategy {
            MatchStrategy::GenericFallback => self.allow_generic_fallback,
            _ => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub profile: String,
    pub resolver: ResolverConfig,
    pub gate: GateConfig,
}
