#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableOutcome {
    Pass,
    Fail,
    /// Failed decision recorded in informational mode; the pipeline continued.
    Advisory,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableBenchmark {
    pub id: String,
    pub version: String,
    pub role: String,
    pub technology_version: String,
    pub degraded: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderableCounts {
    pub raw_cat_i: u32,
    pub raw_cat_ii: u32,
    pub raw_cat_iii: u32,
    pub not_tested: u32,
    pub effective_cat_i: u32,
    pub effective_cat_ii: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableExemption {
    pub rule_id: String,
    pub approver: String,
    pub justification: String,
    pub expiry_date: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableGate {
    pub outcome: RenderableOutcome,
    pub phase: Option<String>,
    pub evaluated_on: String,
    pub benchmark: Option<RenderableBenchmark>,
    pub counts: RenderableCounts,
    pub reasons: Vec<String>,
    pub exemptions: Vec<RenderableExemption>,
    pub warnings: Vec<String>,
}
