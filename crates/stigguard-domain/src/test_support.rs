use crate::policy::{GateConfig, ResolverConfig};
use stigguard_types::{
    BenchmarkDescriptor, BenchmarkVersion, ExemptionEntry, ExemptionPolicy, Finding,
    FindingStatus, ReleaseType, SeverityCategory, TargetDescriptor,
};
use time::{Date, OffsetDateTime, macros::datetime};

pub const SELECTED_AT: OffsetDateTime = datetime!(2026-10-19 08:00 UTC);

pub fn entry(
    id: &str,
    role: &str,
    version: &str,
    benchmark_version: &str,
    release_type: ReleaseType,
) -> BenchmarkDescriptor {
    BenchmarkDescriptor {
        id: id.to_string(),
        technology: "WindowsServer".to_string(),
        technology_role: role.to_string(),
        technology_version: version.to_string(),
        benchmark_version: BenchmarkVersion::parse(benchmark_version),
        release_type,
        title: None,
    }
}

pub fn entry_in_family(
    id: &str,
    technology: &str,
    role: &str,
    version: &str,
    benchmark_version: &str,
) -> BenchmarkDescriptor {
    BenchmarkDescriptor {
        technology: technology.to_string(),
        ..entry(id, role, version, benchmark_version, ReleaseType::Benchmark)
    }
}

pub fn target(version: &str, role: Option<&str>) -> TargetDescriptor {
    TargetDescriptor::new("WindowsServer", version, role)
}

pub fn resolver_config() -> ResolverConfig {
    ResolverConfig::default()
}

pub fn finding(rule_id: &str, severity: SeverityCategory, status: FindingStatus) -> Finding {
    Finding {
        rule_id: rule_id.to_string(),
        severity,
        status,
        title: format!("rule {rule_id}"),
    }
}

pub fn failing(rule_id: &str, severity: SeverityCategory) -> Finding {
    finding(rule_id, severity, FindingStatus::Fail)
}

pub fn exemption(rule_ids: &[&str], expiry_date: Date) -> ExemptionEntry {
    ExemptionEntry {
        rule_ids: rule_ids.iter().map(|r| r.to_string()).collect(),
        justification: "vendor patch pending".to_string(),
        approver: "isso@example.mil".to_string(),
        expiry_date,
    }
}

pub fn policy(entries: Vec<ExemptionEntry>) -> ExemptionPolicy {
    ExemptionPolicy {
        exemptions: entries,
    }
}

pub fn gate_config(fail_on_cat_i: bool, fail_on_cat_ii: bool, threshold: u32) -> GateConfig {
    GateConfig {
        fail_on_cat_i,
        fail_on_cat_ii,
        cat_ii_threshold: threshold,
    }
}
