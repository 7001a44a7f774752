//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Resolver determinism and Draft exclusion
//! - Gate count arithmetic and severity asymmetry

use crate::gate::evaluate;
use crate::policy::GateConfig;
use crate::resolver::resolve;
use crate::test_support::{SELECTED_AT, exemption, finding, policy, resolver_config, target};
use proptest::prelude::*;
use stigguard_types::{
    BenchmarkDescriptor, BenchmarkVersion, ExemptionPolicy, Finding, FindingStatus, ReleaseType,
    SeverityCategory,
};
use time::macros::date;

fn arb_release_type() -> impl Strategy<Value = ReleaseType> {
    prop_oneof![
        3 => Just(ReleaseType::Benchmark),
        1 => Just(ReleaseType::Draft),
        1 => Just(ReleaseType::Other),
    ]
}

fn arb_entry() -> impl Strategy<Value = BenchmarkDescriptor> {
    (
        "[a-z]{1,8}",
        prop_oneof![Just("MS"), Just("DC"), Just("Workstation")],
        prop_oneof![Just("2016"), Just("2019"), Just("2022"), Just("Server2022")],
        (0u64..5, 0u64..20),
        arb_release_type(),
    )
        .prop_map(|(id, role, version, (major, minor), release_type)| BenchmarkDescriptor {
            id,
            technology: "WindowsServer".to_string(),
            technology_role: role.to_string(),
            technology_version: version.to_string(),
            benchmark_version: BenchmarkVersion::parse(&format!("{major}.{minor}")),
            release_type,
            title: None,
        })
}

fn arb_severity() -> impl Strategy<Value = SeverityCategory> {
    prop_oneof![
        Just(SeverityCategory::CatI),
        Just(SeverityCategory::CatII),
        Just(SeverityCategory::CatIII),
    ]
}

fn arb_status() -> impl Strategy<Value = FindingStatus> {
    prop_oneof![
        Just(FindingStatus::Pass),
        Just(FindingStatus::Fail),
        Just(FindingStatus::NotTested),
    ]
}

fn arb_findings() -> impl Strategy<Value = Vec<Finding>> {
    prop::collection::vec(
        (0u32..30, arb_severity(), arb_status())
            .prop_map(|(n, sev, status)| finding(&format!("V-{n}"), sev, status)),
        0..40,
    )
}

fn arb_gate_config() -> impl Strategy<Value = GateConfig> {
    (any::<bool>(), any::<bool>(), 0u32..15).prop_map(|(i, ii, threshold)| GateConfig {
        fail_on_cat_i: i,
        fail_on_cat_ii: ii,
        cat_ii_threshold: threshold,
    })
}

proptest! {
    #[test]
    fn resolve_is_deterministic(catalog in prop::collection::vec(arb_entry(), 0..12)) {
        let t = target("2022", Some("MS"));
        let first = resolve(&t, &catalog, &resolver_config(), SELECTED_AT);
        let second = resolve(&t, &catalog, &resolver_config(), SELECTED_AT);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn resolve_never_selects_non_benchmark(catalog in prop::collection::vec(arb_entry(), 1..12)) {
        if let Ok(res) = resolve(&target("2022", Some("DC")), &catalog, &resolver_config(), SELECTED_AT) {
            let picked = catalog
                .iter()
                .find(|e| e.id == res.selection.benchmark_id && e.is_selectable());
            prop_assert!(picked.is_some());
        }
    }

    #[test]
    fn gate_counts_are_consistent(
        findings in arb_findings(),
        exempt in prop::collection::vec(0u32..30, 0..10),
        cfg in arb_gate_config(),
    ) {
        let ids: Vec<String> = exempt.iter().map(|n| format!("V-{n}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let p = policy(vec![exemption(&refs, date!(2027 - 01 - 01))]);
        let d = evaluate(&findings, &p, date!(2026 - 10 - 19), &cfg);

        prop_assert!(d.effective_cat_i <= d.raw_cat_i);
        prop_assert_eq!(d.effective_cat_ii, d.raw_cat_ii);
        let expected = !(cfg.fail_on_cat_i && d.effective_cat_i > 0)
            && !(cfg.fail_on_cat_ii && d.effective_cat_ii > cfg.cat_ii_threshold);
        prop_assert_eq!(d.passed, expected);
        prop_assert_eq!(d.passed, d.reasons.is_empty());

        let mut sorted = d.exempted_rule_ids.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted, d.exempted_rule_ids.clone());
    }

    #[test]
    fn cat_iii_failures_never_change_the_outcome(
        findings in arb_findings(),
        extra in 0usize..40,
        cfg in arb_gate_config(),
    ) {
        let today = date!(2026 - 10 - 19);
        let base = evaluate(&findings, &ExemptionPolicy::empty(), today, &cfg);

        let mut padded = findings.clone();
        padded.extend((0..extra).map(|n| finding(&format!("V-9{n}"), SeverityCategory::CatIII, FindingStatus::Fail)));
        let with_cat_iii = evaluate(&padded, &ExemptionPolicy::empty(), today, &cfg);

        prop_assert_eq!(base.passed, with_cat_iii.passed);
        prop_assert_eq!(base.reasons, with_cat_iii.reasons);
    }
}
