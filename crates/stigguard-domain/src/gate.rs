use crate::policy::GateConfig;
use std::collections::{BTreeMap, BTreeSet};
use stigguard_types::ids::{CODE_EXEMPTION_EXPIRED, CODE_EXEMPTION_NOT_APPLICABLE};
use stigguard_types::{
    AppliedExemption, ExemptionPolicy, Finding, FindingStatus, GateDecision, SeverityCategory,
    format_iso_date,
};
use time::Date;

/// Rule ids named in a reason before the list is elided.
const MAX_LISTED_RULES: usize = 10;

/// Decide whether the pipeline may proceed past a scan phase.
///
/// Pure over `(findings, policy, today, cfg)`. Only CAT I failures can be neutralized by
/// an exemption, CAT III never gates, and `NotTested` results are counted but ignored.
pub fn evaluate(
    findings: &[Finding],
    policy: &ExemptionPolicy,
    today: Date,
    cfg: &GateConfig,
) -> GateDecision {
    let mut decision = GateDecision::default();

    let mut exempted: BTreeSet<String> = BTreeSet::new();
    let mut applied: BTreeMap<String, AppliedExemption> = BTreeMap::new();
    let mut unexempted_cat_i: BTreeSet<&str> = BTreeSet::new();
    let mut warnings: BTreeSet<String> = BTreeSet::new();

    for finding in findings {
        match finding.status {
            FindingStatus::NotTested => {
                decision.not_tested += 1;
                continue;
            }
            FindingStatus::Pass => continue,
            FindingStatus::Fail => {}
        }

        let rule_id = finding.rule_id.trim();
        match finding.severity {
            SeverityCategory::CatI => {
                decision.raw_cat_i += 1;
                if let Some(entry) = policy.active_for(rule_id, today) {
                    exempted.insert(rule_id.to_string());
                    applied
                        .entry(rule_id.to_string())
                        .or_insert_with(|| AppliedExemption {
                            rule_id: rule_id.to_string(),
                            approver: entry.approver.clone(),
                            justification: entry.justification.clone(),
                            expiry_date: entry.expiry_date,
                        });
                } else {
                    decision.effective_cat_i += 1;
                    unexempted_cat_i.insert(rule_id);
                    if let Some(expired_on) = policy.latest_expiry_for(rule_id) {
                        warnings.insert(format!(
                            "{CODE_EXEMPTION_EXPIRED}: exemption for {rule_id} expired on {}",
                            format_iso_date(expired_on)
                        ));
                    }
                }
            }
            SeverityCategory::CatII | SeverityCategory::CatIII => {
                if finding.severity == SeverityCategory::CatII {
                    decision.raw_cat_ii += 1;
                } else {
                    decision.raw_cat_iii += 1;
                }
                if policy.lists(rule_id) {
                    warnings.insert(format!(
                        "{CODE_EXEMPTION_NOT_APPLICABLE}: exemption for {rule_id} not applied, only CAT I findings can be exempted ({rule_id} is {})",
                        finding.severity.label()
                    ));
                }
            }
        }
    }

    decision.effective_cat_ii = decision.raw_cat_ii;

    if cfg.fail_on_cat_i && decision.effective_cat_i > 0 {
        decision.reasons.push(format!(
            "CAT I: {} failing finding(s) without an active exemption: {}",
            decision.effective_cat_i,
            list_rules(&unexempted_cat_i)
        ));
    }
    if cfg.fail_on_cat_ii && decision.effective_cat_ii > cfg.cat_ii_threshold {
        decision.reasons.push(format!(
            "CAT II: {} failing finding(s) exceed the threshold of {}",
            decision.effective_cat_ii, cfg.cat_ii_threshold
        ));
    }

    decision.passed = decision.reasons.is_empty();
    decision.exempted_rule_ids = exempted.into_iter().collect();
    decision.applied_exemptions = applied.into_values().collect();
    decision.warnings = warnings.into_iter().collect();
    decision
}

fn list_rules(rules: &BTreeSet<&str>) -> String {
    let mut listed: Vec<String> = rules
        .iter()
        .take(MAX_LISTED_RULES)
        .map(|r| r.to_string())
        .collect();
    let rest = rules.len().saturating_sub(MAX_LISTED_RULES);
    if rest > 0 {
        listed.push(format!("and {rest} more"));
    }
    listed.join(", ")
}
