//! The `gate` use case: read a phase's findings and decide whether the pipeline proceeds.

use anyhow::Context;
use camino::Utf8Path;
use stigguard_settings::{Overrides, ResolvedConfig};
use stigguard_store::SelectionCache;
use stigguard_types::{
    ExemptionPolicy, GateDecision, GateMode, GateReport, SCHEMA_GATE_REPORT_V1, ToolMeta, ids,
};
use time::{Date, OffsetDateTime};

use crate::config::load_config;

/// Input for the gate use case.
#[derive(Clone, Debug)]
pub struct GateInput<'a> {
    /// Findings artifact written by the scan engine for this phase.
    pub report_path: &'a Utf8Path,
    pub exemptions_path: Option<&'a Utf8Path>,
    /// Run cache to attach the pinned benchmark to the report.
    pub selection_cache: Option<&'a SelectionCache>,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    pub overrides: Overrides,
    /// Day exemption expiry is checked against; the current UTC date when absent.
    pub today: Option<Date>,
    pub mode: GateMode,
    pub phase: Option<String>,
}

#[derive(Clone, Debug)]
pub struct GateOutput {
    pub report: GateReport,
    pub resolved_config: ResolvedConfig,
}

/// Run the gate use case.
///
/// An unreadable findings report is returned as an error; the caller writes a
/// fail-closed artifact with `input_error_report`. A bad exemption file only costs the
/// exemptions and is recorded as a warning.
pub fn run_gate(input: GateInput<'_>) -> anyhow::Result<GateOutput> {
    let started_at = OffsetDateTime::now_utc();
    let today = input.today.unwrap_or_else(|| started_at.date());

    let resolved = load_config(input.config_text, input.overrides.clone())?;

    let findings = stigguard_store::read_findings(input.report_path)
        .context("read findings report")?;

    let mut input_warnings = Vec::new();
    let policy = match input.exemptions_path {
        None => ExemptionPolicy::empty(),
        Some(path) => match stigguard_store::read_exemptions(path) {
            Ok(policy) => policy,
            Err(e) => {
                let code = e.code();
                let message = format!("{:#}", anyhow::Error::new(e));
                tracing::warn!(code, error = %message, "ignoring exemption file");
                input_warnings.push(format!("{code}: {message}; no exemptions applied"));
                ExemptionPolicy::empty()
            }
        },
    };

    let selection = match input.selection_cache {
        None => None,
        Some(cache) => {
            let selection = cache.load().context("read selection cache")?;
            if selection.is_none() {
                input_warnings.push(format!("no pinned benchmark selection at {}", cache.path()));
            }
            selection
        }
    };

    let mut decision = stigguard_domain::evaluate(&findings, &policy, today, &resolved.effective.gate);
    if !input_warnings.is_empty() {
        input_warnings.append(&mut decision.warnings);
        decision.warnings = input_warnings;
    }

    tracing::info!(
        passed = decision.passed,
        raw_cat_i = decision.raw_cat_i,
        effective_cat_i = decision.effective_cat_i,
        effective_cat_ii = decision.effective_cat_ii,
        raw_cat_iii = decision.raw_cat_iii,
        exempted = decision.exempted_rule_ids.len(),
        today = %stigguard_types::format_iso_date(today),
        "gate evaluated"
    );
    for reason in &decision.reasons {
        tracing::info!(reason = %reason, "gate condition failed");
    }

    let report = GateReport {
        schema: SCHEMA_GATE_REPORT_V1.to_string(),
        tool: tool_meta(),
        phase: input.phase.clone(),
        mode: input.mode,
        evaluated_on: today,
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        selection,
        decision,
    };

    Ok(GateOutput {
        report,
        resolved_config: resolved,
    })
}

/// Fail-closed report for a gate run whose inputs could not be read.
pub fn input_error_report(
    mode: GateMode,
    phase: Option<String>,
    today: Option<Date>,
    message: &str,
) -> GateReport {
    let now = OffsetDateTime::now_utc();
    GateReport {
        schema: SCHEMA_GATE_REPORT_V1.to_string(),
        tool: tool_meta(),
        phase,
        mode,
        evaluated_on: today.unwrap_or_else(|| now.date()),
        started_at: now,
        finished_at: now,
        selection: None,
        decision: GateDecision::input_error(message),
    }
}

/// Map a gate report to an exit code: 0 = passed or informational, 1 = failed.
pub fn decision_exit_code(report: &GateReport) -> i32 {
    match (report.decision.passed, report.mode) {
        (true, _) => 0,
        (false, GateMode::Informational) => 0,
        (false, GateMode::Standard) => 1,
    }
}

fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: ids::TOOL_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_code;
    use camino::Utf8PathBuf;
    use time::macros::date;

    struct Fixture {
        _tmp: tempfile::TempDir,
        root: Utf8PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = tempfile::tempdir().expect("create temp dir");
            let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
            Self { _tmp: tmp, root }
        }

        fn write(&self, name: &str, text: &str) -> Utf8PathBuf {
            let path = self.root.join(name);
            std::fs::write(&path, text).expect("write fixture");
            path
        }
    }

    const CAT_I_FAIL: &str =
        r#"[{"RuleId": "V-254239", "Severity": "CAT I", "Status": "Fail", "Title": "t"}]"#;

    fn input<'a>(report_path: &'a Utf8Path) -> GateInput<'a> {
        GateInput {
            report_path,
            exemptions_path: None,
            selection_cache: None,
            config_text: "",
            overrides: Overrides::default(),
            today: Some(date!(2026 - 10 - 19)),
            mode: GateMode::Standard,
            phase: Some("verify".to_string()),
        }
    }

    #[test]
    fn cat_i_failure_fails_closed_by_default() {
        let fx = Fixture::new();
        let report = fx.write("findings.json", CAT_I_FAIL);
        let out = run_gate(input(&report)).expect("gate");
        assert!(!out.report.decision.passed);
        assert_eq!(out.report.schema, "stigguard.gate.v1");
        assert_eq!(decision_exit_code(&out.report), 1);
    }

    #[test]
    fn exemption_file_neutralizes_cat_i() {
        let fx = Fixture::new();
        let report = fx.write("findings.json", CAT_I_FAIL);
        let exemptions = fx.write(
            "exemptions.json",
            r#"{"exemptions": {"ruleIds": ["V-254239"], "justification": "vendor fix",
                "approver": "isso", "expiryDate": "2026-12-31"}}"#,
        );
        let out = run_gate(GateInput {
            exemptions_path: Some(&exemptions),
            ..input(&report)
        })
        .expect("gate");
        assert!(out.report.decision.passed);
        assert_eq!(out.report.decision.exempted_rule_ids, vec!["V-254239".to_string()]);
    }

    #[test]
    fn invalid_exemption_file_is_recoverable() {
        let fx = Fixture::new();
        let report = fx.write("findings.json", CAT_I_FAIL);
        let exemptions = fx.write("exemptions.json", "{ not json");
        let out = run_gate(GateInput {
            exemptions_path: Some(&exemptions),
            ..input(&report)
        })
        .expect("gate");
        let d = &out.report.decision;
        assert!(!d.passed);
        assert!(d.warnings[0].starts_with("exemption_file_invalid:"));
    }

    #[test]
    fn unreadable_report_is_an_error_with_code() {
        let fx = Fixture::new();
        let report = fx.write("findings.json", "");
        let err = run_gate(input(&report)).expect_err("empty report");
        assert_eq!(error_code(&err), Some("report_parse_error"));
    }

    #[test]
    fn informational_mode_exits_zero_on_failure() {
        let fx = Fixture::new();
        let report = fx.write("findings.json", CAT_I_FAIL);
        let out = run_gate(GateInput {
            mode: GateMode::Informational,
            ..input(&report)
        })
        .expect("gate");
        assert!(!out.report.decision.passed);
        assert_eq!(decision_exit_code(&out.report), 0);
    }

    #[test]
    fn pinned_selection_is_attached() {
        let fx = Fixture::new();
        let report = fx.write("findings.json", "[]");
        let cache = SelectionCache::at(fx.write(
            "selection.json",
            r#"{"technology": "MS", "version": "2022", "stigVersion": "2",
                "stigId": "ms_2022_v2", "selectedDate": "2026-10-19T08:00:00Z"}"#,
        ));
        let out = run_gate(GateInput {
            selection_cache: Some(&cache),
            ..input(&report)
        })
        .expect("gate");
        assert!(out.report.decision.passed);
        assert_eq!(
            out.report.selection.as_ref().map(|s| s.benchmark_id.as_str()),
            Some("ms_2022_v2")
        );
    }

    #[test]
    fn input_error_report_is_failed() {
        let r = input_error_report(GateMode::Informational, None, None, "boom");
        assert!(!r.decision.passed);
        assert_eq!(r.decision.reasons, vec!["boom".to_string()]);
    }
}
