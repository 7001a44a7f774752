//! Render use cases: markdown and GitHub annotations from gate reports.

use anyhow::Context;
use stigguard_render::{
    RenderableBenchmark, RenderableCounts, RenderableExemption, RenderableGate,
    RenderableOutcome,
};
use stigguard_types::{GateMode, GateReport, SCHEMA_GATE_REPORT_V1, format_iso_date};

pub fn parse_gate_report(text: &str) -> anyhow::Result<GateReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;
    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_GATE_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_GATE_REPORT_V1})");
    }
    serde_json::from_value(value).context("parse gate report")
}

pub fn serialize_report(report: &GateReport) -> anyhow::Result<Vec<u8>> {
    let mut data = serde_json::to_vec_pretty(report).context("serialize gate report")?;
    data.push(b'\n');
    Ok(data)
}

pub fn to_renderable(report: &GateReport) -> RenderableGate {
    let d = &report.decision;
    RenderableGate {
        outcome: match (d.passed, report.mode) {
            (true, _) => RenderableOutcome::Pass,
            (false, GateMode::Informational) => RenderableOutcome::Advisory,
            (false, GateMode::Standard) => RenderableOutcome::Fail,
        },
        phase: report.phase.clone(),
        evaluated_on: format_iso_date(report.evaluated_on),
        benchmark: report.selection.as_ref().map(|s| RenderableBenchmark {
            id: s.benchmark_id.clone(),
            version: s.benchmark_version.clone(),
            role: s.technology_role.clone(),
            technology_version: s.technology_version.clone(),
            degraded: s.is_degraded(),
        }),
        counts: RenderableCounts {
            raw_cat_i: d.raw_cat_i,
            raw_cat_ii: d.raw_cat_ii,
            raw_cat_iii: d.raw_cat_iii,
            not_tested: d.not_tested,
            effective_cat_i: d.effective_cat_i,
            effective_cat_ii: d.effective_cat_ii,
        },
        reasons: d.reasons.clone(),
        exemptions: d
            .applied_exemptions
            .iter()
            .map(|e| RenderableExemption {
                rule_id: e.rule_id.clone(),
                approver: e.approver.clone(),
                justification: e.justification.clone(),
                expiry_date: format_iso_date(e.expiry_date),
            })
            .collect(),
        warnings: d.warnings.clone(),
    }
}

pub fn render_markdown(gate: &RenderableGate) -> String {
    stigguard_render::render_markdown(gate)
}

pub fn render_annotations(gate: &RenderableGate, max: usize) -> Vec<String> {
    stigguard_render::render_github_annotations(gate)
        .into_iter()
        .take(max)
        .collect()
}
