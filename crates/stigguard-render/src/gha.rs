use crate::{RenderableGate, RenderableOutcome};

const TITLE: &str = "stigguard gate";

/// Render a gate report as GitHub Actions workflow command annotations.
///
/// Reasons come first (`error`, or `warning` for an informational run), then input
/// warnings, then applied exemptions as `notice`.
/// Format: `::{level} title=stigguard gate::{message}`
pub fn render_github_annotations(gate: &RenderableGate) -> Vec<String> {
    let reason_level = match gate.outcome {
        RenderableOutcome::Advisory => "warning",
        _ => "error",
    };

    let mut out = Vec::new();
    for r in &gate.reasons {
        out.push(annotation(reason_level, r));
    }
    for w in &gate.warnings {
        out.push(annotation("warning", w));
    }
    for e in &gate.exemptions {
        out.push(annotation(
            "notice",
            &format!(
                "{} exempted until {} (approver: {})",
                e.rule_id, e.expiry_date, e.approver
            ),
        ));
    }
    out
}

fn annotation(level: &str, message: &str) -> String {
    let message = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::{} title={}::{}", level, TITLE, message)
}
