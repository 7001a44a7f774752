use crate::{RenderableGate, RenderableOutcome};

pub fn render_markdown(gate: &RenderableGate) -> String {
    let mut out = String::new();

    out.push_str("# Stigguard gate report\n\n");
    let outcome = match gate.outcome {
        RenderableOutcome::Pass => "PASS",
        RenderableOutcome::Fail => "FAIL",
        RenderableOutcome::Advisory => "FAIL (informational)",
    };
    out.push_str(&format!("- Outcome: **{}**\n", outcome));
    if let Some(phase) = &gate.phase {
        out.push_str(&format!("- Phase: {}\n", phase));
    }
    out.push_str(&format!("- Evaluated on: {}\n", gate.evaluated_on));
    if let Some(b) = &gate.benchmark {
        out.push_str(&format!(
            "- Benchmark: `{}` version {} ({} {})",
            b.id, b.version, b.role, b.technology_version
        ));
        if b.degraded {
            out.push_str(" **degraded match**");
        }
        out.push('\n');
    }
    out.push('\n');

    let c = &gate.counts;
    out.push_str("| Severity | Failing | Effective |\n|---|---|---|\n");
    out.push_str(&format!("| CAT I | {} | {} |\n", c.raw_cat_i, c.effective_cat_i));
    out.push_str(&format!("| CAT II | {} | {} |\n", c.raw_cat_ii, c.effective_cat_ii));
    out.push_str(&format!("| CAT III | {} | n/a |\n", c.raw_cat_iii));
    out.push_str(&format!("\nNot tested: {}\n\n", c.not_tested));

    if gate.reasons.is_empty() {
        out.push_str("All gate conditions satisfied.\n");
    } else {
        out.push_str("## Reasons\n\n");
        for r in &gate.reasons {
            out.push_str(&format!("- {}\n", r));
        }
    }

    if !gate.exemptions.is_empty() {
        out.push_str("\n## Exemptions applied\n\n");
        for e in &gate.exemptions {
            out.push_str(&format!(
                "- `{}` approved by {} until {}",
                e.rule_id, e.approver, e.expiry_date
            ));
            if !e.justification.is_empty() {
                out.push_str(&format!(": {}", e.justification));
            }
            out.push('\n');
        }
    }

    if !gate.warnings.is_empty() {
        out.push_str("\n## Warnings\n\n");
        for w in &gate.warnings {
            out.push_str(&format!("- {}\n", w));
        }
    }

    out
}
