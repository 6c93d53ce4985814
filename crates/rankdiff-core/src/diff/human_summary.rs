//! Human-readable summary renderer for comparison reports.

use crate::diff::model::{ChangeRecord, ComparisonReport, QueryDiff};

/// Render a plain Markdown/text summary of a [`ComparisonReport`].
///
/// Order drift is the primary finding: when a query's order changed, its
/// score changes are counted but not listed.
pub fn render_human_summary(report: &ComparisonReport) -> String {
    let mut out = String::new();

    out.push_str("## Ranking Comparison\n\n");
    out.push_str(&format!(
        "**Previous**: `{}`  \n**Current**: `{}`  \n**Threshold**: {}%\n\n",
        report.previous_id, report.current_id, report.threshold_pct
    ));

    for query in &report.queries {
        render_query(&mut out, query);
    }

    out.push_str("### Summary\n\n");
    out.push_str(&format!(
        "- Queries compared: {}\n- Order drift: {}\n- Score drift: {}\n- Changes: {}\n",
        report.queries.len(),
        report.order_drift_count(),
        report.score_drift_count(),
        report.total_changes()
    ));

    out
}

fn render_query(out: &mut String, query: &QueryDiff) {
    out.push_str(&format!("### Query: {}\n\n", query.query));

    if !query.has_drift() {
        out.push_str("_No change detected._\n\n");
        return;
    }

    if query.has_order_drift {
        out.push_str(&format!(
            "**Order changes** ({}):\n\n",
            query.order_changes.len()
        ));
        for change in &query.order_changes {
            out.push_str(&format!(
                "- `{}` was at rank {} and is now at rank {} (score {} -> {})\n",
                change.document_id,
                change.previous_rank,
                change.new_rank,
                change.previous_score,
                change.new_score
            ));
            render_notes(out, change);
        }
        out.push('\n');

        if query.has_score_drift {
            out.push_str(&format!(
                "_{} score change(s) not listed: the document order changed._\n\n",
                query.score_changes.len()
            ));
        }
        return;
    }

    out.push_str(&format!(
        "**Score changes** ({}):\n\n",
        query.score_changes.len()
    ));
    for change in &query.score_changes {
        out.push_str(&format!(
            "- `{}` (rank {}) score changed by {}% ({} -> {})\n",
            change.document_id,
            change.previous_rank,
            change.score_change_pct,
            change.previous_score,
            change.new_score
        ));
        render_notes(out, change);
    }
    out.push('\n');
}

fn render_notes(out: &mut String, change: &ChangeRecord) {
    for note in &change.notes {
        out.push_str(&format!("  - note: {}\n", note));
    }
}
