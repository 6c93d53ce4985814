//! Colored console report
//!
//! Per query: the order check first; when the order changed the score check
//! is skipped, otherwise score changes above the threshold are listed.

use std::io::{self, Write};

use colored::Colorize;
use rankdiff_core::diff::{ChangeRecord, QueryDiff};
use rankdiff_core::{ComparisonReport, Reporter};

const RULE_WIDTH: usize = 100;

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn render(&self, report: &ComparisonReport, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "{} '{}' is 'previous' and '{}' is 'current'",
            "Comparing:".bold(),
            report.previous_id,
            report.current_id
        )?;

        for query in &report.queries {
            render_query(query, report.threshold_pct, out)?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "{} {} queries, {} with order drift, {} with score drift",
            "Summary:".bold(),
            report.queries.len(),
            report.order_drift_count(),
            report.score_drift_count()
        )?;
        if report.has_drift() {
            writeln!(out, "{}", "Drift detected".red().bold())
        } else {
            writeln!(out, "{}", "No drift detected".green().bold())
        }
    }
}

fn render_query(query: &QueryDiff, threshold_pct: f64, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} {}", "Query:".bold(), query.query.cyan())?;

    writeln!(out, "  {}", "Checking documents order...".dimmed())?;
    if query.has_order_drift {
        render_changes(&query.order_changes, out, |change| {
            format!(
                "The document '{}' was at rank '{}' but now is at rank '{}'",
                change.document_id, change.previous_rank, change.new_rank
            )
        })?;
        writeln!(
            out,
            "  {}",
            "Skipping score checks as the documents order has changed".yellow()
        )?;
        return Ok(());
    }
    writeln!(out, "  {}", "No change detected".green())?;

    writeln!(
        out,
        "  {} (changes up to {}% are ignored)",
        "Checking documents score...".dimmed(),
        threshold_pct
    )?;
    if query.has_score_drift {
        render_changes(&query.score_changes, out, |change| {
            format!(
                "The document '{}' (rank: {}) score has changed by {}%",
                change.document_id, change.previous_rank, change.score_change_pct
            )
        })?;
    } else {
        writeln!(out, "  {}", "No change detected".green())?;
    }
    Ok(())
}

fn render_changes<F>(changes: &[ChangeRecord], out: &mut dyn Write, headline: F) -> io::Result<()>
where
    F: Fn(&ChangeRecord) -> String,
{
    writeln!(out, "  {}", "<<<<< Changes detected >>>>>".red().bold())?;
    for change in changes {
        writeln!(out, "  {}", "-".repeat(RULE_WIDTH))?;
        writeln!(out, "  {}", headline(change))?;
        writeln!(out, "  previous score: {}", change.previous_score)?;
        writeln!(out, "  current score:  {}", change.new_score)?;
        for note in &change.notes {
            writeln!(out, "  {}", format!("NOTE: {}", note).yellow())?;
        }
    }
    writeln!(out, "  {}", "<<<<< End of changes >>>>>".red().bold())?;
    writeln!(out, "  Number of changes detected: {}", changes.len())
}
