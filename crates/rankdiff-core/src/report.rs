//! Report rendering seam.
//!
//! A [`Reporter`] turns a [`ComparisonReport`] into bytes on some output.
//! The plain-text summary lives here; the CLI adds colored and JSON output.

use std::io::{self, Write};

use crate::diff::{render_human_summary, ComparisonReport};

/// Renders a comparison report
pub trait Reporter {
    /// Write `report` to `out`.
    ///
    /// # Errors
    ///
    /// Propagates any write failure from `out`.
    fn render(&self, report: &ComparisonReport, out: &mut dyn Write) -> io::Result<()>;
}

/// Markdown-flavoured plain text, no colors
#[derive(Debug, Default, Clone, Copy)]
pub struct HumanSummaryReporter;

impl Reporter for HumanSummaryReporter {
    fn render(&self, report: &ComparisonReport, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(render_human_summary(report).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_summary_reporter_writes_summary() {
        let report = ComparisonReport {
            previous_id: "2024_01_01-10_00_00".to_string(),
            current_id: "2024_01_02-10_00_00".to_string(),
            threshold_pct: 0.0,
            queries: vec![],
        };
        let mut buf = Vec::new();
        HumanSummaryReporter.render(&report, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("2024_01_01-10_00_00"));
        assert!(text.contains("Queries compared: 0"));
    }
}
