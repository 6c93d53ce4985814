//! Machine-readable report output

use std::io::{self, Write};

use rankdiff_core::{ComparisonReport, Reporter};

/// Pretty-printed JSON of the whole [`ComparisonReport`]
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn render(&self, report: &ComparisonReport, out: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)
    }
}
