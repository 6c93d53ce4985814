//! `rankdiff compare`: one id re-captures and compares, two ids compare
//! stored snapshots

use std::io::Write;

use clap::{Args, ValueEnum};
use rankdiff_core::{HumanSummaryReporter, Reporter};
use rankdiff_engine::config::RankdiffConfig;
use rankdiff_engine::{capture_and_compare, compare_two, HttpRankingClient};
use rankdiff_store::FsSnapshotStore;

use crate::report::{ConsoleReporter, JsonReporter};

/// Exit status when `--fail-on-drift` is set and drift was found
pub const DRIFT_EXIT_CODE: i32 = 3;

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Snapshot id: once to compare against a fresh capture, twice to
    /// compare two snapshots (previous first)
    #[arg(short = 'r', long = "regfile", value_name = "ID", required = true)]
    pub regfiles: Vec<String>,

    /// Minimum score change (percent) worth reporting
    #[arg(short = 't', long, default_value_t = 0.0, value_parser = parse_threshold)]
    pub threshold: f64,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
    pub format: OutputFormat,

    /// Exit with status 3 when any drift is reported
    #[arg(long)]
    pub fail_on_drift: bool,
}

impl CompareArgs {
    /// At most two snapshot ids may be given
    pub fn check_regfile_count(&self) -> Result<(), String> {
        if self.regfiles.len() > 2 {
            return Err(format!(
                "--regfile accepts at most 2 values, got {}",
                self.regfiles.len()
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Console,
    Json,
    /// Plain Markdown summary, no color
    Markdown,
}

fn parse_threshold(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("threshold must be >= 0, got {}", raw));
    }
    Ok(value)
}

pub fn execute(args: CompareArgs, config: &RankdiffConfig) -> anyhow::Result<i32> {
    let store = FsSnapshotStore::new(&config.store.regfiles_dir);

    let report = match args.regfiles.as_slice() {
        [baseline] => {
            let client = HttpRankingClient::new(&config.ranking)?;
            capture_and_compare(
                baseline,
                args.threshold,
                &client,
                &store,
                config.ranking.top_k,
            )?
        }
        [previous, current] => compare_two(previous, current, args.threshold, &store)?,
        other => anyhow::bail!("expected 1 or 2 snapshot ids, got {}", other.len()),
    };

    let reporter: Box<dyn Reporter> = match args.format {
        OutputFormat::Console => Box::new(ConsoleReporter),
        OutputFormat::Json => Box::new(JsonReporter),
        OutputFormat::Markdown => Box::new(HumanSummaryReporter),
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    reporter.render(&report, &mut out)?;
    out.flush()?;

    if args.fail_on_drift && report.has_drift() {
        return Ok(DRIFT_EXIT_CODE);
    }
    Ok(0)
}
