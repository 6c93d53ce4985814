//! rankdiff CLI
//!
//! Capture ranked search results as snapshots and report drift between them.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use rankdiff_core::errors::ExError;
use rankdiff_core::logging_facility::{init, Profile};
use rankdiff_core_types::RunId;
use rankdiff_engine::config::{LogFormat, RankdiffConfig};

mod commands;
mod report;

#[derive(Debug, Parser)]
#[command(name = "rankdiff", version)]
#[command(about = "Detect ranking drift in a search service", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides applied on top of config file and environment
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Config file (default: ./rankdiff.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding snapshot files
    #[arg(long, global = true, value_name = "DIR")]
    pub regfiles_dir: Option<PathBuf>,

    /// Ranking service URL
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Document collection to search
    #[arg(long, global = true, value_name = "NAME")]
    pub collection: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormatArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Capture a new snapshot for the given queries
    New(commands::new::NewArgs),
    /// Compare a snapshot with a fresh capture, or two snapshots together
    Compare(commands::compare::CompareArgs),
    /// List stored snapshots
    List,
}

fn main() {
    let cli = Cli::parse();

    if let Commands::Compare(args) = &cli.command {
        if let Err(message) = args.check_regfile_count() {
            Cli::command()
                .error(clap::error::ErrorKind::TooManyValues, message)
                .exit();
        }
    }

    dotenvy::dotenv().ok();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            report_error(&e);
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = resolve_config(&cli.global)?;

    init(Profile::from_format(config.logging.format.as_str()));
    let run_id = RunId::new();
    let span = tracing::info_span!("run", run_id = %run_id);
    let _guard = span.enter();

    let result = match cli.command {
        Commands::New(args) => commands::new::execute(args, &config),
        Commands::Compare(args) => commands::compare::execute(args, &config),
        Commands::List => commands::list::execute(&config),
    };
    result.map_err(|err| match err.downcast::<ExError>() {
        Ok(ex) => anyhow::Error::new(ex.with_run_id(run_id.clone())),
        Err(other) => other,
    })
}

/// Defaults < file < environment < flags
fn resolve_config(global: &GlobalArgs) -> anyhow::Result<RankdiffConfig> {
    let mut config =
        RankdiffConfig::load(global.config.as_deref()).context("failed to load configuration")?;

    if let Some(endpoint) = &global.endpoint {
        config.ranking.endpoint = endpoint.clone();
    }
    if let Some(collection) = &global.collection {
        config.ranking.collection = collection.clone();
    }
    if let Some(dir) = &global.regfiles_dir {
        config.store.regfiles_dir = dir.clone();
    }
    if let Some(format) = global.log_format {
        config.logging.format = format.into();
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn report_error(err: &anyhow::Error) {
    eprintln!("Error: {:#}", err);

    let ex = err.downcast_ref::<ExError>();
    if let Some(run_id) = ex.and_then(ExError::run_id) {
        eprintln!("Run: {}", run_id);
    }

    if let Some(candidates) = ex.and_then(ExError::candidates) {
        if candidates.is_empty() {
            eprintln!("No snapshots are available.");
        } else {
            eprintln!("Available snapshots:");
            for id in candidates {
                eprintln!("  {}", id);
            }
        }
    }
}
