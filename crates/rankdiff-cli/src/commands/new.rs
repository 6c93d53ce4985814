//! `rankdiff new`: capture a snapshot

use clap::Args;
use rankdiff_engine::config::RankdiffConfig;
use rankdiff_engine::{capture, HttpRankingClient};
use rankdiff_store::FsSnapshotStore;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Query to capture; repeat for several queries
    #[arg(short = 'q', long = "query", value_name = "QUERY", required = true)]
    pub queries: Vec<String>,
}

pub fn execute(args: NewArgs, config: &RankdiffConfig) -> anyhow::Result<i32> {
    let client = HttpRankingClient::new(&config.ranking)?;
    let store = FsSnapshotStore::new(&config.store.regfiles_dir);

    let outcome = capture(&args.queries, &client, &store, config.ranking.top_k)?;

    tracing::info!(
        snapshot_id = %outcome.snapshot_id,
        query_count = outcome.snapshot.len(),
        "snapshot captured"
    );
    println!("{}", outcome.snapshot_id);
    Ok(0)
}
