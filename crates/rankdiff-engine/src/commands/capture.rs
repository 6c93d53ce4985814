//! Capture: rank a query set and persist the result as a new snapshot.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use rankdiff_core::errors::Result;
use rankdiff_core::model::Snapshot;
use rankdiff_core::ranking::RankingClient;
use rankdiff_core::store::SnapshotStore;
use rankdiff_core::{log_op_end, log_op_error, log_op_start, SnapshotBuilder};

/// A freshly written snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOutcome {
    /// Identifier assigned by the store
    pub snapshot_id: String,
    pub snapshot: Snapshot,
}

/// Build a snapshot for `queries` and write it to `store`.
///
/// Nothing is written if any query fails to rank.
///
/// # Errors
///
/// - `Configuration` - empty or blank queries, `top_k` of 0
/// - `Upstream` - the ranking client failed
/// - `Persistence` - the store could not write the snapshot
pub fn capture(
    queries: &[String],
    client: &dyn RankingClient,
    store: &dyn SnapshotStore,
    top_k: usize,
) -> Result<CaptureOutcome> {
    let start = Instant::now();
    log_op_start!("capture", query_count = queries.len());

    let result = SnapshotBuilder::new(client)
        .with_top_k(top_k)
        .build(queries)
        .and_then(|snapshot| {
            let snapshot_id = store.write(&snapshot)?;
            Ok(CaptureOutcome {
                snapshot_id,
                snapshot,
            })
        });

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(outcome) => {
            log_op_end!(
                "capture",
                duration_ms = duration_ms,
                snapshot_id = %outcome.snapshot_id,
                query_count = outcome.snapshot.len()
            );
        }
        Err(e) => {
            log_op_error!("capture", e.clone(), duration_ms = duration_ms);
        }
    }
    result
}
