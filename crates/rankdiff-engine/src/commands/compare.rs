//! Compare flows.
//!
//! ## capture_and_compare
//! 1. Baseline id must exist
//! 2. Load the baseline and take its query set
//! 3. Capture those queries as a new snapshot
//! 4. Diff baseline (previous) against the capture (current)
//!
//! ## compare_two
//! 1. Both ids must exist
//! 2. Load both
//! 3. Query sets must match (checked before any diff)
//! 4. Diff each query

#![allow(clippy::result_large_err)]

use std::time::Instant;

use rankdiff_core::diff::{self, ComparisonReport};
use rankdiff_core::errors::{ExError, RankDiffError, Result};
use rankdiff_core::model::Snapshot;
use rankdiff_core::ranking::RankingClient;
use rankdiff_core::store::{normalize_snapshot_id, SnapshotStore};
use rankdiff_core::{log_op_end, log_op_error, log_op_start};

use crate::commands::capture::capture;

/// Fail with `NotFound` unless every id is in `store`.
///
/// The error lists every missing id, plus the ids that do exist.
pub fn validate_snapshot_ids(ids: &[&str], store: &dyn SnapshotStore) -> Result<()> {
    let available = store.list()?;
    let missing: Vec<String> = ids
        .iter()
        .map(|id| normalize_snapshot_id(id))
        .filter(|id| !available.contains(*id))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    Err(ExError::from(RankDiffError::NotFoundError {
        missing,
        available: available.into_iter().collect(),
    })
    .with_op("validate_snapshot_ids"))
}

/// Capture the baseline's queries again and diff against the baseline.
///
/// # Errors
///
/// - `Configuration` - invalid threshold
/// - `NotFound` - the baseline does not exist
/// - `CorruptData` - the baseline cannot be read
/// - `Upstream` / `Persistence` - the new capture failed
pub fn capture_and_compare(
    baseline_id: &str,
    threshold_pct: f64,
    client: &dyn RankingClient,
    store: &dyn SnapshotStore,
    top_k: usize,
) -> Result<ComparisonReport> {
    let start = Instant::now();
    log_op_start!("capture_and_compare", snapshot_id = %baseline_id);

    let result = capture_and_compare_inner(baseline_id, threshold_pct, client, store, top_k);

    finish("capture_and_compare", start, &result);
    result
}

fn capture_and_compare_inner(
    baseline_id: &str,
    threshold_pct: f64,
    client: &dyn RankingClient,
    store: &dyn SnapshotStore,
    top_k: usize,
) -> Result<ComparisonReport> {
    validate_threshold(threshold_pct)?;
    validate_snapshot_ids(&[baseline_id], store)?;
    let baseline = store.read(baseline_id)?;

    let queries: Vec<String> = baseline.query_set().into_iter().collect();
    let outcome = capture(&queries, client, store, top_k)?;

    diff_snapshots(
        normalize_snapshot_id(baseline_id),
        &baseline,
        &outcome.snapshot_id,
        &outcome.snapshot,
        threshold_pct,
    )
}

/// Diff two stored snapshots.
///
/// # Errors
///
/// - `Configuration` - invalid threshold
/// - `NotFound` - either id does not exist (both are reported)
/// - `CorruptData` - either snapshot cannot be read
/// - `QuerySetMismatch` - the snapshots cover different queries
pub fn compare_two(
    previous_id: &str,
    current_id: &str,
    threshold_pct: f64,
    store: &dyn SnapshotStore,
) -> Result<ComparisonReport> {
    let start = Instant::now();
    log_op_start!("compare_two", previous_id = %previous_id, current_id = %current_id);

    let result = compare_two_inner(previous_id, current_id, threshold_pct, store);

    finish("compare_two", start, &result);
    result
}

fn compare_two_inner(
    previous_id: &str,
    current_id: &str,
    threshold_pct: f64,
    store: &dyn SnapshotStore,
) -> Result<ComparisonReport> {
    validate_threshold(threshold_pct)?;
    validate_snapshot_ids(&[previous_id, current_id], store)?;
    let previous = store.read(previous_id)?;
    let current = store.read(current_id)?;

    ensure_same_queries(&previous, &current)?;

    diff_snapshots(
        normalize_snapshot_id(previous_id),
        &previous,
        normalize_snapshot_id(current_id),
        &current,
        threshold_pct,
    )
}

fn validate_threshold(threshold_pct: f64) -> Result<()> {
    if threshold_pct.is_finite() && threshold_pct >= 0.0 {
        return Ok(());
    }
    Err(ExError::from(RankDiffError::ConfigurationError {
        reason: format!(
            "threshold must be a non-negative number, got {}",
            threshold_pct
        ),
    })
    .with_op("compare"))
}

fn ensure_same_queries(previous: &Snapshot, current: &Snapshot) -> Result<()> {
    let before = previous.query_set();
    let after = current.query_set();
    if before == after {
        return Ok(());
    }

    Err(ExError::from(RankDiffError::QuerySetMismatchError {
        only_in_previous: before.difference(&after).cloned().collect(),
        only_in_current: after.difference(&before).cloned().collect(),
    })
    .with_op("compare_two"))
}

/// Diff every query of `previous`, in sorted query order
fn diff_snapshots(
    previous_id: &str,
    previous: &Snapshot,
    current_id: &str,
    current: &Snapshot,
    threshold_pct: f64,
) -> Result<ComparisonReport> {
    let mut queries = Vec::new();
    for query in previous.query_set() {
        let (Some(before), Some(after)) = (previous.entry(&query), current.entry(&query)) else {
            return Err(ExError::from(RankDiffError::Internal {
                message: format!("query '{}' missing from one side of the comparison", query),
            })
            .with_query(query));
        };

        let query_diff = diff::compare(before, after, threshold_pct);
        tracing::debug!(
            query = %query,
            order_changes = query_diff.order_changes.len(),
            score_changes = query_diff.score_changes.len(),
            "query compared"
        );
        queries.push(query_diff);
    }

    Ok(ComparisonReport {
        previous_id: previous_id.to_string(),
        current_id: current_id.to_string(),
        threshold_pct,
        queries,
    })
}

fn finish(op: &'static str, start: Instant, result: &Result<ComparisonReport>) {
    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(report) => {
            log_op_end!(
                op,
                duration_ms = duration_ms,
                query_count = report.queries.len(),
                change_count = report.total_changes()
            );
        }
        Err(e) => {
            log_op_error!(op, e.clone(), duration_ms = duration_ms);
        }
    }
}
