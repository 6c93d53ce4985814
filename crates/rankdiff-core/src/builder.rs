//! Snapshot builder.
//!
//! Ranks every query once, in order, and keeps the top K documents of each.
//! The first ranking failure aborts the build; no partial snapshot escapes.

#![allow(clippy::result_large_err)]

use std::cmp::Ordering;
use std::collections::HashSet;
use std::time::Instant;

use crate::errors::{ExError, ExErrorKind, RankDiffError, Result};
use crate::model::{DocumentResult, QuerySnapshotEntry, Snapshot, DEFAULT_TOP_K};
use crate::ranking::RankingClient;
use crate::{log_op_end, log_op_error, log_op_start};

/// Builds a [`Snapshot`] by querying a [`RankingClient`]
pub struct SnapshotBuilder<'a> {
    client: &'a dyn RankingClient,
    top_k: usize,
}

impl<'a> SnapshotBuilder<'a> {
    pub fn new(client: &'a dyn RankingClient) -> Self {
        Self {
            client,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Override how many documents are kept per query
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Rank every query and assemble a snapshot.
    ///
    /// Duplicate queries are collapsed to their first occurrence.
    ///
    /// # Errors
    ///
    /// - `Configuration` - `queries` is empty, contains a blank query, or
    ///   `top_k` is 0
    /// - `Upstream` - the ranking client failed; carries the failing query
    pub fn build(&self, queries: &[String]) -> Result<Snapshot> {
        let start = Instant::now();
        log_op_start!("build_snapshot", query_count = queries.len());

        let result = self.build_inner(queries);

        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(snapshot) => {
                log_op_end!(
                    "build_snapshot",
                    duration_ms = duration_ms,
                    query_count = snapshot.len()
                );
            }
            Err(e) => {
                log_op_error!("build_snapshot", e.clone(), duration_ms = duration_ms);
            }
        }
        result
    }

    fn build_inner(&self, queries: &[String]) -> Result<Snapshot> {
        if self.top_k == 0 {
            return Err(configuration_error("top_k must be at least 1"));
        }
        if queries.is_empty() {
            return Err(configuration_error("at least one query is required"));
        }
        if queries.iter().any(|q| q.trim().is_empty()) {
            return Err(configuration_error("queries must not be blank"));
        }

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(queries.len());

        for query in queries {
            if !seen.insert(query.as_str()) {
                tracing::warn!(query = %query, "duplicate query ignored");
                continue;
            }

            tracing::debug!(query = %query, "ranking query");
            let response = self.client.rank(query).map_err(|cause| {
                ExError::from(RankDiffError::UpstreamError {
                    query: query.clone(),
                    cause: cause.message().to_string(),
                })
                .with_op("build_snapshot")
                .with_source(cause)
            })?;

            let selected = select_top_k(response.top_ranked_docs, self.top_k);
            tracing::debug!(query = %query, doc_count = selected.len(), "query ranked");
            entries.push(QuerySnapshotEntry::from_ranked(query.clone(), selected));
        }

        Ok(Snapshot::from_entries(entries))
    }
}

/// Keep the `k` best documents by descending score.
///
/// The sort is stable, so equal scores keep the service's order. NaN scores
/// sort after every real score.
pub fn select_top_k(mut documents: Vec<DocumentResult>, k: usize) -> Vec<DocumentResult> {
    documents.sort_by(descending_score);
    documents.truncate(k);
    documents
}

fn descending_score(a: &DocumentResult, b: &DocumentResult) -> Ordering {
    match (a.score.is_nan(), b.score.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal),
    }
}

fn configuration_error(reason: &str) -> ExError {
    ExError::from(RankDiffError::ConfigurationError {
        reason: reason.to_string(),
    })
    .with_op("build_snapshot")
}
