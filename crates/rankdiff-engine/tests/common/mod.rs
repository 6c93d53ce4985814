#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use rankdiff_core::errors::{ExError, ExErrorKind};
use rankdiff_core::{DocumentResult, QuerySnapshotEntry, RankingClient, RankingResponse, Snapshot};
use rankdiff_store::FsSnapshotStore;
use tempfile::TempDir;

/// Ranking client that answers from a fixed script and records every call
#[derive(Default)]
pub struct ScriptedRankingClient {
    responses: HashMap<String, Vec<DocumentResult>>,
    fail_on: Option<String>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRankingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, query: &str, docs: &[(&str, f64)]) -> Self {
        self.responses.insert(
            query.to_string(),
            docs.iter()
                .map(|(id, score)| DocumentResult::new(*id, *score))
                .collect(),
        );
        self
    }

    pub fn fail_on(mut self, query: &str) -> Self {
        self.fail_on = Some(query.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl RankingClient for ScriptedRankingClient {
    fn rank(&self, query: &str) -> Result<RankingResponse, ExError> {
        self.calls.borrow_mut().push(query.to_string());
        if self.fail_on.as_deref() == Some(query) {
            return Err(ExError::new(ExErrorKind::Upstream).with_message("HTTP 502"));
        }
        Ok(RankingResponse {
            top_ranked_docs: self.responses.get(query).cloned().unwrap_or_default(),
        })
    }
}

pub fn setup_store() -> (FsSnapshotStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = FsSnapshotStore::new(temp_dir.path().join(".regfiles"));
    (store, temp_dir)
}

/// Snapshot from `(query, [(document_id, score)])` pairs
pub fn snapshot(entries: &[(&str, &[(&str, f64)])]) -> Snapshot {
    Snapshot::from_entries(
        entries
            .iter()
            .map(|(query, docs)| {
                QuerySnapshotEntry::from_ranked(
                    *query,
                    docs.iter()
                        .map(|(id, score)| DocumentResult::new(*id, *score))
                        .collect(),
                )
            })
            .collect(),
    )
}
