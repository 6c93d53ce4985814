//! Snapshot model: one ranked top-K list per query.
//!
//! On disk a snapshot is a JSON array of entries; each entry maps the rank
//! (as a string key, `"0"`..`"K-1"`) to the document captured at that rank.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::DocumentResult;

/// Number of documents captured per query
pub const DEFAULT_TOP_K: usize = 5;

/// Ranked documents captured for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySnapshotEntry {
    pub query: String,
    pub selected_documents: BTreeMap<usize, DocumentResult>,
}

impl QuerySnapshotEntry {
    /// Build an entry from documents already in rank order (index = rank)
    pub fn from_ranked(query: impl Into<String>, documents: Vec<DocumentResult>) -> Self {
        Self {
            query: query.into(),
            selected_documents: documents.into_iter().enumerate().collect(),
        }
    }

    /// Document at `rank`, if captured
    pub fn document_at(&self, rank: usize) -> Option<&DocumentResult> {
        self.selected_documents.get(&rank)
    }

    /// Rank occupied by `document_id`, if it is in this top-K
    pub fn rank_of(&self, document_id: &str) -> Option<usize> {
        self.selected_documents
            .iter()
            .find(|(_, doc)| doc.document_id == document_id)
            .map(|(rank, _)| *rank)
    }

    pub fn len(&self) -> usize {
        self.selected_documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_documents.is_empty()
    }

    /// Check that ranks are exactly `0..len`.
    ///
    /// Returns a description of the first violation.
    pub fn validate(&self) -> Result<(), String> {
        for (expected, rank) in self.selected_documents.keys().enumerate() {
            if *rank != expected {
                return Err(format!(
                    "query '{}': ranks must be contiguous from 0, found rank {} at position {}",
                    self.query, rank, expected
                ));
            }
        }
        Ok(())
    }
}

/// An immutable capture of ranked results for a set of queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: Vec<QuerySnapshotEntry>,
}

impl Snapshot {
    /// Wrap entries; call [`Snapshot::validate`] for untrusted input.
    pub fn from_entries(entries: Vec<QuerySnapshotEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[QuerySnapshotEntry] {
        &self.entries
    }

    /// Entry for `query`, if the snapshot covers it
    pub fn entry(&self, query: &str) -> Option<&QuerySnapshotEntry> {
        self.entries.iter().find(|e| e.query == query)
    }

    /// The snapshot's queries, sorted and deduplicated
    pub fn query_set(&self) -> BTreeSet<String> {
        self.entries.iter().map(|e| e.query.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check the snapshot invariants: unique queries, contiguous ranks.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = BTreeSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.query.as_str()) {
                return Err(format!("duplicate query '{}'", entry.query));
            }
            entry.validate()?;
        }
        Ok(())
    }
}
