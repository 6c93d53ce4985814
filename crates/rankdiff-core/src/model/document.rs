use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Metadata;

/// One ranked document as captured from the ranking service
///
/// The document's rank is not stored here: it is the key under which the
/// document sits in [`QuerySnapshotEntry::selected_documents`](crate::model::QuerySnapshotEntry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    pub document_id: String,
    pub score: f64,
    #[serde(default)]
    pub boost: f64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl DocumentResult {
    pub fn new(document_id: impl Into<String>, score: f64) -> Self {
        Self {
            document_id: document_id.into(),
            score,
            boost: 0.0,
            updated_at: None,
            metadata: Metadata::new(),
        }
    }

    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = boost;
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }
}
