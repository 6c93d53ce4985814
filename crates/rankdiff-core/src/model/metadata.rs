use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extra document fields returned by the ranking service
///
/// Whatever the service sends beyond the fields the diff engine reads
/// (title, link, source type, blurb, ...) is kept here verbatim so a stored
/// snapshot is a faithful record of the response. Serializes as a plain
/// JSON object so it can be flattened into the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Metadata {
    data: BTreeMap<String, serde_json::Value>,
}

impl Metadata {
    /// Create a new empty Metadata instance
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Get a string value by key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }

    /// Check if metadata is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
