//! Diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq` so a
//! report can be rendered, written as JSON, or asserted on in tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Sentinel used on the wire for a document that left the top K
pub const NOT_RANKED: &str = "not_ranked";

/// Where a previously ranked document sits in the current capture.
///
/// Serializes as the rank integer, or the string `"not_ranked"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewRank {
    Ranked(usize),
    NotRanked,
}

impl fmt::Display for NewRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NewRank::Ranked(rank) => write!(f, "{}", rank),
            NewRank::NotRanked => f.write_str(NOT_RANKED),
        }
    }
}

impl Serialize for NewRank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NewRank::Ranked(rank) => serializer.serialize_u64(*rank as u64),
            NewRank::NotRanked => serializer.serialize_str(NOT_RANKED),
        }
    }
}

impl<'de> Deserialize<'de> for NewRank {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Rank(usize),
            Label(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Rank(rank) => Ok(NewRank::Ranked(rank)),
            Raw::Label(label) if label == NOT_RANKED => Ok(NewRank::NotRanked),
            Raw::Label(label) => Err(serde::de::Error::custom(format!(
                "expected a rank or \"{}\", got \"{}\"",
                NOT_RANKED, label
            ))),
        }
    }
}

/// Advisory hint about why a document moved or rescored.
///
/// Notes never change how a change is classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CausalNote {
    /// The document's boost differs between the two captures
    BoostChanged { from: f64, to: f64 },
    /// The document's last-update timestamp differs between the two captures
    DocumentUpdated {
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    },
    /// The document is not in the current top K, so nothing can be compared
    MissingFromCurrent,
}

impl fmt::Display for CausalNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CausalNote::BoostChanged { from, to } => {
                write!(f, "boost changed from {} to {}", from, to)
            }
            CausalNote::DocumentUpdated { from, to } => write!(
                f,
                "document updated from {} to {}",
                format_timestamp(from),
                format_timestamp(to)
            ),
            CausalNote::MissingFromCurrent => f.write_str(
                "document is missing from the current results; unable to analyse the cause further",
            ),
        }
    }
}

fn format_timestamp(ts: &Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "unknown".to_string())
}

/// One detected change at one rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub previous_rank: usize,
    pub new_rank: NewRank,
    pub document_id: String,
    pub previous_score: f64,
    pub new_score: f64,
    /// Relative to the new score, rounded to 2 decimals
    pub score_change_pct: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<CausalNote>,
}

/// Result of comparing one query across two snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDiff {
    pub query: String,
    pub order_changes: Vec<ChangeRecord>,
    pub score_changes: Vec<ChangeRecord>,
    pub has_order_drift: bool,
    pub has_score_drift: bool,
}

impl QueryDiff {
    pub fn has_drift(&self) -> bool {
        self.has_order_drift || self.has_score_drift
    }
}

/// Per-query diffs for a whole compare run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Snapshot treated as the baseline
    pub previous_id: String,
    /// Snapshot compared against the baseline
    pub current_id: String,
    /// Score changes at or below this percentage are not reported
    pub threshold_pct: f64,
    /// One entry per query, sorted by query
    pub queries: Vec<QueryDiff>,
}

impl ComparisonReport {
    pub fn has_drift(&self) -> bool {
        self.queries.iter().any(QueryDiff::has_drift)
    }

    pub fn order_drift_count(&self) -> usize {
        self.queries.iter().filter(|q| q.has_order_drift).count()
    }

    pub fn score_drift_count(&self) -> usize {
        self.queries.iter().filter(|q| q.has_score_drift).count()
    }

    pub fn total_changes(&self) -> usize {
        self.queries
            .iter()
            .map(|q| q.order_changes.len() + q.score_changes.len())
            .sum()
    }
}
