//! Snapshot persistence seam.
//!
//! Snapshots are immutable once written. Implementations assign the id on
//! write and never overwrite an existing snapshot.

#![allow(clippy::result_large_err)]

use std::collections::BTreeSet;

use crate::errors::Result;
use crate::model::Snapshot;

/// File extension snapshot ids may be given with
pub const SNAPSHOT_EXTENSION: &str = ".json";

/// Durable home for snapshots, keyed by id
pub trait SnapshotStore {
    /// All stored snapshot ids, sorted (chronological for timestamp ids).
    ///
    /// # Errors
    ///
    /// `Persistence` if the backing storage exists but cannot be listed.
    fn list(&self) -> Result<BTreeSet<String>>;

    /// Load one snapshot.
    ///
    /// # Errors
    ///
    /// - `NotFound` - no snapshot with this id
    /// - `CorruptData` - the stored content cannot be parsed or is invalid
    fn read(&self, id: &str) -> Result<Snapshot>;

    /// Persist a new snapshot and return its id.
    ///
    /// # Errors
    ///
    /// `Persistence` on I/O failure or if the chosen id already exists.
    fn write(&self, snapshot: &Snapshot) -> Result<String>;
}

/// Strip a trailing `.json` so `2024_01_01-10_00_00.json` and
/// `2024_01_01-10_00_00` name the same snapshot.
pub fn normalize_snapshot_id(id: &str) -> &str {
    id.strip_suffix(SNAPSHOT_EXTENSION).unwrap_or(id)
}
