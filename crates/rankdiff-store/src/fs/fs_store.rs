//! Filesystem-backed [`SnapshotStore`]
//!
//! Snapshots live in a single directory as `<id>.json`, where the id is the
//! local capture time formatted with [`SNAPSHOT_ID_FORMAT`]. Ids therefore
//! sort chronologically.

#![allow(clippy::result_large_err)]

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use rankdiff_core::model::Snapshot;
use rankdiff_core::store::{normalize_snapshot_id, SnapshotStore, SNAPSHOT_EXTENSION};
use rankdiff_core::{log_op_end, log_op_error, log_op_start};
use serde::Serialize;

use crate::errors::{corrupt_snapshot, io_error, snapshot_exists, snapshot_missing, Result};
use crate::fs::atomic::{atomic_write_new, WriteOutcome};

/// `strftime` pattern for snapshot ids, e.g. `2024_03_18-14_05_09`
pub const SNAPSHOT_ID_FORMAT: &str = "%Y_%m_%d-%H_%M_%S";

/// Snapshot store rooted at a regression directory
pub struct FsSnapshotStore {
    root: PathBuf,
}

impl FsSnapshotStore {
    /// Create a store at `root`; the directory is created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding snapshot `id`
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.root
            .join(format!("{}{}", normalize_snapshot_id(id), SNAPSHOT_EXTENSION))
    }

    /// Persist `snapshot` under an explicit id.
    ///
    /// Fails with `Persistence` if `id` is already taken.
    pub fn write_with_id(&self, id: &str, snapshot: &Snapshot) -> Result<String> {
        let id = normalize_snapshot_id(id).to_string();
        let start = Instant::now();
        log_op_start!("write_snapshot", snapshot_id = %id);

        let result = self.write_inner(&id, snapshot);

        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => {
                log_op_end!(
                    "write_snapshot",
                    duration_ms = duration_ms,
                    snapshot_id = %id,
                    query_count = snapshot.len()
                );
            }
            Err(e) => {
                log_op_error!("write_snapshot", e.clone(), duration_ms = duration_ms);
            }
        }
        result
    }

    fn write_inner(&self, id: &str, snapshot: &Snapshot) -> Result<String> {
        let bytes =
            to_pretty_json(snapshot).map_err(|e| io_error("serialize_snapshot", e.into()))?;

        match atomic_write_new(&self.path_for(id), &bytes)? {
            WriteOutcome::Written => Ok(id.to_string()),
            WriteOutcome::AlreadyExists => Err(snapshot_exists(id)),
        }
    }

    fn read_inner(&self, id: &str) -> Result<Snapshot> {
        let path = self.path_for(id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let available = self.list()?.into_iter().collect();
                return Err(snapshot_missing(id, available));
            }
            Err(e) => return Err(io_error("read_snapshot", e).with_snapshot_id(id)),
        };

        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|e| corrupt_snapshot(id, e.to_string()))?;
        snapshot
            .validate()
            .map_err(|reason| corrupt_snapshot(id, reason))?;
        Ok(snapshot)
    }
}

impl SnapshotStore for FsSnapshotStore {
    fn list(&self) -> Result<BTreeSet<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(e) => return Err(io_error("list_snapshots", e)),
        };

        let mut ids = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error("list_snapshots", e))?;
            if !entry.path().is_file() {
                continue;
            }
            if let Some(id) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.strip_suffix(SNAPSHOT_EXTENSION))
            {
                ids.insert(id.to_string());
            }
        }
        Ok(ids)
    }

    fn read(&self, id: &str) -> Result<Snapshot> {
        let id = normalize_snapshot_id(id);
        let start = Instant::now();
        log_op_start!("read_snapshot", snapshot_id = %id);

        let result = self.read_inner(id);

        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(snapshot) => {
                log_op_end!(
                    "read_snapshot",
                    duration_ms = duration_ms,
                    snapshot_id = %id,
                    query_count = snapshot.len()
                );
            }
            Err(e) => {
                log_op_error!("read_snapshot", e.clone(), duration_ms = duration_ms);
            }
        }
        result
    }

    fn write(&self, snapshot: &Snapshot) -> Result<String> {
        let id = Local::now().format(SNAPSHOT_ID_FORMAT).to_string();
        self.write_with_id(&id, snapshot)
    }
}

/// Serialize with a 4-space indent
fn to_pretty_json(snapshot: &Snapshot) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    snapshot.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}
