//! RankDiff Store - filesystem persistence for snapshots
//!
//! Provides:
//! - Timestamp-named snapshot files under a regression directory
//! - No-clobber atomic writes (a snapshot is never overwritten)
//! - Typed read errors: missing, corrupt, unreadable

pub mod errors;
pub mod fs;

// Re-export key types
pub use errors::Result;
pub use fs::fs_store::{FsSnapshotStore, SNAPSHOT_ID_FORMAT};
