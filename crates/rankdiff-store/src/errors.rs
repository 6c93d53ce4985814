//! Error handling for rankdiff-store
//!
//! Wraps rankdiff-core ExError with store-specific helpers

use rankdiff_core::errors::{ExError, ExErrorKind, RankDiffError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// A snapshot with this id is already on disk
pub fn snapshot_exists(snapshot_id: &str) -> ExError {
    ExError::from(RankDiffError::PersistenceError {
        reason: format!("snapshot {} already exists", snapshot_id),
    })
    .with_op("write_snapshot")
    .with_snapshot_id(snapshot_id)
}

/// Create a snapshot-missing error listing what is available instead
pub fn snapshot_missing(snapshot_id: &str, available: Vec<String>) -> ExError {
    ExError::from(RankDiffError::NotFoundError {
        missing: vec![snapshot_id.to_string()],
        available,
    })
    .with_op("read_snapshot")
    .with_snapshot_id(snapshot_id)
}

/// Create a corrupt-snapshot error
pub fn corrupt_snapshot(snapshot_id: &str, reason: impl Into<String>) -> ExError {
    ExError::from(RankDiffError::CorruptDataError {
        snapshot_id: snapshot_id.to_string(),
        reason: reason.into(),
    })
    .with_op("read_snapshot")
}
