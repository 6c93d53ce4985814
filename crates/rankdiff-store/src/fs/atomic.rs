//! Atomic no-clobber write
//!
//! Content goes to a uniquely named temp file in the target directory and is
//! then moved into place without replacing an existing file, so readers
//! never see a partial file and concurrent writers of the same id cannot
//! touch each other's staged content.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

/// Outcome of a no-clobber write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    AlreadyExists,
}

/// Write `content` to `target_path` unless it already exists.
///
/// The parent directory is created if needed. The temp file is removed in
/// every outcome.
pub fn atomic_write_new(target_path: &Path, content: &[u8]) -> Result<WriteOutcome> {
    let dir = match target_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| io_error("create_regfiles_dir", e))?;

    let staged = stage(dir, content).map_err(|e| io_error("write_snapshot_temp", e))?;

    match staged.persist_noclobber(target_path) {
        Ok(_) => Ok(WriteOutcome::Written),
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(WriteOutcome::AlreadyExists),
        Err(e) => Err(io_error("link_snapshot", e.error)),
    }
}

fn stage(dir: &Path, content: &[u8]) -> std::io::Result<NamedTempFile> {
    let mut file = Builder::new().prefix(".").suffix(".tmp").tempfile_in(dir)?;
    file.write_all(content)?;
    file.as_file().sync_all()?;
    Ok(file)
}
