//! Filesystem snapshot storage
//!
//! One pretty-printed JSON file per snapshot, named `<id>.json`.

pub mod atomic;
pub mod fs_store;
