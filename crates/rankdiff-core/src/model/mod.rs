pub mod document;
pub mod metadata;
pub mod snapshot;

pub use document::DocumentResult;
pub use metadata::Metadata;
pub use snapshot::{QuerySnapshotEntry, Snapshot, DEFAULT_TOP_K};
