//! RankDiff Core - snapshot model and drift analysis
//!
//! This crate holds everything that does not touch the network or the
//! filesystem:
//! - Snapshot and document models with their JSON layout
//! - The snapshot builder, driven through the [`ranking::RankingClient`] seam
//! - The rank diff engine (order drift, score drift, causal notes)
//! - The [`store::SnapshotStore`] seam implemented by `rankdiff-store`
//! - Error and logging facilities shared by every crate

pub mod builder;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ranking;
pub mod report;
pub mod store;

pub use rankdiff_core_types as core_types;

// Re-export commonly used types
pub use builder::SnapshotBuilder;
pub use diff::{ComparisonReport, QueryDiff};
pub use errors::{ExError, ExErrorKind, RankDiffError, Result};
pub use model::{DocumentResult, Metadata, QuerySnapshotEntry, Snapshot};
pub use ranking::{RankingClient, RankingResponse};
pub use report::{HumanSummaryReporter, Reporter};
pub use store::SnapshotStore;
