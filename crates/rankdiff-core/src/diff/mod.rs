//! Rank diff engine.
//!
//! Compares one query's captures from two snapshots and classifies the
//! differences as order drift or score drift, with advisory causal notes.
//!
//! ## Entry point
//!
//! ```ignore
//! use rankdiff_core::diff::engine::compare;
//!
//! let diff = compare(previous_entry, current_entry, 5.0);
//! ```
//!
//! ## Guarantees
//!
//! - **Self-comparison is empty**: comparing an entry with itself reports nothing
//!   for any non-negative threshold.
//! - **Strict threshold**: a score change exactly equal to the threshold is noise.
//! - **Independence**: order and score checks never influence each other.
//! - **No arithmetic errors**: a zero new score yields a 0% change.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::compare;
pub use human_summary::render_human_summary;
pub use model::{CausalNote, ChangeRecord, ComparisonReport, NewRank, QueryDiff};
