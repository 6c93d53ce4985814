//! RankDiff Engine - Orchestration layer
//!
//! Wires the core builder and diff engine to real infrastructure:
//! configuration loading, the HTTP ranking client, and the filesystem store.

pub mod client;
pub mod commands;
pub mod config;

pub use client::http::HttpRankingClient;
pub use commands::capture::{capture, CaptureOutcome};
pub use commands::compare::{capture_and_compare, compare_two, validate_snapshot_ids};
pub use config::RankdiffConfig;
