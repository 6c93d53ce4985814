//! Core types shared across rankdiff facilities
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Correlation**: RunId, one per CLI invocation
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction
//! - **Schema constants**: Canonical field keys and event names

pub mod run;
pub mod schema;
pub mod sensitive;

pub use run::RunId;
pub use sensitive::Sensitive;
