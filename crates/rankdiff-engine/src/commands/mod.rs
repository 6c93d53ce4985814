//! Capture and compare flows.
//!
//! Each flow takes its collaborators as trait objects so tests can swap in
//! a scripted ranking client and a temporary store.

pub mod capture;
pub mod compare;
