#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use chrono::{TimeZone, Utc};
use common::entry;
use rankdiff_core::diff::engine::{compare, score_change_pct};
use rankdiff_core::diff::{CausalNote, NewRank};
use rankdiff_core::{DocumentResult, QuerySnapshotEntry};

#[test]
fn test_identical_entries_report_nothing() {
    let e = entry("vpn", &[("a", 10.0), ("b", 8.0), ("c", 6.0)]);
    let diff = compare(&e, &e, 0.0);

    assert_eq!(diff.query, "vpn");
    assert!(diff.order_changes.is_empty());
    assert!(diff.score_changes.is_empty());
    assert!(!diff.has_drift());
}

#[test]
fn test_swapped_documents_are_order_drift() {
    let previous = entry("vpn", &[("a", 10.0), ("b", 8.0)]);
    let current = entry("vpn", &[("b", 10.0), ("a", 8.0)]);

    let diff = compare(&previous, &current, 0.0);

    assert!(diff.has_order_drift);
    assert!(!diff.has_score_drift);
    assert_eq!(diff.order_changes.len(), 2);

    let first = &diff.order_changes[0];
    assert_eq!(first.document_id, "a");
    assert_eq!(first.previous_rank, 0);
    assert_eq!(first.new_rank, NewRank::Ranked(1));
    assert_eq!(first.previous_score, 10.0);
    assert_eq!(first.new_score, 10.0);

    let second = &diff.order_changes[1];
    assert_eq!(second.document_id, "b");
    assert_eq!(second.new_rank, NewRank::Ranked(0));
}

#[test]
fn test_document_leaving_top_k_is_not_ranked() {
    let previous = entry("vpn", &[("a", 10.0), ("b", 8.0)]);
    let current = entry("vpn", &[("a", 10.0), ("z", 7.0)]);

    let diff = compare(&previous, &current, 0.0);

    assert_eq!(diff.order_changes.len(), 1);
    let change = &diff.order_changes[0];
    assert_eq!(change.document_id, "b");
    assert_eq!(change.new_rank, NewRank::NotRanked);
    assert_eq!(change.previous_score, 8.0);
    assert_eq!(change.new_score, 7.0);
    assert_eq!(change.notes, vec![CausalNote::MissingFromCurrent]);
}

#[test]
fn test_score_change_above_threshold_is_reported() {
    let previous = entry("vpn", &[("a", 10.0), ("b", 8.0)]);
    let current = entry("vpn", &[("a", 12.0), ("b", 8.0)]);

    let diff = compare(&previous, &current, 10.0);

    assert!(!diff.has_order_drift);
    assert!(diff.has_score_drift);
    assert_eq!(diff.score_changes.len(), 1);
    let change = &diff.score_changes[0];
    assert_eq!(change.document_id, "a");
    assert_eq!(change.previous_rank, 0);
    assert_eq!(change.new_rank, NewRank::Ranked(0));
    assert_eq!(change.score_change_pct, 16.67);
}

#[test]
fn test_score_change_at_or_below_threshold_is_noise() {
    let previous = entry("vpn", &[("a", 10.0)]);
    let current = entry("vpn", &[("a", 12.0)]);

    assert!(!compare(&previous, &current, 20.0).has_drift());
    assert!(!compare(&previous, &current, 16.67).has_drift());
    assert!(compare(&previous, &current, 16.66).has_score_drift);
}

#[test]
fn test_order_and_score_drift_are_independent() {
    let previous = entry("vpn", &[("a", 10.0), ("b", 8.0)]);
    let current = entry("vpn", &[("b", 20.0), ("a", 8.0)]);

    let diff = compare(&previous, &current, 0.0);

    assert!(diff.has_order_drift);
    assert!(diff.has_score_drift);
    assert_eq!(diff.order_changes.len(), 2);
    assert_eq!(diff.score_changes.len(), 1);
    assert_eq!(diff.score_changes[0].previous_rank, 0);
    assert_eq!(diff.score_changes[0].score_change_pct, 50.0);
}

#[test]
fn test_only_shared_ranks_are_compared() {
    let previous = entry("vpn", &[("a", 10.0), ("b", 8.0), ("c", 6.0)]);
    let shorter = entry("vpn", &[("a", 10.0)]);

    assert!(!compare(&previous, &shorter, 0.0).has_drift());
    assert!(!compare(&shorter, &previous, 0.0).has_drift());
}

#[test]
fn test_empty_entries_compare_clean() {
    let empty = QuerySnapshotEntry::from_ranked("vpn", vec![]);
    let full = entry("vpn", &[("a", 1.0)]);
    assert!(!compare(&empty, &full, 0.0).has_drift());
}

#[test]
fn test_zero_new_score_yields_zero_pct() {
    let previous = entry("vpn", &[("a", 5.0)]);
    let current = entry("vpn", &[("a", 0.0)]);

    let diff = compare(&previous, &current, 0.0);

    assert!(diff.score_changes.is_empty());
    assert_eq!(score_change_pct(5.0, 0.0), 0.0);
}

#[test]
fn test_boost_and_update_notes_are_attached() {
    let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let t2 = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

    let previous = QuerySnapshotEntry::from_ranked(
        "vpn",
        vec![DocumentResult::new("a", 10.0)
            .with_boost(0.0)
            .with_updated_at(t1)],
    );
    let current = QuerySnapshotEntry::from_ranked(
        "vpn",
        vec![DocumentResult::new("a", 15.0)
            .with_boost(2.0)
            .with_updated_at(t2)],
    );

    let diff = compare(&previous, &current, 0.0);

    assert_eq!(diff.score_changes.len(), 1);
    assert_eq!(
        diff.score_changes[0].notes,
        vec![
            CausalNote::BoostChanged { from: 0.0, to: 2.0 },
            CausalNote::DocumentUpdated {
                from: Some(t1),
                to: Some(t2)
            },
        ]
    );
}

#[test]
fn test_boosted_score_rise_above_threshold() {
    // Given the top document's score and boost rose while its update time
    // stayed the same
    let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let previous = QuerySnapshotEntry::from_ranked(
        "vpn",
        vec![DocumentResult::new("a", 10.0)
            .with_boost(1.0)
            .with_updated_at(t1)],
    );
    let current = QuerySnapshotEntry::from_ranked(
        "vpn",
        vec![DocumentResult::new("a", 12.0)
            .with_boost(2.0)
            .with_updated_at(t1)],
    );

    // When comparing with a 10% threshold
    let diff = compare(&previous, &current, 10.0);

    // Then one score change at rank 0 carries only the boost note
    assert!(!diff.has_order_drift);
    assert!(diff.has_score_drift);
    assert_eq!(diff.score_changes.len(), 1);
    let change = &diff.score_changes[0];
    assert_eq!(change.document_id, "a");
    assert_eq!(change.previous_rank, 0);
    assert_eq!(change.new_rank, NewRank::Ranked(0));
    assert_eq!(change.previous_score, 10.0);
    assert_eq!(change.new_score, 12.0);
    assert_eq!(change.score_change_pct, 16.67);
    assert_eq!(
        change.notes,
        vec![CausalNote::BoostChanged { from: 1.0, to: 2.0 }]
    );
}

#[test]
fn test_moved_document_notes_compare_against_its_new_position() {
    let previous = QuerySnapshotEntry::from_ranked(
        "vpn",
        vec![
            DocumentResult::new("a", 10.0).with_boost(1.0),
            DocumentResult::new("b", 8.0),
        ],
    );
    let current = QuerySnapshotEntry::from_ranked(
        "vpn",
        vec![
            DocumentResult::new("b", 10.0),
            DocumentResult::new("a", 8.0).with_boost(1.0),
        ],
    );

    let diff = compare(&previous, &current, 0.0);

    let a = diff
        .order_changes
        .iter()
        .find(|c| c.document_id == "a")
        .unwrap();
    assert!(a.notes.is_empty());
}

#[test]
fn test_notes_do_not_change_classification() {
    let previous =
        QuerySnapshotEntry::from_ranked("vpn", vec![DocumentResult::new("a", 10.0).with_boost(1.0)]);
    let current =
        QuerySnapshotEntry::from_ranked("vpn", vec![DocumentResult::new("a", 10.0).with_boost(5.0)]);

    assert!(!compare(&previous, &current, 0.0).has_drift());
}
