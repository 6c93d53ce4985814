//! Rank diff computation engine.
//!
//! The entry point is [`compare`], which takes the same query's entry from
//! two snapshots and produces a [`QueryDiff`].

use crate::diff::model::{CausalNote, ChangeRecord, NewRank, QueryDiff};
use crate::model::{DocumentResult, QuerySnapshotEntry};

/// Percentage change between two scores, relative to the new score.
///
/// `|new - previous| / new * 100` rounded to two decimals, halves to even;
/// a new score of zero yields 0.
pub fn score_change_pct(previous_score: f64, new_score: f64) -> f64 {
    if new_score == 0.0 {
        return 0.0;
    }
    let pct = (new_score - previous_score).abs() / new_score * 100.0;
    (pct * 100.0).round_ties_even() / 100.0
}

/// Ranks captured on both sides, ascending.
fn shared_ranks<'a>(
    previous: &'a QuerySnapshotEntry,
    current: &'a QuerySnapshotEntry,
) -> impl Iterator<Item = (usize, &'a DocumentResult, &'a DocumentResult)> + 'a {
    previous
        .selected_documents
        .iter()
        .filter_map(move |(rank, before)| {
            current
                .document_at(*rank)
                .map(|after| (*rank, before, after))
        })
}

/// Documents that changed position (or left the top K).
fn check_order(previous: &QuerySnapshotEntry, current: &QuerySnapshotEntry) -> Vec<ChangeRecord> {
    shared_ranks(previous, current)
        .filter(|(_, before, after)| before.document_id != after.document_id)
        .map(|(rank, before, after)| ChangeRecord {
            previous_rank: rank,
            new_rank: current
                .rank_of(&before.document_id)
                .map_or(NewRank::NotRanked, NewRank::Ranked),
            document_id: before.document_id.clone(),
            previous_score: before.score,
            new_score: after.score,
            score_change_pct: score_change_pct(before.score, after.score),
            notes: Vec::new(),
        })
        .collect()
}

/// Ranks whose score moved by more than `threshold_pct`.
fn check_scores(
    previous: &QuerySnapshotEntry,
    current: &QuerySnapshotEntry,
    threshold_pct: f64,
) -> Vec<ChangeRecord> {
    shared_ranks(previous, current)
        .filter(|(_, before, after)| before.score != after.score)
        .map(|(rank, before, after)| ChangeRecord {
            previous_rank: rank,
            new_rank: NewRank::Ranked(rank),
            document_id: before.document_id.clone(),
            previous_score: before.score,
            new_score: after.score,
            score_change_pct: score_change_pct(before.score, after.score),
            notes: Vec::new(),
        })
        .filter(|change| change.score_change_pct > threshold_pct)
        .collect()
}

/// Attach boost / update-time hints comparing the document at
/// `previous_rank` with the one at `new_rank`.
fn annotate(previous: &QuerySnapshotEntry, current: &QuerySnapshotEntry, change: &mut ChangeRecord) {
    let new_rank = match change.new_rank {
        NewRank::Ranked(rank) => rank,
        NewRank::NotRanked => {
            change.notes.push(CausalNote::MissingFromCurrent);
            return;
        }
    };

    let (Some(before), Some(after)) = (
        previous.document_at(change.previous_rank),
        current.document_at(new_rank),
    ) else {
        return;
    };

    if before.boost != after.boost {
        change.notes.push(CausalNote::BoostChanged {
            from: before.boost,
            to: after.boost,
        });
    }
    if before.updated_at != after.updated_at {
        change.notes.push(CausalNote::DocumentUpdated {
            from: before.updated_at,
            to: after.updated_at,
        });
    }
}

/// Compare one query's captures.
///
/// Order and score checks run independently; only ranks present on both
/// sides take part. `previous` and `current` are expected to be entries for
/// the same query; the diff is labelled with `previous.query`.
pub fn compare(
    previous: &QuerySnapshotEntry,
    current: &QuerySnapshotEntry,
    threshold_pct: f64,
) -> QueryDiff {
    let mut order_changes = check_order(previous, current);
    let mut score_changes = check_scores(previous, current, threshold_pct);

    for change in order_changes.iter_mut().chain(score_changes.iter_mut()) {
        annotate(previous, current, change);
    }

    QueryDiff {
        query: previous.query.clone(),
        has_order_drift: !order_changes.is_empty(),
        has_score_drift: !score_changes.is_empty(),
        order_changes,
        score_changes,
    }
}
