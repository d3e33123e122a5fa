use crate::core::{Participant, RankedParticipant};
use std::cmp::Ordering;

/// Orders participants by `total_raised`, highest first, and assigns dense
/// 1-based ranks.
///
/// Ties keep their input order (the sort is stable), so two participants with
/// the same total never share a rank. `0.0` and `-0.0` count as equal.
/// NaN totals are accepted and rank after every numeric total.
pub fn rank(participants: &[Participant]) -> Vec<RankedParticipant> {
    let mut sorted: Vec<&Participant> = participants.iter().collect();
    sorted.sort_by(|a, b| descending(a.total_raised, b.total_raised));

    sorted
        .into_iter()
        .zip(1u32..)
        .map(|(participant, rank)| RankedParticipant {
            participant: participant.clone(),
            rank,
        })
        .collect()
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
