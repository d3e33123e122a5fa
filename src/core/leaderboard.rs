use crate::core::RankedParticipant;
use serde::Serialize;

/// How many entries get the podium treatment.
pub const PODIUM_SIZE: usize = 3;

/// Aggregates shown above the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardSummary {
    pub total_raised: f64,
    pub active_fundraisers: usize,
    /// Rounded mean; `0` for an empty board.
    pub average_raised: f64,
    /// Each entry's rounded percentage of `total_raised`, in board order.
    pub shares: Vec<u32>,
}

pub fn summarize(ranked: &[RankedParticipant]) -> LeaderboardSummary {
    let total_raised: f64 = ranked.iter().map(|r| r.total_raised()).sum();
    let active_fundraisers = ranked.len();

    let average_raised = if active_fundraisers == 0 {
        0.0
    } else {
        (total_raised / active_fundraisers as f64).round()
    };

    LeaderboardSummary {
        total_raised,
        active_fundraisers,
        average_raised,
        shares: ranked
            .iter()
            .map(|r| share_of_total(r.total_raised(), total_raised))
            .collect(),
    }
}

/// `round(amount / total * 100)`, or `0` when the total is not positive.
pub fn share_of_total(amount: f64, total: f64) -> u32 {
    if !total.is_finite() || total <= 0.0 {
        return 0;
    }
    // `as` saturates: negative and NaN shares land on 0
    (amount / total * 100.0).round() as u32
}

/// Splits a ranked board into the podium and everyone after it.
pub fn split_podium(ranked: &[RankedParticipant]) -> (&[RankedParticipant], &[RankedParticipant]) {
    ranked.split_at(ranked.len().min(PODIUM_SIZE))
}
