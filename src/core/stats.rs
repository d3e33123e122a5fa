use crate::core::{RankedParticipant, UserStatistics};

/// Derives dashboard statistics for `participant_id` from a ranking.
///
/// A participant missing from `ranked` gets rank `0`, a zero total and a zero
/// percentile. An empty ranking also yields a zero percentile.
pub fn stats(
    participant_id: &str,
    ranked: &[RankedParticipant],
    monthly_growth: u32,
) -> UserStatistics {
    let entry = ranked.iter().find(|r| r.id() == participant_id);
    let total_participants = ranked.len();

    let (total_raised, rank) = entry
        .map(|r| (r.total_raised(), r.rank))
        .unwrap_or((0.0, 0));

    UserStatistics {
        total_raised,
        rank,
        total_participants,
        percentile_rank: percentile_rank(rank, total_participants),
        monthly_growth,
        referrals: estimate_referrals(total_raised),
    }
}

/// `round((total - rank + 1) / total * 100)`.
pub fn percentile_rank(rank: u32, total_participants: usize) -> u32 {
    if total_participants == 0 || rank == 0 {
        return 0;
    }
    let total = total_participants as f64;
    let standing = total - f64::from(rank) + 1.0;
    (standing / total * 100.0).round() as u32
}

/// One referral per 100 raised. Negative or NaN totals estimate to zero.
pub fn estimate_referrals(total_raised: f64) -> u64 {
    // `as` saturates: negatives and NaN land on 0
    (total_raised / 100.0).floor() as u64
}
