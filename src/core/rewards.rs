use crate::core::{Reward, RewardProgress, RewardTier};

pub fn default_rewards() -> Vec<Reward> {
    vec![
        Reward {
            title: "First Step".to_string(),
            description: "Raise your first $100".to_string(),
            threshold: 100.0,
            tier: RewardTier::Bronze,
        },
        Reward {
            title: "Rising Star".to_string(),
            description: "Reach $500 in donations".to_string(),
            threshold: 500.0,
            tier: RewardTier::Silver,
        },
        Reward {
            title: "Fundraising Hero".to_string(),
            description: "Achieve $1,000 milestone".to_string(),
            threshold: 1000.0,
            tier: RewardTier::Gold,
        },
        Reward {
            title: "Champion".to_string(),
            description: "Reach the ultimate $2,500".to_string(),
            threshold: 2500.0,
            tier: RewardTier::Platinum,
        },
    ]
}

/// Progress of `total_raised` towards each reward, in the order given.
pub fn reward_progress(rewards: &[Reward], total_raised: f64) -> Vec<RewardProgress> {
    rewards
        .iter()
        .map(|reward| {
            let progress = if reward.threshold > 0.0 {
                (total_raised / reward.threshold * 100.0).clamp(0.0, 100.0)
            } else {
                100.0
            };
            RewardProgress {
                reward: reward.clone(),
                unlocked: total_raised >= reward.threshold,
                progress,
            }
        })
        .collect()
}

/// The cheapest locked reward and the amount still missing for it.
pub fn next_reward(rewards: &[Reward], total_raised: f64) -> Option<(&Reward, f64)> {
    rewards
        .iter()
        .filter(|r| total_raised < r.threshold)
        .min_by(|a, b| a.threshold.total_cmp(&b.threshold))
        .map(|r| (r, r.threshold - total_raised))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_caps_at_hundred() {
        let progress = reward_progress(&default_rewards(), 1250.0);

        assert_eq!(progress.len(), 4);
        assert!(progress[0].unlocked);
        assert_eq!(progress[0].progress, 100.0);
        assert!(progress[2].unlocked);
        assert!(!progress[3].unlocked);
        assert_eq!(progress[3].progress, 50.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let progress = reward_progress(&default_rewards(), 500.0);
        assert!(progress[1].unlocked);
        assert!(!progress[2].unlocked);
    }

    #[test]
    fn test_next_reward() {
        let rewards = default_rewards();
        let (reward, missing) = next_reward(&rewards, 420.0).unwrap();
        assert_eq!(reward.tier, RewardTier::Silver);
        assert_eq!(missing, 80.0);

        assert!(next_reward(&rewards, 3000.0).is_none());
    }
}
