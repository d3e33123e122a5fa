use crate::core::ranking::rank;
use crate::core::rewards::{default_rewards, reward_progress};
use crate::core::stats::stats;
use crate::core::{
    GrowthModel, Participant, ParticipantSource, RankedParticipant, Reward, RewardProgress,
    UserStatistics,
};
use crate::utils::error::{BoardError, Result};
use crate::utils::validation::{
    validate_donation_amount, validate_email, validate_non_empty_string,
};
use chrono::{Datelike, Utc};

/// Everything the dashboard and leaderboard pages ask for, computed over a
/// participant source.
pub struct Dashboard<S: ParticipantSource, G: GrowthModel> {
    source: S,
    growth: G,
    rewards: Vec<Reward>,
}

impl<S: ParticipantSource, G: GrowthModel> Dashboard<S, G> {
    pub fn new(source: S, growth: G) -> Self {
        Self::with_rewards(source, growth, default_rewards())
    }

    pub fn with_rewards(source: S, growth: G, rewards: Vec<Reward>) -> Self {
        Self {
            source,
            growth,
            rewards,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn leaderboard(&self) -> Result<Vec<RankedParticipant>> {
        let participants = self.source.participants().await?;
        let ranked = rank(&participants);
        tracing::debug!("Ranked {} participants", ranked.len());
        Ok(ranked)
    }

    pub async fn current_user(&self, participant_id: &str) -> Result<Participant> {
        self.source
            .find(participant_id)
            .await?
            .ok_or_else(|| BoardError::not_found(participant_id))
    }

    pub async fn user_stats(&self, participant_id: &str) -> Result<UserStatistics> {
        let participant = self.current_user(participant_id).await?;
        let ranked = self.leaderboard().await?;
        let monthly_growth = self.growth.monthly_growth(&participant);

        let user_stats = stats(participant_id, &ranked, monthly_growth);
        tracing::debug!(
            "Stats for {}: rank {}/{} ({}th percentile)",
            participant_id,
            user_stats.rank,
            user_stats.total_participants,
            user_stats.percentile_rank
        );
        Ok(user_stats)
    }

    pub async fn rewards(&self, participant_id: &str) -> Result<Vec<RewardProgress>> {
        let participant = self.current_user(participant_id).await?;
        Ok(reward_progress(&self.rewards, participant.total_raised))
    }

    pub fn reward_catalog(&self) -> &[Reward] {
        &self.rewards
    }

    /// Adds `amount` to the participant's total and persists the result.
    pub async fn record_donation(&self, participant_id: &str, amount: f64) -> Result<Participant> {
        validate_donation_amount(amount)?;

        let participant = self
            .source
            .add_to_total(participant_id, amount)
            .await?
            .ok_or_else(|| BoardError::not_found(participant_id))?;

        tracing::info!(
            "Recorded donation of {:.2} for {} (total {:.2})",
            amount,
            participant_id,
            participant.total_raised
        );
        Ok(participant)
    }

    pub async fn register(&self, name: &str, email: &str) -> Result<Participant> {
        validate_non_empty_string("name", name)
            .map_err(|_| BoardError::validation("Name cannot be empty"))?;
        validate_email(email)?;

        let email = email.trim();
        if self.source.find_by_email(email).await?.is_some() {
            return Err(BoardError::validation(format!(
                "An account with {} already exists",
                email
            )));
        }

        let existing = self.source.participants().await?;
        let now = Utc::now();
        let mut stamp = now.timestamp_millis();
        let mut id = format!("u{}", stamp);
        while existing.iter().any(|p| p.id == id) {
            stamp += 1;
            id = format!("u{}", stamp);
        }

        let referral_code = referral_code(name, now.year(), stamp, existing.len());
        let participant = Participant::new(id, name.trim(), 0.0)
            .with_email(email)
            .with_referral_code(referral_code);

        self.source.upsert(participant.clone()).await?;
        tracing::info!("Registered {} as {}", participant.name, participant.id);
        Ok(participant)
    }
}

/// Initials, year, then a letter and a digit, e.g. `AC2024X7`.
pub fn referral_code(name: &str, year: i32, stamp: i64, seq: usize) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .filter(|c| c.is_alphanumeric())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    let letter = char::from(b'A' + stamp.rem_euclid(26) as u8);
    format!("{}{}{}{}", initials, year, letter, seq % 10)
}

pub fn referral_link(base_url: &str, code: &str) -> String {
    format!("{}{}", base_url, code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::growth::FixedGrowth;
    use crate::adapters::source::{Latency, MockParticipantSource};
    use crate::adapters::storage::MemoryStore;

    fn dashboard() -> Dashboard<MockParticipantSource<MemoryStore>, FixedGrowth> {
        let source =
            MockParticipantSource::with_default_roster(MemoryStore::new(), Latency::none());
        Dashboard::new(source, FixedGrowth(15))
    }

    #[tokio::test]
    async fn test_leaderboard_order() {
        let board = dashboard().leaderboard().await.unwrap();

        assert_eq!(board.len(), 10);
        assert_eq!(board[0].participant.name, "Michael Rodriguez");
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[9].participant.name, "Alex Chen");
        assert_eq!(board[9].rank, 10);
    }

    #[tokio::test]
    async fn test_user_stats() {
        let stats = dashboard().user_stats("3").await.unwrap();

        assert_eq!(stats.rank, 1);
        assert_eq!(stats.total_participants, 10);
        assert_eq!(stats.percentile_rank, 100);
        assert_eq!(stats.referrals, 31);
        assert_eq!(stats.monthly_growth, 15);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let err = dashboard().user_stats("missing-id").await.unwrap_err();
        assert!(matches!(err, BoardError::NotFound { ref id } if id == "missing-id"));
    }

    #[tokio::test]
    async fn test_donation_moves_rank() {
        let dashboard = dashboard();
        assert_eq!(dashboard.user_stats("1").await.unwrap().rank, 10);

        let alex = dashboard.record_donation("1", 2000.0).await.unwrap();
        assert_eq!(alex.total_raised, 3250.0);

        let stats = dashboard.user_stats("1").await.unwrap();
        assert_eq!(stats.rank, 1);
        assert_eq!(stats.total_raised, 3250.0);
    }

    #[tokio::test]
    async fn test_simultaneous_donations_both_count() {
        let dashboard = dashboard();

        let (first, second) = tokio::join!(
            dashboard.record_donation("2", 100.0),
            dashboard.record_donation("2", 60.0),
        );
        assert!(first.is_ok() && second.is_ok());

        let stats = dashboard.user_stats("2").await.unwrap();
        assert_eq!(stats.total_raised, 3000.0);
    }

    #[tokio::test]
    async fn test_invalid_donation_is_rejected() {
        let dashboard = dashboard();
        assert!(matches!(
            dashboard.record_donation("1", 0.0).await,
            Err(BoardError::ValidationError { .. })
        ));
        assert!(matches!(
            dashboard.record_donation("nope", 10.0).await,
            Err(BoardError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_register_joins_leaderboard_last() {
        let dashboard = dashboard();
        let newcomer = dashboard.register("Priya Patel", "priya@company.com").await.unwrap();

        assert_eq!(newcomer.total_raised, 0.0);
        assert!(newcomer.referral_code.as_deref().unwrap().starts_with("PP"));

        let stats = dashboard.user_stats(&newcomer.id).await.unwrap();
        assert_eq!(stats.total_participants, 11);
        assert_eq!(stats.rank, 11);
        assert_eq!(stats.percentile_rank, 9);

        assert!(dashboard.register("Priya Again", "priya@company.com").await.is_err());
        assert!(dashboard.register("", "someone@company.com").await.is_err());
        assert!(dashboard.register("Alex Chen", "alex.chen@company.com").await.is_err());
    }

    #[tokio::test]
    async fn test_rewards_for_participant() {
        let rewards = dashboard().rewards("1").await.unwrap();
        let unlocked: Vec<bool> = rewards.iter().map(|r| r.unlocked).collect();
        assert_eq!(unlocked, vec![true, true, true, false]);
    }

    #[test]
    fn test_referral_code_shape() {
        assert_eq!(referral_code("Alex Chen", 2024, 23, 7), "AC2024X7");
        assert_eq!(referral_code("cher", 2025, 0, 12), "C2025A2");
    }

    #[test]
    fn test_referral_link() {
        assert_eq!(
            referral_link("https://donateapp.com/ref/", "AC2024X7"),
            "https://donateapp.com/ref/AC2024X7"
        );
    }
}
