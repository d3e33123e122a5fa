use crate::domain::model::Participant;
use crate::utils::error::Result;
use async_trait::async_trait;

/// String key-value persistence, shaped after the browser's local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set(&self, key: &str, value: &str)
        -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove(&self, key: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn store_path(&self) -> &str;
    fn monthly_growth_percent(&self) -> u32;
    fn leaderboard_delay_ms(&self) -> u64;
    fn lookup_delay_ms(&self) -> u64;
    fn update_delay_ms(&self) -> u64;
}

#[async_trait]
pub trait ParticipantSource: Send + Sync {
    /// Every known participant, in source order.
    async fn participants(&self) -> Result<Vec<Participant>>;
    async fn find(&self, id: &str) -> Result<Option<Participant>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Participant>>;
    /// Inserts the participant, or replaces the one with the same id.
    async fn upsert(&self, participant: Participant) -> Result<()>;
    /// Adds `amount` to the participant's total in one step and returns the
    /// updated record, or `None` when the id is unknown.
    async fn add_to_total(&self, id: &str, amount: f64) -> Result<Option<Participant>>;
}

pub trait GrowthModel: Send + Sync {
    fn monthly_growth(&self, participant: &Participant) -> u32;
}
