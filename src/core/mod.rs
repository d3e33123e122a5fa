pub mod dashboard;
pub mod leaderboard;
pub mod ranking;
pub mod rewards;
pub mod session;
pub mod stats;

pub use crate::domain::model::{
    Participant, RankedParticipant, Reward, RewardProgress, RewardTier, UserStatistics,
};
pub use crate::domain::ports::{ConfigProvider, GrowthModel, KeyValueStore, ParticipantSource};
pub use crate::utils::error::Result;
