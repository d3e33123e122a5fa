pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{
    growth::FixedGrowth,
    source::{default_roster, Latency, MockParticipantSource},
    storage::{FileStore, MemoryStore},
};
pub use config::BoardConfig;
pub use crate::core::{dashboard::Dashboard, ranking::rank, session::Session, stats::stats};
pub use domain::model::{Participant, RankedParticipant, UserStatistics};
pub use utils::error::{BoardError, Result};
