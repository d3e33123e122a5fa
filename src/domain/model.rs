use serde::{Deserialize, Serialize};

/// A person tracked for fundraising totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub total_raised: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>, total_raised: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            total_raised,
            department: None,
            email: None,
            referral_code: None,
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_referral_code(mut self, code: impl Into<String>) -> Self {
        self.referral_code = Some(code.into());
        self
    }
}

/// A participant together with its position on the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedParticipant {
    #[serde(flatten)]
    pub participant: Participant,
    pub rank: u32,
}

impl RankedParticipant {
    pub fn id(&self) -> &str {
        &self.participant.id
    }

    pub fn total_raised(&self) -> f64 {
        self.participant.total_raised
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatistics {
    pub total_raised: f64,
    /// `0` when the participant is not on the leaderboard.
    pub rank: u32,
    pub total_participants: usize,
    pub percentile_rank: u32,
    pub monthly_growth: u32,
    pub referrals: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub title: String,
    pub description: String,
    pub threshold: f64,
    pub tier: RewardTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardProgress {
    pub reward: Reward,
    pub unlocked: bool,
    /// Percentage towards the threshold, capped at 100.
    pub progress: f64,
}
