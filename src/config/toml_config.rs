use crate::core::{ConfigProvider, Reward};
use crate::utils::error::{BoardError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub board: BoardInfo,
    pub store: StoreConfig,
    pub latency: LatencyConfig,
    pub stats: StatsConfig,
    pub share: ShareConfig,
    pub rewards: Option<Vec<Reward>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardInfo {
    pub name: String,
    pub version: String,
}

impl Default for BoardInfo {
    fn default() -> Self {
        Self {
            name: "intern-fundraising".to_string(),
            version: "1.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "./.fundraise-board".to_string(),
        }
    }
}

/// Simulated round-trip delays, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub enabled: bool,
    pub leaderboard_ms: u64,
    pub lookup_ms: u64,
    pub update_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            leaderboard_ms: 1200,
            lookup_ms: 600,
            update_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub monthly_growth_percent: u32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            monthly_growth_percent: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    pub referral_base_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            referral_base_url: "https://donateapp.com/ref/".to_string(),
        }
    }
}

impl BoardConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BoardError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BoardError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BoardError::ConfigError {
            message: format!("Invalid env var pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// `name vVERSION`, as shown when the board starts.
    pub fn label(&self) -> String {
        format!("{} v{}", self.board.name, self.board.version)
    }

    pub fn rewards(&self) -> Vec<Reward> {
        self.rewards
            .clone()
            .unwrap_or_else(crate::core::rewards::default_rewards)
    }
}

impl ConfigProvider for BoardConfig {
    fn store_path(&self) -> &str {
        &self.store.path
    }

    fn monthly_growth_percent(&self) -> u32 {
        self.stats.monthly_growth_percent
    }

    fn leaderboard_delay_ms(&self) -> u64 {
        if self.latency.enabled {
            self.latency.leaderboard_ms
        } else {
            0
        }
    }

    fn lookup_delay_ms(&self) -> u64 {
        if self.latency.enabled {
            self.latency.lookup_ms
        } else {
            0
        }
    }

    fn update_delay_ms(&self) -> u64 {
        if self.latency.enabled {
            self.latency.update_ms
        } else {
            0
        }
    }
}

impl Validate for BoardConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("board.name", &self.board.name)?;
        validate_non_empty_string("board.version", &self.board.version)?;
        validate_path("store.path", &self.store.path)?;
        validate_range("stats.monthly_growth_percent", self.stats.monthly_growth_percent, 0, 1000)?;

        if let Some(rewards) = &self.rewards {
            for reward in rewards {
                validate_non_empty_string("rewards.title", &reward.title)?;
                if !reward.threshold.is_finite() || reward.threshold <= 0.0 {
                    return Err(BoardError::InvalidConfigValueError {
                        field: "rewards.threshold".to_string(),
                        value: reward.threshold.to_string(),
                        reason: "Threshold must be a positive amount".to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RewardTier;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = BoardConfig::from_toml_str("").unwrap();

        assert_eq!(config.store_path(), "./.fundraise-board");
        assert_eq!(config.monthly_growth_percent(), 15);
        assert_eq!(config.leaderboard_delay_ms(), 1200);
        assert_eq!(config.rewards().len(), 4);
        assert_eq!(config.label(), "intern-fundraising v1.0");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[board]
name = "summer-cohort"
version = "2.1"

[store]
path = "/tmp/board"

[latency]
enabled = false

[stats]
monthly_growth_percent = 22

[[rewards]]
title = "Kickoff"
description = "Raise $50"
threshold = 50.0
tier = "bronze"
"#;

        let config = BoardConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.board.name, "summer-cohort");
        assert_eq!(config.label(), "summer-cohort v2.1");
        assert_eq!(config.store_path(), "/tmp/board");
        assert_eq!(config.lookup_delay_ms(), 0);
        assert_eq!(config.monthly_growth_percent(), 22);

        let rewards = config.rewards();
        assert_eq!(rewards.len(), 1);
        assert_eq!(rewards[0].tier, RewardTier::Bronze);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FUNDRAISE_BOARD_TEST_STORE", "/var/lib/board");

        let config = BoardConfig::from_toml_str(
            r#"
[store]
path = "${FUNDRAISE_BOARD_TEST_STORE}"
"#,
        )
        .unwrap();
        assert_eq!(config.store.path, "/var/lib/board");

        std::env::remove_var("FUNDRAISE_BOARD_TEST_STORE");
    }

    #[test]
    fn test_config_validation() {
        let config = BoardConfig::from_toml_str(
            r#"
[store]
path = ""
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = BoardConfig::from_toml_str(
            r#"
[[rewards]]
title = "Broken"
description = "zero threshold"
threshold = 0.0
tier = "gold"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = BoardConfig::from_toml_str(
            r#"
[board]
version = " "
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(BoardError::InvalidConfigValueError { ref field, .. }) if field == "board.version"
        ));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = BoardConfig::from_toml_str("[store\npath = 1").unwrap_err();
        assert!(matches!(err, BoardError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[board]\nname = \"file-test\"\n")
            .unwrap();

        let config = BoardConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.board.name, "file-test");
    }
}
