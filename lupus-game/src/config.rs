//! Session configuration.
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Roster size required before the game can start.
    #[serde(default = "SessionConfig::default_min_players")]
    pub min_players: usize,
    /// Reject votes at night and role edits on eliminated players.
    #[serde(default = "SessionConfig::default_enforce_gates")]
    pub enforce_gates: bool,
    /// Fixed RNG seed; entropy is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SessionConfig {
    const fn default_min_players() -> usize {
        3
    }

    const fn default_enforce_gates() -> bool {
        true
    }

    #[must_use]
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Parse and validate a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::MinViolation`] when `min_players` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players < 1 {
            return Err(ConfigError::MinViolation {
                field: "min_players",
                min: 1,
                value: self.min_players,
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_players: Self::default_min_players(),
            enforce_gates: Self::default_enforce_gates(),
            seed: None,
        }
    }
}
