use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Sample hand settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandConfig {
    pub hand_size: usize,
    pub max_mulligans: u32,
    pub preview_count: usize,
}

impl Default for HandConfig {
    fn default() -> Self {
        HandConfig {
            hand_size: 7,
            max_mulligans: 6,
            preview_count: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub hand: HandConfig,
}

impl EngineConfig {
    /// Load settings from a JSON file; missing fields keep their defaults
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hand.hand_size == 0 {
            return Err(ConfigError::Invalid("hand_size must be at least 1".to_string()));
        }
        if self.hand.max_mulligans as usize >= self.hand.hand_size {
            return Err(ConfigError::Invalid(format!(
                "max_mulligans ({}) must be below hand_size ({})",
                self.hand.max_mulligans, self.hand.hand_size
            )));
        }
        Ok(())
    }
}
