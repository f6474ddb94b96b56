use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::commitment::CommitmentLimits;
use crate::error::ConfigError;
use crate::odds::OddsPolicy;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub policy: OddsPolicy,
    #[serde(default)]
    pub limits: CommitmentLimits,
}

#[derive(Debug, Deserialize)]
pub struct General {
    pub log_level: String,
}

impl Default for General {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy.validate()?;

        if let Some(max) = self.limits.max_stake {
            if max < self.limits.min_stake {
                return Err(ConfigError::InvalidValue {
                    field: "limits.max_stake",
                    reason: format!("must be at least min_stake ({}), got {}", self.limits.min_stake, max),
                });
            }
        }
        Ok(())
    }
}
