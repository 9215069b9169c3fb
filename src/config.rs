//! Planner configuration: derating constants and route scoring weights.
//!
//! ```toml
//! [derating]
//! radius_floor = 0.05
//! radius_exponent = 1.5
//! height_floor = 0.7
//! height_slope = 0.3
//! warning_margin_pct = 10.0
//!
//! [scoring]
//! caution_buffer = { value = 0.5, unit = "m" }
//!
//! [scoring.penalties]
//! safe = 0
//! caution = 10
//! unsafe = 30
//! ```
//!
//! Any missing table or key falls back to its default.

use crate::capacity::DeratingConfig;
use crate::route::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid {section} configuration: {reason}")]
    Invalid { section: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub derating: DeratingConfig,
    pub scoring: ScoringConfig,
}

impl PlannerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.as_ref().display(), "planner configuration loaded");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.derating
            .validate()
            .map_err(|reason| ConfigError::Invalid { section: "derating", reason })?;
        self.scoring
            .validate()
            .map_err(|reason| ConfigError::Invalid { section: "scoring", reason })?;
        Ok(())
    }
}
