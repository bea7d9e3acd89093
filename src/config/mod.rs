use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::EngineError;
use crate::models::landmark::DEFAULT_MIN_CONFIDENCE;

/// Environment variable overriding the landmark confidence gate
pub const MIN_CONFIDENCE_ENV: &str = "FORM_COACH_MIN_CONFIDENCE";

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Landmarks below this confidence are treated as missing (0-1)
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
}

fn default_min_confidence() -> f32 {
    DEFAULT_MIN_CONFIDENCE
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
        }
    }
}

impl EngineConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().apply_env()
    }

    /// Override fields from environment variables, then validate
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_value(env::var(MIN_CONFIDENCE_ENV).ok().as_deref())
    }

    fn apply_env_value(mut self, min_confidence: Option<&str>) -> Result<Self> {
        if let Some(raw) = min_confidence {
            self.min_confidence = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number, got {:?}", MIN_CONFIDENCE_ENV, raw))?;
            tracing::debug!(min_confidence = self.min_confidence, "Confidence gate set from environment");
        }

        self.validate()?;
        Ok(self)
    }

    /// Set the confidence gate, clamped to 0-1
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence.clamp(0.0, 1.0);
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(EngineError::InvalidConfig(format!(
                "min_confidence must be between 0 and 1, got {}",
                self.min_confidence
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.min_confidence, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_min_confidence_is_clamped() {
        assert_eq!(EngineConfig::default().with_min_confidence(1.7).min_confidence, 1.0);
        assert_eq!(EngineConfig::default().with_min_confidence(-0.2).min_confidence, 0.0);
    }

    #[test]
    fn test_validation_rejects_out_of_range() {
        let config = EngineConfig {
            min_confidence: 1.5,
        };
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));

        let config = EngineConfig {
            min_confidence: f32::NAN,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_value_overrides_config() {
        let config = EngineConfig::default().apply_env_value(Some(" 0.8 ")).unwrap();
        assert_eq!(config.min_confidence, 0.8);

        let config = EngineConfig::default().apply_env_value(None).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_env_value_must_be_valid() {
        assert!(EngineConfig::default().apply_env_value(Some("high")).is_err());
        assert!(EngineConfig::default().apply_env_value(Some("1.5")).is_err());
    }

    #[test]
    fn test_from_env() {
        // only test touching the variable
        env::set_var(MIN_CONFIDENCE_ENV, "0.3");
        let valid = EngineConfig::from_env();
        env::set_var(MIN_CONFIDENCE_ENV, "not-a-number");
        let invalid = EngineConfig::from_env();
        env::remove_var(MIN_CONFIDENCE_ENV);

        assert_eq!(valid.unwrap().min_confidence, 0.3);
        let message = format!("{:#}", invalid.unwrap_err());
        assert!(message.contains(MIN_CONFIDENCE_ENV));
        assert_eq!(EngineConfig::from_env().unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
