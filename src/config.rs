use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration for Stroke-Sync
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Companion (reference) clip settings
    pub companion: CompanionConfig,

    /// Playback settings
    pub playback: PlaybackConfig,

    /// Processing submission settings
    pub processing: ProcessingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            companion: CompanionConfig::default(),
            playback: PlaybackConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|_| ConfigError::ParseFailed {
            path: path.display().to_string(),
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.companion.validate()?;
        self.playback.validate()?;
        self.processing.validate()?;
        Ok(())
    }
}

/// Companion clip configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanionConfig {
    /// Source handle/URL of the canonical reference clip
    pub source: String,

    /// Known position of ball contact on the reference clip (seconds)
    pub contact_instant: f64,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            source: "fed.mp4".to_string(),
            contact_instant: 2.33,
        }
    }
}

impl CompanionConfig {
    fn validate(&self) -> Result<()> {
        if self.source.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "companion.source".to_string(),
                value: "<empty>".to_string(),
            }
            .into());
        }

        if !self.contact_instant.is_finite() || self.contact_instant < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "companion.contact_instant".to_string(),
                value: self.contact_instant.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Playback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Rate presets offered to the user (e.g. slow-motion review)
    pub rate_presets: Vec<f64>,

    /// Rate applied when a session starts
    pub default_rate: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            rate_presets: vec![0.1, 0.5, 1.0],
            default_rate: 1.0,
        }
    }
}

impl PlaybackConfig {
    fn validate(&self) -> Result<()> {
        if self.rate_presets.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "playback.rate_presets".to_string(),
                value: "<empty>".to_string(),
            }
            .into());
        }

        for &rate in &self.rate_presets {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: "playback.rate_presets".to_string(),
                    value: rate.to_string(),
                }
                .into());
            }
        }

        if !self.default_rate.is_finite() || self.default_rate <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "playback.default_rate".to_string(),
                value: self.default_rate.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Processing submission configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Endpoint accepting finalized alignments
    pub endpoint: String,

    /// Seconds to wait for the backend before giving up
    pub request_timeout_secs: u64,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/process".to_string(),
            request_timeout_secs: 120,
        }
    }
}

impl ProcessingConfig {
    fn validate(&self) -> Result<()> {
        if url::Url::parse(&self.endpoint).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "processing.endpoint".to_string(),
                value: self.endpoint.clone(),
            }
            .into());
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "processing.request_timeout_secs".to_string(),
                value: self.request_timeout_secs.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.companion.contact_instant, 2.33);
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let original_config = Config::default();

        // Save and load
        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(
            original_config.companion.contact_instant,
            loaded_config.companion.contact_instant
        );
        assert_eq!(
            original_config.playback.rate_presets,
            loaded_config.playback.rate_presets
        );
        assert_eq!(
            original_config.processing.endpoint,
            loaded_config.processing.endpoint
        );
    }

    #[test]
    fn test_invalid_contact_instant() {
        let mut config = Config::default();
        config.companion.contact_instant = -1.0;
        assert!(config.validate().is_err());

        config.companion.contact_instant = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rate_presets() {
        let mut config = Config::default();
        config.playback.rate_presets = vec![0.5, 0.0];
        assert!(config.validate().is_err());

        config.playback.rate_presets = vec![];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_processing_endpoint() {
        let mut config = Config::default();
        config.processing.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_reports_not_found() {
        let result = Config::from_file("/nonexistent/stroke-sync.toml");
        assert!(result.is_err());
    }
}
