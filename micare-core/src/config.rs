//! TOML configuration: simulated delays and front-end settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Every simulated delay, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub splash_ms: u64,
    pub login_ms: u64,
    pub login_biometric_scan_ms: u64,
    pub login_biometric_reset_ms: u64,
    pub role_select_ms: u64,
    pub personal_data_handoff_ms: u64,
    pub upload_advance_ms: u64,
    pub biometric_processing_ms: u64,
    pub biometric_advance_ms: u64,
    pub validation_start_ms: u64,
    pub validation_stage_ms: u64,
    pub validation_success_ms: u64,
    pub chat_reply_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            splash_ms: 3000,
            login_ms: 1500,
            login_biometric_scan_ms: 2000,
            login_biometric_reset_ms: 2000,
            role_select_ms: 1000,
            personal_data_handoff_ms: 500,
            upload_advance_ms: 1000,
            biometric_processing_ms: 2000,
            biometric_advance_ms: 1000,
            validation_start_ms: 1000,
            validation_stage_ms: 2000,
            validation_success_ms: 1000,
            chat_reply_ms: 1000,
        }
    }
}

impl Timings {
    /// Divide every delay by `divisor` (minimum 1 ms per delay).
    pub fn scaled_down(self, divisor: u64) -> Self {
        let d = divisor.max(1);
        let s = |ms: u64| (ms / d).max(1);
        Self {
            splash_ms: s(self.splash_ms),
            login_ms: s(self.login_ms),
            login_biometric_scan_ms: s(self.login_biometric_scan_ms),
            login_biometric_reset_ms: s(self.login_biometric_reset_ms),
            role_select_ms: s(self.role_select_ms),
            personal_data_handoff_ms: s(self.personal_data_handoff_ms),
            upload_advance_ms: s(self.upload_advance_ms),
            biometric_processing_ms: s(self.biometric_processing_ms),
            biometric_advance_ms: s(self.biometric_advance_ms),
            validation_start_ms: s(self.validation_start_ms),
            validation_stage_ms: s(self.validation_stage_ms),
            validation_success_ms: s(self.validation_success_ms),
            chat_reply_ms: s(self.chat_reply_ms),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub timings: Timings,
    /// Front-end frame interval.
    pub tick_rate_ms: u64,
    /// Seed for generated chart series (30d / 90d filters).
    pub chart_seed: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timings: Timings::default(),
            tick_rate_ms: 50,
            chart_seed: 42,
        }
    }
}

impl AppConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string. Missing keys take defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
