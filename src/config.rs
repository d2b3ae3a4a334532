use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_RECEIVER_PORT: u16 = 22111;
const DEFAULT_TEARDOWN_MS: u64 = 3 * 60 * 1000;
const DEFAULT_UNAVAILABLE_PERIOD_MS: u64 = 60 * 1000;

/// Errors surfaced while loading or validating probe configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse probe config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid probe config: {0}")]
    InvalidValue(String),
}

/// Probe-wide configuration. Every field has a deployment-ready default, so
/// an empty JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub log_level: LogLevel,
    pub receiver: ReceiverConfig,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            receiver: ReceiverConfig::default(),
        }
    }
}

impl ProbeConfig {
    /// Parses a JSON document and validates the result.
    pub fn from_json(payload: &str) -> Result<Self, ConfigError> {
        let config: ProbeConfig = serde_json::from_str(payload)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.receiver.port == 0 {
            return Err(ConfigError::InvalidValue(
                "receiver.port must not be zero".to_string(),
            ));
        }
        if self.receiver.errors.unavailable_period_to_report_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "receiver.errors.unavailable_period_to_report_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Receiver-side settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    /// Port the receiver endpoint listens on.
    pub port: u16,
    /// How long the receiver keeps serving after a finished notification,
    /// letting in-flight events drain before the final report.
    pub teardown_ms: u64,
    pub errors: ErrorRules,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_RECEIVER_PORT,
            teardown_ms: DEFAULT_TEARDOWN_MS,
            errors: ErrorRules::default(),
        }
    }
}

impl ReceiverConfig {
    pub fn teardown(&self) -> Duration {
        Duration::from_millis(self.teardown_ms)
    }
}

/// Rules deciding which sender-reported observations become findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorRules {
    /// Shortest unavailability window worth a finding. Windows at or above
    /// this length are reported; shorter ones are tolerated.
    pub unavailable_period_to_report_ms: u64,
}

impl Default for ErrorRules {
    fn default() -> Self {
        Self {
            unavailable_period_to_report_ms: DEFAULT_UNAVAILABLE_PERIOD_MS,
        }
    }
}

impl ErrorRules {
    pub fn unavailable_period_to_report(&self) -> Duration {
        Duration::from_millis(self.unavailable_period_to_report_ms)
    }
}
