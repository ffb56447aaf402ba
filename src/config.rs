//! Batch configuration: process parameters, safety limits, and TOML loading.
//!
//! One `ProcessParams` value is the single source of truth shared between
//! control and verification: it builds both the process state chain and the
//! acceptance check list, so the two can never drift apart.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// An inclusive `[min, max]` acceptance window for one parameter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Limit {
    pub min: f64,
    pub max: f64,
}

impl Limit {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True if `value` lies inside the window (bounds included).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Parameters of the batch process itself.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessParams {
    /// Target fill window, percent of vessel capacity.
    pub fill: Limit,
    /// Pressure ceiling enforced during the reaction.
    pub max_pressure: f64,
    /// Temperature window at which the reaction is considered finished.
    pub stop_temperature: Limit,
}

impl Default for ProcessParams {
    fn default() -> Self {
        Self {
            fill: Limit::new(68.0, 72.0),
            max_pressure: 200.0,
            stop_temperature: Limit::new(79.0, 81.0),
        }
    }
}

/// Hard limits enforced by the safety monitor, independent of process state.
///
/// Deliberately looser than the process limits: the monitor is a backstop,
/// not the primary control.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyLimits {
    pub max_pressure: f64,
    pub max_temperature: f64,
}

impl Default for SafetyLimits {
    fn default() -> Self {
        Self {
            max_pressure: 250.0,
            max_temperature: 100.0,
        }
    }
}

/// Full configuration for one batch run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub process: ProcessParams,
    pub safety: SafetyLimits,
    /// Pause between device polls, in milliseconds. The reactor API can take
    /// a quarter second to answer; polling much faster buys nothing.
    pub poll_interval_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            process: ProcessParams::default(),
            safety: SafetyLimits::default(),
            poll_interval_ms: 350,
        }
    }
}

impl BatchConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Load a configuration from a TOML file. Every table and key is
    /// optional; anything absent falls back to the defaults above.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }
}

/// Errors loading a batch configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_process() {
        let config = BatchConfig::default();
        assert_eq!(config.process.fill, Limit::new(68.0, 72.0));
        assert_eq!(config.process.max_pressure, 200.0);
        assert_eq!(config.process.stop_temperature, Limit::new(79.0, 81.0));
        assert_eq!(config.safety.max_pressure, 250.0);
        assert_eq!(config.safety.max_temperature, 100.0);
        assert_eq!(config.poll_interval(), Duration::from_millis(350));
    }

    #[test]
    fn limit_contains_is_inclusive() {
        let limit = Limit::new(68.0, 72.0);
        assert!(limit.contains(68.0));
        assert!(limit.contains(72.0));
        assert!(limit.contains(70.0));
        assert!(!limit.contains(67.9));
        assert!(!limit.contains(72.1));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: BatchConfig = toml::from_str(
            r#"
            poll_interval_ms = 100

            [process]
            max_pressure = 180.0
            "#,
        )
        .unwrap();

        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.process.max_pressure, 180.0);
        // Untouched keys keep their defaults.
        assert_eq!(config.process.fill, Limit::new(68.0, 72.0));
        assert_eq!(config.safety.max_temperature, 100.0);
    }

    #[test]
    fn empty_toml_is_the_default_config() {
        let config: BatchConfig = toml::from_str("").unwrap();
        assert_eq!(config, BatchConfig::default());
    }
}
