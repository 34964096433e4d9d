// src/config/mod.rs
//! Configuration for the gesture pipeline
//!
//! Every component takes its settings by constructor; nothing reads process
//! globals. `ConfigLoader` layers TOML files and `GESTURE_*` environment
//! overrides on top of these defaults.

pub mod constants;
pub mod loader;

pub use constants::*;
pub use loader::{ConfigError, ConfigLoader};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Complete pipeline configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct GestureConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub recognition: RecognitionConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tap sequencing settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct InputConfig {
    #[serde(default = "defaults::double_tap_interval_ms")]
    pub double_tap_interval_ms: u64,
}

/// Classifier settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RecognitionConfig {
    /// Points kept per trained sample (feature length is twice this)
    #[serde(default = "defaults::max_points")]
    pub max_points: usize,

    #[serde(default = "defaults::backend")]
    pub backend: BackendKind,

    /// Model file for the learned backend of the default classifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<PathBuf>,

    #[serde(default = "defaults::backend_input_points")]
    pub backend_input_points: usize,
}

/// Persistent file locations
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "defaults::profile_path")]
    pub profile_path: PathBuf,

    #[serde(default = "defaults::command_map_path")]
    pub command_map_path: PathBuf,

    #[serde(default = "defaults::model_registry_path")]
    pub model_registry_path: PathBuf,
}

/// Log verbosity handed to whatever subscriber the host installs
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: LogLevel,
}

/// Which classifier backend to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Heuristic,
    Learned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default value providers using constants
mod defaults {
    use super::{BackendKind, LogLevel};
    use crate::config::constants::*;
    use std::path::PathBuf;

    pub fn double_tap_interval_ms() -> u64 { input::DEFAULT_DOUBLE_TAP_INTERVAL_MS }

    pub fn max_points() -> usize { recognition::DEFAULT_MAX_POINTS }
    pub fn backend() -> BackendKind { BackendKind::Heuristic }
    pub fn backend_input_points() -> usize { recognition::DEFAULT_BACKEND_INPUT_POINTS }

    pub fn profile_path() -> PathBuf { PathBuf::from(paths::DEFAULT_PROFILE_PATH) }
    pub fn command_map_path() -> PathBuf { PathBuf::from(paths::DEFAULT_COMMAND_MAP_PATH) }
    pub fn model_registry_path() -> PathBuf { PathBuf::from(paths::DEFAULT_MODEL_REGISTRY_PATH) }

    pub fn log_level() -> LogLevel { LogLevel::Info }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            double_tap_interval_ms: defaults::double_tap_interval_ms(),
        }
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            max_points: defaults::max_points(),
            backend: defaults::backend(),
            model_path: None,
            backend_input_points: defaults::backend_input_points(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            profile_path: defaults::profile_path(),
            command_map_path: defaults::command_map_path(),
            model_registry_path: defaults::model_registry_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

impl GestureConfig {
    /// Check cross-field consistency
    pub fn validate_consistency(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let interval = self.input.double_tap_interval_ms;
        if !(input::MIN_DOUBLE_TAP_INTERVAL_MS..=input::MAX_DOUBLE_TAP_INTERVAL_MS)
            .contains(&interval)
        {
            errors.push(format!(
                "Double tap interval {} ms outside {}..={} ms",
                interval,
                input::MIN_DOUBLE_TAP_INTERVAL_MS,
                input::MAX_DOUBLE_TAP_INTERVAL_MS
            ));
        }

        let max_points = self.recognition.max_points;
        if !(recognition::MIN_MAX_POINTS..=recognition::MAX_MAX_POINTS).contains(&max_points) {
            errors.push(format!(
                "max_points {} outside {}..={}",
                max_points,
                recognition::MIN_MAX_POINTS,
                recognition::MAX_MAX_POINTS
            ));
        }

        if self.recognition.backend == BackendKind::Learned {
            if self.recognition.model_path.is_none() {
                errors.push("Learned backend selected without a model_path".to_string());
            }
            if self.recognition.backend_input_points == 0 {
                errors.push("backend_input_points must be positive".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Feature vector length produced by the trained store
    pub fn feature_len(&self) -> usize {
        self.recognition.max_points * 2
    }

    pub fn get_summary(&self) -> ConfigSummary {
        ConfigSummary {
            double_tap_interval_ms: self.input.double_tap_interval_ms,
            max_points: self.recognition.max_points,
            backend: self.recognition.backend,
            log_level: self.logging.level,
        }
    }
}

/// Configuration summary for logging
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub double_tap_interval_ms: u64,
    pub max_points: usize,
    pub backend: BackendKind,
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_creation() {
        let config = GestureConfig::default();
        assert_eq!(config.input.double_tap_interval_ms, input::DEFAULT_DOUBLE_TAP_INTERVAL_MS);
        assert_eq!(config.recognition.max_points, recognition::DEFAULT_MAX_POINTS);
        assert_eq!(config.recognition.backend, BackendKind::Heuristic);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(config.validate_consistency().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = GestureConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: GestureConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: GestureConfig = toml::from_str(
            r#"
[input]
double_tap_interval_ms = 150
"#,
        )
        .unwrap();
        assert_eq!(config.input.double_tap_interval_ms, 150);
        assert_eq!(config.recognition.max_points, recognition::DEFAULT_MAX_POINTS);
        assert_eq!(
            config.storage.profile_path,
            PathBuf::from(paths::DEFAULT_PROFILE_PATH)
        );
    }

    #[test]
    fn test_learned_backend_requires_model() {
        let mut config = GestureConfig::default();
        config.recognition.backend = BackendKind::Learned;
        let errors = config.validate_consistency().unwrap_err();
        assert!(errors[0].contains("model_path"));

        config.recognition.model_path = Some(PathBuf::from("models/shape.onnx"));
        assert!(config.validate_consistency().is_ok());
    }

    #[test]
    fn test_interval_out_of_range() {
        let mut config = GestureConfig::default();
        config.input.double_tap_interval_ms = 1;
        assert!(config.validate_consistency().is_err());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Error.as_tracing_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_enum_serialization() {
        let json = serde_json::to_string(&BackendKind::Learned).expect("Failed to serialize");
        assert_eq!(json, "\"learned\"");
        let level: LogLevel = serde_json::from_str("\"warn\"").expect("Failed to deserialize");
        assert_eq!(level, LogLevel::Warn);
    }
}
