// src/config/loader.rs
//! Layered configuration loader
//!
//! Defaults, then each existing TOML file in order, then `GESTURE_*`
//! environment overrides. Missing files are skipped.

use crate::config::{constants::paths, GestureConfig};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
    #[error("Configuration parse error: {0}")]
    ParseError(String),
    #[error("Configuration validation errors: {}", .0.join("; "))]
    ValidationError(Vec<String>),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Configuration loader over an ordered list of TOML files
pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    env_prefix: String,
    current_config: GestureConfig,
}

impl ConfigLoader {
    /// Loader over the conventional config locations
    pub fn new() -> Self {
        Self::with_paths(Self::discover_config_paths())
    }

    /// Loader with custom paths, later paths take precedence
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            config_paths: paths,
            env_prefix: paths::ENV_PREFIX.to_string(),
            current_config: GestureConfig::default(),
        }
    }

    /// Use a different environment prefix (tests, embedding hosts)
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_string();
        self
    }

    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    /// Load, merge and validate the configuration
    pub fn load(&mut self) -> Result<GestureConfig, ConfigError> {
        let config = self.load_and_merge_configs()?;
        info!(
            interval_ms = config.input.double_tap_interval_ms,
            max_points = config.recognition.max_points,
            backend = ?config.recognition.backend,
            "configuration loaded"
        );
        self.current_config = config.clone();
        Ok(config)
    }

    /// Last successfully loaded configuration (defaults before any load)
    pub fn current(&self) -> &GestureConfig {
        &self.current_config
    }

    /// Parse a single TOML document over the defaults, without env overrides
    pub fn load_from_str(content: &str) -> Result<GestureConfig, ConfigError> {
        let mut merged = Self::default_value()?;
        let overlay: toml::Value = toml::from_str(content)?;
        merge_toml_values(&mut merged, overlay);
        Self::finish(merged)
    }

    /// Validate a file without touching the current configuration
    pub fn validate_config_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content).map(|_| ())
    }

    /// Write the current configuration as TOML
    pub fn export_config<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let toml_content = toml::to_string_pretty(&self.current_config)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    fn load_and_merge_configs(&self) -> Result<GestureConfig, ConfigError> {
        let mut merged = Self::default_value()?;

        for config_path in &self.config_paths {
            if !config_path.exists() {
                debug!(path = %config_path.display(), "skipping missing config file");
                continue;
            }
            let content = std::fs::read_to_string(config_path)?;
            let file_config: toml::Value = toml::from_str(&content)?;
            merge_toml_values(&mut merged, file_config);
        }

        self.apply_environment_overrides(&mut merged);
        Self::finish(merged)
    }

    fn default_value() -> Result<toml::Value, ConfigError> {
        toml::Value::try_from(GestureConfig::default())
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn finish(merged: toml::Value) -> Result<GestureConfig, ConfigError> {
        let config: GestureConfig = merged.try_into().map_err(|e: toml::de::Error| {
            ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
        })?;
        config
            .validate_consistency()
            .map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// `GESTURE_INPUT_DOUBLE_TAP_INTERVAL_MS=150` sets `input.double_tap_interval_ms`
    fn apply_environment_overrides(&self, config: &mut toml::Value) {
        for (key, value) in std::env::vars() {
            let Some(rest) = key.strip_prefix(&self.env_prefix) else {
                continue;
            };
            let rest = rest.to_lowercase();
            let Some((section, field)) = rest.split_once('_') else {
                continue;
            };
            if field.is_empty() {
                continue;
            }
            debug!(section, field, "applying environment override");
            set_nested_value(config, section, field, parse_env_value(&value));
        }
    }

    fn discover_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(paths::USER_CONFIG_DIR).join("config.toml"));
        }

        // Local configurations (in order of precedence)
        paths.push(PathBuf::from(paths::DEFAULT_CONFIG_FILE));
        paths.push(PathBuf::from(paths::LOCAL_CONFIG_FILE));

        paths
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn merge_toml_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                if let Some(base_value) = base_table.get_mut(&key) {
                    merge_toml_values(base_value, value);
                } else {
                    base_table.insert(key, value);
                }
            }
        }
        (base_value, overlay_value) => {
            *base_value = overlay_value;
        }
    }
}

fn parse_env_value(value: &str) -> toml::Value {
    if let Ok(int_val) = value.parse::<i64>() {
        toml::Value::Integer(int_val)
    } else if let Ok(float_val) = value.parse::<f64>() {
        toml::Value::Float(float_val)
    } else if let Ok(bool_val) = value.parse::<bool>() {
        toml::Value::Boolean(bool_val)
    } else {
        toml::Value::String(value.to_string())
    }
}

fn set_nested_value(config: &mut toml::Value, section: &str, field: &str, value: toml::Value) {
    if let toml::Value::Table(table) = config {
        let entry = table
            .entry(section.to_string())
            .or_insert_with(|| toml::Value::Table(toml::value::Table::new()));
        if let toml::Value::Table(section_table) = entry {
            section_table.insert(field.to_string(), value);
        }
    }
}

// Cross-platform directory discovery
mod dirs {
    use std::path::PathBuf;

    pub fn home_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var_os("USERPROFILE").map(PathBuf::from)
        }
        #[cfg(not(target_os = "windows"))]
        {
            std::env::var_os("HOME").map(PathBuf::from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BackendKind, LogLevel};
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_config_loader_creation() {
        let loader = ConfigLoader::new();
        assert!(!loader.config_paths().is_empty());
    }

    #[test]
    #[serial]
    fn test_missing_files_yield_defaults() {
        let mut loader = ConfigLoader::with_paths(vec![PathBuf::from("does/not/exist.toml")])
            .with_env_prefix("GESTURE_TEST_MISSING_");
        let config = loader.load().unwrap();
        assert_eq!(config, GestureConfig::default());
    }

    #[test]
    #[serial]
    fn test_later_files_take_precedence() {
        let base = write_config(
            r#"
[input]
double_tap_interval_ms = 200

[recognition]
max_points = 32
"#,
        );
        let local = write_config(
            r#"
[input]
double_tap_interval_ms = 120
"#,
        );

        let mut loader =
            ConfigLoader::with_paths(vec![base.path().to_path_buf(), local.path().to_path_buf()])
                .with_env_prefix("GESTURE_TEST_LAYER_");
        let config = loader.load().unwrap();
        assert_eq!(config.input.double_tap_interval_ms, 120);
        assert_eq!(config.recognition.max_points, 32);
        assert_eq!(loader.current().recognition.max_points, 32);
    }

    #[test]
    fn test_invalid_config_validation() {
        let loader = ConfigLoader::with_paths(Vec::new());
        let temp_file = write_config(
            r#"
[recognition]
max_points = 0  # Too low
"#,
        );
        match loader.validate_config_file(temp_file.path()) {
            Err(ConfigError::ValidationError(errors)) => assert_eq!(errors.len(), 1),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_reported() {
        let result = ConfigLoader::load_from_str("[input\ndouble_tap_interval_ms = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_from_str_enums() {
        let config = ConfigLoader::load_from_str(
            r#"
[recognition]
backend = "learned"
model_path = "models/shape.onnx"

[logging]
level = "debug"
"#,
        )
        .unwrap();
        assert_eq!(config.recognition.backend, BackendKind::Learned);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    #[serial]
    fn test_environment_override() {
        std::env::set_var("GESTURE_TEST_ENV_INPUT_DOUBLE_TAP_INTERVAL_MS", "150");
        std::env::set_var("GESTURE_TEST_ENV_LOGGING_LEVEL", "warn");

        let mut loader = ConfigLoader::with_paths(Vec::new()).with_env_prefix("GESTURE_TEST_ENV_");
        let config = loader.load().unwrap();

        std::env::remove_var("GESTURE_TEST_ENV_INPUT_DOUBLE_TAP_INTERVAL_MS");
        std::env::remove_var("GESTURE_TEST_ENV_LOGGING_LEVEL");

        assert_eq!(config.input.double_tap_interval_ms, 150);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_config_export() {
        let loader = ConfigLoader::with_paths(Vec::new());
        let temp_file = NamedTempFile::new().unwrap();

        assert!(loader.export_config(temp_file.path()).is_ok());

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("[input]"));
        assert!(loader.validate_config_file(temp_file.path()).is_ok());
    }
}
