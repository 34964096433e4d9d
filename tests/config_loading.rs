// tests/config_loading.rs
//! Integration tests for layered configuration

use gesture_core::config::{BackendKind, ConfigError, ConfigLoader, LogLevel};
use gesture_core::{GestureConfig, GestureSession, TapAction, TapSequencer};
use serial_test::serial;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_defaults_without_files() {
    let mut loader = ConfigLoader::with_paths(vec![PathBuf::from("no/such/config.toml")])
        .with_env_prefix("GESTURE_ITEST_NONE_");
    let config = loader.load().unwrap();
    assert_eq!(config, GestureConfig::default());
    assert_eq!(config.input.double_tap_interval_ms, 300);
    assert_eq!(config.recognition.max_points, 16);
    assert_eq!(config.logging.level, LogLevel::Info);
}

#[test]
fn test_later_files_take_precedence() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("base.toml");
    let local = dir.path().join("local.toml");
    std::fs::write(&base, "[input]\ndouble_tap_interval_ms = 200\n[recognition]\nmax_points = 32\n").unwrap();
    std::fs::write(&local, "[input]\ndouble_tap_interval_ms = 150\n").unwrap();

    let mut loader =
        ConfigLoader::with_paths(vec![base, local]).with_env_prefix("GESTURE_ITEST_NONE_");
    let config = loader.load().unwrap();
    assert_eq!(config.input.double_tap_interval_ms, 150);
    assert_eq!(config.recognition.max_points, 32);
    assert_eq!(loader.current(), &config);
}

#[test]
#[serial]
fn test_environment_overrides_files() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("gesture.toml");
    std::fs::write(&file, "[input]\ndouble_tap_interval_ms = 200\n").unwrap();

    std::env::set_var("GESTURE_ITEST_ENV_INPUT_DOUBLE_TAP_INTERVAL_MS", "120");
    std::env::set_var("GESTURE_ITEST_ENV_LOGGING_LEVEL", "debug");
    let result = ConfigLoader::with_paths(vec![file])
        .with_env_prefix("GESTURE_ITEST_ENV_")
        .load();
    std::env::remove_var("GESTURE_ITEST_ENV_INPUT_DOUBLE_TAP_INTERVAL_MS");
    std::env::remove_var("GESTURE_ITEST_ENV_LOGGING_LEVEL");

    let config = result.unwrap();
    assert_eq!(config.input.double_tap_interval_ms, 120);
    assert_eq!(config.logging.level, LogLevel::Debug);
}

#[test]
fn test_learned_backend_requires_model_path() {
    let err = ConfigLoader::load_from_str("[recognition]\nbackend = \"learned\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));

    let config = ConfigLoader::load_from_str(
        "[recognition]\nbackend = \"learned\"\nmodel_path = \"models/shape.onnx\"\n",
    )
    .unwrap();
    assert_eq!(config.recognition.backend, BackendKind::Learned);
}

#[test]
fn test_config_reaches_components() {
    let dir = tempdir().unwrap();
    let config = ConfigLoader::load_from_str(&format!(
        "[input]\ndouble_tap_interval_ms = 50\n[storage]\ncommand_map_path = \"{}\"\nmodel_registry_path = \"{}\"\n",
        dir.path().join("commands.json").display(),
        dir.path().join("models.json").display(),
    ))
    .unwrap();

    let mut sequencer = TapSequencer::from_config(&config.input);
    sequencer.on_tap(0);
    assert_eq!(sequencer.on_tap(60), TapAction::None);

    let session = GestureSession::from_config(&config);
    assert_eq!(session.sequencer().double_tap_interval_ms(), 50);
    assert!(session.dispatcher().router().is_empty());
    assert_eq!(session.dispatcher().command_for_symbol("triangle"), "copy");
}

#[test]
fn test_export_then_validate() {
    let dir = tempdir().unwrap();
    let exported = dir.path().join("exported.toml");

    let loader = ConfigLoader::with_paths(Vec::new());
    loader.export_config(&exported).unwrap();
    loader.validate_config_file(&exported).unwrap();

    assert!(matches!(
        loader.validate_config_file(dir.path().join("missing.toml")),
        Err(ConfigError::FileNotFound(_))
    ));
}
