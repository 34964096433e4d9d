// src/recognition/classifier.rs
//! Shape classifier with a learned backend and heuristic fallback

use crate::config::{BackendKind, GestureConfig};
use crate::config::constants::recognition::DEFAULT_BACKEND_INPUT_POINTS;
use crate::input::types::GesturePoint;
use crate::recognition::backend::{BackendError, ClassifierBackend, LearnedBackend};
use crate::recognition::commands::CommandTable;
use crate::recognition::heuristic;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Classifies strokes and maps the symbols to commands.
///
/// When the learned backend fails to load or to infer, the classifier
/// switches to the heuristic for the rest of that backend's life and warns
/// once. The warning flag never resets.
#[derive(Debug)]
pub struct ShapeClassifier {
    backend: ClassifierBackend,
    commands: CommandTable,
    input_points: usize,
    model_path: Option<PathBuf>,
    degraded: AtomicBool,
    warned: AtomicBool,
}

impl ShapeClassifier {
    /// Heuristic classifier with the default command table
    pub fn heuristic() -> Self {
        Self::with_commands(CommandTable::with_defaults())
    }

    pub fn with_commands(commands: CommandTable) -> Self {
        Self::with_backend(ClassifierBackend::Heuristic, commands)
    }

    pub fn with_backend(backend: ClassifierBackend, commands: CommandTable) -> Self {
        let input_points = match &backend {
            ClassifierBackend::Learned(learned) => learned.input_points(),
            ClassifierBackend::Heuristic => DEFAULT_BACKEND_INPUT_POINTS,
        };
        Self {
            backend,
            commands,
            input_points,
            model_path: None,
            degraded: AtomicBool::new(false),
            warned: AtomicBool::new(false),
        }
    }

    /// Build from configuration; loads the command map and, for the learned
    /// backend, the configured model
    pub fn from_config(config: &GestureConfig) -> Self {
        let mut commands = CommandTable::with_defaults();
        commands.load(&config.storage.command_map_path);

        let mut classifier = Self::with_commands(commands);
        classifier.set_input_points(config.recognition.backend_input_points);

        if config.recognition.backend == BackendKind::Learned {
            if let Some(path) = &config.recognition.model_path {
                classifier.load_model(path);
            }
        }
        classifier
    }

    /// Load a learned model.
    ///
    /// Returns false only when the file does not exist. A file that exists
    /// but cannot be loaded returns true and leaves the heuristic in charge.
    pub fn load_model<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "model file not found, using heuristic classifier");
            return false;
        }

        self.model_path = Some(path.to_path_buf());
        match LearnedBackend::load(path, self.input_points) {
            Ok(backend) => {
                info!(path = %path.display(), "learned shape model loaded");
                self.backend = ClassifierBackend::Learned(backend);
                self.degraded.store(false, Ordering::Relaxed);
            }
            Err(err) => self.fall_back(&err),
        }
        true
    }

    /// Symbol for a stroke; empty for an empty stroke
    pub fn classify(&self, points: &[GesturePoint]) -> String {
        if points.is_empty() {
            return String::new();
        }

        if let ClassifierBackend::Learned(backend) = &self.backend {
            if !self.degraded.load(Ordering::Relaxed) {
                match backend.classify(points) {
                    Ok(shape) => return shape.as_str().to_string(),
                    Err(err) => {
                        self.degraded.store(true, Ordering::Relaxed);
                        self.fall_back(&err);
                    }
                }
            }
        }

        heuristic::classify_shape(points)
            .map(|shape| shape.as_str().to_string())
            .unwrap_or_default()
    }

    /// Point budget used when the next model is loaded
    pub fn set_input_points(&mut self, input_points: usize) {
        self.input_points = input_points;
    }

    pub fn command_for_symbol(&self, symbol: &str) -> &str {
        self.commands.command_for(symbol)
    }

    /// Overlay a command map file onto the current table
    pub fn load_commands<P: AsRef<Path>>(&mut self, path: P) -> bool {
        self.commands.load(path)
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut CommandTable {
        &mut self.commands
    }

    /// True while the learned backend is answering
    pub fn is_learned(&self) -> bool {
        self.backend.is_learned() && !self.degraded.load(Ordering::Relaxed)
    }

    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }

    fn fall_back(&self, err: &BackendError) {
        if self.warned.swap(true, Ordering::Relaxed) {
            debug!(error = %err, "learned backend unavailable");
        } else {
            warn!(error = %err, "learned backend unavailable, falling back to heuristic classifier");
        }
    }
}

impl Default for ShapeClassifier {
    fn default() -> Self {
        Self::heuristic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::types::points_from;
    use crate::recognition::backend::InferenceEngine;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    struct FailingEngine {
        calls: Arc<AtomicUsize>,
    }

    impl InferenceEngine for FailingEngine {
        fn infer(&mut self, _features: &[f32]) -> Result<usize, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(BackendError::Inference("session closed".to_string()))
        }
    }

    struct FixedEngine(usize);

    impl InferenceEngine for FixedEngine {
        fn infer(&mut self, _features: &[f32]) -> Result<usize, BackendError> {
            Ok(self.0)
        }
    }

    fn unit_square() -> Vec<GesturePoint> {
        points_from(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn test_heuristic_classification() {
        let classifier = ShapeClassifier::heuristic();
        assert_eq!(classifier.classify(&unit_square()), "square");
        assert_eq!(classifier.classify(&[]), "");
        assert!(!classifier.is_learned());
    }

    #[test]
    fn test_default_commands() {
        let classifier = ShapeClassifier::heuristic();
        assert_eq!(classifier.command_for_symbol("triangle"), "copy");
        assert_eq!(classifier.command_for_symbol("circle"), "paste");
        assert_eq!(classifier.command_for_symbol("square"), "custom");
        assert_eq!(classifier.command_for_symbol("unknown"), "");
    }

    #[test]
    fn test_learned_backend_answers() {
        let backend = LearnedBackend::with_engine(Box::new(FixedEngine(0)), 8);
        let classifier = ShapeClassifier::with_backend(
            ClassifierBackend::Learned(backend),
            CommandTable::with_defaults(),
        );
        assert!(classifier.is_learned());
        // Class 0 is reported as circle, whatever the heuristic would say.
        assert_eq!(classifier.classify(&unit_square()), "circle");
    }

    #[test]
    fn test_inference_failure_falls_back_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let engine = FailingEngine {
            calls: Arc::clone(&calls),
        };
        let backend = LearnedBackend::with_engine(Box::new(engine), 8);
        let classifier = ShapeClassifier::with_backend(
            ClassifierBackend::Learned(backend),
            CommandTable::with_defaults(),
        );

        assert_eq!(classifier.classify(&unit_square()), "square");
        assert_eq!(classifier.classify(&unit_square()), "square");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!classifier.is_learned());
    }

    #[test]
    fn test_unknown_class_falls_back() {
        let backend = LearnedBackend::with_engine(Box::new(FixedEngine(9)), 8);
        let classifier = ShapeClassifier::with_backend(
            ClassifierBackend::Learned(backend),
            CommandTable::with_defaults(),
        );
        assert_eq!(classifier.classify(&unit_square()), "square");
    }

    #[test]
    fn test_missing_model_returns_false() {
        let mut classifier = ShapeClassifier::heuristic();
        assert!(!classifier.load_model("missing/shape.onnx"));
        assert!(classifier.model_path().is_none());
        assert_eq!(classifier.classify(&unit_square()), "square");
    }

    #[cfg(not(feature = "onnx"))]
    #[test]
    fn test_unloadable_model_keeps_heuristic() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut classifier = ShapeClassifier::heuristic();
        assert!(classifier.load_model(file.path()));
        assert!(!classifier.is_learned());
        assert_eq!(classifier.classify(&unit_square()), "square");
    }

    #[test]
    fn test_load_commands_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commands.json");
        std::fs::write(&path, r#"{"dot": "click"}"#).unwrap();

        let mut classifier = ShapeClassifier::heuristic();
        assert!(classifier.load_commands(&path));
        assert_eq!(classifier.command_for_symbol("circle"), "click");
        assert_eq!(classifier.command_for_symbol("triangle"), "copy");
    }
}
