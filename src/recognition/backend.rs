// src/recognition/backend.rs
//! Classifier backends
//!
//! A classifier runs either the closed-form heuristic or a learned model.
//! The learned side is an `InferenceEngine` behind a mutex so classifiers
//! stay `Send + Sync` and can classify through `&self`. The ONNX engine is
//! compiled in with the `onnx` feature; without it, loading a learned
//! backend reports `BackendError::Unsupported` and callers keep the
//! heuristic.

use crate::input::types::GesturePoint;
use crate::recognition::features::flatten_points;
use crate::recognition::heuristic::Shape;
use parking_lot::Mutex;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),
    #[error("Learned backend unavailable: {0}")]
    Unsupported(String),
    #[error("Model load failed: {0}")]
    Load(String),
    #[error("Inference failed: {0}")]
    Inference(String),
    #[error("Model produced unknown class index {0}")]
    UnknownClass(usize),
}

/// Runs a model over a flat feature vector and returns the winning class
pub trait InferenceEngine: Send {
    fn infer(&mut self, features: &[f32]) -> Result<usize, BackendError>;

    fn name(&self) -> &str {
        "engine"
    }
}

/// Learned shape backend over a fixed-length point encoding
pub struct LearnedBackend {
    engine: Mutex<Box<dyn InferenceEngine>>,
    input_points: usize,
    model_path: Option<PathBuf>,
}

impl LearnedBackend {
    /// Load a model file with the compiled-in engine
    pub fn load(path: &Path, input_points: usize) -> Result<Self, BackendError> {
        if !path.exists() {
            return Err(BackendError::ModelNotFound(path.to_path_buf()));
        }

        #[cfg(feature = "onnx")]
        {
            let engine = onnx::OnnxEngine::load(path)?;
            let mut backend = Self::with_engine(Box::new(engine), input_points);
            backend.model_path = Some(path.to_path_buf());
            Ok(backend)
        }

        #[cfg(not(feature = "onnx"))]
        {
            let _ = input_points;
            Err(BackendError::Unsupported(
                "built without the `onnx` feature".to_string(),
            ))
        }
    }

    pub fn with_engine(engine: Box<dyn InferenceEngine>, input_points: usize) -> Self {
        Self {
            engine: Mutex::new(engine),
            input_points,
            model_path: None,
        }
    }

    pub fn classify(&self, points: &[GesturePoint]) -> Result<Shape, BackendError> {
        let features = flatten_points(points, self.input_points);
        let index = self.engine.lock().infer(&features)?;
        Shape::from_class_index(index).ok_or(BackendError::UnknownClass(index))
    }

    pub fn input_points(&self) -> usize {
        self.input_points
    }

    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }
}

impl fmt::Debug for LearnedBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LearnedBackend")
            .field("engine", &self.engine.lock().name())
            .field("input_points", &self.input_points)
            .field("model_path", &self.model_path)
            .finish()
    }
}

/// Backend selected when a classifier is constructed
#[derive(Debug, Default)]
pub enum ClassifierBackend {
    #[default]
    Heuristic,
    Learned(LearnedBackend),
}

impl ClassifierBackend {
    pub fn is_learned(&self) -> bool {
        matches!(self, ClassifierBackend::Learned(_))
    }
}

/// Index of the largest score
pub fn argmax(scores: &[f32]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, &score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((i, score)),
        })
        .map(|(i, _)| i)
}

#[cfg(feature = "onnx")]
mod onnx {
    use super::{argmax, BackendError, InferenceEngine};
    use ort::session::Session;
    use ort::value::Tensor;
    use std::path::Path;

    pub struct OnnxEngine {
        session: Session,
    }

    impl OnnxEngine {
        pub fn load(path: &Path) -> Result<Self, BackendError> {
            let session = Session::builder()
                .and_then(|builder| builder.commit_from_file(path))
                .map_err(|e| BackendError::Load(e.to_string()))?;
            Ok(Self { session })
        }
    }

    impl InferenceEngine for OnnxEngine {
        fn infer(&mut self, features: &[f32]) -> Result<usize, BackendError> {
            let input = Tensor::from_array(([1usize, features.len()], features.to_vec()))
                .map_err(|e| BackendError::Inference(e.to_string()))?;
            let outputs = self
                .session
                .run(ort::inputs![input])
                .map_err(|e| BackendError::Inference(e.to_string()))?;
            let (_, scores) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| BackendError::Inference(e.to_string()))?;
            argmax(scores).ok_or_else(|| BackendError::Inference("empty model output".to_string()))
        }

        fn name(&self) -> &str {
            "onnx"
        }
    }
}
