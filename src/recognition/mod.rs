//! Stroke recognition
//!
//! Layers, bottom-up:
//! - `heuristic`: geometry-only circle/triangle/square classification
//! - `backend`: learned backends behind `InferenceEngine`
//! - `classifier`: `ShapeClassifier`, a backend plus its command table
//! - `store`: user-trained samples with nearest-neighbour lookup
//! - `router`: named classifiers selected per stroke
//! - `hybrid`: the dispatcher tying them together

pub mod backend;
pub mod classifier;
pub mod commands;
pub mod features;
pub mod heuristic;
pub mod hybrid;
pub mod router;
pub mod store;

pub use backend::{BackendError, ClassifierBackend, InferenceEngine, LearnedBackend};
pub use classifier::ShapeClassifier;
pub use commands::CommandTable;
pub use heuristic::{classify_shape, Shape, ShapeGeometry};
pub use hybrid::{HybridDispatcher, SharedDispatcher};
pub use router::{ModelRouter, RouteMode};
pub use store::{GestureSample, ProfileError, TrainedGestureStore};
