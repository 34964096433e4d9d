//! Gesture-Core: hand-drawn gesture capture and recognition
//!
//! This library turns pointer strokes into symbols and commands. It features:
//!
//! - Tap-timed capture sessions (double tap to start, bursts to end)
//! - A geometry-only shape classifier that never needs training data
//! - User-trained gestures with undo/redo and profile persistence
//! - Named learned models with automatic routing and heuristic fallback
//! - Layered TOML configuration with environment overrides
//!
//! # Quick Start
//!
//! ```rust
//! use gesture_core::{HybridDispatcher, TapAction, TapSequencer};
//!
//! let mut sequencer = TapSequencer::new(300);
//! let dispatcher = HybridDispatcher::default();
//!
//! assert_eq!(sequencer.on_tap(1_000), TapAction::None);
//! assert_eq!(sequencer.on_tap(1_100), TapAction::StartSequence);
//!
//! for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
//!     sequencer.add_point(x, y);
//! }
//!
//! assert_eq!(sequencer.on_tap(2_000), TapAction::EndSymbol);
//! let points = sequencer.take_points();
//! assert_eq!(dispatcher.predict(&points), "square");
//! assert_eq!(dispatcher.command_for_gesture(&points), "custom");
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod error;
pub mod format;
pub mod handwriting;
pub mod input;
pub mod recognition;
pub mod session;
pub mod simulation;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{ConfigLoader, GestureConfig};
pub use error::{GestureError, GestureResult};
pub use input::{CaptureBuffer, GesturePoint, SpatialPoint, TapAction, TapSequencer};
pub use recognition::{
    classify_shape, HybridDispatcher, ModelRouter, Shape, ShapeClassifier, SharedDispatcher,
    TrainedGestureStore,
};
pub use session::{GestureSession, Recognition, SessionEvent};
pub use utils::time::TimeProvider;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
