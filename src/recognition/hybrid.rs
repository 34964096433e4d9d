// src/recognition/hybrid.rs
//! Top-level recognition entry point
//!
//! Resolution order for a stroke: user-trained samples, then the model
//! router, then the built-in heuristic classifier. Commands resolve in the
//! same order, so a trained label shadows a built-in symbol of the same
//! name.

use crate::config::GestureConfig;
use crate::config::constants::recognition::DEFAULT_MAX_POINTS;
use crate::handwriting::{DisabledDecoder, GlyphDecoder, GlyphImage};
use crate::input::types::GesturePoint;
use crate::recognition::classifier::ShapeClassifier;
use crate::recognition::router::{ModelRouter, RouteMode};
use crate::recognition::store::{ProfileError, TrainedGestureStore};
use parking_lot::Mutex;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

pub struct HybridDispatcher {
    store: TrainedGestureStore,
    router: ModelRouter,
    fallback: ShapeClassifier,
    decoder: Box<dyn GlyphDecoder>,
}

impl HybridDispatcher {
    /// Empty store, empty router and a heuristic fallback
    pub fn new(max_points: usize) -> Self {
        Self {
            store: TrainedGestureStore::new(max_points),
            router: ModelRouter::new(),
            fallback: ShapeClassifier::heuristic(),
            decoder: Box::new(DisabledDecoder),
        }
    }

    /// Wire every component from configuration. The trained profile is not
    /// loaded here; call `load_profile` when it should be.
    pub fn from_config(config: &GestureConfig) -> Self {
        Self {
            store: TrainedGestureStore::new(config.recognition.max_points),
            router: ModelRouter::from_config(config),
            fallback: ShapeClassifier::from_config(config),
            decoder: Box::new(DisabledDecoder),
        }
    }

    pub fn with_router(mut self, router: ModelRouter) -> Self {
        self.router = router;
        self
    }

    pub fn with_fallback(mut self, fallback: ShapeClassifier) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_decoder(mut self, decoder: Box<dyn GlyphDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Symbol or trained label for a stroke; empty for an empty stroke
    pub fn predict(&self, points: &[GesturePoint]) -> String {
        if points.is_empty() {
            return String::new();
        }

        let label = self.store.predict(points);
        if !label.is_empty() {
            return label;
        }

        let symbol = self.router.recognize(points, RouteMode::Auto);
        if !symbol.is_empty() {
            return symbol;
        }

        self.fallback.classify(points)
    }

    pub fn command_for_symbol(&self, symbol: &str) -> String {
        let command = self.store.command_for_label(symbol);
        if !command.is_empty() {
            return command;
        }

        let command = self.router.command_for_symbol(symbol);
        if !command.is_empty() {
            return command.to_string();
        }

        self.fallback.command_for_symbol(symbol).to_string()
    }

    pub fn command_for_gesture(&self, points: &[GesturePoint]) -> String {
        self.command_for_symbol(&self.predict(points))
    }

    pub fn add_sample(&mut self, label: &str, points: &[GesturePoint], command: &str) {
        self.store.add_sample(label, points, command);
    }

    pub fn undo(&mut self) -> bool {
        self.store.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.store.redo()
    }

    pub fn save_profile<P: AsRef<Path>>(&self, path: P) -> bool {
        self.store.save(path)
    }

    pub fn try_save_profile<P: AsRef<Path>>(&self, path: P) -> Result<(), ProfileError> {
        self.store.try_save(path)
    }

    pub fn load_profile<P: AsRef<Path>>(&mut self, path: P) -> bool {
        self.store.load(path)
    }

    pub fn try_load_profile<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, ProfileError> {
        self.store.try_load(path)
    }

    /// Load a learned model into the fallback classifier
    pub fn load_model<P: AsRef<Path>>(&mut self, path: P) -> bool {
        self.fallback.load_model(path)
    }

    /// Text for a handwritten glyph; empty without a decoder or image
    pub fn transcribe(&self, glyph: &GlyphImage) -> String {
        if !self.decoder.available() || glyph.is_empty() {
            return String::new();
        }
        self.decoder.decode(glyph)
    }

    pub fn store(&self) -> &TrainedGestureStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TrainedGestureStore {
        &mut self.store
    }

    pub fn router(&self) -> &ModelRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut ModelRouter {
        &mut self.router
    }

    pub fn fallback(&self) -> &ShapeClassifier {
        &self.fallback
    }
}

impl Default for HybridDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POINTS)
    }
}

impl fmt::Debug for HybridDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HybridDispatcher")
            .field("store", &self.store)
            .field("router", &self.router)
            .field("fallback", &self.fallback)
            .field("decoder_available", &self.decoder.available())
            .finish()
    }
}

/// Cloneable handle for callers that train and recognize from several
/// threads. Each closure runs under the lock.
#[derive(Debug, Clone)]
pub struct SharedDispatcher {
    inner: Arc<Mutex<HybridDispatcher>>,
}

impl SharedDispatcher {
    pub fn new(dispatcher: HybridDispatcher) -> Self {
        Self {
            inner: Arc::new(Mutex::new(dispatcher)),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut HybridDispatcher) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    pub fn predict(&self, points: &[GesturePoint]) -> String {
        self.inner.lock().predict(points)
    }

    pub fn command_for_gesture(&self, points: &[GesturePoint]) -> String {
        self.inner.lock().command_for_gesture(points)
    }
}

impl From<HybridDispatcher> for SharedDispatcher {
    fn from(dispatcher: HybridDispatcher) -> Self {
        Self::new(dispatcher)
    }
}
