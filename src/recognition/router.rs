// src/recognition/router.rs
//! Named model registry
//!
//! Maps model names to classifiers. The registry file is a flat key/value
//! document of `name → model path`; every classifier it builds shares the
//! router's command map. In auto mode, short strokes go to the shape model
//! and longer ones to the letter model.

use crate::config::constants::recognition::{
    AUTO_MODE, AUTO_SHAPE_MAX_POINTS, DEFAULT_BACKEND_INPUT_POINTS, LETTER_MODEL, SHAPE_MODEL,
};
use crate::config::GestureConfig;
use crate::format::key_value;
use crate::input::types::GesturePoint;
use crate::recognition::classifier::ShapeClassifier;
use crate::recognition::commands::CommandTable;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Which registered model a stroke is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMode<'a> {
    /// Pick by stroke length
    Auto,
    Named(&'a str),
}

impl<'a> From<&'a str> for RouteMode<'a> {
    fn from(mode: &'a str) -> Self {
        if mode == AUTO_MODE {
            RouteMode::Auto
        } else {
            RouteMode::Named(mode)
        }
    }
}

impl<'a> RouteMode<'a> {
    /// Model name this mode selects for a stroke of `point_count` points
    pub fn model_name(&self, point_count: usize) -> &'a str {
        match *self {
            RouteMode::Auto if point_count <= AUTO_SHAPE_MAX_POINTS => SHAPE_MODEL,
            RouteMode::Auto => LETTER_MODEL,
            RouteMode::Named(name) => name,
        }
    }
}

#[derive(Debug, Default)]
pub struct ModelRouter {
    models: Vec<(String, ShapeClassifier)>,
    command_map_path: Option<PathBuf>,
    input_points: Option<usize>,
}

impl ModelRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Router whose classifiers overlay `command_map_path` onto the defaults
    pub fn with_command_map<P: AsRef<Path>>(command_map_path: P) -> Self {
        Self {
            command_map_path: Some(command_map_path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Build from configuration and load the configured registry, if present
    pub fn from_config(config: &GestureConfig) -> Self {
        let mut router = Self::with_command_map(&config.storage.command_map_path);
        router.input_points = Some(config.recognition.backend_input_points);
        if config.storage.model_registry_path.exists() {
            router.load_config(&config.storage.model_registry_path);
        } else {
            debug!(
                path = %config.storage.model_registry_path.display(),
                "no model registry, router starts empty"
            );
        }
        router
    }

    /// Replace the registry from a `name → model path` document.
    ///
    /// Returns false when the file cannot be read (the registry is left
    /// empty) or lists no models.
    pub fn load_config<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let path = path.as_ref();
        self.models.clear();

        let entries = match key_value::read_pairs(path) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "model registry unavailable");
                return false;
            }
        };

        for (name, model_path) in entries {
            let classifier = self.build_classifier(Path::new(&model_path));
            self.register(&name, classifier);
        }

        info!(path = %path.display(), models = self.models.len(), "model registry loaded");
        !self.models.is_empty()
    }

    /// Add or replace a named classifier
    pub fn register(&mut self, name: &str, classifier: ShapeClassifier) {
        match self.models.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = classifier,
            None => self.models.push((name.to_string(), classifier)),
        }
    }

    /// Symbol from the model `mode` selects; empty when that model is not
    /// registered or the stroke is empty
    pub fn recognize<'m>(&self, points: &[GesturePoint], mode: impl Into<RouteMode<'m>>) -> String {
        let name = mode.into().model_name(points.len());
        match self.get(name) {
            Some(classifier) => classifier.classify(points),
            None => {
                debug!(model = name, "no model registered for route");
                String::new()
            }
        }
    }

    /// Command from the first registered model that maps `symbol`
    pub fn command_for_symbol(&self, symbol: &str) -> &str {
        self.models
            .iter()
            .map(|(_, classifier)| classifier.command_for_symbol(symbol))
            .find(|command| !command.is_empty())
            .unwrap_or("")
    }

    pub fn get(&self, name: &str) -> Option<&ShapeClassifier> {
        self.models
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, classifier)| classifier)
    }

    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    fn build_classifier(&self, model_path: &Path) -> ShapeClassifier {
        let mut commands = CommandTable::with_defaults();
        if let Some(path) = &self.command_map_path {
            if path.exists() {
                commands.load(path);
            }
        }

        let mut classifier = ShapeClassifier::with_commands(commands);
        classifier.set_input_points(self.input_points.unwrap_or(DEFAULT_BACKEND_INPUT_POINTS));
        classifier.load_model(model_path);
        classifier
    }
}
