// src/recognition/store.rs
//! User-trained gestures
//!
//! Samples are matched by nearest neighbour over fixed-length features
//! (see `features::flatten_points`). Additions can be undone and redone;
//! any new addition discards the redo history. Profiles persist through
//! `format::profile`.

use crate::config::constants::recognition::DEFAULT_MAX_POINTS;
use crate::format::profile::{decode_profile, encode_profile};
use crate::input::types::GesturePoint;
use crate::recognition::features::{flatten_points, squared_distance};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// One trained gesture
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSample {
    features: Vec<f32>,
    label: String,
    command: String,
}

impl GestureSample {
    pub(crate) fn from_parts(label: String, command: String, features: Vec<f32>) -> Self {
        Self {
            features,
            label,
            command,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn features(&self) -> &[f32] {
        &self.features
    }
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Profile I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed profile record {record}: {reason} ({kept} samples kept)")]
    Malformed {
        record: usize,
        reason: String,
        kept: usize,
    },
}

#[derive(Debug, Clone)]
pub struct TrainedGestureStore {
    samples: Vec<GestureSample>,
    redo: Vec<GestureSample>,
    max_points: usize,
}

impl TrainedGestureStore {
    pub fn new(max_points: usize) -> Self {
        Self {
            samples: Vec::new(),
            redo: Vec::new(),
            max_points,
        }
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// Record a sample; clears the redo history
    pub fn add_sample(&mut self, label: &str, points: &[GesturePoint], command: &str) {
        let features = flatten_points(points, self.max_points);
        self.samples
            .push(GestureSample::from_parts(label.to_string(), command.to_string(), features));
        self.redo.clear();
        debug!(label, command, total = self.samples.len(), "gesture sample added");
    }

    /// Label of the nearest stored sample; empty when nothing is stored.
    ///
    /// Ties keep the earliest sample.
    pub fn predict(&self, points: &[GesturePoint]) -> String {
        self.nearest(points)
            .map(|sample| sample.label.clone())
            .unwrap_or_default()
    }

    /// Command of the first sample carrying `label`, empty when none does
    pub fn command_for_label(&self, label: &str) -> String {
        self.samples
            .iter()
            .find(|sample| sample.label == label)
            .map(|sample| sample.command.clone())
            .unwrap_or_default()
    }

    pub fn nearest(&self, points: &[GesturePoint]) -> Option<&GestureSample> {
        let query = flatten_points(points, self.max_points);
        let mut best: Option<(f32, &GestureSample)> = None;
        for sample in &self.samples {
            let distance = squared_distance(&query, &sample.features);
            match best {
                Some((best_distance, _)) if distance >= best_distance => {}
                _ => best = Some((distance, sample)),
            }
        }
        best.map(|(_, sample)| sample)
    }

    /// Move the newest sample onto the redo stack; false when empty
    pub fn undo(&mut self) -> bool {
        match self.samples.pop() {
            Some(sample) => {
                debug!(label = %sample.label, "gesture sample undone");
                self.redo.push(sample);
                true
            }
            None => false,
        }
    }

    /// Restore the most recently undone sample; false when nothing to redo
    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(sample) => {
                debug!(label = %sample.label, "gesture sample redone");
                self.samples.push(sample);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.samples.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn samples(&self) -> &[GestureSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop all samples and the redo history
    pub fn clear(&mut self) {
        self.samples.clear();
        self.redo.clear();
    }

    pub fn try_save<P: AsRef<Path>>(&self, path: P) -> Result<(), ProfileError> {
        let path = path.as_ref();
        std::fs::write(path, encode_profile(&self.samples)).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), samples = self.samples.len(), "gesture profile saved");
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> bool {
        match self.try_save(path) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "failed to save gesture profile");
                false
            }
        }
    }

    /// Replace the stored samples with a profile's records.
    ///
    /// The samples and redo history are always cleared first, so an
    /// unreadable file leaves the store empty. A malformed record keeps the
    /// records before it and returns the error.
    pub fn try_load<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, ProfileError> {
        let path = path.as_ref();
        self.samples.clear();
        self.redo.clear();

        let content = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let decoded = decode_profile(&content);
        self.samples = decoded.samples;

        match decoded.error {
            Some(error) => Err(ProfileError::Malformed {
                record: error.record,
                reason: error.reason,
                kept: self.samples.len(),
            }),
            None => {
                info!(path = %path.display(), samples = self.samples.len(), "gesture profile loaded");
                Ok(self.samples.len())
            }
        }
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> bool {
        match self.try_load(path) {
            Ok(_) => true,
            Err(err) => {
                warn!(error = %err, "failed to load gesture profile");
                false
            }
        }
    }
}

impl Default for TrainedGestureStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POINTS)
    }
}
