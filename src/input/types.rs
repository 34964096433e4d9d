// src/input/types.rs
//! Core types for gesture input

use serde::{Deserialize, Serialize};
use std::fmt;

/// Single pointer sample in device-space coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GesturePoint {
    pub x: f32,
    pub y: f32,
}

impl GesturePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn squared_distance(&self, other: &GesturePoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &GesturePoint) -> f32 {
        self.squared_distance(other).sqrt()
    }
}

impl From<(f32, f32)> for GesturePoint {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Controller sample for spatial (VR) capture
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpatialPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl SpatialPoint {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Drop the depth axis, e.g. to feed a 2D recognizer
    pub fn project_xy(&self) -> GesturePoint {
        GesturePoint::new(self.x, self.y)
    }
}

impl From<(f32, f32, f32)> for SpatialPoint {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self { x, y, z }
    }
}

/// Capture lifecycle transition produced by the tap sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TapAction {
    /// Nothing to do
    #[default]
    None,
    /// Capture began; the point buffer was cleared
    StartSequence,
    /// Current symbol finished, sequence stays open
    EndSymbol,
    /// Whole input sequence closed
    EndSequence,
    /// Caller should prompt for a training label
    LabelSymbol,
    /// Reserved for bulk recording
    RecordStream,
}

impl TapAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TapAction::None => "none",
            TapAction::StartSequence => "start_sequence",
            TapAction::EndSymbol => "end_symbol",
            TapAction::EndSequence => "end_sequence",
            TapAction::LabelSymbol => "label_symbol",
            TapAction::RecordStream => "record_stream",
        }
    }

    /// Whether the action hands the buffer to recognition or training
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TapAction::None | TapAction::StartSequence)
    }

    /// Whether capture is off after this action
    pub fn stops_capture(&self) -> bool {
        matches!(
            self,
            TapAction::EndSequence | TapAction::LabelSymbol | TapAction::RecordStream
        )
    }
}

impl fmt::Display for TapAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a point list from `(x, y)` tuples
pub fn points_from(coords: &[(f32, f32)]) -> Vec<GesturePoint> {
    coords.iter().copied().map(GesturePoint::from).collect()
}
