// src/input/capture.rs
//! Point capture buffer shared by 2D and spatial input

/// Ordered point buffer with a capturing flag.
///
/// Points are appended only while capturing; `start` and `clear` discard
/// whatever was recorded before.
#[derive(Debug, Clone)]
pub struct CaptureBuffer<P> {
    points: Vec<P>,
    capturing: bool,
}

impl<P> CaptureBuffer<P> {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            capturing: false,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            capturing: false,
        }
    }

    pub fn start(&mut self) {
        self.points.clear();
        self.capturing = true;
    }

    pub fn stop(&mut self) {
        self.capturing = false;
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Append a point; returns false when ignored because capture is off
    pub fn push(&mut self, point: P) -> bool {
        if self.capturing {
            self.points.push(point);
        }
        self.capturing
    }

    pub fn points(&self) -> &[P] {
        &self.points
    }

    /// Move the recorded points out, leaving the flag untouched
    pub fn take(&mut self) -> Vec<P> {
        std::mem::take(&mut self.points)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<P> Default for CaptureBuffer<P> {
    fn default() -> Self {
        Self::new()
    }
}
