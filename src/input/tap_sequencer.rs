// src/input/tap_sequencer.rs
//! Tap sequencing and point capture
//!
//! Converts raw tap timestamps (milliseconds) into capture lifecycle
//! transitions. Timestamps are expected to be monotonic but are not trusted:
//! a timestamp older than the previous tap is treated as the start of a new
//! input session rather than an error.

use crate::config::constants::input::MAX_BURST_TAPS;
use crate::config::InputConfig;
use crate::input::capture::CaptureBuffer;
use crate::input::types::{GesturePoint, TapAction};
use tracing::debug;

/// Mutable timing state behind the sequencer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TapState {
    last_tap: Option<u64>,
    tap_count: u32,
}

/// Tap-driven capture state machine that owns the point buffer
#[derive(Debug, Clone)]
pub struct TapSequencer {
    state: TapState,
    double_tap_interval_ms: u64,
    buffer: CaptureBuffer<GesturePoint>,
}

impl TapSequencer {
    pub fn new(double_tap_interval_ms: u64) -> Self {
        Self {
            state: TapState::default(),
            double_tap_interval_ms,
            buffer: CaptureBuffer::new(),
        }
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self::new(config.double_tap_interval_ms)
    }

    /// Sequenced tap handling.
    ///
    /// Idle: a second tap strictly inside the double-tap window starts a
    /// sequence. Capturing: taps are grouped into bursts and the burst
    /// length picks the action (1 end symbol, 2 end sequence, 3 label,
    /// 4 record stream, more is a no-op that clears the counter).
    pub fn on_tap(&mut self, timestamp: u64) -> TapAction {
        self.handle_regression(timestamp);

        if !self.buffer.is_capturing() {
            if self.within_window(timestamp) {
                self.start_capture();
                self.state.last_tap = Some(timestamp);
                return TapAction::StartSequence;
            }
            self.state.last_tap = Some(timestamp);
            return TapAction::None;
        }

        let continues_burst = self.state.tap_count > 0
            && self
                .state
                .last_tap
                .map_or(false, |last| timestamp - last <= self.double_tap_interval_ms);
        self.state.tap_count = if continues_burst {
            self.state.tap_count + 1
        } else {
            1
        };
        self.state.last_tap = Some(timestamp);

        let action = action_for_burst(self.state.tap_count);
        match action {
            TapAction::None => self.state.tap_count = 0,
            TapAction::EndSymbol => {}
            _ => {
                self.buffer.stop();
                // A trailing tap of the same burst must not restart capture.
                self.state = TapState::default();
            }
        }
        action
    }

    /// Legacy on/off toggle.
    ///
    /// Any tap while capturing stops capture; a double tap while idle starts
    /// it. Returns true only when a double tap started capture.
    pub fn on_tap_toggle(&mut self, timestamp: u64) -> bool {
        self.handle_regression(timestamp);

        if self.buffer.is_capturing() {
            self.stop_capture();
            self.state.last_tap = None;
            return false;
        }

        if self.within_window(timestamp) {
            self.start_capture();
            self.state.last_tap = None;
            return true;
        }

        self.state.last_tap = Some(timestamp);
        false
    }

    /// Record a pointer sample; ignored unless capturing
    pub fn add_point(&mut self, x: f32, y: f32) {
        self.buffer.push(GesturePoint::new(x, y));
    }

    pub fn start_capture(&mut self) {
        self.buffer.start();
        self.state.tap_count = 0;
    }

    pub fn stop_capture(&mut self) {
        self.buffer.stop();
    }

    pub fn is_capturing(&self) -> bool {
        self.buffer.is_capturing()
    }

    pub fn points(&self) -> &[GesturePoint] {
        self.buffer.points()
    }

    /// Hand the current symbol's points to the caller
    pub fn take_points(&mut self) -> Vec<GesturePoint> {
        self.buffer.take()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn double_tap_interval_ms(&self) -> u64 {
        self.double_tap_interval_ms
    }

    pub fn set_double_tap_interval(&mut self, interval_ms: u64) {
        self.double_tap_interval_ms = interval_ms;
    }

    pub fn tap_count(&self) -> u32 {
        self.state.tap_count
    }

    fn handle_regression(&mut self, timestamp: u64) {
        if let Some(last) = self.state.last_tap {
            if timestamp < last {
                debug!(last, timestamp, "tap timestamp regressed, resetting tap state");
                self.state = TapState::default();
            }
        }
    }

    fn within_window(&self, timestamp: u64) -> bool {
        self.state
            .last_tap
            .map_or(false, |last| timestamp - last < self.double_tap_interval_ms)
    }
}

impl Default for TapSequencer {
    fn default() -> Self {
        Self::from_config(&InputConfig::default())
    }
}

/// Map a burst length to its capture action
pub fn action_for_burst(tap_count: u32) -> TapAction {
    match tap_count {
        1 => TapAction::EndSymbol,
        2 => TapAction::EndSequence,
        3 => TapAction::LabelSymbol,
        n if n == MAX_BURST_TAPS => TapAction::RecordStream,
        _ => TapAction::None,
    }
}
