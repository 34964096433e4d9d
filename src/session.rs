// src/session.rs
//! Tap-driven recognition session
//!
//! Glues the tap sequencer to the dispatcher: taps open and close capture,
//! finished symbols are recognized and mapped to commands, and label
//! requests hand the captured stroke back to the caller for training.

use crate::config::GestureConfig;
use crate::input::tap_sequencer::TapSequencer;
use crate::input::types::{GesturePoint, TapAction};
use crate::recognition::hybrid::HybridDispatcher;
use crate::utils::time::{SystemTimeProvider, TimeProvider};
use tracing::{debug, info};

/// A recognized stroke
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recognition {
    pub symbol: String,
    pub command: String,
    pub points: Vec<GesturePoint>,
}

impl Recognition {
    pub fn is_empty(&self) -> bool {
        self.symbol.is_empty()
    }
}

/// What a tap did to the session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Idle,
    Started,
    /// Symbol finished; capture continues for the next one
    Recognized(Recognition),
    /// Sequence closed, with the trailing symbol if points were pending
    SequenceClosed(Option<Recognition>),
    /// Caller should ask for a label and call `train`.
    ///
    /// The sequencer closes the sequence at a burst of two, so `handle_tap`
    /// never produces this or `RecordRequested`. Both come from
    /// `apply_action`, for callers that count bursts themselves or bind the
    /// actions to other controls.
    LabelRequested(Vec<GesturePoint>),
    RecordRequested(Vec<GesturePoint>),
}

pub struct GestureSession {
    sequencer: TapSequencer,
    dispatcher: HybridDispatcher,
    clock: Box<dyn TimeProvider>,
}

impl GestureSession {
    pub fn new(sequencer: TapSequencer, dispatcher: HybridDispatcher) -> Self {
        Self {
            sequencer,
            dispatcher,
            clock: Box::new(SystemTimeProvider),
        }
    }

    pub fn from_config(config: &GestureConfig) -> Self {
        Self::new(
            TapSequencer::from_config(&config.input),
            HybridDispatcher::from_config(config),
        )
    }

    pub fn with_clock(mut self, clock: Box<dyn TimeProvider>) -> Self {
        self.clock = clock;
        self
    }

    pub fn handle_tap(&mut self, timestamp: u64) -> SessionEvent {
        let action = self.sequencer.on_tap(timestamp);
        debug!(timestamp, action = %action, "tap");
        self.event_for(action)
    }

    /// Drive the session with an action decided outside the sequencer,
    /// e.g. from `action_for_burst` or a dedicated button.
    pub fn apply_action(&mut self, action: TapAction) -> SessionEvent {
        match action {
            TapAction::None | TapAction::EndSymbol => {}
            TapAction::StartSequence => self.sequencer.start_capture(),
            TapAction::EndSequence | TapAction::LabelSymbol | TapAction::RecordStream => {
                self.sequencer.stop_capture()
            }
        }
        self.event_for(action)
    }

    fn event_for(&mut self, action: TapAction) -> SessionEvent {
        match action {
            TapAction::None => SessionEvent::Idle,
            TapAction::StartSequence => SessionEvent::Started,
            TapAction::EndSymbol => {
                let points = self.sequencer.take_points();
                SessionEvent::Recognized(self.recognize(points))
            }
            TapAction::EndSequence => {
                let points = self.sequencer.take_points();
                let trailing = (!points.is_empty()).then(|| self.recognize(points));
                SessionEvent::SequenceClosed(trailing)
            }
            TapAction::LabelSymbol => SessionEvent::LabelRequested(self.sequencer.take_points()),
            TapAction::RecordStream => SessionEvent::RecordRequested(self.sequencer.take_points()),
        }
    }

    /// `handle_tap` stamped with the session clock
    pub fn handle_tap_now(&mut self) -> SessionEvent {
        let timestamp = self.clock.now_millis();
        self.handle_tap(timestamp)
    }

    pub fn add_point(&mut self, x: f32, y: f32) {
        self.sequencer.add_point(x, y);
    }

    /// Teach the dispatcher a labelled stroke
    pub fn train(&mut self, label: &str, command: &str, points: &[GesturePoint]) {
        info!(label, command, points = points.len(), "training gesture");
        self.dispatcher.add_sample(label, points, command);
    }

    pub fn recognize(&self, points: Vec<GesturePoint>) -> Recognition {
        let symbol = self.dispatcher.predict(&points);
        let command = self.dispatcher.command_for_symbol(&symbol);
        Recognition {
            symbol,
            command,
            points,
        }
    }

    pub fn is_capturing(&self) -> bool {
        self.sequencer.is_capturing()
    }

    pub fn sequencer(&self) -> &TapSequencer {
        &self.sequencer
    }

    pub fn sequencer_mut(&mut self) -> &mut TapSequencer {
        &mut self.sequencer
    }

    pub fn dispatcher(&self) -> &HybridDispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut HybridDispatcher {
        &mut self.dispatcher
    }
}

impl Default for GestureSession {
    fn default() -> Self {
        Self::new(TapSequencer::default(), HybridDispatcher::default())
    }
}
