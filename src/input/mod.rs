//! Pointer and tap input
//!
//! - `types`: points and tap actions
//! - `capture`: capture buffer shared by 2D and spatial input
//! - `tap_sequencer`: tap timing state machine that drives capture

pub mod capture;
pub mod tap_sequencer;
pub mod types;

pub use capture::CaptureBuffer;
pub use tap_sequencer::{action_for_burst, TapSequencer};
pub use types::{points_from, GesturePoint, SpatialPoint, TapAction};
