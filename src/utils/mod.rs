//! Common utilities
//!
//! - Millisecond clocks for tap timestamps, with a mock for tests

pub mod time;

pub use time::{
    current_timestamp_millis,
    MockTimeProvider,
    MonotonicTimeProvider,
    SystemTimeProvider,
    TimeProvider,
};
