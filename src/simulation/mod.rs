//! Synthetic input for tests, benches and demos
//! Location: src/simulation/mod.rs

pub mod strokes;

pub use strokes::{StrokeConfig, StrokeGenerator, StrokeShape};
