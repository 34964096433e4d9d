// src/format/mod.rs
//! Small, dependency-free text formats
//!
//! - `key_value`: flat `"key": "value"` maps for command tables and model
//!   registries
//! - `profile`: trained gesture samples

pub mod key_value;
pub mod profile;
mod scanner;

pub use key_value::{parse_pairs, read_pairs, render_pairs};
pub use profile::{decode_profile, encode_profile, ProfileDecode, RecordError};
