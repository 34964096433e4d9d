// src/error.rs
//! Crate-level error type
//!
//! Recognition itself never fails: absent data yields empty results and
//! broken backends degrade to the heuristic. The errors below come from the
//! `try_*` persistence calls, model loading and configuration, and convert
//! into `GestureError` for callers that want a single type.

use crate::config::ConfigError;
use crate::recognition::backend::BackendError;
use crate::recognition::store::ProfileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GestureError {
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GestureError {
    /// Subsystem the error originated in, for log fields
    pub fn component(&self) -> &'static str {
        match self {
            GestureError::Profile(_) => "profile",
            GestureError::Backend(_) => "backend",
            GestureError::Config(_) => "config",
            GestureError::Io(_) => "io",
        }
    }
}

pub type GestureResult<T> = Result<T, GestureError>;
