// src/recognition/commands.rs
//! Symbol to command mapping

use crate::config::constants::{commands, symbols};
use crate::format::key_value;
use std::collections::HashMap;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Symbol → command table, seeded with built-in defaults.
///
/// Setting `dot` also sets `circle` (the legacy vocabulary used `dot`);
/// setting `circle` leaves `dot` alone.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandTable {
    entries: HashMap<String, String>,
}

impl CommandTable {
    pub fn with_defaults() -> Self {
        let mut entries = HashMap::new();
        entries.insert(symbols::TRIANGLE.to_string(), commands::DEFAULT_TRIANGLE_COMMAND.to_string());
        entries.insert(symbols::CIRCLE.to_string(), commands::DEFAULT_CIRCLE_COMMAND.to_string());
        entries.insert(symbols::SQUARE.to_string(), commands::DEFAULT_SQUARE_COMMAND.to_string());
        entries.insert(symbols::DOT.to_string(), commands::DEFAULT_DOT_COMMAND.to_string());
        Self { entries }
    }

    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Command for `symbol`, empty when unknown
    pub fn command_for(&self, symbol: &str) -> &str {
        self.entries.get(symbol).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, symbol: &str, command: &str) {
        if symbol == symbols::DOT {
            self.entries
                .insert(symbols::CIRCLE.to_string(), command.to_string());
        }
        self.entries.insert(symbol.to_string(), command.to_string());
    }

    /// Apply every pair found in a key/value document, in document order
    pub fn apply_document(&mut self, content: &str) -> usize {
        let pairs = key_value::parse_pairs(content);
        for (symbol, command) in &pairs {
            self.set(symbol, command);
        }
        pairs.len()
    }

    /// Overlay a command map file; returns the number of entries applied
    pub fn try_load<P: AsRef<Path>>(&mut self, path: P) -> io::Result<usize> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let applied = self.apply_document(&content);
        debug!(path = %path.as_ref().display(), applied, "command map loaded");
        Ok(applied)
    }

    /// Overlay a command map file, keeping the current table on failure
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> bool {
        match self.try_load(path.as_ref()) {
            Ok(_) => true,
            Err(err) => {
                warn!(path = %path.as_ref().display(), error = %err, "command map unavailable, keeping defaults");
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}
