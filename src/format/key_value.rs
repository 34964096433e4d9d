// src/format/key_value.rs
//! Flat string-to-string mappings (command maps, model registries)
//!
//! Grammar:
//!
//! ```text
//! pair   := string ws* ':' ws* string
//! string := '"' ( char | '\"' | '\\' )* '"'
//! ```
//!
//! Everything that is not a pair is skipped: braces, commas, numbers,
//! nested objects, and strings not followed by `:` and another string. A
//! command map embedded in a larger JSON document therefore still reads.

use super::scanner::{quote, Scanner};
use std::io;
use std::path::Path;

/// Extract every `"key": "value"` pair in document order
pub fn parse_pairs(content: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut scanner = Scanner::new(content);

    while scanner.seek_char('"') {
        let Some(key) = scanner.read_quoted() else {
            break;
        };
        scanner.skip_whitespace();
        if !scanner.eat(':') {
            continue;
        }
        scanner.skip_whitespace();
        if scanner.peek() != Some('"') {
            continue;
        }
        let Some(value) = scanner.read_quoted() else {
            break;
        };
        pairs.push((key, value));
    }

    pairs
}

/// Read and parse a key/value file
pub fn read_pairs<P: AsRef<Path>>(path: P) -> io::Result<Vec<(String, String)>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_pairs(&content))
}

/// Render pairs as a one-level JSON-shaped object
pub fn render_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let body: Vec<String> = pairs
        .into_iter()
        .map(|(key, value)| format!("  {}: {}", quote(key), quote(value)))
        .collect();
    if body.is_empty() {
        "{}\n".to_string()
    } else {
        format!("{{\n{}\n}}\n", body.join(",\n"))
    }
}
