// src/format/profile.rs
//! Gesture profile encoding
//!
//! A profile is a bracketed list of records, one per line:
//!
//! ```text
//! [{"label":"tri","command":"launch","points":[0,0,1,0,0,1]},
//! {"label":"zig","command":"undo","points":[0,0,1,1,2,0]}]
//! ```
//!
//! The reader scans for `"label"`, `"command"` and the following `[...]`
//! array in that order, so whitespace and extra fields between them are
//! tolerated. Numbers use Rust's shortest round-trip float formatting.

use super::scanner::{quote, Scanner};
use crate::recognition::store::GestureSample;
use std::fmt::Write as _;

const LABEL_KEY: &str = "\"label\"";
const COMMAND_KEY: &str = "\"command\"";

/// Result of scanning a profile document
#[derive(Debug, Clone, Default)]
pub struct ProfileDecode {
    /// Every record that parsed completely, in file order
    pub samples: Vec<GestureSample>,
    /// First malformed record, if scanning stopped early
    pub error: Option<RecordError>,
}

/// Where and why a record failed to parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordError {
    /// Zero-based index of the record that failed
    pub record: usize,
    pub reason: String,
}

pub fn encode_profile(samples: &[GestureSample]) -> String {
    let mut out = String::from("[");
    for (i, sample) in samples.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        let _ = write!(
            out,
            "{{\"label\":{},\"command\":{},\"points\":[",
            quote(sample.label()),
            quote(sample.command())
        );
        for (j, value) in sample.features().iter().enumerate() {
            if j > 0 {
                out.push(',');
            }
            let _ = write!(out, "{}", value);
        }
        out.push_str("]}");
    }
    out.push(']');
    out
}

pub fn decode_profile(content: &str) -> ProfileDecode {
    let mut decode = ProfileDecode::default();
    let mut scanner = Scanner::new(content);

    while scanner.seek_past(LABEL_KEY) {
        let record = decode.samples.len();
        match read_record(&mut scanner) {
            Ok(sample) => decode.samples.push(sample),
            Err(reason) => {
                decode.error = Some(RecordError { record, reason });
                break;
            }
        }
    }

    decode
}

/// Fields after the label are looked up only up to the next label key.
fn read_record(scanner: &mut Scanner<'_>) -> Result<GestureSample, String> {
    let label = read_value(scanner, "label")?;
    let mut fields = Scanner::new(scanner.take_segment(LABEL_KEY));

    if !fields.seek_past(COMMAND_KEY) {
        return Err("missing command".to_string());
    }
    let command = read_value(&mut fields, "command")?;

    if !fields.seek_char('[') {
        return Err("missing point array".to_string());
    }
    fields.bump();
    let body = fields
        .take_until(']')
        .ok_or_else(|| "unterminated point array".to_string())?;
    let features = parse_numbers(body)?;

    Ok(GestureSample::from_parts(label, command, features))
}

fn read_value(scanner: &mut Scanner<'_>, field: &str) -> Result<String, String> {
    scanner.skip_whitespace();
    if !scanner.eat(':') {
        return Err(format!("expected ':' after {}", field));
    }
    scanner.skip_whitespace();
    scanner
        .read_quoted()
        .ok_or_else(|| format!("{} is not a terminated string", field))
}

fn parse_numbers(body: &str) -> Result<Vec<f32>, String> {
    body.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f32>()
                .map_err(|_| format!("invalid number '{}'", token))
        })
        .collect()
}
