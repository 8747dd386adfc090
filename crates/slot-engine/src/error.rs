//! Error types for slot-engine operations.
//!
//! Only loading can fail. Queries against a loaded store are total and report
//! "nothing to schedule" as an empty result, never as an error.

use std::path::PathBuf;

use chrono::NaiveTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    /// A calendar or config file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record is structurally broken (too few fields, bad quoting, empty name).
    /// `line` is 1-based.
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    /// A time field is not a 24-hour `HH:MM` value.
    #[error("Invalid time at line {line}: '{value}'")]
    InvalidTime { line: usize, value: String },

    /// A record whose end time is earlier than its start time.
    #[error("Interval ends before it starts at line {line}: {start}-{end}")]
    InvertedInterval {
        line: usize,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("Invalid workday window: end {end} is not after start {start}")]
    InvalidWorkday { start: NaiveTime, end: NaiveTime },

    #[error("Config error: {0}")]
    Config(String),
}

impl SlotError {
    /// The 1-based input line a record-level error points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            SlotError::MalformedRecord { line, .. }
            | SlotError::InvalidTime { line, .. }
            | SlotError::InvertedInterval { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;
