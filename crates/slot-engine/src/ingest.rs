//! Loading busy intervals from comma-separated calendar records.
//!
//! One record per line: `name, label, start, end`, e.g.
//!
//! ```text
//! Alice,"Morning meeting",08:00,09:30
//! ```
//!
//! Fields are trimmed. A field wrapped in double quotes may contain commas, and
//! `""` inside it stands for one literal quote. Blank lines are ignored, and
//! fields past the fourth are ignored.
//!
//! A record never spans lines. A quoted field cannot hold a line break: the
//! record is cut at the newline and reported as an unterminated quote.
//!
//! Times are `HH:MM`. `HH:MM:SS` is tolerated only with `:00` seconds, since
//! scheduling works in whole minutes.
//!
//! # Invalid records
//!
//! What happens to a bad record depends on [`RecordPolicy`]:
//!
//! - [`RecordPolicy::Skip`] logs a warning, records a [`RecordDiagnostic`] in
//!   the [`LoadReport`] and keeps loading the rest.
//! - [`RecordPolicy::Abort`] fails the whole load with the first error. Nothing
//!   is added to the store in that case.

use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SlotError};
use crate::interval::BusyInterval;
use crate::store::CalendarStore;
use crate::workday::parse_time_of_day;

/// Minimum number of fields in a record.
const RECORD_FIELDS: usize = 4;

/// How a load reacts to an invalid record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordPolicy {
    /// Warn, note the record in the report and keep going.
    #[default]
    Skip,
    /// Fail the load on the first invalid record, leaving the store untouched.
    Abort,
}

/// One parsed calendar record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub participant: String,
    pub label: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Record {
    pub fn into_interval(self) -> (String, BusyInterval) {
        let interval = if self.label.is_empty() {
            BusyInterval::new(self.start, self.end)
        } else {
            BusyInterval::with_label(self.start, self.end, self.label)
        };
        (self.participant, interval)
    }
}

/// A record that was skipped, with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordDiagnostic {
    pub line: usize,
    pub reason: String,
}

/// Outcome of a load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Records added to the store.
    pub loaded: usize,
    /// Records rejected under [`RecordPolicy::Skip`].
    pub skipped: Vec<RecordDiagnostic>,
}

/// Load every record in `path` into `store`.
pub fn load_file(
    store: &mut CalendarStore,
    path: impl AsRef<Path>,
    policy: RecordPolicy,
) -> Result<LoadReport> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SlotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let report = load_str(store, &text, policy)?;
    debug!(
        path = %path.display(),
        loaded = report.loaded,
        skipped = report.skipped.len(),
        "calendar file loaded"
    );
    Ok(report)
}

/// Load every record in `input` into `store`.
pub fn load_str(store: &mut CalendarStore, input: &str, policy: RecordPolicy) -> Result<LoadReport> {
    match policy {
        RecordPolicy::Abort => {
            // Parse everything first so a late failure leaves the store as it was.
            let records = parse_records(input)?;
            let loaded = records.len();
            for record in records {
                let (participant, interval) = record.into_interval();
                store.add_interval(participant, interval);
            }
            Ok(LoadReport {
                loaded,
                skipped: Vec::new(),
            })
        }
        RecordPolicy::Skip => {
            let mut report = LoadReport::default();
            for (line_no, line) in numbered_lines(input) {
                match parse_record(line_no, line) {
                    Ok(record) => {
                        let (participant, interval) = record.into_interval();
                        store.add_interval(participant, interval);
                        report.loaded += 1;
                    }
                    Err(e) => {
                        warn!(line = line_no, reason = %e, "skipping invalid record");
                        report.skipped.push(RecordDiagnostic {
                            line: line_no,
                            reason: e.to_string(),
                        });
                    }
                }
            }
            Ok(report)
        }
    }
}

/// Parse every non-blank line, failing on the first invalid one.
pub fn parse_records(input: &str) -> Result<Vec<Record>> {
    numbered_lines(input)
        .map(|(line_no, line)| parse_record(line_no, line))
        .collect()
}

/// Non-blank lines paired with their 1-based line numbers.
fn numbered_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
}

/// Parse a single record. `line_no` is only used for error reporting.
pub fn parse_record(line_no: usize, line: &str) -> Result<Record> {
    let fields = split_fields(line).map_err(|message| SlotError::MalformedRecord {
        line: line_no,
        message,
    })?;

    if fields.len() < RECORD_FIELDS {
        return Err(SlotError::MalformedRecord {
            line: line_no,
            message: format!("expected {} fields, found {}", RECORD_FIELDS, fields.len()),
        });
    }

    let participant = fields[0].clone();
    if participant.is_empty() {
        return Err(SlotError::MalformedRecord {
            line: line_no,
            message: "empty participant name".to_string(),
        });
    }

    let start = parse_time_field(line_no, &fields[2])?;
    let end = parse_time_field(line_no, &fields[3])?;
    if end < start {
        return Err(SlotError::InvertedInterval {
            line: line_no,
            start,
            end,
        });
    }

    Ok(Record {
        participant,
        label: fields[1].clone(),
        start,
        end,
    })
}

fn parse_time_field(line_no: usize, value: &str) -> Result<NaiveTime> {
    parse_time_of_day(value).ok_or_else(|| SlotError::InvalidTime {
        line: line_no,
        value: value.to_string(),
    })
}

/// Split a line on commas, honouring double-quoted fields.
///
/// Unquoted fields are trimmed. Whitespace around a quoted field is dropped,
/// but its contents are kept verbatim.
fn split_fields(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        // Leading whitespace before the field.
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let mut field = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            let mut closed = false;
            while let Some(c) = chars.next() {
                if c == '"' {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        closed = true;
                        break;
                    }
                } else {
                    field.push(c);
                }
            }
            if !closed {
                return Err("unterminated quoted field".to_string());
            }
            // Only whitespace may sit between the closing quote and the separator.
            while let Some(&c) = chars.peek() {
                if c == ',' {
                    break;
                }
                if !c.is_whitespace() {
                    return Err(format!("unexpected '{}' after closing quote", c));
                }
                chars.next();
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c == ',' {
                    break;
                }
                field.push(c);
                chars.next();
            }
            field = field.trim_end().to_string();
        }
        fields.push(field);

        match chars.next() {
            Some(',') => continue,
            _ => break,
        }
    }

    Ok(fields)
}
