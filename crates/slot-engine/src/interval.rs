//! Busy intervals: half-open `[start, end)` ranges of a single day.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::workday::hhmm;

/// A span during which one participant is unavailable.
///
/// `start == end` is allowed and blocks nothing. Intervals reaching outside the
/// workday are kept as-is; the engine clips them when rasterizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    /// Free-text subject carried through from the source record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl BusyInterval {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end,
            label: None,
        }
    }

    pub fn with_label(start: NaiveTime, end: NaiveTime, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: Some(label.into()),
        }
    }
}
