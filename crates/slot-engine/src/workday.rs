//! The schedulable workday window and minute-offset conversions.
//!
//! Every query is evaluated over one window `[start, end)` at one-minute
//! resolution. Times of day map to signed minute offsets from `start`; offsets
//! outside `0..minutes()` are legal and get clipped by the occupancy timeline.

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SlotError};

/// Formats accepted for a time of day, tried in order.
const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// Parse a 24-hour `HH:MM` time of day.
///
/// `HH:MM:SS` is accepted only on a whole minute (`:00`). Anything finer than a
/// minute would be truncated by [`WorkdayWindow::offset_of`], so it is rejected.
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .filter(|time| time.second() == 0 && time.nanosecond() == 0)
}

/// A validated workday window. `end` is always strictly after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkdayWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl WorkdayWindow {
    /// Build a window, rejecting one whose end is not after its start.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if end <= start {
            return Err(SlotError::InvalidWorkday { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a window from two `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start_time = parse_time_of_day(start)
            .ok_or_else(|| SlotError::Config(format!("invalid workday start '{}'", start)))?;
        let end_time = parse_time_of_day(end)
            .ok_or_else(|| SlotError::Config(format!("invalid workday end '{}'", end)))?;
        Self::new(start_time, end_time)
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Length of the window in whole minutes.
    pub fn minutes(&self) -> usize {
        (self.end - self.start).num_minutes() as usize
    }

    /// Signed minute offset of `time` from the window start.
    pub fn offset_of(&self, time: NaiveTime) -> i64 {
        (time - self.start).num_minutes()
    }

    /// Time of day `offset` minutes after the window start.
    pub fn time_at(&self, offset: usize) -> NaiveTime {
        self.start + Duration::minutes(offset as i64)
    }
}

impl Default for WorkdayWindow {
    /// 07:00 to 19:00, 720 minutes.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(7, 0, 0).expect("07:00 is a valid time"),
            end: NaiveTime::from_hms_opt(19, 0, 0).expect("19:00 is a valid time"),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde: `{ start = "07:00", end = "19:00" }`, validated on the way in
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct WindowRepr {
    #[serde(with = "hhmm")]
    start: NaiveTime,
    #[serde(with = "hhmm")]
    end: NaiveTime,
}

impl Serialize for WorkdayWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        WindowRepr {
            start: self.start,
            end: self.end,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WorkdayWindow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let repr = WindowRepr::deserialize(deserializer)?;
        WorkdayWindow::new(repr.start, repr.end).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `HH:MM` times of day.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time_of_day(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day '{}'", raw)))
    }
}
