//! Common free-slot search across several participants.
//!
//! Each requested participant's busy intervals are rasterized onto a per-minute
//! lane over the workday window, the lanes are OR-ed into one joint timeline,
//! and the joint timeline is scanned for free windows of the requested length.
//!
//! Every query is total: unknown names are dropped, and an empty participant
//! list or an unusable duration yields an empty result rather than an error.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::occupancy::OccupancyTimeline;
use crate::store::CalendarStore;
use crate::workday::{hhmm, WorkdayWindow};

/// A maximal stretch of the window during which every requested participant
/// is free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeRun {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    pub duration_minutes: i64,
}

/// Read-only view over a loaded [`CalendarStore`] for one workday window.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityEngine<'a> {
    store: &'a CalendarStore,
    window: WorkdayWindow,
}

impl<'a> AvailabilityEngine<'a> {
    pub fn new(store: &'a CalendarStore, window: WorkdayWindow) -> Self {
        Self { store, window }
    }

    /// Start times of non-overlapping meeting slots of `duration` at which all
    /// known participants in `names` are free, earliest first.
    ///
    /// Names missing from the store are ignored. Returns an empty list when no
    /// known participant remains, or when `duration` is not a positive number
    /// of minutes shorter than the workday.
    pub fn find_available_slots<S: AsRef<str>>(
        &self,
        names: &[S],
        duration: Duration,
    ) -> Vec<NaiveTime> {
        self.find_available_slots_minutes(names, duration.num_minutes())
    }

    /// [`find_available_slots`](Self::find_available_slots) with the duration
    /// given in minutes.
    pub fn find_available_slots_minutes<S: AsRef<str>>(
        &self,
        names: &[S],
        duration_minutes: i64,
    ) -> Vec<NaiveTime> {
        let Some(duration) = self.usable_duration(duration_minutes) else {
            debug!(duration_minutes, "duration outside the workday, no slots");
            return Vec::new();
        };
        let Some(joint) = self.joint_occupancy(names) else {
            return Vec::new();
        };

        let slots: Vec<NaiveTime> = scan_slots(&joint, duration)
            .into_iter()
            .map(|offset| self.window.time_at(offset))
            .collect();

        debug!(
            requested = names.len(),
            duration_minutes,
            slots = slots.len(),
            "slot search finished"
        );
        slots
    }

    /// The earliest slot of `duration`, if any.
    pub fn first_available_slot<S: AsRef<str>>(
        &self,
        names: &[S],
        duration: Duration,
    ) -> Option<NaiveTime> {
        let duration = self.usable_duration(duration.num_minutes())?;
        let joint = self.joint_occupancy(names)?;
        scan_slots(&joint, duration)
            .first()
            .map(|&offset| self.window.time_at(offset))
    }

    /// Maximal jointly free runs inside the window, in chronological order.
    /// Empty when no requested participant is known.
    pub fn free_runs<S: AsRef<str>>(&self, names: &[S]) -> Vec<FreeRun> {
        let Some(joint) = self.joint_occupancy(names) else {
            return Vec::new();
        };

        joint
            .free_runs()
            .into_iter()
            .map(|(start, end)| FreeRun {
                start: self.window.time_at(start),
                end: self.window.time_at(end),
                duration_minutes: (end - start) as i64,
            })
            .collect()
    }

    /// Joint busy timeline for the known participants in `names`, or `None`
    /// when none of them is known.
    pub fn joint_occupancy<S: AsRef<str>>(&self, names: &[S]) -> Option<OccupancyTimeline> {
        let known: Vec<&str> = names
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| self.store.contains(name))
            .collect();

        if known.is_empty() {
            debug!(requested = names.len(), "no known participants in request");
            return None;
        }

        let mut joint = OccupancyTimeline::free(self.window.minutes());
        for name in known {
            let lane = OccupancyTimeline::rasterize(&self.window, self.store.intervals_for(name));
            joint.union_with(&lane);
        }
        Some(joint)
    }

    /// `Some(minutes)` when a meeting that long can fit in the window.
    fn usable_duration(&self, duration_minutes: i64) -> Option<usize> {
        if duration_minutes <= 0 || duration_minutes > self.window.minutes() as i64 {
            return None;
        }
        Some(duration_minutes as usize)
    }
}

/// Offsets of non-overlapping free windows of `duration` minutes.
///
/// Candidate starts run from 0 while strictly below `len - duration`. After a
/// hit the scan jumps past the whole window, so a free run of
/// `k * duration + r` minutes contributes `k` starts.
pub fn scan_slots(timeline: &OccupancyTimeline, duration: usize) -> Vec<usize> {
    let mut offsets = Vec::new();
    if duration == 0 || duration > timeline.len() {
        return offsets;
    }

    let last_start = timeline.len() - duration;
    let mut minute = 0;
    while minute < last_start {
        if timeline.is_free_run(minute, duration) {
            offsets.push(minute);
            minute += duration;
        } else {
            minute += 1;
        }
    }
    offsets
}

/// Convenience wrapper: one-off query without holding an engine.
pub fn find_available_slots<S: AsRef<str>>(
    store: &CalendarStore,
    window: WorkdayWindow,
    names: &[S],
    duration: Duration,
) -> Vec<NaiveTime> {
    AvailabilityEngine::new(store, window).find_available_slots(names, duration)
}
