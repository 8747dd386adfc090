//! Per-minute occupancy over one workday.
//!
//! One cell per minute of the window, `true` meaning busy. A timeline is built
//! for a single query and dropped with it.

use crate::interval::BusyInterval;
use crate::workday::WorkdayWindow;

/// Busy/free signal at one-minute resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyTimeline {
    busy: Vec<bool>,
}

impl OccupancyTimeline {
    /// An all-free timeline of `minutes` cells.
    pub fn free(minutes: usize) -> Self {
        Self {
            busy: vec![false; minutes],
        }
    }

    /// Rasterize one participant's intervals onto a fresh lane for `window`.
    pub fn rasterize(window: &WorkdayWindow, intervals: &[BusyInterval]) -> Self {
        let mut lane = Self::free(window.minutes());
        for interval in intervals {
            lane.mark_busy(window.offset_of(interval.start), window.offset_of(interval.end));
        }
        lane
    }

    /// Mark `[start, end)` busy, clipped to the timeline. Empty and inverted
    /// ranges, and ranges entirely outside the timeline, change nothing.
    pub fn mark_busy(&mut self, start: i64, end: i64) {
        let len = self.busy.len() as i64;
        let from = start.clamp(0, len) as usize;
        let to = end.clamp(0, len) as usize;
        if from < to {
            self.busy[from..to].fill(true);
        }
    }

    /// Fold `other` into `self`: a minute is busy if it is busy in either.
    pub fn union_with(&mut self, other: &OccupancyTimeline) {
        for (cell, other_cell) in self.busy.iter_mut().zip(&other.busy) {
            *cell |= *other_cell;
        }
    }

    pub fn len(&self) -> usize {
        self.busy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.busy.is_empty()
    }

    pub fn is_busy(&self, minute: usize) -> bool {
        self.busy.get(minute).copied().unwrap_or(false)
    }

    /// Whether every minute of `[start, start + len)` is free. A range running
    /// past the end of the timeline is never free.
    pub fn is_free_run(&self, start: usize, len: usize) -> bool {
        match self.busy.get(start..start + len) {
            Some(cells) => !cells.iter().any(|&busy| busy),
            None => false,
        }
    }

    /// Count of busy minutes.
    pub fn busy_minutes(&self) -> usize {
        self.busy.iter().filter(|&&busy| busy).count()
    }

    /// Maximal runs of free minutes as `(start, end)` offsets, end exclusive.
    pub fn free_runs(&self) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        let mut run_start: Option<usize> = None;

        for (minute, &busy) in self.busy.iter().enumerate() {
            match (busy, run_start) {
                (false, None) => run_start = Some(minute),
                (true, Some(start)) => {
                    runs.push((start, minute));
                    run_start = None;
                }
                _ => {}
            }
        }

        // Trailing run reaching the end of the day.
        if let Some(start) = run_start {
            runs.push((start, self.busy.len()));
        }

        runs
    }
}
