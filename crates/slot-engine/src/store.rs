//! Per-participant busy schedules.
//!
//! The store is filled once (usually by [`crate::ingest`]) and then only read.
//! Queries borrow it immutably, so any number of them can run against the same
//! loaded store. Concurrent loading and querying needs the caller to build a
//! fresh store and swap it in.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::error::Result;
use crate::ingest::{self, LoadReport, RecordPolicy};
use crate::interval::BusyInterval;

/// Maps a participant name (exact, case-sensitive) to its busy intervals in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct CalendarStore {
    schedules: HashMap<String, Vec<BusyInterval>>,
}

impl CalendarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a calendar file.
    pub fn load_file(path: impl AsRef<Path>, policy: RecordPolicy) -> Result<(Self, LoadReport)> {
        let mut store = Self::new();
        let report = ingest::load_file(&mut store, path, policy)?;
        Ok((store, report))
    }

    /// Append `interval` to `participant`'s schedule, creating it if unseen.
    pub fn add_interval(&mut self, participant: impl Into<String>, interval: BusyInterval) {
        self.schedules
            .entry(participant.into())
            .or_default()
            .push(interval);
    }

    /// Register `participant` with no busy intervals. An existing schedule is
    /// left untouched.
    pub fn add_participant(&mut self, participant: impl Into<String>) {
        self.schedules.entry(participant.into()).or_default();
    }

    /// Busy intervals for `participant`, empty when the name is unknown.
    pub fn intervals_for(&self, participant: &str) -> &[BusyInterval] {
        self.schedules
            .get(participant)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, participant: &str) -> bool {
        self.schedules.contains_key(participant)
    }

    /// All known participant names, sorted.
    pub fn known_participants(&self) -> BTreeSet<&str> {
        self.schedules.keys().map(String::as_str).collect()
    }

    /// Number of known participants.
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Total busy intervals across every participant.
    pub fn interval_count(&self) -> usize {
        self.schedules.values().map(Vec::len).sum()
    }
}
