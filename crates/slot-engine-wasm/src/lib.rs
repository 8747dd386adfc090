//! WASM bindings for slot-engine.
//!
//! Exposes calendar parsing, common slot search and free-run computation to
//! JavaScript via `wasm-bindgen`. Complex values cross the boundary as JSON
//! strings.
//!
//! Schedules are passed as a JSON object mapping each participant to its busy
//! intervals:
//!
//! ```json
//! { "Alice": [{ "start": "08:00", "end": "09:30", "label": "Standup" }] }
//! ```
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use std::collections::BTreeMap;

use chrono::NaiveTime;
use serde::Serialize;
use slot_engine::ingest;
use slot_engine::{
    AvailabilityEngine, BusyInterval, CalendarStore, RecordDiagnostic, RecordPolicy,
    WorkdayWindow,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

type Schedules = BTreeMap<String, Vec<BusyInterval>>;

#[derive(Serialize)]
struct ParsedCalendarDto {
    schedules: Schedules,
    skipped: Vec<RecordDiagnostic>,
}

// ---------------------------------------------------------------------------
// Helpers (plain `String` errors so they can be exercised off-wasm)
// ---------------------------------------------------------------------------

fn build_store(schedules_json: &str) -> Result<CalendarStore, String> {
    let schedules: Schedules = serde_json::from_str(schedules_json)
        .map_err(|e| format!("Invalid schedules JSON: {}", e))?;

    let mut store = CalendarStore::new();
    for (participant, intervals) in schedules {
        for interval in &intervals {
            if interval.end < interval.start {
                return Err(format!(
                    "Interval for '{}' ends before it starts: {}-{}",
                    participant,
                    interval.start.format("%H:%M"),
                    interval.end.format("%H:%M")
                ));
            }
        }
        // An empty list still makes the participant known, and free all day.
        store.add_participant(participant.clone());
        for interval in intervals {
            store.add_interval(participant.clone(), interval);
        }
    }
    Ok(store)
}

fn parse_participants(json: &str) -> Result<Vec<String>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid participants JSON: {}", e))
}

/// Default 07:00-19:00 window unless both bounds are given.
fn parse_window(day_start: Option<&str>, day_end: Option<&str>) -> Result<WorkdayWindow, String> {
    match (day_start, day_end) {
        (None, None) => Ok(WorkdayWindow::default()),
        (Some(start), Some(end)) => WorkdayWindow::parse(start, end).map_err(|e| e.to_string()),
        _ => Err("dayStart and dayEnd must be given together".to_string()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn format_times(times: &[NaiveTime]) -> Vec<String> {
    times.iter().map(|t| t.format("%H:%M").to_string()).collect()
}

fn parse_calendar_impl(csv: &str, strict: bool) -> Result<String, String> {
    let policy = if strict {
        RecordPolicy::Abort
    } else {
        RecordPolicy::Skip
    };
    let mut store = CalendarStore::new();
    let report = ingest::load_str(&mut store, csv, policy).map_err(|e| e.to_string())?;

    let schedules: Schedules = store
        .known_participants()
        .into_iter()
        .map(|name| (name.to_string(), store.intervals_for(name).to_vec()))
        .collect();

    to_json(&ParsedCalendarDto {
        schedules,
        skipped: report.skipped,
    })
}

fn find_available_slots_impl(
    schedules_json: &str,
    participants_json: &str,
    duration_minutes: i32,
    day_start: Option<&str>,
    day_end: Option<&str>,
) -> Result<String, String> {
    let store = build_store(schedules_json)?;
    let participants = parse_participants(participants_json)?;
    let window = parse_window(day_start, day_end)?;

    let slots = AvailabilityEngine::new(&store, window)
        .find_available_slots_minutes(&participants, i64::from(duration_minutes));

    to_json(&format_times(&slots))
}

fn find_free_runs_impl(
    schedules_json: &str,
    participants_json: &str,
    day_start: Option<&str>,
    day_end: Option<&str>,
) -> Result<String, String> {
    let store = build_store(schedules_json)?;
    let participants = parse_participants(participants_json)?;
    let window = parse_window(day_start, day_end)?;

    let runs = AvailabilityEngine::new(&store, window).free_runs(&participants);

    to_json(&runs)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Parse comma-separated calendar records into a schedules object.
///
/// Returns `{ schedules, skipped }`. With `strict` set, the first invalid
/// record throws instead of being listed in `skipped`.
#[wasm_bindgen(js_name = "parseCalendar")]
pub fn parse_calendar(csv: &str, strict: bool) -> Result<String, JsValue> {
    parse_calendar_impl(csv, strict).map_err(|e| JsValue::from_str(&e))
}

/// Start times (`"HH:MM"`) at which every known participant is free for
/// `duration_minutes`.
///
/// A participant is known when it has a key in `schedules_json`, even with an
/// empty list (`{"Carol": []}` means free all day). Names without a key are
/// ignored. An interval ending before it starts throws.
///
/// # Arguments
/// - `schedules_json` -- participant → busy intervals object
/// - `participants_json` -- JSON array of participant names
/// - `duration_minutes` -- meeting length; non-positive or over-long yields `[]`
/// - `day_start` / `day_end` -- optional `HH:MM` workday bounds (default 07:00-19:00)
#[wasm_bindgen(js_name = "findAvailableSlots")]
pub fn find_available_slots(
    schedules_json: &str,
    participants_json: &str,
    duration_minutes: i32,
    day_start: Option<String>,
    day_end: Option<String>,
) -> Result<String, JsValue> {
    find_available_slots_impl(
        schedules_json,
        participants_json,
        duration_minutes,
        day_start.as_deref(),
        day_end.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Maximal stretches where every known participant is free, as
/// `{start, end, duration_minutes}` objects.
#[wasm_bindgen(js_name = "findFreeRuns")]
pub fn find_free_runs(
    schedules_json: &str,
    participants_json: &str,
    day_start: Option<String>,
    day_end: Option<String>,
) -> Result<String, JsValue> {
    find_free_runs_impl(
        schedules_json,
        participants_json,
        day_start.as_deref(),
        day_end.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}
