//! # slot-engine
//!
//! Finds common free meeting slots for a group of people from their busy
//! intervals within a bounded workday.
//!
//! Schedules are loaded once into a [`CalendarStore`]; an
//! [`AvailabilityEngine`] then answers "when can these people meet for this
//! long?" by rasterizing everyone's busy time onto a per-minute timeline and
//! scanning it for free windows.
//!
//! ```rust
//! use chrono::{Duration, NaiveTime};
//! use slot_engine::{AvailabilityEngine, CalendarStore, RecordPolicy, WorkdayWindow};
//!
//! let mut store = CalendarStore::new();
//! slot_engine::ingest::load_str(
//!     &mut store,
//!     "Alice,Standup,07:00,08:00\nBob,Review,08:00,09:00\n",
//!     RecordPolicy::Abort,
//! )
//! .unwrap();
//!
//! let engine = AvailabilityEngine::new(&store, WorkdayWindow::default());
//! let slots = engine.find_available_slots(&["Alice", "Bob"], Duration::minutes(120));
//! assert_eq!(slots[0], NaiveTime::from_hms_opt(9, 0, 0).unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`workday`]: the schedulable window and minute-offset conversions
//! - [`interval`]: half-open busy intervals
//! - [`store`]: per-participant schedules
//! - [`occupancy`]: per-minute busy/free timelines
//! - [`engine`]: joint availability and slot scanning
//! - [`ingest`]: comma-separated record loading with skip/abort policies
//! - [`config`]: TOML configuration
//! - [`error`]: Error types

pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod interval;
pub mod occupancy;
pub mod store;
pub mod workday;

pub use config::EngineConfig;
pub use engine::{find_available_slots, AvailabilityEngine, FreeRun};
pub use error::SlotError;
pub use ingest::{LoadReport, RecordDiagnostic, RecordPolicy};
pub use interval::BusyInterval;
pub use occupancy::OccupancyTimeline;
pub use store::CalendarStore;
pub use workday::WorkdayWindow;
