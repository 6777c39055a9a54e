//! Core domain logic for the HabitOS tracker.
//! This crate is the single source of truth for business invariants.

pub mod calendar;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod stats;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::habit::{Habit, HabitId};
pub use model::month::{CheckToggle, Intensity, MonthError, MonthRecord, MonthResult, Task};
pub use model::profile::{UserProfile, DEFAULT_THEME, DEFAULT_USER_NAME, XP_PER_CHECK};
pub use model::state::{AppState, DEFAULT_HABIT_NAMES, DEFAULT_YEAR, MONTHS_PER_YEAR};
pub use repo::snapshot_repo::{
    decode_snapshot, encode_snapshot, RepoError, RepoResult, SnapshotRepository,
    SqliteSnapshotRepository, SNAPSHOT_SLOT,
};
pub use service::tracker_service::{TrackerError, TrackerResult, TrackerService};
pub use stats::{HabitReportRow, HabitStat, MonthReport, MonthStats, TaskReportRow};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
