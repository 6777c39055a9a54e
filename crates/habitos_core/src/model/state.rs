//! Application state root.
//!
//! # Responsibility
//! - Compose the user profile, the 12 month records and the month cursor.
//! - Provide the default seeding used when no snapshot exists.
//!
//! # Invariants
//! - `months` always has exactly [`MONTHS_PER_YEAR`] entries.
//! - `current_month` stays in `0..MONTHS_PER_YEAR`.

use crate::model::month::MonthRecord;
use crate::model::profile::UserProfile;

/// Fixed number of tracked months; the year is a closed 12-month calendar.
pub const MONTHS_PER_YEAR: usize = 12;

/// Calendar year the tracker is configured for.
pub const DEFAULT_YEAR: i32 = 2026;

/// Habit set seeded into every month of a fresh state.
pub const DEFAULT_HABIT_NAMES: [&str; 4] = ["Deep Work", "Exercise", "Reading", "No Sugar"];

/// The single mutable root of the tracker.
///
/// Exactly one [`crate::TrackerService`] owns a value of this type for the
/// process lifetime; all reads and mutations go through it serially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Month cursor, `0..MONTHS_PER_YEAR`.
    pub current_month: usize,
    /// Fixed calendar year.
    pub year: i32,
    pub user: UserProfile,
    /// One record per calendar month, indexed 0 (January) to 11 (December).
    pub months: Vec<MonthRecord>,
}

impl AppState {
    /// Builds the default state: 12 months each seeded with the default
    /// habit set (fresh ids, empty checks) and a default profile.
    pub fn default_with_current_month(current_month: usize) -> Self {
        let months = (0..MONTHS_PER_YEAR)
            .map(|_| {
                let mut month = MonthRecord::default();
                for name in DEFAULT_HABIT_NAMES {
                    month.add_habit(name);
                }
                month
            })
            .collect();
        Self {
            current_month: current_month.min(MONTHS_PER_YEAR - 1),
            year: DEFAULT_YEAR,
            user: UserProfile::default(),
            months,
        }
    }

    /// The month record under the cursor.
    pub fn current(&self) -> &MonthRecord {
        &self.months[self.current_month]
    }

    pub(crate) fn current_mut(&mut self) -> &mut MonthRecord {
        &mut self.months[self.current_month]
    }

    /// Moves the cursor by `delta` months, clamped to the calendar bounds.
    pub fn change_month(&mut self, delta: i32) {
        let target = self.current_month as i32 + delta;
        self.current_month = target.clamp(0, MONTHS_PER_YEAR as i32 - 1) as usize;
    }
}
