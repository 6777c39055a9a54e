//! Habit domain model.
//!
//! # Responsibility
//! - Define the habit record and its day-of-month check set.
//!
//! # Invariants
//! - `id` is stable and never reused for another habit.
//! - `checks` holds deduplicated day-of-month values; order carries no
//!   meaning beyond the set's natural iteration order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a habit.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type HabitId = Uuid;

/// One tracked habit with its per-day completion marks.
///
/// The model does not bound check values against the owning month's day
/// count; callers are expected to only offer valid days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Stable global ID used for linking and reporting.
    pub id: HabitId,
    /// Display name. Non-empty at creation; renames may blank it.
    pub name: String,
    /// Days of the month (1-based) on which the habit was completed.
    pub checks: BTreeSet<u32>,
}

impl Habit {
    /// Creates a habit with a generated stable ID and no checks.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a habit with a caller-provided stable ID.
    ///
    /// Used by snapshot decoding where identity already exists.
    pub fn with_id(id: HabitId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            checks: BTreeSet::new(),
        }
    }

    /// Returns whether the habit was completed on `day`.
    pub fn is_checked(&self, day: u32) -> bool {
        self.checks.contains(&day)
    }
}
