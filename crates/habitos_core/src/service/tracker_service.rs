//! Tracker use-case service.
//!
//! # Responsibility
//! - Own the single mutable [`AppState`] for the process lifetime.
//! - Apply model mutations, feed the progression rule and persist the
//!   snapshot after every state change.
//!
//! # Invariants
//! - All reads and mutations are serialized through `&self`/`&mut self`;
//!   there is exactly one mutator and no background work.
//! - Every mutating method persists the full snapshot before returning.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::{Datelike, Local};
use log::info;

use crate::calendar::days_in_month;
use crate::model::month::{CheckToggle, Intensity, MonthError, MonthRecord, Task};
use crate::model::state::{AppState, MONTHS_PER_YEAR};
use crate::repo::snapshot_repo::{
    decode_snapshot, encode_snapshot, RepoError, SnapshotRepository,
};
use crate::stats::{month_report, month_stats, MonthReport, MonthStats};

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Service-level error: persistence/codec failures or caller index bugs.
#[derive(Debug)]
pub enum TrackerError {
    Repo(RepoError),
    Month(MonthError),
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Month(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Month(err) => Some(err),
        }
    }
}

impl From<RepoError> for TrackerError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<MonthError> for TrackerError {
    fn from(value: MonthError) -> Self {
        Self::Month(value)
    }
}

/// Single owner of the application state.
///
/// Mutating methods address the month under the cursor, mirror the
/// mutation into the snapshot slot, and return the model outcome.
#[derive(Debug)]
pub struct TrackerService<R: SnapshotRepository> {
    repo: R,
    state: AppState,
}

impl<R: SnapshotRepository> TrackerService<R> {
    /// Loads the persisted snapshot, or builds the default state when the
    /// slot is empty.
    ///
    /// A fresh state starts on the real-world current month. A malformed
    /// payload surfaces as [`RepoError::Decode`]; it is never silently
    /// replaced with a fresh state.
    pub fn load(repo: R) -> TrackerResult<Self> {
        let state = match repo.load_slot()? {
            Some(payload) => {
                let state = decode_snapshot(&payload)?;
                info!("event=snapshot_load module=service status=ok mode=decoded");
                state
            }
            None => {
                let state = AppState::default_with_current_month(current_calendar_month());
                info!("event=snapshot_load module=service status=ok mode=default");
                state
            }
        };
        Ok(Self { repo, state })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn current_month_index(&self) -> usize {
        self.state.current_month
    }

    pub fn month(&self, month_index: usize) -> Option<&MonthRecord> {
        self.state.months.get(month_index)
    }

    /// Derived aggregates for the given month, recomputed from scratch.
    pub fn month_stats(&self, month_index: usize) -> Option<MonthStats> {
        let month = self.state.months.get(month_index)?;
        let days = days_in_month(self.state.year, month_index);
        Some(month_stats(month, days))
    }

    /// Report rows for the given month, for external tabular rendering.
    pub fn month_report(&self, month_index: usize) -> Option<MonthReport> {
        let month = self.state.months.get(month_index)?;
        let days = days_in_month(self.state.year, month_index);
        Some(month_report(month, days))
    }

    pub fn current_month_stats(&self) -> MonthStats {
        let days = days_in_month(self.state.year, self.state.current_month);
        month_stats(self.state.current(), days)
    }

    /// Moves the month cursor by `delta`, clamped to the calendar.
    ///
    /// Cursor moves are not persisted on their own; the cursor reaches the
    /// slot with the next state mutation.
    pub fn change_month(&mut self, delta: i32) {
        self.state.change_month(delta);
    }

    /// Jumps the month cursor to `month_index`, clamped to the calendar.
    pub fn set_current_month(&mut self, month_index: usize) {
        self.state.current_month = month_index.min(MONTHS_PER_YEAR - 1);
    }

    /// Flips a habit check on the current month and applies the XP rule.
    pub fn toggle_check(&mut self, habit_index: usize, day: u32) -> TrackerResult<CheckToggle> {
        let toggle = self.state.current_mut().toggle_check(habit_index, day)?;
        self.state.user.apply_check_toggle(toggle);
        self.persist()?;
        Ok(toggle)
    }

    /// Renames a habit on the current month (empty accepted).
    pub fn rename_habit(&mut self, habit_index: usize, new_name: &str) -> TrackerResult<()> {
        self.state.current_mut().rename_habit(habit_index, new_name)?;
        self.persist()
    }

    /// Adds a habit to the current month; `false` means the empty name
    /// was rejected and nothing was persisted.
    pub fn add_habit(&mut self, name: &str) -> TrackerResult<bool> {
        if !self.state.current_mut().add_habit(name) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Toggles the sleep selection for a day on the current month.
    pub fn set_sleep(&mut self, day: u32, hour: u32) -> TrackerResult<()> {
        self.state.current_mut().set_sleep(day, hour);
        self.persist()
    }

    /// Replaces the current month's note.
    pub fn set_note(&mut self, text: &str) -> TrackerResult<()> {
        self.state.current_mut().set_note(text);
        self.persist()
    }

    /// Adds a task to the current month; `false` means the empty text was
    /// rejected and nothing was persisted.
    pub fn add_task(&mut self, text: &str, intensity: Intensity) -> TrackerResult<bool> {
        if !self.state.current_mut().add_task(text, intensity) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn toggle_task_done(&mut self, index: usize) -> TrackerResult<()> {
        self.state.current_mut().toggle_task_done(index)?;
        self.persist()
    }

    pub fn edit_task_text(&mut self, index: usize, text: &str) -> TrackerResult<()> {
        self.state.current_mut().edit_task_text(index, text)?;
        self.persist()
    }

    pub fn delete_task(&mut self, index: usize) -> TrackerResult<Task> {
        let removed = self.state.current_mut().delete_task(index)?;
        self.persist()?;
        Ok(removed)
    }

    pub fn cycle_task_intensity(&mut self, index: usize) -> TrackerResult<()> {
        self.state.current_mut().cycle_task_intensity(index)?;
        self.persist()
    }

    /// Renames the user; `false` means the empty name was rejected.
    pub fn set_user_name(&mut self, name: &str) -> TrackerResult<bool> {
        if name.is_empty() {
            return Ok(false);
        }
        self.state.user.name = name.to_string();
        self.persist()?;
        Ok(true)
    }

    /// Replaces the accent theme token.
    pub fn set_theme(&mut self, token: &str) -> TrackerResult<()> {
        self.state.user.theme = token.to_string();
        self.persist()
    }

    /// Destroys all persisted data and reverts to the default state.
    ///
    /// Irreversible. The calling layer must obtain explicit confirmation
    /// before invoking this.
    pub fn reset(&mut self) -> TrackerResult<()> {
        self.repo.clear_slot()?;
        self.state = AppState::default_with_current_month(current_calendar_month());
        info!("event=snapshot_reset module=service status=ok");
        Ok(())
    }

    fn persist(&mut self) -> TrackerResult<()> {
        let payload = encode_snapshot(&self.state)?;
        self.repo.save_slot(&payload)?;
        Ok(())
    }
}

fn current_calendar_month() -> usize {
    (Local::now().month0() as usize).min(MONTHS_PER_YEAR - 1)
}
