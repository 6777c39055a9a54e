//! Per-month record and its mutation operations.
//!
//! # Responsibility
//! - Hold one calendar month's habits, sleep log, task list and note.
//! - Provide the synchronous mutation operations the service orchestrates.
//!
//! # Invariants
//! - Habit and task order is insertion order and is meaningful to callers.
//! - The sleep log holds at most one hour value per day.
//! - Mutations never persist; persistence is the service's job.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::model::habit::Habit;

pub type MonthResult<T> = Result<T, MonthError>;

/// Positional lookup failure inside a month record.
///
/// Out-of-range indices are caller programming errors and are signaled
/// rather than silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthError {
    HabitIndexOutOfRange { index: usize, len: usize },
    TaskIndexOutOfRange { index: usize, len: usize },
}

impl Display for MonthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HabitIndexOutOfRange { index, len } => {
                write!(f, "habit index {index} out of range for {len} habits")
            }
            Self::TaskIndexOutOfRange { index, len } => {
                write!(f, "task index {index} out of range for {len} tasks")
            }
        }
    }
}

impl Error for MonthError {}

/// Outcome of a check toggle, consumed by the progression rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckToggle {
    Added,
    Removed,
}

/// Three-level priority classification for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Med,
    High,
}

impl Intensity {
    /// Advances through the fixed cyclic order low -> med -> high -> low.
    pub fn next(self) -> Self {
        match self {
            Self::Low => Self::Med,
            Self::Med => Self::High,
            Self::High => Self::Low,
        }
    }
}

/// One entry of the per-month task list.
///
/// Tasks carry no ID; they are addressed by position in the owning month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    pub intensity: Intensity,
    pub done: bool,
}

/// Complete tracked state for one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRecord {
    /// Ordered habit list; order is display/insertion order.
    pub habits: Vec<Habit>,
    /// Sparse day -> sleep-hours mapping; absent means unset.
    pub sleep: BTreeMap<u32, u32>,
    /// Ordered task list.
    pub todos: Vec<Task>,
    /// Free-text month note.
    pub note: String,
}

impl MonthRecord {
    /// Flips the check mark of habit `habit_index` on `day`.
    ///
    /// Returns whether the check was added or removed so the caller can
    /// feed the progression rule.
    pub fn toggle_check(&mut self, habit_index: usize, day: u32) -> MonthResult<CheckToggle> {
        let len = self.habits.len();
        let habit = self
            .habits
            .get_mut(habit_index)
            .ok_or(MonthError::HabitIndexOutOfRange {
                index: habit_index,
                len,
            })?;
        if habit.checks.remove(&day) {
            Ok(CheckToggle::Removed)
        } else {
            habit.checks.insert(day);
            Ok(CheckToggle::Added)
        }
    }

    /// Replaces a habit's name.
    ///
    /// Empty names are accepted here; preventing them is a UI concern.
    pub fn rename_habit(&mut self, habit_index: usize, new_name: impl Into<String>) -> MonthResult<()> {
        let len = self.habits.len();
        let habit = self
            .habits
            .get_mut(habit_index)
            .ok_or(MonthError::HabitIndexOutOfRange {
                index: habit_index,
                len,
            })?;
        habit.name = new_name.into();
        Ok(())
    }

    /// Appends a new habit with an empty check set.
    ///
    /// Returns `false` without mutating when `name` is empty.
    pub fn add_habit(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.is_empty() {
            return false;
        }
        self.habits.push(Habit::new(name));
        true
    }

    /// Records the sleep selection for `day` with toggle semantics.
    ///
    /// Selecting the currently stored hour clears the entry; any other
    /// value replaces it. At most one hour is kept per day.
    pub fn set_sleep(&mut self, day: u32, hour: u32) {
        if self.sleep.get(&day) == Some(&hour) {
            self.sleep.remove(&day);
        } else {
            self.sleep.insert(day, hour);
        }
    }

    /// Unconditionally replaces the month note.
    pub fn set_note(&mut self, text: impl Into<String>) {
        self.note = text.into();
    }

    /// Appends a pending task.
    ///
    /// Text is trimmed; returns `false` without mutating when the trimmed
    /// text is empty.
    pub fn add_task(&mut self, text: &str, intensity: Intensity) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.todos.push(Task {
            text: text.to_string(),
            intensity,
            done: false,
        });
        true
    }

    /// Flips a task's done flag.
    pub fn toggle_task_done(&mut self, index: usize) -> MonthResult<()> {
        let task = self.task_mut(index)?;
        task.done = !task.done;
        Ok(())
    }

    /// Replaces a task's text unconditionally (empty allowed).
    pub fn edit_task_text(&mut self, index: usize, text: impl Into<String>) -> MonthResult<()> {
        self.task_mut(index)?.text = text.into();
        Ok(())
    }

    /// Removes a task by position, shifting later tasks down.
    pub fn delete_task(&mut self, index: usize) -> MonthResult<Task> {
        if index >= self.todos.len() {
            return Err(MonthError::TaskIndexOutOfRange {
                index,
                len: self.todos.len(),
            });
        }
        Ok(self.todos.remove(index))
    }

    /// Advances a task's intensity through low -> med -> high -> low.
    pub fn cycle_task_intensity(&mut self, index: usize) -> MonthResult<()> {
        let task = self.task_mut(index)?;
        task.intensity = task.intensity.next();
        Ok(())
    }

    fn task_mut(&mut self, index: usize) -> MonthResult<&mut Task> {
        let len = self.todos.len();
        self.todos
            .get_mut(index)
            .ok_or(MonthError::TaskIndexOutOfRange { index, len })
    }
}
