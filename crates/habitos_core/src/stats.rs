//! Pure stats derivation over a month record.
//!
//! # Responsibility
//! - Compute completion rate, longest streak and per-habit percentages.
//! - Produce the tabular report rows consumed by export collaborators.
//!
//! # Invariants
//! - Everything here is recomputed from scratch per call; no caching.
//! - Rates and percentages stay within `0..=100`.

use crate::model::habit::HabitId;
use crate::model::month::{Intensity, MonthRecord};

/// Completion percentage and check count for one habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitStat {
    pub id: HabitId,
    pub name: String,
    pub check_count: u32,
    /// `round(100 * check_count / days_in_month)`.
    pub percent: u32,
}

/// Derived aggregates for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthStats {
    /// `round(100 * total_checks / (habit_count * days_in_month))`; 0 when
    /// the month has no habits.
    pub completion_rate: u32,
    /// Sum of all habits' check counts ("reps").
    pub total_checks: u32,
    /// Longest run of consecutive days where any habit was completed.
    pub longest_streak: u32,
    /// One entry per habit, in display order.
    pub per_habit: Vec<HabitStat>,
}

/// Computes all aggregates for `month` given its day count.
pub fn month_stats(month: &MonthRecord, days_in_month: u32) -> MonthStats {
    let total_checks: u32 = month.habits.iter().map(|h| h.checks.len() as u32).sum();
    let max_checks = month.habits.len() as u32 * days_in_month;
    let completion_rate = if max_checks > 0 {
        ratio_percent(total_checks, max_checks)
    } else {
        0
    };

    let per_habit = month
        .habits
        .iter()
        .map(|habit| {
            let check_count = habit.checks.len() as u32;
            HabitStat {
                id: habit.id,
                name: habit.name.clone(),
                check_count,
                percent: ratio_percent(check_count, days_in_month),
            }
        })
        .collect();

    MonthStats {
        completion_rate,
        total_checks,
        longest_streak: longest_streak(month, days_in_month),
        per_habit,
    }
}

/// Longest run of consecutive hit days, where a day is hit when any habit
/// has a check on it. Resets on the first missed day.
pub fn longest_streak(month: &MonthRecord, days_in_month: u32) -> u32 {
    if month.habits.is_empty() {
        return 0;
    }
    let mut longest = 0;
    let mut current = 0;
    for day in 1..=days_in_month {
        if month.habits.iter().any(|habit| habit.is_checked(day)) {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn ratio_percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (100.0 * f64::from(part) / f64::from(whole)).round() as u32
}

/// Per-day hit/miss row for one habit, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitReportRow {
    pub name: String,
    /// Index 0 is day 1; `true` means the habit was completed that day.
    pub days: Vec<bool>,
}

/// Task row with its status, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReportRow {
    pub text: String,
    pub intensity: Intensity,
    pub done: bool,
}

/// Tabular view of a month, sufficient for external report rendering.
///
/// File formats (delimited text, paginated documents) are the consumer's
/// concern; this only supplies the ordered rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthReport {
    pub habits: Vec<HabitReportRow>,
    pub tasks: Vec<TaskReportRow>,
}

/// Builds the report rows for `month` given its day count.
pub fn month_report(month: &MonthRecord, days_in_month: u32) -> MonthReport {
    let habits = month
        .habits
        .iter()
        .map(|habit| HabitReportRow {
            name: habit.name.clone(),
            days: (1..=days_in_month).map(|day| habit.is_checked(day)).collect(),
        })
        .collect();
    let tasks = month
        .todos
        .iter()
        .map(|task| TaskReportRow {
            text: task.text.clone(),
            intensity: task.intensity,
            done: task.done,
        })
        .collect();
    MonthReport { habits, tasks }
}
