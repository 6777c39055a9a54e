//! Pure Gregorian calendar helpers.
//!
//! # Responsibility
//! - Compute month lengths and weekday positions for the tracked year.
//!
//! # Invariants
//! - Total for month indices `0..=11`; no state, no I/O.

use chrono::{Datelike, NaiveDate, Weekday};

/// Number of days in the given zero-indexed month, leap-year aware.
///
/// Uses the day-0-of-next-month technique: the last day of a month is the
/// predecessor of the first day of the following month.
pub fn days_in_month(year: i32, month_index: usize) -> u32 {
    let (next_year, next_month) = if month_index >= 11 {
        (year + 1, 1)
    } else {
        (year, month_index as u32 + 2)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        // Month indices 0..=11 always name a valid Gregorian month.
        .unwrap_or(0)
}

/// Weekday of a given day in the given zero-indexed month.
pub fn weekday_of(year: i32, month_index: usize, day: u32) -> Option<Weekday> {
    NaiveDate::from_ymd_opt(year, month_index as u32 + 1, day).map(|date| date.weekday())
}
