//! Domain model for the habit tracker core.
//!
//! # Responsibility
//! - Define the canonical state shapes persisted in the snapshot blob.
//! - Own month-level mutation operations and the XP progression rule.
//!
//! # Invariants
//! - `AppState` always holds exactly 12 month records.
//! - Habits carry a stable `HabitId` that is never reused.
//! - Tasks have no identity beyond their position in the owning month.

pub mod habit;
pub mod month;
pub mod profile;
pub mod state;
