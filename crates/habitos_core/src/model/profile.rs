//! User profile and XP progression.
//!
//! # Responsibility
//! - Hold the user's identity, theme token and progression counters.
//! - Apply the point-award rule triggered by check toggles.
//!
//! # Invariants
//! - `level` starts at 1 and never decreases.
//! - Immediately after a level-up recomputation, `xp < level * 100`.
//! - XP has no lower bound: removing checks can drive it negative. This
//!   mirrors the reference behavior and is kept on purpose.

use serde::{Deserialize, Serialize};

use crate::model::month::CheckToggle;

/// Fallback profile name used when a snapshot carries none.
pub const DEFAULT_USER_NAME: &str = "Samar";

/// Default accent color token.
pub const DEFAULT_THEME: &str = "#6366f1";

/// Points granted per added check (and deducted per removed one).
pub const XP_PER_CHECK: i64 = 10;

/// Profile and gamified progression state for the single local user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name; backfilled to [`DEFAULT_USER_NAME`] when empty.
    pub name: String,
    /// Experience points. May go negative, see module invariants.
    pub xp: i64,
    /// Progression level, starts at 1.
    pub level: u32,
    /// Accent color token consumed by the presentation layer.
    pub theme: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_USER_NAME.to_string(),
            xp: 0,
            level: 1,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl UserProfile {
    /// Awards or deducts XP for one check toggle.
    ///
    /// An added check grants [`XP_PER_CHECK`] and then runs a single-step
    /// level check: if `xp >= level * 100` the level increments exactly
    /// once. XP is not reset or re-normalized against the new threshold,
    /// so crossing two thresholds in one event still levels up once. A
    /// removed check deducts the same amount and never touches the level.
    pub fn apply_check_toggle(&mut self, toggle: CheckToggle) {
        match toggle {
            CheckToggle::Added => {
                self.xp += XP_PER_CHECK;
                if self.xp >= i64::from(self.level) * 100 {
                    self.level += 1;
                }
            }
            CheckToggle::Removed => {
                self.xp -= XP_PER_CHECK;
            }
        }
    }

    /// XP threshold at which the next level-up check fires.
    pub fn next_level_threshold(&self) -> i64 {
        i64::from(self.level) * 100
    }
}

#[cfg(test)]
mod tests {
    use super::{UserProfile, XP_PER_CHECK};
    use crate::model::month::CheckToggle;

    #[test]
    fn added_then_removed_check_is_xp_neutral() {
        let mut user = UserProfile::default();
        user.apply_check_toggle(CheckToggle::Added);
        assert_eq!(user.xp, XP_PER_CHECK);
        user.apply_check_toggle(CheckToggle::Removed);
        assert_eq!(user.xp, 0);
    }

    #[test]
    fn level_up_is_single_step_and_keeps_xp() {
        let mut user = UserProfile {
            xp: 95,
            ..UserProfile::default()
        };
        user.apply_check_toggle(CheckToggle::Added);
        assert_eq!(user.xp, 105);
        assert_eq!(user.level, 2);

        // A second threshold crossing within the same event never happens;
        // the next add only compares against the new level once.
        user.xp = 395;
        user.apply_check_toggle(CheckToggle::Added);
        assert_eq!(user.level, 3);
    }

    #[test]
    fn removal_can_drive_xp_negative_without_demotion() {
        let mut user = UserProfile {
            level: 2,
            ..UserProfile::default()
        };
        user.apply_check_toggle(CheckToggle::Removed);
        assert_eq!(user.xp, -XP_PER_CHECK);
        assert_eq!(user.level, 2);
    }
}
