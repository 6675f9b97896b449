//! Experience to level conversion.
//!
//! Experience never decreases and the level is a non-decreasing function of
//! cumulative experience. Level-up rewards scale with the level reached.

use crate::config::EconomyConfig;
use crate::state::Account;
use crate::update::{Change, Condition, Mutation, Predicate};

/// Triangular level curve: advancing from `L` to `L + 1` costs `base * L` experience.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelCurve {
    base: u64,
}

impl LevelCurve {
    /// Levels above this are not tracked.
    pub const MAX_LEVEL: u32 = 10_000;

    pub fn new(base: u64) -> Self {
        Self { base: base.max(1) }
    }

    pub fn from_config(config: &EconomyConfig) -> Self {
        Self::new(config.level_curve_base)
    }

    /// Cumulative experience required to reach `level`.
    pub fn threshold(&self, level: u32) -> u64 {
        let l = u64::from(level.max(1));
        self.base.saturating_mul(l * (l - 1) / 2)
    }

    pub fn level_for(&self, experience: u64) -> u32 {
        // Closed-form estimate, then settle on the exact boundary.
        let ratio = experience as f64 / self.base as f64;
        let estimate = ((1.0 + (1.0 + 8.0 * ratio).sqrt()) / 2.0).floor() as u32;
        let mut level = estimate.clamp(1, Self::MAX_LEVEL);
        while level > 1 && self.threshold(level) > experience {
            level -= 1;
        }
        while level < Self::MAX_LEVEL && self.threshold(level + 1) <= experience {
            level += 1;
        }
        level
    }
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self::new(EconomyConfig::DEFAULT_LEVEL_CURVE_BASE)
    }
}

/// Result of applying an experience delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelChange {
    pub previous_level: u32,
    pub new_level: u32,
    pub experience: u64,
    pub leveled_up: bool,
    /// Currency credited for the level-up, zero otherwise.
    pub reward: u64,
}

impl LevelChange {
    /// No-op change describing the account as it is.
    pub fn unchanged(account: &Account) -> Self {
        Self {
            previous_level: account.level,
            new_level: account.level,
            experience: account.experience,
            leveled_up: false,
            reward: 0,
        }
    }
}

/// Computes the level change for `xp_delta` on top of the account snapshot.
pub fn compute(
    account: &Account,
    xp_delta: u64,
    curve: &LevelCurve,
    reward_per_level: u64,
) -> LevelChange {
    let experience = account.experience.saturating_add(xp_delta);
    let new_level = curve.level_for(experience).max(account.level);
    let leveled_up = new_level > account.level;
    LevelChange {
        previous_level: account.level,
        new_level,
        experience,
        leveled_up,
        reward: if leveled_up {
            u64::from(new_level).saturating_mul(reward_per_level)
        } else {
            0
        },
    }
}

/// Conditional update committing `change`, guarded on the experience snapshot.
pub fn to_update(account: &Account, change: &LevelChange) -> (Predicate, Mutation) {
    let predicate = Predicate::always().with(Condition::ExperienceIs(account.experience));
    let mut mutation = Mutation::new().with(Change::AddExperience(
        change.experience - account.experience,
    ));
    if change.leveled_up {
        mutation = mutation
            .with(Change::RaiseLevel(change.new_level))
            .adjust_balance(i64::try_from(change.reward).unwrap_or(i64::MAX));
    }
    (predicate, mutation)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::state::{AccountDefaults, AccountId};

    #[test]
    fn curve_is_monotonic() {
        let curve = LevelCurve::new(100);
        assert_eq!(curve.level_for(0), 1);
        assert_eq!(curve.level_for(99), 1);
        assert_eq!(curve.level_for(100), 2);
        assert_eq!(curve.level_for(299), 2);
        assert_eq!(curve.level_for(300), 3);

        let mut previous = 1;
        for xp in (0..200_000).step_by(37) {
            let level = curve.level_for(xp);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn level_up_reward_scales_with_new_level() {
        let account = Account::new(AccountId::new("p1"), AccountDefaults::default(), Utc::now());
        let change = compute(&account, 350, &LevelCurve::new(100), 100);

        assert!(change.leveled_up);
        assert_eq!(change.previous_level, 1);
        assert_eq!(change.new_level, 3);
        assert_eq!(change.reward, 300);
    }

    #[test]
    fn level_never_decreases() {
        let mut account =
            Account::new(AccountId::new("p1"), AccountDefaults::default(), Utc::now());
        account.level = 12;
        let change = compute(&account, 5, &LevelCurve::new(100), 100);

        assert_eq!(change.new_level, 12);
        assert!(!change.leveled_up);
        assert_eq!(change.reward, 0);
    }
}
