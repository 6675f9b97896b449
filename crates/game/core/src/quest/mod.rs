//! Time-windowed quest rules.
//!
//! Boards are regenerated only when their marker falls outside the live period
//! ([`plan_refresh`]); progress is applied by [`crate::update::Change::AdvanceQuests`]
//! which never regenerates, so same-period progress cannot be clobbered.
mod catalog;
mod period;

pub use catalog::{DifficultyScale, QuestTemplate, generate_board};
pub use period::{PeriodKey, day_key, period_key, week_key};

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::state::{Account, DailyBoard, QuestPeriod, WeeklyBoard};
use crate::update::{Change, Condition, Mutation, Predicate, marker_is_current};

/// Replacement boards for every stale period of an account.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuestRefresh {
    pub daily: Option<DailyBoard>,
    pub weekly: Option<WeeklyBoard>,
    previous_daily_marker: Option<DateTime<Utc>>,
    previous_weekly_marker: Option<DateTime<Utc>>,
}

impl QuestRefresh {
    pub fn is_empty(&self) -> bool {
        self.daily.is_none() && self.weekly.is_none()
    }

    /// Applies the replacement boards in place.
    pub fn apply_to(&self, account: &mut Account) {
        if let Some(board) = &self.daily {
            account.daily_quests = board.clone();
        }
        if let Some(board) = &self.weekly {
            account.weekly_quests = board.clone();
        }
    }

    /// Conditional update replacing the stale boards, guarded on the markers seen
    /// in the snapshot so a concurrent regeneration is never overwritten.
    pub fn to_update(&self) -> (Predicate, Mutation) {
        let mut predicate = Predicate::always();
        let mut mutation = Mutation::new();
        if let Some(board) = &self.daily {
            predicate = predicate.with(Condition::QuestMarkerIs {
                period: QuestPeriod::Daily,
                marker: self.previous_daily_marker,
            });
            mutation = mutation.with(Change::ReplaceDailyQuests(board.clone()));
        }
        if let Some(board) = &self.weekly {
            predicate = predicate.with(Condition::QuestMarkerIs {
                period: QuestPeriod::Weekly,
                marker: self.previous_weekly_marker,
            });
            mutation = mutation.with(Change::ReplaceWeeklyQuests(board.clone()));
        }
        (predicate, mutation)
    }
}

/// Source of quest templates for each period.
pub trait QuestOracle: Send + Sync {
    fn templates(&self, period: QuestPeriod) -> &[QuestTemplate];
}

/// Generates replacement boards for the periods whose marker is not current.
/// Returns an empty refresh when both boards belong to the live periods.
pub fn plan_refresh<C, R>(
    account: &Account,
    catalog: &C,
    now: DateTime<Utc>,
    rng: &mut R,
) -> QuestRefresh
where
    C: QuestOracle + ?Sized,
    R: Rng + ?Sized,
{
    let mut refresh = QuestRefresh {
        previous_daily_marker: account.daily_quests.reset_at,
        previous_weekly_marker: account.weekly_quests.reset_at,
        ..QuestRefresh::default()
    };

    if !marker_is_current(QuestPeriod::Daily, account.daily_quests.reset_at, now) {
        refresh.daily = Some(generate_board(
            QuestPeriod::Daily,
            catalog.templates(QuestPeriod::Daily),
            now,
            rng,
        ));
    }
    if !marker_is_current(QuestPeriod::Weekly, account.weekly_quests.reset_at, now) {
        refresh.weekly = Some(generate_board(
            QuestPeriod::Weekly,
            catalog.templates(QuestPeriod::Weekly),
            now,
            rng,
        ));
    }
    refresh
}

/// Returns the account with every stale board regenerated.
pub fn ensure_current_period<C, R>(
    account: &Account,
    catalog: &C,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Account
where
    C: QuestOracle + ?Sized,
    R: Rng + ?Sized,
{
    let mut next = account.clone();
    plan_refresh(account, catalog, now, rng).apply_to(&mut next);
    next
}
