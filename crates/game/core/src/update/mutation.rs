//! Field-level changes applied to an account by a conditional update.

use chrono::{DateTime, NaiveDate, Utc};

use crate::action::ActionKind;
use crate::state::{
    Account, DailyBoard, InventoryError, ItemKey, PetCare, QuestId, QuestKind, QuestPeriod,
    WeeklyBoard,
};

use super::predicate::marker_is_current;

/// Errors raised while applying a [`Mutation`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    #[error("balance change {delta} would leave balance {balance} negative")]
    BalanceUnderflow { balance: u64, delta: i64 },

    #[error("balance overflow")]
    BalanceOverflow,

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error("quest {0} cannot be claimed")]
    QuestNotClaimable(QuestId),

    #[error("experience overflow")]
    ExperienceOverflow,
}

/// A single field change.
#[derive(Clone, Debug, PartialEq)]
pub enum Change {
    AdjustBalance(i64),
    SetLastAction {
        kind: ActionKind,
        at: DateTime<Utc>,
    },
    AdjustInventory {
        item: ItemKey,
        delta: i64,
    },
    AddExperience(u64),
    /// Level only moves up; a lower value is ignored.
    RaiseLevel(u32),
    SetPet(PetCare),
    RecordBattle {
        won: bool,
    },
    RecordGift {
        day: NaiveDate,
    },
    ReplaceDailyQuests(DailyBoard),
    ReplaceWeeklyQuests(WeeklyBoard),
    /// Progress quests of `kind` on every board whose marker is current at `now`.
    AdvanceQuests {
        kind: QuestKind,
        amount: u32,
        now: DateTime<Utc>,
    },
    ClaimQuest(QuestId),
}

/// Ordered list of changes applied together.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Mutation {
    changes: Vec<Change>,
}

impl Mutation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, change: Change) -> Self {
        self.changes.push(change);
        self
    }

    pub fn adjust_balance(self, delta: i64) -> Self {
        if delta == 0 {
            return self;
        }
        self.with(Change::AdjustBalance(delta))
    }

    pub fn set_last_action(self, kind: ActionKind, at: DateTime<Utc>) -> Self {
        self.with(Change::SetLastAction { kind, at })
    }

    pub fn adjust_inventory(self, item: ItemKey, delta: i64) -> Self {
        if delta == 0 {
            return self;
        }
        self.with(Change::AdjustInventory { item, delta })
    }

    pub fn extend(mut self, changes: impl IntoIterator<Item = Change>) -> Self {
        self.changes.extend(changes);
        self
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Net balance delta carried by this mutation.
    pub fn balance_delta(&self) -> i64 {
        self.changes
            .iter()
            .map(|change| match change {
                Change::AdjustBalance(delta) => *delta,
                _ => 0,
            })
            .sum()
    }

    /// Applies every change in order. On error the account may be partially
    /// modified; callers apply to a scratch copy.
    pub fn apply(&self, account: &mut Account) -> Result<(), MutationError> {
        for change in &self.changes {
            apply_change(account, change)?;
        }
        Ok(())
    }
}

fn apply_change(account: &mut Account, change: &Change) -> Result<(), MutationError> {
    match change {
        Change::AdjustBalance(delta) => {
            let next = i128::from(account.balance) + i128::from(*delta);
            if next < 0 {
                return Err(MutationError::BalanceUnderflow {
                    balance: account.balance,
                    delta: *delta,
                });
            }
            account.balance = u64::try_from(next).map_err(|_| MutationError::BalanceOverflow)?;
        }
        Change::SetLastAction { kind, at } => {
            account.last_action_at.insert(*kind, *at);
        }
        Change::AdjustInventory { item, delta } => {
            account.inventory.apply_delta(item, *delta)?;
        }
        Change::AddExperience(xp) => {
            account.experience = account
                .experience
                .checked_add(*xp)
                .ok_or(MutationError::ExperienceOverflow)?;
        }
        Change::RaiseLevel(level) => {
            account.level = account.level.max(*level);
        }
        Change::SetPet(pet) => {
            account.pet = *pet;
        }
        Change::RecordBattle { won } => account.battle_record.record(*won),
        Change::RecordGift { day } => account.gifts.record(*day),
        Change::ReplaceDailyQuests(board) => account.daily_quests = board.clone(),
        Change::ReplaceWeeklyQuests(board) => account.weekly_quests = board.clone(),
        Change::AdvanceQuests { kind, amount, now } => {
            if marker_is_current(QuestPeriod::Daily, account.daily_quests.reset_at, *now) {
                account.daily_quests.advance(*kind, *amount);
            }
            if marker_is_current(QuestPeriod::Weekly, account.weekly_quests.reset_at, *now) {
                account.weekly_quests.advance(*kind, *amount);
            }
        }
        Change::ClaimQuest(id) => {
            let quest = account
                .find_quest_mut(id)
                .ok_or_else(|| MutationError::QuestNotClaimable(id.clone()))?;
            quest
                .check_claimable()
                .map_err(|_| MutationError::QuestNotClaimable(id.clone()))?;
            quest.claimed = true;
        }
    }
    Ok(())
}
