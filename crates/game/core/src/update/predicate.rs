//! Conditions evaluated atomically against the stored account.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use crate::action::ActionKind;
use crate::quest::period_key;
use crate::state::{Account, ItemKey, QuestId, QuestPeriod};

/// A single check inside a [`Predicate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Condition {
    BalanceAtLeast(u64),

    /// `now - last_action_at[kind] >= window`, or no previous action.
    CooldownElapsed {
        kind: ActionKind,
        now: DateTime<Utc>,
        window: TimeDelta,
    },

    /// The stored last-action timestamp still equals the snapshot value.
    LastActionIs {
        kind: ActionKind,
        at: Option<DateTime<Utc>>,
    },

    InventoryAtLeast { item: ItemKey, count: u32 },

    /// At least `count` creatures of any kind.
    CreaturesAtLeast(u64),

    /// Fewer than `limit` gifts sent on `day`.
    GiftsBelow { day: NaiveDate, limit: u32 },

    /// The quest board marker still equals the snapshot value.
    QuestMarkerIs {
        period: QuestPeriod,
        marker: Option<DateTime<Utc>>,
    },

    /// The quest exists, is completed, and is not claimed yet.
    QuestClaimable(QuestId),

    ExperienceIs(u64),
}

impl Condition {
    pub fn holds(&self, account: &Account) -> bool {
        match self {
            Self::BalanceAtLeast(amount) => account.balance >= *amount,
            Self::CooldownElapsed { kind, now, window } => account
                .last_action(*kind)
                .is_none_or(|last| *now - last >= *window),
            Self::LastActionIs { kind, at } => account.last_action(*kind) == *at,
            Self::InventoryAtLeast { item, count } => account.inventory.count(item) >= *count,
            Self::CreaturesAtLeast(count) => account.inventory.total_creatures() >= *count,
            Self::GiftsBelow { day, limit } => account.gifts.sent_on(*day) < *limit,
            Self::QuestMarkerIs { period, marker } => account.quest_marker(*period) == *marker,
            Self::QuestClaimable(id) => account
                .find_quest(id)
                .is_some_and(|quest| quest.check_claimable().is_ok()),
            Self::ExperienceIs(xp) => account.experience == *xp,
        }
    }
}

/// Conjunction of conditions that must all hold for an update to apply.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

impl Predicate {
    /// A predicate that always holds.
    pub fn always() -> Self {
        Self::default()
    }

    pub fn with(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn balance_at_least(self, amount: u64) -> Self {
        if amount == 0 {
            return self;
        }
        self.with(Condition::BalanceAtLeast(amount))
    }

    /// Cooldown elapsed plus a compare guard on the snapshot timestamp, so that two
    /// in-flight requests of the same kind cannot both commit.
    pub fn cooldown_elapsed(
        self,
        kind: ActionKind,
        now: DateTime<Utc>,
        window: TimeDelta,
        snapshot: Option<DateTime<Utc>>,
    ) -> Self {
        self.with(Condition::CooldownElapsed { kind, now, window })
            .with(Condition::LastActionIs { kind, at: snapshot })
    }

    pub fn inventory_at_least(self, item: ItemKey, count: u32) -> Self {
        if count == 0 {
            return self;
        }
        self.with(Condition::InventoryAtLeast { item, count })
    }

    pub fn extend(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Returns the first condition that does not hold.
    pub fn first_failure(&self, account: &Account) -> Option<&Condition> {
        self.conditions
            .iter()
            .find(|condition| !condition.holds(account))
    }

    pub fn holds(&self, account: &Account) -> bool {
        self.first_failure(account).is_none()
    }
}

/// True when the board marker falls in the same period as `now`.
pub fn marker_is_current(
    period: QuestPeriod,
    marker: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    marker.is_some_and(|at| period_key(period, at) == period_key(period, now))
}
