use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::action::ActionKind;
use crate::config::EconomyConfig;

use super::inventory::Inventory;
use crate::update::marker_is_current;

use super::quest::{DailyBoard, Quest, QuestId, QuestPeriod, WeeklyBoard};
use super::records::{BattleRecord, GiftLedger, PetCare};

/// Stable account identifier supplied by the calling layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Values used when an account is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountDefaults {
    pub balance: u64,
    pub level: u32,
    pub experience: u64,
}

impl AccountDefaults {
    pub fn from_config(config: &EconomyConfig) -> Self {
        Self {
            balance: config.starting_balance,
            level: 1,
            experience: 0,
        }
    }
}

impl Default for AccountDefaults {
    fn default() -> Self {
        Self::from_config(&EconomyConfig::default())
    }
}

/// Persisted economic and progression state of one player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Account {
    pub id: AccountId,
    pub balance: u64,
    pub level: u32,
    pub experience: u64,
    pub last_action_at: BTreeMap<ActionKind, DateTime<Utc>>,
    pub inventory: Inventory,
    pub daily_quests: DailyBoard,
    pub weekly_quests: WeeklyBoard,
    pub pet: PetCare,
    pub battle_record: BattleRecord,
    pub gifts: GiftLedger,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(id: AccountId, defaults: AccountDefaults, now: DateTime<Utc>) -> Self {
        Self {
            id,
            balance: defaults.balance,
            level: defaults.level.max(1),
            experience: defaults.experience,
            last_action_at: BTreeMap::new(),
            inventory: Inventory::new(),
            daily_quests: DailyBoard::empty(),
            weekly_quests: WeeklyBoard::empty(),
            pet: PetCare::new(),
            battle_record: BattleRecord::default(),
            gifts: GiftLedger::default(),
            created_at: now,
        }
    }

    pub fn last_action(&self, kind: ActionKind) -> Option<DateTime<Utc>> {
        self.last_action_at.get(&kind).copied()
    }

    pub fn find_quest(&self, id: &QuestId) -> Option<&Quest> {
        self.daily_quests
            .find(id)
            .or_else(|| self.weekly_quests.find(id))
    }

    /// Generation marker of the board holding quests of `period`.
    pub fn quest_marker(&self, period: QuestPeriod) -> Option<DateTime<Utc>> {
        match period {
            QuestPeriod::Daily => self.daily_quests.reset_at,
            QuestPeriod::Weekly => self.weekly_quests.reset_at,
        }
    }

    /// The quest, unless its board was generated in an earlier period than `now`.
    pub fn find_live_quest(&self, id: &QuestId, now: DateTime<Utc>) -> Option<&Quest> {
        self.find_quest(id).filter(|quest| {
            marker_is_current(quest.period, self.quest_marker(quest.period), now)
        })
    }

    pub fn find_quest_mut(&mut self, id: &QuestId) -> Option<&mut Quest> {
        match self.daily_quests.find_mut(id) {
            Some(quest) => Some(quest),
            None => self.weekly_quests.find_mut(id),
        }
    }

    /// Returns the first violated invariant, if any.
    pub fn check_invariants(&self) -> Result<(), &'static str> {
        if self.level == 0 {
            return Err("level must be at least 1");
        }
        if self.pet.happiness > EconomyConfig::MAX_HAPPINESS {
            return Err("happiness above maximum");
        }
        if !self.daily_quests.is_consistent() || !self.weekly_quests.is_consistent() {
            return Err("quest progress inconsistent with completion flags");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;
    use crate::state::{QuestKind, QuestReward};
    use crate::testing::{account_at, noon};

    #[test]
    fn quests_of_an_ended_period_are_not_live() {
        let mut account = account_at(noon());
        let id = QuestId::new("daily:battle:2026-10-16");
        let quest = Quest::new(
            id.clone(),
            QuestKind::Battle,
            QuestPeriod::Daily,
            None,
            2,
            QuestReward {
                currency: 600,
                xp: 30,
            },
        );
        account.daily_quests.quests.push(quest);
        account.daily_quests.reset_at = Some(noon());

        assert!(account.find_live_quest(&id, noon() + TimeDelta::hours(11)).is_some());
        assert!(account.find_live_quest(&id, noon() + TimeDelta::hours(12)).is_none());
        assert!(account.find_live_quest(&id, noon() + TimeDelta::days(3)).is_none());
        assert!(account.find_quest(&id).is_some());
    }
}
