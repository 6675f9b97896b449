//! Values returned to callers of the runtime API.

use economy_core::{ActionKind, ActionOutcome, Quest, QuestId, QuestReward};
use serde::Serialize;

/// Committed result of one action.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActionResult {
    pub kind: ActionKind,
    pub outcome: ActionOutcome,
    pub cost: u64,
    pub reward: u64,
    pub xp_gained: u64,
    /// Balance after the action and any level-up reward.
    pub new_balance: u64,
    pub new_level: u32,
    pub leveled_up: bool,
    pub level_up_reward: u64,
}

impl ActionResult {
    /// Net balance change of the action itself, excluding level-up rewards.
    pub fn net(&self) -> i64 {
        let reward = i64::try_from(self.reward).unwrap_or(i64::MAX);
        let cost = i64::try_from(self.cost).unwrap_or(i64::MAX);
        reward - cost
    }
}

/// Live quest boards of an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestView {
    pub daily: Vec<Quest>,
    pub weekly: Vec<Quest>,
}

impl QuestView {
    pub fn iter(&self) -> impl Iterator<Item = &Quest> {
        self.daily.iter().chain(self.weekly.iter())
    }
}

/// Reward paid out by a successful claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestClaim {
    pub quest_id: QuestId,
    pub reward: QuestReward,
    pub new_balance: u64,
    pub new_level: u32,
    pub leveled_up: bool,
}
