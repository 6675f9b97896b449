//! Drawn results of an action, reported back to the caller.

use std::collections::BTreeMap;

use crate::env::FoodKind;
use crate::probability::TeamMember;
use crate::state::{AccountId, CreatureRef, Rarity};

/// Bonus found while hunting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootboxDrop {
    pub gold: u64,
    pub xp: u64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HuntOutcome {
    pub creature: CreatureRef,
    pub shiny: bool,
    pub lootbox: Option<LootboxDrop>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleOutcome {
    pub won: bool,
    pub team: Vec<TeamMember>,
    pub opponent_team: Vec<TeamMember>,
    /// Player account fought, when not a generated team.
    pub opponent: Option<AccountId>,
    pub power: f64,
    pub opponent_power: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeedOutcome {
    pub food: FoodKind,
    /// Happiness after decay, before the meal.
    pub happiness_before: u8,
    pub happiness: u8,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayOutcome {
    pub favourite: CreatureRef,
    pub activity: String,
    pub happiness: u8,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceOutcome {
    pub dice: [u8; 2],
    pub prediction: u8,
    pub multiplier: f64,
    pub payout: u64,
}

impl DiceOutcome {
    pub fn total(&self) -> u8 {
        self.dice[0] + self.dice[1]
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelOutcome {
    pub segment: String,
    pub multiplier: f64,
    pub payout: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GiftOutcome {
    pub to: AccountId,
    pub creature: CreatureRef,
    pub amount: u32,
    /// Gifts sent today including this one.
    pub sent_today: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaleOutcome {
    pub rarity: Rarity,
    pub sold: Vec<(CreatureRef, u32)>,
}

impl SaleOutcome {
    pub fn count(&self) -> u64 {
        self.sold.iter().map(|(_, count)| u64::from(*count)).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootboxOutcome {
    pub fabled: bool,
    pub opened: u32,
    /// Opened boxes per reward tier label.
    pub tiers: BTreeMap<String, u32>,
}

/// Result of the random draw, computed from the snapshot before the write.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "action", rename_all = "snake_case"))]
pub enum ActionOutcome {
    Hunt(HuntOutcome),
    Battle(BattleOutcome),
    Feed(FeedOutcome),
    Play(PlayOutcome),
    Dice(DiceOutcome),
    Wheel(WheelOutcome),
    Give(GiftOutcome),
    Sell(SaleOutcome),
    OpenLootbox(LootboxOutcome),
}

impl ActionOutcome {
    /// Wins count toward gamble and battle quests; losing a bet is still a
    /// successful action.
    pub fn is_win(&self) -> bool {
        match self {
            Self::Battle(battle) => battle.won,
            Self::Dice(dice) => dice.multiplier > 0.0,
            Self::Wheel(wheel) => wheel.multiplier > 1.0,
            _ => false,
        }
    }
}
