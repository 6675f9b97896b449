use crate::config::AmountRange;
use crate::probability::{OutcomeTable, RarityTable, RarityValues, Weighted};

/// Food offered when feeding the collection.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FoodKind {
    Basic,
    Premium,
    Deluxe,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoodProfile {
    pub kind: FoodKind,
    pub price: u64,
    pub happiness: u8,
    pub xp: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayActivity {
    pub name: String,
    pub happiness: u8,
    pub xp: u64,
    pub gold: u64,
}

/// Reward tier drawn for each opened lootbox.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootboxReward {
    pub label: String,
    pub weight: f64,
    pub gold: AmountRange,
    pub xp: AmountRange,
}

impl Weighted for LootboxReward {
    fn weight(&self) -> f64 {
        self.weight
    }
}

/// All reward tables in one serializable bundle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardTables {
    pub hunt_rarity: RarityTable,
    pub hunt_xp_multipliers: RarityValues,
    pub battle_power_multipliers: RarityValues,
    pub play_multipliers: RarityValues,
    pub wheel: OutcomeTable,
    pub foods: Vec<FoodProfile>,
    pub play_activities: Vec<PlayActivity>,
    pub lootbox: Vec<LootboxReward>,
    pub fabled_lootbox: Vec<LootboxReward>,
}

/// Oracle providing the reward tables.
pub trait TablesOracle: Send + Sync {
    /// Base hunting chances before the level bonus.
    fn hunt_rarity(&self) -> RarityTable;

    fn hunt_xp_multipliers(&self) -> RarityValues;

    fn battle_power_multipliers(&self) -> RarityValues;

    fn play_multipliers(&self) -> RarityValues;

    fn wheel(&self) -> &OutcomeTable;

    fn food(&self, kind: FoodKind) -> Option<FoodProfile>;

    fn play_activities(&self) -> &[PlayActivity];

    fn lootbox_rewards(&self, fabled: bool) -> &[LootboxReward];
}

impl TablesOracle for RewardTables {
    fn hunt_rarity(&self) -> RarityTable {
        self.hunt_rarity
    }

    fn hunt_xp_multipliers(&self) -> RarityValues {
        self.hunt_xp_multipliers
    }

    fn battle_power_multipliers(&self) -> RarityValues {
        self.battle_power_multipliers
    }

    fn play_multipliers(&self) -> RarityValues {
        self.play_multipliers
    }

    fn wheel(&self) -> &OutcomeTable {
        &self.wheel
    }

    fn food(&self, kind: FoodKind) -> Option<FoodProfile> {
        self.foods.iter().copied().find(|food| food.kind == kind)
    }

    fn play_activities(&self) -> &[PlayActivity] {
        &self.play_activities
    }

    fn lootbox_rewards(&self, fabled: bool) -> &[LootboxReward] {
        if fabled {
            &self.fabled_lootbox
        } else {
            &self.lootbox
        }
    }
}
