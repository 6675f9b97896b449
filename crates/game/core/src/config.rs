use chrono::TimeDelta;

use crate::action::ActionKind;

/// Per-action cooldown windows, in seconds. Zero disables the cooldown.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CooldownConfig {
    pub hunt_secs: u64,
    pub battle_secs: u64,
    pub feed_secs: u64,
    pub play_secs: u64,
    pub give_secs: u64,
}

impl CooldownConfig {
    pub const DEFAULT_HUNT_SECS: u64 = 20;
    pub const DEFAULT_BATTLE_SECS: u64 = 25;
    pub const DEFAULT_FEED_SECS: u64 = 8 * 60 * 60;
    pub const DEFAULT_PLAY_SECS: u64 = 6 * 60 * 60;
    pub const DEFAULT_GIVE_SECS: u64 = 30;

    /// Cooldown window for the given action kind.
    pub fn window(&self, kind: ActionKind) -> TimeDelta {
        let secs = match kind {
            ActionKind::Hunt => self.hunt_secs,
            ActionKind::Battle => self.battle_secs,
            ActionKind::Feed => self.feed_secs,
            ActionKind::Play => self.play_secs,
            ActionKind::Give => self.give_secs,
            ActionKind::Dice | ActionKind::Wheel | ActionKind::Sell | ActionKind::OpenLootbox => 0,
        };
        TimeDelta::seconds(i64::try_from(secs).unwrap_or(i64::MAX))
    }
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            hunt_secs: Self::DEFAULT_HUNT_SECS,
            battle_secs: Self::DEFAULT_BATTLE_SECS,
            feed_secs: Self::DEFAULT_FEED_SECS,
            play_secs: Self::DEFAULT_PLAY_SECS,
            give_secs: Self::DEFAULT_GIVE_SECS,
        }
    }
}

/// Price multiplier applied to the hunting cost once a level threshold is reached.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelDiscount {
    pub min_level: u32,
    pub factor: f64,
}

impl LevelDiscount {
    pub const fn new(min_level: u32, factor: f64) -> Self {
        Self { min_level, factor }
    }
}

/// Inclusive integer range used for randomized bonuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmountRange {
    pub min: u64,
    pub max: u64,
}

impl AmountRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }
}

/// Economy configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EconomyConfig {
    /// Balance granted to lazily created accounts.
    pub starting_balance: u64,
    pub cooldowns: CooldownConfig,

    /// Base hunting price before level discounts.
    pub hunt_cost: u64,
    /// Discount tiers, evaluated from the highest `min_level` down.
    pub hunt_discounts: Vec<LevelDiscount>,
    pub shiny_chance: f64,
    pub shiny_multiplier: f64,
    pub lootbox_drop_chance: f64,
    pub lootbox_drop_gold: AmountRange,
    pub lootbox_drop_xp: AmountRange,

    pub battle_entry_cost: u64,
    pub battle_base_gold: u64,
    pub battle_base_xp: u64,
    pub battle_loss_xp: u64,

    pub default_bet: u64,
    pub max_bet: u64,
    /// Fraction of fair odds withheld by exact-match prediction games.
    pub house_edge: f64,

    /// Happiness lost per hour since the last feeding.
    pub feed_decay_per_hour: f64,
    /// Happiness lost per hour since the last play session.
    pub play_decay_per_hour: f64,

    pub max_gifts_per_day: u32,
    pub max_gift_amount: u32,
    pub max_lootbox_open: u32,
    /// Share of sale earnings converted to experience.
    pub sell_xp_ratio: f64,

    /// Experience needed to go from level `L` to `L + 1` is `level_curve_base * L`.
    pub level_curve_base: u64,
    /// Currency granted per level on level-up, multiplied by the new level.
    pub level_up_reward: u64,
}

impl EconomyConfig {
    // ===== compile-time constants used as type parameters =====
    pub const DAILY_QUEST_SLOTS: usize = 3;
    pub const WEEKLY_QUEST_SLOTS: usize = 2;
    pub const MAX_HAPPINESS: u8 = 100;
    pub const MAX_BATTLE_TEAM: usize = 5;
    pub const MAX_COPIES_PER_TEAM_SLOT: u32 = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARTING_BALANCE: u64 = 1_000;
    pub const DEFAULT_HUNT_COST: u64 = 100;
    pub const DEFAULT_SHINY_CHANCE: f64 = 0.02;
    pub const DEFAULT_SHINY_MULTIPLIER: f64 = 2.0;
    pub const DEFAULT_LOOTBOX_DROP_CHANCE: f64 = 0.05;
    pub const DEFAULT_BATTLE_ENTRY_COST: u64 = 150;
    pub const DEFAULT_BATTLE_BASE_GOLD: u64 = 150;
    pub const DEFAULT_BATTLE_BASE_XP: u64 = 50;
    pub const DEFAULT_BATTLE_LOSS_XP: u64 = 25;
    pub const DEFAULT_BET: u64 = 100;
    pub const DEFAULT_MAX_BET: u64 = 250_000;
    pub const DEFAULT_HOUSE_EDGE: f64 = 0.05;
    pub const DEFAULT_FEED_DECAY_PER_HOUR: f64 = 2.0;
    pub const DEFAULT_PLAY_DECAY_PER_HOUR: f64 = 1.5;
    pub const DEFAULT_MAX_GIFTS_PER_DAY: u32 = 10;
    pub const DEFAULT_MAX_GIFT_AMOUNT: u32 = 10;
    pub const DEFAULT_MAX_LOOTBOX_OPEN: u32 = 100;
    pub const DEFAULT_SELL_XP_RATIO: f64 = 0.1;
    pub const DEFAULT_LEVEL_CURVE_BASE: u64 = 100;
    pub const DEFAULT_LEVEL_UP_REWARD: u64 = 100;

    pub fn new() -> Self {
        Self {
            starting_balance: Self::DEFAULT_STARTING_BALANCE,
            cooldowns: CooldownConfig::default(),
            hunt_cost: Self::DEFAULT_HUNT_COST,
            hunt_discounts: vec![
                LevelDiscount::new(10, 0.9),
                LevelDiscount::new(25, 0.8),
                LevelDiscount::new(50, 0.7),
                LevelDiscount::new(100, 0.5),
            ],
            shiny_chance: Self::DEFAULT_SHINY_CHANCE,
            shiny_multiplier: Self::DEFAULT_SHINY_MULTIPLIER,
            lootbox_drop_chance: Self::DEFAULT_LOOTBOX_DROP_CHANCE,
            lootbox_drop_gold: AmountRange::new(50, 200),
            lootbox_drop_xp: AmountRange::new(10, 50),
            battle_entry_cost: Self::DEFAULT_BATTLE_ENTRY_COST,
            battle_base_gold: Self::DEFAULT_BATTLE_BASE_GOLD,
            battle_base_xp: Self::DEFAULT_BATTLE_BASE_XP,
            battle_loss_xp: Self::DEFAULT_BATTLE_LOSS_XP,
            default_bet: Self::DEFAULT_BET,
            max_bet: Self::DEFAULT_MAX_BET,
            house_edge: Self::DEFAULT_HOUSE_EDGE,
            feed_decay_per_hour: Self::DEFAULT_FEED_DECAY_PER_HOUR,
            play_decay_per_hour: Self::DEFAULT_PLAY_DECAY_PER_HOUR,
            max_gifts_per_day: Self::DEFAULT_MAX_GIFTS_PER_DAY,
            max_gift_amount: Self::DEFAULT_MAX_GIFT_AMOUNT,
            max_lootbox_open: Self::DEFAULT_MAX_LOOTBOX_OPEN,
            sell_xp_ratio: Self::DEFAULT_SELL_XP_RATIO,
            level_curve_base: Self::DEFAULT_LEVEL_CURVE_BASE,
            level_up_reward: Self::DEFAULT_LEVEL_UP_REWARD,
        }
    }

    /// Hunting price for an account at `level`, floored after the discount.
    pub fn hunt_cost_for(&self, level: u32) -> u64 {
        let factor = self
            .hunt_discounts
            .iter()
            .filter(|tier| level >= tier.min_level)
            .max_by_key(|tier| tier.min_level)
            .map_or(1.0, |tier| tier.factor);
        (self.hunt_cost as f64 * factor).floor() as u64
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hunt_cost_follows_level_breakpoints() {
        let config = EconomyConfig::new();
        assert_eq!(config.hunt_cost_for(1), 100);
        assert_eq!(config.hunt_cost_for(9), 100);
        assert_eq!(config.hunt_cost_for(10), 90);
        assert_eq!(config.hunt_cost_for(25), 80);
        assert_eq!(config.hunt_cost_for(60), 70);
        assert_eq!(config.hunt_cost_for(100), 50);
        assert_eq!(config.hunt_cost_for(450), 50);
    }

    #[test]
    fn cooldown_windows_per_action() {
        let cooldowns = CooldownConfig::default();
        assert_eq!(cooldowns.window(ActionKind::Hunt), TimeDelta::seconds(20));
        assert_eq!(cooldowns.window(ActionKind::Feed), TimeDelta::hours(8));
        assert_eq!(cooldowns.window(ActionKind::Play), TimeDelta::hours(6));
        assert_eq!(cooldowns.window(ActionKind::Dice), TimeDelta::zero());
    }
}
