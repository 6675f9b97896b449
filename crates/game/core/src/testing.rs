//! Shared fixtures for unit tests.

use chrono::{DateTime, TimeZone, Utc};

use crate::action::PlanContext;
use crate::config::{AmountRange, EconomyConfig};
use crate::env::{
    CreatureDefinition, CreatureOracle, Env, FoodKind, FoodProfile, LootboxReward, PlayActivity,
    QuestOracle, RewardTables,
};
use crate::probability::{OutcomeTable, OutcomeWeight, RarityTable, RarityValues};
use crate::quest::{DifficultyScale, QuestTemplate};
use crate::state::{
    Account, AccountDefaults, AccountId, QuestKind, QuestPeriod, QuestReward, Rarity,
};

pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
}

pub fn account_at(now: DateTime<Utc>) -> Account {
    Account::new(AccountId::new("p1"), AccountDefaults::default(), now)
}

pub struct Catalog {
    pub tiers: [Vec<CreatureDefinition>; 5],
}

impl CreatureOracle for Catalog {
    fn creatures(&self, rarity: Rarity) -> &[CreatureDefinition] {
        &self.tiers[rarity.index()]
    }
}

pub struct Quests {
    daily: Vec<QuestTemplate>,
    weekly: Vec<QuestTemplate>,
}

impl QuestOracle for Quests {
    fn templates(&self, period: QuestPeriod) -> &[QuestTemplate] {
        match period {
            QuestPeriod::Daily => &self.daily,
            QuestPeriod::Weekly => &self.weekly,
        }
    }
}

pub struct Fixture {
    pub creatures: Catalog,
    pub quests: Quests,
    pub tables: RewardTables,
    pub config: EconomyConfig,
}

impl Fixture {
    pub fn new() -> Self {
        let creature = |rarity, name: &str, xp, value| CreatureDefinition {
            name: name.to_string(),
            rarity,
            xp,
            value,
        };
        let template = |key: &str, kind, target, currency, xp| QuestTemplate {
            key: key.to_string(),
            kind,
            base_target: target,
            base_reward: QuestReward { currency, xp },
            scale: DifficultyScale::STANDARD,
        };
        let lootbox = |label: &str, weight, gold, xp| LootboxReward {
            label: label.to_string(),
            weight,
            gold,
            xp,
        };

        Self {
            creatures: Catalog {
                tiers: [
                    vec![
                        creature(Rarity::Common, "wolf", 10, 20),
                        creature(Rarity::Common, "rat", 5, 10),
                    ],
                    vec![creature(Rarity::Uncommon, "boar", 15, 40)],
                    vec![creature(Rarity::Rare, "lynx", 25, 100)],
                    vec![creature(Rarity::Epic, "griffin", 50, 300)],
                    vec![creature(Rarity::Legendary, "phoenix", 100, 1_000)],
                ],
            },
            quests: Quests {
                daily: vec![
                    template("hunt", QuestKind::Hunt, 10, 500, 25),
                    template("feed", QuestKind::Feed, 5, 300, 15),
                    template("gamble", QuestKind::Gamble, 3, 800, 35),
                ],
                weekly: vec![
                    template("hunt_master", QuestKind::Hunt, 50, 5_000, 200),
                    template("battle_legend", QuestKind::Battle, 8, 10_000, 400),
                ],
            },
            tables: RewardTables {
                hunt_rarity: RarityTable::new(RarityValues {
                    common: 0.6,
                    uncommon: 0.25,
                    rare: 0.1,
                    epic: 0.04,
                    legendary: 0.01,
                }),
                hunt_xp_multipliers: RarityValues {
                    common: 1.0,
                    uncommon: 1.5,
                    rare: 2.0,
                    epic: 3.0,
                    legendary: 5.0,
                },
                battle_power_multipliers: RarityValues {
                    common: 1.0,
                    uncommon: 1.5,
                    rare: 2.5,
                    epic: 4.0,
                    legendary: 7.0,
                },
                play_multipliers: RarityValues {
                    common: 1.0,
                    uncommon: 1.2,
                    rare: 1.4,
                    epic: 1.6,
                    legendary: 2.0,
                },
                wheel: OutcomeTable::new(vec![
                    OutcomeWeight {
                        label: "Lose All".to_string(),
                        weight: 12.0,
                        multiplier: 0.0,
                    },
                    OutcomeWeight {
                        label: "Small Win".to_string(),
                        weight: 43.0,
                        multiplier: 1.2,
                    },
                    OutcomeWeight {
                        label: "Big Win".to_string(),
                        weight: 1.0,
                        multiplier: 3.0,
                    },
                ]),
                foods: vec![
                    FoodProfile {
                        kind: FoodKind::Basic,
                        price: 25,
                        happiness: 20,
                        xp: 15,
                    },
                    FoodProfile {
                        kind: FoodKind::Premium,
                        price: 75,
                        happiness: 35,
                        xp: 30,
                    },
                ],
                play_activities: vec![PlayActivity {
                    name: "fetch".to_string(),
                    happiness: 15,
                    xp: 20,
                    gold: 30,
                }],
                lootbox: vec![
                    lootbox("common", 80.0, AmountRange::new(10, 50), AmountRange::new(1, 5)),
                    lootbox("rare", 20.0, AmountRange::new(100, 300), AmountRange::new(10, 20)),
                ],
                fabled_lootbox: vec![lootbox(
                    "fabled",
                    1.0,
                    AmountRange::new(1_000, 5_000),
                    AmountRange::new(100, 200),
                )],
            },
            config: EconomyConfig::new(),
        }
    }

    pub fn env(&self) -> Env<'_> {
        Env::with_all(&self.creatures, &self.quests, &self.tables, &self.config)
    }

    pub fn context<'a>(&'a self, account: &'a Account, now: DateTime<Utc>) -> PlanContext<'a> {
        PlanContext {
            account,
            counterpart: None,
            env: self.env(),
            now,
        }
    }
}
