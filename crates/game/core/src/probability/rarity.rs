//! Rarity tier tables.

use rand::Rng;

use crate::state::Rarity;

use super::weighted::{Weighted, select_index};

/// Per-tier numeric factors (multipliers or chances), indexed by [`Rarity`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RarityValues {
    pub common: f64,
    pub uncommon: f64,
    pub rare: f64,
    pub epic: f64,
    pub legendary: f64,
}

impl RarityValues {
    pub const fn uniform(value: f64) -> Self {
        Self {
            common: value,
            uncommon: value,
            rare: value,
            epic: value,
            legendary: value,
        }
    }

    pub fn get(&self, rarity: Rarity) -> f64 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
            Rarity::Legendary => self.legendary,
        }
    }

    pub fn get_mut(&mut self, rarity: Rarity) -> &mut f64 {
        match rarity {
            Rarity::Common => &mut self.common,
            Rarity::Uncommon => &mut self.uncommon,
            Rarity::Rare => &mut self.rare,
            Rarity::Epic => &mut self.epic,
            Rarity::Legendary => &mut self.legendary,
        }
    }
}

struct TierWeight(f64);

impl Weighted for TierWeight {
    fn weight(&self) -> f64 {
        self.0
    }
}

/// Selection chances per rarity tier.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RarityTable {
    pub chances: RarityValues,
}

impl RarityTable {
    /// Cap on the level bonus moved out of the common tier.
    pub const MAX_LEVEL_BONUS: f64 = 0.05;
    pub const LEVEL_BONUS_PER_LEVEL: f64 = 0.001;
    /// The common tier never drops below this chance.
    pub const COMMON_FLOOR: f64 = 0.05;

    pub fn new(chances: RarityValues) -> Self {
        Self { chances }
    }

    /// Moves a level-scaled bonus from the common tier to rare, epic and
    /// legendary in equal shares, then renormalizes.
    pub fn with_level_bonus(&self, level: u32) -> Self {
        let bonus = (f64::from(level) * Self::LEVEL_BONUS_PER_LEVEL).min(Self::MAX_LEVEL_BONUS);
        let mut chances = self.chances;
        chances.common = (chances.common - bonus).max(Self::COMMON_FLOOR);
        for rarity in [Rarity::Rare, Rarity::Epic, Rarity::Legendary] {
            *chances.get_mut(rarity) += bonus / 3.0;
        }
        Self { chances }.normalized()
    }

    /// Scales the chances so they sum to 1.0. Negative or non-finite chances are
    /// treated as zero; an all-zero table falls back to all-common.
    pub fn normalized(&self) -> Self {
        let mut chances = self.chances;
        for rarity in Rarity::ALL {
            let value = chances.get_mut(rarity);
            if !value.is_finite() || *value < 0.0 {
                *value = 0.0;
            }
        }
        let total: f64 = Rarity::ALL.iter().map(|rarity| chances.get(*rarity)).sum();
        if total <= 0.0 {
            let mut fallback = RarityValues::uniform(0.0);
            fallback.common = 1.0;
            return Self { chances: fallback };
        }
        for rarity in Rarity::ALL {
            *chances.get_mut(rarity) /= total;
        }
        Self { chances }
    }

    pub fn chance(&self, rarity: Rarity) -> f64 {
        self.chances.get(rarity)
    }

    /// Draws a tier from the normalized table.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Rarity {
        let normalized = self.normalized();
        let weights = Rarity::ALL.map(|rarity| TierWeight(normalized.chance(rarity)));
        select_index(&weights, rng).map_or(Rarity::Common, |index| Rarity::ALL[index])
    }

    /// Chances for a computer-controlled battle opponent of the given level.
    pub fn opponent(level: u32) -> Self {
        let bonus = (f64::from(level) * 0.01).min(0.3);
        Self::new(RarityValues {
            common: (0.4 - bonus).max(0.1),
            uncommon: (0.3 - bonus * 0.5).max(0.2),
            rare: (0.2 + bonus * 0.5).min(0.4),
            epic: (0.08 + bonus * 0.8).min(0.2),
            legendary: (0.02 + bonus).min(0.1),
        })
        .normalized()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn hunt_table() -> RarityTable {
        RarityTable::new(RarityValues {
            common: 0.6,
            uncommon: 0.25,
            rare: 0.1,
            epic: 0.04,
            legendary: 0.01,
        })
    }

    fn sum(table: &RarityTable) -> f64 {
        Rarity::ALL.iter().map(|rarity| table.chance(*rarity)).sum()
    }

    #[test]
    fn level_bonus_is_capped_and_renormalized() {
        let base = hunt_table();
        let level_30 = base.with_level_bonus(30);
        let level_500 = base.with_level_bonus(500);
        let level_60 = base.with_level_bonus(60);

        assert!((sum(&level_30) - 1.0).abs() < 1e-9);
        assert!((sum(&level_500) - 1.0).abs() < 1e-9);
        assert!(level_30.chance(Rarity::Common) < base.chance(Rarity::Common));
        assert!((level_30.chance(Rarity::Legendary) - 0.02).abs() < 1e-9);
        // Bonus stops growing at 5%.
        assert_eq!(level_60, level_500);
        assert!((level_30.chance(Rarity::Uncommon) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn misconfigured_tables_are_renormalized() {
        let skewed = RarityTable::new(RarityValues {
            common: 6.0,
            uncommon: 2.0,
            rare: 2.0,
            epic: -1.0,
            legendary: f64::NAN,
        })
        .normalized();
        assert!((sum(&skewed) - 1.0).abs() < 1e-9);
        assert!((skewed.chance(Rarity::Common) - 0.6).abs() < 1e-9);
        assert_eq!(skewed.chance(Rarity::Epic), 0.0);
    }

    #[test]
    fn draw_respects_zero_chance_tiers() {
        let only_epic = RarityTable::new(RarityValues {
            epic: 1.0,
            ..RarityValues::uniform(0.0)
        });
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..500 {
            assert_eq!(only_epic.draw(&mut rng), Rarity::Epic);
        }
    }

    #[test]
    fn opponents_get_stronger_with_level() {
        let novice = RarityTable::opponent(1);
        let veteran = RarityTable::opponent(60);
        assert!(veteran.chance(Rarity::Legendary) > novice.chance(Rarity::Legendary));
        assert!(veteran.chance(Rarity::Common) < novice.chance(Rarity::Common));
    }
}
