//! Reward tables loader.

use std::path::Path;

use economy_core::env::LootboxReward;
use economy_core::{FoodKind, RewardTables};
use strum::IntoEnumIterator;

use crate::loaders::{LoadResult, read_file};

/// Loader for reward tables from RON files.
pub struct TablesLoader;

impl TablesLoader {
    pub fn load(path: &Path) -> LoadResult<RewardTables> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RewardTables> {
        let tables: RewardTables = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tables RON: {}", e))?;
        validate(&tables)?;
        Ok(tables)
    }
}

fn validate(tables: &RewardTables) -> LoadResult<()> {
    if tables.wheel.entries.is_empty() {
        anyhow::bail!("Wheel table is empty");
    }
    if tables.wheel.entries.iter().any(|entry| entry.weight < 0.0) {
        anyhow::bail!("Wheel table has a negative weight");
    }
    for kind in FoodKind::iter() {
        if !tables.foods.iter().any(|food| food.kind == kind) {
            anyhow::bail!("No food profile for {:?}", kind);
        }
    }
    if tables.play_activities.is_empty() {
        anyhow::bail!("No play activities");
    }
    validate_lootbox("lootbox", &tables.lootbox)?;
    validate_lootbox("fabled_lootbox", &tables.fabled_lootbox)?;
    Ok(())
}

fn validate_lootbox(name: &str, rewards: &[LootboxReward]) -> LoadResult<()> {
    if rewards.is_empty() {
        anyhow::bail!("Table {name} is empty");
    }
    for reward in rewards {
        if reward.gold.min > reward.gold.max || reward.xp.min > reward.xp.max {
            anyhow::bail!("Table {name} tier '{}' has an inverted range", reward.label);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_tables_parse() {
        let tables = TablesLoader::parse(include_str!("../../data/tables.ron")).unwrap();
        assert_eq!(tables.wheel.entries.len(), 6);
        assert_eq!(tables.foods.len(), 3);
        let total: f64 = tables.wheel.entries.iter().map(|entry| entry.weight).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn missing_food_is_rejected() {
        let shipped = include_str!("../../data/tables.ron");
        let without_deluxe =
            shipped.replace("(kind: deluxe, price: 150, happiness: 50, xp: 50),", "");
        let err = TablesLoader::parse(&without_deluxe).unwrap_err();
        assert!(err.to_string().contains("Deluxe"));
    }
}
