//! Creature catalog loader.

use std::path::Path;

use economy_core::{CreatureDefinition, CreatureOracle, Rarity};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// File format of `creatures.ron`.
#[derive(Debug, Deserialize)]
struct CreaturesFile {
    creatures: Vec<CreatureDefinition>,
}

/// Creature catalog grouped by rarity tier, in file order within each tier.
#[derive(Clone, Debug, Default)]
pub struct CreatureCatalog {
    tiers: [Vec<CreatureDefinition>; 5],
}

impl CreatureCatalog {
    pub fn new(definitions: impl IntoIterator<Item = CreatureDefinition>) -> LoadResult<Self> {
        let mut catalog = Self::default();
        for definition in definitions {
            let tier = &mut catalog.tiers[definition.rarity.index()];
            if tier.iter().any(|existing| existing.name == definition.name) {
                anyhow::bail!(
                    "Duplicate creature '{}' in tier {}",
                    definition.name,
                    definition.rarity
                );
            }
            tier.push(definition);
        }
        for rarity in Rarity::ALL {
            if catalog.tiers[rarity.index()].is_empty() {
                anyhow::bail!("Creature catalog has no {} creatures", rarity);
            }
        }
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.tiers.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CreatureOracle for CreatureCatalog {
    fn creatures(&self, rarity: Rarity) -> &[CreatureDefinition] {
        &self.tiers[rarity.index()]
    }
}

/// Loader for the creature catalog from RON files.
pub struct CreatureLoader;

impl CreatureLoader {
    pub fn load(path: &Path) -> LoadResult<CreatureCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CreatureCatalog> {
        let file: CreaturesFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse creatures RON: {}", e))?;
        CreatureCatalog::new(file.creatures)
    }
}

#[cfg(test)]
mod tests {
    use economy_core::CreatureRef;

    use super::*;

    const SAMPLE: &str = r#"(
        creatures: [
            (name: "rat", rarity: common, xp: 5, value: 10),
            (name: "boar", rarity: uncommon, xp: 15, value: 40),
            (name: "lynx", rarity: rare, xp: 25, value: 100),
            (name: "griffin", rarity: epic, xp: 50, value: 300),
            (name: "phoenix", rarity: legendary, xp: 100, value: 1000),
        ],
    )"#;

    #[test]
    fn groups_creatures_by_tier() {
        let catalog = CreatureLoader::parse(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.creatures(Rarity::Rare)[0].name, "lynx");
        assert_eq!(
            catalog.value_of(&CreatureRef::new(Rarity::Legendary, "phoenix")),
            1000
        );
        assert_eq!(catalog.value_of(&CreatureRef::new(Rarity::Common, "lynx")), 0);
    }

    #[test]
    fn every_tier_must_be_populated() {
        let err = CreatureLoader::parse(
            r#"(creatures: [(name: "rat", rarity: common, xp: 5, value: 10)])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("uncommon"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let duplicated = SAMPLE.replace(
            "(name: \"lynx\"",
            "(name: \"rat\", rarity: common, xp: 1, value: 1),\n(name: \"lynx\"",
        );
        assert!(CreatureLoader::parse(&duplicated).is_err());
    }
}
