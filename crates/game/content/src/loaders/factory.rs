//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use economy_core::{EconomyConfig, Env, RewardTables};

use crate::loaders::{
    ConfigLoader, CreatureCatalog, CreatureLoader, LoadResult, QuestCatalog, QuestLoader,
    TablesLoader,
};

const EMBEDDED_CONFIG: &str = include_str!("../../data/config.toml");
const EMBEDDED_CREATURES: &str = include_str!("../../data/creatures.ron");
const EMBEDDED_QUESTS: &str = include_str!("../../data/quests.ron");
const EMBEDDED_TABLES: &str = include_str!("../../data/tables.ron");

/// Everything the rules read, loaded once and shared by reference.
#[derive(Clone, Debug)]
pub struct ContentBundle {
    pub config: EconomyConfig,
    pub creatures: CreatureCatalog,
    pub quests: QuestCatalog,
    pub tables: RewardTables,
}

impl ContentBundle {
    /// Environment over every oracle in the bundle.
    pub fn env(&self) -> Env<'_> {
        Env::with_all(&self.creatures, &self.quests, &self.tables, &self.config)
    }
}

/// Content factory that loads all economy content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── creatures.ron
/// ├── quests.ron
/// └── tables.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Content compiled into the crate from its own `data/` directory.
    pub fn embedded() -> LoadResult<ContentBundle> {
        Ok(ContentBundle {
            config: ConfigLoader::parse(EMBEDDED_CONFIG)?,
            creatures: CreatureLoader::parse(EMBEDDED_CREATURES)?,
            quests: QuestLoader::parse(EMBEDDED_QUESTS)?,
            tables: TablesLoader::parse(EMBEDDED_TABLES)?,
        })
    }

    /// Load economy configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<EconomyConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the creature catalog from `creatures.ron`.
    pub fn load_creatures(&self) -> LoadResult<CreatureCatalog> {
        CreatureLoader::load(&self.data_dir.join("creatures.ron"))
    }

    /// Load quest templates from `quests.ron`.
    pub fn load_quests(&self) -> LoadResult<QuestCatalog> {
        QuestLoader::load(&self.data_dir.join("quests.ron"))
    }

    /// Load reward tables from `tables.ron`.
    pub fn load_tables(&self) -> LoadResult<RewardTables> {
        TablesLoader::load(&self.data_dir.join("tables.ron"))
    }

    /// Load every file in the data directory.
    pub fn load_all(&self) -> LoadResult<ContentBundle> {
        Ok(ContentBundle {
            config: self.load_config()?,
            creatures: self.load_creatures()?,
            quests: self.load_quests()?,
            tables: self.load_tables()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use economy_core::{CreatureOracle, QuestOracle, QuestPeriod, Rarity};

    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn embedded_content_is_complete() {
        let bundle = ContentFactory::embedded().unwrap();
        assert_eq!(bundle.config, EconomyConfig::default());
        for rarity in Rarity::ALL {
            assert!(!bundle.creatures.creatures(rarity).is_empty());
        }
        assert_eq!(bundle.quests.templates(QuestPeriod::Daily).len(), 5);
        assert_eq!(bundle.quests.templates(QuestPeriod::Weekly).len(), 4);

        let env = bundle.env();
        assert!(env.creatures().is_ok());
        assert!(env.tables().is_ok());
    }

    #[test]
    fn load_all_reads_a_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in [
            ("config.toml", "starting_balance = 7\n"),
            ("creatures.ron", EMBEDDED_CREATURES),
            ("quests.ron", EMBEDDED_QUESTS),
            ("tables.ron", EMBEDDED_TABLES),
        ] {
            std::fs::write(dir.path().join(name), content).unwrap();
        }

        let bundle = ContentFactory::new(dir.path()).load_all().unwrap();
        assert_eq!(bundle.config.starting_balance, 7);
        assert_eq!(bundle.creatures.len(), 18);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_quests().unwrap_err();
        assert!(err.to_string().contains("quests.ron"));
    }
}
