//! Economy configuration loader.

use std::path::Path;

use economy_core::EconomyConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for economy configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`EconomyConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<EconomyConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EconomyConfig> {
        let config: EconomyConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &EconomyConfig) -> LoadResult<()> {
    let chances = [
        ("shiny_chance", config.shiny_chance),
        ("lootbox_drop_chance", config.lootbox_drop_chance),
        ("house_edge", config.house_edge),
    ];
    for (name, value) in chances {
        if !(0.0..=1.0).contains(&value) {
            anyhow::bail!("{name} must be within [0, 1], got {value}");
        }
    }
    for range in [config.lootbox_drop_gold, config.lootbox_drop_xp] {
        if range.min > range.max {
            anyhow::bail!("amount range {}..={} is inverted", range.min, range.max);
        }
    }
    if config.level_curve_base == 0 {
        anyhow::bail!("level_curve_base must be positive");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = ConfigLoader::parse("hunt_cost = 250\n[cooldowns]\nhunt_secs = 5\n").unwrap();
        assert_eq!(config.hunt_cost, 250);
        assert_eq!(config.cooldowns.hunt_secs, 5);
        assert_eq!(config.cooldowns.feed_secs, 8 * 60 * 60);
        assert_eq!(config.max_bet, EconomyConfig::DEFAULT_MAX_BET);
    }

    #[test]
    fn out_of_range_chance_is_rejected() {
        let err = ConfigLoader::parse("shiny_chance = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("shiny_chance"));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "starting_balance = 42\n").unwrap();

        assert_eq!(ConfigLoader::load(&path).unwrap().starting_balance, 42);
        assert!(ConfigLoader::load(&dir.path().join("missing.toml")).is_err());
    }
}
