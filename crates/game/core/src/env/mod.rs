//! Traits describing read-only economy data.
//!
//! Oracles expose the creature catalog, quest templates and reward tables. The
//! [`Env`] aggregate bundles them with the [`EconomyConfig`] so action planners
//! can access everything they need without coupling to concrete loaders.
mod creatures;
mod error;
mod rng;
mod tables;

pub use creatures::{CreatureDefinition, CreatureOracle};
pub use error::OracleError;
pub use rng::{account_fingerprint, compute_seed};
pub use tables::{FoodKind, FoodProfile, LootboxReward, PlayActivity, RewardTables, TablesOracle};

pub use crate::quest::QuestOracle;

use crate::config::EconomyConfig;

/// Aggregates read-only oracles required by the action planners.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    creatures: Option<&'a dyn CreatureOracle>,
    quests: Option<&'a dyn QuestOracle>,
    tables: Option<&'a dyn TablesOracle>,
    config: &'a EconomyConfig,
}

impl<'a> Env<'a> {
    pub fn new(
        creatures: Option<&'a dyn CreatureOracle>,
        quests: Option<&'a dyn QuestOracle>,
        tables: Option<&'a dyn TablesOracle>,
        config: &'a EconomyConfig,
    ) -> Self {
        Self {
            creatures,
            quests,
            tables,
            config,
        }
    }

    pub fn with_all(
        creatures: &'a dyn CreatureOracle,
        quests: &'a dyn QuestOracle,
        tables: &'a dyn TablesOracle,
        config: &'a EconomyConfig,
    ) -> Self {
        Self::new(Some(creatures), Some(quests), Some(tables), config)
    }

    /// An environment with no oracles, for rules that only need configuration.
    pub fn empty(config: &'a EconomyConfig) -> Self {
        Self::new(None, None, None, config)
    }

    /// Returns the CreatureOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::CreaturesNotAvailable` if no creature oracle was provided.
    pub fn creatures(&self) -> Result<&'a dyn CreatureOracle, OracleError> {
        self.creatures.ok_or(OracleError::CreaturesNotAvailable)
    }

    /// Returns the QuestOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::QuestsNotAvailable` if no quest oracle was provided.
    pub fn quests(&self) -> Result<&'a dyn QuestOracle, OracleError> {
        self.quests.ok_or(OracleError::QuestsNotAvailable)
    }

    /// Returns the TablesOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TablesNotAvailable` if no tables oracle was provided.
    pub fn tables(&self) -> Result<&'a dyn TablesOracle, OracleError> {
        self.tables.ok_or(OracleError::TablesNotAvailable)
    }

    pub fn config(&self) -> &'a EconomyConfig {
        self.config
    }
}

impl core::fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Env")
            .field("creatures", &self.creatures.is_some())
            .field("quests", &self.quests.is_some())
            .field("tables", &self.tables.is_some())
            .finish_non_exhaustive()
    }
}
