//! Runtime wrapper around the static economy content.
//!
//! [`OracleManager`] holds the loaded catalogs behind the `economy-core` oracle
//! traits and builds [`economy_core::Env`] snapshots on demand. Content is
//! immutable at runtime; dynamic state lives in the account store.

use std::sync::Arc;

use economy_content::{ContentBundle, ContentFactory};
use economy_core::{CreatureOracle, EconomyConfig, Env, QuestOracle, TablesOracle};

use crate::api::RuntimeError;

/// Manages all oracle implementations and provides unified access.
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) creatures: Arc<dyn CreatureOracle>,
    pub(crate) quests: Arc<dyn QuestOracle>,
    pub(crate) tables: Arc<dyn TablesOracle>,
    pub(crate) config: Arc<EconomyConfig>,
}

impl OracleManager {
    pub fn new(
        creatures: Arc<dyn CreatureOracle>,
        quests: Arc<dyn QuestOracle>,
        tables: Arc<dyn TablesOracle>,
        config: Arc<EconomyConfig>,
    ) -> Self {
        Self {
            creatures,
            quests,
            tables,
            config,
        }
    }

    pub fn from_bundle(bundle: ContentBundle) -> Self {
        Self::new(
            Arc::new(bundle.creatures),
            Arc::new(bundle.quests),
            Arc::new(bundle.tables),
            Arc::new(bundle.config),
        )
    }

    /// Oracles over the content compiled into `economy-content`.
    pub fn embedded() -> Result<Self, RuntimeError> {
        ContentFactory::embedded()
            .map(Self::from_bundle)
            .map_err(|e| RuntimeError::Content(e.to_string()))
    }

    /// Replaces the economy configuration, keeping the catalogs.
    pub fn with_config(mut self, config: EconomyConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn as_env(&self) -> Env<'_> {
        Env::with_all(
            self.creatures.as_ref(),
            self.quests.as_ref(),
            self.tables.as_ref(),
            self.config.as_ref(),
        )
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    pub fn quests(&self) -> &dyn QuestOracle {
        self.quests.as_ref()
    }
}

impl std::fmt::Debug for OracleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleManager")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
