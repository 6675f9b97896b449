//! High-level economy façade.
//!
//! [`Economy`] wires the store, oracles, clock and randomness into the
//! resolver, quest tracker and progression aggregator, and exposes the entry
//! points clients call. Collaborators are injected through [`EconomyBuilder`].

use std::sync::Arc;
use std::time::Duration;

use economy_core::{Account, AccountDefaults, AccountId, ActionRequest, LevelCurve, QuestId};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::{
    ActionResult, QuestClaim, QuestError, QuestView, ResolveError, RuntimeError, StoreError,
};
use crate::clock::{Clock, SystemClock};
use crate::hooks::{HookRegistry, PostCommitHook, QuestProgressHook};
use crate::oracle::OracleManager;
use crate::progression::ProgressionAggregator;
use crate::quests::QuestTracker;
use crate::repository::{AccountStore, InMemoryAccountStore, TimedStore};
use crate::resolver::ActionResolver;
use crate::rng::RngSource;

/// Runtime configuration shared by the economy services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Deadline for each store call, in milliseconds.
    pub store_timeout_ms: u64,
    /// When set, every draw is derived from this seed instead of entropy.
    pub rng_seed: Option<u64>,
    /// Compare-and-swap attempts for experience updates.
    pub progression_attempts: u32,
}

impl RuntimeConfig {
    pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 2_000;

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            store_timeout_ms: Self::DEFAULT_STORE_TIMEOUT_MS,
            rng_seed: None,
            progression_attempts: ProgressionAggregator::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// The creature economy.
///
/// Cheap to clone; clones share the same store and services.
#[derive(Clone)]
pub struct Economy {
    resolver: ActionResolver,
    quests: Arc<QuestTracker>,
    store: TimedStore,
    oracles: OracleManager,
    clock: Arc<dyn Clock>,
}

impl Economy {
    pub fn builder() -> EconomyBuilder {
        EconomyBuilder::new()
    }

    /// Resolves one action request.
    pub async fn resolve(&self, request: ActionRequest) -> Result<ActionResult, ResolveError> {
        self.resolver.resolve(&request).await
    }

    /// Live quest boards, regenerating stale ones first.
    pub async fn get_quests(&self, id: &AccountId) -> Result<QuestView, QuestError> {
        self.quests.get_quests(id, self.clock.now()).await
    }

    /// Claims a completed quest on one of the live boards.
    pub async fn claim_quest(
        &self,
        id: &AccountId,
        quest_id: &QuestId,
    ) -> Result<QuestClaim, QuestError> {
        self.quests.claim_quest(id, quest_id, self.clock.now()).await
    }

    /// Creates the account with default values, or returns the existing one.
    pub async fn provision_account(&self, id: &AccountId) -> Result<Account, StoreError> {
        self.store
            .create_account(
                id,
                AccountDefaults::from_config(self.oracles.config()),
                self.clock.now(),
            )
            .await
    }

    /// Read-only snapshot of an account.
    pub async fn account(&self, id: &AccountId) -> Result<Option<Account>, StoreError> {
        self.store.find_account(id).await
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    pub fn quests(&self) -> &QuestTracker {
        &self.quests
    }
}

/// Builder for [`Economy`] with injectable collaborators.
pub struct EconomyBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    store: Option<Arc<dyn AccountStore>>,
    clock: Option<Arc<dyn Clock>>,
    hooks: Vec<Arc<dyn PostCommitHook>>,
}

impl EconomyBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            store: None,
            clock: None,
            hooks: Vec::new(),
        }
    }

    /// Override runtime configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the oracle manager. Defaults to the embedded content.
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set the account store. Defaults to an empty in-memory store.
    pub fn store(mut self, store: Arc<dyn AccountStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the clock. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Seed every draw deterministically.
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.config.rng_seed = Some(seed);
        self
    }

    /// Adds a hook run after each committed action, next to the quest hook.
    pub fn add_hook(mut self, hook: Arc<dyn PostCommitHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn build(self) -> Result<Economy, RuntimeError> {
        let oracles = match self.oracles {
            Some(oracles) => oracles,
            None => OracleManager::embedded()?,
        };
        let store = TimedStore::new(
            self.store
                .unwrap_or_else(|| Arc::new(InMemoryAccountStore::new())),
            self.config.store_timeout(),
        );
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let rng = match self.config.rng_seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::entropy(),
        };

        let economy_config = oracles.config();
        let progression = Arc::new(
            ProgressionAggregator::new(
                store.clone(),
                LevelCurve::from_config(economy_config),
                economy_config.level_up_reward,
            )
            .with_max_attempts(self.config.progression_attempts),
        );
        let quests = Arc::new(QuestTracker::new(
            store.clone(),
            oracles.clone(),
            Arc::clone(&progression),
            rng,
        ));

        let mut hooks = HookRegistry::new(self.hooks);
        hooks = hooks.with(Arc::new(QuestProgressHook::new(Arc::clone(&quests))));

        info!(
            target: "runtime",
            deterministic = rng.is_deterministic(),
            hooks = hooks.len(),
            "Economy built"
        );

        let resolver = ActionResolver::new(
            store.clone(),
            oracles.clone(),
            Arc::clone(&clock),
            rng,
            progression,
            hooks,
        );
        Ok(Economy {
            resolver,
            quests,
            store,
            oracles,
            clock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_config_reads_partial_json() {
        let config: RuntimeConfig = serde_json::from_str(r#"{ "rng_seed": 9 }"#).unwrap();
        assert_eq!(config.rng_seed, Some(9));
        assert_eq!(config.store_timeout(), Duration::from_millis(2_000));
    }

    #[test]
    fn builder_defaults_to_embedded_content() {
        let economy = Economy::builder().build().unwrap();
        assert_eq!(economy.oracles().config().starting_balance, 1_000);
    }
}
