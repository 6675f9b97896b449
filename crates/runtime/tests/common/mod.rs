//! Shared harness for runtime integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use economy_core::{
    Account, AccountDefaults, AccountId, ItemKey, Mutation, Predicate, Rarity, UpdateRejection,
};
use economy_runtime::repository::Result as StoreResult;
use economy_runtime::{
    AccountStore, Economy, InMemoryAccountStore, ManualClock, RuntimeConfig, StoreError,
    UpdateOutcome,
};
use tokio::sync::Barrier;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Friday 2026-10-16, noon UTC.
pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
}

pub fn account(id: &str) -> Account {
    Account::new(AccountId::new(id), AccountDefaults::default(), noon())
}

/// Account holding `count` common creatures named `rabbit`.
pub fn account_with_rabbits(id: &str, count: u32) -> Account {
    let mut account = account(id);
    account
        .inventory
        .add(ItemKey::creature(Rarity::Common, "rabbit"), count)
        .unwrap();
    account
}

pub struct Harness {
    pub economy: Economy,
    pub clock: Arc<ManualClock>,
    pub store: Arc<dyn AccountStore>,
}

pub fn harness(accounts: impl IntoIterator<Item = Account>) -> Harness {
    harness_with_store(Arc::new(InMemoryAccountStore::with_accounts(accounts)))
}

pub fn harness_with_store(store: Arc<dyn AccountStore>) -> Harness {
    init_tracing();
    let clock = Arc::new(ManualClock::new(noon()));
    let economy = Economy::builder()
        .config(RuntimeConfig {
            rng_seed: Some(7),
            ..RuntimeConfig::default()
        })
        .store(Arc::clone(&store))
        .clock(clock.clone())
        .build()
        .unwrap();
    Harness {
        economy,
        clock,
        store,
    }
}

/// Store whose first `parties` conditional updates wait for each other, so every
/// racing resolution has read its snapshot before any of them writes.
pub struct BarrierStore {
    inner: InMemoryAccountStore,
    barrier: Barrier,
    parties: usize,
    calls: AtomicUsize,
}

impl BarrierStore {
    pub fn new(inner: InMemoryAccountStore, parties: usize) -> Self {
        Self {
            inner,
            barrier: Barrier::new(parties),
            parties,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AccountStore for BarrierStore {
    async fn find_account(&self, id: &AccountId) -> StoreResult<Option<Account>> {
        self.inner.find_account(id).await
    }

    async fn conditional_update(
        &self,
        id: &AccountId,
        predicate: &Predicate,
        mutation: &Mutation,
    ) -> StoreResult<UpdateOutcome> {
        if self.calls.fetch_add(1, Ordering::SeqCst) < self.parties {
            self.barrier.wait().await;
        }
        self.inner.conditional_update(id, predicate, mutation).await
    }

    async fn create_account(
        &self,
        id: &AccountId,
        defaults: AccountDefaults,
        now: DateTime<Utc>,
    ) -> StoreResult<Account> {
        self.inner.create_account(id, defaults, now).await
    }
}

/// Which conditional updates a [`FaultyStore`] refuses.
pub enum Fault {
    /// Updates of this account fail as unavailable.
    Unavailable(AccountId),
    /// Every update after the first `n` fails as unavailable.
    AfterUpdates(usize),
    /// Every update is rejected with this reason.
    Reject(UpdateRejection),
}

/// In-memory store that injects one kind of write failure.
pub struct FaultyStore {
    inner: InMemoryAccountStore,
    fault: Fault,
    updates: AtomicUsize,
}

impl FaultyStore {
    pub fn new(inner: InMemoryAccountStore, fault: Fault) -> Self {
        Self {
            inner,
            fault,
            updates: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AccountStore for FaultyStore {
    async fn find_account(&self, id: &AccountId) -> StoreResult<Option<Account>> {
        self.inner.find_account(id).await
    }

    async fn conditional_update(
        &self,
        id: &AccountId,
        predicate: &Predicate,
        mutation: &Mutation,
    ) -> StoreResult<UpdateOutcome> {
        let seen = self.updates.fetch_add(1, Ordering::SeqCst);
        match &self.fault {
            Fault::Unavailable(target) if target == id => {
                return Err(StoreError::Unavailable(format!("{id} is read-only")));
            }
            Fault::AfterUpdates(limit) if seen >= *limit => {
                return Err(StoreError::Unavailable("store went away".to_string()));
            }
            Fault::Reject(reason) => return Ok(UpdateOutcome::Rejected(reason.clone())),
            _ => {}
        }
        self.inner.conditional_update(id, predicate, mutation).await
    }

    async fn create_account(
        &self,
        id: &AccountId,
        defaults: AccountDefaults,
        now: DateTime<Utc>,
    ) -> StoreResult<Account> {
        self.inner.create_account(id, defaults, now).await
    }
}
