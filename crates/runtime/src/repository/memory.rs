//! In-memory AccountStore implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use economy_core::{
    Account, AccountDefaults, AccountId, ConditionalUpdate, Mutation, Predicate,
};

use crate::repository::{AccountStore, Result, StoreError, UpdateOutcome};

/// In-memory implementation of [`AccountStore`].
///
/// Conditional updates run under the write lock, so they are atomic per store.
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store seeded with the given accounts.
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.id.clone(), account))
            .collect();
        Self {
            accounts: RwLock::new(accounts),
        }
    }

    pub fn len(&self) -> usize {
        self.accounts
            .read()
            .map(|accounts| accounts.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serializes every account to JSON, sorted by id.
    pub fn snapshot_json(&self) -> Result<String> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        let mut sorted: Vec<&Account> = accounts.values().collect();
        sorted.sort_by(|a, b| a.id.cmp(&b.id));
        serde_json::to_string_pretty(&sorted).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Rebuilds a store from [`Self::snapshot_json`] output.
    pub fn restore_json(json: &str) -> Result<Self> {
        let accounts: Vec<Account> =
            serde_json::from_str(json).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Self::with_accounts(accounts))
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_account(&self, id: &AccountId) -> Result<Option<Account>> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(accounts.get(id).cloned())
    }

    async fn conditional_update(
        &self,
        id: &AccountId,
        predicate: &Predicate,
        mutation: &Mutation,
    ) -> Result<UpdateOutcome> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        let Some(current) = accounts.get_mut(id) else {
            return Ok(UpdateOutcome::NotFound);
        };
        match ConditionalUpdate::new(predicate, mutation).evaluate(current) {
            Ok(next) => {
                *current = next.clone();
                Ok(UpdateOutcome::Applied(next))
            }
            Err(rejection) => Ok(UpdateOutcome::Rejected(rejection)),
        }
    }

    async fn create_account(
        &self,
        id: &AccountId,
        defaults: AccountDefaults,
        now: DateTime<Utc>,
    ) -> Result<Account> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        let account = accounts
            .entry(id.clone())
            .or_insert_with(|| Account::new(id.clone(), defaults, now));
        Ok(account.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use economy_core::{Condition, UpdateRejection};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn create_returns_the_existing_account() {
        let store = InMemoryAccountStore::new();
        let id = AccountId::new("p1");
        let first = store
            .create_account(&id, AccountDefaults::default(), now())
            .await
            .unwrap();

        let rich = AccountDefaults {
            balance: 9_999,
            ..AccountDefaults::default()
        };
        let second = store.create_account(&id, rich, now()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn rejected_update_leaves_account_untouched() {
        let store = InMemoryAccountStore::new();
        let id = AccountId::new("p1");
        let before = store
            .create_account(&id, AccountDefaults::default(), now())
            .await
            .unwrap();

        let predicate = Predicate::always().balance_at_least(5_000);
        let mutation = Mutation::new().adjust_balance(-5_000);
        let outcome = store
            .conditional_update(&id, &predicate, &mutation)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            UpdateOutcome::Rejected(UpdateRejection::PredicateFailed(Condition::BalanceAtLeast(
                5_000
            )))
        );
        assert_eq!(store.find_account(&id).await.unwrap(), Some(before));

        let missing = store
            .conditional_update(&AccountId::new("ghost"), &predicate, &mutation)
            .await
            .unwrap();
        assert_eq!(missing, UpdateOutcome::NotFound);
    }

    #[tokio::test]
    async fn snapshot_round_trips_through_json() {
        let store = InMemoryAccountStore::new();
        for id in ["b", "a"] {
            store
                .create_account(&AccountId::new(id), AccountDefaults::default(), now())
                .await
                .unwrap();
        }
        store
            .conditional_update(
                &AccountId::new("a"),
                &Predicate::always(),
                &Mutation::new().adjust_balance(250),
            )
            .await
            .unwrap();

        let json = store.snapshot_json().unwrap();
        let restored = InMemoryAccountStore::restore_json(&json).unwrap();
        assert_eq!(restored.len(), 2);
        let a = restored.find_account(&AccountId::new("a")).await.unwrap().unwrap();
        assert_eq!(a.balance, 1_250);
    }
}
