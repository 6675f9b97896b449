//! Deadline wrapper applied to every store call made by the runtime.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use economy_core::{Account, AccountDefaults, AccountId, Mutation, Predicate};

use super::{AccountStore, Result, StoreError, UpdateOutcome};

/// Shared store handle whose calls fail with [`StoreError::Timeout`] past the deadline.
///
/// Timed-out calls are never retried here; whether to resubmit is the caller's call.
#[derive(Clone)]
pub struct TimedStore {
    inner: Arc<dyn AccountStore>,
    timeout: Duration,
}

impl TimedStore {
    pub fn new(inner: Arc<dyn AccountStore>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn inner(&self) -> &Arc<dyn AccountStore> {
        &self.inner
    }

    async fn bounded<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))?
    }

    pub async fn find_account(&self, id: &AccountId) -> Result<Option<Account>> {
        self.bounded(self.inner.find_account(id)).await
    }

    pub async fn conditional_update(
        &self,
        id: &AccountId,
        predicate: &Predicate,
        mutation: &Mutation,
    ) -> Result<UpdateOutcome> {
        self.bounded(self.inner.conditional_update(id, predicate, mutation))
            .await
    }

    pub async fn create_account(
        &self,
        id: &AccountId,
        defaults: AccountDefaults,
        now: DateTime<Utc>,
    ) -> Result<Account> {
        self.bounded(self.inner.create_account(id, defaults, now))
            .await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    struct StalledStore;

    #[async_trait]
    impl AccountStore for StalledStore {
        async fn find_account(&self, _id: &AccountId) -> Result<Option<Account>> {
            std::future::pending().await
        }

        async fn conditional_update(
            &self,
            _id: &AccountId,
            _predicate: &Predicate,
            _mutation: &Mutation,
        ) -> Result<UpdateOutcome> {
            std::future::pending().await
        }

        async fn create_account(
            &self,
            _id: &AccountId,
            _defaults: AccountDefaults,
            _now: DateTime<Utc>,
        ) -> Result<Account> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn stalled_call_times_out() {
        let store = TimedStore::new(Arc::new(StalledStore), Duration::from_millis(50));
        let err = store.find_account(&AccountId::new("p1")).await.unwrap_err();
        assert_eq!(err, StoreError::Timeout(Duration::from_millis(50)));
    }
}
