//! Store contract for persisted accounts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use economy_core::{Account, AccountDefaults, AccountId, Mutation, Predicate, UpdateRejection};

use super::Result;

/// Result of a conditional update.
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateOutcome {
    /// The predicate held and the mutation was written; carries the new account.
    Applied(Account),
    /// The stored account failed the predicate or the mutation; nothing was written.
    Rejected(UpdateRejection),
    NotFound,
}

/// Durable key-value store of accounts.
///
/// The only write path for existing accounts is [`AccountStore::conditional_update`],
/// which must evaluate the predicate and apply the mutation as one atomic step
/// with respect to every other update of the same account.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_account(&self, id: &AccountId) -> Result<Option<Account>>;

    async fn conditional_update(
        &self,
        id: &AccountId,
        predicate: &Predicate,
        mutation: &Mutation,
    ) -> Result<UpdateOutcome>;

    /// Inserts a fresh account, or returns the stored one when it already exists.
    async fn create_account(
        &self,
        id: &AccountId,
        defaults: AccountDefaults,
        now: DateTime<Utc>,
    ) -> Result<Account>;
}
