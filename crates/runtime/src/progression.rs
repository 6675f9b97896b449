//! Experience and level updates applied after an action or claim commits.

use economy_core::progression::{compute, to_update};
use economy_core::{AccountId, LevelChange, LevelCurve, UpdateRejection};
use tracing::debug;

use crate::api::ProgressionError;
use crate::repository::{TimedStore, UpdateOutcome};

/// Level change plus the balance observed right after it was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressionOutcome {
    pub change: LevelChange,
    pub balance: u64,
}

/// Applies experience deltas with a compare-and-swap on the experience value.
///
/// A concurrent writer that changes experience makes the swap fail; the
/// aggregator then re-reads and retries a bounded number of times.
#[derive(Clone)]
pub struct ProgressionAggregator {
    store: TimedStore,
    curve: LevelCurve,
    reward_per_level: u64,
    max_attempts: u32,
}

impl ProgressionAggregator {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    pub fn new(store: TimedStore, curve: LevelCurve, reward_per_level: u64) -> Self {
        Self {
            store,
            curve,
            reward_per_level,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn curve(&self) -> &LevelCurve {
        &self.curve
    }

    /// Adds `xp_delta` to the account and raises its level when a threshold is
    /// crossed, crediting the level-up reward in the same update.
    pub async fn apply(
        &self,
        id: &AccountId,
        xp_delta: u64,
    ) -> Result<ProgressionOutcome, ProgressionError> {
        for attempt in 1..=self.max_attempts {
            let account = self
                .store
                .find_account(id)
                .await?
                .ok_or_else(|| ProgressionError::AccountNotFound(id.clone()))?;
            if xp_delta == 0 {
                return Ok(ProgressionOutcome {
                    change: LevelChange::unchanged(&account),
                    balance: account.balance,
                });
            }

            let change = compute(&account, xp_delta, &self.curve, self.reward_per_level);
            let (predicate, mutation) = to_update(&account, &change);
            match self
                .store
                .conditional_update(id, &predicate, &mutation)
                .await?
            {
                UpdateOutcome::Applied(updated) => {
                    if change.leveled_up {
                        debug!(
                            target: "runtime::progression",
                            account = %id,
                            level = change.new_level,
                            reward = change.reward,
                            "Level up"
                        );
                    }
                    return Ok(ProgressionOutcome {
                        change,
                        balance: updated.balance,
                    });
                }
                UpdateOutcome::Rejected(UpdateRejection::PredicateFailed(_)) => {
                    debug!(
                        target: "runtime::progression",
                        account = %id,
                        attempt,
                        "Experience changed concurrently, retrying"
                    );
                }
                UpdateOutcome::Rejected(rejection) => {
                    return Err(ProgressionError::Rejected(rejection));
                }
                UpdateOutcome::NotFound => {
                    return Err(ProgressionError::AccountNotFound(id.clone()));
                }
            }
        }
        Err(ProgressionError::Contended {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use economy_core::AccountDefaults;

    use super::*;
    use crate::repository::InMemoryAccountStore;

    async fn setup() -> (ProgressionAggregator, AccountId) {
        let store = TimedStore::new(Arc::new(InMemoryAccountStore::new()), Duration::from_secs(1));
        let id = AccountId::new("p1");
        store
            .create_account(
                &id,
                AccountDefaults::default(),
                Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap(),
            )
            .await
            .unwrap();
        (ProgressionAggregator::new(store, LevelCurve::new(100), 100), id)
    }

    #[tokio::test]
    async fn crossing_a_threshold_pays_the_level_reward() {
        let (progression, id) = setup().await;

        let small = progression.apply(&id, 60).await.unwrap();
        assert!(!small.change.leveled_up);
        assert_eq!(small.balance, 1_000);

        let up = progression.apply(&id, 40).await.unwrap();
        assert!(up.change.leveled_up);
        assert_eq!(up.change.new_level, 2);
        assert_eq!(up.change.reward, 200);
        assert_eq!(up.balance, 1_200);
    }

    #[tokio::test]
    async fn concurrent_deltas_are_all_counted() {
        let (progression, id) = setup().await;

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let progression = progression.clone().with_max_attempts(50);
                let id = id.clone();
                tokio::spawn(async move { progression.apply(&id, 10).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let account = progression.store.find_account(&id).await.unwrap().unwrap();
        assert_eq!(account.experience, 40);
    }

    #[tokio::test]
    async fn missing_account_is_reported() {
        let (progression, _) = setup().await;
        let err = progression.apply(&AccountId::new("ghost"), 5).await.unwrap_err();
        assert_eq!(err, ProgressionError::AccountNotFound(AccountId::new("ghost")));
    }
}
