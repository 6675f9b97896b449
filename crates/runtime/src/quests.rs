//! Quest boards: lazy regeneration, progress and claims.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use economy_core::{
    Account, AccountId, Change, ClaimError, Condition, Mutation, Predicate, QuestId, QuestKind,
    plan_refresh,
};
use tracing::{debug, warn};

use crate::api::{QuestClaim, QuestError, QuestView};
use crate::oracle::OracleManager;
use crate::progression::ProgressionAggregator;
use crate::repository::{TimedStore, UpdateOutcome};
use crate::rng::RngSource;

/// Maintains the daily and weekly boards of each account.
#[derive(Clone)]
pub struct QuestTracker {
    store: TimedStore,
    oracles: OracleManager,
    progression: Arc<ProgressionAggregator>,
    rng: RngSource,
}

impl QuestTracker {
    pub fn new(
        store: TimedStore,
        oracles: OracleManager,
        progression: Arc<ProgressionAggregator>,
        rng: RngSource,
    ) -> Self {
        Self {
            store,
            oracles,
            progression,
            rng,
        }
    }

    async fn load(&self, id: &AccountId) -> Result<Account, QuestError> {
        self.store
            .find_account(id)
            .await?
            .ok_or_else(|| QuestError::AccountNotFound(id.clone()))
    }

    /// Regenerates every board whose period is over and returns the account.
    ///
    /// Idempotent within a period. When another task regenerated first, its
    /// boards are kept and returned.
    pub async fn ensure_current_period(
        &self,
        id: &AccountId,
        now: DateTime<Utc>,
    ) -> Result<Account, QuestError> {
        let account = self.load(id).await?;
        let mut rng = self.rng.for_quests(id, now);
        let refresh = plan_refresh(&account, self.oracles.quests(), now, &mut rng);
        if refresh.is_empty() {
            return Ok(account);
        }

        let (predicate, mutation) = refresh.to_update();
        match self
            .store
            .conditional_update(id, &predicate, &mutation)
            .await?
        {
            UpdateOutcome::Applied(updated) => {
                debug!(
                    target: "runtime::quests",
                    account = %id,
                    daily = refresh.daily.is_some(),
                    weekly = refresh.weekly.is_some(),
                    "Regenerated quest boards"
                );
                Ok(updated)
            }
            UpdateOutcome::Rejected(_) => self.load(id).await,
            UpdateOutcome::NotFound => Err(QuestError::AccountNotFound(id.clone())),
        }
    }

    /// Live boards for the account, regenerating stale ones first.
    pub async fn get_quests(
        &self,
        id: &AccountId,
        now: DateTime<Utc>,
    ) -> Result<QuestView, QuestError> {
        let account = self.ensure_current_period(id, now).await?;
        Ok(QuestView {
            daily: account.daily_quests.quests.to_vec(),
            weekly: account.weekly_quests.quests.to_vec(),
        })
    }

    /// Adds `amount` progress to every live quest of `kind`.
    ///
    /// Never regenerates boards; quests on a board from an earlier period are
    /// left alone.
    pub async fn advance(
        &self,
        id: &AccountId,
        kind: QuestKind,
        amount: u32,
        now: DateTime<Utc>,
    ) -> Result<(), QuestError> {
        if amount == 0 {
            return Ok(());
        }
        let mutation = Mutation::new().with(Change::AdvanceQuests { kind, amount, now });
        match self
            .store
            .conditional_update(id, &Predicate::always(), &mutation)
            .await?
        {
            UpdateOutcome::Applied(_) => Ok(()),
            UpdateOutcome::Rejected(rejection) => Err(QuestError::Rejected(rejection)),
            UpdateOutcome::NotFound => Err(QuestError::AccountNotFound(id.clone())),
        }
    }

    /// Marks a completed quest claimed and pays its reward.
    ///
    /// Only quests on a board of the current period can be claimed; anything
    /// left on a board from an earlier period is reported as not found. The
    /// currency is credited in the same update that marks the claim; the
    /// experience goes through the progression aggregator afterwards.
    pub async fn claim_quest(
        &self,
        id: &AccountId,
        quest_id: &QuestId,
        now: DateTime<Utc>,
    ) -> Result<QuestClaim, QuestError> {
        let account = self.load(id).await?;
        let quest = account
            .find_live_quest(quest_id, now)
            .ok_or_else(|| ClaimError::NotFound(quest_id.clone()))?;
        quest.check_claimable()?;
        let reward = quest.reward;

        let predicate = Predicate::always()
            .with(Condition::QuestMarkerIs {
                period: quest.period,
                marker: account.quest_marker(quest.period),
            })
            .with(Condition::QuestClaimable(quest_id.clone()));
        let mutation = Mutation::new()
            .with(Change::ClaimQuest(quest_id.clone()))
            .adjust_balance(i64::try_from(reward.currency).unwrap_or(i64::MAX));

        let claimed = match self
            .store
            .conditional_update(id, &predicate, &mutation)
            .await?
        {
            UpdateOutcome::Applied(updated) => updated,
            UpdateOutcome::Rejected(reason) => {
                // Report what a fresh read shows, e.g. a concurrent claim.
                let current = self.load(id).await?;
                return Err(match current.find_live_quest(quest_id, now) {
                    None => ClaimError::NotFound(quest_id.clone()).into(),
                    Some(quest) => match quest.check_claimable() {
                        Err(claim) => claim.into(),
                        Ok(()) => QuestError::RaceLost {
                            id: quest_id.clone(),
                            reason,
                        },
                    },
                });
            }
            UpdateOutcome::NotFound => return Err(QuestError::AccountNotFound(id.clone())),
        };

        let mut result = QuestClaim {
            quest_id: quest_id.clone(),
            reward,
            new_balance: claimed.balance,
            new_level: claimed.level,
            leveled_up: false,
        };
        match self.progression.apply(id, reward.xp).await {
            Ok(progression) => {
                result.new_balance = progression.balance;
                result.new_level = progression.change.new_level;
                result.leveled_up = progression.change.leveled_up;
            }
            Err(error) => warn!(
                target: "runtime::quests",
                account = %id,
                quest = %quest_id,
                error = ?error,
                "Quest experience was not applied"
            ),
        }
        Ok(result)
    }
}
