//! Action resolution: snapshot, plan, one conditional update, side effects.

use std::sync::Arc;

use economy_core::action::Transfer;
use economy_core::{
    Account, AccountDefaults, AccountId, ActionPlan, ActionRequest, Mutation, PlanContext,
    Predicate, UpdateRejection, plan,
};
use tracing::{debug, error, warn};

use crate::api::{ActionResult, ResolveError, StoreError};
use crate::clock::Clock;
use crate::hooks::{HookContext, HookRegistry};
use crate::oracle::OracleManager;
use crate::progression::ProgressionAggregator;
use crate::repository::{TimedStore, UpdateOutcome};
use crate::rng::RngSource;

/// Resolves action requests against the account store.
///
/// Every precondition is checked against a snapshot before anything is written;
/// the action itself is committed by exactly one conditional update. A rejected
/// update surfaces as [`ResolveError::RaceLost`] when its predicate no longer
/// held, or [`ResolveError::Rejected`] otherwise, and is never retried here.
#[derive(Clone)]
pub struct ActionResolver {
    store: TimedStore,
    oracles: OracleManager,
    clock: Arc<dyn Clock>,
    rng: RngSource,
    progression: Arc<ProgressionAggregator>,
    hooks: HookRegistry,
}

impl ActionResolver {
    pub fn new(
        store: TimedStore,
        oracles: OracleManager,
        clock: Arc<dyn Clock>,
        rng: RngSource,
        progression: Arc<ProgressionAggregator>,
        hooks: HookRegistry,
    ) -> Self {
        Self {
            store,
            oracles,
            clock,
            rng,
            progression,
            hooks,
        }
    }

    pub async fn resolve(&self, request: &ActionRequest) -> Result<ActionResult, ResolveError> {
        let now = self.clock.now();
        let id = &request.account_id;
        let kind = request.kind();

        let account = self.load_or_enroll(request).await?;
        let counterpart = self.load_counterpart(request).await?;

        let ctx = PlanContext {
            account: &account,
            counterpart: counterpart.as_ref(),
            env: self.oracles.as_env(),
            now,
        };
        let mut rng = self.rng.for_action(id, kind, now);
        let plan = plan(&request.params, &ctx, &mut rng)?;

        let committed = match self
            .store
            .conditional_update(id, &plan.predicate, &plan.mutation)
            .await?
        {
            UpdateOutcome::Applied(account) => account,
            UpdateOutcome::Rejected(reason) => {
                debug!(
                    target: "runtime::resolver",
                    account = %id,
                    action = %kind,
                    reason = %reason,
                    "Conditional update rejected"
                );
                return Err(match reason {
                    UpdateRejection::PredicateFailed(_) => ResolveError::RaceLost { kind, reason },
                    reason => ResolveError::Rejected { kind, reason },
                });
            }
            UpdateOutcome::NotFound => return Err(ResolveError::AccountNotFound(id.clone())),
        };
        debug!(
            target: "runtime::resolver",
            account = %id,
            action = %kind,
            cost = plan.cost,
            reward = plan.reward,
            "Action committed"
        );

        if let Some(transfer) = &plan.transfer {
            self.deliver(id, transfer).await?;
        }

        let mut result = ActionResult {
            kind,
            outcome: plan.outcome.clone(),
            cost: plan.cost,
            reward: plan.reward,
            xp_gained: plan.xp,
            new_balance: committed.balance,
            new_level: committed.level,
            leveled_up: false,
            level_up_reward: 0,
        };
        self.apply_progression(id, &plan, &mut result).await;

        self.hooks
            .execute_hooks(&HookContext {
                request,
                plan: &plan,
                account: &committed,
                now,
            })
            .await;

        Ok(result)
    }

    /// Existing account, or a fresh one for kinds anyone may start with.
    async fn load_or_enroll(&self, request: &ActionRequest) -> Result<Account, ResolveError> {
        let id = &request.account_id;
        if let Some(account) = self.store.find_account(id).await? {
            return Ok(account);
        }
        if !request.kind().open_enrollment() {
            return Err(ResolveError::AccountNotFound(id.clone()));
        }
        debug!(target: "runtime::resolver", account = %id, "Enrolling new account");
        Ok(self
            .store
            .create_account(id, self.defaults(), self.clock.now())
            .await?)
    }

    /// Read-only snapshot of a targeted player, if the request names one.
    async fn load_counterpart(
        &self,
        request: &ActionRequest,
    ) -> Result<Option<Account>, StoreError> {
        match request.params.counterpart() {
            Some(target) if !target.is_bot && target.account_id != request.account_id => {
                self.store.find_account(&target.account_id).await
            }
            _ => Ok(None),
        }
    }

    /// Credits transferred items to the receiver, creating it when needed.
    /// If crediting fails the items go back to the giver.
    async fn deliver(&self, from: &AccountId, transfer: &Transfer) -> Result<(), ResolveError> {
        let credit = Mutation::new()
            .adjust_inventory(transfer.item.clone(), i64::from(transfer.count));
        let delivered = self.credit_receiver(transfer, &credit).await;

        let Err(source) = delivered else {
            return Ok(());
        };
        warn!(
            target: "runtime::resolver",
            account = %from,
            receiver = %transfer.to,
            error = ?source,
            "Gift delivery failed, refunding giver"
        );
        let refund = self
            .store
            .conditional_update(from, &Predicate::always(), &credit)
            .await;
        if !matches!(refund, Ok(UpdateOutcome::Applied(_))) {
            error!(
                target: "runtime::resolver",
                account = %from,
                item = %transfer.item,
                count = transfer.count,
                refund = ?refund,
                "Gift refund failed"
            );
        }
        Err(ResolveError::TransferFailed {
            to: transfer.to.clone(),
            source,
        })
    }

    async fn credit_receiver(
        &self,
        transfer: &Transfer,
        credit: &Mutation,
    ) -> Result<(), StoreError> {
        self.store
            .create_account(&transfer.to, self.defaults(), self.clock.now())
            .await?;
        match self
            .store
            .conditional_update(&transfer.to, &Predicate::always(), credit)
            .await?
        {
            UpdateOutcome::Applied(_) => Ok(()),
            UpdateOutcome::Rejected(reason) => Err(StoreError::Unavailable(format!(
                "receiver update rejected: {reason}"
            ))),
            UpdateOutcome::NotFound => Err(StoreError::Unavailable(format!(
                "receiver {} disappeared",
                transfer.to
            ))),
        }
    }

    /// Best effort: a failure is logged and the committed result is kept.
    async fn apply_progression(
        &self,
        id: &AccountId,
        plan: &ActionPlan,
        result: &mut ActionResult,
    ) {
        if plan.xp == 0 {
            return;
        }
        match self.progression.apply(id, plan.xp).await {
            Ok(progression) => {
                result.new_balance = progression.balance;
                result.new_level = progression.change.new_level;
                result.leveled_up = progression.change.leveled_up;
                result.level_up_reward = progression.change.reward;
            }
            Err(e) => error!(
                target: "runtime::progression",
                account = %id,
                action = %plan.kind,
                xp = plan.xp,
                error = ?e,
                "Experience was not applied"
            ),
        }
    }

    fn defaults(&self) -> AccountDefaults {
        AccountDefaults::from_config(self.oracles.config())
    }
}
