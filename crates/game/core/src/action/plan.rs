//! Precondition pipeline shared by every action kind.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::env::Env;
use crate::state::{Account, AccountId, ItemKey, QuestKind};
use crate::update::{Change, Condition, Mutation, Predicate};

use super::{ActionError, ActionKind, ActionOutcome};

/// Read-only inputs available while planning an action.
#[derive(Clone, Copy, Debug)]
pub struct PlanContext<'a> {
    pub account: &'a Account,
    /// Snapshot of the targeted player account, for gifts and player battles.
    pub counterpart: Option<&'a Account>,
    pub env: Env<'a>,
    pub now: DateTime<Utc>,
}

/// Items credited to another account after the action commits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub to: AccountId,
    pub item: ItemKey,
    pub count: u32,
}

/// What a planner drew, plus the extra predicate and mutation it needs.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub outcome: ActionOutcome,
    pub reward: u64,
    pub xp: u64,
    pub conditions: Vec<Condition>,
    pub changes: Vec<Change>,
    /// Quest progress to apply after commit; zero skips the quest update.
    pub quest_progress: u32,
    pub transfer: Option<Transfer>,
}

impl Resolution {
    pub fn new(outcome: ActionOutcome) -> Self {
        Self {
            outcome,
            reward: 0,
            xp: 0,
            conditions: Vec::new(),
            changes: Vec::new(),
            quest_progress: 0,
            transfer: None,
        }
    }
}

/// Per-kind rules. [`plan`] calls the hooks in precondition order and stops at
/// the first error.
pub trait ActionPlanner {
    const KIND: ActionKind;

    /// Currency debited when the action commits.
    fn cost(&self, _ctx: &PlanContext<'_>) -> Result<u64, ActionError> {
        Ok(0)
    }

    /// Verifies consumed or required inventory and returns the matching floors
    /// for the predicate.
    fn check_inventory(&self, _ctx: &PlanContext<'_>) -> Result<Vec<Condition>, ActionError> {
        Ok(Vec::new())
    }

    /// Domain guards: targets and parameter ranges.
    fn check_guards(&self, _ctx: &PlanContext<'_>) -> Result<(), ActionError> {
        Ok(())
    }

    /// Draws the outcome from the snapshot.
    fn resolve<R: Rng + ?Sized>(
        &self,
        ctx: &PlanContext<'_>,
        rng: &mut R,
    ) -> Result<Resolution, ActionError>;
}

/// Everything the resolver needs to commit an action in one conditional update.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionPlan {
    pub kind: ActionKind,
    pub cost: u64,
    pub reward: u64,
    pub xp: u64,
    pub outcome: ActionOutcome,
    pub predicate: Predicate,
    pub mutation: Mutation,
    pub quest_progress: Option<(QuestKind, u32)>,
    pub transfer: Option<Transfer>,
}

/// Runs the precondition pipeline for one planner:
/// cooldown, cost, inventory, guards, then the draw.
pub fn plan_with<P, R>(
    planner: &P,
    ctx: &PlanContext<'_>,
    rng: &mut R,
) -> Result<ActionPlan, ActionError>
where
    P: ActionPlanner,
    R: Rng + ?Sized,
{
    let kind = P::KIND;
    let account = ctx.account;
    let window = ctx.env.config().cooldowns.window(kind);
    let last = account.last_action(kind);

    if let Some(last) = last {
        let elapsed = ctx.now - last;
        if elapsed < window {
            let remaining = (window - elapsed).to_std().unwrap_or_default();
            return Err(ActionError::OnCooldown { kind, remaining });
        }
    }

    let cost = planner.cost(ctx)?;
    if account.balance < cost {
        return Err(ActionError::InsufficientFunds {
            required: cost,
            available: account.balance,
        });
    }

    let floors = planner.check_inventory(ctx)?;
    planner.check_guards(ctx)?;

    let resolution = planner.resolve(ctx, rng)?;
    let delta = i64::try_from(i128::from(resolution.reward) - i128::from(cost))
        .map_err(|_| ActionError::invalid("balance change out of range"))?;

    let predicate = Predicate::always()
        .balance_at_least(cost)
        .cooldown_elapsed(kind, ctx.now, window, last)
        .extend(floors)
        .extend(resolution.conditions);
    let mutation = Mutation::new()
        .adjust_balance(delta)
        .set_last_action(kind, ctx.now)
        .extend(resolution.changes);

    let quest_progress = kind
        .quest_kind()
        .filter(|_| resolution.quest_progress > 0)
        .map(|quest| (quest, resolution.quest_progress));

    Ok(ActionPlan {
        kind,
        cost,
        reward: resolution.reward,
        xp: resolution.xp,
        outcome: resolution.outcome,
        predicate,
        mutation,
        quest_progress,
        transfer: resolution.transfer,
    })
}

/// Fails with `InsufficientInventory` unless the account holds any creature.
pub(crate) fn require_creatures(account: &Account) -> Result<Vec<Condition>, ActionError> {
    if account.inventory.has_creatures() {
        Ok(vec![Condition::CreaturesAtLeast(1)])
    } else {
        Err(ActionError::InsufficientInventory {
            need: super::InventoryNeed::Creatures,
            required: 1,
            available: 0,
        })
    }
}
