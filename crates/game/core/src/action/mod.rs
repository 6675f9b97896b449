//! Action domain.
//!
//! An [`ActionRequest`] is turned into an [`ActionPlan`] by [`plan`]: the
//! preconditions are checked against a snapshot of the account in a fixed order
//! (cooldown, cost, inventory, domain guards), the outcome is drawn, and the
//! whole effect is expressed as one [`crate::update::Predicate`] plus one
//! [`crate::update::Mutation`] for the store to apply atomically.
//!
//! # Module Structure
//!
//! - `kind`: [`ActionKind`] and its static properties
//! - `params`: request types
//! - `error`: precondition errors
//! - `outcome`: drawn results reported to callers
//! - `plan`: the [`ActionPlanner`] hooks and the shared pipeline
//! - `kinds`: one planner per action kind
mod error;
mod kind;
pub mod kinds;
mod outcome;
mod params;
mod plan;

pub use error::{ActionError, InventoryNeed, TargetError};
pub use kind::ActionKind;
pub use outcome::{
    ActionOutcome, BattleOutcome, DiceOutcome, FeedOutcome, GiftOutcome, HuntOutcome,
    LootboxDrop, LootboxOutcome, PlayOutcome, SaleOutcome, WheelOutcome,
};
pub use params::{ActionParams, ActionRequest, OpenCount, Target};
pub use plan::{ActionPlan, ActionPlanner, PlanContext, Resolution, Transfer, plan_with};

use rand::Rng;

/// Plans `params` against the snapshot in `ctx`.
///
/// # Errors
///
/// Returns the first failed precondition; nothing has been written when this
/// fails.
pub fn plan<R: Rng + ?Sized>(
    params: &ActionParams,
    ctx: &PlanContext<'_>,
    rng: &mut R,
) -> Result<ActionPlan, ActionError> {
    match params {
        ActionParams::Hunt => plan_with(&kinds::Hunt, ctx, rng),
        ActionParams::Battle { opponent } => plan_with(
            &kinds::Battle {
                opponent: opponent.as_ref(),
            },
            ctx,
            rng,
        ),
        ActionParams::Feed { food } => plan_with(&kinds::Feed { food: *food }, ctx, rng),
        ActionParams::Play => plan_with(&kinds::Play, ctx, rng),
        ActionParams::Dice { bet, prediction } => plan_with(
            &kinds::Dice {
                bet: *bet,
                prediction: *prediction,
            },
            ctx,
            rng,
        ),
        ActionParams::Wheel { bet } => plan_with(&kinds::Wheel { bet: *bet }, ctx, rng),
        ActionParams::Give {
            target,
            creature,
            amount,
        } => plan_with(
            &kinds::Give {
                target,
                creature,
                amount: *amount,
            },
            ctx,
            rng,
        ),
        ActionParams::Sell { rarity, amount } => plan_with(
            &kinds::Sell {
                rarity: *rarity,
                amount: *amount,
            },
            ctx,
            rng,
        ),
        ActionParams::OpenLootbox { fabled, count } => plan_with(
            &kinds::OpenLootbox {
                fabled: *fabled,
                count: *count,
            },
            ctx,
            rng,
        ),
    }
}
