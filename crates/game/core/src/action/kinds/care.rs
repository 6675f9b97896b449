//! Feeding and playing with the collection.
//!
//! Both share one happiness meter that decays linearly since the last time the
//! collection was cared for, and both stamp that time when they commit.

use rand::Rng;

use crate::action::plan::require_creatures;
use crate::action::{
    ActionError, ActionKind, ActionOutcome, ActionPlanner, FeedOutcome, InventoryNeed, PlanContext,
    PlayOutcome, Resolution,
};
use crate::config::EconomyConfig;
use crate::env::{FoodKind, FoodProfile, OracleError};
use crate::probability::{RewardFactors, Weighted, scale_reward, select};
use crate::state::{CreatureRef, PetCare};
use crate::update::{Change, Condition};

/// Creature copies counted when choosing a favourite; more do not raise the odds.
const MAX_FAVOURITE_WEIGHT: u32 = 5;

fn cared(happiness: u8, gain: u64, ctx: &PlanContext<'_>) -> PetCare {
    let raised = u64::from(happiness).saturating_add(gain);
    PetCare {
        happiness: raised.min(u64::from(EconomyConfig::MAX_HAPPINESS)) as u8,
        last_cared_at: Some(ctx.now),
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Feed {
    pub food: FoodKind,
}

impl Feed {
    fn profile(&self, ctx: &PlanContext<'_>) -> Result<FoodProfile, ActionError> {
        ctx.env
            .tables()?
            .food(self.food)
            .ok_or(ActionError::Oracle(OracleError::EmptyTable("foods")))
    }
}

impl ActionPlanner for Feed {
    const KIND: ActionKind = ActionKind::Feed;

    fn cost(&self, ctx: &PlanContext<'_>) -> Result<u64, ActionError> {
        Ok(self.profile(ctx)?.price)
    }

    fn check_inventory(&self, ctx: &PlanContext<'_>) -> Result<Vec<Condition>, ActionError> {
        require_creatures(ctx.account)
    }

    fn resolve<R: Rng + ?Sized>(
        &self,
        ctx: &PlanContext<'_>,
        _rng: &mut R,
    ) -> Result<Resolution, ActionError> {
        let food = self.profile(ctx)?;
        let before = ctx
            .account
            .pet
            .decayed(ctx.now, ctx.env.config().feed_decay_per_hour);
        let pet = cared(before, u64::from(food.happiness), ctx);

        let mut resolution = Resolution::new(ActionOutcome::Feed(FeedOutcome {
            food: self.food,
            happiness_before: before,
            happiness: pet.happiness,
        }));
        resolution.xp = food.xp;
        resolution.changes.push(Change::SetPet(pet));
        resolution.quest_progress = 1;
        Ok(resolution)
    }
}

struct Candidate<'a> {
    creature: &'a CreatureRef,
    weight: u32,
}

impl Weighted for Candidate<'_> {
    fn weight(&self) -> f64 {
        f64::from(self.weight)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Play;

impl ActionPlanner for Play {
    const KIND: ActionKind = ActionKind::Play;

    fn check_inventory(&self, ctx: &PlanContext<'_>) -> Result<Vec<Condition>, ActionError> {
        require_creatures(ctx.account)
    }

    fn resolve<R: Rng + ?Sized>(
        &self,
        ctx: &PlanContext<'_>,
        rng: &mut R,
    ) -> Result<Resolution, ActionError> {
        let tables = ctx.env.tables()?;

        let candidates: Vec<Candidate<'_>> = ctx
            .account
            .inventory
            .creatures()
            .map(|(creature, count)| Candidate {
                creature,
                weight: count.min(MAX_FAVOURITE_WEIGHT),
            })
            .collect();
        let favourite = select(&candidates, rng)
            .map(|candidate| candidate.creature.clone())
            .ok_or(ActionError::InsufficientInventory {
                need: InventoryNeed::Creatures,
                required: 1,
                available: 0,
            })?;

        let activities = tables.play_activities();
        if activities.is_empty() {
            return Err(OracleError::EmptyTable("play_activities").into());
        }
        let activity = &activities[rng.gen_range(0..activities.len())];

        let factors = RewardFactors::rarity(tables.play_multipliers().get(favourite.rarity));
        let gain = scale_reward(u64::from(activity.happiness), &factors, rng);
        let xp = scale_reward(activity.xp, &factors, rng);
        let gold = scale_reward(activity.gold, &factors, rng);

        let before = ctx
            .account
            .pet
            .decayed(ctx.now, ctx.env.config().play_decay_per_hour);
        let pet = cared(before, gain, ctx);

        let mut resolution = Resolution::new(ActionOutcome::Play(PlayOutcome {
            favourite,
            activity: activity.name.clone(),
            happiness: pet.happiness,
        }));
        resolution.reward = gold;
        resolution.xp = xp;
        resolution.changes.push(Change::SetPet(pet));
        resolution.quest_progress = 1;
        Ok(resolution)
    }
}
