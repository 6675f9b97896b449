use rand::Rng;

use crate::action::{
    ActionError, ActionKind, ActionOutcome, ActionPlanner, GiftOutcome, InventoryNeed, PlanContext,
    Resolution, Target, TargetError, Transfer,
};
use crate::state::{CreatureRef, ItemKey};
use crate::update::{Change, Condition};

/// Gift creatures to another player.
///
/// Only the giver's side is part of the conditional update; the receiver is
/// credited through [`Transfer`] after the giver commits.
#[derive(Clone, Copy, Debug)]
pub struct Give<'a> {
    pub target: &'a Target,
    pub creature: &'a CreatureRef,
    pub amount: u32,
}

impl Give<'_> {
    fn item(&self) -> ItemKey {
        ItemKey::Creature(self.creature.clone())
    }
}

impl ActionPlanner for Give<'_> {
    const KIND: ActionKind = ActionKind::Give;

    fn check_inventory(&self, ctx: &PlanContext<'_>) -> Result<Vec<Condition>, ActionError> {
        let item = self.item();
        let available = ctx.account.inventory.count(&item);
        if available < self.amount {
            return Err(ActionError::InsufficientInventory {
                need: InventoryNeed::Item(item),
                required: u64::from(self.amount),
                available: u64::from(available),
            });
        }
        Ok(vec![Condition::InventoryAtLeast {
            item,
            count: self.amount,
        }])
    }

    fn check_guards(&self, ctx: &PlanContext<'_>) -> Result<(), ActionError> {
        let config = ctx.env.config();
        if self.target.account_id == ctx.account.id {
            return Err(TargetError::SelfTarget.into());
        }
        if self.target.is_bot {
            return Err(TargetError::Bot.into());
        }
        if !(1..=config.max_gift_amount).contains(&self.amount) {
            return Err(ActionError::invalid(format!(
                "gift amount must be between 1 and {}",
                config.max_gift_amount
            )));
        }
        if ctx.account.gifts.sent_on(ctx.now.date_naive()) >= config.max_gifts_per_day {
            return Err(ActionError::invalid(format!(
                "daily limit of {} gifts reached",
                config.max_gifts_per_day
            )));
        }
        Ok(())
    }

    fn resolve<R: Rng + ?Sized>(
        &self,
        ctx: &PlanContext<'_>,
        _rng: &mut R,
    ) -> Result<Resolution, ActionError> {
        let day = ctx.now.date_naive();
        let item = self.item();

        let mut resolution = Resolution::new(ActionOutcome::Give(GiftOutcome {
            to: self.target.account_id.clone(),
            creature: self.creature.clone(),
            amount: self.amount,
            sent_today: ctx.account.gifts.sent_on(day) + 1,
        }));
        resolution.conditions.push(Condition::GiftsBelow {
            day,
            limit: ctx.env.config().max_gifts_per_day,
        });
        resolution.changes.push(Change::AdjustInventory {
            item: item.clone(),
            delta: -i64::from(self.amount),
        });
        resolution.changes.push(Change::RecordGift { day });
        resolution.transfer = Some(Transfer {
            to: self.target.account_id.clone(),
            item,
            count: self.amount,
        });
        Ok(resolution)
    }
}
