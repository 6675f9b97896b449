use rand::Rng;

use crate::action::{
    ActionError, ActionKind, ActionOutcome, ActionPlanner, InventoryNeed, PlanContext, Resolution,
    SaleOutcome,
};
use crate::state::{CreatureRef, ItemKey, Rarity};
use crate::update::{Change, Condition};

/// Sell creatures of one tier for their catalog value.
#[derive(Clone, Copy, Debug)]
pub struct Sell {
    pub rarity: Rarity,
    /// Everything of the tier when `None`.
    pub amount: Option<u32>,
}

impl Sell {
    /// Creatures picked for sale in inventory order, up to the requested amount.
    fn selection(&self, ctx: &PlanContext<'_>) -> Vec<(CreatureRef, u32)> {
        let mut remaining = self.amount.unwrap_or(u32::MAX);
        let mut sold = Vec::new();
        for (creature, count) in ctx.account.inventory.creatures_of(self.rarity) {
            if remaining == 0 {
                break;
            }
            let take = count.min(remaining);
            remaining -= take;
            sold.push((creature.clone(), take));
        }
        sold
    }
}

impl ActionPlanner for Sell {
    const KIND: ActionKind = ActionKind::Sell;

    fn check_inventory(&self, ctx: &PlanContext<'_>) -> Result<Vec<Condition>, ActionError> {
        let available: u64 = ctx
            .account
            .inventory
            .creatures_of(self.rarity)
            .map(|(_, count)| u64::from(count))
            .sum();
        if available == 0 {
            return Err(ActionError::InsufficientInventory {
                need: InventoryNeed::CreaturesOf(self.rarity),
                required: u64::from(self.amount.unwrap_or(1).max(1)),
                available,
            });
        }
        Ok(self
            .selection(ctx)
            .into_iter()
            .map(|(creature, count)| Condition::InventoryAtLeast {
                item: ItemKey::Creature(creature),
                count,
            })
            .collect())
    }

    fn check_guards(&self, _ctx: &PlanContext<'_>) -> Result<(), ActionError> {
        if self.amount == Some(0) {
            return Err(ActionError::invalid("sell amount must be positive"));
        }
        Ok(())
    }

    fn resolve<R: Rng + ?Sized>(
        &self,
        ctx: &PlanContext<'_>,
        _rng: &mut R,
    ) -> Result<Resolution, ActionError> {
        let creatures = ctx.env.creatures()?;
        let sold = self.selection(ctx);

        let gold = sold.iter().fold(0u64, |total, (creature, count)| {
            total.saturating_add(creatures.value_of(creature).saturating_mul(u64::from(*count)))
        });
        let changes: Vec<Change> = sold
            .iter()
            .map(|(creature, count)| Change::AdjustInventory {
                item: ItemKey::Creature(creature.clone()),
                delta: -i64::from(*count),
            })
            .collect();

        let mut resolution = Resolution::new(ActionOutcome::Sell(SaleOutcome {
            rarity: self.rarity,
            sold,
        }));
        resolution.changes = changes;
        resolution.reward = gold;
        resolution.xp = (gold as f64 * ctx.env.config().sell_xp_ratio).floor() as u64;
        Ok(resolution)
    }
}
