use std::collections::BTreeMap;

use rand::Rng;

use crate::action::{
    ActionError, ActionKind, ActionOutcome, ActionPlanner, InventoryNeed, LootboxOutcome,
    OpenCount, PlanContext, Resolution,
};
use crate::env::OracleError;
use crate::probability::{roll_amount, select};
use crate::state::ItemKey;
use crate::update::{Change, Condition};

#[derive(Clone, Copy, Debug)]
pub struct OpenLootbox {
    pub fabled: bool,
    pub count: OpenCount,
}

impl OpenLootbox {
    fn item(&self) -> ItemKey {
        ItemKey::lootbox(self.fabled)
    }

    /// Boxes to open, capped at the per-request maximum.
    fn requested(&self, ctx: &PlanContext<'_>) -> u32 {
        let max = ctx.env.config().max_lootbox_open;
        match self.count {
            OpenCount::One => 1,
            OpenCount::Many(count) => count.min(max),
            OpenCount::All => ctx.account.inventory.count(&self.item()).min(max),
        }
    }
}

impl ActionPlanner for OpenLootbox {
    const KIND: ActionKind = ActionKind::OpenLootbox;

    fn check_inventory(&self, ctx: &PlanContext<'_>) -> Result<Vec<Condition>, ActionError> {
        let item = self.item();
        let available = ctx.account.inventory.count(&item);
        let requested = self.requested(ctx);
        if available == 0 || available < requested {
            return Err(ActionError::InsufficientInventory {
                need: InventoryNeed::Item(item),
                required: u64::from(requested.max(1)),
                available: u64::from(available),
            });
        }
        Ok(vec![Condition::InventoryAtLeast {
            item,
            count: requested,
        }])
    }

    fn check_guards(&self, ctx: &PlanContext<'_>) -> Result<(), ActionError> {
        if self.requested(ctx) == 0 {
            return Err(ActionError::invalid("must open at least one lootbox"));
        }
        Ok(())
    }

    fn resolve<R: Rng + ?Sized>(
        &self,
        ctx: &PlanContext<'_>,
        rng: &mut R,
    ) -> Result<Resolution, ActionError> {
        let rewards = ctx.env.tables()?.lootbox_rewards(self.fabled);
        let opened = self.requested(ctx);

        let mut gold = 0u64;
        let mut xp = 0u64;
        let mut tiers: BTreeMap<String, u32> = BTreeMap::new();
        for _ in 0..opened {
            let tier = select(rewards, rng).ok_or(OracleError::EmptyTable("lootbox"))?;
            gold = gold.saturating_add(roll_amount(tier.gold, rng));
            xp = xp.saturating_add(roll_amount(tier.xp, rng));
            *tiers.entry(tier.label.clone()).or_default() += 1;
        }

        let mut resolution = Resolution::new(ActionOutcome::OpenLootbox(LootboxOutcome {
            fabled: self.fabled,
            opened,
            tiers,
        }));
        resolution.reward = gold;
        resolution.xp = xp;
        resolution.changes.push(Change::AdjustInventory {
            item: self.item(),
            delta: -i64::from(opened),
        });
        Ok(resolution)
    }
}
