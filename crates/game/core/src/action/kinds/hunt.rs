use rand::Rng;

use crate::action::{
    ActionError, ActionKind, ActionOutcome, ActionPlanner, HuntOutcome, LootboxDrop, PlanContext,
    Resolution,
};
use crate::probability::{RewardFactors, roll_amount, roll_flag, scale_reward};
use crate::state::ItemKey;
use crate::update::Change;

use super::pick_creature;

/// Catch one creature, drawn from the level-adjusted rarity table.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hunt;

impl ActionPlanner for Hunt {
    const KIND: ActionKind = ActionKind::Hunt;

    fn cost(&self, ctx: &PlanContext<'_>) -> Result<u64, ActionError> {
        Ok(ctx.env.config().hunt_cost_for(ctx.account.level))
    }

    fn resolve<R: Rng + ?Sized>(
        &self,
        ctx: &PlanContext<'_>,
        rng: &mut R,
    ) -> Result<Resolution, ActionError> {
        let config = ctx.env.config();
        let tables = ctx.env.tables()?;
        let level = ctx.account.level;

        let rarity = tables.hunt_rarity().with_level_bonus(level).draw(rng);
        let definition = pick_creature(ctx.env.creatures()?, rarity, rng)?;
        let shiny = roll_flag(config.shiny_chance, rng);

        let mut factors = RewardFactors::rarity(tables.hunt_xp_multipliers().get(rarity));
        if shiny {
            factors = factors.with_bonus(config.shiny_multiplier);
        }
        let mut xp = scale_reward(definition.xp, &factors, rng) + u64::from(level / 2);
        let creature = definition.reference();

        let mut resolution = Resolution::new(ActionOutcome::Hunt(HuntOutcome {
            creature: creature.clone(),
            shiny,
            lootbox: None,
        }));
        resolution.changes.push(Change::AdjustInventory {
            item: ItemKey::Creature(creature),
            delta: 1,
        });

        if roll_flag(config.lootbox_drop_chance, rng) {
            let drop = LootboxDrop {
                gold: roll_amount(config.lootbox_drop_gold, rng),
                xp: roll_amount(config.lootbox_drop_xp, rng),
            };
            resolution.reward = drop.gold;
            xp += drop.xp;
            resolution.changes.push(Change::AdjustInventory {
                item: ItemKey::Lootbox,
                delta: 1,
            });
            if let ActionOutcome::Hunt(outcome) = &mut resolution.outcome {
                outcome.lootbox = Some(drop);
            }
        }

        resolution.xp = xp;
        resolution.quest_progress = 1;
        Ok(resolution)
    }
}
