use rand::Rng;

use crate::action::plan::require_creatures;
use crate::action::{
    ActionError, ActionKind, ActionOutcome, ActionPlanner, BattleOutcome, PlanContext, Resolution,
    Target, TargetError,
};
use crate::probability::{
    RarityTable, TeamMember, opponent_team_size, roll_power, strongest_team, team_power,
};
use crate::state::CreatureRef;
use crate::update::{Change, Condition};

use super::pick_creature;

/// Overwhelming wins stop paying more past this power ratio.
const MAX_POWER_RATIO: f64 = 2.0;
/// Share of the entry cost returned on a loss.
const CONSOLATION_SHARE: f64 = 0.3;

/// Team battle against a generated opponent or a player's collection.
#[derive(Clone, Copy, Debug)]
pub struct Battle<'a> {
    pub opponent: Option<&'a Target>,
}

impl ActionPlanner for Battle<'_> {
    const KIND: ActionKind = ActionKind::Battle;

    fn cost(&self, ctx: &PlanContext<'_>) -> Result<u64, ActionError> {
        Ok(ctx.env.config().battle_entry_cost)
    }

    fn check_inventory(&self, ctx: &PlanContext<'_>) -> Result<Vec<Condition>, ActionError> {
        require_creatures(ctx.account)
    }

    fn check_guards(&self, ctx: &PlanContext<'_>) -> Result<(), ActionError> {
        let Some(target) = self.opponent else {
            return Ok(());
        };
        if target.account_id == ctx.account.id {
            return Err(TargetError::SelfTarget.into());
        }
        if target.is_bot {
            return Err(TargetError::Bot.into());
        }
        match ctx.counterpart {
            Some(opponent) if opponent.inventory.has_creatures() => Ok(()),
            Some(_) => Err(TargetError::NoCreatures.into()),
            None => Err(TargetError::Unknown.into()),
        }
    }

    fn resolve<R: Rng + ?Sized>(
        &self,
        ctx: &PlanContext<'_>,
        rng: &mut R,
    ) -> Result<Resolution, ActionError> {
        let config = ctx.env.config();
        let creatures = ctx.env.creatures()?;
        let multipliers = ctx.env.tables()?.battle_power_multipliers();
        let value_of = |creature: &CreatureRef| creatures.value_of(creature);

        let team = strongest_team(&ctx.account.inventory, value_of);
        let (opponent_team, opponent) = match (self.opponent, ctx.counterpart) {
            (Some(_), Some(account)) => (
                strongest_team(&account.inventory, value_of),
                Some(account.id.clone()),
            ),
            _ => (generate_opponent(ctx, rng)?, None),
        };

        let power = roll_power(team_power(&team, &multipliers), rng);
        let opponent_power = roll_power(team_power(&opponent_team, &multipliers), rng);
        let won = power > opponent_power;

        let base_gold = config.battle_base_gold as f64;
        let (reward, xp) = if won {
            let ratio = if opponent_power > 0.0 {
                (power / opponent_power).min(MAX_POWER_RATIO)
            } else {
                MAX_POWER_RATIO
            };
            (
                (base_gold * (1.5 + ratio * 0.5)).floor() as u64,
                (config.battle_base_xp as f64 * (1.2 + ratio * 0.3)).floor() as u64,
            )
        } else {
            (
                (base_gold * CONSOLATION_SHARE).floor() as u64,
                config.battle_loss_xp,
            )
        };

        let mut resolution = Resolution::new(ActionOutcome::Battle(BattleOutcome {
            won,
            team,
            opponent_team,
            opponent,
            power,
            opponent_power,
        }));
        resolution.reward = reward;
        resolution.xp = xp;
        resolution.changes.push(Change::RecordBattle { won });
        resolution.quest_progress = u32::from(won);
        Ok(resolution)
    }
}

/// Computer-controlled team scaled to the player's level, one copy per slot.
fn generate_opponent<R: Rng + ?Sized>(
    ctx: &PlanContext<'_>,
    rng: &mut R,
) -> Result<Vec<TeamMember>, ActionError> {
    let creatures = ctx.env.creatures()?;
    let level = ctx.account.level;
    let table = RarityTable::opponent(level);

    (0..opponent_team_size(level))
        .map(|_| {
            let definition = pick_creature(creatures, table.draw(rng), rng)?;
            Ok(TeamMember {
                creature: definition.reference(),
                count: 1,
                value: definition.value,
            })
        })
        .collect()
}
