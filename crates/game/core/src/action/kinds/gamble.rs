use rand::Rng;

use crate::action::{
    ActionError, ActionKind, ActionOutcome, ActionPlanner, DiceOutcome, PlanContext, Resolution,
    WheelOutcome,
};
use crate::config::EconomyConfig;
use crate::env::OracleError;
use crate::probability::{DiceTable, MAX_TOTAL, MIN_TOTAL, roll_pair};

/// Requested stake, capped at the table maximum.
fn bet_or_default(bet: Option<u64>, config: &EconomyConfig) -> u64 {
    bet.unwrap_or(config.default_bet).min(config.max_bet)
}

fn check_bet(bet: u64) -> Result<(), ActionError> {
    if bet == 0 {
        return Err(ActionError::invalid("bet must be positive"));
    }
    Ok(())
}

fn payout(bet: u64, multiplier: f64) -> u64 {
    let value = bet as f64 * multiplier;
    if value.is_finite() && value > 0.0 {
        value.floor() as u64
    } else {
        0
    }
}

/// Exact-sum prediction on two six-sided dice.
#[derive(Clone, Copy, Debug)]
pub struct Dice {
    pub bet: Option<u64>,
    pub prediction: u8,
}

impl Dice {
    pub const WIN_XP: u64 = 10;
    pub const LOSS_XP: u64 = 3;
}

impl ActionPlanner for Dice {
    const KIND: ActionKind = ActionKind::Dice;

    fn cost(&self, ctx: &PlanContext<'_>) -> Result<u64, ActionError> {
        Ok(bet_or_default(self.bet, ctx.env.config()))
    }

    fn check_guards(&self, ctx: &PlanContext<'_>) -> Result<(), ActionError> {
        check_bet(bet_or_default(self.bet, ctx.env.config()))?;
        if !(MIN_TOTAL..=MAX_TOTAL).contains(&self.prediction) {
            return Err(ActionError::invalid(format!(
                "prediction {} outside {MIN_TOTAL}..={MAX_TOTAL}",
                self.prediction
            )));
        }
        Ok(())
    }

    fn resolve<R: Rng + ?Sized>(
        &self,
        ctx: &PlanContext<'_>,
        rng: &mut R,
    ) -> Result<Resolution, ActionError> {
        let config = ctx.env.config();
        let bet = bet_or_default(self.bet, config);
        let table = DiceTable::new(config.house_edge);

        let dice = roll_pair(rng);
        let multiplier = table.payout_multiplier(self.prediction, dice[0] + dice[1]);
        let outcome = DiceOutcome {
            dice,
            prediction: self.prediction,
            multiplier,
            payout: payout(bet, multiplier),
        };
        let won = multiplier > 0.0;

        let mut resolution = Resolution::new(ActionOutcome::Dice(outcome));
        resolution.reward = outcome.payout;
        resolution.xp = if won { Self::WIN_XP } else { Self::LOSS_XP };
        resolution.quest_progress = u32::from(won);
        Ok(resolution)
    }
}

/// Spin of the weighted prize wheel.
#[derive(Clone, Copy, Debug)]
pub struct Wheel {
    pub bet: Option<u64>,
}

impl Wheel {
    fn xp_for(multiplier: f64) -> u64 {
        if multiplier >= 3.0 {
            15
        } else if multiplier >= 2.0 {
            10
        } else {
            5
        }
    }
}

impl ActionPlanner for Wheel {
    const KIND: ActionKind = ActionKind::Wheel;

    fn cost(&self, ctx: &PlanContext<'_>) -> Result<u64, ActionError> {
        Ok(bet_or_default(self.bet, ctx.env.config()))
    }

    fn check_guards(&self, ctx: &PlanContext<'_>) -> Result<(), ActionError> {
        check_bet(bet_or_default(self.bet, ctx.env.config()))
    }

    fn resolve<R: Rng + ?Sized>(
        &self,
        ctx: &PlanContext<'_>,
        rng: &mut R,
    ) -> Result<Resolution, ActionError> {
        let bet = bet_or_default(self.bet, ctx.env.config());
        let segment = ctx
            .env
            .tables()?
            .wheel()
            .select(rng)
            .ok_or(OracleError::EmptyTable("wheel"))?;

        let won = segment.multiplier > 1.0;
        let reward = payout(bet, segment.multiplier);
        let xp = Self::xp_for(segment.multiplier);

        let mut resolution = Resolution::new(ActionOutcome::Wheel(WheelOutcome {
            segment: segment.label,
            multiplier: segment.multiplier,
            payout: reward,
        }));
        resolution.reward = reward;
        resolution.xp = xp;
        resolution.quest_progress = u32::from(won);
        Ok(resolution)
    }
}
