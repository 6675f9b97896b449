//! Reward scaling and independent boolean draws.

use rand::Rng;

use crate::config::AmountRange;

/// Multiplicative factors combined by [`scale_reward`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RewardFactors {
    pub rarity_multiplier: f64,
    /// Shiny / critical multiplier, applied only when the flag rolled true.
    pub bonus_multiplier: Option<f64>,
    /// Half-open variance band, e.g. `(0.8, 1.2)` for +/-20%.
    pub variance: Option<(f64, f64)>,
}

impl RewardFactors {
    pub const fn flat() -> Self {
        Self {
            rarity_multiplier: 1.0,
            bonus_multiplier: None,
            variance: None,
        }
    }

    pub const fn rarity(multiplier: f64) -> Self {
        Self {
            rarity_multiplier: multiplier,
            bonus_multiplier: None,
            variance: None,
        }
    }

    pub const fn with_bonus(mut self, multiplier: f64) -> Self {
        self.bonus_multiplier = Some(multiplier);
        self
    }

    pub const fn with_variance(mut self, low: f64, high: f64) -> Self {
        self.variance = Some((low, high));
        self
    }
}

/// `floor(base × rarity × bonus × variance)`, never negative.
pub fn scale_reward<R: Rng + ?Sized>(base: u64, factors: &RewardFactors, rng: &mut R) -> u64 {
    let variance = match factors.variance {
        Some((low, high)) if low < high => rng.gen_range(low..high),
        Some((low, _)) => low,
        None => 1.0,
    };
    let scaled = base as f64
        * factors.rarity_multiplier
        * factors.bonus_multiplier.unwrap_or(1.0)
        * variance;
    if scaled.is_finite() && scaled > 0.0 {
        scaled.floor() as u64
    } else {
        0
    }
}

/// Independent low-probability flag (shiny, critical, drop).
pub fn roll_flag<R: Rng + ?Sized>(chance: f64, rng: &mut R) -> bool {
    if !chance.is_finite() || chance <= 0.0 {
        return false;
    }
    rng.gen_bool(chance.min(1.0))
}

/// Uniform integer in `[min, max]`; an inverted range yields `min`.
pub fn roll_amount<R: Rng + ?Sized>(range: AmountRange, rng: &mut R) -> u64 {
    if range.min >= range.max {
        return range.min;
    }
    rng.gen_range(range.min..=range.max)
}
