//! Exact-match prediction on the sum of two six-sided dice.
//!
//! Multipliers come from the true combinatorial probability of each sum with a
//! fixed house edge withheld, so every prediction has negative expected value.

use rand::Rng;

pub const MIN_TOTAL: u8 = 2;
pub const MAX_TOTAL: u8 = 12;
const OUTCOMES: f64 = 36.0;

/// Number of `(a, b)` pairs with `a + b == total`.
pub const fn ways(total: u8) -> u8 {
    if total < MIN_TOTAL || total > MAX_TOTAL {
        0
    } else if total <= 7 {
        total - 1
    } else {
        13 - total
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiceTable {
    house_edge: f64,
    /// Indexed by total; entries 0 and 1 are unused.
    multipliers: [f64; 13],
}

impl DiceTable {
    /// Precomputes `floor_to_tenth((36 / ways) × (1 − edge))` for every total.
    pub fn new(house_edge: f64) -> Self {
        let edge = if house_edge.is_finite() {
            house_edge.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mut multipliers = [0.0; 13];
        for total in MIN_TOTAL..=MAX_TOTAL {
            let fair = OUTCOMES / f64::from(ways(total));
            // The epsilon keeps exact tenths such as 34.2 from flooring to 34.1.
            multipliers[usize::from(total)] = (fair * (1.0 - edge) * 10.0 + 1e-9).floor() / 10.0;
        }
        Self {
            house_edge: edge,
            multipliers,
        }
    }

    pub fn house_edge(&self) -> f64 {
        self.house_edge
    }

    /// Payout multiplier for a correct prediction of `total`.
    pub fn multiplier_for(&self, total: u8) -> f64 {
        if (MIN_TOTAL..=MAX_TOTAL).contains(&total) {
            self.multipliers[usize::from(total)]
        } else {
            0.0
        }
    }

    /// Multiplier paid for `prediction` given the rolled `total`; zero unless they match.
    pub fn payout_multiplier(&self, prediction: u8, total: u8) -> f64 {
        if prediction == total {
            self.multiplier_for(total)
        } else {
            0.0
        }
    }

    /// Expected multiplier of a bet on `prediction`.
    pub fn expected_multiplier(&self, prediction: u8) -> f64 {
        f64::from(ways(prediction)) / OUTCOMES * self.multiplier_for(prediction)
    }
}

pub fn roll_pair<R: Rng + ?Sized>(rng: &mut R) -> [u8; 2] {
    [rng.gen_range(1..=6), rng.gen_range(1..=6)]
}
