//! Stateless probability engine.
//!
//! Pure functions for weighted outcome selection, rarity redistribution, reward
//! scaling and prediction-game payouts. Every function takes the random source
//! explicitly, so callers decide between entropy and seeded generators.
mod battle;
mod dice;
mod rarity;
mod reward;
mod weighted;

pub use battle::{TeamMember, opponent_team_size, roll_power, strongest_team, team_power};
pub use dice::{DiceTable, MAX_TOTAL, MIN_TOTAL, roll_pair, ways};
pub use rarity::{RarityTable, RarityValues};
pub use reward::{RewardFactors, roll_amount, roll_flag, scale_reward};
pub use weighted::{Outcome, OutcomeTable, OutcomeWeight, Weighted, select, select_index};
