//! Planners for each [`super::ActionKind`].
mod battle;
mod care;
mod gamble;
mod give;
mod hunt;
mod lootbox;
mod sell;

pub use battle::Battle;
pub use care::{Feed, Play};
pub use gamble::{Dice, Wheel};
pub use give::Give;
pub use hunt::Hunt;
pub use lootbox::OpenLootbox;
pub use sell::Sell;

use rand::Rng;

use crate::env::{CreatureDefinition, CreatureOracle, OracleError};
use crate::state::Rarity;

use super::ActionError;

/// Uniform draw among the catalog creatures of one tier.
fn pick_creature<'a, R: Rng + ?Sized>(
    creatures: &'a dyn CreatureOracle,
    rarity: Rarity,
    rng: &mut R,
) -> Result<&'a CreatureDefinition, ActionError> {
    let candidates = creatures.creatures(rarity);
    if candidates.is_empty() {
        return Err(OracleError::EmptyRarity(rarity).into());
    }
    Ok(&candidates[rng.gen_range(0..candidates.len())])
}
