use crate::state::{CreatureRef, Rarity};

/// Catalog entry for a huntable creature.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureDefinition {
    pub name: String,
    pub rarity: Rarity,
    /// Base experience for catching one.
    pub xp: u64,
    /// Sale value and battle strength of one.
    pub value: u64,
}

impl CreatureDefinition {
    pub fn reference(&self) -> CreatureRef {
        CreatureRef::new(self.rarity, self.name.clone())
    }
}

/// Oracle providing the creature catalog.
pub trait CreatureOracle: Send + Sync {
    /// Every creature of the given tier, in catalog order.
    fn creatures(&self, rarity: Rarity) -> &[CreatureDefinition];

    fn definition(&self, creature: &CreatureRef) -> Option<&CreatureDefinition> {
        self.creatures(creature.rarity)
            .iter()
            .find(|definition| definition.name == creature.name)
    }

    /// Value of a creature; unknown creatures are worth nothing.
    fn value_of(&self, creature: &CreatureRef) -> u64 {
        self.definition(creature)
            .map_or(0, |definition| definition.value)
    }
}
