//! Item identity: rarity tiers and structured inventory keys.

use core::fmt;

/// Discrete reward-quality classification, ordered from most to least common.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// All tiers in ascending rarity.
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Position of this tier in [`Rarity::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a creature: its tier plus the catalog name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureRef {
    pub rarity: Rarity,
    pub name: String,
}

impl CreatureRef {
    pub fn new(rarity: Rarity, name: impl Into<String>) -> Self {
        Self {
            rarity,
            name: name.into(),
        }
    }
}

impl fmt::Display for CreatureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.rarity)
    }
}

/// Structured inventory key.
///
/// Creature names may contain any character, so the tier and name are kept as
/// separate fields instead of being joined into a single string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKey {
    Creature(CreatureRef),
    Lootbox,
    FabledLootbox,
}

impl ItemKey {
    pub fn creature(rarity: Rarity, name: impl Into<String>) -> Self {
        Self::Creature(CreatureRef::new(rarity, name))
    }

    pub fn lootbox(fabled: bool) -> Self {
        if fabled {
            Self::FabledLootbox
        } else {
            Self::Lootbox
        }
    }

    pub fn as_creature(&self) -> Option<&CreatureRef> {
        match self {
            Self::Creature(creature) => Some(creature),
            _ => None,
        }
    }
}

impl From<CreatureRef> for ItemKey {
    fn from(creature: CreatureRef) -> Self {
        Self::Creature(creature)
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Creature(creature) => creature.fmt(f),
            Self::Lootbox => f.write_str("lootbox"),
            Self::FabledLootbox => f.write_str("fabled lootbox"),
        }
    }
}
