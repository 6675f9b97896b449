//! Action kind enumeration.

use core::fmt;

use crate::state::QuestKind;

/// Every economy action a player can request.
///
/// Unit-only so it can key the per-action cooldown map in serialized accounts.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionKind {
    Hunt,
    Battle,
    Feed,
    Play,
    Dice,
    Wheel,
    Give,
    Sell,
    OpenLootbox,
}

impl ActionKind {
    /// Kinds that create a missing account on first use.
    pub const fn open_enrollment(self) -> bool {
        matches!(self, Self::Hunt | Self::Dice | Self::Wheel)
    }

    /// Quest objective advanced by this action, if any.
    pub const fn quest_kind(self) -> Option<QuestKind> {
        match self {
            Self::Hunt => Some(QuestKind::Hunt),
            Self::Battle => Some(QuestKind::Battle),
            Self::Feed => Some(QuestKind::Feed),
            Self::Play => Some(QuestKind::Play),
            Self::Dice | Self::Wheel => Some(QuestKind::Gamble),
            Self::Give | Self::Sell | Self::OpenLootbox => None,
        }
    }

    /// Stable numeric code used as seed context.
    pub const fn code(self) -> u32 {
        match self {
            Self::Hunt => 1,
            Self::Battle => 2,
            Self::Feed => 3,
            Self::Play => 4,
            Self::Dice => 5,
            Self::Wheel => 6,
            Self::Give => 7,
            Self::Sell => 8,
            Self::OpenLootbox => 9,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
