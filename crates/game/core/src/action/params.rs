//! Action requests and their per-kind parameters.

use crate::env::FoodKind;
use crate::state::{AccountId, CreatureRef, Rarity};

use super::ActionKind;

/// Another account named by a request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    pub account_id: AccountId,
    /// Automated accounts cannot receive gifts or be challenged.
    pub is_bot: bool,
}

impl Target {
    pub fn player(account_id: impl Into<AccountId>) -> Self {
        Self {
            account_id: account_id.into(),
            is_bot: false,
        }
    }
}

/// How many lootboxes to open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OpenCount {
    #[default]
    One,
    Many(u32),
    All,
}

/// Closed set of action parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "action", rename_all = "snake_case"))]
pub enum ActionParams {
    Hunt,
    Battle {
        /// Player whose collection is fought instead of a generated team.
        opponent: Option<Target>,
    },
    Feed {
        food: FoodKind,
    },
    Play,
    Dice {
        /// Falls back to the configured default bet.
        bet: Option<u64>,
        /// Predicted sum of two dice, 2..=12.
        prediction: u8,
    },
    Wheel {
        bet: Option<u64>,
    },
    Give {
        target: Target,
        creature: CreatureRef,
        amount: u32,
    },
    Sell {
        rarity: Rarity,
        /// Sells every creature of the tier when absent.
        amount: Option<u32>,
    },
    OpenLootbox {
        fabled: bool,
        count: OpenCount,
    },
}

impl ActionParams {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Hunt => ActionKind::Hunt,
            Self::Battle { .. } => ActionKind::Battle,
            Self::Feed { .. } => ActionKind::Feed,
            Self::Play => ActionKind::Play,
            Self::Dice { .. } => ActionKind::Dice,
            Self::Wheel { .. } => ActionKind::Wheel,
            Self::Give { .. } => ActionKind::Give,
            Self::Sell { .. } => ActionKind::Sell,
            Self::OpenLootbox { .. } => ActionKind::OpenLootbox,
        }
    }

    /// Account that must exist besides the requester, if any.
    pub fn counterpart(&self) -> Option<&Target> {
        match self {
            Self::Battle { opponent } => opponent.as_ref(),
            Self::Give { target, .. } => Some(target),
            _ => None,
        }
    }
}

/// A player's request to perform one action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRequest {
    pub account_id: AccountId,
    pub params: ActionParams,
}

impl ActionRequest {
    pub fn new(account_id: impl Into<AccountId>, params: ActionParams) -> Self {
        Self {
            account_id: account_id.into(),
            params,
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.params.kind()
    }
}
