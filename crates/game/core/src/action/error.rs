//! Action precondition errors.
//!
//! Every variant is raised before the conditional update is attempted, so a
//! failed precondition never leaves side effects behind.

use core::fmt;
use core::time::Duration;

use crate::env::OracleError;
use crate::error::{EconomyError, ErrorSeverity};
use crate::state::{ItemKey, Rarity};

use super::ActionKind;

/// Inventory an action needs before it may run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryNeed {
    Item(ItemKey),
    /// Creatures of any tier.
    Creatures,
    CreaturesOf(Rarity),
}

impl fmt::Display for InventoryNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(item) => write!(f, "{item}"),
            Self::Creatures => f.write_str("creatures"),
            Self::CreaturesOf(rarity) => write!(f, "{rarity} creatures"),
        }
    }
}

/// Why another account cannot take part in an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetError {
    #[error("cannot target yourself")]
    SelfTarget,

    #[error("cannot target a bot")]
    Bot,

    #[error("target account does not exist")]
    Unknown,

    #[error("target has no creatures")]
    NoCreatures,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("{kind} is on cooldown for another {}s", remaining.as_secs())]
    OnCooldown { kind: ActionKind, remaining: Duration },

    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("not enough {need}: need {required}, have {available}")]
    InsufficientInventory {
        need: InventoryNeed,
        required: u64,
        available: u64,
    },

    #[error("invalid target: {0}")]
    InvalidTarget(#[from] TargetError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl ActionError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidRequest(reason.into())
    }
}

impl EconomyError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OnCooldown { .. } => ErrorSeverity::Recoverable,
            Self::InsufficientFunds { .. }
            | Self::InsufficientInventory { .. }
            | Self::InvalidTarget(_)
            | Self::InvalidRequest(_) => ErrorSeverity::Validation,
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OnCooldown { .. } => "ACTION_ON_COOLDOWN",
            Self::InsufficientFunds { .. } => "ACTION_INSUFFICIENT_FUNDS",
            Self::InsufficientInventory { .. } => "ACTION_INSUFFICIENT_INVENTORY",
            Self::InvalidTarget(_) => "ACTION_INVALID_TARGET",
            Self::InvalidRequest(_) => "ACTION_INVALID_REQUEST",
            Self::Oracle(err) => err.error_code(),
        }
    }
}
