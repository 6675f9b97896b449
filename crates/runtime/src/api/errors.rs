//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from action planning, quest claims and the account store so
//! callers can branch on one enum per entry point.

use economy_core::{
    AccountId, ActionError, ActionKind, ClaimError, EconomyError, ErrorSeverity, QuestId,
    UpdateRejection,
};
use thiserror::Error;

pub use crate::repository::StoreError;

/// Failure of [`crate::ActionResolver::resolve`]. Nothing was written unless the
/// variant says otherwise.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Action(#[from] ActionError),

    /// The account changed between the snapshot and the write.
    #[error("{kind} lost a concurrent update: {reason}")]
    RaceLost {
        kind: ActionKind,
        reason: UpdateRejection,
    },

    /// The store refused the write for a reason a retry cannot fix, such as a
    /// mutation that would break an account invariant.
    #[error("{kind} update rejected: {reason}")]
    Rejected {
        kind: ActionKind,
        reason: UpdateRejection,
    },

    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    /// The giver's update committed but crediting the receiver failed; the
    /// items were returned to the giver.
    #[error("gift to {to} could not be delivered: {source}")]
    TransferFailed {
        to: AccountId,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EconomyError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Action(err) => err.severity(),
            Self::RaceLost { .. } => ErrorSeverity::Recoverable,
            Self::Rejected { reason, .. } => match reason.severity() {
                ErrorSeverity::Recoverable => ErrorSeverity::Internal,
                severity => severity,
            },
            Self::AccountNotFound(_) => ErrorSeverity::Validation,
            Self::TransferFailed { source, .. } => source.severity(),
            Self::Store(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Action(err) => err.error_code(),
            Self::RaceLost { .. } => "RESOLVE_RACE_LOST",
            Self::Rejected { .. } => "RESOLVE_UPDATE_REJECTED",
            Self::AccountNotFound(_) => "RESOLVE_ACCOUNT_NOT_FOUND",
            Self::TransferFailed { .. } => "RESOLVE_TRANSFER_FAILED",
            Self::Store(err) => err.error_code(),
        }
    }
}

/// Failure of a quest operation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum QuestError {
    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    #[error("quest {id} changed concurrently: {reason}")]
    RaceLost {
        id: QuestId,
        reason: UpdateRejection,
    },

    #[error("quest update rejected: {0}")]
    Rejected(UpdateRejection),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EconomyError for QuestError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Claim(err) => err.severity(),
            Self::AccountNotFound(_) => ErrorSeverity::Validation,
            Self::RaceLost { .. } => ErrorSeverity::Recoverable,
            Self::Rejected(err) => err.severity(),
            Self::Store(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Claim(err) => err.error_code(),
            Self::AccountNotFound(_) => "QUEST_ACCOUNT_NOT_FOUND",
            Self::RaceLost { .. } => "QUEST_RACE_LOST",
            Self::Rejected(_) => "QUEST_UPDATE_REJECTED",
            Self::Store(err) => err.error_code(),
        }
    }
}

/// Failure of the progression side channel.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ProgressionError {
    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    #[error("experience update kept losing races after {attempts} attempts")]
    Contended { attempts: u32 },

    #[error("experience update rejected: {0}")]
    Rejected(UpdateRejection),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EconomyError for ProgressionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AccountNotFound(_) => ErrorSeverity::Validation,
            Self::Contended { .. } => ErrorSeverity::Recoverable,
            Self::Rejected(err) => err.severity(),
            Self::Store(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "PROGRESSION_ACCOUNT_NOT_FOUND",
            Self::Contended { .. } => "PROGRESSION_CONTENDED",
            Self::Rejected(_) => "PROGRESSION_REJECTED",
            Self::Store(err) => err.error_code(),
        }
    }
}

/// Errors raised while assembling or driving the runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to load economy content: {0}")]
    Content(String),
}
