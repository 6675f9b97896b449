//! Error types raised by account store implementations.

use economy_core::{EconomyError, ErrorSeverity};
use thiserror::Error;

/// Errors surfaced by [`super::AccountStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("account store lock was poisoned")]
    LockPoisoned,

    #[error("account store call timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("account store unavailable: {0}")]
    Unavailable(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl EconomyError for StoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Timeout(_) | Self::Unavailable(_) => ErrorSeverity::Recoverable,
            Self::LockPoisoned => ErrorSeverity::Fatal,
            Self::Serialization(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "STORE_LOCK_POISONED",
            Self::Timeout(_) => "STORE_TIMEOUT",
            Self::Unavailable(_) => "STORE_UNAVAILABLE",
            Self::Serialization(_) => "STORE_SERIALIZATION",
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
